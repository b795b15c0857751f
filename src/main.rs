use anyhow::Result;
use clap::{
    FromArgMatches, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects, RgbColor},
    },
};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod inventory;
mod package_cache;
mod prompt;
mod types;
mod utils;

use crate::commands::{Context, Outcome};
use crate::config::{Platform, RemoverKind, SweepConfig, ToolPaths};
use crate::inventory::removal::{FsRemover, Remover, ShellRemover};
use crate::package_cache::DotnetNugetCache;
use crate::prompt::{AutoPrompter, Prompter};

#[derive(Parser)]
#[command(
    name = "msweep",
    version,
    about = "Mobile Sweep (msweep) - Reclaim disk space used by mobile toolchain artifacts"
)]
struct AppCli {
    #[arg(long, global = true, help = "Android SDK root (overrides config and auto-detection)")]
    sdk_root: Option<String>,

    #[arg(long, global = true, help = ".NET root containing `packs/`")]
    dotnet_root: Option<String>,

    #[arg(short = 'y', long, global = true, help = "Select every candidate and skip confirmations")]
    yes: bool,

    #[arg(short, long, global = true, help = "Show debug logs")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Remove build outputs (bin/obj) from a project")]
    Build {
        #[arg(help = "Project directory (defaults to current directory)")]
        directory: Option<PathBuf>,
    },

    #[command(about = "Clear all local NuGet caches")]
    Cache,

    #[command(about = "Remove iOS device support folders (macOS only)")]
    DeviceSupport,

    #[command(about = "Remove Android SDK components")]
    Sdk,

    #[command(about = "Remove simulator runtime assets (macOS only)")]
    Simulators,

    #[command(about = "Remove .NET workload packs or pack versions")]
    Packs,

    #[command(about = "Keep only the newest version in every layout")]
    Prune,
}

fn main() {
    println!();
    if let Err(err) = run() {
        eprintln!("{} {:#}\n", "error:".red().bold(), err);
        std::process::exit(1);
    }

    println!();
}

fn run() -> Result<()> {
    use clap::CommandFactory;

    let orange = RgbColor(234, 88, 12);

    let styles = Styles::styled()
        .header(AnsiColor::BrightBlack.on_default())
        .usage(AnsiColor::BrightBlack.on_default())
        .literal(orange.on_default())
        .placeholder(AnsiColor::BrightBlack.on_default())
        .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
        .valid(AnsiColor::BrightGreen.on_default())
        .invalid(AnsiColor::BrightRed.on_default());

    let matches = AppCli::command().styles(styles).get_matches();
    let cli = AppCli::from_arg_matches(&matches)?;

    init_tracing(cli.verbose);

    let mut config = SweepConfig::load()?;
    if let Some(root) = cli.sdk_root {
        config.sdk_root = root;
    }
    if let Some(root) = cli.dotnet_root {
        config.dotnet_root = root;
    }

    let project = match &cli.command {
        Commands::Build { directory: Some(dir) } => dir.clone(),
        _ => std::env::current_dir()?,
    };

    let platform = Platform::current();
    let paths = ToolPaths::resolve(&config, platform, project);
    tracing::debug!(?paths, "resolved tool paths");

    let prompter = select_prompter(cli.yes)?;
    let remover: Box<dyn Remover> = match config.remover {
        RemoverKind::Native => Box::new(FsRemover),
        RemoverKind::Shell => Box::new(ShellRemover),
    };

    let ctx = Context {
        config,
        paths,
        platform,
        prompter: prompter.as_ref(),
        remover: remover.as_ref(),
        show_progress: true,
    };

    let outcome: Outcome = match cli.command {
        Commands::Build { .. } => commands::build::clean_build_outputs(&ctx)?,
        Commands::Cache => commands::cache::clear_package_cache(&ctx, &DotnetNugetCache::new())?,
        Commands::DeviceSupport => commands::device_support::clean_device_support(&ctx)?,
        Commands::Sdk => commands::sdk::clean_sdk_components(&ctx)?,
        Commands::Simulators => commands::simulators::clean_simulator_runtimes(&ctx)?,
        Commands::Packs => commands::packs::clean_packs(&ctx)?,
        Commands::Prune => commands::prune::prune_to_latest(&ctx)?,
    };

    println!();
    commands::report(&outcome);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "msweep=debug" } else { "msweep=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

#[cfg(feature = "full")]
fn select_prompter(yes: bool) -> Result<Box<dyn Prompter>> {
    if yes {
        Ok(Box::new(AutoPrompter))
    } else {
        Ok(Box::new(prompt::TerminalPrompter))
    }
}

#[cfg(not(feature = "full"))]
fn select_prompter(yes: bool) -> Result<Box<dyn Prompter>> {
    if !yes {
        anyhow::bail!("Interactive selection is not available in this build, pass --yes to select everything");
    }
    Ok(Box::new(AutoPrompter))
}
