use anyhow::Result;
use colored::Colorize;

use crate::config::{Platform, SweepConfig, ToolPaths};
use crate::inventory::removal::{RemovalExecutor, Remover};
use crate::inventory::retention;
use crate::prompt::Prompter;
use crate::types::{Candidate, RemovalResult, Target};
use crate::utils::{display_path, spinner};

pub mod build;
pub mod cache;
pub mod device_support;
pub mod packs;
pub mod prune;
pub mod sdk;
pub mod simulators;


/// Everything a command needs, resolved once in `main`.
pub struct Context<'a> {
    pub config: SweepConfig,
    pub paths: ToolPaths,
    pub platform: Platform,
    pub prompter: &'a dyn Prompter,
    pub remover: &'a dyn Remover,
    pub show_progress: bool,
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    NothingFound,
    Cancelled,
    Unsupported(String),
    CacheCleared { tool: &'static str, report: String },
    Removed(RemovalResult),
}

impl Context<'_> {
    pub(crate) fn scanning<T>(&self, message: &str, scan: impl FnOnce() -> T) -> T {
        if !self.show_progress {
            return scan();
        }
        let pb = spinner(message);
        let result = scan();
        pb.finish_and_clear();
        result
    }

    pub(crate) fn execute(&self, targets: &[Target]) -> RemovalResult {
        RemovalExecutor::new(self.remover).with_progress(self.show_progress).execute(targets)
    }
}

/// Presenting → Removing part of every interactive command.
pub(crate) fn select_and_remove(ctx: &Context, candidates: Vec<Candidate>, prompt: &str) -> Result<Outcome> {
    if candidates.is_empty() {
        return Ok(Outcome::NothingFound);
    }

    let selected = match ctx.prompter.pick(&candidates, true, prompt)? {
        Some(selected) if !selected.is_empty() => selected,
        _ => return Ok(Outcome::Cancelled),
    };

    let selected = confirm_in_use(ctx, selected)?;
    if selected.is_empty() {
        return Ok(Outcome::Cancelled);
    }

    let targets = retention::explicit_selection(&selected);
    Ok(Outcome::Removed(ctx.execute(&targets)))
}

fn confirm_in_use(ctx: &Context, selected: Vec<Candidate>) -> Result<Vec<Candidate>> {
    let in_use: Vec<String> = selected.iter().filter(|c| c.is_in_use()).map(|c| Target::from(c).label).collect();
    if in_use.is_empty() {
        return Ok(selected);
    }

    let message = format!("{} selected item(s) are in use ({}). Remove them anyway?", in_use.len(), in_use.join(", "));
    if ctx.prompter.confirm(&message)? {
        return Ok(selected);
    }

    println!("{} Keeping in-use items", "ℹ".cyan());
    Ok(selected.into_iter().filter(|c| !c.is_in_use()).collect())
}

fn summary_line(result: &RemovalResult) -> String {
    if result.failures.is_empty() {
        format!("{} {}", "✅".green(), result.summary().green().bold())
    } else {
        format!("{} {}", "⚠".yellow(), result.summary().yellow().bold())
    }
}

pub fn report(outcome: &Outcome) {
    match outcome {
        Outcome::NothingFound => println!("{} Nothing to clean", "📭".yellow()),
        Outcome::Cancelled => println!("{} Cancelled, nothing was removed", "ℹ".cyan()),
        Outcome::Unsupported(message) => println!("{} {}", "ℹ".cyan(), message),
        Outcome::CacheCleared { tool, report } => {
            if !report.is_empty() {
                println!("{}", report.bright_black());
            }
            println!("{} {} cache cleared", "✅".green(), tool);
        },
        Outcome::Removed(result) => {
            println!("{}", summary_line(result));
            if !result.failures.is_empty() {
                println!("{} {} item(s) could not be removed:", "⚠".yellow(), result.failures.len());
                for failure in &result.failures {
                    println!("  {} {}: {}", "✗".red(), display_path(&failure.path).cyan(), failure.message);
                }
            }
        },
    }
}
