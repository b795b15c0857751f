use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

use crate::inventory::size::size_or_zero;
use crate::types::{Failure, RemovalResult, Target};

/// Recursive deletion of a single path.
pub trait Remover {
    fn remove_recursive(&self, path: &Path) -> Result<(), String>;
}

/// Deletes through the standard library.
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove_recursive(&self, path: &Path) -> Result<(), String> {
        let meta = path.symlink_metadata().map_err(|e| e.to_string())?;
        let result = if meta.is_dir() { fs::remove_dir_all(path) } else { fs::remove_file(path) };
        result.map_err(|e| e.to_string())
    }
}

/// Deletes through the platform shell, which copes better with huge trees.
pub struct ShellRemover;

impl Remover for ShellRemover {
    fn remove_recursive(&self, path: &Path) -> Result<(), String> {
        if path.symlink_metadata().is_err() {
            return Err(format!("{} does not exist", path.display()));
        }

        let mut command = shell_command(path);
        let output = command.output().map_err(|e| format!("failed to run shell: {e}"))?;
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(format!("shell exited with {}: {}", output.status, stderr.trim()))
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        fn shell_command(path: &Path) -> Command {
            let mut command = Command::new("cmd");
            if path.is_dir() {
                command.args(["/C", "rmdir", "/S", "/Q"]);
            } else {
                command.args(["/C", "del", "/F", "/Q"]);
            }
            command.arg(path);
            command
        }
    } else {
        fn shell_command(path: &Path) -> Command {
            let mut command = Command::new("rm");
            command.arg("-rf").arg(path);
            command
        }
    }
}

/// Deletes a batch of targets one by one. A failure never stops the batch.
pub struct RemovalExecutor<'a> {
    remover: &'a dyn Remover,
    show_progress: bool,
}

impl<'a> RemovalExecutor<'a> {
    pub fn new(remover: &'a dyn Remover) -> Self {
        Self { remover, show_progress: false }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn execute(&self, targets: &[Target]) -> RemovalResult {
        let pb = self.progress_bar(targets.len() as u64);
        let mut result = RemovalResult::default();

        for target in targets {
            pb.set_message(target.label.clone());

            // Measured now, not at scan time: the tree may have changed while the user was choosing.
            let size = size_or_zero(&target.path);

            match self.remover.remove_recursive(&target.path) {
                Ok(()) => {
                    debug!(path = %target.path.display(), size, "removed");
                    result.removed_count += 1;
                    result.freed_bytes += size;
                },
                Err(message) => {
                    warn!(path = %target.path.display(), error = %message, "removal failed");
                    result.failures.push(Failure { path: target.path.clone(), message });
                },
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        result
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar().template("Removing [{bar:30.cyan/blue}] {pos}/{len} {msg}") {
            pb.set_style(style.progress_chars("█░"));
        }
        pb
    }
}
