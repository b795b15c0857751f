use std::process::Command;
use tracing::debug;

use crate::error::SweepError;

/// An external package manager able to drop all of its local caches.
pub trait PackageCache {
    fn name(&self) -> &'static str;

    /// Returns the tool's own report on success.
    fn clear_all(&self) -> Result<String, SweepError>;
}

/// NuGet caches through `dotnet nuget locals all --clear`.
pub struct DotnetNugetCache {
    program: String,
}

impl Default for DotnetNugetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DotnetNugetCache {
    pub fn new() -> Self {
        Self { program: "dotnet".to_string() }
    }

    #[cfg(test)]
    fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl PackageCache for DotnetNugetCache {
    fn name(&self) -> &'static str {
        "NuGet"
    }

    fn clear_all(&self) -> Result<String, SweepError> {
        debug!(program = %self.program, "clearing NuGet locals");

        let output = Command::new(&self.program)
            .args(["nuget", "locals", "all", "--clear"])
            .output()
            .map_err(|e| SweepError::CacheClear(format!("could not run `{}`: {e}", self.program)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() {
            Ok(stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() { stdout } else { stderr };
            Err(SweepError::CacheClear(format!("{} ({})", detail, output.status)))
        }
    }
}
