use crate::config::ImportSettings;
use crate::error::{BloomError, Result};
use crate::process;
use std::path::Path;
use std::process::Command;

/// External tool that merges an upstream tarball into the release history
/// (git-buildpackage's `git-import-orig` by default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTool {
    pub program: String,
    pub args: Vec<String>,
}

impl ImportTool {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        ImportTool {
            program: program.into(),
            args,
        }
    }

    pub fn from_settings(settings: &ImportSettings) -> Self {
        ImportTool::new(settings.program.clone(), settings.args.clone())
    }

    /// Returns true if `<program> --help` launches and succeeds
    pub fn is_installed(&self) -> bool {
        process::succeeds_quietly(Command::new(&self.program).arg("--help"))
    }

    /// Fails with an installation hint when the tool is not available
    pub fn ensure_installed(&self) -> Result<()> {
        if self.is_installed() {
            Ok(())
        } else {
            Err(BloomError::ImportToolMissing {
                program: self.program.clone(),
            })
        }
    }

    fn command(&self, tarball: &Path, cwd: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(cwd).args(&self.args).arg(tarball);
        cmd
    }

    /// Imports `tarball` into the repository at `cwd`.
    ///
    /// The tool runs attached to the terminal so it can prompt the user.
    /// Launch failure or a non-zero exit is reported with the full command line.
    pub fn import(&self, tarball: &Path, cwd: &Path) -> Result<()> {
        let mut cmd = self.command(tarball, cwd);
        let line = process::command_line(&cmd);
        tracing::info!(command = %line, "importing upstream tarball");

        process::run_interactive(&mut cmd).map_err(|e| {
            tracing::debug!(error = %e, "import failed");
            BloomError::ImportFailed {
                program: self.program.clone(),
                command: line,
            }
        })
    }
}

impl Default for ImportTool {
    fn default() -> Self {
        ImportTool::from_settings(&ImportSettings::default())
    }
}
