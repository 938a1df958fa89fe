//! Notarize command
//!
//! Submission to the notary service is not implemented yet; the command
//! validates the platform and echoes its input.

use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::cli::Cli;

/// Notarize an application bundle or installer package
#[derive(Debug, Args)]
pub struct NotarizeCommand {
    /// Apple ID account/email
    #[arg(long, value_name = "id")]
    pub apple_id: String,

    /// Apple ID password
    #[arg(long)]
    pub password: String,

    /// Application bundle or installer package to notarize
    #[arg(value_name = "file")]
    pub file: PathBuf,
}

impl NotarizeCommand {
    /// Execute the notarize command
    pub fn execute(&self, _cli: &Cli) -> anyhow::Result<()> {
        anyhow::ensure!(
            cfg!(target_os = "macos"),
            "notarization is only available on macOS platforms"
        );
        anyhow::ensure!(!self.password.is_empty(), "password must not be empty");

        let file_name = self
            .file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.display().to_string());

        info!(apple_id = %self.apple_id, file = %file_name, "notarization requested");

        Ok(())
    }
}
