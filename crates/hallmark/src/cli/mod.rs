//! CLI definition and command handling

pub mod commands;

use clap::{Parser, Subcommand};

use commands::{NotarizeCommand, SignCommand};

/// Hallmark - code signing toolkit
#[derive(Debug, Parser)]
#[command(name = "hallmark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign binaries and installer packages
    Sign(SignCommand),

    /// Notarize an application bundle or installer package
    Notarize(NotarizeCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Sign(ref cmd) => cmd.execute(&self),
            Commands::Notarize(ref cmd) => cmd.execute(&self),
        }
    }
}
