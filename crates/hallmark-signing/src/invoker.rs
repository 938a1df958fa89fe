//! External process invocation for signing tools

use crate::error::{Result, SigningError};
use std::path::Path;
use tracing::info;

/// One argument on a tool command line.
///
/// Quoted arguments carry operator-supplied values (thumbprints, URLs,
/// artifact paths) and render wrapped in double quotes; literals are the
/// tool's own flags and render bare. The distinction only affects
/// rendering - the process is always spawned with unquoted argv tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Arg {
    Literal(String),
    Quoted(String),
}

/// An ordered tool command line.
///
/// `render` reproduces the exact operator-visible command-line string the
/// wrapped tools document; `tokens` yields the argv used to spawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    args: Vec<Arg>,
}

impl CommandLine {
    /// Create an empty command line
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bare flag or keyword
    pub fn push_literal(&mut self, arg: impl Into<String>) {
        self.args.push(Arg::Literal(arg.into()));
    }

    /// Append a value that renders double-quoted
    pub fn push_quoted(&mut self, arg: impl Into<String>) {
        self.args.push(Arg::Quoted(arg.into()));
    }

    /// Clone this command line with one more quoted value appended.
    ///
    /// Used to stamp each artifact path onto a shared base template.
    pub fn with_quoted(&self, arg: impl Into<String>) -> Self {
        let mut line = self.clone();
        line.push_quoted(arg);
        line
    }

    /// The argv tokens to spawn the process with
    pub fn tokens(&self) -> Vec<&str> {
        self.args
            .iter()
            .map(|arg| match arg {
                Arg::Literal(value) | Arg::Quoted(value) => value.as_str(),
            })
            .collect()
    }

    /// The operator-visible command-line string
    pub fn render(&self) -> String {
        self.args
            .iter()
            .map(|arg| match arg {
                Arg::Literal(value) => value.clone(),
                Arg::Quoted(value) => format!("\"{}\"", value),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Outcome of one tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationResult {
    /// Raw exit code; `-1` when the process was terminated by a signal
    pub exit_code: i32,

    /// Whether the tool exited zero
    pub succeeded: bool,
}

impl InvocationResult {
    fn from_exit_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            succeeded: exit_code == 0,
        }
    }
}

/// Runs an external tool and reports its exit status.
///
/// A tool that cannot be started at all is a `LaunchFailed` error,
/// distinct from a tool that launched and exited non-zero.
#[async_trait::async_trait]
pub trait ProcessInvoker: Send + Sync {
    async fn invoke(&self, tool: &Path, command_line: &CommandLine) -> Result<InvocationResult>;
}

/// Process invoker backed by tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolInvoker;

impl ToolInvoker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ProcessInvoker for ToolInvoker {
    async fn invoke(&self, tool: &Path, command_line: &CommandLine) -> Result<InvocationResult> {
        // Audit trail: the exact invocation goes to the diagnostic stream
        // before the process starts.
        info!("Executing: {} {}", tool.display(), command_line);

        let status = tokio::process::Command::new(tool)
            .args(command_line.tokens())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| SigningError::LaunchFailed {
                tool: tool.to_path_buf(),
                source,
            })?;

        Ok(InvocationResult::from_exit_code(status.code().unwrap_or(-1)))
    }
}
