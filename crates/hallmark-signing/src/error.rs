//! Error types for signing operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for signing operations
pub type Result<T> = std::result::Result<T, SigningError>;

/// Signing-related errors
///
/// Every variant is terminal for the batch it occurs in; nothing here is
/// retried. The distinctions exist for diagnostics only - the CLI collapses
/// all of them into a single failure exit code.
#[derive(Debug, Error)]
pub enum SigningError {
    /// No certificate with the requested thumbprint in any credential store
    #[error("unable to locate certificate with thumbprint '{fingerprint}'")]
    CertificateNotFound { fingerprint: String },

    /// Signing tool not installed for the requested architecture
    #[error("failed to find signing tool for architecture '{architecture}'")]
    ToolNotFound { architecture: String },

    /// Neither signing backend applies to this host
    #[error("signing operation not supported on this platform")]
    UnsupportedPlatform,

    /// The signing tool could not be started at all
    #[error("failed to launch {tool}: {source}")]
    LaunchFailed {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The signing tool ran and exited non-zero
    #[error("failed to sign {artifact} (exit={exit_code})")]
    SigningFailed { artifact: PathBuf, exit_code: i32 },

    /// A credential store could not be searched
    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
