//! Batch signing orchestration
//!
//! Drives one signing batch end to end: resolve the identity once, locate
//! the tool once, then invoke it per artifact in input order, stopping at
//! the first failure. Every step is a hard gate; nothing is retried.

use crate::backend::{self, SigningBackend};
use crate::error::{Result, SigningError};
use crate::invoker::{ProcessInvoker, ToolInvoker};
use crate::request::SigningRequest;
use crate::store::IdentityResolver;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info};

/// The first artifact that failed to sign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirstFailure {
    pub artifact: PathBuf,
    pub exit_code: i32,
}

/// Outcome of one signing batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub overall_succeeded: bool,

    /// Set when a tool invocation exited non-zero; artifacts after it were
    /// never attempted
    pub first_failure: Option<FirstFailure>,
}

impl BatchResult {
    fn success() -> Self {
        Self {
            overall_succeeded: true,
            first_failure: None,
        }
    }

    fn failed(artifact: PathBuf, exit_code: i32) -> Self {
        Self {
            overall_succeeded: false,
            first_failure: Some(FirstFailure {
                artifact,
                exit_code,
            }),
        }
    }

    /// Convert to a `Result`, turning the first failure into
    /// `SigningError::SigningFailed`
    pub fn into_result(self) -> Result<()> {
        match self.first_failure {
            None => Ok(()),
            Some(failure) => Err(SigningError::SigningFailed {
                artifact: failure.artifact,
                exit_code: failure.exit_code,
            }),
        }
    }
}

/// Top-level signing driver
pub struct Orchestrator {
    resolver: IdentityResolver,
    /// `None` when neither signing backend applies to this host
    backend: Option<Box<dyn SigningBackend>>,
    invoker: Box<dyn ProcessInvoker>,
}

impl Orchestrator {
    /// Assemble an orchestrator from explicit collaborators
    pub fn new(
        resolver: IdentityResolver,
        backend: Option<Box<dyn SigningBackend>>,
        invoker: Box<dyn ProcessInvoker>,
    ) -> Self {
        Self {
            resolver,
            backend,
            invoker,
        }
    }

    /// Orchestrator wired to the current host's stores, backend, and a
    /// real process invoker
    pub fn for_host() -> Self {
        Self::new(
            IdentityResolver::for_host(),
            backend::host_backend(),
            Box::new(ToolInvoker::new()),
        )
    }

    /// Sign every artifact in the request with the identity matching the
    /// given thumbprint.
    ///
    /// The identity is resolved exactly once; all artifacts are signed
    /// with it. A non-zero tool exit stops the batch and is reported in
    /// `first_failure`; a tool that cannot be launched at all propagates
    /// as `LaunchFailed`.
    pub async fn sign(&self, request: &SigningRequest, fingerprint: &str) -> Result<BatchResult> {
        info!(fingerprint, files = request.artifact_paths.len(), "starting signing batch");

        let identity = self.resolver.resolve(fingerprint).await?;

        let backend = self
            .backend
            .as_deref()
            .ok_or(SigningError::UnsupportedPlatform)?;

        let tool = backend.locate_tool(request)?;
        info!(backend = backend.name(), tool = %tool.path.display(), "located signing tool");

        let base = backend.base_arguments(&identity, request);

        for artifact in &request.artifact_paths {
            let command_line = base.with_quoted(artifact.display().to_string());

            let result = self.invoker.invoke(&tool.path, &command_line).await?;
            if !result.succeeded {
                error!(
                    artifact = %artifact.display(),
                    exit_code = result.exit_code,
                    "signing failed, abandoning remaining artifacts"
                );
                return Ok(BatchResult::failed(artifact.clone(), result.exit_code));
            }
        }

        info!(files = request.artifact_paths.len(), "signing batch complete");
        Ok(BatchResult::success())
    }
}
