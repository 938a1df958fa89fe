//! Platform signing backends
//!
//! The two supported platforms differ in exactly two places: how the
//! signing tool is located and what base arguments it takes. Both live
//! behind `SigningBackend` so the orchestrator stays platform-free and
//! both variants can be exercised without the host OS. Selection happens
//! once at startup via `host_backend`.

use crate::error::{Result, SigningError};
use crate::identity::SigningIdentity;
use crate::invoker::CommandLine;
use crate::locator::{self, ToolDescriptor};
use crate::request::SigningRequest;
use std::path::PathBuf;

/// Fixed location of codesign on macOS
pub const CODESIGN_PATH: &str = "/usr/bin/codesign";

/// A platform signing tool: where it lives and how it is driven
pub trait SigningBackend: Send + Sync {
    /// Backend name for diagnostics
    fn name(&self) -> &str;

    /// Locate the signing tool for this request
    fn locate_tool(&self, request: &SigningRequest) -> Result<ToolDescriptor>;

    /// Build the per-batch argument template. The orchestrator appends
    /// each artifact path to it.
    fn base_arguments(&self, identity: &SigningIdentity, request: &SigningRequest)
        -> CommandLine;
}

/// macOS backend driving `/usr/bin/codesign`
#[derive(Debug, Clone, Copy, Default)]
pub struct CodesignBackend;

impl CodesignBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SigningBackend for CodesignBackend {
    fn name(&self) -> &str {
        "codesign"
    }

    /// codesign lives at one well-known path; no search
    fn locate_tool(&self, _request: &SigningRequest) -> Result<ToolDescriptor> {
        Ok(ToolDescriptor {
            path: PathBuf::from(CODESIGN_PATH),
            version: None,
        })
    }

    fn base_arguments(
        &self,
        identity: &SigningIdentity,
        _request: &SigningRequest,
    ) -> CommandLine {
        let mut line = CommandLine::new();
        line.push_literal("-s");
        line.push_quoted(identity.fingerprint.as_str());
        // Hardened runtime is always enabled
        line.push_literal("--options");
        line.push_literal("runtime");
        // Existing signatures are unconditionally replaced
        line.push_literal("--force");
        line
    }
}

/// Windows backend driving signtool.exe from the newest installed SDK
#[derive(Debug, Clone, Default)]
pub struct SigntoolBackend {
    /// Explicit SDK root, bypassing registry discovery
    installation_root: Option<PathBuf>,
}

impl SigntoolBackend {
    /// Discover the SDK through the registry
    pub fn new() -> Self {
        Self {
            installation_root: None,
        }
    }

    /// Use an explicit SDK installation root instead of the registry
    pub fn with_installation_root(root: impl Into<PathBuf>) -> Self {
        Self {
            installation_root: Some(root.into()),
        }
    }
}

impl SigningBackend for SigntoolBackend {
    fn name(&self) -> &str {
        "signtool"
    }

    fn locate_tool(&self, request: &SigningRequest) -> Result<ToolDescriptor> {
        // An absent architecture never matches a tool directory, so it
        // surfaces as the tool not being found.
        let architecture = request.architecture.as_deref().unwrap_or_default();

        match &self.installation_root {
            Some(root) => locator::locate_in_root(root, architecture),
            None => locator::locate(architecture),
        }
    }

    fn base_arguments(
        &self,
        identity: &SigningIdentity,
        request: &SigningRequest,
    ) -> CommandLine {
        let mut line = CommandLine::new();
        line.push_literal("sign");
        line.push_literal("/sha1");
        line.push_quoted(identity.fingerprint.as_str());

        if let Some(algorithm) = request.hash_algorithm {
            line.push_literal("/fd");
            line.push_quoted(algorithm.to_string());
        }

        if let Some(url) = &request.timestamp_url {
            line.push_literal("/t");
            line.push_quoted(url.as_str());
        }

        line
    }
}

/// The signing backend for the current host, or `None` when neither
/// backend applies
pub fn host_backend() -> Option<Box<dyn SigningBackend>> {
    #[cfg(target_os = "macos")]
    {
        Some(Box::new(CodesignBackend::new()))
    }

    #[cfg(target_os = "windows")]
    {
        Some(Box::new(SigntoolBackend::new()))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StoreOrigin;
    use crate::request::HashAlgorithm;

    const FP: &str = "AABBCCDDEEFF00112233445566778899AABBCCDD";

    fn identity() -> SigningIdentity {
        SigningIdentity::new(FP, "Example Corp", StoreOrigin::UserScope)
    }

    #[test]
    fn test_codesign_arguments() {
        let backend = CodesignBackend::new();
        let request = SigningRequest::new(vec![]);

        let line = backend
            .base_arguments(&identity(), &request)
            .with_quoted("app.bin");

        assert_eq!(
            line.render(),
            format!(r#"-s "{}" --options runtime --force "app.bin""#, FP)
        );
    }

    #[test]
    fn test_codesign_ignores_signtool_options() {
        let backend = CodesignBackend::new();
        let mut request = SigningRequest::new(vec![]);
        request.hash_algorithm = Some(HashAlgorithm::Sha256);
        request.timestamp_url = Some("http://timestamp.example.com".to_string());

        let line = backend.base_arguments(&identity(), &request);
        assert!(!line.render().contains("/fd"));
        assert!(!line.render().contains("/t"));
    }

    #[test]
    fn test_codesign_tool_is_fixed_path() {
        let backend = CodesignBackend::new();
        let tool = backend.locate_tool(&SigningRequest::new(vec![])).unwrap();

        assert_eq!(tool.path, PathBuf::from("/usr/bin/codesign"));
        assert!(tool.version.is_none());
    }

    #[test]
    fn test_signtool_arguments_minimal() {
        let backend = SigntoolBackend::new();
        let request = SigningRequest::new(vec![]);

        let line = backend
            .base_arguments(&identity(), &request)
            .with_quoted("app.exe");

        assert_eq!(line.render(), format!(r#"sign /sha1 "{}" "app.exe""#, FP));
    }

    #[test]
    fn test_signtool_arguments_hash_without_timestamp() {
        let backend = SigntoolBackend::new();
        let mut request = SigningRequest::new(vec![]);
        request.hash_algorithm = Some(HashAlgorithm::Sha256);

        let rendered = backend.base_arguments(&identity(), &request).render();

        assert_eq!(rendered, format!(r#"sign /sha1 "{}" /fd "sha256""#, FP));
        assert!(!rendered.contains("/t "));
    }

    #[test]
    fn test_signtool_arguments_full() {
        let backend = SigntoolBackend::new();
        let mut request = SigningRequest::new(vec![]);
        request.hash_algorithm = Some(HashAlgorithm::Sha1);
        request.timestamp_url = Some("http://timestamp.example.com".to_string());

        assert_eq!(
            backend.base_arguments(&identity(), &request).render(),
            format!(
                r#"sign /sha1 "{}" /fd "sha1" /t "http://timestamp.example.com""#,
                FP
            )
        );
    }

    #[test]
    fn test_signtool_locates_in_explicit_root() {
        let root = tempfile::tempdir().unwrap();
        let tool_dir = root.path().join("bin").join("10.0.22000.0").join("x64");
        std::fs::create_dir_all(&tool_dir).unwrap();
        std::fs::write(tool_dir.join("signtool.exe"), b"").unwrap();

        let backend = SigntoolBackend::with_installation_root(root.path());
        let mut request = SigningRequest::new(vec![]);
        request.architecture = Some("x64".to_string());

        let tool = backend.locate_tool(&request).unwrap();
        assert!(tool.path.ends_with("x64/signtool.exe"));
    }

    #[test]
    fn test_signtool_missing_architecture_is_tool_not_found() {
        let root = tempfile::tempdir().unwrap();
        let backend = SigntoolBackend::with_installation_root(root.path());

        let err = backend.locate_tool(&SigningRequest::new(vec![])).unwrap_err();
        assert!(matches!(err, SigningError::ToolNotFound { .. }));
    }
}
