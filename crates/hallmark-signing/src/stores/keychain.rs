//! macOS keychain credential store backed by the `security` tool

use crate::error::{Result, SigningError};
use crate::identity::{SigningIdentity, StoreOrigin};
use crate::store::CredentialStore;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A macOS keychain searched through `security find-identity`
pub struct KeychainStore {
    origin: StoreOrigin,
    /// Explicit keychain to search; `None` falls back to the default
    /// search list
    keychain: Option<PathBuf>,
    security_path: String,
}

impl KeychainStore {
    /// The current user's login keychain.
    ///
    /// The keychain is passed explicitly: the default search list also
    /// covers the System keychain, which would mislabel a machine-scope
    /// identity as user scope.
    pub fn login() -> Self {
        Self {
            origin: StoreOrigin::UserScope,
            keychain: dirs::home_dir()
                .map(|home| home.join("Library/Keychains/login.keychain-db")),
            security_path: "/usr/bin/security".to_string(),
        }
    }

    /// The machine-wide System keychain
    pub fn system() -> Self {
        Self {
            origin: StoreOrigin::MachineScope,
            keychain: Some(PathBuf::from("/Library/Keychains/System.keychain")),
            security_path: "/usr/bin/security".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for KeychainStore {
    fn origin(&self) -> StoreOrigin {
        self.origin
    }

    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<SigningIdentity>> {
        let mut command = Command::new(&self.security_path);
        command.args(["find-identity", "-v", "-p", "codesigning"]);

        if let Some(keychain) = &self.keychain {
            command.arg(keychain);
        }

        let output = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SigningError::StoreUnavailable(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let matched = stdout
            .lines()
            .filter_map(parse_identity_line)
            .find(|(fp, _)| fp.eq_ignore_ascii_case(fingerprint));

        debug!(origin = %self.origin, found = matched.is_some(), "keychain search complete");

        Ok(matched
            .map(|(fp, subject)| SigningIdentity::new(fp, subject, self.origin)))
    }
}

/// Parse one `security find-identity` result line into (fingerprint,
/// subject).
///
/// Format: `  1) FINGERPRINT "Subject Name (TEAMID)"`
fn parse_identity_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if !line.starts_with(char::is_numeric) {
        return None;
    }

    let mut parts = line.splitn(3, ' ');
    parts.next()?; // "1)"
    let fingerprint = parts.next()?.to_string();
    let rest = parts.next()?;

    // Subject is quoted
    let start = rest.find('"')?;
    let end = rest[start + 1..].find('"')? + start + 1;
    let subject = rest[start + 1..end].to_string();

    Some((fingerprint, subject))
}
