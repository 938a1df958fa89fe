//! Windows certificate store backed by the `certutil` tool

use crate::error::{Result, SigningError};
use crate::identity::{SigningIdentity, StoreOrigin};
use crate::store::CredentialStore;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A Windows certificate store searched through `certutil -store`
pub struct CertutilStore {
    origin: StoreOrigin,
}

impl CertutilStore {
    /// The CurrentUser personal certificate store
    pub fn user() -> Self {
        Self {
            origin: StoreOrigin::UserScope,
        }
    }

    /// The LocalMachine personal certificate store
    pub fn machine() -> Self {
        Self {
            origin: StoreOrigin::MachineScope,
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for CertutilStore {
    fn origin(&self) -> StoreOrigin {
        self.origin
    }

    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<SigningIdentity>> {
        let mut command = Command::new("certutil");

        if self.origin == StoreOrigin::UserScope {
            command.arg("-user");
        }
        command.args(["-store", "My"]);

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
        let matched = find_in_store_listing(&stdout, fingerprint);

        debug!(origin = %self.origin, found = matched.is_some(), "certificate store search complete");

        Ok(matched
            .map(|(fp, subject)| SigningIdentity::new(fp, subject, self.origin)))
    }
}

/// Scan `certutil -store` output for a certificate whose SHA-1 hash matches
/// the given thumbprint, returning (fingerprint, subject).
///
/// certutil prints each certificate as a block with a `Subject:` line
/// followed by a `Cert Hash(sha1):` line; older releases space-separate the
/// hash bytes.
fn find_in_store_listing(listing: &str, fingerprint: &str) -> Option<(String, String)> {
    let mut current_subject: Option<String> = None;

    for line in listing.lines() {
        let line = line.trim();

        if let Some(value) = line.strip_prefix("Subject:") {
            current_subject = Some(subject_common_name(value.trim()));
        } else if let Some(value) = line.strip_prefix("Cert Hash(sha1):") {
            let hash = value.replace(' ', "");
            if hash.eq_ignore_ascii_case(fingerprint) {
                let subject = current_subject.take().unwrap_or_else(|| hash.clone());
                return Some((hash, subject));
            }
        }
    }

    None
}

/// Extract the CN component from a distinguished name, falling back to the
/// full name when no CN is present.
fn subject_common_name(subject: &str) -> String {
    if let Some(cn_start) = subject.find("CN=") {
        let cn = &subject[cn_start + 3..];
        let cn_end = cn.find(',').unwrap_or(cn.len());
        cn[..cn_end].trim().to_string()
    } else {
        subject.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"My "Personal"
================ Certificate 0 ================
Serial Number: 00d1b2c3
Issuer: CN=Example CA, O=Example
 NotBefore: 1/1/2024 12:00 AM
 NotAfter: 1/1/2026 12:00 AM
Subject: CN=Example Corp Code Signing, O=Example Corp
Non-root Certificate
Cert Hash(sha1): a9 09 50 2d d8 2a e4 14 33 e6 f8 38 86 b0 0d 42 77 a3 2a 7b
================ Certificate 1 ================
Serial Number: 00aabbcc
Issuer: CN=Other CA
 NotBefore: 1/1/2024 12:00 AM
 NotAfter: 1/1/2026 12:00 AM
Subject: CN=Other Cert
Non-root Certificate
Cert Hash(sha1): ffffffffffffffffffffffffffffffffffffffff
CertUtil: -store command completed successfully.
"#;

    #[test]
    fn test_find_in_store_listing() {
        let (fingerprint, subject) =
            find_in_store_listing(LISTING, "a909502dd82ae41433e6f83886b00d4277a32a7b").unwrap();

        assert_eq!(fingerprint, "a909502dd82ae41433e6f83886b00d4277a32a7b");
        assert_eq!(subject, "Example Corp Code Signing");
    }

    #[test]
    fn test_find_in_store_listing_case_insensitive() {
        let matched =
            find_in_store_listing(LISTING, "A909502DD82AE41433E6F83886B00D4277A32A7B");
        assert!(matched.is_some());
    }

    #[test]
    fn test_find_in_store_listing_no_match() {
        assert!(find_in_store_listing(LISTING, "0000000000000000000000000000000000000000").is_none());
    }

    #[test]
    fn test_find_in_store_listing_contiguous_hash() {
        let listing = "Subject: CN=Contig\nCert Hash(sha1): a909502dd82ae41433e6f83886b00d4277a32a7b\n";
        let (_, subject) =
            find_in_store_listing(listing, "a909502dd82ae41433e6f83886b00d4277a32a7b").unwrap();
        assert_eq!(subject, "Contig");
    }

    #[test]
    fn test_subject_common_name() {
        assert_eq!(
            subject_common_name("CN=Example Corp, O=Example"),
            "Example Corp"
        );
        assert_eq!(subject_common_name("O=No Common Name"), "O=No Common Name");
    }
}
