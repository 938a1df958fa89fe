//! Signing identity types

use serde::{Deserialize, Serialize};

/// Which credential store an identity was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOrigin {
    /// Current user's store (login keychain, CurrentUser certificate store)
    UserScope,
    /// Machine-wide store (System keychain, LocalMachine certificate store)
    MachineScope,
}

impl std::fmt::Display for StoreOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserScope => write!(f, "user"),
            Self::MachineScope => write!(f, "machine"),
        }
    }
}

/// A code-signing identity resolved from a credential store.
///
/// Immutable once resolved; every artifact in a batch is signed with the
/// same identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningIdentity {
    /// SHA-1 certificate thumbprint (40 hex characters)
    pub fingerprint: String,

    /// Certificate subject/common name, for display
    pub subject: String,

    /// Store the identity was found in
    pub store_origin: StoreOrigin,
}

impl SigningIdentity {
    /// Create a new signing identity
    pub fn new(
        fingerprint: impl Into<String>,
        subject: impl Into<String>,
        store_origin: StoreOrigin,
    ) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            subject: subject.into(),
            store_origin,
        }
    }
}

impl std::fmt::Display for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.subject, self.store_origin)
    }
}

/// Check whether a string has the shape of a certificate thumbprint:
/// exactly 40 hexadecimal characters, case-insensitive.
///
/// Callers may use this for early validation; the resolver itself accepts
/// arbitrary strings and simply never matches a malformed one.
pub fn is_fingerprint(value: &str) -> bool {
    value.len() == 40 && value.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_fingerprint() {
        assert!(is_fingerprint("a909502dd82ae41433e6f83886b00d4277a32a7b"));
        assert!(is_fingerprint("A909502DD82AE41433E6F83886B00D4277A32A7B"));

        // Wrong length
        assert!(!is_fingerprint("a909502d"));
        assert!(!is_fingerprint(""));
        // Non-hex characters
        assert!(!is_fingerprint("g909502dd82ae41433e6f83886b00d4277a32a7b"));
        // Whitespace
        assert!(!is_fingerprint("a909502dd82ae41433e6f83886b00d4277a32a7 "));
    }

    #[test]
    fn test_identity_display() {
        let identity = SigningIdentity::new(
            "a909502dd82ae41433e6f83886b00d4277a32a7b",
            "Developer ID Application: Example Corp",
            StoreOrigin::UserScope,
        );

        assert_eq!(
            identity.to_string(),
            "Developer ID Application: Example Corp [user]"
        );
    }
}
