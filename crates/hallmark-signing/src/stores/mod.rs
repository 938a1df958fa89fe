//! Concrete credential store implementations
//!
//! Both stores shell out to the platform's certificate tooling and parse
//! its output; the parsers are pure functions compiled everywhere so the
//! matching rules stay testable off-platform. Only `host_stores` is
//! platform-conditional.

pub mod certutil;
pub mod keychain;

use crate::store::CredentialStore;

/// The ordered credential store list for the current host, user scope
/// first. Empty on platforms without a supported store.
pub fn host_stores() -> Vec<Box<dyn CredentialStore>> {
    #[cfg(target_os = "macos")]
    {
        vec![
            Box::new(keychain::KeychainStore::login()),
            Box::new(keychain::KeychainStore::system()),
        ]
    }

    #[cfg(target_os = "windows")]
    {
        vec![
            Box::new(certutil::CertutilStore::user()),
            Box::new(certutil::CertutilStore::machine()),
        ]
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Vec::new()
    }
}
