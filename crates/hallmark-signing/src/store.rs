//! Credential store trait and ordered identity resolution

use crate::error::{Result, SigningError};
use crate::identity::{SigningIdentity, StoreOrigin};
use tracing::{debug, info};

/// A searchable store of code-signing certificates.
///
/// Implementations open the underlying store read-only for the duration of
/// a single `find_by_fingerprint` call and release it before returning.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Scope of this store
    fn origin(&self) -> StoreOrigin;

    /// Search the store for a certificate with the given thumbprint.
    ///
    /// Matching is exact and case-insensitive on the 40-hex-character
    /// thumbprint. A malformed query is not an error; it simply never
    /// matches.
    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<SigningIdentity>>;
}

/// Resolves a signing identity by searching an ordered list of credential
/// stores, user scope before machine scope.
pub struct IdentityResolver {
    stores: Vec<Box<dyn CredentialStore>>,
}

impl IdentityResolver {
    /// Create a resolver over an explicit, ordered store list
    pub fn new(stores: Vec<Box<dyn CredentialStore>>) -> Self {
        Self { stores }
    }

    /// Create a resolver over the current host's stores
    pub fn for_host() -> Self {
        Self::new(crate::stores::host_stores())
    }

    /// Resolve a certificate thumbprint to a signing identity.
    ///
    /// Stores are searched in priority order and the first match wins;
    /// matches are never aggregated across stores.
    pub async fn resolve(&self, fingerprint: &str) -> Result<SigningIdentity> {
        for store in &self.stores {
            debug!(origin = %store.origin(), "searching credential store");

            if let Some(identity) = store.find_by_fingerprint(fingerprint).await? {
                info!(
                    subject = %identity.subject,
                    origin = %identity.store_origin,
                    "resolved signing identity"
                );
                return Ok(identity);
            }
        }

        Err(SigningError::CertificateNotFound {
            fingerprint: fingerprint.to_string(),
        })
    }
}
