//! Signing request types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hash algorithm for signtool's file digest flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sha1 => write!(f, "sha1"),
            Self::Sha256 => write!(f, "sha256"),
        }
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            _ => Err(format!(
                "unknown hash algorithm '{}' (expected sha1 or sha256)",
                s
            )),
        }
    }
}

/// One batch signing request, constructed once from caller input.
///
/// Artifacts are processed strictly in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningRequest {
    /// Files to sign, in order
    pub artifact_paths: Vec<PathBuf>,

    /// Tool architecture segment (signtool discovery only)
    pub architecture: Option<String>,

    /// File digest algorithm (signtool only)
    pub hash_algorithm: Option<HashAlgorithm>,

    /// Timestamp server URL (signtool only)
    pub timestamp_url: Option<String>,
}

impl SigningRequest {
    /// Create a request for a list of artifacts with no tool options set
    pub fn new(artifact_paths: Vec<PathBuf>) -> Self {
        Self {
            artifact_paths,
            architecture: None,
            hash_algorithm: None,
            timestamp_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_algorithm_parse() {
        assert_eq!("sha1".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha1));
        assert_eq!("SHA256".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha256));
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_hash_algorithm_display() {
        assert_eq!(HashAlgorithm::Sha1.to_string(), "sha1");
        assert_eq!(HashAlgorithm::Sha256.to_string(), "sha256");
    }
}
