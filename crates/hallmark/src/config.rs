//! Configuration file loading
//!
//! Defaults for the `sign` command can live in a `hallmark.toml` found in
//! the working directory or any parent. Explicit CLI flags always win over
//! configured values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration file name searched for in parent directories
const CONFIG_FILE_NAME: &str = "hallmark.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Signing defaults
    pub signing: SigningDefaults,
}

/// Defaults applied to `hallmark sign` when the matching flag is omitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningDefaults {
    /// Hash algorithm (`sha1` or `sha256`)
    pub hash: Option<String>,

    /// Timestamp server URL
    pub timestamp_url: Option<String>,

    /// Tool architecture (e.g. `x64`)
    pub architecture: Option<String>,
}

/// Find a configuration file in the directory or its parents
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            info!(path = %config_path.display(), "found config file");
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load configuration from a file
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load configuration from a directory search, or fall back to defaults
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    match find_config(dir) {
        Some(path) => match load_config(&path) {
            Ok(config) => (config, Some(path)),
            Err(err) => {
                debug!(path = %path.display(), %err, "ignoring unreadable config");
                (Config::default(), None)
            }
        },
        None => (Config::default(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
[signing]
hash = "sha256"
timestamp_url = "http://timestamp.example.com"
"#,
        )
        .unwrap();

        let (config, path) = load_config_or_default(dir.path());
        assert!(path.is_some());
        assert_eq!(config.signing.hash.as_deref(), Some("sha256"));
        assert_eq!(
            config.signing.timestamp_url.as_deref(),
            Some("http://timestamp.example.com")
        );
        assert!(config.signing.architecture.is_none());
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let (config, path) = load_config_or_default(dir.path());
        assert!(path.is_none());
        assert!(config.signing.hash.is_none());
    }
}
