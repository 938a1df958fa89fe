//! Sign command

use clap::Args;
use console::style;
use std::path::PathBuf;
use tracing::info;

use hallmark_signing::{is_fingerprint, HashAlgorithm, Orchestrator, SigningRequest};

use crate::cli::Cli;
use crate::config::{load_config_or_default, SigningDefaults};

/// Hash algorithm choices for the `--hash` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HashArg {
    Sha1,
    Sha256,
}

impl From<HashArg> for HashAlgorithm {
    fn from(arg: HashArg) -> Self {
        match arg {
            HashArg::Sha1 => HashAlgorithm::Sha1,
            HashArg::Sha256 => HashAlgorithm::Sha256,
        }
    }
}

/// Sign binaries and installer packages
#[derive(Debug, Args)]
pub struct SignCommand {
    /// Thumbprint of an installed code-signing certificate
    #[arg(short, long, value_name = "thumbprint")]
    pub certificate: String,

    /// Hash algorithm to use for signing
    #[arg(long, value_name = "alg", value_enum)]
    pub hash: Option<HashArg>,

    /// Timestamp server URL
    #[arg(short, long, value_name = "url")]
    pub timestamp_url: Option<String>,

    /// Architecture of the files to sign
    #[arg(short, long, value_name = "arch", required = cfg!(windows))]
    pub architecture: Option<String>,

    /// Set of files to sign
    #[arg(required = true, value_name = "files")]
    pub files: Vec<PathBuf>,
}

impl SignCommand {
    /// Execute the sign command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run(cli))
    }

    /// Build the signing request, filling flags the caller omitted from
    /// the configured defaults. Explicit flags always win.
    fn build_request(&self, defaults: &SigningDefaults) -> anyhow::Result<SigningRequest> {
        let config_hash = defaults
            .hash
            .as_deref()
            .map(str::parse::<HashAlgorithm>)
            .transpose()
            .map_err(anyhow::Error::msg)?;

        Ok(SigningRequest {
            artifact_paths: self.files.clone(),
            architecture: self
                .architecture
                .clone()
                .or_else(|| defaults.architecture.clone()),
            hash_algorithm: self.hash.map(HashAlgorithm::from).or(config_hash),
            timestamp_url: self
                .timestamp_url
                .clone()
                .or_else(|| defaults.timestamp_url.clone()),
        })
    }

    async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);

        anyhow::ensure!(
            is_fingerprint(&self.certificate),
            "'{}' is not a valid certificate thumbprint (expected 40 hex characters)",
            self.certificate
        );

        let request = self.build_request(&config.signing)?;

        info!(
            certificate = %self.certificate,
            files = ?request.artifact_paths,
            "signing requested"
        );

        let batch = Orchestrator::for_host()
            .sign(&request, &self.certificate)
            .await?;
        batch.into_result()?;

        if !cli.quiet {
            println!(
                "{} {} file(s)",
                style("✓ Signed").green().bold(),
                self.files.len()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> SignCommand {
        SignCommand {
            certificate: "aabbccddeeff00112233445566778899aabbccdd".to_string(),
            hash: None,
            timestamp_url: None,
            architecture: None,
            files: vec![PathBuf::from("a.bin")],
        }
    }

    fn defaults() -> SigningDefaults {
        SigningDefaults {
            hash: Some("sha1".to_string()),
            timestamp_url: Some("http://config.example.com".to_string()),
            architecture: Some("x86".to_string()),
        }
    }

    #[test]
    fn test_flags_win_over_config() {
        let mut cmd = command();
        cmd.hash = Some(HashArg::Sha256);
        cmd.timestamp_url = Some("http://flag.example.com".to_string());
        cmd.architecture = Some("x64".to_string());

        let request = cmd.build_request(&defaults()).unwrap();

        assert_eq!(request.hash_algorithm, Some(HashAlgorithm::Sha256));
        assert_eq!(
            request.timestamp_url.as_deref(),
            Some("http://flag.example.com")
        );
        assert_eq!(request.architecture.as_deref(), Some("x64"));
    }

    #[test]
    fn test_config_fills_omitted_flags() {
        let request = command().build_request(&defaults()).unwrap();

        assert_eq!(request.hash_algorithm, Some(HashAlgorithm::Sha1));
        assert_eq!(
            request.timestamp_url.as_deref(),
            Some("http://config.example.com")
        );
        assert_eq!(request.architecture.as_deref(), Some("x86"));
        assert_eq!(request.artifact_paths, vec![PathBuf::from("a.bin")]);
    }

    #[test]
    fn test_no_flags_no_config() {
        let request = command().build_request(&SigningDefaults::default()).unwrap();

        assert!(request.hash_algorithm.is_none());
        assert!(request.timestamp_url.is_none());
        assert!(request.architecture.is_none());
    }

    #[test]
    fn test_invalid_config_hash_is_rejected() {
        let mut defaults = defaults();
        defaults.hash = Some("md5".to_string());

        let err = command().build_request(&defaults).unwrap_err();
        assert!(err.to_string().contains("md5"));
    }
}
