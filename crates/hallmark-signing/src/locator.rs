//! Windows SDK signtool.exe discovery
//!
//! The Windows SDK installs versioned toolchains side by side under
//! `<root>/bin/<version>/<arch>/`. Discovery reads the installation root
//! from the registry, then scans the version directories newest-first for
//! the requested architecture's signtool.exe. Version parsing and ordering
//! are separated from the filesystem probe so the selection rule can be
//! tested against synthetic directory trees.

use crate::error::{Result, SigningError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Executable filename probed for under each version/arch directory
pub const SIGNTOOL_EXE: &str = "signtool.exe";

/// A dotted numeric version such as `10.0.19041.0`.
///
/// Ordering is numeric per component, so `10.0.22000.0` sorts above
/// `9.1` even though it sorts below lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SdkVersion(Vec<u32>);

impl std::str::FromStr for SdkVersion {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.split('.')
            .map(str::parse)
            .collect::<std::result::Result<Vec<u32>, _>>()
            .map(SdkVersion)
    }
}

impl std::fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// A located signing tool
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Absolute path to the executable
    pub path: PathBuf,

    /// SDK version the tool was found under; `None` for fixed-path tools
    pub version: Option<SdkVersion>,
}

/// Locate signtool.exe under an explicit SDK installation root.
///
/// Scans `<root>/bin` for directories whose names parse as versions,
/// discarding the rest, and probes them newest-first for
/// `<version>/<architecture>/signtool.exe`. The first candidate that
/// exists wins.
pub fn locate_in_root(root: &Path, architecture: &str) -> Result<ToolDescriptor> {
    let bin_dir = root.join("bin");

    let mut versions: Vec<(SdkVersion, PathBuf)> = match std::fs::read_dir(&bin_dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let version = name.to_str()?.parse::<SdkVersion>().ok()?;
                Some((version, entry.path()))
            })
            .collect(),
        Err(_) => {
            return Err(SigningError::ToolNotFound {
                architecture: architecture.to_string(),
            })
        }
    };

    // Newest SDK first
    versions.sort_by(|a, b| b.0.cmp(&a.0));

    for (version, dir) in versions {
        let candidate = dir.join(architecture).join(SIGNTOOL_EXE);
        debug!(candidate = %candidate.display(), "probing for signtool.exe");

        if candidate.is_file() {
            return Ok(ToolDescriptor {
                path: candidate,
                version: Some(version),
            });
        }
    }

    Err(SigningError::ToolNotFound {
        architecture: architecture.to_string(),
    })
}

/// Locate signtool.exe from the Windows SDK registered on this host.
///
/// The installation root comes from the SDK registry key (the WOW6432Node
/// variant on 64-bit hosts). An unset or unreadable root is reported as
/// the tool not being found rather than a distinct configuration error.
#[cfg(target_os = "windows")]
pub fn locate(architecture: &str) -> Result<ToolDescriptor> {
    match find_winsdk::SdkInfo::find(find_winsdk::SdkVersion::Any) {
        Ok(Some(sdk)) => {
            let root = sdk.installation_folder().to_path_buf();
            locate_in_root(&root, architecture)
        }
        Ok(None) | Err(_) => Err(SigningError::ToolNotFound {
            architecture: architecture.to_string(),
        }),
    }
}

/// SDK discovery is only meaningful on Windows
#[cfg(not(target_os = "windows"))]
pub fn locate(architecture: &str) -> Result<ToolDescriptor> {
    Err(SigningError::ToolNotFound {
        architecture: architecture.to_string(),
    })
}
