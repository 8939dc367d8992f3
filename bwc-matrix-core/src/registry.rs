use crate::contract::ReleaseRegistry;
use crate::error::RegistryError;
use crate::version::Version;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Reads released versions from a text file, one version per line.
///
/// Blank lines and lines starting with `#` are ignored.
pub struct FileReleaseRegistry {
    path: PathBuf,
}

impl FileReleaseRegistry {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReleaseRegistry for FileReleaseRegistry {
    fn released_versions(&self) -> Result<Vec<Version>, RegistryError> {
        let content = fs::read_to_string(&self.path).map_err(|source| {
            error!(error = ?source, path = %self.path.display(), "Failed to read released versions");
            RegistryError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut versions = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let version = line.parse::<Version>().map_err(|source| {
                error!(error = %source, line = idx + 1, "Invalid released version");
                RegistryError::Parse {
                    line: idx + 1,
                    source,
                }
            })?;
            versions.push(version);
        }

        info!(
            path = %self.path.display(),
            released = versions.len(),
            "Loaded authoritative released versions"
        );
        Ok(versions)
    }
}
