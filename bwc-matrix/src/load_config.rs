/// `load_config` module: loads the static YAML config and resolves everything the
/// matrix needs from disk and the environment.
///
/// This module is the only place where user-supplied files are read and mapped
/// onto the strongly-typed inputs of `bwc-matrix-core`.
///
/// # Responsibilities
/// - Parse the YAML config into type-safe Rust structs
/// - Resolve relative paths against the directory holding the config file
/// - Pick the expected current version: `BWC_CURRENT_VERSION` env var, then
///   `versions.current`, then the `versions.properties` file
/// - Read the declarations file and build the [`BwcVersions`] matrix
///
/// # Errors
/// All errors in this module use `anyhow::Error` for context-rich diagnostics,
/// and are surfaced at the CLI boundary.
use anyhow::{Context, Result};
use bwc_matrix_core::{BwcVersions, LineagePolicy, Version};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const CURRENT_VERSION_ENV: &str = "BWC_CURRENT_VERSION";

#[derive(Debug, Deserialize)]
pub struct CliConfig {
    pub versions: VersionsSection,
    #[serde(default)]
    pub authoritative: AuthoritativeSection,
    #[serde(default)]
    pub policy: LineagePolicy,
}

#[derive(Debug, Deserialize)]
pub struct VersionsSection {
    /// Source file holding the version constant declarations.
    pub declarations: PathBuf,
    #[serde(default)]
    pub current: Option<Version>,
    /// Java-style properties file carrying the build's version.
    #[serde(default)]
    pub properties: Option<PathBuf>,
    #[serde(default = "default_properties_key")]
    pub properties_key: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthoritativeSection {
    /// One released version per line.
    #[serde(default)]
    pub released: Option<PathBuf>,
}

fn default_properties_key() -> String {
    "opensearch".to_string()
}

/// Loads a static YAML config file and resolves its paths.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let mut config: CliConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let base = path_ref.parent().unwrap_or_else(|| Path::new("."));
    config.versions.declarations = base.join(&config.versions.declarations);
    config.versions.properties = config.versions.properties.map(|p| base.join(p));
    config.authoritative.released = config.authoritative.released.map(|p| base.join(p));

    info!(
        declarations = %config.versions.declarations.display(),
        trunk_branch = %config.policy.trunk_branch,
        "Config loaded"
    );
    Ok(config)
}

/// Picks the version the build is configured for.
pub fn resolve_current_version(versions: &VersionsSection) -> Result<Version> {
    if let Ok(raw) = std::env::var(CURRENT_VERSION_ENV) {
        let version = raw
            .parse::<Version>()
            .with_context(|| format!("{CURRENT_VERSION_ENV} must be a version, got '{raw}'"))?;
        info!(%version, "Current version taken from environment");
        return Ok(version);
    }

    if let Some(version) = versions.current {
        info!(%version, "Current version taken from config");
        return Ok(version);
    }

    if let Some(properties) = &versions.properties {
        let raw = read_property(properties, &versions.properties_key)?.with_context(|| {
            format!(
                "property '{}' not found in {}",
                versions.properties_key,
                properties.display()
            )
        })?;
        let version = raw
            .parse::<Version>()
            .with_context(|| format!("invalid version '{raw}' in {}", properties.display()))?;
        info!(%version, properties = %properties.display(), "Current version taken from properties");
        return Ok(version);
    }

    error!("No current version configured");
    anyhow::bail!(
        "no current version: set {CURRENT_VERSION_ENV}, versions.current or versions.properties"
    )
}

/// Looks up `key` in a Java-style properties file (`key = value`, `key: value`).
pub fn read_property(path: &Path, key: &str) -> Result<Option<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read properties file {}", path.display()))?;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        if let Some((name, value)) = line.split_once(['=', ':']) {
            if name.trim() == key {
                return Ok(Some(value.trim().to_string()));
            }
        }
    }
    Ok(None)
}

/// Reads the declarations and builds the matrix described by `config`.
pub fn load_bwc_versions(config: &CliConfig) -> Result<BwcVersions> {
    let current = resolve_current_version(&config.versions)?;
    let declarations = &config.versions.declarations;
    let source = fs::read_to_string(declarations)
        .with_context(|| format!("Failed to read declarations {}", declarations.display()))?;

    let bwc = BwcVersions::from_lines(source.lines(), current, config.policy.clone())
        .with_context(|| format!("Invalid version declarations in {}", declarations.display()))?;
    Ok(bwc)
}
