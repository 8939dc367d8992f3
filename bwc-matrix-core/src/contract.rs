//! # contract: what the matrix hands out and what it consumes
//!
//! - [`UnreleasedVersionInfo`] is the per-version record build orchestration
//!   uses to check out and build an unreleased version from source.
//! - [`ReleaseRegistry`] is the seam to an authoritative list of published
//!   versions (an artifact repository listing, a checked-in file, a mock).
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`; `MockReleaseRegistry` is exported
//!   under the default `test-export-mocks` feature for downstream tests.

use crate::branches::BwcProject;
use crate::error::RegistryError;
use crate::version::Version;
use serde::Serialize;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Where an unreleased version is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreleasedVersionInfo {
    pub version: Version,
    /// Git branch carrying the version.
    pub branch: String,
    /// Build project able to check out and build the branch.
    pub project: BwcProject,
}

/// Source of versions known to be published.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait ReleaseRegistry {
    /// Every released version the registry knows about, in any order.
    fn released_versions(&self) -> Result<Vec<Version>, RegistryError>;
}
