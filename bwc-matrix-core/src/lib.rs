#![doc = "bwc-matrix-core: core logic library for bwc-matrix."]

//! Parses version-constant declarations and computes the backward-compatibility
//! (BWC) testing matrix of a build: which versions are unreleased, which branch
//! and build project each unreleased version comes from, and which versions are
//! index and wire compatible with the current one.
//!
//! All I/O beyond reading an authoritative release list lives in the CLI crate.
//!
//! # Usage
//! Build a [`BwcVersions`] from declaration lines and the configured current
//! version, then query it.

pub mod branches;
pub mod bwc_versions;
pub mod compat;
pub mod contract;
pub mod declarations;
pub mod error;
pub mod lineage;
pub mod policy;
pub mod registry;
pub mod unreleased;
pub mod version;

pub use branches::BwcProject;
pub use bwc_versions::BwcVersions;
pub use contract::{ReleaseRegistry, UnreleasedVersionInfo};
pub use error::{BwcError, RegistryError};
pub use policy::LineagePolicy;
pub use registry::FileReleaseRegistry;
pub use version::{Version, VersionParseError};
