//! Rendering of the matrix for humans (text) and for CI tooling (JSON).

use bwc_matrix_core::{BwcVersions, UnreleasedVersionInfo, Version};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct MatrixReport {
    pub current: Version,
    pub unreleased: Vec<UnreleasedVersionInfo>,
    pub released: Vec<Version>,
    pub index_compatible: Vec<Version>,
    pub wire_compatible: Vec<Version>,
    pub unreleased_index_compatible: Vec<Version>,
    pub unreleased_wire_compatible: Vec<Version>,
}

impl MatrixReport {
    pub fn new(bwc: &BwcVersions) -> Self {
        Self {
            current: bwc.current(),
            unreleased: bwc
                .unreleased()
                .iter()
                .filter_map(|v| bwc.unreleased_info(v).cloned())
                .collect(),
            released: bwc.released(),
            index_compatible: bwc.index_compatible().to_vec(),
            wire_compatible: bwc.wire_compatible().to_vec(),
            unreleased_index_compatible: bwc.unreleased_index_compatible(),
            unreleased_wire_compatible: bwc.unreleased_wire_compatible(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for MatrixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "current: {}", self.current)?;
        writeln!(f, "unreleased:")?;
        for info in &self.unreleased {
            writeln!(f, "  {} {} {}", info.version, info.branch, info.project)?;
        }
        for (label, versions) in [
            ("released", &self.released),
            ("index compatible", &self.index_compatible),
            ("wire compatible", &self.wire_compatible),
            ("unreleased index compatible", &self.unreleased_index_compatible),
            ("unreleased wire compatible", &self.unreleased_wire_compatible),
        ] {
            writeln!(f, "{label}: {}", join(versions))?;
        }
        Ok(())
    }
}

pub fn join(versions: &[Version]) -> String {
    versions
        .iter()
        .map(Version::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
