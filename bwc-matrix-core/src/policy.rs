//! Lineage constants that shape the matrix.
//!
//! Every threshold here is a historical artifact of one project's version
//! line. The defaults describe OpenSearch: 1.x continues legacy 7.x, and until
//! 3.0 three major lines (1, 7, 6 or 2, 1, 7) are carried instead of two.

use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineagePolicy {
    /// Branch that builds the current version.
    pub trunk_branch: String,
    /// The very first release of the project; it has nothing to be compatible with.
    pub bootstrap_version: Version,
    /// Majors that continue an older numbering: `1 => 7` orders 1.x as a successor of 7.x.
    pub major_aliases: BTreeMap<u32, u32>,
    /// Majors newer than `current - retained_majors` (after aliasing) are grouped.
    pub retained_majors: u32,
    /// Expected number of grouped majors outside the legacy window.
    pub supported_majors: usize,
    pub legacy_window: Option<LegacyWindow>,
    /// Lines published by a predecessor project; the release registry does not list them.
    pub legacy_majors: BTreeSet<u32>,
    pub transitions: Vec<LineageTransition>,
}

/// While the current major is below `until_major`, `supported_majors` lines are expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyWindow {
    pub until_major: u32,
    pub supported_majors: usize,
}

/// Extra compatibility lineages for one current major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageTransition {
    pub major: u32,
    #[serde(default)]
    pub wire_previous_major: Option<u32>,
    #[serde(default)]
    pub extra_index_majors: Vec<u32>,
    #[serde(default)]
    pub extra_wire_majors: Vec<u32>,
}

impl Default for LineagePolicy {
    fn default() -> Self {
        Self {
            trunk_branch: "master".to_string(),
            bootstrap_version: Version::new(1, 0, 0),
            major_aliases: BTreeMap::from([(1, 7)]),
            retained_majors: 2,
            supported_majors: 2,
            legacy_window: Some(LegacyWindow {
                until_major: 3,
                supported_majors: 3,
            }),
            legacy_majors: BTreeSet::from([6, 7]),
            transitions: vec![
                LineageTransition {
                    major: 1,
                    wire_previous_major: Some(6),
                    extra_index_majors: vec![6],
                    extra_wire_majors: vec![7],
                },
                LineageTransition {
                    major: 2,
                    wire_previous_major: Some(7),
                    extra_index_majors: vec![7],
                    extra_wire_majors: vec![1],
                },
            ],
        }
    }
}

impl LineagePolicy {
    /// Position of `major` in release order.
    pub fn effective_major(&self, major: u32) -> u32 {
        self.major_aliases.get(&major).copied().unwrap_or(major)
    }

    /// Sort key of the release order: legacy lines first, then numeric.
    pub fn release_order(&self, version: &Version) -> (bool, u32, u32, u32) {
        (
            !self.legacy_majors.contains(&version.major()),
            version.major(),
            version.minor(),
            version.revision(),
        )
    }

    pub fn sort_releases(&self, versions: &mut [Version]) {
        versions.sort_by_key(|v| self.release_order(v));
    }

    /// The newest version in release order.
    pub fn latest_release<'a, I>(&self, versions: I) -> Option<Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        versions.into_iter().copied().max_by_key(|v| self.release_order(v))
    }

    /// The major line `major` follows, `None` for a line with no predecessor.
    pub fn previous_major(&self, major: u32) -> Option<u32> {
        match self.major_aliases.get(&major) {
            Some(alias) => Some(*alias),
            None => major.checked_sub(1),
        }
    }

    pub fn retains(&self, major: u32, current_major: u32) -> bool {
        let floor = i64::from(self.effective_major(current_major)) - i64::from(self.retained_majors);
        i64::from(self.effective_major(major)) > floor
    }

    pub fn expected_major_count(&self, current_major: u32) -> usize {
        match &self.legacy_window {
            Some(window) if current_major < window.until_major => window.supported_majors,
            _ => self.supported_majors,
        }
    }

    pub fn transition(&self, current_major: u32) -> Option<&LineageTransition> {
        self.transitions.iter().find(|t| t.major == current_major)
    }

    pub fn wire_previous_major(&self, current_major: u32) -> Option<u32> {
        self.transition(current_major)
            .and_then(|t| t.wire_previous_major)
            .or_else(|| self.previous_major(current_major))
    }
}
