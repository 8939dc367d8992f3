use crate::error::BwcError;
use crate::policy::LineagePolicy;
use crate::version::Version;
use std::collections::{BTreeMap, BTreeSet};

/// Declared versions of the retained major lines, each line sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorGroups {
    groups: BTreeMap<u32, Vec<Version>>,
}

impl MajorGroups {
    /// Groups `all` by major, dropping lines outside the policy's retention window.
    pub fn retain(all: &BTreeSet<Version>, current: Version, policy: &LineagePolicy) -> Self {
        let mut groups: BTreeMap<u32, Vec<Version>> = BTreeMap::new();
        for version in all
            .iter()
            .filter(|v| policy.retains(v.major(), current.major()))
        {
            groups.entry(version.major()).or_default().push(*version);
        }
        Self { groups }
    }

    pub fn majors(&self) -> Vec<u32> {
        self.groups.keys().copied().collect()
    }

    /// Versions of `major`, empty when the line is not declared.
    pub fn line(&self, major: u32) -> &[Version] {
        self.groups.get(&major).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn latest(&self, major: u32) -> Result<Version, BwcError> {
        self.line(major)
            .last()
            .copied()
            .ok_or(BwcError::MissingLineage { major })
    }

    pub fn latest_in_minor(&self, major: u32, minor: u32) -> Option<Version> {
        self.line(major)
            .iter()
            .filter(|v| v.minor() == minor)
            .max()
            .copied()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.line(version.major()).binary_search(version).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Version> {
        self.groups.values().flatten()
    }
}

/// One major line grouped by minor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MinorGroups {
    groups: BTreeMap<u32, Vec<Version>>,
}

impl MinorGroups {
    pub fn of(line: &[Version]) -> Self {
        let mut groups: BTreeMap<u32, Vec<Version>> = BTreeMap::new();
        for version in line {
            groups.entry(version.minor()).or_default().push(*version);
        }
        Self { groups }
    }

    pub fn greatest_minor(&self) -> Option<u32> {
        self.groups.keys().next_back().copied()
    }

    pub fn line(&self, minor: u32) -> &[Version] {
        self.groups.get(&minor).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn latest(&self, minor: u32) -> Option<Version> {
        self.line(minor).iter().max().copied()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.line(version.minor()).contains(version)
    }
}

/// The lines in which the current major's released minors are tracked.
///
/// An unreleased `x.0.0` is alone in its major, so its predecessor major is
/// grouped instead. A first line with no predecessor has no released lines.
pub fn released_lines(
    groups: &MajorGroups,
    current: Version,
    policy: &LineagePolicy,
) -> Result<MinorGroups, BwcError> {
    let current_line = groups.line(current.major());
    if current_line.len() == 1 {
        let Some(previous) = policy.previous_major(current.major()) else {
            return Ok(MinorGroups::default());
        };
        let previous_line = groups.line(previous);
        if previous_line.is_empty() {
            return Err(BwcError::MissingLineage { major: previous });
        }
        Ok(MinorGroups::of(previous_line))
    } else {
        Ok(MinorGroups::of(current_line))
    }
}
