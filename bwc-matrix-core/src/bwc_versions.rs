//! The backward-compatibility matrix of one build.
//!
//! [`BwcVersions`] is built once from the declared versions and the version
//! the build is configured for. Everything is computed up front; afterwards
//! the value is a read-only lookup structure.
//!
//! # Errors
//! Construction fails on an empty version set, on a configured version that
//! differs from the highest declared one, and on a number of retained major
//! lines outside the policy window (checked only for `x.y.z` with non-zero
//! minor and revision).

use crate::branches;
use crate::compat;
use crate::contract::{ReleaseRegistry, UnreleasedVersionInfo};
use crate::declarations::parse_declarations;
use crate::error::BwcError;
use crate::lineage::{released_lines, MajorGroups, MinorGroups};
use crate::policy::LineagePolicy;
use crate::unreleased::unreleased_versions;
use crate::version::Version;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct BwcVersions {
    current: Version,
    policy: LineagePolicy,
    groups: MajorGroups,
    unreleased: Vec<Version>,
    unreleased_info: BTreeMap<Version, UnreleasedVersionInfo>,
    index_compatible: Vec<Version>,
    wire_compatible: Vec<Version>,
}

impl BwcVersions {
    /// Parses declaration lines and builds the matrix.
    pub fn from_lines<I, S>(lines: I, expected_current: Version, policy: LineagePolicy) -> Result<Self, BwcError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(&parse_declarations(lines), expected_current, policy)
    }

    pub fn new(
        all_versions: &BTreeSet<Version>,
        expected_current: Version,
        policy: LineagePolicy,
    ) -> Result<Self, BwcError> {
        let Some(current) = policy.latest_release(all_versions) else {
            error!("Could not parse any versions");
            return Err(BwcError::NoVersions);
        };

        if current != expected_current {
            error!(parsed = %current, expected = %expected_current, "Current version mismatch");
            return Err(BwcError::CurrentVersionMismatch {
                parsed: current,
                expected: expected_current,
            });
        }

        let groups = MajorGroups::retain(all_versions, current, &policy);
        check_major_count(&groups, current, &policy)?;

        let unreleased = unreleased_versions(&groups, current, &policy)?;
        // nothing is released before the bootstrap version
        let lines = if current == policy.bootstrap_version {
            MinorGroups::default()
        } else {
            released_lines(&groups, current, &policy)?
        };

        let mut unreleased_info = BTreeMap::new();
        for version in &unreleased {
            let project = branches::project_for(*version, current, &unreleased, &lines);
            let branch = branches::branch_for(*version, project, &groups, &policy.trunk_branch)?;
            debug!(%version, %branch, %project, "Classified unreleased version");
            unreleased_info.insert(
                *version,
                UnreleasedVersionInfo {
                    version: *version,
                    branch,
                    project,
                },
            );
        }

        let index_compatible = compat::index_compatible(&groups, current, &policy);
        let wire_compatible = compat::wire_compatible(&groups, current, &policy);

        info!(
            %current,
            declared = all_versions.len(),
            majors = ?groups.majors(),
            unreleased = unreleased.len(),
            index_compatible = index_compatible.len(),
            wire_compatible = wire_compatible.len(),
            "Computed BWC versions"
        );

        Ok(Self {
            current,
            policy,
            groups,
            unreleased,
            unreleased_info,
            index_compatible,
            wire_compatible,
        })
    }

    pub fn current(&self) -> Version {
        self.current
    }

    pub fn policy(&self) -> &LineagePolicy {
        &self.policy
    }

    /// Unreleased versions in release order. Always contains [`Self::current`].
    pub fn unreleased(&self) -> &[Version] {
        &self.unreleased
    }

    /// Branch and project of `version`, or `None` when it is released or unknown.
    pub fn unreleased_info(&self, version: &Version) -> Option<&UnreleasedVersionInfo> {
        self.unreleased_info.get(version)
    }

    /// Every unreleased version except the current one, in release order.
    pub fn previous_unreleased(&self) -> impl Iterator<Item = &UnreleasedVersionInfo> {
        self.unreleased
            .iter()
            .filter(move |v| **v != self.current)
            .filter_map(move |v| self.unreleased_info.get(v))
    }

    /// Branch of `version` when built by the project at `project_path`.
    pub fn branch_for_path(&self, version: Version, project_path: &str) -> Result<String, BwcError> {
        branches::branch_for_path(version, project_path, &self.groups, &self.policy.trunk_branch)
    }

    /// Whether `version` is declared on one of the retained major lines.
    pub fn retained(&self, version: &Version) -> bool {
        self.groups.contains(version)
    }

    /// Retained versions that are released, legacy lines excluded, in release order.
    pub fn released(&self) -> Vec<Version> {
        let mut released: Vec<Version> = self
            .groups
            .iter()
            .filter(|v| !self.unreleased.contains(v))
            .filter(|v| !self.policy.legacy_majors.contains(&v.major()))
            .copied()
            .collect();
        self.policy.sort_releases(&mut released);
        released
    }

    pub fn index_compatible(&self) -> &[Version] {
        &self.index_compatible
    }

    pub fn wire_compatible(&self) -> &[Version] {
        &self.wire_compatible
    }

    pub fn unreleased_index_compatible(&self) -> Vec<Version> {
        compat::retain_unreleased(&self.index_compatible, &self.unreleased)
    }

    pub fn unreleased_wire_compatible(&self) -> Vec<Version> {
        compat::retain_unreleased(&self.wire_compatible, &self.unreleased)
    }

    /// Checks local release bookkeeping against versions known to be published.
    ///
    /// Every discrepancy is reported, not just the first.
    pub fn compare_to_authoritative(&self, authoritative: &[Version]) -> Result<(), BwcError> {
        let authoritative: BTreeSet<Version> = authoritative.iter().copied().collect();

        let not_really_released: Vec<Version> = self
            .released()
            .into_iter()
            .filter(|v| !authoritative.contains(v))
            .collect();
        let incorrectly_unreleased: Vec<Version> = self
            .unreleased
            .iter()
            .filter(|v| authoritative.contains(*v))
            .copied()
            .collect();

        if not_really_released.is_empty() && incorrectly_unreleased.is_empty() {
            info!(
                released = authoritative.len(),
                "Released versions agree with the authoritative source"
            );
            return Ok(());
        }

        error!(
            not_really_released = ?not_really_released.iter().map(Version::to_string).collect::<Vec<_>>(),
            incorrectly_unreleased = ?incorrectly_unreleased.iter().map(Version::to_string).collect::<Vec<_>>(),
            "Out-of-date released versions"
        );
        Err(BwcError::OutOfDateReleasedVersions {
            not_really_released,
            incorrectly_unreleased,
        })
    }

    /// Fetches the authoritative list from `registry` and compares against it.
    pub fn check_against<R: ReleaseRegistry + ?Sized>(&self, registry: &R) -> Result<(), BwcError> {
        let released = registry.released_versions()?;
        self.compare_to_authoritative(&released)
    }
}

fn check_major_count(groups: &MajorGroups, current: Version, policy: &LineagePolicy) -> Result<(), BwcError> {
    // new minors and new bugfix lines may not have dropped the oldest major yet
    if current.minor() == 0 || current.revision() == 0 {
        return Ok(());
    }
    let expected = policy.expected_major_count(current.major());
    let found = groups.majors();
    if found.len() != expected {
        error!(%current, expected, found = ?found, "Unexpected number of major lines");
        return Err(BwcError::UnexpectedMajorCount { expected, found });
    }
    Ok(())
}
