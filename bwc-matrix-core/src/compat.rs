//! Index and wire compatibility lists for the current version.
//!
//! Lines absent from the declarations contribute nothing.

use crate::lineage::MajorGroups;
use crate::policy::LineagePolicy;
use crate::version::Version;

/// Versions whose on-disk format the current version reads: the previous and
/// current major, preceded by any extra lineages of the current transition.
pub fn index_compatible(groups: &MajorGroups, current: Version, policy: &LineagePolicy) -> Vec<Version> {
    let major = current.major();
    let extra = policy
        .transition(major)
        .map(|t| t.extra_index_majors.as_slice())
        .unwrap_or(&[]);

    let mut majors: Vec<u32> = Vec::new();
    for m in extra.iter().copied().chain(policy.previous_major(major)).chain([major]) {
        if !majors.contains(&m) {
            majors.push(m);
        }
    }

    majors
        .into_iter()
        .flat_map(|m| groups.line(m))
        .filter(|v| **v != current)
        .copied()
        .collect()
}

/// Versions the current version talks to over the wire: the newest minor line
/// of the wire-previous major, extra transition lineages and the current
/// major, without current itself, in release order.
pub fn wire_compatible(groups: &MajorGroups, current: Version, policy: &LineagePolicy) -> Vec<Version> {
    let major = current.major();
    let previous_line = policy
        .wire_previous_major(major)
        .map(|m| groups.line(m))
        .unwrap_or_default();

    let mut wire: Vec<Version> = match previous_line.last() {
        Some(tip) => previous_line
            .iter()
            .filter(|v| v.minor() == tip.minor())
            .copied()
            .collect(),
        None => Vec::new(),
    };

    if let Some(transition) = policy.transition(major) {
        for extra in &transition.extra_wire_majors {
            wire.extend_from_slice(groups.line(*extra));
        }
    }

    wire.extend_from_slice(groups.line(major));
    wire.retain(|v| *v != current);
    policy.sort_releases(&mut wire);
    wire.dedup();
    wire
}

/// `versions` filtered to the unreleased ones, order preserved.
pub fn retain_unreleased(versions: &[Version], unreleased: &[Version]) -> Vec<Version> {
    versions
        .iter()
        .filter(|v| unreleased.contains(v))
        .copied()
        .collect()
}
