use bwc_matrix_core::{BwcVersions, LineagePolicy, Version};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// One major line: `revisions[minor]` bugfix releases for each minor.
fn major_line(major: u32) -> impl Strategy<Value = Vec<Version>> {
    proptest::collection::vec(1u32..4, 1..6).prop_map(move |revisions| {
        revisions
            .iter()
            .enumerate()
            .flat_map(|(minor, count)| (0..*count).map(move |rev| Version::new(major, minor as u32, rev)))
            .collect()
    })
}

/// Two adjacent majors outside the legacy lineage, so every set is valid.
fn version_set() -> impl Strategy<Value = BTreeSet<Version>> {
    (3u32..6)
        .prop_flat_map(|major| (major_line(major - 1), major_line(major)))
        .prop_map(|(previous, current)| previous.into_iter().chain(current).collect())
}

/// The legacy lineage: 6.x and 7.x before the 1.0.0 restart, or 7.x, 1.x and
/// 2.x once 6.x has been dropped.
fn legacy_version_set() -> impl Strategy<Value = BTreeSet<Version>> {
    prop_oneof![
        (major_line(6), major_line(7), major_line(1)).boxed(),
        (major_line(7), major_line(1), major_line(2)).boxed(),
    ]
    .prop_map(|(a, b, c)| a.into_iter().chain(b).chain(c).collect())
}

fn build(all: &BTreeSet<Version>) -> BwcVersions {
    let policy = LineagePolicy::default();
    let current = policy.latest_release(all).expect("non-empty set");
    BwcVersions::new(all, current, policy).expect("valid version set builds")
}

proptest! {
    #[test]
    fn unreleased_is_ordered_distinct_and_holds_current(all in version_set()) {
        let bwc = build(&all);
        let policy = bwc.policy();
        let unreleased = bwc.unreleased();

        prop_assert!(unreleased.contains(&bwc.current()));
        prop_assert!(unreleased
            .windows(2)
            .all(|w| policy.release_order(&w[0]) < policy.release_order(&w[1])));
        for version in unreleased {
            prop_assert!(bwc.unreleased_info(version).is_some());
        }
    }

    #[test]
    fn wire_compatible_never_holds_current(all in version_set()) {
        let bwc = build(&all);
        prop_assert!(!bwc.wire_compatible().contains(&bwc.current()));
        prop_assert!(!bwc.index_compatible().contains(&bwc.current()));
    }

    #[test]
    fn recomputation_is_identical(all in version_set()) {
        let first = build(&all);
        let second = build(&all);
        prop_assert_eq!(first.unreleased(), second.unreleased());
        prop_assert_eq!(first.index_compatible(), second.index_compatible());
        prop_assert_eq!(first.wire_compatible(), second.wire_compatible());
        let first_infos: Vec<_> = first.previous_unreleased().cloned().collect();
        let second_infos: Vec<_> = second.previous_unreleased().cloned().collect();
        prop_assert_eq!(first_infos, second_infos);
    }

    #[test]
    fn released_and_unreleased_partition_the_retained_versions(all in version_set()) {
        let bwc = build(&all);
        let released = bwc.released();
        for version in &released {
            prop_assert!(!bwc.unreleased().contains(version));
        }
        prop_assert_eq!(released.len() + bwc.unreleased().len(), all.len());
    }

    #[test]
    fn legacy_lines_precede_and_are_never_released(all in legacy_version_set()) {
        let bwc = build(&all);
        let policy = bwc.policy();
        let is_legacy = |v: &Version| policy.legacy_majors.contains(&v.major());

        prop_assert!(!is_legacy(&bwc.current()));
        prop_assert!(bwc
            .unreleased()
            .windows(2)
            .all(|w| policy.release_order(&w[0]) < policy.release_order(&w[1])));

        let released = bwc.released();
        prop_assert!(released.iter().all(|v| !is_legacy(v)));
        let own_versions = all.iter().filter(|v| !is_legacy(v)).count();
        prop_assert_eq!(released.len() + bwc.unreleased().len(), own_versions);

        let wire = bwc.wire_compatible();
        prop_assert!(wire
            .windows(2)
            .all(|w| policy.release_order(&w[0]) < policy.release_order(&w[1])));
        prop_assert!(wire.iter().any(|v| is_legacy(v)));

        let index = bwc.index_compatible();
        let distinct: BTreeSet<&Version> = index.iter().collect();
        prop_assert_eq!(distinct.len(), index.len());
        prop_assert!(all
            .iter()
            .filter(|v| v.major() == 7)
            .all(|v| index.contains(v)));
    }
}
