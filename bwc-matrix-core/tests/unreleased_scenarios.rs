use bwc_matrix_core::{BwcError, BwcProject, BwcVersions, LineagePolicy, Version};
use std::collections::BTreeSet;

fn v(s: &str) -> Version {
    s.parse().expect("valid test version")
}

fn build(versions: &[&str], current: &str) -> Result<BwcVersions, BwcError> {
    let all: BTreeSet<Version> = versions.iter().map(|s| v(s)).collect();
    BwcVersions::new(&all, v(current), LineagePolicy::default())
}

#[test]
fn classifies_unreleased_versions_table_driven() {
    struct TestCase {
        name: &'static str,
        versions: Vec<&'static str>,
        current: &'static str,
        expected: Vec<(&'static str, BwcProject, &'static str)>,
    }

    let test_cases = vec![
        TestCase {
            name: "new major with unreleased minor and bugfix",
            versions: vec!["4.0.1", "4.1.0", "5.0.0"],
            current: "5.0.0",
            expected: vec![
                ("4.0.1", BwcProject::Bugfix, "4.0"),
                ("4.1.0", BwcProject::Minor, "4.x"),
                ("5.0.0", BwcProject::Distribution, "master"),
            ],
        },
        TestCase {
            name: "new major with staged minor",
            versions: vec!["4.0.0", "4.1.0", "5.0.0"],
            current: "5.0.0",
            expected: vec![
                ("4.0.0", BwcProject::Staged, "4.0"),
                ("4.1.0", BwcProject::Minor, "4.x"),
                ("5.0.0", BwcProject::Distribution, "master"),
            ],
        },
        TestCase {
            name: "released x.0.0 with bugfix line",
            versions: vec!["4.0.0", "4.0.1", "4.1.0", "5.0.0"],
            current: "5.0.0",
            expected: vec![
                ("4.0.1", BwcProject::Bugfix, "4.0"),
                ("4.1.0", BwcProject::Minor, "4.x"),
                ("5.0.0", BwcProject::Distribution, "master"),
            ],
        },
        TestCase {
            name: "maintenance line of the previous major",
            versions: vec!["3.90.1", "4.0.0", "4.1.0"],
            current: "4.1.0",
            expected: vec![
                ("3.90.1", BwcProject::Maintenance, "3.90"),
                ("4.0.0", BwcProject::Minor, "4.0"),
                ("4.1.0", BwcProject::Distribution, "master"),
            ],
        },
        TestCase {
            name: "bootstrap release",
            versions: vec!["1.0.0"],
            current: "1.0.0",
            expected: vec![("1.0.0", BwcProject::Distribution, "master")],
        },
    ];

    for tc in test_cases {
        let bwc = build(&tc.versions, tc.current)
            .unwrap_or_else(|e| panic!("{}: construction failed: {e}", tc.name));

        let expected_versions: Vec<Version> = tc.expected.iter().map(|(s, _, _)| v(s)).collect();
        assert_eq!(bwc.unreleased(), expected_versions.as_slice(), "{}", tc.name);

        for (version, project, branch) in &tc.expected {
            let info = bwc
                .unreleased_info(&v(version))
                .unwrap_or_else(|| panic!("{}: no info for {version}", tc.name));
            assert_eq!(info.project, *project, "{}: project of {version}", tc.name);
            assert_eq!(info.branch, *branch, "{}: branch of {version}", tc.name);
        }
    }
}

fn opensearch_2_1() -> BwcVersions {
    build(
        &[
            "7.10.0", "7.10.1", "7.10.2", "7.10.3", "1.0.0", "1.0.1", "1.1.0", "1.1.1", "1.2.0",
            "1.3.0", "1.3.1", "1.3.2", "1.3.3", "2.0.0", "2.0.1", "2.1.0",
        ],
        "2.1.0",
    )
    .expect("2.1.0 matrix builds")
}

#[test]
fn opensearch_lineage_carries_legacy_seven() {
    let bwc = opensearch_2_1();

    assert_eq!(bwc.unreleased(), &[v("1.3.3"), v("2.0.1"), v("2.1.0")]);
    assert_eq!(bwc.unreleased_info(&v("1.3.3")).unwrap().project, BwcProject::Maintenance);
    assert_eq!(bwc.unreleased_info(&v("1.3.3")).unwrap().branch, "1.3");
    assert_eq!(bwc.unreleased_info(&v("2.0.1")).unwrap().project, BwcProject::Bugfix);
    assert_eq!(bwc.unreleased_info(&v("2.0.1")).unwrap().branch, "2.0");
    assert!(bwc.unreleased_info(&v("2.0.0")).is_none());

    let index = bwc.index_compatible();
    assert_eq!(index.first(), Some(&v("7.10.0")));
    assert_eq!(index.last(), Some(&v("2.0.1")));
    assert_eq!(index.len(), 15);

    // legacy 7.10 line first, then every 1.x and the released 2.x
    let wire = bwc.wire_compatible();
    assert_eq!(wire.len(), 15);
    assert_eq!(&wire[..5], &[v("7.10.0"), v("7.10.1"), v("7.10.2"), v("7.10.3"), v("1.0.0")]);
    assert_eq!(wire.last(), Some(&v("2.0.1")));

    assert_eq!(bwc.unreleased_index_compatible(), vec![v("1.3.3"), v("2.0.1")]);
    assert_eq!(bwc.unreleased_wire_compatible(), vec![v("1.3.3"), v("2.0.1")]);

    // legacy lines are never registry releases
    let released = bwc.released();
    assert_eq!(released.first(), Some(&v("1.0.0")));
    assert_eq!(released.last(), Some(&v("2.0.0")));
    assert!(!released.contains(&v("7.10.3")));
}

#[test]
fn first_major_line_has_no_predecessor() {
    let bwc = build(&["0.1.0", "0.1.1", "0.2.0"], "0.2.0").expect("0.x matrix builds");
    assert_eq!(bwc.unreleased(), &[v("0.1.1"), v("0.2.0")]);
    assert_eq!(bwc.index_compatible(), &[v("0.1.0"), v("0.1.1")]);
    assert_eq!(bwc.wire_compatible(), &[v("0.1.0"), v("0.1.1")]);
    assert_eq!(bwc.unreleased_info(&v("0.1.1")).unwrap().project, BwcProject::Bugfix);
    assert_eq!(bwc.released(), vec![v("0.1.0")]);
}

#[test]
fn legacy_versions_are_retained_but_never_released() {
    let bwc = opensearch_2_1();
    assert!(bwc.retained(&v("7.10.2")));
    assert!(!bwc.released().contains(&v("7.10.2")));
    assert!(bwc.retained(&v("2.0.0")));
    assert!(!bwc.retained(&v("6.8.0")));
}

#[test]
fn previous_unreleased_excludes_current() {
    let bwc = opensearch_2_1();
    let previous: Vec<Version> = bwc.previous_unreleased().map(|info| info.version).collect();
    assert_eq!(previous, vec![v("1.3.3"), v("2.0.1")]);
}

#[test]
fn branch_lookup_by_project_path() {
    let bwc = build(&["4.0.0", "4.1.0", "5.0.0"], "5.0.0").unwrap();
    assert_eq!(bwc.branch_for_path(v("4.1.0"), ":distribution:bwc:minor").unwrap(), "4.x");
    assert_eq!(bwc.branch_for_path(v("4.0.0"), ":distribution:bwc:minor").unwrap(), "4.0");
    assert_eq!(bwc.branch_for_path(v("5.0.0"), ":distribution").unwrap(), "master");
    assert!(matches!(
        bwc.branch_for_path(v("4.0.0"), ":distribution:bwc:nightly"),
        Err(BwcError::UnknownProjectPath(_))
    ));
}

#[test]
fn construction_errors() {
    let empty: BTreeSet<Version> = BTreeSet::new();
    assert!(matches!(
        BwcVersions::new(&empty, v("1.0.0"), LineagePolicy::default()),
        Err(BwcError::NoVersions)
    ));

    match build(&["4.0.0", "4.1.0"], "4.2.0") {
        Err(BwcError::CurrentVersionMismatch { parsed, expected }) => {
            assert_eq!(parsed, v("4.1.0"));
            assert_eq!(expected, v("4.2.0"));
        }
        other => panic!("expected mismatch, got {other:?}"),
    }

    match build(&["5.0.0", "5.1.0", "5.1.1"], "5.1.1") {
        Err(BwcError::UnexpectedMajorCount { expected, found }) => {
            assert_eq!(expected, 2);
            assert_eq!(found, vec![5]);
        }
        other => panic!("expected major count error, got {other:?}"),
    }

    // x.y.0 versions are exempt from the major count check
    assert!(build(&["4.9.0", "5.0.0", "5.1.0"], "5.1.0").is_ok());
}

#[test]
fn from_declaration_lines() {
    let source = r#"
public class Version implements Comparable<Version> {
    public static final LegacyESVersion V_7_10_2 = new LegacyESVersion(7100299, LUCENE_8_7_0);
    public static final Version V_1_0_0 = new Version(1000099, LUCENE_8_8_2);
    public static final Version V_1_1_0 = new Version(1010099, LUCENE_8_9_0);
    public static final Version CURRENT = V_1_1_0;
}
"#;
    let bwc = BwcVersions::from_lines(source.lines(), v("1.1.0"), LineagePolicy::default()).unwrap();
    assert_eq!(bwc.current(), v("1.1.0"));
    assert_eq!(bwc.unreleased(), &[v("1.0.0"), v("1.1.0")]);
    assert_eq!(bwc.unreleased_info(&v("1.0.0")).unwrap().project, BwcProject::Minor);
    assert_eq!(bwc.unreleased_info(&v("1.0.0")).unwrap().branch, "1.0");
}
