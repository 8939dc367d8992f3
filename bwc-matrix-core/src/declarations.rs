//! Extracts versions from release-constant declarations such as
//! `    public static final Version V_2_1_0 = new Version(2010099, ...);`.
//!
//! Lines that are not such a declaration are skipped, never rejected.

use crate::version::Version;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

static DECLARATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\W+public static final (LegacyES)?Version V_(\d+)_(\d+)_(\d+)(_alpha\d+|_beta\d+|_rc\d+|_ee\d+)? .*$",
    )
    .expect("declaration pattern is a valid regex")
});

/// Returns the version declared on `line`, if the line is a version constant.
pub fn parse_line(line: &str) -> Option<Version> {
    let captures = DECLARATION_PATTERN.captures(line)?;
    let component = |idx: usize| captures.get(idx)?.as_str().parse::<u32>().ok();
    Some(Version::new(component(2)?, component(3)?, component(4)?))
}

/// Collects every declared version, sorted and deduplicated.
pub fn parse_declarations<I, S>(lines: I) -> BTreeSet<Version>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut skipped = 0usize;
    let versions: BTreeSet<Version> = lines
        .into_iter()
        .filter_map(|line| {
            let parsed = parse_line(line.as_ref());
            if parsed.is_none() {
                skipped += 1;
            }
            parsed
        })
        .collect();
    debug!(
        parsed = versions.len(),
        skipped, "Parsed version declarations"
    );
    versions
}
