//! Works out which declared versions are still in development.
//!
//! A new version number is added to every branch as soon as its predecessor
//! ships, so the leaves of the version tree are the unreleased versions:
//!
//! - the current version (trunk);
//! - the tip of the previous major (if the line has one), and the tip of the
//!   minor before it when that tip is an unreleased `x.y.0`;
//! - the latest bugfix of the newest minor line;
//! - when that minor is itself a new `x.y.0`, the tip of the minor below it,
//!   and one more minor down if that one is staged (a singleton too).

use crate::error::BwcError;
use crate::lineage::{released_lines, MajorGroups};
use crate::policy::LineagePolicy;
use crate::version::Version;
use tracing::{debug, error};

/// Returns the unreleased versions, distinct and in release order.
pub fn unreleased_versions(
    groups: &MajorGroups,
    current: Version,
    policy: &LineagePolicy,
) -> Result<Vec<Version>, BwcError> {
    let mut unreleased = vec![current];

    if current == policy.bootstrap_version {
        debug!(%current, "Bootstrap version has no unreleased predecessors");
        return Ok(unreleased);
    }

    let follows_bootstrap = current.major() != policy.bootstrap_version.major();
    if let Some(previous_major) = policy
        .previous_major(current.major())
        .filter(|_| follows_bootstrap)
    {
        let tip = groups.latest(previous_major).inspect_err(|e| {
            error!(error = %e, %current, previous_major, "Previous major line is missing");
        })?;
        unreleased.push(tip);
        if tip.revision() == 0 {
            if let Some(before) = tip
                .minor()
                .checked_sub(1)
                .and_then(|minor| groups.latest_in_minor(tip.major(), minor))
            {
                unreleased.push(before);
            }
        }
    }

    let lines = released_lines(groups, current, policy)?;
    if let Some(greatest) = lines.greatest_minor() {
        if let Some(latest) = lines.latest(greatest) {
            unreleased.push(latest);
        }

        if lines.line(greatest).len() == 1 {
            // the newest minor is unreleased, so its predecessor's bugfix line is too
            let below = greatest.checked_sub(1);
            if let Some(latest) = below.and_then(|minor| lines.latest(minor)) {
                unreleased.push(latest);
            }
            let staged = below.is_some_and(|minor| lines.line(minor).len() == 1);
            if staged && greatest >= 2 {
                if let Some(latest) = lines.latest(greatest - 2) {
                    unreleased.push(latest);
                }
            }
        }
    }

    policy.sort_releases(&mut unreleased);
    unreleased.dedup();
    debug!(
        %current,
        unreleased = ?unreleased.iter().map(Version::to_string).collect::<Vec<_>>(),
        "Computed unreleased versions"
    );
    Ok(unreleased)
}
