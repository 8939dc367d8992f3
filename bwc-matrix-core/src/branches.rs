//! Maps unreleased versions to the build project and git branch that can
//! check them out and build them.
//!
//! | project       | version                          | branch                 |
//! |---------------|----------------------------------|------------------------|
//! | `Distribution`| current, `M+1.0.0`               | trunk                  |
//! | `Minor`       | `M.N.0`                          | `M.x` (or `M.N`)       |
//! | `Staged`      | `M.N-2.0`, feature frozen        | `M.N-2`                |
//! | `Bugfix`      | `M.N.c`, `c > 0`                 | `M.N`                  |
//! | `Maintenance` | `M-1.d.e`, `e > 0`               | `M-1.d`                |

use crate::error::BwcError;
use crate::lineage::{MajorGroups, MinorGroups};
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BwcProject {
    Distribution,
    Minor,
    Staged,
    Bugfix,
    Maintenance,
}

impl BwcProject {
    pub const ALL: [BwcProject; 5] = [
        BwcProject::Distribution,
        BwcProject::Minor,
        BwcProject::Staged,
        BwcProject::Bugfix,
        BwcProject::Maintenance,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            BwcProject::Distribution => ":distribution",
            BwcProject::Minor => ":distribution:bwc:minor",
            BwcProject::Staged => ":distribution:bwc:staged",
            BwcProject::Bugfix => ":distribution:bwc:bugfix",
            BwcProject::Maintenance => ":distribution:bwc:maintenance",
        }
    }
}

impl fmt::Display for BwcProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for BwcProject {
    type Err = BwcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BwcProject::ALL
            .into_iter()
            .find(|project| project.path() == s)
            .ok_or_else(|| {
                error!(path = s, "Unexpected build project path");
                BwcError::UnknownProjectPath(s.to_string())
            })
    }
}

impl TryFrom<String> for BwcProject {
    type Error = BwcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BwcProject> for String {
    fn from(project: BwcProject) -> Self {
        project.path().to_string()
    }
}

/// Picks the build project for an unreleased `version`.
///
/// `unreleased` must be in release order; `released_lines` is the grouping
/// from [`crate::lineage::released_lines`].
pub fn project_for(
    version: Version,
    current: Version,
    unreleased: &[Version],
    released_lines: &MinorGroups,
) -> BwcProject {
    if version == current {
        return BwcProject::Distribution;
    }

    if version.revision() == 0 {
        let new_minors: Vec<&Version> = unreleased.iter().filter(|v| v.revision() == 0).collect();
        if new_minors.len() > 2 && *new_minors[new_minors.len() - 2] != version {
            BwcProject::Staged
        } else {
            BwcProject::Minor
        }
    } else if released_lines.contains(&version) {
        BwcProject::Bugfix
    } else {
        BwcProject::Maintenance
    }
}

/// The branch on which `version` of `project` is developed.
pub fn branch_for(
    version: Version,
    project: BwcProject,
    groups: &MajorGroups,
    trunk_branch: &str,
) -> Result<String, BwcError> {
    let branch = match project {
        BwcProject::Distribution => trunk_branch.to_string(),
        BwcProject::Minor => {
            // `M.x` tracks the newest minor of a major
            let latest_in_major = groups.latest(version.major())?;
            if latest_in_major.minor() == version.minor() {
                format!("{}.x", version.major())
            } else {
                format!("{}.{}", version.major(), version.minor())
            }
        }
        BwcProject::Staged | BwcProject::Maintenance | BwcProject::Bugfix => {
            format!("{}.{}", version.major(), version.minor())
        }
    };
    Ok(branch)
}

/// Branch lookup keyed by project path, as build scripts refer to projects.
pub fn branch_for_path(
    version: Version,
    path: &str,
    groups: &MajorGroups,
    trunk_branch: &str,
) -> Result<String, BwcError> {
    let project: BwcProject = path.parse()?;
    branch_for(version, project, groups, trunk_branch)
}
