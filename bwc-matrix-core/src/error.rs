use crate::version::{Version, VersionParseError};
use std::path::PathBuf;

/// Fatal errors raised while building or checking the BWC matrix.
#[derive(Debug, thiserror::Error)]
pub enum BwcError {
    /// The declaration lines did not yield a single version.
    #[error("could not parse any versions")]
    NoVersions,

    /// The highest declared version differs from the one the build is configured with.
    #[error(
        "parsed versions latest version does not match the one configured in build properties: \
         parsed latest version is {parsed} but the build has {expected}"
    )]
    CurrentVersionMismatch { parsed: Version, expected: Version },

    /// The number of retained major lines is outside the supported window.
    #[error("expected exactly {expected} majors in parsed versions but found: {found:?}")]
    UnexpectedMajorCount { expected: usize, found: Vec<u32> },

    /// A project path that does not name any BWC build project.
    #[error("unexpected build project path: '{0}'")]
    UnknownProjectPath(String),

    /// A major line the classification depends on has no declared versions.
    #[error("no versions declared for major {major}")]
    MissingLineage { major: u32 },

    /// Local release bookkeeping disagrees with the authoritative list.
    #[error(
        "out-of-date released versions\n\
         following versions are not really released, but the build thinks they are: {}\n\
         build considers versions unreleased, but they are released according to an authoritative source: {}",
        format_versions(.not_really_released),
        format_versions(.incorrectly_unreleased)
    )]
    OutOfDateReleasedVersions {
        not_really_released: Vec<Version>,
        incorrectly_unreleased: Vec<Version>,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors from reading an authoritative list of released versions.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read released versions from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid released version on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: VersionParseError,
    },
}

fn format_versions(versions: &[Version]) -> String {
    if versions.is_empty() {
        return "[]".to_string();
    }
    let joined: Vec<String> = versions.iter().map(Version::to_string).collect();
    format!("[{}]", joined.join(", "))
}
