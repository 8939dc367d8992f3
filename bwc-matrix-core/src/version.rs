//! The `Version` triple used everywhere in the matrix.
//!
//! Versions are ordered by `(major, minor, revision)` and render as `M.m.r`.
//! Textual input may carry a qualifier (`2.1.0-SNAPSHOT`, `7.10.2-rc1`) which
//! is accepted and dropped: qualifiers never take part in BWC decisions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u32,
    minor: u32,
    revision: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn on_or_after(&self, other: &Version) -> bool {
        self >= other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("invalid version format: '{0}'")]
    Format(String),

    #[error("invalid {part} component '{value}' in version '{input}'")]
    Component {
        part: &'static str,
        value: String,
        input: String,
    },
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let numeric = trimmed.split_once('-').map_or(trimmed, |(head, _)| head);
        let parts: Vec<&str> = numeric.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionParseError::Format(s.to_string()));
        }

        let component = |part: &'static str, value: &str| {
            value
                .parse::<u32>()
                .map_err(|_| VersionParseError::Component {
                    part,
                    value: value.to_string(),
                    input: s.to_string(),
                })
        };

        Ok(Version::new(
            component("major", parts[0])?,
            component("minor", parts[1])?,
            component("revision", parts[2])?,
        ))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_qualified_versions() {
        struct TestCase {
            input: &'static str,
            expected: Version,
        }

        let cases = vec![
            TestCase {
                input: "2.1.0",
                expected: Version::new(2, 1, 0),
            },
            TestCase {
                input: "2.1.0-SNAPSHOT",
                expected: Version::new(2, 1, 0),
            },
            TestCase {
                input: " 7.10.2-rc1 ",
                expected: Version::new(7, 10, 2),
            },
        ];

        for tc in cases {
            assert_eq!(tc.input.parse::<Version>().unwrap(), tc.expected, "{}", tc.input);
        }
    }

    #[test]
    fn rejects_malformed_versions() {
        assert_eq!(
            "badversion".parse::<Version>(),
            Err(VersionParseError::Format("badversion".to_string()))
        );
        assert!(matches!(
            "1.x.0".parse::<Version>(),
            Err(VersionParseError::Component { part: "minor", .. })
        ));
        assert!("1.2".parse::<Version>().is_err());
    }

    #[test]
    fn orders_numerically_not_lexically() {
        assert!(Version::new(1, 10, 0) > Version::new(1, 9, 3));
        assert!(Version::new(7, 10, 2) > Version::new(2, 0, 0));
        assert!(Version::new(2, 0, 0).on_or_after(&Version::new(1, 0, 0)));
        assert!(!Version::new(7, 10, 2).on_or_after(&Version::new(8, 0, 0)));
    }

    #[test]
    fn serializes_as_dotted_string() {
        let json = serde_json::to_string(&Version::new(3, 90, 1)).unwrap();
        assert_eq!(json, "\"3.90.1\"");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Version::new(3, 90, 1));
    }
}
