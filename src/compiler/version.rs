use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Release of a compiler family, e.g. `0.8.11` or `v0.8.11+commit.d7f03943`.
#[derive(
    Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct CompilerVersion(semver::Version);

impl CompilerVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    pub fn to_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl Display for CompilerVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CompilerVersion {
    type Err = semver::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(semver::Version::from_str(s.trim().trim_start_matches('v'))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check_parsing(ver_str: &str) -> CompilerVersion {
        CompilerVersion::from_str(ver_str).unwrap()
    }

    #[test]
    fn parse() {
        let ver = check_parsing("v0.8.11");
        assert_eq!(ver.0, semver::Version::new(0, 8, 11));
        let ver = check_parsing("0.8.11");
        assert_eq!(ver.0, semver::Version::new(0, 8, 11));
        let ver = check_parsing("0.8.11+commit.d7f03943");
        assert_eq!(ver.0.build.as_str(), "commit.d7f03943");
        check_parsing("0.0.0");
        check_parsing("0.3.0-beta.17");
    }

    #[test]
    fn parse_invalid() {
        for invalid in ["", "0.8", "latest", "0.8.x", "^0.8.0", "0.8.11.1"] {
            assert!(
                CompilerVersion::from_str(invalid).is_err(),
                "'{invalid}' should not parse"
            );
        }
    }

    #[test]
    fn display_version() {
        for (initial, expected) in [
            ("v0.2.12", "0.2.12"),
            ("0.2.12", "0.2.12"),
            ("0.8.11+commit.d7f03943", "0.8.11+commit.d7f03943"),
        ] {
            assert_eq!(check_parsing(initial).to_string(), expected);
        }
    }

    #[test]
    fn order_versions() {
        let ver = check_parsing;

        assert!(ver("0.2.12") > ver("0.2.7"));
        assert!(ver("0.3.1") > ver("0.2.12"));
        assert!(ver("0.8.11") > ver("0.6.12"));
        assert!(ver("0.3.0") > ver("0.3.0-beta.17"));
    }

    #[test]
    fn serde_uses_display_form() {
        let version: CompilerVersion = serde_json::from_str("\"v0.6.12\"").unwrap();
        assert_eq!(version, CompilerVersion::new(0, 6, 12));
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"0.6.12\"");
    }
}
