use std::fmt;
use std::str::FromStr;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use snafu::{Snafu, ensure};

/// Address allowed to perform privileged module operations
///
/// Typically the governance module account.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Encode, Decode, Serialize)]
#[serde(transparent)]
pub struct Authority(String);

pub const DEFAULT_AUTHORITY: &str = "gov";

#[derive(Debug, Snafu)]
pub enum AuthorityParseError {
    #[snafu(display("Authority address can't be empty"))]
    Empty,
    #[snafu(display("Authority address can't be blank"))]
    Blank,
}

impl Authority {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Authority {
    fn default() -> Self {
        Self(DEFAULT_AUTHORITY.to_owned())
    }
}

impl FromStr for Authority {
    type Err = AuthorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ensure!(!s.is_empty(), EmptySnafu);
        ensure!(!s.trim().is_empty(), BlankSnafu);
        Ok(Self(s.to_owned()))
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Authority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_invalid() {
        assert!(matches!(
            Authority::from_str(""),
            Err(AuthorityParseError::Empty)
        ));
        assert!(matches!(
            Authority::from_str(" \t "),
            Err(AuthorityParseError::Blank)
        ));
        assert_eq!(Authority::from_str("g ov").expect("valid").as_str(), "g ov");
        assert_eq!(
            Authority::from_str("gov").expect("valid").to_string(),
            "gov"
        );
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<Authority>("\"\"").is_err());
        let a: Authority = serde_json::from_str("\"cosmos1xyz\"").expect("valid");
        assert_eq!(a.as_str(), "cosmos1xyz");
    }
}
