//! Hierarchical derivation paths.
//!
//! Canonical text form: `m/<purpose>'/<account>'/<change>/<index>`.
//! The apostrophes are kept for readability only; no hardened derivation or
//! parent-public-key derivation exists in this scheme.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{DEFAULT_ACCOUNT, DEFAULT_CHANGE, DEFAULT_PURPOSE};
use crate::error::{QtcError, Result};

/// A four-level derivation path.
///
/// Equality is structural. Only the address index fans out; purpose, account
/// and change stay fixed along one chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HdPath {
    /// Purpose level (rendered hardened)
    pub purpose: u32,
    /// Account level (rendered hardened)
    pub account: u32,
    /// Change level
    pub change: u32,
    /// Address index
    pub address_index: u32,
}

impl HdPath {
    /// Creates a path from its four levels.
    pub const fn new(purpose: u32, account: u32, change: u32, address_index: u32) -> Self {
        Self {
            purpose,
            account,
            change,
            address_index,
        }
    }

    /// Default chain `m/44'/0'/0/<index>`.
    pub const fn default_chain(address_index: u32) -> Self {
        Self::new(DEFAULT_PURPOSE, DEFAULT_ACCOUNT, DEFAULT_CHANGE, address_index)
    }

    /// Returns the same chain at another address index.
    pub const fn with_index(self, address_index: u32) -> Self {
        Self {
            address_index,
            ..self
        }
    }

    /// Canonical text form used as derivation input.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Parses the canonical text form.
    ///
    /// # Errors
    /// Returns a format error for anything other than
    /// `m/<u32>'/<u32>'/<u32>/<u32>` with plain decimal digits.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split('/');

        match parts.next() {
            Some("m") => {}
            _ => return Err(QtcError::format(format!("path '{s}' must start with 'm/'"))),
        }

        let levels: Vec<&str> = parts.collect();
        if levels.len() != 4 {
            return Err(QtcError::format(format!(
                "path '{s}' must have 4 levels, found {}",
                levels.len()
            )));
        }

        let purpose = parse_level(s, levels[0], true)?;
        let account = parse_level(s, levels[1], true)?;
        let change = parse_level(s, levels[2], false)?;
        let address_index = parse_level(s, levels[3], false)?;

        Ok(Self::new(purpose, account, change, address_index))
    }
}

impl Default for HdPath {
    fn default() -> Self {
        Self::default_chain(0)
    }
}

/// Parses one level, requiring (or forbidding) the trailing apostrophe.
fn parse_level(path: &str, level: &str, hardened: bool) -> Result<u32> {
    let digits = match (hardened, level.strip_suffix('\'')) {
        (true, Some(digits)) => digits,
        (true, None) => {
            return Err(QtcError::format(format!(
                "path '{path}': level '{level}' must be marked hardened"
            )))
        }
        (false, Some(_)) => {
            return Err(QtcError::format(format!(
                "path '{path}': level '{level}' must not be marked hardened"
            )))
        }
        (false, None) => level,
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QtcError::format(format!(
            "path '{path}': level '{level}' is not a non-negative integer"
        )));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(QtcError::format(format!(
            "path '{path}': level '{level}' has leading zeros"
        )));
    }

    digits
        .parse::<u32>()
        .map_err(|_| QtcError::format(format!("path '{path}': level '{level}' exceeds 32 bits")))
}

impl fmt::Display for HdPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m/{}'/{}'/{}/{}",
            self.purpose, self.account, self.change, self.address_index
        )
    }
}

impl FromStr for HdPath {
    type Err = QtcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for HdPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for HdPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
