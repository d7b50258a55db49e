//! Witness addresses for QTC wallets.
//!
//! Addresses use Bech32m encoding ([BIP-350]) with the fixed human-readable
//! part `qtc`. The first data value is the witness version (0..=31); the rest
//! is a 20-byte witness program repacked into 5-bit groups.
//!
//! [BIP-350]: https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki

use std::fmt;
use std::str::FromStr;

use bech32::{u5, FromBase32, ToBase32, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{ADDRESS_HRP, MAX_WITNESS_VERSION, WITNESS_PROGRAM_SIZE};
use crate::error::{QtcError, Result};

/// Maximum total length of a Bech32m string.
const MAX_ADDRESS_LEN: usize = 90;

/// Checksum length in 5-bit values.
const CHECKSUM_LEN: usize = 6;

/// Shortest string that can hold the HRP, separator, version and checksum.
const MIN_ADDRESS_LEN: usize = ADDRESS_HRP.len() + 1 + 1 + CHECKSUM_LEN;

/// A 20-byte witness program.
pub type WitnessProgram = [u8; WITNESS_PROGRAM_SIZE];

/// A decoded `qtc1...` address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    witness_version: u8,
    program: WitnessProgram,
}

impl Address {
    /// Creates an address from a witness version and program.
    ///
    /// # Errors
    /// Returns a version error if `witness_version > 31`.
    pub fn new(witness_version: u8, program: WitnessProgram) -> Result<Self> {
        if witness_version > MAX_WITNESS_VERSION {
            return Err(QtcError::Version(witness_version));
        }
        Ok(Self {
            witness_version,
            program,
        })
    }

    /// Creates an address from a program given as a slice.
    ///
    /// # Errors
    /// Returns a length error unless `program` is exactly 20 bytes.
    pub fn from_program_slice(witness_version: u8, program: &[u8]) -> Result<Self> {
        let program: WitnessProgram = program
            .try_into()
            .map_err(|_| QtcError::length("witness program", WITNESS_PROGRAM_SIZE, program.len()))?;
        Self::new(witness_version, program)
    }

    /// The witness version.
    pub fn witness_version(&self) -> u8 {
        self.witness_version
    }

    /// The 20-byte witness program.
    pub fn program(&self) -> &WitnessProgram {
        &self.program
    }

    /// The human-readable part (always `qtc`).
    pub fn hrp(&self) -> &'static str {
        ADDRESS_HRP
    }

    /// Encodes this address as a lower-case Bech32m string.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decodes a Bech32m address string.
    pub fn decode(s: &str) -> Result<Self> {
        let (_, witness_version, program) = decode(s)?;
        Ok(Self {
            witness_version,
            program,
        })
    }

    /// Witness version followed by the program in 5-bit groups.
    fn data(&self) -> std::result::Result<Vec<u5>, bech32::Error> {
        let mut data = vec![u5::try_from_u8(self.witness_version)?];
        data.extend(self.program.to_base32());
        Ok(data)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data().map_err(|_| fmt::Error)?;
        bech32::encode_to_fmt(f, ADDRESS_HRP, data, Variant::Bech32m).map_err(|_| fmt::Error)?
    }
}

impl FromStr for Address {
    type Err = QtcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::decode(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CODEC
// ═══════════════════════════════════════════════════════════════════════════════

/// Encodes a witness version and program as a `qtc1...` string.
///
/// # Errors
/// Returns a version error if `witness_version > 31`.
pub fn encode(witness_version: u8, program: &WitnessProgram) -> Result<String> {
    let address = Address::new(witness_version, *program)?;
    let data = address.data().map_err(codec_error)?;
    bech32::encode(ADDRESS_HRP, data, Variant::Bech32m).map_err(codec_error)
}

/// Decodes a `qtc1...` string into `(hrp, witness_version, program)`.
///
/// # Errors
/// - format error: mixed case, bad length, missing separator, wrong HRP,
///   characters outside the Bech32 set, or bad padding
/// - checksum error: the checksum does not verify, or is a plain Bech32 one
/// - version error: witness version above 31
/// - length error: program is not 20 bytes
pub fn decode(s: &str) -> Result<(String, u8, WitnessProgram)> {
    if s.len() < MIN_ADDRESS_LEN || s.len() > MAX_ADDRESS_LEN {
        return Err(QtcError::format(format!(
            "address length {} outside {MIN_ADDRESS_LEN}..={MAX_ADDRESS_LEN}",
            s.len()
        )));
    }

    // HRP first, so a foreign address is a format error rather than a checksum one
    if let Some(sep) = s.rfind('1') {
        let hrp = &s[..sep];
        if !hrp.eq_ignore_ascii_case(ADDRESS_HRP) {
            return Err(QtcError::format(format!(
                "unexpected human-readable part '{hrp}', expected '{ADDRESS_HRP}'"
            )));
        }
    }

    let (hrp, data, variant) = bech32::decode(s).map_err(codec_error)?;
    if variant != Variant::Bech32m {
        return Err(QtcError::Checksum);
    }

    let (version, program) = data
        .split_first()
        .ok_or_else(|| QtcError::format("address carries no witness version"))?;

    let witness_version = version.to_u8();
    if witness_version > MAX_WITNESS_VERSION {
        return Err(QtcError::Version(witness_version));
    }

    let program_bytes = Vec::<u8>::from_base32(program).map_err(codec_error)?;
    let program: WitnessProgram = program_bytes.as_slice().try_into().map_err(|_| {
        QtcError::length("witness program", WITNESS_PROGRAM_SIZE, program_bytes.len())
    })?;

    Ok((hrp, witness_version, program))
}

fn codec_error(err: bech32::Error) -> QtcError {
    match err {
        bech32::Error::InvalidChecksum => QtcError::Checksum,
        bech32::Error::InvalidPadding => QtcError::format("invalid padding in witness program"),
        other => QtcError::format(format!("malformed address: {other}")),
    }
}
