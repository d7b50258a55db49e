//! Wallet methods and the table that drives derivation.
//!
//! Each method is one row of [`MethodSpec`]. The derivation engine reads the
//! row and never branches on the method itself, so adding a method means
//! adding a row.
//!
//! | Method | Witness | Master entropy | Per-address keys |
//! |---|---|---|---|
//! | `primary` | 1 | `SHA3-512(ss)` | one key from master, address hashes signature pk |
//! | `pq-hd` | 2 | `SHAKE256(ss ‖ tag ‖ provisional pk, 64)` | one key from master, address hashes master |
//! | `hd-multi` | 2 | `SHA3-512(ss ‖ provisional pk)` | one key per index from child entropy, address hashes child |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DOMAIN_PQ_HD_MASTER, MASTER_ENTROPY_SIZE, SHA3_256_SIZE, SHA3_512_SIZE,
};
use crate::error::{QtcError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// HASH BUILDING BLOCKS
// ═══════════════════════════════════════════════════════════════════════════════

/// Hash function used by an expansion or formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashFunction {
    /// SHA3-256, 32-byte digest
    Sha3_256,
    /// SHA3-512, 64-byte digest
    Sha3_512,
    /// SHAKE256 extendable output
    Shake256,
}

impl HashFunction {
    /// Native digest size, or `None` for an XOF.
    pub const fn digest_size(self) -> Option<usize> {
        match self {
            HashFunction::Sha3_256 => Some(SHA3_256_SIZE),
            HashFunction::Sha3_512 => Some(SHA3_512_SIZE),
            HashFunction::Shake256 => None,
        }
    }
}

/// Absorb order of a domain tag relative to the secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbsorbOrder {
    /// `H(tag ‖ secret)`
    TagFirst,
    /// `H(secret ‖ tag)`
    SecretFirst,
}

/// One input of a master-entropy formula, absorbed in table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasterPart {
    /// The KEM shared secret
    SharedSecret,
    /// A literal domain tag
    Tag(&'static [u8]),
    /// The provisional signature public key
    SigPublicKey,
}

/// How master entropy is computed for a method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MasterFormula {
    /// Hash applied to the concatenated parts
    pub function: HashFunction,
    /// Output length in bytes
    pub output_len: usize,
    /// Inputs, concatenated in this order
    pub parts: &'static [MasterPart],
}

impl MasterFormula {
    /// True if the formula absorbs the provisional signature public key.
    pub fn uses_signature_key(&self) -> bool {
        self.parts.contains(&MasterPart::SigPublicKey)
    }
}

/// What an address program hashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgramSource {
    /// `SHA3-256(signature public key)[..20]`
    SignaturePublicKey,
    /// `SHA3-256(entropy of the address's node)[..20]`
    NodeEntropy,
}

// ═══════════════════════════════════════════════════════════════════════════════
// METHOD TABLE
// ═══════════════════════════════════════════════════════════════════════════════

/// One row of the method table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodSpec {
    /// The method this row describes
    pub method: WalletMethod,
    /// Witness version embedded in the address
    pub witness_version: u8,
    /// Whether a provisional signature key pair is derived from the shared secret
    pub provisional_signature: bool,
    /// Master-entropy formula
    pub master: MasterFormula,
    /// Whether each address is keyed from its own child entropy
    pub multi_address: bool,
    /// What the address program hashes
    pub program_source: ProgramSource,
}

static PRIMARY: MethodSpec = MethodSpec {
    method: WalletMethod::Primary,
    witness_version: 1,
    provisional_signature: false,
    master: MasterFormula {
        function: HashFunction::Sha3_512,
        output_len: MASTER_ENTROPY_SIZE,
        parts: &[MasterPart::SharedSecret],
    },
    multi_address: false,
    program_source: ProgramSource::SignaturePublicKey,
};

static SINGLE_PQ_HD: MethodSpec = MethodSpec {
    method: WalletMethod::SinglePqHd,
    witness_version: 2,
    provisional_signature: true,
    master: MasterFormula {
        function: HashFunction::Shake256,
        output_len: MASTER_ENTROPY_SIZE,
        parts: &[
            MasterPart::SharedSecret,
            MasterPart::Tag(DOMAIN_PQ_HD_MASTER),
            MasterPart::SigPublicKey,
        ],
    },
    multi_address: false,
    program_source: ProgramSource::NodeEntropy,
};

static HD_MULTI: MethodSpec = MethodSpec {
    method: WalletMethod::HdMulti,
    witness_version: 2,
    provisional_signature: true,
    master: MasterFormula {
        function: HashFunction::Sha3_512,
        output_len: MASTER_ENTROPY_SIZE,
        parts: &[MasterPart::SharedSecret, MasterPart::SigPublicKey],
    },
    multi_address: true,
    program_source: ProgramSource::NodeEntropy,
};

/// Wallet derivation method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletMethod {
    /// Single key straight from the KEM shared secret (witness v1)
    #[serde(rename = "primary")]
    Primary,
    /// Single key from an XOF master bound to a provisional signature key (witness v2)
    #[serde(rename = "pq-hd")]
    SinglePqHd,
    /// One key per address index under a hierarchical chain (witness v2)
    #[serde(rename = "hd-multi")]
    HdMulti,
}

impl WalletMethod {
    /// Every method, in table order.
    pub const ALL: [WalletMethod; 3] = [
        WalletMethod::Primary,
        WalletMethod::SinglePqHd,
        WalletMethod::HdMulti,
    ];

    /// The table row for this method.
    pub fn spec(self) -> &'static MethodSpec {
        match self {
            WalletMethod::Primary => &PRIMARY,
            WalletMethod::SinglePqHd => &SINGLE_PQ_HD,
            WalletMethod::HdMulti => &HD_MULTI,
        }
    }

    /// Text identifier (`primary`, `pq-hd`, `hd-multi`).
    pub fn as_str(self) -> &'static str {
        match self {
            WalletMethod::Primary => "primary",
            WalletMethod::SinglePqHd => "pq-hd",
            WalletMethod::HdMulti => "hd-multi",
        }
    }
}

impl fmt::Display for WalletMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletMethod {
    type Err = QtcError;

    fn from_str(s: &str) -> Result<Self> {
        WalletMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                QtcError::format(format!(
                    "unknown wallet method '{s}' (expected primary, pq-hd or hd-multi)"
                ))
            })
    }
}
