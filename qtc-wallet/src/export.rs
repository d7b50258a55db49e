//! JSON export of a wallet record.
//!
//! Every byte field is standard base64 with padding. The KEM shared secret
//! stays out of the export.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use qtc_core::error::Result;
use qtc_core::types::{Address, HdPath, WalletMethod, WalletRecord};

/// Exported address entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressExport {
    /// Derivation path (`m/44'/0'/0/i`)
    pub path: HdPath,
    /// `qtc1...` address
    pub address: Address,
    /// Signature public key
    pub sig_public_b64: String,
    /// Signature secret key
    pub sig_private_b64: String,
}

/// Transport form of a [`WalletRecord`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletExport {
    /// Method identifier (`primary`, `pq-hd`, `hd-multi`)
    pub method: WalletMethod,
    /// Witness version of every address
    pub witness_version: u8,
    /// Master entropy
    pub master_entropy_b64: String,
    /// KEM public key
    pub kem_public_b64: String,
    /// KEM secret key
    pub kem_private_b64: String,
    /// Addresses in ascending index order
    pub addresses: Vec<AddressExport>,
}

impl From<&WalletRecord> for WalletExport {
    fn from(record: &WalletRecord) -> Self {
        Self {
            method: record.method(),
            witness_version: record.witness_version(),
            master_entropy_b64: BASE64.encode(record.master_entropy().as_bytes()),
            kem_public_b64: BASE64.encode(record.kem().public_key()),
            kem_private_b64: BASE64.encode(record.kem().secret_key()),
            addresses: record
                .addresses()
                .iter()
                .map(|entry| AddressExport {
                    path: entry.path,
                    address: entry.address,
                    sig_public_b64: BASE64.encode(entry.signature.public_key()),
                    sig_private_b64: BASE64.encode(entry.signature.secret_key()),
                })
                .collect(),
        }
    }
}

impl WalletExport {
    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses an export previously written with [`to_json_pretty`](Self::to_json_pretty).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decoded master entropy.
    pub fn master_entropy(&self) -> Result<Vec<u8>> {
        Ok(BASE64.decode(&self.master_entropy_b64)?)
    }
}
