//! Wire protocol between [`ProcessProvider`](super::ProcessProvider) and the
//! `qtc-provider` helper.
//!
//! ```text
//! $ qtc-provider <command> <seed_hex>
//! {"kyber_public_b64":"...","kyber_private_b64":"...","shared_b64":"..."}
//! ```
//!
//! One JSON object on stdout per call. Failures exit non-zero with a message
//! on stderr.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use qtc_core::error::{QtcError, Result};
use qtc_core::types::{KemKeyPair, KemSelfEncapsulation, SigKeyPair};

/// Helper exit code: usage error or unknown command.
pub const EXIT_USAGE: i32 = 1;
/// Helper exit code: seed argument is not valid hex or is empty.
pub const EXIT_BAD_SEED: i32 = 2;
/// Helper exit code: the provider itself failed. Covers keygen and
/// encapsulation alike; the client only distinguishes success from failure.
pub const EXIT_PROVIDER: i32 = 3;

/// Commands understood by the helper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderCommand {
    /// KEM key pair from seed
    KemKeygen,
    /// KEM key pair plus self-encapsulated shared secret from seed
    KemSelfEncapsulate,
    /// Signature key pair from seed
    SigKeygen,
}

impl ProviderCommand {
    /// Every command.
    pub const ALL: [ProviderCommand; 3] = [
        ProviderCommand::KemKeygen,
        ProviderCommand::KemSelfEncapsulate,
        ProviderCommand::SigKeygen,
    ];

    /// Command-line name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderCommand::KemKeygen => "gen_kyber_from_seed",
            ProviderCommand::KemSelfEncapsulate => "kem_self_from_seed",
            ProviderCommand::SigKeygen => "gen_dilithium_from_seed",
        }
    }
}

impl fmt::Display for ProviderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderCommand {
    type Err = QtcError;

    fn from_str(s: &str) -> Result<Self> {
        ProviderCommand::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| QtcError::format(format!("unknown provider command '{s}'")))
    }
}

/// One helper response. Only the fields of the issued command are present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// KEM public key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyber_public_b64: Option<String>,
    /// KEM secret key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyber_private_b64: Option<String>,
    /// Self-encapsulated shared secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_b64: Option<String>,
    /// Signature public key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dilithium_public_b64: Option<String>,
    /// Signature secret key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dilithium_private_b64: Option<String>,
}

impl ProviderResponse {
    /// Response to [`ProviderCommand::KemKeygen`].
    pub fn kem(keypair: &KemKeyPair) -> Self {
        Self {
            kyber_public_b64: Some(BASE64.encode(keypair.public_key())),
            kyber_private_b64: Some(BASE64.encode(keypair.secret_key())),
            ..Self::default()
        }
    }

    /// Response to [`ProviderCommand::KemSelfEncapsulate`].
    pub fn kem_self(encapsulation: &KemSelfEncapsulation) -> Self {
        Self {
            shared_b64: Some(BASE64.encode(encapsulation.shared_secret.as_bytes())),
            ..Self::kem(&encapsulation.keypair)
        }
    }

    /// Response to [`ProviderCommand::SigKeygen`].
    pub fn sig(keypair: &SigKeyPair) -> Self {
        Self {
            dilithium_public_b64: Some(BASE64.encode(keypair.public_key())),
            dilithium_private_b64: Some(BASE64.encode(keypair.secret_key())),
            ..Self::default()
        }
    }

    /// Parses the last non-empty line of helper stdout.
    pub fn parse(stdout: &str) -> Result<Self> {
        let line = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .ok_or_else(|| QtcError::format("provider produced no output"))?;
        Ok(serde_json::from_str(line)?)
    }

    /// Decodes a required base64 field.
    pub fn decode_field(field: &Option<String>, name: &'static str) -> Result<Vec<u8>> {
        let text = field
            .as_deref()
            .ok_or_else(|| QtcError::format(format!("provider response is missing '{name}'")))?;
        Ok(BASE64.decode(text)?)
    }
}
