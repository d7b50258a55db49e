//! Out-of-process provider: spawns a helper binary per call.
//!
//! Each call passes its own seed on the command line, so concurrent calls
//! share no randomness state. The engine blocks until the helper exits.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use qtc_core::error::{QtcError, Result};
use qtc_core::traits::CryptoProvider;
use qtc_core::types::{Entropy, KemKeyPair, KemSelfEncapsulation, SigKeyPair};

use super::protocol::{ProviderCommand, ProviderResponse};

const PROVIDER_NAME: &str = "process";

/// Provider that runs `<helper> <command> <seed_hex>` and reads JSON from stdout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessProvider {
    helper: PathBuf,
}

impl ProcessProvider {
    /// Creates a provider that runs `helper`.
    pub fn new(helper: impl Into<PathBuf>) -> Self {
        Self {
            helper: helper.into(),
        }
    }

    /// Path of the helper binary.
    pub fn helper(&self) -> &Path {
        &self.helper
    }

    fn error(&self, message: impl Into<String>) -> QtcError {
        let err = QtcError::provider(PROVIDER_NAME, message);
        warn!(helper = %self.helper.display(), error = %err, "Provider helper failure");
        err
    }

    /// Runs one helper command and parses its response.
    fn call(&self, command: ProviderCommand, seed: &[u8]) -> Result<ProviderResponse> {
        if seed.is_empty() {
            return Err(QtcError::ZeroLength("provider seed"));
        }

        debug!(helper = %self.helper.display(), %command, "Spawning provider helper");

        let output = Command::new(&self.helper)
            .arg(command.as_str())
            .arg(hex::encode(seed))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                self.error(format!("failed to run {}: {e}", self.helper.display()))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.error(format!(
                "{command} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        ProviderResponse::parse(&stdout)
            .map_err(|e| self.error(format!("{command} returned malformed output: {e}")))
    }

    fn field(&self, field: &Option<String>, name: &'static str) -> Result<Vec<u8>> {
        ProviderResponse::decode_field(field, name).map_err(|e| self.error(e.to_string()))
    }

    fn kem_pair(&self, response: &ProviderResponse) -> Result<KemKeyPair> {
        KemKeyPair::from_bytes(
            self.field(&response.kyber_public_b64, "kyber_public_b64")?,
            self.field(&response.kyber_private_b64, "kyber_private_b64")?,
        )
        .map_err(|e| self.error(e.to_string()))
    }
}

impl CryptoProvider for ProcessProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn kem_keygen(&self, seed: &[u8]) -> Result<KemKeyPair> {
        let response = self.call(ProviderCommand::KemKeygen, seed)?;
        self.kem_pair(&response)
    }

    fn kem_self_encapsulate(&self, seed: &[u8]) -> Result<KemSelfEncapsulation> {
        let response = self.call(ProviderCommand::KemSelfEncapsulate, seed)?;
        let keypair = self.kem_pair(&response)?;
        let shared = self.field(&response.shared_b64, "shared_b64")?;
        KemSelfEncapsulation::new(keypair, Entropy::from_vec(shared))
            .map_err(|e| self.error(e.to_string()))
    }

    fn sig_keygen(&self, seed: &[u8]) -> Result<SigKeyPair> {
        let response = self.call(ProviderCommand::SigKeygen, seed)?;
        SigKeyPair::from_bytes(
            self.field(&response.dilithium_public_b64, "dilithium_public_b64")?,
            self.field(&response.dilithium_private_b64, "dilithium_private_b64")?,
        )
        .map_err(|e| self.error(e.to_string()))
    }
}
