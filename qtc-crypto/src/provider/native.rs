//! In-process provider backed by RustCrypto ML-KEM-1024 and ML-DSA-65.
//!
//! The caller's seed is never fed to an algorithm directly. Each operation
//! first expands it under its own tag:
//!
//! ```text
//! material = SHAKE256("qtc_provider" || op || seed, len)
//!
//! kyber_keygen     len 64: d || z
//! kyber_kem_self   len 96: d || z || m
//! dilithium_keygen len 32: xi
//! ```

use ml_dsa::{KeyGen, MlDsa65};
use ml_kem::kem::Decapsulate;
use ml_kem::{EncapsulateDeterministic, EncodedSizeUser, KemCore, MlKem1024};
use subtle::ConstantTimeEq;
use tracing::warn;
use zeroize::Zeroize;

use qtc_core::constants::{
    PROVIDER_DOMAIN_PREFIX, PROVIDER_OP_KEM_KEYGEN, PROVIDER_OP_KEM_SELF, PROVIDER_OP_SIG_KEYGEN,
};
use qtc_core::error::{QtcError, Result};
use qtc_core::traits::CryptoProvider;
use qtc_core::types::{
    AbsorbOrder, Entropy, HashFunction, KemKeyPair, KemSelfEncapsulation, SigKeyPair,
};

use crate::hash::{expand, ExpandRule};

const PROVIDER_NAME: &str = "native";

const PROVIDER_RULE: ExpandRule = ExpandRule::new(HashFunction::Shake256, AbsorbOrder::TagFirst);

/// In-process ML-KEM-1024 / ML-DSA-65 provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeProvider;

impl NativeProvider {
    /// Creates the provider.
    pub fn new() -> Self {
        Self
    }

    /// Expands `seed` under `"qtc_provider" || op`.
    fn material(op: &[u8], seed: &[u8], len: usize) -> Result<Vec<u8>> {
        let mut tag = Vec::with_capacity(PROVIDER_DOMAIN_PREFIX.len() + op.len());
        tag.extend_from_slice(PROVIDER_DOMAIN_PREFIX);
        tag.extend_from_slice(op);
        expand(PROVIDER_RULE, seed, &tag, len)
    }

    fn error(message: impl Into<String>) -> QtcError {
        let err = QtcError::provider(PROVIDER_NAME, message);
        warn!(error = %err, "Native provider failure");
        err
    }
}

fn b32(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes[..32]);
    out
}

impl CryptoProvider for NativeProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn kem_keygen(&self, seed: &[u8]) -> Result<KemKeyPair> {
        let mut material = Self::material(PROVIDER_OP_KEM_KEYGEN, seed, 64)?;
        let mut d = b32(&material[..32]);
        let mut z = b32(&material[32..64]);
        material.zeroize();

        let (dk, ek) =
            MlKem1024::generate_deterministic(&ml_kem::B32::from(d), &ml_kem::B32::from(z));
        d.zeroize();
        z.zeroize();

        KemKeyPair::from_bytes(ek.as_bytes().to_vec(), dk.as_bytes().to_vec())
            .map_err(|e| Self::error(e.to_string()))
    }

    fn kem_self_encapsulate(&self, seed: &[u8]) -> Result<KemSelfEncapsulation> {
        let mut material = Self::material(PROVIDER_OP_KEM_SELF, seed, 96)?;
        let mut d = b32(&material[..32]);
        let mut z = b32(&material[32..64]);
        let mut m = b32(&material[64..96]);
        material.zeroize();

        let (dk, ek) =
            MlKem1024::generate_deterministic(&ml_kem::B32::from(d), &ml_kem::B32::from(z));
        let encapsulated = ek.encapsulate_deterministic(&ml_kem::B32::from(m));
        d.zeroize();
        z.zeroize();
        m.zeroize();

        let (ciphertext, shared) =
            encapsulated.map_err(|_| Self::error("ML-KEM-1024 encapsulation failed"))?;
        let recovered = dk
            .decapsulate(&ciphertext)
            .map_err(|_| Self::error("ML-KEM-1024 decapsulation failed"))?;

        if !bool::from(shared.as_slice().ct_eq(recovered.as_slice())) {
            return Err(Self::error("self-encapsulation shared secrets disagree"));
        }

        let keypair = KemKeyPair::from_bytes(ek.as_bytes().to_vec(), dk.as_bytes().to_vec())
            .map_err(|e| Self::error(e.to_string()))?;
        KemSelfEncapsulation::new(keypair, Entropy::from_slice(shared.as_slice()))
    }

    fn sig_keygen(&self, seed: &[u8]) -> Result<SigKeyPair> {
        let mut material = Self::material(PROVIDER_OP_SIG_KEYGEN, seed, 32)?;
        let mut xi = b32(&material);
        material.zeroize();

        let keypair = MlDsa65::key_gen_internal(&ml_dsa::B32::from(xi));
        xi.zeroize();

        let public = keypair.verifying_key().encode().to_vec();
        let secret = keypair.signing_key().encode().to_vec();
        SigKeyPair::from_bytes(public, secret).map_err(|e| Self::error(e.to_string()))
    }
}
