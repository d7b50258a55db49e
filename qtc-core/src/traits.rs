//! Common traits for QTC wallets.
//!
//! The derivation engine talks to the KEM and signature backend only through
//! [`CryptoProvider`], so an in-process binding and an out-of-process helper
//! are interchangeable.

use crate::error::Result;
use crate::types::{KemKeyPair, KemSelfEncapsulation, SigKeyPair};

// ═══════════════════════════════════════════════════════════════════════════════
// CRYPTO PROVIDER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Deterministic KEM and signature key generation from explicit seeds.
///
/// Implementations might use:
/// - An in-process binding (RustCrypto ML-KEM / ML-DSA)
/// - An out-of-process helper exchanging JSON over stdout
/// - A fixture returning canned keys (for tests)
///
/// Every call is a pure function of its seed: the same seed yields the same
/// bytes on every call, in every process. A failure is always an error; an
/// implementation never substitutes a default key.
pub trait CryptoProvider: Send + Sync {
    /// Short name used in error messages and logs.
    fn name(&self) -> &str;

    /// Generates a KEM key pair from `seed`.
    fn kem_keygen(&self, seed: &[u8]) -> Result<KemKeyPair>;

    /// Generates a KEM key pair from `seed` and encapsulates against its own
    /// public key, returning the pair with the resulting shared secret.
    fn kem_self_encapsulate(&self, seed: &[u8]) -> Result<KemSelfEncapsulation>;

    /// Generates a signature key pair from `seed`.
    fn sig_keygen(&self, seed: &[u8]) -> Result<SigKeyPair>;
}

impl<P: CryptoProvider + ?Sized> CryptoProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn kem_keygen(&self, seed: &[u8]) -> Result<KemKeyPair> {
        (**self).kem_keygen(seed)
    }

    fn kem_self_encapsulate(&self, seed: &[u8]) -> Result<KemSelfEncapsulation> {
        (**self).kem_self_encapsulate(seed)
    }

    fn sig_keygen(&self, seed: &[u8]) -> Result<SigKeyPair> {
        (**self).sig_keygen(seed)
    }
}

impl<P: CryptoProvider + ?Sized> CryptoProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn kem_keygen(&self, seed: &[u8]) -> Result<KemKeyPair> {
        (**self).kem_keygen(seed)
    }

    fn kem_self_encapsulate(&self, seed: &[u8]) -> Result<KemSelfEncapsulation> {
        (**self).kem_self_encapsulate(seed)
    }

    fn sig_keygen(&self, seed: &[u8]) -> Result<SigKeyPair> {
        (**self).sig_keygen(seed)
    }
}
