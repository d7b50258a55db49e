//! Seed and entropy byte strings.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{DEFAULT_SEED_SIZE, SIG_SEED_SIZE};
use crate::error::{QtcError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// SEED
// ═══════════════════════════════════════════════════════════════════════════════

/// Opaque random bytes from which a whole wallet is derived.
///
/// Created once per wallet-generation call and never mutated. The OS RNG is
/// consulted only by [`Seed::generate`].
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: Vec<u8>,
}

impl Seed {
    /// Generates a fresh [`DEFAULT_SEED_SIZE`]-byte seed from the OS RNG.
    pub fn generate() -> Self {
        Self::generate_with_len(DEFAULT_SEED_SIZE)
    }

    /// Generates a fresh seed of `len` bytes from the OS RNG.
    pub fn generate_with_len(len: usize) -> Self {
        let mut bytes = vec![0u8; len.max(1)];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Wraps caller-supplied seed bytes.
    ///
    /// # Errors
    /// Returns a length error if `bytes` is empty.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(QtcError::ZeroLength("seed"));
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Parses a hex-encoded seed.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = hex::decode(s.trim())?;
        let seed = Self::from_bytes(&bytes);
        bytes.zeroize();
        seed
    }

    /// Returns the raw seed bytes.
    ///
    /// # Security
    /// The seed recreates every key of the wallet. Do not log it.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the hex-encoded seed.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Seed length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; seeds are never empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seed({} bytes, [REDACTED])", self.bytes.len())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENTROPY
// ═══════════════════════════════════════════════════════════════════════════════

/// A fixed-length derived byte string (shared secret, master or child entropy).
///
/// Entropy is purely a function of its inputs and is never mutated once computed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy {
    bytes: Vec<u8>,
}

impl Entropy {
    /// Wraps derived bytes.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Copies derived bytes.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if no entropy is held.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Parses hex-encoded entropy.
    pub fn from_hex(s: &str) -> Result<Self> {
        Ok(Self::from_vec(hex::decode(s.trim())?))
    }

    /// The signature seed: the first 32 bytes of this entropy.
    ///
    /// # Errors
    /// Returns a length error if fewer than 32 bytes are held.
    pub fn signature_seed(&self) -> Result<[u8; SIG_SEED_SIZE]> {
        if self.bytes.len() < SIG_SEED_SIZE {
            return Err(QtcError::length(
                "entropy for signature seed",
                SIG_SEED_SIZE,
                self.bytes.len(),
            ));
        }
        let mut seed = [0u8; SIG_SEED_SIZE];
        seed.copy_from_slice(&self.bytes[..SIG_SEED_SIZE]);
        Ok(seed)
    }
}

impl AsRef<[u8]> for Entropy {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entropy({} bytes, [REDACTED])", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_generate_default_size() {
        let seed = Seed::generate();
        assert_eq!(seed.len(), DEFAULT_SEED_SIZE);
    }

    #[test]
    fn test_generated_seeds_differ() {
        assert_ne!(Seed::generate(), Seed::generate());
    }

    #[test]
    fn test_empty_seed_rejected() {
        let err = Seed::from_bytes(&[]).unwrap_err();
        assert!(matches!(err, QtcError::ZeroLength("seed")));
    }

    #[test]
    fn test_seed_hex_roundtrip() {
        let seed = Seed::from_bytes(&[0x5a; 48]).unwrap();
        let parsed = Seed::from_hex(&seed.to_hex()).unwrap();
        assert_eq!(seed, parsed);
    }

    #[test]
    fn test_seed_debug_redacted() {
        let seed = Seed::from_bytes(&[0xab; 8]).unwrap();
        let debug = format!("{:?}", seed);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("ab"));
    }

    #[test]
    fn test_signature_seed_is_prefix() {
        let bytes: Vec<u8> = (0..64).collect();
        let entropy = Entropy::from_vec(bytes.clone());
        assert_eq!(entropy.signature_seed().unwrap().as_slice(), &bytes[..32]);
    }

    #[test]
    fn test_signature_seed_too_short() {
        let entropy = Entropy::from_slice(&[1u8; 16]);
        assert!(matches!(
            entropy.signature_seed(),
            Err(QtcError::Length { expected: 32, actual: 16, .. })
        ));
    }
}
