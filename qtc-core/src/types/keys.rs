//! Key types for QTC wallets.
//!
//! A [`KeyPair`] is parameterised by a capability marker so KEM and signature
//! keys share one implementation while staying distinct types:
//!
//! - [`KemKeyPair`]: ML-KEM-1024 encapsulation/decapsulation keys
//! - [`SigKeyPair`]: ML-DSA-65 verifying/signing keys

use std::marker::PhantomData;

use zeroize::Zeroize;

use crate::constants::{
    KEM_PUBLIC_KEY_SIZE, KEM_SECRET_KEY_SIZE, KEM_SHARED_SECRET_SIZE, SIG_PUBLIC_KEY_SIZE,
    SIG_SECRET_KEY_SIZE,
};
use crate::error::{QtcError, Result};
use crate::types::Entropy;

// ═══════════════════════════════════════════════════════════════════════════════
// CAPABILITIES
// ═══════════════════════════════════════════════════════════════════════════════

/// Capability of a key pair, fixing its algorithm and key lengths.
pub trait KeyCapability: Send + Sync + 'static {
    /// Algorithm identifier.
    const ALGORITHM: &'static str;
    /// Public key length in bytes.
    const PUBLIC_KEY_SIZE: usize;
    /// Secret key length in bytes.
    const SECRET_KEY_SIZE: usize;
}

/// Key-encapsulation capability (ML-KEM-1024).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kem;

/// Digital-signature capability (ML-DSA-65).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sig;

impl KeyCapability for Kem {
    const ALGORITHM: &'static str = "ML-KEM-1024";
    const PUBLIC_KEY_SIZE: usize = KEM_PUBLIC_KEY_SIZE;
    const SECRET_KEY_SIZE: usize = KEM_SECRET_KEY_SIZE;
}

impl KeyCapability for Sig {
    const ALGORITHM: &'static str = "ML-DSA-65";
    const PUBLIC_KEY_SIZE: usize = SIG_PUBLIC_KEY_SIZE;
    const SECRET_KEY_SIZE: usize = SIG_SECRET_KEY_SIZE;
}

// ═══════════════════════════════════════════════════════════════════════════════
// KEY PAIR
// ═══════════════════════════════════════════════════════════════════════════════

/// A public/secret key pair whose lengths are fixed by its capability.
///
/// The secret half is zeroized on drop and never shown by `Debug`.
pub struct KeyPair<C: KeyCapability> {
    public: Vec<u8>,
    secret: Vec<u8>,
    _capability: PhantomData<C>,
}

/// ML-KEM-1024 key pair.
pub type KemKeyPair = KeyPair<Kem>;

/// ML-DSA-65 key pair.
pub type SigKeyPair = KeyPair<Sig>;

impl<C: KeyCapability> KeyPair<C> {
    /// Creates a key pair from raw key bytes.
    ///
    /// # Errors
    /// Returns a length error if either key does not match the capability's size.
    pub fn from_bytes(public: Vec<u8>, mut secret: Vec<u8>) -> Result<Self> {
        if public.len() != C::PUBLIC_KEY_SIZE {
            secret.zeroize();
            return Err(QtcError::length(
                "public key",
                C::PUBLIC_KEY_SIZE,
                public.len(),
            ));
        }
        if secret.len() != C::SECRET_KEY_SIZE {
            let actual = secret.len();
            secret.zeroize();
            return Err(QtcError::length("secret key", C::SECRET_KEY_SIZE, actual));
        }
        Ok(Self {
            public,
            secret,
            _capability: PhantomData,
        })
    }

    /// Algorithm identifier of this key pair.
    pub fn algorithm(&self) -> &'static str {
        C::ALGORITHM
    }

    /// Returns the public key bytes.
    pub fn public_key(&self) -> &[u8] {
        &self.public
    }

    /// Returns the secret key bytes.
    ///
    /// # Security
    /// Handle the returned bytes carefully - do not log or expose them.
    pub fn secret_key(&self) -> &[u8] {
        &self.secret
    }
}

impl<C: KeyCapability> Clone for KeyPair<C> {
    fn clone(&self) -> Self {
        Self {
            public: self.public.clone(),
            secret: self.secret.clone(),
            _capability: PhantomData,
        }
    }
}

impl<C: KeyCapability> PartialEq for KeyPair<C> {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public && self.secret == other.secret
    }
}

impl<C: KeyCapability> Eq for KeyPair<C> {}

impl<C: KeyCapability> Drop for KeyPair<C> {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl<C: KeyCapability> std::fmt::Debug for KeyPair<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("algorithm", &C::ALGORITHM)
            .field(
                "public",
                &format_args!(
                    "{}...{}",
                    hex::encode(&self.public[..8]),
                    hex::encode(&self.public[self.public.len() - 8..])
                ),
            )
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SELF-ENCAPSULATION
// ═══════════════════════════════════════════════════════════════════════════════

/// A KEM key pair together with the shared secret obtained by encapsulating
/// against its own public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KemSelfEncapsulation {
    /// The freshly generated KEM key pair
    pub keypair: KemKeyPair,
    /// Shared secret bound to `keypair`
    pub shared_secret: Entropy,
}

impl KemSelfEncapsulation {
    /// Bundles a key pair with its shared secret.
    ///
    /// # Errors
    /// Returns a length error if the shared secret is not 32 bytes.
    pub fn new(keypair: KemKeyPair, shared_secret: Entropy) -> Result<Self> {
        if shared_secret.len() != KEM_SHARED_SECRET_SIZE {
            return Err(QtcError::length(
                "KEM shared secret",
                KEM_SHARED_SECRET_SIZE,
                shared_secret.len(),
            ));
        }
        Ok(Self {
            keypair,
            shared_secret,
        })
    }
}
