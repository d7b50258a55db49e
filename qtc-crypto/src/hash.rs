//! Hashing utilities with domain separation.
//!
//! Every expansion in the wallet absorbs a literal context tag next to its
//! secret:
//!
//! ```text
//! TagFirst:    output = H(tag || secret)
//! SecretFirst: output = H(secret || tag)
//! ```
//!
//! Parts are absorbed raw, without length prefixes, so the absorb order of
//! each call site is part of its contract. Swapping it changes every
//! downstream value.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake256};

use qtc_core::constants::{SHA3_256_SIZE, SHA3_512_SIZE};
use qtc_core::error::{QtcError, Result};
use qtc_core::types::{AbsorbOrder, HashFunction};

// ═══════════════════════════════════════════════════════════════════════════════
// EXPANSION RULES
// ═══════════════════════════════════════════════════════════════════════════════

/// How one call site expands a secret: which hash, and where the tag goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExpandRule {
    /// Hash or XOF to run
    pub function: HashFunction,
    /// Position of the tag relative to the secret
    pub order: AbsorbOrder,
}

impl ExpandRule {
    /// Creates a rule.
    pub const fn new(function: HashFunction, order: AbsorbOrder) -> Self {
        Self { function, order }
    }
}

/// Expands `secret` under `tag` to `output_len` bytes.
///
/// # Errors
/// - `secret` is empty or `output_len` is zero
/// - `rule.function` is a fixed-output hash and `output_len` differs from its
///   digest size
///
/// # Example
///
/// ```rust
/// use qtc_core::types::{AbsorbOrder, HashFunction};
/// use qtc_crypto::hash::{expand, ExpandRule};
///
/// let rule = ExpandRule::new(HashFunction::Shake256, AbsorbOrder::TagFirst);
/// let out = expand(rule, b"shared secret", b"QTC/example/v1", 48).unwrap();
/// assert_eq!(out.len(), 48);
/// ```
pub fn expand(rule: ExpandRule, secret: &[u8], tag: &[u8], output_len: usize) -> Result<Vec<u8>> {
    if secret.is_empty() {
        return Err(QtcError::ZeroLength("expansion secret"));
    }
    let parts: [&[u8]; 2] = match rule.order {
        AbsorbOrder::TagFirst => [tag, secret],
        AbsorbOrder::SecretFirst => [secret, tag],
    };
    expand_parts(rule.function, &parts, output_len)
}

/// Hashes the concatenation of `parts`, in order, to `output_len` bytes.
///
/// # Errors
/// Same length rules as [`expand`]; all parts empty counts as an empty secret.
pub fn expand_parts(function: HashFunction, parts: &[&[u8]], output_len: usize) -> Result<Vec<u8>> {
    if output_len == 0 {
        return Err(QtcError::ZeroLength("expansion output"));
    }
    if parts.iter().all(|p| p.is_empty()) {
        return Err(QtcError::ZeroLength("expansion secret"));
    }
    if let Some(size) = function.digest_size() {
        if output_len != size {
            return Err(QtcError::length("fixed-output digest", size, output_len));
        }
    }

    let output = match function {
        HashFunction::Sha3_256 => digest_parts::<Sha3_256>(parts),
        HashFunction::Sha3_512 => digest_parts::<Sha3_512>(parts),
        HashFunction::Shake256 => shake256_parts(parts, output_len),
    };
    Ok(output)
}

fn digest_parts<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    hasher.finalize().to_vec()
}

fn shake256_parts(parts: &[&[u8]], output_len: usize) -> Vec<u8> {
    let mut hasher = Shake256::default();
    for part in parts {
        Update::update(&mut hasher, part);
    }
    let mut reader = hasher.finalize_xof();
    let mut output = vec![0u8; output_len];
    reader.read(&mut output);
    output
}

// ═══════════════════════════════════════════════════════════════════════════════
// PLAIN DIGESTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes SHA3-256.
pub fn sha3_256(input: &[u8]) -> [u8; SHA3_256_SIZE] {
    let mut out = [0u8; SHA3_256_SIZE];
    out.copy_from_slice(&Sha3_256::digest(input));
    out
}

/// Computes SHA3-512.
pub fn sha3_512(input: &[u8]) -> [u8; SHA3_512_SIZE] {
    let mut out = [0u8; SHA3_512_SIZE];
    out.copy_from_slice(&Sha3_512::digest(input));
    out
}

/// Computes SHAKE256 over `parts` with `output_len` bytes of output.
pub fn shake256(parts: &[&[u8]], output_len: usize) -> Vec<u8> {
    shake256_parts(parts, output_len)
}
