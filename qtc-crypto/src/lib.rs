//! # QTC Cryptography
//!
//! Deterministic derivation primitives for the QTC post-quantum wallet.
//!
//! This crate provides:
//!
//! - **Hash**: SHA3 / SHAKE256 expansion with per-call-site absorb order
//! - **Derivation**: master entropy per method row, hierarchical child entropy,
//!   signature seeds and witness programs
//! - **Providers**: ML-KEM-1024 / ML-DSA-65 key generation, in process or via
//!   the `qtc-provider` helper
//!
//! ## Security Properties
//!
//! - No hidden entropy: every output is a function of explicit inputs
//! - Secret material is zeroized on drop
//! - Every expansion absorbs a domain tag
//!
//! ## Example
//!
//! ```rust
//! use qtc_core::{Entropy, HdPath};
//! use qtc_crypto::{child_entropy, witness_program};
//!
//! let master = Entropy::from_slice(&[0x42; 64]);
//! let child = child_entropy(&master, &HdPath::default_chain(3)).unwrap();
//! assert_eq!(child.len(), 64);
//! assert_eq!(witness_program(child.as_bytes()).len(), 20);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod derive;
pub mod hash;
pub mod provider;

// Re-export main functions at crate root
pub use derive::{
    child_entropy, derive_address, derive_master, master_entropy, provisional_signature_seed,
    signature_seed, witness_program, DerivedNode, HdNode,
};
pub use hash::{expand, expand_parts, sha3_256, sha3_512, shake256, ExpandRule};
pub use provider::{NativeProvider, ProcessProvider, ProviderKind};
