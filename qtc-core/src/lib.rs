//! # QTC Core
//!
//! Core types, errors, and traits for the QTC post-quantum wallet.
//!
//! This crate provides the foundational building blocks used by all other QTC crates:
//!
//! - **Types**: seeds, entropy, HD paths, key pairs, the wallet method table,
//!   `qtc` addresses and the immutable wallet record
//! - **Errors**: the wallet error taxonomy
//! - **Constants**: algorithm sizes, domain tags and path defaults
//! - **Traits**: the `CryptoProvider` seam between derivation and the KEM/signature backend
//!
//! ## Example
//!
//! ```rust
//! use qtc_core::{Address, HdPath, WalletMethod};
//!
//! let path: HdPath = "m/44'/0'/0/7".parse().unwrap();
//! assert_eq!(path.address_index, 7);
//!
//! let spec = WalletMethod::HdMulti.spec();
//! let address = Address::new(spec.witness_version, [0u8; 20]).unwrap();
//! assert!(address.to_string().starts_with("qtc1"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{ErrorKind, QtcError, Result};
pub use traits::*;
pub use types::*;
