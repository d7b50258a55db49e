//! # QTC Wallet
//!
//! High-level API for assembling and exporting QTC post-quantum wallets.
//!
//! This crate provides:
//!
//! - **Assembly**: KEM bootstrap, method-driven master derivation and
//!   per-address key generation, parallel across indices
//! - **Configuration**: address count and derivation chain
//! - **Export**: the base64 JSON transport record
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qtc_core::WalletMethod;
//! use qtc_crypto::NativeProvider;
//! use qtc_wallet::{WalletAssembler, WalletExport};
//!
//! let assembler = WalletAssembler::new(NativeProvider::new());
//! let (seed, wallet) = assembler.generate(WalletMethod::HdMulti)?;
//!
//! // Same seed, same wallet
//! assert_eq!(assembler.assemble(WalletMethod::HdMulti, &seed)?, wallet);
//!
//! println!("{}", WalletExport::from(&wallet).to_json_pretty()?);
//! # Ok::<(), qtc_core::QtcError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod assembler;
pub mod config;
pub mod export;

pub use assembler::WalletAssembler;
pub use config::AssemblerConfig;
pub use export::{AddressExport, WalletExport};
