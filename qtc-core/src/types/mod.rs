//! Domain types for QTC wallets.
//!
//! - [`Seed`] / [`Entropy`]: the source bytes and every derived byte string
//! - [`KeyPair`]: KEM or signature key pair, selected by capability marker
//! - [`HdPath`]: the `m/purpose'/account'/change/index` derivation path
//! - [`WalletMethod`]: the method table driving derivation
//! - [`Address`]: a `qtc1...` witness address
//! - [`WalletRecord`]: the immutable result of one wallet generation

mod entropy;
mod keys;
mod path;
mod method;
mod address;
mod record;

pub use entropy::*;
pub use keys::*;
pub use path::*;
pub use method::*;
pub use address::*;
pub use record::*;
