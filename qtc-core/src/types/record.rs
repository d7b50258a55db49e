//! The immutable result of one wallet generation.

use crate::error::{QtcError, Result};
use crate::types::{Address, Entropy, HdPath, KemKeyPair, SigKeyPair, WalletMethod};

/// One derived address with the signature key pair that controls it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressEntry {
    /// Derivation path of the address
    pub path: HdPath,
    /// Encoded witness address
    pub address: Address,
    /// Signature key pair for this address
    pub signature: SigKeyPair,
}

/// A fully assembled wallet.
///
/// Built once by the assembler and never modified afterwards; there are no
/// setters. Addresses are ordered by ascending address index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletRecord {
    method: WalletMethod,
    witness_version: u8,
    master_entropy: Entropy,
    kem: KemKeyPair,
    kem_shared_secret: Entropy,
    addresses: Vec<AddressEntry>,
}

impl WalletRecord {
    /// Bundles the material of one wallet generation.
    ///
    /// # Errors
    /// Returns a state error if there are no addresses, if an address carries a
    /// witness version other than the method's, or if the addresses are not
    /// strictly ascending by index.
    pub fn new(
        method: WalletMethod,
        master_entropy: Entropy,
        kem: KemKeyPair,
        kem_shared_secret: Entropy,
        addresses: Vec<AddressEntry>,
    ) -> Result<Self> {
        let witness_version = method.spec().witness_version;

        if addresses.is_empty() {
            return Err(QtcError::state("wallet record needs at least one address"));
        }
        if let Some(entry) = addresses
            .iter()
            .find(|e| e.address.witness_version() != witness_version)
        {
            return Err(QtcError::state(format!(
                "address at {} has witness version {}, method {} uses {}",
                entry.path,
                entry.address.witness_version(),
                method,
                witness_version
            )));
        }
        if addresses
            .windows(2)
            .any(|w| w[0].path.address_index >= w[1].path.address_index)
        {
            return Err(QtcError::state("addresses must be ordered by ascending index"));
        }

        Ok(Self {
            method,
            witness_version,
            master_entropy,
            kem,
            kem_shared_secret,
            addresses,
        })
    }

    /// Method that produced this wallet.
    pub fn method(&self) -> WalletMethod {
        self.method
    }

    /// Witness version of every address in this wallet.
    pub fn witness_version(&self) -> u8 {
        self.witness_version
    }

    /// Master entropy.
    pub fn master_entropy(&self) -> &Entropy {
        &self.master_entropy
    }

    /// The KEM key pair the wallet was bootstrapped from.
    pub fn kem(&self) -> &KemKeyPair {
        &self.kem
    }

    /// Shared secret from KEM self-encapsulation. Kept for audit, never exported.
    pub fn kem_shared_secret(&self) -> &Entropy {
        &self.kem_shared_secret
    }

    /// Addresses in ascending index order.
    pub fn addresses(&self) -> &[AddressEntry] {
        &self.addresses
    }

    /// The first (index 0 for single-address methods) address.
    pub fn primary_address(&self) -> &Address {
        // Non-empty by construction
        &self.addresses[0].address
    }
}
