//! Wallet assembly: KEM bootstrap, master derivation, address fan-out.
//!
//! ## Flow
//!
//! ```text
//! seed ─► kem_self_encapsulate ─► (kem keypair, shared secret)
//!                                        │
//!             method row ─► derive_master(shared secret [, provisional pk])
//!                                        │
//!                     ┌──────────────────┼──────────────────┐
//!                 index 0            index 1     ...    index N-1     (rayon)
//!                     └──────────────────┼──────────────────┘
//!                                        ▼
//!                              WalletRecord (ordered)
//! ```

use rayon::prelude::*;
use tracing::{info, instrument, warn};

use qtc_core::error::{QtcError, Result};
use qtc_core::traits::CryptoProvider;
use qtc_core::types::{AddressEntry, KemSelfEncapsulation, Seed, WalletMethod, WalletRecord};
use qtc_crypto::derive::{derive_master, DerivedNode, HdNode};

use crate::config::AssemblerConfig;

/// Builds [`WalletRecord`]s with a given provider.
///
/// Holds no mutable state; concurrent `assemble` calls on one assembler are
/// independent of each other.
#[derive(Clone, Debug)]
pub struct WalletAssembler<P: CryptoProvider> {
    provider: P,
    config: AssemblerConfig,
}

impl<P: CryptoProvider> WalletAssembler<P> {
    /// Creates an assembler with default configuration.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, AssemblerConfig::default())
    }

    /// Creates an assembler with custom configuration.
    pub fn with_config(provider: P, config: AssemblerConfig) -> Self {
        Self { provider, config }
    }

    /// The provider in use.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The configuration in use.
    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Generates a fresh seed from the OS RNG and assembles a wallet from it.
    ///
    /// The returned seed recreates the same wallet through [`assemble`](Self::assemble).
    pub fn generate(&self, method: WalletMethod) -> Result<(Seed, WalletRecord)> {
        let seed = Seed::generate();
        let record = self.assemble(method, &seed)?;
        Ok((seed, record))
    }

    /// Assembles the wallet for `method` from `seed`.
    ///
    /// Deterministic: the same seed, method, provider and configuration
    /// always yield an identical record. Any failure aborts the whole call.
    #[instrument(skip(self, seed), fields(provider = self.provider.name()))]
    pub fn assemble(&self, method: WalletMethod, seed: &Seed) -> Result<WalletRecord> {
        let spec = method.spec();
        let count = self.config.address_count_for(method)?;

        let KemSelfEncapsulation {
            keypair,
            shared_secret,
        } = self
            .provider
            .kem_self_encapsulate(seed.as_bytes())
            .map_err(|e| self.report(e))?;

        let master =
            derive_master(spec, &self.provider, &shared_secret).map_err(|e| self.report(e))?;

        let targets: Vec<HdNode> = (0..count)
            .map(|i| HdNode::new(master.clone(), self.config.path(i)))
            .collect();
        let derive = |node: &HdNode| node.derive_keys(spec, &self.provider);

        // Indexed collect keeps ascending order regardless of completion order
        let derived = if self.config.parallel && targets.len() > 1 {
            targets.par_iter().map(derive).collect::<Result<Vec<DerivedNode>>>()
        } else {
            targets.iter().map(derive).collect::<Result<Vec<DerivedNode>>>()
        };
        let nodes = derived.map_err(|e| self.report(e))?;

        let addresses: Vec<AddressEntry> = nodes
            .into_iter()
            .map(|node| AddressEntry {
                path: node.path,
                address: node.address,
                signature: node.signature,
            })
            .collect();

        let record = WalletRecord::new(method, master, keypair, shared_secret, addresses)?;

        info!(
            method = %method,
            addresses = record.addresses().len(),
            first = %record.primary_address(),
            "Assembled wallet"
        );

        Ok(record)
    }

    fn report(&self, err: QtcError) -> QtcError {
        if err.is_provider_error() {
            warn!(provider = self.provider.name(), error = %err, "Wallet assembly aborted");
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtc_core::constants::{
        KEM_PUBLIC_KEY_SIZE, KEM_SECRET_KEY_SIZE, SIG_PUBLIC_KEY_SIZE, SIG_SECRET_KEY_SIZE,
    };
    use qtc_core::error::ErrorKind;
    use qtc_core::types::{Entropy, KemKeyPair, SigKeyPair};
    use qtc_crypto::hash::shake256;

    struct FixtureProvider;

    impl CryptoProvider for FixtureProvider {
        fn name(&self) -> &str {
            "fixture"
        }

        fn kem_keygen(&self, seed: &[u8]) -> Result<KemKeyPair> {
            KemKeyPair::from_bytes(
                shake256(&[b"kem-pk".as_slice(), seed], KEM_PUBLIC_KEY_SIZE),
                shake256(&[b"kem-sk".as_slice(), seed], KEM_SECRET_KEY_SIZE),
            )
        }

        fn kem_self_encapsulate(&self, seed: &[u8]) -> Result<KemSelfEncapsulation> {
            KemSelfEncapsulation::new(
                self.kem_keygen(seed)?,
                Entropy::from_vec(shake256(&[b"ss".as_slice(), seed], 32)),
            )
        }

        fn sig_keygen(&self, seed: &[u8]) -> Result<SigKeyPair> {
            SigKeyPair::from_bytes(
                shake256(&[b"sig-pk".as_slice(), seed], SIG_PUBLIC_KEY_SIZE),
                shake256(&[b"sig-sk".as_slice(), seed], SIG_SECRET_KEY_SIZE),
            )
        }
    }

    fn seed() -> Seed {
        Seed::from_bytes(&[0x5a; 48]).unwrap()
    }

    #[test]
    fn test_address_counts_per_method() {
        let assembler = WalletAssembler::new(FixtureProvider);
        assert_eq!(assembler.assemble(WalletMethod::Primary, &seed()).unwrap().addresses().len(), 1);
        assert_eq!(assembler.assemble(WalletMethod::SinglePqHd, &seed()).unwrap().addresses().len(), 1);
        assert_eq!(assembler.assemble(WalletMethod::HdMulti, &seed()).unwrap().addresses().len(), 5);
    }

    #[test]
    fn test_count_validation_happens_before_provider_calls() {
        let config = AssemblerConfig::default().with_address_count(3);
        let assembler = WalletAssembler::with_config(FixtureProvider, config);
        let err = assembler.assemble(WalletMethod::Primary, &seed()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_generate_returns_reproducible_seed() {
        let assembler = WalletAssembler::new(FixtureProvider);
        let (seed, record) = assembler.generate(WalletMethod::SinglePqHd).unwrap();
        assert_eq!(assembler.assemble(WalletMethod::SinglePqHd, &seed).unwrap(), record);
    }
}
