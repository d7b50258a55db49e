//! Master and hierarchical child derivation.
//!
//! Every function here is pure: outputs depend only on explicit arguments.
//! The method table in [`qtc_core::types::MethodSpec`] selects the formula;
//! nothing in this module branches on the method name.
//!
//! ## Derivation Flow
//!
//! ```text
//! kem_shared_secret
//!       ↓ (methods with a provisional key)
//! SHAKE256("QTC/provisional-signature-seed/v1" || ss, 32) → provisional sig seed
//!       ↓ sig_keygen
//! provisional_pk
//!       ↓
//! master = formula(ss [, tag] [, provisional_pk])        (64 bytes)
//!       ↓ (multi-address methods)
//! child_i = SHA3-512(master || "m/44'/0'/0/i" || be32(i))
//!       ↓
//! sig seed = node_entropy[..32] → sig_keygen
//! program  = SHA3-256(sig_pk or node_entropy)[..20]
//! ```

use tracing::debug;

use qtc_core::constants::{
    CHILD_ENTROPY_SIZE, DOMAIN_PROVISIONAL_SIG_SEED, MASTER_ENTROPY_SIZE, SIG_SEED_SIZE,
    WITNESS_PROGRAM_SIZE,
};
use qtc_core::error::{QtcError, Result};
use qtc_core::traits::CryptoProvider;
use qtc_core::types::{
    AbsorbOrder, Address, Entropy, HashFunction, HdPath, MasterFormula, MasterPart, MethodSpec,
    ProgramSource, SigKeyPair, WitnessProgram,
};

use crate::hash::{expand, expand_parts, sha3_256, ExpandRule};

/// Expansion rule for the provisional signature seed.
pub const PROVISIONAL_SEED_RULE: ExpandRule =
    ExpandRule::new(HashFunction::Shake256, AbsorbOrder::TagFirst);

// ═══════════════════════════════════════════════════════════════════════════════
// MASTER DERIVATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Seed for the provisional signature key pair, from the KEM shared secret alone.
pub fn provisional_signature_seed(shared_secret: &[u8]) -> Result<[u8; SIG_SEED_SIZE]> {
    let bytes = expand(
        PROVISIONAL_SEED_RULE,
        shared_secret,
        DOMAIN_PROVISIONAL_SIG_SEED,
        SIG_SEED_SIZE,
    )?;
    let mut seed = [0u8; SIG_SEED_SIZE];
    seed.copy_from_slice(&bytes);
    Ok(seed)
}

/// Evaluates a master-entropy formula.
///
/// `sig_public_key` must be present exactly when the formula absorbs it.
///
/// # Errors
/// - Length error if `shared_secret` is empty
/// - State error if the formula needs a provisional public key and none was given
pub fn master_entropy(
    formula: &MasterFormula,
    shared_secret: &[u8],
    sig_public_key: Option<&[u8]>,
) -> Result<Entropy> {
    if shared_secret.is_empty() {
        return Err(QtcError::ZeroLength("KEM shared secret"));
    }

    let mut parts: Vec<&[u8]> = Vec::with_capacity(formula.parts.len());
    for part in formula.parts {
        match part {
            MasterPart::SharedSecret => parts.push(shared_secret),
            MasterPart::Tag(tag) => parts.push(*tag),
            MasterPart::SigPublicKey => parts.push(sig_public_key.ok_or_else(|| {
                QtcError::state("master formula needs the provisional signature public key")
            })?),
        }
    }

    let bytes = expand_parts(formula.function, &parts, formula.output_len)?;
    Ok(Entropy::from_vec(bytes))
}

/// Runs phases (a) and (b) for a method: provisional key (if the row asks for
/// one), then master entropy. The provisional key pair is dropped afterwards;
/// only its public key reaches the master.
pub fn derive_master<P: CryptoProvider>(
    spec: &MethodSpec,
    provider: &P,
    shared_secret: &Entropy,
) -> Result<Entropy> {
    let master = if spec.provisional_signature {
        let seed = provisional_signature_seed(shared_secret.as_bytes())?;
        let provisional = provider.sig_keygen(&seed)?;
        debug!(
            method = %spec.method,
            public_key_len = provisional.public_key().len(),
            "Derived provisional signature key"
        );
        master_entropy(&spec.master, shared_secret.as_bytes(), Some(provisional.public_key()))?
    } else {
        master_entropy(&spec.master, shared_secret.as_bytes(), None)?
    };

    debug!(method = %spec.method, len = master.len(), "Derived master entropy");
    Ok(master)
}

// ═══════════════════════════════════════════════════════════════════════════════
// CHILD DERIVATION
// ═══════════════════════════════════════════════════════════════════════════════

/// `SHA3-512(parent || canonical(path) || be32(path.address_index))`.
///
/// # Errors
/// - State error if `parent` is empty (no master established)
/// - Length error if `parent` is not 64 bytes
pub fn child_entropy(parent: &Entropy, path: &HdPath) -> Result<Entropy> {
    if parent.is_empty() {
        return Err(QtcError::state(
            "child derivation requested before master entropy was established",
        ));
    }
    if parent.len() != MASTER_ENTROPY_SIZE {
        return Err(QtcError::length(
            "parent entropy",
            MASTER_ENTROPY_SIZE,
            parent.len(),
        ));
    }

    let canonical = path.canonical();
    let index = path.address_index.to_be_bytes();
    let parts: [&[u8]; 3] = [parent.as_bytes(), canonical.as_bytes(), &index];
    let bytes = expand_parts(HashFunction::Sha3_512, &parts, CHILD_ENTROPY_SIZE)?;
    Ok(Entropy::from_vec(bytes))
}

/// The first 32 bytes of `entropy`, handed to signature keygen.
pub fn signature_seed(entropy: &Entropy) -> Result<[u8; SIG_SEED_SIZE]> {
    entropy.signature_seed()
}

/// `SHA3-256(input)[..20]`.
pub fn witness_program(input: &[u8]) -> WitnessProgram {
    let digest = sha3_256(input);
    let mut program = [0u8; WITNESS_PROGRAM_SIZE];
    program.copy_from_slice(&digest[..WITNESS_PROGRAM_SIZE]);
    program
}

// ═══════════════════════════════════════════════════════════════════════════════
// NODES
// ═══════════════════════════════════════════════════════════════════════════════

/// A (master entropy, path) pair.
///
/// Not a stored tree: the node's entropy is recomputed from the master on
/// every call, and deriving keys returns a new [`DerivedNode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HdNode {
    master: Entropy,
    path: HdPath,
}

impl HdNode {
    /// Creates a node under `master`.
    pub fn new(master: Entropy, path: HdPath) -> Self {
        Self { master, path }
    }

    /// The node's path.
    pub fn path(&self) -> &HdPath {
        &self.path
    }

    /// Child entropy for this node.
    pub fn entropy(&self) -> Result<Entropy> {
        child_entropy(&self.master, &self.path)
    }

    /// Derives this node's signature key pair and address under `spec`.
    pub fn derive_keys<P: CryptoProvider>(
        &self,
        spec: &MethodSpec,
        provider: &P,
    ) -> Result<DerivedNode> {
        derive_address(spec, provider, &self.master, self.path)
    }
}

/// A node with its keys and address filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedNode {
    /// Derivation path
    pub path: HdPath,
    /// Entropy the keys were drawn from (master or child)
    pub entropy: Entropy,
    /// Signature key pair
    pub signature: SigKeyPair,
    /// Encoded address
    pub address: Address,
}

/// Phase (c) for one address index.
///
/// Multi-address rows key each index from its own child entropy; single-address
/// rows key straight from the master. The program hashes whatever the row's
/// `program_source` names.
pub fn derive_address<P: CryptoProvider>(
    spec: &MethodSpec,
    provider: &P,
    master: &Entropy,
    path: HdPath,
) -> Result<DerivedNode> {
    if master.is_empty() {
        return Err(QtcError::state(
            "address derivation requested before master entropy was established",
        ));
    }

    let entropy = if spec.multi_address {
        child_entropy(master, &path)?
    } else {
        master.clone()
    };

    let seed = signature_seed(&entropy)?;
    let signature = provider.sig_keygen(&seed)?;

    let program = match spec.program_source {
        ProgramSource::SignaturePublicKey => witness_program(signature.public_key()),
        ProgramSource::NodeEntropy => witness_program(entropy.as_bytes()),
    };
    let address = Address::new(spec.witness_version, program)?;

    debug!(method = %spec.method, path = %path, "Derived address");

    Ok(DerivedNode {
        path,
        entropy,
        signature,
        address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::shake256;
    use qtc_core::constants::{
        KEM_PUBLIC_KEY_SIZE, KEM_SECRET_KEY_SIZE, SIG_PUBLIC_KEY_SIZE, SIG_SECRET_KEY_SIZE,
    };
    use qtc_core::error::ErrorKind;
    use qtc_core::types::{KemKeyPair, KemSelfEncapsulation, WalletMethod};
    use proptest::prelude::*;

    const SS: [u8; 64] = [0x11; 64];
    const PK: [u8; 32] = [0x22; 32];

    const PRIMARY_MASTER: &str = "277dc05c8029ed66d82332d872a2966a1968de1f07f24d1771be171c5d35e909\
                                  ce534611b9a16dfa8032c1dcad09ac1af76c65e6299786bd5f4d314ce5fb169f";
    const HD_MASTER: &str = "18f5f04c5e7f540db6458b4fc1fb4db8da50d0759df7b5a4fb3d737206259683\
                             afc11ebaebeea30a4345abb933f96f713d0bb8dd6a8483055a30d274b5f07902";
    const PQ_HD_MASTER: &str = "ad5bcefe85693cd1f80d064748e1d830bfb6d3cef99df14b35db7db5b0523754\
                                afefbfca231d8bece9f9ea2e756ef3afdc85837538f0a76995baf910c2b67ea2";

    /// Deterministic stand-in for a real provider.
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
            let keypair = self.kem_keygen(seed)?;
            KemSelfEncapsulation::new(keypair, Entropy::from_vec(shake256(&[b"ss".as_slice(), seed], 32)))
        }

        fn sig_keygen(&self, seed: &[u8]) -> Result<SigKeyPair> {
            SigKeyPair::from_bytes(
                shake256(&[b"sig-pk".as_slice(), seed], SIG_PUBLIC_KEY_SIZE),
                shake256(&[b"sig-sk".as_slice(), seed], SIG_SECRET_KEY_SIZE),
            )
        }
    }

    fn hd_master() -> Entropy {
        Entropy::from_hex(HD_MASTER).unwrap()
    }

    #[test]
    fn test_primary_master_vector() {
        let master = master_entropy(&WalletMethod::Primary.spec().master, &SS, None).unwrap();
        assert_eq!(master.to_hex(), PRIMARY_MASTER);
    }

    #[test]
    fn test_hd_multi_master_vector() {
        let master = master_entropy(&WalletMethod::HdMulti.spec().master, &SS, Some(&PK)).unwrap();
        assert_eq!(master.to_hex(), HD_MASTER);
    }

    #[test]
    fn test_pq_hd_master_vector() {
        let master =
            master_entropy(&WalletMethod::SinglePqHd.spec().master, &SS, Some(&PK)).unwrap();
        assert_eq!(master.to_hex(), PQ_HD_MASTER);
    }

    #[test]
    fn test_provisional_seed_vector() {
        assert_eq!(
            hex::encode(provisional_signature_seed(&SS).unwrap()),
            "37ab71162361f238841efa5290edaaf2a8cfa8154991187f05fd26b3adff93d4"
        );
    }

    #[test]
    fn test_missing_provisional_key_is_state_error() {
        let err = master_entropy(&WalletMethod::HdMulti.spec().master, &SS, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_empty_shared_secret_rejected() {
        let err = master_entropy(&WalletMethod::Primary.spec().master, &[], None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Length);
    }

    #[test]
    fn test_child_vectors() {
        let master = hd_master();
        let child0 = child_entropy(&master, &HdPath::default_chain(0)).unwrap();
        assert_eq!(
            child0.to_hex(),
            "ceee24412c6185ef794cc60538c21031a68d164bc701a4202fd0c97422f4943e\
             5390f5bf4e1f1660acf96489bfb4ab3d8118642d3016f58a49085ca3634c6ab7"
        );
        let child5 = child_entropy(&master, &HdPath::default_chain(5)).unwrap();
        assert_eq!(
            child5.to_hex(),
            "092468a256bc97cad48729911f6a04a37a41915c77857753dea728a86f9b79f2\
             61f37b03d2cecec3eb13e252be31a83f3cf859cc9c385e991b2762f71b8ba6b5"
        );
    }

    #[test]
    fn test_child_address_vectors() {
        let master = hd_master();
        let child0 = child_entropy(&master, &HdPath::default_chain(0)).unwrap();
        let child5 = child_entropy(&master, &HdPath::default_chain(5)).unwrap();
        let program0 = witness_program(child0.as_bytes());
        let program5 = witness_program(child5.as_bytes());
        assert_eq!(
            Address::new(2, program0).unwrap().to_string(),
            "qtc1zcqum3fkmuhyjgl6f5ffmwssnr6yewgtqtv88j8"
        );
        assert_eq!(
            Address::new(2, program5).unwrap().to_string(),
            "qtc1zrgua8p9hl43nv7ut0xek2gmfuukkwe29a9n4y5"
        );
    }

    #[test]
    fn test_pq_hd_and_primary_program_vectors() {
        let pq = Entropy::from_hex(PQ_HD_MASTER).unwrap();
        assert_eq!(
            Address::new(2, witness_program(pq.as_bytes())).unwrap().to_string(),
            "qtc1zcgaz5n4zqr27aeqa9a8q54dne3j9345p55tdfj"
        );

        let program = witness_program(&PK);
        assert_eq!(hex::encode(program), "0ec93fc9ead0dd15eb78984e8a2677772a395ad4");
        assert_eq!(
            Address::new(1, program).unwrap().to_string(),
            "qtc1ppmynlj026rw3t6mcnp8g5fnhwu4rjkk5kjcndm"
        );
    }

    #[test]
    fn test_child_requires_master() {
        let err = child_entropy(&Entropy::from_vec(Vec::new()), &HdPath::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);

        let err = child_entropy(&Entropy::from_slice(&[1; 32]), &HdPath::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Length);
    }

    #[test]
    fn test_tree_purity() {
        let master = hd_master();
        let sequential: Vec<Entropy> = (0..=5)
            .map(|i| child_entropy(&master, &HdPath::default_chain(i)).unwrap())
            .collect();
        let direct = child_entropy(&master, &HdPath::default_chain(5)).unwrap();
        assert_eq!(sequential[5], direct);

        // Same index on a different chain is a different child.
        let other = child_entropy(&master, &HdPath::new(44, 1, 0, 5)).unwrap();
        assert_ne!(other, direct);
    }

    #[test]
    fn test_node_entropy_is_recomputed() {
        let node = HdNode::new(hd_master(), HdPath::default_chain(3));
        assert_eq!(node.entropy().unwrap(), node.entropy().unwrap());
        assert_eq!(
            node.entropy().unwrap(),
            child_entropy(&hd_master(), &HdPath::default_chain(3)).unwrap()
        );
    }

    #[test]
    fn test_node_derive_keys_does_not_mutate() {
        let node = HdNode::new(hd_master(), HdPath::default_chain(0));
        let before = node.clone();
        let derived = node
            .derive_keys(WalletMethod::HdMulti.spec(), &FixtureProvider)
            .unwrap();
        assert_eq!(node, before);
        assert_eq!(derived.address.to_string(), "qtc1zcqum3fkmuhyjgl6f5ffmwssnr6yewgtqtv88j8");
        assert_eq!(derived.path, HdPath::default_chain(0));
    }

    #[test]
    fn test_node_derive_keys_follows_method_row() {
        let master = Entropy::from_hex(PRIMARY_MASTER).unwrap();
        let node = HdNode::new(master.clone(), HdPath::default());
        let spec = WalletMethod::Primary.spec();

        let derived = node.derive_keys(spec, &FixtureProvider).unwrap();
        assert_eq!(derived.address.witness_version(), spec.witness_version);
        assert_eq!(derived.entropy, master);
        assert_eq!(
            derived.address.program(),
            &witness_program(derived.signature.public_key())
        );
        assert_eq!(
            derived,
            derive_address(spec, &FixtureProvider, &master, HdPath::default()).unwrap()
        );
    }

    #[test]
    fn test_primary_address_hashes_signature_key() {
        let master = Entropy::from_hex(PRIMARY_MASTER).unwrap();
        let spec = WalletMethod::Primary.spec();
        let derived = derive_address(spec, &FixtureProvider, &master, HdPath::default()).unwrap();
        assert_eq!(derived.entropy, master);
        assert_eq!(derived.address.witness_version(), 1);
        assert_eq!(
            derived.address.program(),
            &witness_program(derived.signature.public_key())
        );
    }

    #[test]
    fn test_witness_separation_on_shared_inputs() {
        let provider = FixtureProvider;
        let ss = Entropy::from_slice(&SS);
        let primary_master = derive_master(WalletMethod::Primary.spec(), &provider, &ss).unwrap();
        let hd_master = derive_master(WalletMethod::HdMulti.spec(), &provider, &ss).unwrap();

        let primary = derive_address(
            WalletMethod::Primary.spec(),
            &provider,
            &primary_master,
            HdPath::default(),
        )
        .unwrap();
        let hd = derive_address(WalletMethod::HdMulti.spec(), &provider, &hd_master, HdPath::default())
            .unwrap();

        assert_ne!(primary.address, hd.address);
        assert_ne!(primary.address.witness_version(), hd.address.witness_version());
    }

    #[test]
    fn test_derive_master_uses_provisional_key() {
        let provider = FixtureProvider;
        let ss = Entropy::from_slice(&SS);
        let provisional = provider
            .sig_keygen(&provisional_signature_seed(&SS).unwrap())
            .unwrap();
        let expected = master_entropy(
            &WalletMethod::SinglePqHd.spec().master,
            &SS,
            Some(provisional.public_key()),
        )
        .unwrap();
        let master = derive_master(WalletMethod::SinglePqHd.spec(), &provider, &ss).unwrap();
        assert_eq!(master, expected);
    }

    #[test]
    fn test_address_requires_master() {
        let err = derive_address(
            WalletMethod::Primary.spec(),
            &FixtureProvider,
            &Entropy::from_vec(Vec::new()),
            HdPath::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
    }

    proptest! {
        #[test]
        fn prop_program_is_20_bytes(input in proptest::collection::vec(any::<u8>(), 0..256)) {
            prop_assert_eq!(witness_program(&input).len(), WITNESS_PROGRAM_SIZE);
        }

        #[test]
        fn prop_distinct_indices_give_distinct_children(a in any::<u32>(), b in any::<u32>()) {
            prop_assume!(a != b);
            let master = hd_master();
            let ca = child_entropy(&master, &HdPath::default_chain(a)).unwrap();
            let cb = child_entropy(&master, &HdPath::default_chain(b)).unwrap();
            prop_assert_ne!(ca, cb);
        }
    }
}
