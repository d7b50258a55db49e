//! Protocol constants for QTC wallets.
//!
//! Key sizes follow ML-KEM-1024 (NIST FIPS 203) and ML-DSA-65 (NIST FIPS 204).
//! Domain tags are part of the derivation contract: changing any byte here
//! yields different, non-recoverable wallets.

// ═══════════════════════════════════════════════════════════════════════════════
// ML-KEM-1024 SIZES (NIST FIPS 203)
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of ML-KEM-1024 public key (encapsulation key) in bytes.
pub const KEM_PUBLIC_KEY_SIZE: usize = 1568;

/// Size of ML-KEM-1024 secret key (decapsulation key) in bytes.
pub const KEM_SECRET_KEY_SIZE: usize = 3168;

/// Size of ML-KEM-1024 ciphertext in bytes.
pub const KEM_CIPHERTEXT_SIZE: usize = 1568;

/// Size of the shared secret produced by ML-KEM encapsulation.
pub const KEM_SHARED_SECRET_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// ML-DSA-65 SIZES (NIST FIPS 204)
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of ML-DSA-65 public (verifying) key in bytes.
pub const SIG_PUBLIC_KEY_SIZE: usize = 1952;

/// Size of ML-DSA-65 secret (signing) key in bytes.
pub const SIG_SECRET_KEY_SIZE: usize = 4032;

/// Size of the seed handed to deterministic signature keygen.
pub const SIG_SEED_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// DERIVATION SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Default size of a freshly generated wallet seed.
/// Matches the 48-byte seed width of the NIST KAT DRBG used by the reference helper.
pub const DEFAULT_SEED_SIZE: usize = 48;

/// Size of master entropy for every wallet method.
pub const MASTER_ENTROPY_SIZE: usize = 64;

/// Size of child entropy (SHA3-512 output).
pub const CHILD_ENTROPY_SIZE: usize = 64;

/// SHA3-256 digest size.
pub const SHA3_256_SIZE: usize = 32;

/// SHA3-512 digest size.
pub const SHA3_512_SIZE: usize = 64;

// ═══════════════════════════════════════════════════════════════════════════════
// ADDRESS CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Human-readable part of every QTC address.
pub const ADDRESS_HRP: &str = "qtc";

/// Size of a witness program (low 20 bytes of a SHA3-256 digest).
pub const WITNESS_PROGRAM_SIZE: usize = 20;

/// Highest witness version representable in a single 5-bit group.
pub const MAX_WITNESS_VERSION: u8 = 31;

// ═══════════════════════════════════════════════════════════════════════════════
// DOMAIN SEPARATORS
// ═══════════════════════════════════════════════════════════════════════════════
// Every expansion call site absorbs exactly one of these tags.

/// Tag for the provisional signature seed (absorbed before the KEM shared secret).
pub const DOMAIN_PROVISIONAL_SIG_SEED: &[u8] = b"QTC/provisional-signature-seed/v1";

/// Tag absorbed between the shared secret and the provisional public key
/// in the Single PQ-HD master formula.
pub const DOMAIN_PQ_HD_MASTER: &[u8] = b"QTC/pq-hd-master/v1";

/// Prefix absorbed by the native provider before its operation tag.
pub const PROVIDER_DOMAIN_PREFIX: &[u8] = b"qtc_provider";

/// Provider operation tag for KEM key generation.
pub const PROVIDER_OP_KEM_KEYGEN: &[u8] = b"kyber_keygen";

/// Provider operation tag for KEM self-encapsulation.
pub const PROVIDER_OP_KEM_SELF: &[u8] = b"kyber_kem_self";

/// Provider operation tag for signature key generation.
pub const PROVIDER_OP_SIG_KEYGEN: &[u8] = b"dilithium_keygen";

// ═══════════════════════════════════════════════════════════════════════════════
// HD PATH DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default purpose level (`m/44'/...`).
pub const DEFAULT_PURPOSE: u32 = 44;

/// Default account level.
pub const DEFAULT_ACCOUNT: u32 = 0;

/// Default change level (external chain).
pub const DEFAULT_CHANGE: u32 = 0;

/// Default number of addresses for the HD multi-address method.
pub const DEFAULT_HD_ADDRESS_COUNT: u32 = 5;
