//! Error types for QTC wallets.
//!
//! Every failure maps to one [`ErrorKind`] of the wallet taxonomy. Any error
//! aborts the wallet-generation call that raised it; nothing is retried and no
//! partially assembled wallet is returned.

use std::fmt;

use thiserror::Error;

/// Result type alias using `QtcError`.
pub type Result<T> = std::result::Result<T, QtcError>;

/// Main error type for all QTC operations.
#[derive(Debug, Error)]
pub enum QtcError {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Malformed HD path or address text.
    #[error("Format error: {0}")]
    Format(String),

    /// Byte string of the wrong size.
    #[error("Invalid {what} length: expected {expected} bytes, got {actual}")]
    Length {
        /// What was being checked
        what: &'static str,
        /// Required length
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Byte string or requested output that must not be empty.
    #[error("Invalid {0} length: must be non-zero")]
    ZeroLength(&'static str),

    /// Address checksum did not verify.
    #[error("Address checksum mismatch")]
    Checksum,

    /// Witness version outside 0..=31.
    #[error("Witness version {0} out of range (0..=31)")]
    Version(u8),

    // ═══════════════════════════════════════════════════════════════════════════
    // PIPELINE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// A crypto provider call failed. Always fatal.
    #[error("Crypto provider '{provider}' failed: {message}")]
    CryptoProvider {
        /// Provider name
        provider: String,
        /// Message reported by the provider
        message: String,
    },

    /// Derivation requested before its prerequisites exist.
    #[error("Invalid state: {0}")]
    State(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // ENCODING / TRANSPORT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Invalid base64 encoding.
    #[error("Invalid base64 encoding: {0}")]
    Base64(#[from] base64::DecodeError),

    /// I/O failure while talking to an out-of-process provider.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error classification surfaced to library callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed text (path, address, hex, base64, JSON).
    Format,
    /// Wrong-size seed, entropy, key or program.
    Length,
    /// Address checksum mismatch.
    Checksum,
    /// Witness version out of range.
    Version,
    /// Provider call failure.
    CryptoProvider,
    /// Missing prerequisite.
    State,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Format => "FormatError",
            ErrorKind::Length => "LengthError",
            ErrorKind::Checksum => "ChecksumError",
            ErrorKind::Version => "VersionError",
            ErrorKind::CryptoProvider => "CryptoProviderError",
            ErrorKind::State => "StateError",
        };
        f.write_str(name)
    }
}

impl QtcError {
    /// Shorthand for a [`QtcError::Format`] error.
    pub fn format(message: impl Into<String>) -> Self {
        QtcError::Format(message.into())
    }

    /// Shorthand for a [`QtcError::Length`] error.
    pub fn length(what: &'static str, expected: usize, actual: usize) -> Self {
        QtcError::Length {
            what,
            expected,
            actual,
        }
    }

    /// Shorthand for a [`QtcError::CryptoProvider`] error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        QtcError::CryptoProvider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`QtcError::State`] error.
    pub fn state(message: impl Into<String>) -> Self {
        QtcError::State(message.into())
    }

    /// Returns the taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QtcError::Format(_) | QtcError::Json(_) | QtcError::Hex(_) | QtcError::Base64(_) => {
                ErrorKind::Format
            }
            QtcError::Length { .. } | QtcError::ZeroLength(_) => ErrorKind::Length,
            QtcError::Checksum => ErrorKind::Checksum,
            QtcError::Version(_) => ErrorKind::Version,
            QtcError::CryptoProvider { .. } | QtcError::Io(_) => ErrorKind::CryptoProvider,
            QtcError::State(_) => ErrorKind::State,
        }
    }

    /// Returns true if this error is recoverable (can retry).
    ///
    /// Key generation is not expected to fail transiently, so nothing is.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Returns true if the caller supplied bad input (text or byte lengths).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Format | ErrorKind::Length | ErrorKind::Checksum | ErrorKind::Version
        )
    }

    /// Returns true if this is a provider failure.
    pub fn is_provider_error(&self) -> bool {
        self.kind() == ErrorKind::CryptoProvider
    }
}
