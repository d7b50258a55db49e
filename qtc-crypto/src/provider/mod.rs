//! [`CryptoProvider`] implementations.
//!
//! - [`NativeProvider`]: in-process RustCrypto binding
//! - [`ProcessProvider`]: bridge to the `qtc-provider` helper binary
//!
//! Callers depend on the trait; [`ProviderKind::build`] picks the transport.

mod native;
mod process;
pub mod protocol;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use qtc_core::error::{QtcError, Result};
use qtc_core::traits::CryptoProvider;

pub use native::NativeProvider;
pub use process::ProcessProvider;

/// Which provider transport to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// In-process binding
    #[default]
    Native,
    /// Out-of-process helper
    Process,
}

impl ProviderKind {
    /// Builds a boxed provider of this kind.
    ///
    /// # Errors
    /// Returns a state error if `Process` is requested without a helper path.
    pub fn build(self, helper: Option<PathBuf>) -> Result<Box<dyn CryptoProvider>> {
        match self {
            ProviderKind::Native => Ok(Box::new(NativeProvider::new())),
            ProviderKind::Process => {
                let helper = helper.ok_or_else(|| {
                    QtcError::state("the process provider needs a helper binary path")
                })?;
                Ok(Box::new(ProcessProvider::new(helper)))
            }
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Native => f.write_str("native"),
            ProviderKind::Process => f.write_str("process"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = QtcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "native" => Ok(ProviderKind::Native),
            "process" => Ok(ProviderKind::Process),
            other => Err(QtcError::format(format!(
                "unknown provider '{other}' (expected native or process)"
            ))),
        }
    }
}
