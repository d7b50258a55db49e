//! Assembler configuration.

use serde::{Deserialize, Serialize};

use qtc_core::constants::{
    DEFAULT_ACCOUNT, DEFAULT_CHANGE, DEFAULT_HD_ADDRESS_COUNT, DEFAULT_PURPOSE,
};
use qtc_core::error::{QtcError, Result};
use qtc_core::types::{HdPath, WalletMethod};

/// Configuration for wallet assembly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblerConfig {
    /// Number of addresses to derive. `None` uses the method default
    /// (1, or 5 for multi-address methods).
    pub address_count: Option<u32>,
    /// Purpose level of every derived path
    pub purpose: u32,
    /// Account level of every derived path
    pub account: u32,
    /// Change level of every derived path
    pub change: u32,
    /// Derive addresses on the rayon pool when there is more than one
    pub parallel: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            address_count: None,
            purpose: DEFAULT_PURPOSE,
            account: DEFAULT_ACCOUNT,
            change: DEFAULT_CHANGE,
            parallel: true,
        }
    }
}

impl AssemblerConfig {
    /// Sets the number of addresses.
    pub fn with_address_count(mut self, count: u32) -> Self {
        self.address_count = Some(count);
        self
    }

    /// Sets the purpose/account/change levels.
    pub fn with_chain(mut self, purpose: u32, account: u32, change: u32) -> Self {
        self.purpose = purpose;
        self.account = account;
        self.change = change;
        self
    }

    /// Enables or disables parallel derivation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resolves the address count for `method`.
    ///
    /// # Errors
    /// Returns a state error for a count of zero, or for more than one
    /// address on a single-address method.
    pub fn address_count_for(&self, method: WalletMethod) -> Result<u32> {
        let multi = method.spec().multi_address;
        let count = match self.address_count {
            Some(count) => count,
            None if multi => DEFAULT_HD_ADDRESS_COUNT,
            None => 1,
        };

        if count == 0 {
            return Err(QtcError::state("address count must be at least 1"));
        }
        if count > 1 && !multi {
            return Err(QtcError::state(format!(
                "method {method} derives a single address, {count} requested"
            )));
        }
        Ok(count)
    }

    /// Path of address `index` on the configured chain.
    pub fn path(&self, index: u32) -> HdPath {
        HdPath::new(self.purpose, self.account, self.change, index)
    }
}
