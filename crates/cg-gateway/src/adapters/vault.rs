//! In-memory vault adapter.
//!
//! Stands in for the asset-custody contract during tests: a balance table
//! plus a single locked reserve. Production deployments implement
//! [`VaultGateway`] over the real custody layer.

use crate::ports::outbound::{VaultError, VaultGateway};
use parking_lot::RwLock;
use shared_types::{Address, U256};
use std::collections::HashMap;
use tracing::debug;

/// Balance-table vault for testing.
pub struct InMemoryVault {
    balances: RwLock<HashMap<Address, U256>>,
    reserve: RwLock<U256>,
}

impl InMemoryVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self {
            balances: RwLock::new(HashMap::new()),
            reserve: RwLock::new(U256::ZERO),
        }
    }

    /// Credit `owner` with spendable balance.
    pub fn mint(&self, owner: Address, amount: U256) {
        let mut balances = self.balances.write();
        let balance = balances.entry(owner).or_default();
        *balance += amount;
    }

    /// Seed the locked reserve directly (funds bridged in from elsewhere).
    pub fn fund_reserve(&self, amount: U256) {
        *self.reserve.write() += amount;
    }

    /// Spendable balance of `owner`.
    pub fn balance_of(&self, owner: &Address) -> U256 {
        self.balances.read().get(owner).copied().unwrap_or_default()
    }

    /// Currently locked reserve.
    pub fn reserve(&self) -> U256 {
        *self.reserve.read()
    }
}

impl Default for InMemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultGateway for InMemoryVault {
    fn transfer_in(&self, amount: U256, recipient: Address) -> Result<(), VaultError> {
        let mut reserve = self.reserve.write();
        if *reserve < amount {
            return Err(VaultError::InsufficientReserve {
                available: *reserve,
                required: amount,
            });
        }
        *reserve -= amount;

        let mut balances = self.balances.write();
        *balances.entry(recipient).or_default() += amount;

        debug!(amount = %amount, recipient = %recipient, "[cg-gateway] vault release");
        Ok(())
    }

    fn transfer_out(&self, amount: U256, owner: Address) -> Result<(), VaultError> {
        let mut balances = self.balances.write();
        let balance = balances.entry(owner).or_default();
        if *balance < amount {
            return Err(VaultError::InsufficientFunds {
                available: *balance,
                required: amount,
            });
        }
        *balance -= amount;
        drop(balances);

        *self.reserve.write() += amount;

        debug!(amount = %amount, owner = %owner, "[cg-gateway] vault lock");
        Ok(())
    }
}
