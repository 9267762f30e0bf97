//! # Validator sets and the checkpoint registry
//!
//! A `ValidatorSet` is the weighted list of identities trusted to attest
//! messages, versioned by a strictly increasing nonce. The registry owns the
//! currently trusted set together with its checkpoint hash so that inbound
//! calls can be matched against it in O(1).

use super::digest;
use super::errors::GatewayError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, B256};

/// The weighted set of identities authorized to attest messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    /// Identity addresses, unique, index-aligned with `powers`
    pub validators: Vec<Address>,
    /// Voting weight of each validator
    pub powers: Vec<u64>,
    /// Version of this set; strictly increasing across updates
    pub valset_nonce: u64,
}

impl ValidatorSet {
    /// Assemble a set. Call [`ValidatorSet::validate`] before trusting it.
    pub fn new(validators: Vec<Address>, powers: Vec<u64>, valset_nonce: u64) -> Self {
        Self {
            validators,
            powers,
            valset_nonce,
        }
    }

    /// Number of validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Sum of all powers. Accumulated in u128 so the sum itself can be
    /// checked against the 64-bit invariant without wrapping.
    pub fn total_power(&self) -> u128 {
        self.powers.iter().map(|&p| p as u128).sum()
    }

    /// Voting power of `address`, if it is a member.
    pub fn power_of(&self, address: &Address) -> Option<u64> {
        self.validators
            .iter()
            .position(|v| v == address)
            .map(|i| self.powers[i])
    }

    /// Structural validation: index alignment, non-empty membership, unique
    /// identities, and a total power that fits in 64 bits.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.validators.len() != self.powers.len() {
            return Err(GatewayError::MalformedValset(
                "validators and powers differ in length",
            ));
        }
        if self.validators.is_empty() {
            return Err(GatewayError::MalformedValset("empty validator set"));
        }
        for (i, v) in self.validators.iter().enumerate() {
            if self.validators[..i].contains(v) {
                return Err(GatewayError::MalformedValset("duplicate validator"));
            }
        }
        if self.total_power() > u64::MAX as u128 {
            return Err(GatewayError::MalformedValset(
                "total power exceeds 64 bits",
            ));
        }
        Ok(())
    }

    /// Deterministic checkpoint hash committing to the full set contents.
    pub fn checkpoint(&self) -> B256 {
        digest::checkpoint_digest(self)
    }
}

/// Owner of the trusted validator set and its cached checkpoint.
///
/// The registry performs no authorization: callers must have already
/// validated a transition under quorum of the previous set before invoking
/// [`ValsetRegistry::replace`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValsetRegistry {
    current: ValidatorSet,
    checkpoint: B256,
}

impl ValsetRegistry {
    /// Install a genesis set after structural validation.
    pub fn new(set: ValidatorSet) -> Result<Self, GatewayError> {
        set.validate()?;
        let checkpoint = set.checkpoint();
        Ok(Self {
            current: set,
            checkpoint,
        })
    }

    /// The trusted set.
    pub fn current(&self) -> &ValidatorSet {
        &self.current
    }

    /// Checkpoint of the trusted set. Always equals
    /// `self.current().checkpoint()`; the cache never diverges because it is
    /// recomputed inside every mutation.
    pub fn checkpoint(&self) -> B256 {
        self.checkpoint
    }

    /// Overwrite the trusted set and recompute the checkpoint.
    pub fn replace(&mut self, new_set: ValidatorSet) {
        self.checkpoint = new_set.checkpoint();
        self.current = new_set;
    }
}
