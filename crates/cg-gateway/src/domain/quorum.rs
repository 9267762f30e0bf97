//! # Weighted signature quorums
//!
//! Decides whether a digest is sufficiently attested by the trusted validator
//! set. Signatures are matched by recovered address, not position: relayers
//! may submit them in any order, pad batches with garbage, or include
//! signatures from non-members — none of that blocks a quorum, it just
//! contributes no power.

use super::digest;
use super::ecdsa::{self, RecoverableSignature};
use super::errors::GatewayError;
use super::valset::ValidatorSet;
use shared_types::{Address, B256};
use std::collections::HashSet;
use tracing::debug;

/// Minimum cumulative power required to authorize an action:
/// `floor(2 * total_power / 3) + 1`.
pub fn quorum_threshold(total_power: u128) -> u128 {
    total_power * 2 / 3 + 1
}

/// Verify that `signatures` carry quorum power over `digest`.
///
/// `claimed` is the valset the relayer believes is current; it is only
/// trusted after its checkpoint matches `expected_checkpoint` (the registry's
/// cached hash). Signatures are recovered against the EIP-191 prefixed form
/// of `digest`.
///
/// Purely functional: no state is read or written beyond the arguments.
pub fn verify_quorum(
    digest: &B256,
    signatures: &[RecoverableSignature],
    claimed: &ValidatorSet,
    expected_checkpoint: &B256,
) -> Result<(), GatewayError> {
    if digest::checkpoint_digest(claimed) != *expected_checkpoint {
        return Err(GatewayError::ValsetMismatch);
    }

    let total_power = claimed.total_power();
    let threshold = quorum_threshold(total_power);
    let signed = ecdsa::eth_signed_digest(digest);

    let mut accumulated: u128 = 0;
    let mut credited: HashSet<Address> = HashSet::with_capacity(signatures.len());

    for signature in signatures {
        let signer = match ecdsa::recover_signer(&signed, signature) {
            Some(address) => address,
            None => {
                // Skip, don't abort: one bad entry must not block quorum.
                debug!("[cg-gateway] skipping unrecoverable signature");
                continue;
            }
        };

        let Some(power) = claimed.power_of(&signer) else {
            debug!(signer = %signer, "[cg-gateway] signature from non-member, skipping");
            continue;
        };

        // First occurrence wins; duplicates contribute zero.
        if !credited.insert(signer) {
            continue;
        }

        accumulated += power as u128;
        if accumulated >= threshold {
            return Ok(());
        }
    }

    Err(GatewayError::InsufficientPower {
        accumulated,
        threshold,
    })
}

/// Thin stateless façade over [`verify_quorum`] for callers that prefer an
/// object-shaped collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuorumVerifier;

impl QuorumVerifier {
    /// Create a new verifier.
    pub fn new() -> Self {
        Self
    }

    /// See [`verify_quorum`].
    pub fn verify(
        &self,
        digest: &B256,
        signatures: &[RecoverableSignature],
        claimed: &ValidatorSet,
        expected_checkpoint: &B256,
    ) -> Result<(), GatewayError> {
        verify_quorum(digest, signatures, claimed, expected_checkpoint)
    }
}
