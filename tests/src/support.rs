//! Shared fixtures: validator keypairs, digest signing, and a fully wired
//! gateway harness with in-memory collaborators.

use cg_gateway::adapters::{DelayAsm, InMemoryDispatcher, InMemoryVault, RecordingAckSink};
use cg_gateway::domain::ecdsa::{
    address_from_pubkey, eth_signed_digest, invert_s, recover_signer,
};
use cg_gateway::{GatewayApi, GatewayService, RecoverableSignature, ValidatorSet};
use k256::ecdsa::SigningKey;
use shared_types::{Address, Bytes, ChainId, B256, U256};
use std::sync::Arc;

/// Chain id used by most scenarios.
pub const CHAIN_ID: &str = "1";

/// Relayer identity echoed into events.
pub const RELAYER: &str = "relayer-01";

/// Sender string carried by inbound requests (source-chain address format).
pub const REQUEST_SENDER: &str = "0x00000000000000000000";

/// Full voting power of a single-validator reference deployment.
pub const FULL_POWER: u64 = 4294967295;

/// The delay configured on the harness's security module, in seconds.
pub const ASM_DELAY_SECS: u64 = 3;

/// Timestamp the harness's security-module clock starts at.
pub const START_TIME: u64 = 1_752_503_506;

/// A validator identity with its signing key.
pub struct Validator {
    pub key: SigningKey,
    pub address: Address,
}

impl Validator {
    /// Fresh random validator.
    pub fn random() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = address_from_pubkey(key.verifying_key());
        Self { key, address }
    }

    /// A batch of fresh validators.
    pub fn batch(n: usize) -> Vec<Self> {
        (0..n).map(|_| Self::random()).collect()
    }
}

/// Build the valset these validators form, index-aligned with `powers`.
pub fn valset_of(validators: &[Validator], powers: Vec<u64>, valset_nonce: u64) -> ValidatorSet {
    ValidatorSet::new(
        validators.iter().map(|v| v.address).collect(),
        powers,
        valset_nonce,
    )
}

/// Sign the EIP-191 prefixed form of `digest`, exactly as a validator's
/// attestation tooling would. Self-corrects the recovery id so the returned
/// signature always recovers to the signer.
pub fn sign_digest(digest: &B256, validator: &Validator) -> RecoverableSignature {
    let signed = eth_signed_digest(digest);
    let (sig, recid) = validator
        .key
        .sign_prehash_recoverable(signed.as_slice())
        .expect("signing failed");

    let bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    let candidate = RecoverableSignature {
        r,
        s,
        v: recid.to_byte() + 27,
    };
    if recover_signer(&signed, &candidate) == Some(validator.address) {
        return candidate;
    }
    // High-S output: normalize and flip the recovery id.
    RecoverableSignature {
        r,
        s: invert_s(&s),
        v: if recid.to_byte() == 0 { 28 } else { 27 },
    }
}

/// A deliberately unrecoverable 65-byte signature slot.
pub fn garbage_signature() -> RecoverableSignature {
    RecoverableSignature {
        r: [0u8; 32],
        s: [0u8; 32],
        v: 0,
    }
}

/// Gateway engine wired to in-memory collaborators.
pub struct Harness {
    pub gateway: GatewayService,
    pub dispatcher: Arc<InMemoryDispatcher>,
    pub vault: Arc<InMemoryVault>,
    pub delay_asm: Arc<DelayAsm>,
    pub ack_sink: Arc<RecordingAckSink>,
}

/// Wire a fresh engine. The security module is a [`DelayAsm`] with a
/// 3-second window starting at [`START_TIME`]; requests with a zero ASM
/// address bypass it entirely.
pub fn harness() -> Harness {
    init_tracing();
    let dispatcher = Arc::new(InMemoryDispatcher::new());
    let vault = Arc::new(InMemoryVault::new());
    let delay_asm = Arc::new(DelayAsm::new(ASM_DELAY_SECS, START_TIME));
    let ack_sink = Arc::new(RecordingAckSink::new());
    let gateway = GatewayService::new(
        dispatcher.clone(),
        vault.clone(),
        delay_asm.clone(),
        ack_sink.clone(),
    );
    Harness {
        gateway,
        dispatcher,
        vault,
        delay_asm,
        ack_sink,
    }
}

impl Harness {
    /// Initialize with a single full-power validator and point the engine at
    /// the in-memory vault. Returns the installed valset.
    pub fn init_single(&self, validator: &Validator) -> ValidatorSet {
        let set = ValidatorSet::new(vec![validator.address], vec![FULL_POWER], 1);
        self.gateway
            .initialize(
                ChainId::from(CHAIN_ID),
                set.validators.clone(),
                set.powers.clone(),
                set.valset_nonce,
            )
            .expect("initialization failed");
        self.gateway
            .set_vault_address(Address::repeat_byte(0x7A))
            .expect("set vault failed");
        set
    }
}

/// ABI-encode a string packet the way relayers encode handler payloads.
pub fn string_packet(s: &str) -> Bytes {
    use alloy_sol_types::SolValue;
    Bytes::from(s.to_string().abi_encode())
}

/// Inbound request template: no routed amount, no security module, mutating
/// dispatch. Scenarios override what they exercise.
pub fn inbound_request(handler: Address, request_identifier: u64) -> cg_gateway::InboundRequest {
    cg_gateway::InboundRequest {
        route_amount: U256::ZERO,
        request_identifier: U256::from(request_identifier),
        request_timestamp: U256::from(START_TIME),
        src_chain_id: ChainId::from(CHAIN_ID),
        route_recipient: Address::repeat_byte(0x22),
        dest_chain_id: ChainId::from(CHAIN_ID),
        asm_address: Address::ZERO,
        request_sender: REQUEST_SENDER.to_string(),
        handler_address: handler,
        packet: string_packet("Hello String"),
        is_read_call: false,
    }
}

/// Install a tracing subscriber once, honoring `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
