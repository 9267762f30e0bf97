//! # Inbound Ports (Driving Ports / API)
//!
//! The public surface of the gateway engine. One implementation per chain
//! deployment; callers are the host environment's transaction layer and the
//! relayers it fronts.

use crate::domain::entities::{
    AckRequest, GatewayEvent, IAckEvent, IReceiveEvent, ISendEvent, InboundRequest,
    OutboundRequest, ValsetUpdatedEvent,
};
use crate::domain::errors::GatewayError;
use crate::domain::{RecoverableSignature, ValidatorSet};
use shared_types::{Address, ChainId, B256, U256};

/// Primary gateway API.
///
/// Implementations must be thread-safe (`Send + Sync`) and must linearize
/// state-changing calls: the event-nonce and checkpoint invariants only hold
/// when no two authorized operations interleave.
pub trait GatewayApi: Send + Sync {
    /// One-shot initialization with the genesis validator set.
    ///
    /// Fails with [`GatewayError::AlreadyInitialized`] on any second call,
    /// regardless of arguments. Consumes event nonce 1.
    fn initialize(
        &self,
        chain_id: ChainId,
        validators: Vec<Address>,
        powers: Vec<u64>,
        valset_nonce: u64,
    ) -> Result<ValsetUpdatedEvent, GatewayError>;

    /// Execute a quorum-attested inbound message.
    ///
    /// `valset` is the relayer's claim of the current set; it is checked
    /// against the trusted checkpoint before any signature is recovered.
    fn i_receive(
        &self,
        valset: ValidatorSet,
        signatures: Vec<RecoverableSignature>,
        request: InboundRequest,
        relayer_address: String,
    ) -> Result<IReceiveEvent, GatewayError>;

    /// Process a quorum-attested acknowledgement of an earlier outbound
    /// request.
    fn i_ack(
        &self,
        valset: ValidatorSet,
        signatures: Vec<RecoverableSignature>,
        ack: AckRequest,
        relayer_address: String,
    ) -> Result<IAckEvent, GatewayError>;

    /// Replace the trusted validator set, under quorum of the outgoing set.
    fn update_valset(
        &self,
        new_valset: ValidatorSet,
        current_valset: ValidatorSet,
        signatures: Vec<RecoverableSignature>,
    ) -> Result<ValsetUpdatedEvent, GatewayError>;

    /// Originate an outbound request. Not quorum-gated — it starts locally —
    /// but it shares the event-nonce sequence with the inbound paths.
    fn i_send(
        &self,
        request: OutboundRequest,
        sender: Address,
        fee_paid: U256,
    ) -> Result<ISendEvent, GatewayError>;

    // =========================================================================
    // Administration
    // =========================================================================

    /// Point the engine at the vault responsible for fund movements.
    fn set_vault_address(&self, vault: Address) -> Result<(), GatewayError>;

    /// Set the fee demanded from outbound requests.
    fn set_bridge_fee(&self, fee: U256) -> Result<(), GatewayError>;

    // =========================================================================
    // Read-only state
    // =========================================================================

    /// This chain's id, or the empty id before initialization.
    fn chain_id(&self) -> ChainId;

    /// Last consumed event nonce (0 before the first event).
    fn event_nonce(&self) -> u64;

    /// Checkpoint of the trusted valset, or the zero hash before
    /// initialization.
    fn last_valset_checkpoint(&self) -> B256;

    /// The trusted valset, once initialized.
    fn current_valset(&self) -> Option<ValidatorSet>;

    /// The append-only event record, oldest first.
    fn events(&self) -> Vec<GatewayEvent>;
}
