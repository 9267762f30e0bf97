//! # Domain Entities
//!
//! Request payloads, dispatch outcomes and the event records appended by
//! every authorized state transition. Field order on the event types is load
//! bearing: off-chain relayers consume these records positionally.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Bytes, ChainId, U256};

/// Inbound message-execution request relayed from the bridge (`iReceive`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundRequest {
    /// Amount to release toward `route_recipient` before dispatch (0 = none)
    pub route_amount: U256,
    /// Bridge-wide identifier of this request; replay-protected
    pub request_identifier: U256,
    /// Timestamp assigned when the request entered the bridge
    pub request_timestamp: U256,
    /// Chain the request originated on
    pub src_chain_id: ChainId,
    /// Recipient of the routed amount on this chain
    pub route_recipient: Address,
    /// Chain the request is destined for (this chain)
    pub dest_chain_id: ChainId,
    /// Additional security module to consult; zero address = none
    pub asm_address: Address,
    /// Originating sender in the source chain's address format
    pub request_sender: String,
    /// Contract that receives the packet on this chain
    pub handler_address: Address,
    /// Opaque payload forwarded to the handler
    pub packet: Bytes,
    /// Dispatch through the non-mutating call path
    pub is_read_call: bool,
}

/// Acknowledgement of a previously sent outbound message (`iAck`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckRequest {
    /// Identifier of the outbound request being acknowledged
    pub request_identifier: U256,
    /// Identifier assigned to the acknowledgement itself
    pub ack_request_identifier: U256,
    /// Chain the acknowledged request executed on
    pub dest_chain_id: ChainId,
    /// Local contract that originated the outbound request
    pub request_sender: Address,
    /// Execution payload returned by the destination
    pub exec_data: Bytes,
    /// Whether the destination reported successful execution
    pub exec_flag: bool,
}

/// Locally originated outbound request (`iSend`). Not quorum-gated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundRequest {
    /// Protocol version understood by the destination
    pub version: U256,
    /// Amount to lock in the vault (0 = pure message)
    pub route_amount: U256,
    /// Recipient on the destination chain, in its address format
    pub route_recipient: String,
    /// Destination chain
    pub dest_chain_id: ChainId,
    /// Relayer instructions (gas limits, ack type, …); opaque here
    pub request_metadata: Bytes,
    /// Opaque payload for the destination contract
    pub request_packet: Bytes,
}

/// Result of a synchronous call into a downstream collaborator.
///
/// Failure is data, not an error: dispatch outcomes are reported through the
/// emitted event and never unwind an already-granted authorization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Whether the callee completed without reverting
    pub success: bool,
    /// Return payload on success, failure payload otherwise
    pub return_data: Bytes,
}

impl DispatchOutcome {
    /// Successful call with a return payload.
    pub fn ok(return_data: impl Into<Bytes>) -> Self {
        Self {
            success: true,
            return_data: return_data.into(),
        }
    }

    /// Failed call with a failure payload.
    pub fn reverted(failure_data: impl Into<Bytes>) -> Self {
        Self {
            success: false,
            return_data: failure_data.into(),
        }
    }
}

// =============================================================================
// Event records
// =============================================================================

/// Emitted whenever the trusted validator set changes (including genesis).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValsetUpdatedEvent {
    pub valset_nonce: u64,
    pub event_nonce: u64,
    pub chain_id: ChainId,
    pub validators: Vec<Address>,
    pub powers: Vec<u64>,
}

/// Emitted for every authorized inbound request, successful dispatch or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IReceiveEvent {
    pub request_identifier: U256,
    pub event_nonce: u64,
    pub src_chain_id: ChainId,
    pub dest_chain_id: ChainId,
    pub relayer_address: String,
    pub request_sender: String,
    pub exec_data: Bytes,
    pub success: bool,
}

/// Emitted for every authorized acknowledgement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IAckEvent {
    pub event_nonce: u64,
    pub request_identifier: U256,
    pub relayer_address: String,
    pub dest_chain_id: ChainId,
    pub exec_data: Bytes,
    pub success: bool,
}

/// Emitted for every outbound request accepted by `iSend`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ISendEvent {
    pub version: U256,
    pub route_amount: U256,
    pub event_nonce: u64,
    pub sender: Address,
    pub src_chain_id: ChainId,
    pub dest_chain_id: ChainId,
    pub route_recipient: String,
    pub request_metadata: Bytes,
    pub request_packet: Bytes,
}

/// Union of all event records, in the order they were appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayEvent {
    ValsetUpdated(ValsetUpdatedEvent),
    IReceive(IReceiveEvent),
    IAck(IAckEvent),
    ISend(ISendEvent),
}

impl GatewayEvent {
    /// The sequence number this record was appended under.
    pub fn event_nonce(&self) -> u64 {
        match self {
            GatewayEvent::ValsetUpdated(e) => e.event_nonce,
            GatewayEvent::IReceive(e) => e.event_nonce,
            GatewayEvent::IAck(e) => e.event_nonce,
            GatewayEvent::ISend(e) => e.event_nonce,
        }
    }
}

impl From<ValsetUpdatedEvent> for GatewayEvent {
    fn from(e: ValsetUpdatedEvent) -> Self {
        GatewayEvent::ValsetUpdated(e)
    }
}

impl From<IReceiveEvent> for GatewayEvent {
    fn from(e: IReceiveEvent) -> Self {
        GatewayEvent::IReceive(e)
    }
}

impl From<IAckEvent> for GatewayEvent {
    fn from(e: IAckEvent) -> Self {
        GatewayEvent::IAck(e)
    }
}

impl From<ISendEvent> for GatewayEvent {
    fn from(e: ISendEvent) -> Self {
        GatewayEvent::ISend(e)
    }
}
