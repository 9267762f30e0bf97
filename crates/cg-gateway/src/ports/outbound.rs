//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the engine drives once a call is authorized. All of them are
//! synchronous: the engine runs each entry point to completion with no
//! suspension point, capturing collaborator results immediately.

use crate::domain::entities::DispatchOutcome;
use shared_types::{Address, Bytes, ChainId, U256};
use std::time::Duration;
use thiserror::Error;

/// Error from vault operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VaultError {
    /// The owner's balance cannot cover the requested lock
    #[error("insufficient funds: have {available}, need {required}")]
    InsufficientFunds {
        /// Balance available to the owner
        available: U256,
        /// Amount the transfer needed
        required: U256,
    },

    /// The vault's reserve cannot cover the requested release
    #[error("insufficient reserve: have {available}, need {required}")]
    InsufficientReserve {
        /// Reserve currently held by the vault
        available: U256,
        /// Amount the release needed
        required: U256,
    },

    /// Any other custody failure
    #[error("transfer failed: {0}")]
    TransferFailed(String),
}

/// Dispatch of authorized packets into destination contracts.
///
/// Failure is reported, never propagated: a reverting handler yields a
/// [`DispatchOutcome`] with `success = false` and the failure payload, and
/// the engine records that outcome in the emitted event.
pub trait HandlerDispatcher: Send + Sync {
    /// Invoke `handler` with `packet`, allowing state mutation.
    fn call(&self, handler: Address, packet: &Bytes) -> DispatchOutcome;

    /// Invoke `handler` with `packet` through the non-mutating call path.
    fn static_call(&self, handler: Address, packet: &Bytes) -> DispatchOutcome;
}

/// Token custody. Internals (roles, minting, approvals) live behind this
/// port; the engine only decides *whether* funds move.
pub trait VaultGateway: Send + Sync {
    /// Release `amount` toward `recipient` after an authorized inbound
    /// request.
    fn transfer_in(&self, amount: U256, recipient: Address) -> Result<(), VaultError>;

    /// Lock `amount` from `owner` for an outbound request.
    fn transfer_out(&self, amount: U256, owner: Address) -> Result<(), VaultError>;
}

/// Context handed to a security module for its go/no-go decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsmContext {
    /// Identifier of the inbound request under review
    pub request_identifier: U256,
    /// Timestamp the request entered the bridge
    pub request_timestamp: U256,
    /// Chain the request originated on
    pub src_chain_id: ChainId,
    /// Originating sender in the source chain's address format
    pub request_sender: String,
}

/// Verdict of an additional security module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AsmVerdict {
    /// Execute now
    Allow,
    /// Resubmit later; transient, consumes no event nonce
    Delay {
        /// Suggested wait before resubmission, when the module knows it
        retry_after: Option<Duration>,
    },
    /// Veto; fatal to the request
    Deny,
}

/// Pluggable per-route security layer consulted before inbound dispatch.
pub trait SecurityModuleGateway: Send + Sync {
    /// Decide whether the request addressed to `asm_address` may execute.
    fn should_execute(&self, asm_address: Address, context: &AsmContext) -> AsmVerdict;
}

/// Optional acknowledgement-receiving capability of a sender contract.
pub trait AckSink: Send + Sync {
    /// Forward an acknowledgement to the contract that originated the
    /// request. A sender without the capability should report a successful
    /// no-op with an empty payload.
    fn on_ack(
        &self,
        request_sender: Address,
        request_identifier: U256,
        exec_data: &Bytes,
        exec_flag: bool,
    ) -> DispatchOutcome;
}
