//! # Gateway Service
//!
//! Application service implementing [`GatewayApi`]: the single-writer engine
//! that authorizes every entry point with the same shape — build canonical
//! digest, verify quorum, check replay, apply effect, emit event.
//!
//! ## Execution model
//!
//! All per-chain state sits behind one mutex and every entry point runs to
//! completion while holding it, so calls are linearized: event nonces are
//! gapless and the checkpoint can never be observed mid-update. Collaborator
//! calls (handler, vault, security module, ack sink) happen synchronously
//! inside the critical section; a handler cannot re-enter the engine from
//! the same call, and replay marking happens before dispatch so a reentrant
//! path could not replay the same identifier anyway.
//!
//! ## Failure semantics
//!
//! Authorization failures abort with no state mutation. Dispatch failures
//! after authorization do not: the event nonce stays consumed and the event
//! reports `success = false`, so a misbehaving downstream handler can block
//! neither the nonce sequence nor the relayer.

use crate::domain::digest;
use crate::domain::entities::{
    AckRequest, DispatchOutcome, GatewayEvent, IAckEvent, IReceiveEvent, ISendEvent,
    InboundRequest, OutboundRequest, ValsetUpdatedEvent,
};
use crate::domain::errors::GatewayError;
use crate::domain::quorum;
use crate::domain::{RecoverableSignature, ValidatorSet, ValsetRegistry};
use crate::ports::inbound::GatewayApi;
use crate::ports::outbound::{
    AckSink, AsmContext, AsmVerdict, HandlerDispatcher, SecurityModuleGateway, VaultGateway,
};
use alloy_sol_types::SolValue;
use parking_lot::Mutex;
use shared_types::{short_hex, Address, Bytes, ChainId, B256, U256};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Per-chain mutable state. One instance per deployment, created by
/// `initialize` and owned exclusively by the service's mutex.
#[derive(Debug, Default)]
struct GatewayState {
    initialized: bool,
    chain_id: ChainId,
    registry: Option<ValsetRegistry>,
    event_nonce: u64,
    processed_inbound: HashSet<U256>,
    processed_acks: HashSet<U256>,
    bridge_fee: U256,
    vault_address: Option<Address>,
    events: Vec<GatewayEvent>,
}

impl GatewayState {
    fn registry(&self) -> Result<&ValsetRegistry, GatewayError> {
        self.registry.as_ref().ok_or(GatewayError::NotInitialized)
    }

    fn next_event_nonce(&mut self) -> u64 {
        self.event_nonce += 1;
        self.event_nonce
    }
}

/// The message-authorization engine for one chain deployment.
pub struct GatewayService {
    state: Mutex<GatewayState>,
    dispatcher: Arc<dyn HandlerDispatcher>,
    vault: Arc<dyn VaultGateway>,
    security: Arc<dyn SecurityModuleGateway>,
    ack_sink: Arc<dyn AckSink>,
}

impl GatewayService {
    /// Create an engine wired to its collaborators. State starts
    /// uninitialized: `chain_id()` reads empty and the checkpoint is zero
    /// until `initialize` succeeds.
    pub fn new(
        dispatcher: Arc<dyn HandlerDispatcher>,
        vault: Arc<dyn VaultGateway>,
        security: Arc<dyn SecurityModuleGateway>,
        ack_sink: Arc<dyn AckSink>,
    ) -> Self {
        Self {
            state: Mutex::new(GatewayState::default()),
            dispatcher,
            vault,
            security,
            ack_sink,
        }
    }

    /// Consult the security module configured for `asm_address`, if any.
    fn check_security_module(
        &self,
        request: &InboundRequest,
    ) -> Result<(), GatewayError> {
        if request.asm_address == Address::ZERO {
            return Ok(());
        }
        let context = AsmContext {
            request_identifier: request.request_identifier,
            request_timestamp: request.request_timestamp,
            src_chain_id: request.src_chain_id.clone(),
            request_sender: request.request_sender.clone(),
        };
        match self.security.should_execute(request.asm_address, &context) {
            AsmVerdict::Allow => Ok(()),
            AsmVerdict::Delay { retry_after } => {
                Err(GatewayError::ExecutionDelayed { retry_after })
            }
            AsmVerdict::Deny => Err(GatewayError::AsmRejected),
        }
    }
}

impl GatewayApi for GatewayService {
    fn initialize(
        &self,
        chain_id: ChainId,
        validators: Vec<Address>,
        powers: Vec<u64>,
        valset_nonce: u64,
    ) -> Result<ValsetUpdatedEvent, GatewayError> {
        let mut state = self.state.lock();
        if state.initialized {
            return Err(GatewayError::AlreadyInitialized);
        }

        let set = ValidatorSet::new(validators, powers, valset_nonce);
        let registry = ValsetRegistry::new(set)?;

        state.chain_id = chain_id.clone();
        state.initialized = true;
        let event_nonce = state.next_event_nonce();

        let current = registry.current();
        let event = ValsetUpdatedEvent {
            valset_nonce,
            event_nonce,
            chain_id,
            validators: current.validators.clone(),
            powers: current.powers.clone(),
        };
        info!(
            chain_id = %event.chain_id,
            valset_nonce,
            checkpoint = %short_hex(registry.checkpoint()),
            "[cg-gateway] initialized"
        );
        state.registry = Some(registry);
        state.events.push(event.clone().into());
        Ok(event)
    }

    fn i_receive(
        &self,
        valset: ValidatorSet,
        signatures: Vec<RecoverableSignature>,
        request: InboundRequest,
        relayer_address: String,
    ) -> Result<IReceiveEvent, GatewayError> {
        let mut state = self.state.lock();
        let registry = state.registry()?;

        let message_digest = digest::i_receive_digest(&request);
        quorum::verify_quorum(
            &message_digest,
            &signatures,
            &valset,
            &registry.checkpoint(),
        )?;

        if state.processed_inbound.contains(&request.request_identifier) {
            return Err(GatewayError::DuplicateRequest);
        }

        self.check_security_module(&request)?;

        if !request.route_amount.is_zero() {
            if state.vault_address.is_none() {
                return Err(GatewayError::VaultFailure("vault not configured".into()));
            }
            self.vault
                .transfer_in(request.route_amount, request.route_recipient)
                .map_err(|e| GatewayError::VaultFailure(e.to_string()))?;
        }

        // Authorization is final from here: mark the request processed and
        // consume the nonce before dispatch so the outcome below cannot
        // unwind it.
        state.processed_inbound.insert(request.request_identifier);
        let event_nonce = state.next_event_nonce();

        let outcome = if request.is_read_call {
            self.dispatcher
                .static_call(request.handler_address, &request.packet)
        } else {
            self.dispatcher.call(request.handler_address, &request.packet)
        };

        // Mutating dispatch returns are re-wrapped as ABI `bytes`; read-call
        // returns and failure payloads pass through raw.
        let exec_data = if outcome.success && !request.is_read_call {
            Bytes::from(outcome.return_data.abi_encode())
        } else {
            outcome.return_data
        };

        if !outcome.success {
            warn!(
                request_identifier = %request.request_identifier,
                handler = %request.handler_address,
                "[cg-gateway] inbound dispatch failed; authorization stands"
            );
        }

        let event = IReceiveEvent {
            request_identifier: request.request_identifier,
            event_nonce,
            src_chain_id: request.src_chain_id,
            dest_chain_id: request.dest_chain_id,
            relayer_address,
            request_sender: request.request_sender,
            exec_data,
            success: outcome.success,
        };
        info!(
            request_identifier = %event.request_identifier,
            event_nonce,
            success = event.success,
            "[cg-gateway] iReceive executed"
        );
        state.events.push(event.clone().into());
        Ok(event)
    }

    fn i_ack(
        &self,
        valset: ValidatorSet,
        signatures: Vec<RecoverableSignature>,
        ack: AckRequest,
        relayer_address: String,
    ) -> Result<IAckEvent, GatewayError> {
        let mut state = self.state.lock();
        let registry = state.registry()?;

        let message_digest = digest::i_ack_digest(&state.chain_id, &ack);
        quorum::verify_quorum(
            &message_digest,
            &signatures,
            &valset,
            &registry.checkpoint(),
        )?;

        if state.processed_acks.contains(&ack.request_identifier) {
            return Err(GatewayError::DuplicateRequest);
        }

        state.processed_acks.insert(ack.request_identifier);
        let event_nonce = state.next_event_nonce();

        let outcome: DispatchOutcome = self.ack_sink.on_ack(
            ack.request_sender,
            ack.request_identifier,
            &ack.exec_data,
            ack.exec_flag,
        );

        if !outcome.success {
            warn!(
                request_identifier = %ack.request_identifier,
                sender = %ack.request_sender,
                "[cg-gateway] ack forwarding failed; authorization stands"
            );
        }

        let event = IAckEvent {
            event_nonce,
            request_identifier: ack.request_identifier,
            relayer_address,
            dest_chain_id: state.chain_id.clone(),
            exec_data: outcome.return_data,
            success: outcome.success,
        };
        info!(
            request_identifier = %event.request_identifier,
            event_nonce,
            success = event.success,
            "[cg-gateway] iAck executed"
        );
        state.events.push(event.clone().into());
        Ok(event)
    }

    fn update_valset(
        &self,
        new_valset: ValidatorSet,
        current_valset: ValidatorSet,
        signatures: Vec<RecoverableSignature>,
    ) -> Result<ValsetUpdatedEvent, GatewayError> {
        let mut state = self.state.lock();
        let registry = state.registry.as_mut().ok_or(GatewayError::NotInitialized)?;
        let expected_checkpoint = registry.checkpoint();
        let current_nonce = registry.current().valset_nonce;

        // The checkpoint of the proposed set doubles as the signed digest;
        // quorum is measured against the outgoing set.
        let message_digest = digest::checkpoint_digest(&new_valset);
        quorum::verify_quorum(
            &message_digest,
            &signatures,
            &current_valset,
            &expected_checkpoint,
        )?;

        if new_valset.valset_nonce <= current_nonce {
            return Err(GatewayError::InvalidValsetNonce {
                new: new_valset.valset_nonce,
                current: current_nonce,
            });
        }
        new_valset.validate()?;

        registry.replace(new_valset.clone());
        let event_nonce = state.next_event_nonce();

        let event = ValsetUpdatedEvent {
            valset_nonce: new_valset.valset_nonce,
            event_nonce,
            chain_id: state.chain_id.clone(),
            validators: new_valset.validators,
            powers: new_valset.powers,
        };
        info!(
            valset_nonce = event.valset_nonce,
            event_nonce,
            checkpoint = %short_hex(message_digest),
            "[cg-gateway] valset updated"
        );
        state.events.push(event.clone().into());
        Ok(event)
    }

    fn i_send(
        &self,
        request: OutboundRequest,
        sender: Address,
        fee_paid: U256,
    ) -> Result<ISendEvent, GatewayError> {
        let mut state = self.state.lock();
        if !state.initialized {
            return Err(GatewayError::NotInitialized);
        }

        if fee_paid < state.bridge_fee {
            return Err(GatewayError::InsufficientFee);
        }

        if !request.route_amount.is_zero() {
            if state.vault_address.is_none() {
                return Err(GatewayError::VaultFailure("vault not configured".into()));
            }
            self.vault
                .transfer_out(request.route_amount, sender)
                .map_err(|e| GatewayError::VaultFailure(e.to_string()))?;
        }

        let event_nonce = state.next_event_nonce();
        let event = ISendEvent {
            version: request.version,
            route_amount: request.route_amount,
            event_nonce,
            sender,
            src_chain_id: state.chain_id.clone(),
            dest_chain_id: request.dest_chain_id,
            route_recipient: request.route_recipient,
            request_metadata: request.request_metadata,
            request_packet: request.request_packet,
        };
        info!(
            event_nonce,
            sender = %sender,
            dest_chain_id = %event.dest_chain_id,
            "[cg-gateway] iSend accepted"
        );
        state.events.push(event.clone().into());
        Ok(event)
    }

    fn set_vault_address(&self, vault: Address) -> Result<(), GatewayError> {
        let mut state = self.state.lock();
        if !state.initialized {
            return Err(GatewayError::NotInitialized);
        }
        state.vault_address = Some(vault);
        Ok(())
    }

    fn set_bridge_fee(&self, fee: U256) -> Result<(), GatewayError> {
        let mut state = self.state.lock();
        if !state.initialized {
            return Err(GatewayError::NotInitialized);
        }
        state.bridge_fee = fee;
        Ok(())
    }

    fn chain_id(&self) -> ChainId {
        self.state.lock().chain_id.clone()
    }

    fn event_nonce(&self) -> u64 {
        self.state.lock().event_nonce
    }

    fn last_valset_checkpoint(&self) -> B256 {
        self.state
            .lock()
            .registry
            .as_ref()
            .map(|r| r.checkpoint())
            .unwrap_or(B256::ZERO)
    }

    fn current_valset(&self) -> Option<ValidatorSet> {
        self.state
            .lock()
            .registry
            .as_ref()
            .map(|r| r.current().clone())
    }

    fn events(&self) -> Vec<GatewayEvent> {
        self.state.lock().events.clone()
    }
}
