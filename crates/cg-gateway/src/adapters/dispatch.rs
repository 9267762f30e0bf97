//! In-memory dispatch adapters.
//!
//! `InMemoryDispatcher` routes authorized packets to registered
//! `GreetingHandler`s — a stand-in for destination contracts that accepts an
//! ABI-encoded string, stores it, and echoes it back. Its failure mode
//! (rejecting the empty string) exercises the engine's report-don't-revert
//! dispatch semantics. `RecordingAckSink` captures forwarded
//! acknowledgements for inspection.

use crate::domain::entities::DispatchOutcome;
use crate::ports::outbound::{AckSink, HandlerDispatcher};
use alloy_sol_types::SolValue;
use parking_lot::RwLock;
use shared_types::{Address, Bytes, U256};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A destination contract that stores a greeting string.
pub struct GreetingHandler {
    owner: Address,
    greeting: RwLock<String>,
}

impl GreetingHandler {
    /// Create a handler owned by `owner`.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            greeting: RwLock::new(String::new()),
        }
    }

    /// The stored greeting.
    pub fn greeting(&self) -> String {
        self.greeting.read().clone()
    }

    /// The owner address reported by the read path.
    pub fn owner(&self) -> Address {
        self.owner
    }

    fn handle(&self, packet: &Bytes) -> DispatchOutcome {
        let greeting = match String::abi_decode(packet, true) {
            Ok(s) => s,
            Err(_) => {
                return DispatchOutcome::reverted(Bytes::from(
                    "malformed packet".to_string().abi_encode(),
                ))
            }
        };
        if greeting.is_empty() {
            return DispatchOutcome::reverted(Bytes::from(
                "please provide non-empty string".to_string().abi_encode(),
            ));
        }
        *self.greeting.write() = greeting.clone();
        DispatchOutcome::ok(Bytes::from(greeting.abi_encode()))
    }

    fn read(&self) -> DispatchOutcome {
        DispatchOutcome::ok(Bytes::from(self.owner.abi_encode()))
    }
}

/// Address-keyed handler table.
pub struct InMemoryDispatcher {
    handlers: RwLock<HashMap<Address, Arc<GreetingHandler>>>,
}

impl InMemoryDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler under `address`.
    pub fn register(&self, address: Address, handler: Arc<GreetingHandler>) {
        self.handlers.write().insert(address, handler);
    }
}

impl Default for InMemoryDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerDispatcher for InMemoryDispatcher {
    fn call(&self, handler: Address, packet: &Bytes) -> DispatchOutcome {
        let Some(target) = self.handlers.read().get(&handler).cloned() else {
            debug!(handler = %handler, "[cg-gateway] dispatch to unknown handler");
            return DispatchOutcome::reverted(Bytes::from(
                "unknown handler".to_string().abi_encode(),
            ));
        };
        target.handle(packet)
    }

    fn static_call(&self, handler: Address, _packet: &Bytes) -> DispatchOutcome {
        let Some(target) = self.handlers.read().get(&handler).cloned() else {
            return DispatchOutcome::reverted(Bytes::from(
                "unknown handler".to_string().abi_encode(),
            ));
        };
        target.read()
    }
}

/// One forwarded acknowledgement, as seen by the sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AckRecord {
    pub request_sender: Address,
    pub request_identifier: U256,
    pub exec_data: Bytes,
    pub exec_flag: bool,
}

/// Ack sink that records every forwarded acknowledgement.
#[derive(Default)]
pub struct RecordingAckSink {
    received: RwLock<Vec<AckRecord>>,
}

impl RecordingAckSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acknowledgements forwarded so far, oldest first.
    pub fn received(&self) -> Vec<AckRecord> {
        self.received.read().clone()
    }
}

impl AckSink for RecordingAckSink {
    fn on_ack(
        &self,
        request_sender: Address,
        request_identifier: U256,
        exec_data: &Bytes,
        exec_flag: bool,
    ) -> DispatchOutcome {
        self.received.write().push(AckRecord {
            request_sender,
            request_identifier,
            exec_data: exec_data.clone(),
            exec_flag,
        });
        // The reference sender contracts return nothing from their ack
        // entry point; an empty payload mirrors that.
        DispatchOutcome::ok(Bytes::new())
    }
}
