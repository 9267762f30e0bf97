//! # CrossGate Gateway Core
//!
//! Message-authorization engine for a cross-chain gateway: decides, per
//! chain, whether a relayed message carries enough validator power to
//! execute, and sequences every authorized state transition behind a single
//! monotonic event nonce.
//!
//! ## Architecture
//!
//! Hexagonal:
//! - **Domain Layer** (`domain/`): digests, signature recovery, validator
//!   sets and quorum arithmetic — pure, no I/O
//! - **Ports Layer** (`ports/`): the inbound [`GatewayApi`] and the outbound
//!   collaborator traits (handler dispatch, vault, security module, ack sink)
//! - **Adapters Layer** (`adapters/`): in-memory reference collaborators and
//!   the delay security module
//! - **Service Layer** (`service.rs`): the single-writer engine wiring the
//!   domain to the ports
//!
//! ## Security Notes
//!
//! - A claimed validator set is only trusted after its checkpoint hash
//!   matches the registry's cache
//! - Signatures are credited by recovered address, once per validator;
//!   malformed entries are skipped, never fatal
//! - Replay marking and nonce consumption happen before dispatch, so a
//!   reentrant handler cannot replay an identifier or fork the sequence

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::GatewayConfig;
pub use domain::{
    AckRequest, DispatchOutcome, GatewayError, GatewayEvent, IAckEvent, IReceiveEvent, ISendEvent,
    InboundRequest, OutboundRequest, QuorumVerifier, RecoverableSignature, SignatureError,
    ValidatorSet, ValsetRegistry, ValsetUpdatedEvent,
};
pub use ports::{GatewayApi, HandlerDispatcher, SecurityModuleGateway, VaultGateway};
pub use service::GatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
