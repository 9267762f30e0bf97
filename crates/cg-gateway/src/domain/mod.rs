//! # Domain Layer
//!
//! Pure authorization logic: digests, signature recovery, validator sets and
//! quorum arithmetic. No I/O, no collaborator calls.

pub mod digest;
pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod quorum;
pub mod valset;

pub use ecdsa::RecoverableSignature;
pub use entities::{
    AckRequest, DispatchOutcome, GatewayEvent, IAckEvent, IReceiveEvent, ISendEvent,
    InboundRequest, OutboundRequest, ValsetUpdatedEvent,
};
pub use errors::{GatewayError, SignatureError};
pub use quorum::QuorumVerifier;
pub use valset::{ValidatorSet, ValsetRegistry};
