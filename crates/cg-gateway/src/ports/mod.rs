//! # Ports Layer
//!
//! Trait definitions for the engine's inbound API and its outbound
//! collaborators.

pub mod inbound;
pub mod outbound;

pub use inbound::GatewayApi;
pub use outbound::{
    AckSink, AsmContext, AsmVerdict, HandlerDispatcher, SecurityModuleGateway, VaultError,
    VaultGateway,
};
