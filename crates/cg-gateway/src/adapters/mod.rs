//! # Adapters Layer
//!
//! Reference implementations of the outbound ports: in-memory collaborators
//! used by the test suite, plus the delay-based security module.

pub mod dispatch;
pub mod security_module;
pub mod vault;

pub use dispatch::{AckRecord, GreetingHandler, InMemoryDispatcher, RecordingAckSink};
pub use security_module::{DelayAsm, NoopAsm};
pub use vault::InMemoryVault;
