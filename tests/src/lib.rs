//! # CrossGate Test Suite
//!
//! Unified test crate exercising the gateway engine end to end through its
//! public API, the way a relayer and its destination contracts would.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs          # Validator fixtures, signing, harness wiring
//! ├── inbound.rs          # iReceive: happy path, replay, read calls
//! ├── outbound.rs         # iSend fees + dispatch-failure reporting
//! ├── acks.rs             # iAck forwarding and replay protection
//! ├── valset_updates.rs   # updateValset rules and checkpoint rotation
//! ├── multi_validator.rs  # Quorum arithmetic across weighted sets
//! └── security_module.rs  # Delay/veto security module behavior
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cg-tests
//! ```

#![allow(dead_code)]

pub mod support;

mod valset_updates;
