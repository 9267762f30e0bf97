//! # Shared Types Crate
//!
//! Canonical primitive types shared across the CrossGate workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: chain identifiers and EVM-compatible
//!   primitives are defined (or canonically re-exported) here.
//! - **Wire fidelity**: `Address`/`B256`/`U256`/`Bytes` come from
//!   `alloy-primitives` so that every hash and ABI encoding in the workspace
//!   is byte-compatible with EVM counterparts.

pub mod chain;
pub mod encoding;

pub use chain::ChainId;
pub use encoding::short_hex;

// Canonical EVM-compatible primitives used across the workspace.
pub use alloy_primitives::{Address, Bytes, B256, U256};
