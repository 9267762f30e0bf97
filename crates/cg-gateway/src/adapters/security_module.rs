//! Security module adapters.
//!
//! `DelayAsm` reproduces the reference delay module: an inbound request may
//! only execute once its bridge timestamp is older than a configured delay.
//! The clock is injectable so tests can advance time deterministically.

use crate::ports::outbound::{AsmContext, AsmVerdict, SecurityModuleGateway};
use parking_lot::RwLock;
use shared_types::Address;
use std::time::Duration;
use tracing::debug;

/// Permit-all module for deployments without a security layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAsm;

impl SecurityModuleGateway for NoopAsm {
    fn should_execute(&self, _asm_address: Address, _context: &AsmContext) -> AsmVerdict {
        AsmVerdict::Allow
    }
}

/// Delay-based security module.
///
/// Holds every request back until `now > request_timestamp + delay_secs`,
/// giving watchers a window to veto fraudulent relays out of band.
pub struct DelayAsm {
    delay_secs: u64,
    /// Current time in seconds (simulated; production would read a host
    /// clock behind this same lock).
    now: RwLock<u64>,
}

impl DelayAsm {
    /// Create a module with the given delay, starting at `start_time`.
    pub fn new(delay_secs: u64, start_time: u64) -> Self {
        Self {
            delay_secs,
            now: RwLock::new(start_time),
        }
    }

    /// Set current time for testing.
    pub fn set_time(&self, time: u64) {
        *self.now.write() = time;
    }

    /// Advance time for testing.
    pub fn advance_time(&self, secs: u64) {
        *self.now.write() += secs;
    }
}

impl SecurityModuleGateway for DelayAsm {
    fn should_execute(&self, _asm_address: Address, context: &AsmContext) -> AsmVerdict {
        let now = *self.now.read();
        let release = context
            .request_timestamp
            .saturating_to::<u64>()
            .saturating_add(self.delay_secs);

        if now > release {
            AsmVerdict::Allow
        } else {
            debug!(
                request_identifier = %context.request_identifier,
                now,
                release,
                "[cg-gateway] request held back by delay module"
            );
            AsmVerdict::Delay {
                retry_after: Some(Duration::from_secs(release - now + 1)),
            }
        }
    }
}
