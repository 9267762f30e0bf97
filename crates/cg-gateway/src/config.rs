//! Gateway configuration.
//!
//! Deployment-time parameters: the chain's id inside the bridge namespace,
//! the outbound bridge fee, and the genesis validator set. Loaded from JSON
//! by the host process and applied in one shot with
//! [`GatewayService::bootstrap`].

use crate::domain::entities::ValsetUpdatedEvent;
use crate::domain::errors::GatewayError;
use crate::ports::inbound::GatewayApi;
use crate::service::GatewayService;
use serde::{Deserialize, Serialize};
use shared_types::{Address, ChainId, U256};

/// Deployment parameters for one chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// This chain's id within the bridge's namespace
    pub chain_id: ChainId,
    /// Fee demanded from outbound requests
    #[serde(default)]
    pub bridge_fee: U256,
    /// Genesis validator addresses
    pub validators: Vec<Address>,
    /// Genesis voting powers, index-aligned with `validators`
    pub powers: Vec<u64>,
    /// Version nonce of the genesis set
    #[serde(default)]
    pub valset_nonce: u64,
}

impl GatewayConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl GatewayService {
    /// Initialize the engine from a parsed configuration.
    pub fn bootstrap(&self, config: GatewayConfig) -> Result<ValsetUpdatedEvent, GatewayError> {
        let event = self.initialize(
            config.chain_id,
            config.validators,
            config.powers,
            config.valset_nonce,
        )?;
        if !config.bridge_fee.is_zero() {
            self.set_bridge_fee(config.bridge_fee)?;
        }
        Ok(event)
    }
}
