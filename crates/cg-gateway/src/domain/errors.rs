//! # Domain Errors
//!
//! Error taxonomy for the gateway core. Authorization errors are fatal to the
//! call and leave no state behind; `ExecutionDelayed` is the one transient
//! error a relayer is expected to retry.

use std::time::Duration;
use thiserror::Error;

/// Errors from parsing or recovering a single signature.
///
/// These never surface from quorum verification — a signature that fails any
/// of these checks simply contributes no power — but they are reported
/// individually by the lower-level recovery API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature blob is not exactly 65 bytes (r ‖ s ‖ v)
    #[error("invalid signature length: {0} (expected 65)")]
    InvalidLength(usize),

    /// R or S is outside the valid scalar range [1, n-1]
    #[error("invalid signature format")]
    InvalidFormat,

    /// S is in the upper half of the curve order (EIP-2 malleability)
    #[error("malleable signature (high S value)")]
    MalleableSignature,

    /// Recovery id must be 0, 1, 27 or 28
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery failed
    #[error("failed to recover public key")]
    RecoveryFailed,
}

/// Errors surfaced by the authorized gateway entry points.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The engine was already initialized; initialization is one-shot
    #[error("gateway already initialized")]
    AlreadyInitialized,

    /// An authorized operation was invoked before initialization
    #[error("gateway not initialized")]
    NotInitialized,

    /// The caller-supplied validator set does not hash to the trusted checkpoint
    #[error("supplied valset does not match the last recorded checkpoint")]
    ValsetMismatch,

    /// Cumulative power of recognized signers fell short of the 2/3+1 threshold
    #[error("insufficient signer power: {accumulated} of required {threshold}")]
    InsufficientPower {
        /// Power credited to recognized, non-duplicate signers
        accumulated: u128,
        /// `floor(2 * total_power / 3) + 1`
        threshold: u128,
    },

    /// The request identifier was already executed for this message kind
    #[error("C06")]
    DuplicateRequest,

    /// Fee paid with an outbound request is below the configured bridge fee
    #[error("C03")]
    InsufficientFee,

    /// A valset update must strictly increase the valset nonce
    #[error("invalid valset nonce: {new} must exceed {current}")]
    InvalidValsetNonce {
        /// Nonce of the proposed set
        new: u64,
        /// Nonce of the trusted set
        current: u64,
    },

    /// The validator set is structurally invalid
    #[error("malformed valset: {0}")]
    MalformedValset(&'static str),

    /// The security module asked for the request to be resubmitted later.
    /// Transient: the event nonce is untouched and the relayer may retry.
    #[error("Transaction needs to be delayed")]
    ExecutionDelayed {
        /// Suggested wait before resubmission, when the module knows it
        retry_after: Option<Duration>,
    },

    /// The security module vetoed the request outright
    #[error("security module rejected the request")]
    AsmRejected,

    /// The vault collaborator refused the fund movement
    #[error("vault failure: {0}")]
    VaultFailure(String),
}

impl GatewayError {
    /// Short revert-style code for errors relayers match on, if one exists.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            GatewayError::DuplicateRequest => Some("C06"),
            GatewayError::InsufficientFee => Some("C03"),
            _ => None,
        }
    }

    /// Whether the caller should retry the identical request later.
    pub fn is_transient(&self) -> bool {
        matches!(self, GatewayError::ExecutionDelayed { .. })
    }
}
