//! Chain identifiers.
//!
//! A chain is addressed by an opaque string id inside the bridge's namespace
//! (e.g. `"1"`, `"80001"`, `"osmosis-1"`). The id carries no structure the
//! gateway relies on; it is only compared for equality and embedded into
//! signed digests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// String identifier of a chain within the bridge's namespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(String);

impl ChainId {
    /// Create a chain id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The uninitialized/empty chain id.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Whether this id is the empty (uninitialized) id.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChainId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ChainId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ChainId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
