//! Endpoint configuration.

use serde::{Deserialize, Serialize};

/// Default inbound size limit: 64 KiB.
pub const DEFAULT_MAX_RECORD_BYTES: usize = 64 * 1024;

/// Configuration for a [`PacketEndpoint`](crate::PacketEndpoint).
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Largest inbound payload, in bytes, the endpoint will parse.
    /// `0` disables the check.
    pub max_record_bytes: usize,
}

impl EndpointConfig {
    /// Returns `Some(limit)` if inbound payloads are size-checked.
    pub fn record_limit(&self) -> Option<usize> {
        (self.max_record_bytes > 0).then_some(self.max_record_bytes)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            max_record_bytes: DEFAULT_MAX_RECORD_BYTES,
        }
    }
}
