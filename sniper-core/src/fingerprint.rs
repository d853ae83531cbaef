//! Configuration fingerprinting — deterministic identification of an engine
//! setup, so two runs can be compared or deduplicated by hash alone.

use crate::engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// BLAKE3 hash of a canonical JSON serialization of [`EngineConfig`].
///
/// Struct fields serialize in declaration order, so the JSON (and therefore
/// the hash) is deterministic for equal configurations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigFingerprint(String);

impl ConfigFingerprint {
    pub fn of(config: &EngineConfig) -> Self {
        // EngineConfig is plain data; serialization cannot fail.
        let json = serde_json::to_string(config).expect("EngineConfig must serialize");
        Self(blake3::hash(json.as_bytes()).to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex chars, for logs and summaries.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for ConfigFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
