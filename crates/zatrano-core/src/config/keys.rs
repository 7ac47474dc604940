//! Invitation key generation configuration.

use serde::{Deserialize, Serialize};

/// Settings for the collision-retry invitation key generator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KeyConfig {
    /// Number of alphanumeric characters per key.
    #[serde(default = "default_length")]
    pub length: usize,
    /// Candidates tried before giving up with `KeyExhausted`.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            length: default_length(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_length() -> usize {
    11
}

fn default_max_attempts() -> u32 {
    16
}
