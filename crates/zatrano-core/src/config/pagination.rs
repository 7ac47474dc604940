//! List/pagination configuration.

use serde::{Deserialize, Serialize};

use crate::types::pagination::{DEFAULT_PER_PAGE, MAX_PER_PAGE};

/// Page-size bounds applied when normalizing list requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the caller sends none (or a value `<= 0`).
    #[serde(default = "default_per_page")]
    pub default_per_page: u64,
    /// Upper bound for caller-supplied page sizes.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
        }
    }
}

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

fn default_max_per_page() -> u64 {
    MAX_PER_PAGE
}
