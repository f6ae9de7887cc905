//! Map configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Map configuration section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapSection {
    /// Total state-vector capacity in slots
    #[serde(default = "defaults::max_size")]
    pub max_size: usize,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            max_size: defaults::max_size(),
        }
    }
}
