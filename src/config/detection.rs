//! Detection configuration section.

use serde::{Deserialize, Serialize};

/// Detection configuration section
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DetectionSection {
    /// Require both endpoints of a winning segment inside the search region
    #[serde(default)]
    pub require_endpoint_in_roi: bool,
}
