//! Main TaraConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detect::{LongestSegmentDetector, SegmentExtractor};
use crate::map::StochasticMap;

use super::detection::DetectionSection;
use super::error::ConfigLoadError;
use super::map::MapSection;
use super::motion::MotionSection;

/// Full TaraSLAM configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct TaraConfig {
    /// Map settings
    #[serde(default)]
    pub map: MapSection,

    /// Motion model settings
    #[serde(default)]
    pub motion: MotionSection,

    /// Detection settings
    #[serde(default)]
    pub detection: DetectionSection,
}

impl TaraConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Create the stochastic map sized by the `map` section
    pub fn to_map(&self) -> StochasticMap {
        StochasticMap::new(self.map.max_size)
    }

    /// Wrap an extractor in a detector configured by the `detection` section
    pub fn to_detector<E: SegmentExtractor>(&self, extractor: E) -> LongestSegmentDetector<E> {
        LongestSegmentDetector::new(extractor)
            .with_endpoint_containment(self.detection.require_endpoint_in_roi)
    }
}
