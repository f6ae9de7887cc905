//! Unified configuration loading for TaraSLAM.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tara_slam::config::TaraConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = TaraConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = TaraConfig::default();
//!
//! // Convert to runtime objects
//! let map = config.to_map();
//! let model = config.motion.to_motion_model();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`MapSection`] | State-vector capacity |
//! | [`MotionSection`] | Constant-velocity noise and robot seed uncertainty |
//! | [`DetectionSection`] | Segment detector options |
//!
//! ## Example YAML
//!
//! ```yaml
//! map:
//!   max_size: 300        # state slots
//!
//! motion:
//!   linear_impulse_std: 0.5
//!   angular_impulse_std: 0.35
//!   default_dt: 0.1
//!
//! detection:
//!   require_endpoint_in_roi: false
//! ```

mod defaults;
mod detection;
mod error;
mod map;
mod motion;
mod tara;

// Re-export main types
pub use error::ConfigLoadError;
pub use tara::TaraConfig;

// Re-export section types
pub use detection::DetectionSection;
pub use map::MapSection;
pub use motion::MotionSection;
