//! Robot motion models.
//!
//! A motion model owns one robot's state parameterization: how many slots it
//! spans, how a control advances the mean, and the exact transition Jacobian
//! and process-noise block the filter needs for the covariance step.
//!
//! - [`MotionModel`]: The trait every robot parameterization implements
//! - [`MotionStep`]: Transition Jacobian + process noise returned by an advance
//! - [`ConstantVelocity`]: The default 13-slot 3D model (position, quaternion,
//!   linear and angular velocity) driven by velocity impulses

mod constant_velocity;
mod model;

pub use constant_velocity::ConstantVelocity;
pub use model::{MotionModel, MotionStep};
