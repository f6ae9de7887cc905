//! The motion model trait.

use nalgebra::{DMatrix, DVector};

/// Covariance-side outputs of one motion advance.
///
/// Both blocks are square over the robot's own slot range; the transition is
/// identity everywhere else by construction and is never materialized at
/// full state size.
#[derive(Debug, Clone)]
pub struct MotionStep {
    /// Jacobian of the new robot block with respect to the old one.
    pub transition: DMatrix<f64>,
    /// Process-noise covariance accumulated over the step.
    pub noise: DMatrix<f64>,
}

/// A robot state parameterization and its deterministic motion.
///
/// `advance` mutates the robot's slice of the mean vector in place and
/// returns the [`MotionStep`] the filter needs; it never touches the
/// covariance. An instance commits to one parameterization for its lifetime,
/// so `state_size` is fixed.
pub trait MotionModel: std::fmt::Debug + Send {
    /// Number of state slots the robot occupies.
    fn state_size(&self) -> usize;

    /// Number of leading slots that form the robot's pose (frame) part.
    fn pose_size(&self) -> usize;

    /// Length of the control vector `advance` expects.
    fn control_size(&self) -> usize;

    /// Advance `state` by `control` over `dt` seconds.
    ///
    /// `state` must be exactly `state_size` long and `control` exactly
    /// `control_size` long; anything else is a contract violation and
    /// panics.
    fn advance(&self, state: &mut DVector<f64>, control: &DVector<f64>, dt: f64) -> MotionStep;
}
