//! Motion configuration section.

use nalgebra::DVector;

use serde::{Deserialize, Serialize};

use crate::core::frame;
use crate::motion::ConstantVelocity;

use super::defaults;

/// Motion configuration section
///
/// Noise magnitudes for the constant-velocity robot model and the seed
/// uncertainty of a freshly created robot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MotionSection {
    /// Linear velocity impulse noise (m/s per √s)
    #[serde(default = "defaults::linear_impulse_std")]
    pub linear_impulse_std: f64,

    /// Angular velocity impulse noise (rad/s per √s)
    #[serde(default = "defaults::angular_impulse_std")]
    pub angular_impulse_std: f64,

    /// Default step duration in seconds
    #[serde(default = "defaults::default_dt")]
    pub default_dt: f64,

    /// Initial position uncertainty (m); zero anchors the robot at its seed
    #[serde(default = "defaults::initial_position_std")]
    pub initial_position_std: f64,

    /// Initial linear and angular velocity uncertainty
    #[serde(default = "defaults::initial_velocity_std")]
    pub initial_velocity_std: f64,
}

impl Default for MotionSection {
    fn default() -> Self {
        Self {
            linear_impulse_std: defaults::linear_impulse_std(),
            angular_impulse_std: defaults::angular_impulse_std(),
            default_dt: defaults::default_dt(),
            initial_position_std: defaults::initial_position_std(),
            initial_velocity_std: defaults::initial_velocity_std(),
        }
    }
}

impl MotionSection {
    /// Build the constant-velocity model with these noise magnitudes.
    pub fn to_motion_model(&self) -> ConstantVelocity {
        ConstantVelocity::new(self.linear_impulse_std, self.angular_impulse_std)
    }

    /// Seed mean for a fresh robot: the origin frame at rest.
    pub fn initial_robot_mean(&self) -> DVector<f64> {
        let mut mean = DVector::zeros(13);
        for (i, value) in frame::origin_frame().iter().enumerate() {
            mean[i] = *value;
        }
        mean
    }

    /// Seed variances for a fresh robot block.
    ///
    /// The orientation quaternion starts exactly known; position and
    /// velocities get their configured uncertainties.
    pub fn initial_robot_variances(&self) -> DVector<f64> {
        let mut variances = DVector::zeros(13);
        let position_var = self.initial_position_std * self.initial_position_std;
        let velocity_var = self.initial_velocity_std * self.initial_velocity_std;
        for i in 0..3 {
            variances[i] = position_var;
            variances[7 + i] = velocity_var;
            variances[10 + i] = velocity_var;
        }
        variances
    }
}
