//! Constant-velocity 3D motion model.

use nalgebra::{DMatrix, DVector, Vector3, Vector4};

use crate::core::frame;

use super::{MotionModel, MotionStep};

/// Slots occupied by the constant-velocity state.
pub const CV_STATE_SIZE: usize = 13;
/// Leading slots forming the pose (position + quaternion).
pub const CV_POSE_SIZE: usize = 7;
/// Control length: a linear and an angular velocity impulse.
pub const CV_CONTROL_SIZE: usize = 6;

const POS: usize = 0;
const QUAT: usize = 3;
const LVEL: usize = 7;
const AVEL: usize = 10;

/// Constant-velocity model over 13 slots.
///
/// State layout: position (3), orientation quaternion (4, scalar first),
/// linear velocity (3), angular velocity (3). Controls are velocity
/// impulses added on top of the current velocities each step:
///
/// ```text
/// p' = p + v·dt
/// q' = q ⊗ exp(ω·dt)
/// v' = v + control[0..3]
/// ω' = ω + control[3..6]
/// ```
///
/// Process noise is a velocity random walk: variance `σ²·dt` on the linear
/// and angular velocity slots, zero elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct ConstantVelocity {
    linear_impulse_std: f64,
    angular_impulse_std: f64,
}

impl ConstantVelocity {
    /// Create a model with the given impulse standard deviations
    /// (per square-root second).
    pub fn new(linear_impulse_std: f64, angular_impulse_std: f64) -> Self {
        Self {
            linear_impulse_std,
            angular_impulse_std,
        }
    }
}

impl Default for ConstantVelocity {
    fn default() -> Self {
        Self::new(0.5, 0.35)
    }
}

impl MotionModel for ConstantVelocity {
    fn state_size(&self) -> usize {
        CV_STATE_SIZE
    }

    fn pose_size(&self) -> usize {
        CV_POSE_SIZE
    }

    fn control_size(&self) -> usize {
        CV_CONTROL_SIZE
    }

    fn advance(&self, state: &mut DVector<f64>, control: &DVector<f64>, dt: f64) -> MotionStep {
        assert_eq!(
            state.len(),
            CV_STATE_SIZE,
            "constant-velocity state block must span {} slots",
            CV_STATE_SIZE
        );
        assert_eq!(
            control.len(),
            CV_CONTROL_SIZE,
            "constant-velocity control must have {} entries",
            CV_CONTROL_SIZE
        );

        let p = Vector3::new(state[POS], state[POS + 1], state[POS + 2]);
        let q = Vector4::new(state[QUAT], state[QUAT + 1], state[QUAT + 2], state[QUAT + 3]);
        let v = Vector3::new(state[LVEL], state[LVEL + 1], state[LVEL + 2]);
        let w = Vector3::new(state[AVEL], state[AVEL + 1], state[AVEL + 2]);

        let rotation = w * dt;
        let dq = frame::rotation_vector_to_quat(&rotation);

        // Transition blocks, all taken at the pre-advance state.
        let mut transition = DMatrix::identity(CV_STATE_SIZE, CV_STATE_SIZE);
        for i in 0..3 {
            transition[(POS + i, LVEL + i)] = dt;
        }
        let dq_by_dq = frame::quat_product_right(&dq);
        for i in 0..4 {
            for j in 0..4 {
                transition[(QUAT + i, QUAT + j)] = dq_by_dq[(i, j)];
            }
        }
        let dq_by_dw =
            frame::quat_product_left(&q) * frame::rotation_vector_to_quat_jacobian(&rotation) * dt;
        for i in 0..4 {
            for j in 0..3 {
                transition[(QUAT + i, AVEL + j)] = dq_by_dw[(i, j)];
            }
        }

        let mut noise = DMatrix::zeros(CV_STATE_SIZE, CV_STATE_SIZE);
        let linear_var = self.linear_impulse_std * self.linear_impulse_std * dt;
        let angular_var = self.angular_impulse_std * self.angular_impulse_std * dt;
        for i in 0..3 {
            noise[(LVEL + i, LVEL + i)] = linear_var;
            noise[(AVEL + i, AVEL + i)] = angular_var;
        }

        let p_new = p + v * dt;
        let q_new = frame::quat_product(&q, &dq);
        for i in 0..3 {
            state[POS + i] = p_new[i];
            state[LVEL + i] += control[i];
            state[AVEL + i] += control[3 + i];
        }
        for i in 0..4 {
            state[QUAT + i] = q_new[i];
        }

        MotionStep { transition, noise }
    }
}
