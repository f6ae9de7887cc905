//! Sparse predict and guarded update over the shared state.

use log::warn;
use nalgebra::{Cholesky, DVector};

use crate::core::SlotRange;
use crate::motion::MotionStep;
use crate::state::StateEstimate;

use super::MeasurementPrediction;

/// Why an update was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionCause {
    /// The innovation covariance was not positive definite.
    SingularInnovation,
}

/// Result of applying one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The correction was applied to mean and covariance.
    Applied,
    /// The update was skipped; mean and covariance are untouched.
    Rejected(RejectionCause),
}

impl UpdateOutcome {
    /// True when the correction was applied.
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied)
    }
}

/// Extended Kalman filter working over slot-index subsets of the shared
/// state.
///
/// The full transition matrix is identity outside the moving robot's range,
/// so predict touches only the robot's own covariance block and its cross
/// rows/columns against the other live slots. Update is restricted to the
/// flattened union of the blocks a measurement involves. Slots outside the
/// touched sets are never read and never written.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedEkf;

impl IndexedEkf {
    /// Create the filter.
    pub fn new() -> Self {
        Self
    }

    /// Covariance-side predict after a robot advanced over `range`.
    ///
    /// With `F` the robot-block transition and `Q` its process noise:
    ///
    /// ```text
    /// P[r,s] ← F·P[r,s]        for every other live slot set s
    /// P[s,r] ← P[r,s]ᵀ
    /// P[r,r] ← F·P[r,r]·Fᵀ + Q    (symmetrized exactly)
    /// ```
    ///
    /// `used` is the full set of live slot indices, robot included; block
    /// shapes disagreeing with `range` are a contract violation and panic.
    pub fn predict(
        &self,
        estimate: &mut StateEstimate,
        used: &[usize],
        range: SlotRange,
        step: &MotionStep,
    ) {
        let n = range.size();
        assert_eq!(
            (step.transition.nrows(), step.transition.ncols()),
            (n, n),
            "transition block shape does not match robot range {}",
            range
        );
        assert_eq!(
            (step.noise.nrows(), step.noise.ncols()),
            (n, n),
            "noise block shape does not match robot range {}",
            range
        );

        let own: Vec<usize> = range.indices().collect();
        let others: Vec<usize> = used
            .iter()
            .copied()
            .filter(|&i| !range.contains(i))
            .collect();

        if !others.is_empty() {
            let cross = estimate.covariance_at(&own, &others);
            let cross_new = &step.transition * cross;
            estimate.set_covariance_at(&others, &own, &cross_new.transpose());
            estimate.set_covariance_at(&own, &others, &cross_new);
        }

        let own_block = estimate.covariance_at(&own, &own);
        let propagated = &step.transition * own_block * step.transition.transpose() + &step.noise;
        let symmetric = (&propagated + propagated.transpose()) * 0.5;
        estimate.set_covariance_at(&own, &own, &symmetric);
    }

    /// Apply one measurement over the flattened `union` of slot indices.
    ///
    /// Computes the innovation against the model's expected measurement,
    /// forms `S = H·P·Hᵀ + R` over the union, and corrects mean and
    /// covariance through the Cholesky factor of `S`. When `S` is not
    /// positive definite the update is skipped and the estimate is left
    /// bit-identical.
    pub fn update(
        &self,
        estimate: &mut StateEstimate,
        union: &[usize],
        measurement: &DVector<f64>,
        prediction: &MeasurementPrediction,
    ) -> UpdateOutcome {
        let m = measurement.len();
        assert_eq!(
            prediction.expected.len(),
            m,
            "expected measurement length does not match the measurement"
        );
        assert_eq!(
            (prediction.jacobian.nrows(), prediction.jacobian.ncols()),
            (m, union.len()),
            "measurement Jacobian shape does not match measurement and union"
        );
        assert_eq!(
            (prediction.noise.nrows(), prediction.noise.ncols()),
            (m, m),
            "measurement noise shape does not match the measurement"
        );

        let p_uu = estimate.covariance_at(union, union);
        let h = &prediction.jacobian;
        let innovation = measurement - &prediction.expected;

        let s = h * &p_uu * h.transpose() + &prediction.noise;
        let chol = match Cholesky::new(s) {
            Some(chol) => chol,
            None => {
                warn!("Update rejected: innovation covariance not positive definite");
                return UpdateOutcome::Rejected(RejectionCause::SingularInnovation);
            }
        };

        // K = P·Hᵀ·S⁻¹ through the factor: Kᵀ = S⁻¹·(H·P).
        let hp = h * &p_uu;
        let gain = chol.solve(&hp).transpose();

        let corrected_mean = estimate.mean_at(union) + &gain * innovation;
        let reduced = &p_uu - &gain * hp;
        let symmetric = (&reduced + reduced.transpose()) * 0.5;

        estimate.set_mean_at(union, &corrected_mean);
        estimate.set_covariance_at(union, union, &symmetric);
        UpdateOutcome::Applied
    }
}
