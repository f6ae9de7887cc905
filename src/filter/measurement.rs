//! The measurement-model collaborator seam.

use nalgebra::{DMatrix, DVector};

use crate::map::{LandmarkId, SensorId};
use crate::state::StateEstimate;

/// What an update needs from a measurement model, evaluated at the current
/// estimate.
///
/// The Jacobian's columns are laid out over the flattened update union in
/// the order the map reports it (robot pose, then estimated sensor pose,
/// then landmark). The filter checks the shapes against the union and the
/// measurement and treats any disagreement as a contract violation.
#[derive(Debug, Clone)]
pub struct MeasurementPrediction {
    /// Expected measurement `h(x)`.
    pub expected: DVector<f64>,
    /// Jacobian `H = ∂h/∂x` over the union columns.
    pub jacobian: DMatrix<f64>,
    /// Measurement noise covariance `R`.
    pub noise: DMatrix<f64>,
}

/// Produces measurement predictions for sensor/landmark pairings.
///
/// Concrete projection math (pinhole cameras, segment projections) lives
/// behind this trait; the estimator core only needs the evaluated
/// prediction at the current state.
pub trait MeasurementModel {
    /// Length of the measurement vector this model produces.
    fn measurement_size(&self) -> usize;

    /// Evaluate the model for one pairing at the current estimate.
    ///
    /// `union` is the flattened slot-index list the update is restricted
    /// to; the returned Jacobian must have one column per entry.
    fn predict(
        &self,
        estimate: &StateEstimate,
        sensor: SensorId,
        landmark: LandmarkId,
        union: &[usize],
    ) -> MeasurementPrediction;
}
