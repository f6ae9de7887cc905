//! The indexed extended Kalman filter.
//!
//! Predict and update both work on gathered sub-blocks of the shared
//! covariance, never on the full dense matrix: predict exploits that the
//! transition is identity outside the moving robot's range, and update is
//! restricted to the union of the blocks a measurement actually involves.
//!
//! - [`IndexedEkf`]: The filter itself
//! - [`MeasurementModel`] / [`MeasurementPrediction`]: The collaborator
//!   seam supplying expected measurements and Jacobians
//! - [`UpdateOutcome`] / [`RejectionCause`]: Per-observation update results;
//!   a numerically degenerate update is skipped, never applied

mod ekf;
mod measurement;

pub use ekf::{IndexedEkf, RejectionCause, UpdateOutcome};
pub use measurement::{MeasurementModel, MeasurementPrediction};
