//! Map operation errors.

use thiserror::Error;

use crate::state::CapacityError;

use super::{LandmarkId, RobotId, SensorId};

/// Recoverable failures of map operations.
///
/// Capacity exhaustion and unknown ids are the caller's to handle; shape
/// mismatches between blocks and ranges are contract violations and panic
/// instead of appearing here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The state vector cannot hold the requested entity.
    #[error("cannot grow map: {0}")]
    Capacity(#[from] CapacityError),

    /// No live robot carries this id.
    #[error("unknown robot id {0}")]
    UnknownRobot(RobotId),

    /// No live sensor carries this id.
    #[error("unknown sensor id {0}")]
    UnknownSensor(SensorId),

    /// No live landmark carries this id.
    #[error("unknown landmark id {0}")]
    UnknownLandmark(LandmarkId),

    /// The sensor/landmark pairing has no match recorded this cycle.
    #[error("observation of landmark {landmark} by sensor {sensor} has no match to apply")]
    ObservationNotMatched {
        /// The observing sensor.
        sensor: SensorId,
        /// The observed landmark.
        landmark: LandmarkId,
    },
}
