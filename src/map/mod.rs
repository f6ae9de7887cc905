//! The stochastic map: entities over the shared state.
//!
//! A [`StochasticMap`] owns the Gaussian state, the slot allocator, the id
//! pools and the entity graph. Robots own their sensors; landmarks own one
//! observation per live sensor; everything else is reached through stable
//! integer ids.
//!
//! ## Type Categories
//!
//! ### Graph
//! - [`StochasticMap`]: Owner of state + entities, with atomic factories
//! - [`RobotId`] / [`SensorId`] / [`LandmarkId`]: Typed entity ids
//!
//! ### Entities
//! - [`Robot`]: Slot range + motion model + owned sensors
//! - [`Sensor`]: Estimated (7 extra slots) or fixed external calibration
//! - [`Landmark`]: One of three geometric parameterizations
//! - [`Observation`]: One sensor/landmark pairing and its match status
//!
//! Factories fail with a recoverable [`MapError`] when the state vector
//! cannot hold the new entity; nothing is mutated on failure.

mod error;
mod graph;
mod ids;
mod landmark;
mod observation;
mod robot;
mod sensor;

pub use error::MapError;
pub use graph::{RobotAdvance, StochasticMap};
pub use ids::{LandmarkId, RobotId, SensorId};
pub use landmark::{Landmark, LandmarkGeometry};
pub use observation::{Observation, ObservationStatus};
pub use robot::Robot;
pub use sensor::{Sensor, SensorMount, SensorPose, SENSOR_POSE_SIZE};
