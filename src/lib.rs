//! # TaraSLAM
//!
//! EKF-SLAM estimator core with bounded shared state, slot allocation, and
//! an entity/observation graph.
//!
//! ## Overview
//!
//! TaraSLAM keeps one Gaussian estimate (mean vector + covariance matrix)
//! of everything the system tracks, partitioned into slot ranges owned by
//! map entities:
//!
//! - **Robot** - Pose and velocities, driven by a motion model
//! - **Sensor** - Mounted on a robot; pose either estimated in the state or
//!   externally fixed
//! - **Landmark** - A mapped feature in one of three parameterizations
//! - **Observation** - One sensor/landmark pairing with its per-cycle match
//!   status
//!
//! ## Features
//!
//! - **Bounded Shared State**: Fixed-capacity mean/covariance, first-fit
//!   slot allocation with release and reuse, recoverable capacity errors
//! - **Entity Graph**: Atomic factories keep slots, ids and the bipartite
//!   observation set consistent
//! - **Sparse Predict**: Block-identity transition; only the moving robot's
//!   covariance block and cross-rows are touched
//! - **Guarded Update**: Restricted to the blocks a measurement involves;
//!   numerically degenerate updates are skipped, never applied
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tara_slam::{
//!     ConstantVelocity, EkfSlam, LandmarkGeometry, SensorMount, TaraConfig,
//! };
//! use nalgebra::DVector;
//!
//! // Create the estimator with default configuration
//! let config = TaraConfig::default();
//! let mut slam = EkfSlam::from_config(&config);
//!
//! // Build the map: one robot, one camera, one landmark
//! let robot = slam
//!     .map_mut()
//!     .spawn_robot("rover", Box::new(config.motion.to_motion_model()))?;
//! let cam = slam.map_mut().attach_sensor(robot, "cam", SensorMount::Estimated)?;
//! let corner = slam
//!     .map_mut()
//!     .spawn_landmark("corner", LandmarkGeometry::AnchoredHomogeneous)?;
//!
//! // One estimation cycle
//! slam.begin_cycle();
//! slam.predict(robot, &DVector::zeros(6))?;
//! slam.record_match(cam, corner, measurement, 1.0)?;
//! let report = slam.apply_matched(&measurement_model)?;
//!
//! println!("applied {} updates", report.updates_applied);
//! ```
//!
//! ## State Layout
//!
//! Quaternions are Hamilton convention, scalar first `[w, x, y, z]`; a full
//! frame is `[px, py, pz, qw, qx, qy, qz]`. The default constant-velocity
//! robot spans 13 slots: frame (7), linear velocity (3), angular velocity
//! (3).

#![warn(missing_docs)]

// Slot ranges and frame math
pub mod core;

// Shared Gaussian state, slot allocator, id pools
pub mod state;

// Entities and the stochastic map graph
pub mod map;

// Motion models
pub mod motion;

// The indexed extended Kalman filter
pub mod filter;

// Segment detection front
pub mod detect;

// Unified configuration
pub mod config;

// Re-export commonly used types
pub use crate::core::{frame, SlotRange};

pub use state::{CapacityError, IdPool, StateAllocator, StateEstimate};

pub use map::{
    Landmark, LandmarkGeometry, LandmarkId, MapError, Observation, ObservationStatus, Robot,
    RobotAdvance, RobotId, Sensor, SensorId, SensorMount, SensorPose, StochasticMap,
    SENSOR_POSE_SIZE,
};

pub use motion::{ConstantVelocity, MotionModel, MotionStep};

pub use filter::{
    IndexedEkf, MeasurementModel, MeasurementPrediction, RejectionCause, UpdateOutcome,
};

pub use detect::{
    LongestSegmentDetector, RegionOfInterest, SegmentCandidate, SegmentExtractor, SegmentFeature,
};

pub use config::{ConfigLoadError, TaraConfig};

use nalgebra::DVector;

/// Per-cycle tally of applied and skipped updates
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Updates applied to the estimate
    pub updates_applied: usize,
    /// Updates skipped as numerically degenerate
    pub updates_rejected: usize,
}

/// The EKF-SLAM estimator
///
/// Owns the stochastic map and the filter, and sequences one estimation
/// cycle: observation reset, per-robot predict, then matched updates one at
/// a time. All mutation of the shared state flows through `&mut self`, so
/// the single-writer discipline is enforced by the borrow checker.
pub struct EkfSlam {
    /// The map and its shared state
    map: StochasticMap,
    /// The filter
    filter: IndexedEkf,
    /// Step duration used by [`predict`](EkfSlam::predict)
    default_dt: f64,
}

impl EkfSlam {
    /// Create an estimator over an existing map.
    pub fn new(map: StochasticMap) -> Self {
        Self {
            map,
            filter: IndexedEkf::new(),
            default_dt: config::MotionSection::default().default_dt,
        }
    }

    /// Create an estimator from a configuration.
    pub fn from_config(config: &TaraConfig) -> Self {
        Self {
            map: config.to_map(),
            filter: IndexedEkf::new(),
            default_dt: config.motion.default_dt,
        }
    }

    /// The stochastic map.
    pub fn map(&self) -> &StochasticMap {
        &self.map
    }

    /// Mutable map access, for building the entity graph and seeding state.
    pub fn map_mut(&mut self) -> &mut StochasticMap {
        &mut self.map
    }

    /// Step duration used by [`predict`](EkfSlam::predict).
    pub fn default_dt(&self) -> f64 {
        self.default_dt
    }

    /// Start a new estimation cycle: every observation re-enters `Pending`.
    pub fn begin_cycle(&mut self) {
        self.map.begin_cycle();
    }

    /// Predict over the default step duration.
    pub fn predict(&mut self, robot: RobotId, control: &DVector<f64>) -> Result<(), MapError> {
        self.predict_with_dt(robot, control, self.default_dt)
    }

    /// Advance `robot` by `control` over `dt` and propagate the covariance.
    ///
    /// The mean moves through the robot's motion model; the covariance
    /// through the filter's sparse predict over the live slot set. Slots of
    /// other entities keep their exact values.
    pub fn predict_with_dt(
        &mut self,
        robot: RobotId,
        control: &DVector<f64>,
        dt: f64,
    ) -> Result<(), MapError> {
        let advance = self.map.advance_robot(robot, control, dt)?;
        let used = self.map.used_indices();
        self.filter
            .predict(self.map.estimate_mut(), &used, advance.range, &advance.step);
        Ok(())
    }

    /// Record a detector match on one sensor/landmark pairing.
    pub fn record_match(
        &mut self,
        sensor: SensorId,
        landmark: LandmarkId,
        measurement: DVector<f64>,
        score: f64,
    ) -> Result<(), MapError> {
        self.map.record_match(sensor, landmark, measurement, score)
    }

    /// Apply the filter update for one matched pairing.
    ///
    /// The update is restricted to the union of the robot pose block, the
    /// sensor block (when estimated) and the landmark block. On a
    /// degenerate innovation covariance the estimate is left untouched and
    /// the observation is settled as `Rejected`; otherwise it is
    /// `Confirmed`.
    pub fn apply_observation(
        &mut self,
        sensor: SensorId,
        landmark: LandmarkId,
        model: &dyn MeasurementModel,
    ) -> Result<UpdateOutcome, MapError> {
        let union = self.map.update_union(sensor, landmark)?;
        let observation = self
            .map
            .observation(sensor, landmark)
            .ok_or(MapError::UnknownSensor(sensor))?;
        if observation.status() != ObservationStatus::Matched {
            return Err(MapError::ObservationNotMatched { sensor, landmark });
        }
        let measurement = observation.measurement().clone();

        let prediction = model.predict(self.map.estimate(), sensor, landmark, &union);
        let outcome = self
            .filter
            .update(self.map.estimate_mut(), &union, &measurement, &prediction);

        let observation = self
            .map
            .observation_mut(sensor, landmark)
            .ok_or(MapError::UnknownSensor(sensor))?;
        match outcome {
            UpdateOutcome::Applied => observation.confirm(),
            UpdateOutcome::Rejected(_) => observation.reject(),
        }
        Ok(outcome)
    }

    /// Apply updates for every pairing matched this cycle, one at a time.
    pub fn apply_matched(&mut self, model: &dyn MeasurementModel) -> Result<CycleReport, MapError> {
        let mut report = CycleReport::default();
        for (sensor, landmark) in self.map.matched_pairs() {
            match self.apply_observation(sensor, landmark, model)? {
                UpdateOutcome::Applied => report.updates_applied += 1,
                UpdateOutcome::Rejected(_) => report.updates_rejected += 1,
            }
        }
        Ok(report)
    }
}
