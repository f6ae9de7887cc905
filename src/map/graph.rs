//! The stochastic map: shared state plus the entity graph over it.

use std::collections::BTreeMap;

use log::{debug, info};
use nalgebra::DVector;

use crate::core::SlotRange;
use crate::motion::{MotionModel, MotionStep};
use crate::state::{IdPool, StateAllocator, StateEstimate};

use super::{
    Landmark, LandmarkGeometry, LandmarkId, MapError, Observation, ObservationStatus, Robot,
    RobotId, Sensor, SensorId, SensorMount, SensorPose, SENSOR_POSE_SIZE,
};

/// Outcome of advancing one robot: its slot range plus the covariance-side
/// blocks the filter needs.
#[derive(Debug)]
pub struct RobotAdvance {
    /// The robot's slot range.
    pub range: SlotRange,
    /// Transition Jacobian and process noise over that range.
    pub step: MotionStep,
}

/// Owner of the shared Gaussian state and every entity indexed into it.
///
/// All entity creation and destruction goes through the factory methods
/// here, which keep four things consistent as one atomic step: slot
/// allocation, id issue, state-block initialization, and the bipartite
/// sensor/landmark observation set. A factory that fails (capacity, unknown
/// id) mutates nothing.
///
/// There are no global singletons; everything the estimator touches hangs
/// off one `StochasticMap` value, and every slot and id is released when
/// the owning entity is removed.
pub struct StochasticMap {
    estimate: StateEstimate,
    allocator: StateAllocator,
    robot_ids: IdPool,
    sensor_ids: IdPool,
    landmark_ids: IdPool,
    robots: BTreeMap<RobotId, Robot>,
    landmarks: BTreeMap<LandmarkId, Landmark>,
}

impl StochasticMap {
    /// Create an empty map over `max_size` state slots.
    pub fn new(max_size: usize) -> Self {
        info!("Creating stochastic map with {} state slots", max_size);
        Self {
            estimate: StateEstimate::new(max_size),
            allocator: StateAllocator::new(max_size),
            robot_ids: IdPool::new(),
            sensor_ids: IdPool::new(),
            landmark_ids: IdPool::new(),
            robots: BTreeMap::new(),
            landmarks: BTreeMap::new(),
        }
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    /// Total slot capacity of the shared state.
    pub fn capacity(&self) -> usize {
        self.allocator.capacity()
    }

    /// Slots currently claimed by live entities.
    pub fn used_slots(&self) -> usize {
        self.allocator.used_slots()
    }

    /// True when an entity spanning `size` slots could be created now.
    pub fn capacity_for(&self, size: usize) -> bool {
        self.allocator.capacity_for(size)
    }

    /// The shared Gaussian state.
    pub fn estimate(&self) -> &StateEstimate {
        &self.estimate
    }

    /// Mutable shared state, for seeding blocks and for the filter.
    pub fn estimate_mut(&mut self) -> &mut StateEstimate {
        &mut self.estimate
    }

    /// All live slot indices, ascending.
    pub fn used_indices(&self) -> Vec<usize> {
        self.allocator.used_indices()
    }

    /// Maximal contiguous spans of live slots, ascending.
    pub fn used_ranges(&self) -> Vec<SlotRange> {
        self.allocator.used_ranges()
    }

    // =========================================================================
    // FACTORIES
    // =========================================================================

    /// Create a robot driven by `model`.
    ///
    /// Allocates the model's state range, zeroes its block, and registers
    /// the robot under a fresh id.
    pub fn spawn_robot(
        &mut self,
        name: &str,
        model: Box<dyn MotionModel>,
    ) -> Result<RobotId, MapError> {
        let range = self.allocator.allocate(model.state_size())?;
        let id = RobotId(self.robot_ids.get_id());
        self.estimate.clear_block(range);
        info!("Spawned robot {} '{}' over slots {}", id, name, range);
        self.robots.insert(id, Robot::new(id, name, range, model));
        Ok(id)
    }

    /// Mount a sensor on `robot`.
    ///
    /// An [`SensorMount::Estimated`] mount claims seven slots for the
    /// online-calibrated pose; a [`SensorMount::Fixed`] mount claims none.
    /// Every live landmark immediately gains an observation pairing with
    /// the new sensor.
    pub fn attach_sensor(
        &mut self,
        robot: RobotId,
        name: &str,
        mount: SensorMount,
    ) -> Result<SensorId, MapError> {
        let carrier = self
            .robots
            .get_mut(&robot)
            .ok_or(MapError::UnknownRobot(robot))?;
        let pose = match mount {
            SensorMount::Estimated => {
                let range = self.allocator.allocate(SENSOR_POSE_SIZE)?;
                self.estimate.clear_block(range);
                SensorPose::Estimated(range)
            }
            SensorMount::Fixed(frame) => SensorPose::Fixed(frame),
        };
        let id = SensorId(self.sensor_ids.get_id());
        for landmark in self.landmarks.values_mut() {
            landmark.add_observation(id);
        }
        info!(
            "Attached sensor {} '{}' to robot {} ({})",
            id,
            name,
            robot,
            if matches!(pose, SensorPose::Estimated(_)) {
                "estimated pose"
            } else {
                "fixed pose"
            }
        );
        carrier.mount_sensor(Sensor::new(id, name, robot, pose));
        Ok(id)
    }

    /// Create a landmark with the given parameterization.
    ///
    /// Allocates its state range, zeroes the block, and spawns exactly one
    /// observation pairing per live sensor.
    pub fn spawn_landmark(
        &mut self,
        name: &str,
        geometry: LandmarkGeometry,
    ) -> Result<LandmarkId, MapError> {
        let range = self.allocator.allocate(geometry.state_size())?;
        let id = LandmarkId(self.landmark_ids.get_id());
        self.estimate.clear_block(range);
        let mut landmark = Landmark::new(id, name, geometry, range);
        for robot in self.robots.values() {
            for sensor in robot.sensors() {
                landmark.add_observation(sensor.id());
            }
        }
        info!(
            "Spawned landmark {} '{}' over slots {} with {} observations",
            id,
            name,
            range,
            landmark.observations().len()
        );
        self.landmarks.insert(id, landmark);
        Ok(id)
    }

    // =========================================================================
    // DESTRUCTION
    // =========================================================================

    /// Remove a landmark, releasing its slots and id.
    ///
    /// Its observations die with it; the released slots are zeroed and
    /// immediately reusable.
    pub fn remove_landmark(&mut self, id: LandmarkId) -> Result<(), MapError> {
        let landmark = self
            .landmarks
            .remove(&id)
            .ok_or(MapError::UnknownLandmark(id))?;
        self.release_range(landmark.range());
        self.landmark_ids.release_id(id.0);
        info!("Removed landmark {} (slots {})", id, landmark.range());
        Ok(())
    }

    /// Unmount a sensor from its robot, releasing any estimated-pose slots.
    ///
    /// Every observation pairing the sensor is dropped from every landmark.
    pub fn detach_sensor(&mut self, id: SensorId) -> Result<(), MapError> {
        let sensor = self
            .robots
            .values_mut()
            .find_map(|r| r.unmount_sensor(id))
            .ok_or(MapError::UnknownSensor(id))?;
        self.release_sensor_state(&sensor);
        for landmark in self.landmarks.values_mut() {
            landmark.drop_observations_of(id);
        }
        info!("Detached sensor {} from robot {}", id, sensor.robot());
        Ok(())
    }

    /// Remove a robot and everything it owns.
    ///
    /// All mounted sensors are torn down first (slots, ids, observation
    /// pairings), then the robot's own range and id are released.
    pub fn remove_robot(&mut self, id: RobotId) -> Result<(), MapError> {
        let robot = self.robots.remove(&id).ok_or(MapError::UnknownRobot(id))?;
        for sensor in robot.sensors() {
            self.release_sensor_state(sensor);
            for landmark in self.landmarks.values_mut() {
                landmark.drop_observations_of(sensor.id());
            }
        }
        self.release_range(robot.range());
        self.robot_ids.release_id(id.0);
        info!("Removed robot {} (slots {})", id, robot.range());
        Ok(())
    }

    fn release_sensor_state(&mut self, sensor: &Sensor) {
        if let Some(range) = sensor.range() {
            self.release_range(range);
        }
        self.sensor_ids.release_id(sensor.id().0);
    }

    fn release_range(&mut self, range: SlotRange) {
        self.estimate.clear_block(range);
        self.allocator.release(range);
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// The robot with this id.
    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(&id)
    }

    /// The landmark with this id.
    pub fn landmark(&self, id: LandmarkId) -> Option<&Landmark> {
        self.landmarks.get(&id)
    }

    /// The sensor with this id, wherever it is mounted.
    pub fn sensor(&self, id: SensorId) -> Option<&Sensor> {
        self.find_sensor(id).map(|(_, sensor)| sensor)
    }

    /// The robot owning the sensor with this id.
    pub fn robot_of_sensor(&self, id: SensorId) -> Option<&Robot> {
        self.find_sensor(id).map(|(robot, _)| robot)
    }

    /// Iterate all robots in id order.
    pub fn robots(&self) -> impl Iterator<Item = &Robot> {
        self.robots.values()
    }

    /// Iterate all landmarks in id order.
    pub fn landmarks(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.values()
    }

    /// Number of live robots.
    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    /// Number of live sensors across all robots.
    pub fn sensor_count(&self) -> usize {
        self.robots.values().map(|r| r.sensors().len()).sum()
    }

    /// Number of live landmarks.
    pub fn landmark_count(&self) -> usize {
        self.landmarks.len()
    }

    /// The observation pairing `sensor` with `landmark`.
    pub fn observation(&self, sensor: SensorId, landmark: LandmarkId) -> Option<&Observation> {
        self.landmarks.get(&landmark)?.observation_of(sensor)
    }

    /// Mutable pairing of `sensor` with `landmark`.
    pub fn observation_mut(
        &mut self,
        sensor: SensorId,
        landmark: LandmarkId,
    ) -> Option<&mut Observation> {
        self.landmarks.get_mut(&landmark)?.observation_of_mut(sensor)
    }

    /// Iterate one sensor's observations across all landmarks, in landmark
    /// id order.
    pub fn observations_of_sensor(
        &self,
        sensor: SensorId,
    ) -> impl Iterator<Item = &Observation> {
        self.landmarks
            .values()
            .filter_map(move |lm| lm.observation_of(sensor))
    }

    fn find_sensor(&self, id: SensorId) -> Option<(&Robot, &Sensor)> {
        self.robots
            .values()
            .find_map(|robot| robot.sensor(id).map(|sensor| (robot, sensor)))
    }

    // =========================================================================
    // CYCLE OPERATIONS
    // =========================================================================

    /// Reset every observation to `Pending` for a new estimation cycle.
    pub fn begin_cycle(&mut self) {
        let mut reset = 0;
        for landmark in self.landmarks.values_mut() {
            for obs in landmark.observations_mut() {
                obs.reset();
                reset += 1;
            }
        }
        debug!("Cycle start: {} observations pending", reset);
    }

    /// Advance one robot's motion model over the mean vector.
    ///
    /// Mutates only the robot's slice of the mean; the covariance is left
    /// for the filter's predict, which consumes the returned blocks.
    pub fn advance_robot(
        &mut self,
        id: RobotId,
        control: &DVector<f64>,
        dt: f64,
    ) -> Result<RobotAdvance, MapError> {
        let robot = self.robots.get(&id).ok_or(MapError::UnknownRobot(id))?;
        let range = robot.range();
        let mut block = self.estimate.mean_block(range);
        let step = robot.model().advance(&mut block, control, dt);
        self.estimate.set_mean_block(range, &block);
        debug!("Advanced robot {} over {} by dt={}", id, range, dt);
        Ok(RobotAdvance { range, step })
    }

    /// Record a detector match on the pairing of `sensor` and `landmark`.
    pub fn record_match(
        &mut self,
        sensor: SensorId,
        landmark: LandmarkId,
        measurement: DVector<f64>,
        score: f64,
    ) -> Result<(), MapError> {
        let lm = self
            .landmarks
            .get_mut(&landmark)
            .ok_or(MapError::UnknownLandmark(landmark))?;
        let obs = lm
            .observation_of_mut(sensor)
            .ok_or(MapError::UnknownSensor(sensor))?;
        obs.record_match(measurement, score);
        Ok(())
    }

    /// All pairings currently in `Matched` state, in landmark id order.
    pub fn matched_pairs(&self) -> Vec<(SensorId, LandmarkId)> {
        let mut pairs = Vec::new();
        for landmark in self.landmarks.values() {
            for obs in landmark.observations() {
                if obs.status() == ObservationStatus::Matched {
                    pairs.push((obs.sensor(), obs.landmark()));
                }
            }
        }
        pairs
    }

    /// Flattened slot indices an update of this pairing may touch.
    ///
    /// Order is robot pose block, then the sensor block when its pose is
    /// estimated, then the landmark block. Measurement Jacobians are laid
    /// out over exactly this index order.
    pub fn update_union(
        &self,
        sensor: SensorId,
        landmark: LandmarkId,
    ) -> Result<Vec<usize>, MapError> {
        let lm = self
            .landmarks
            .get(&landmark)
            .ok_or(MapError::UnknownLandmark(landmark))?;
        let (robot, sensor) = self
            .find_sensor(sensor)
            .ok_or(MapError::UnknownSensor(sensor))?;
        let mut union: Vec<usize> = robot.pose_range().indices().collect();
        if let Some(range) = sensor.range() {
            union.extend(range.indices());
        }
        union.extend(lm.range().indices());
        Ok(union)
    }
}
