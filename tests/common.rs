//! Test utilities for TaraSLAM integration tests.
//!
//! This module provides helpers for building small maps, seeding state
//! blocks, and stubbing measurement models with known Jacobians.

#![allow(dead_code)]

use nalgebra::{DMatrix, DVector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tara_slam::{
    EkfSlam, LandmarkGeometry, LandmarkId, MeasurementModel, MeasurementPrediction, RobotId,
    SensorId, SensorMount, StateEstimate, TaraConfig,
};

/// Configuration with a given state capacity, defaults elsewhere.
pub fn test_config(max_size: usize) -> TaraConfig {
    let mut config = TaraConfig::default();
    config.map.max_size = max_size;
    config
}

/// Estimator with one seeded robot.
pub fn seeded_slam(max_size: usize) -> (EkfSlam, RobotId) {
    let config = test_config(max_size);
    let mut slam = EkfSlam::from_config(&config);
    let robot = slam
        .map_mut()
        .spawn_robot("rover", Box::new(config.motion.to_motion_model()))
        .expect("robot must fit");
    seed_robot(&mut slam, robot, 0.1);
    (slam, robot)
}

/// Estimator with one robot, one estimated-pose sensor, and one point
/// landmark, all blocks seeded with nonzero variance.
pub fn rigged_slam(max_size: usize) -> (EkfSlam, RobotId, SensorId, LandmarkId) {
    let (mut slam, robot) = seeded_slam(max_size);
    let sensor = slam
        .map_mut()
        .attach_sensor(robot, "cam", SensorMount::Estimated)
        .expect("sensor must fit");
    let landmark = slam
        .map_mut()
        .spawn_landmark("corner", LandmarkGeometry::Euclidean)
        .expect("landmark must fit");

    let sensor_range = slam
        .map()
        .sensor(sensor)
        .and_then(|s| s.range())
        .expect("estimated sensor has a range");
    let mut sensor_mean = DVector::zeros(7);
    sensor_mean[3] = 1.0;
    slam.map_mut().estimate_mut().init_block(
        sensor_range,
        &sensor_mean,
        &DVector::from_element(7, 0.01),
    );

    let landmark_range = slam.map().landmark(landmark).expect("landmark exists").range();
    slam.map_mut().estimate_mut().init_block(
        landmark_range,
        &DVector::from_vec(vec![5.0, 0.0, 0.0]),
        &DVector::from_element(3, 0.25),
    );

    (slam, robot, sensor, landmark)
}

/// Seed a robot block with its configured mean and uniform variance.
pub fn seed_robot(slam: &mut EkfSlam, robot: RobotId, variance: f64) {
    let config = TaraConfig::default();
    let range = slam.map().robot(robot).expect("robot exists").range();
    slam.map_mut().estimate_mut().init_block(
        range,
        &config.motion.initial_robot_mean(),
        &DVector::from_element(range.size(), variance),
    );
}

/// Linear measurement model with a fixed Jacobian over the update union.
///
/// Predicts `z = H * x_u` where `x_u` gathers the mean at the union
/// indices, so the filter's posterior can be checked against closed-form
/// Kalman algebra.
pub struct LinearModel {
    /// Measurement Jacobian over the union, `m x u`
    pub h: DMatrix<f64>,
    /// Measurement noise covariance, `m x m`
    pub r: DMatrix<f64>,
}

impl MeasurementModel for LinearModel {
    fn measurement_size(&self) -> usize {
        self.h.nrows()
    }

    fn predict(
        &self,
        estimate: &StateEstimate,
        _sensor: SensorId,
        _landmark: LandmarkId,
        union: &[usize],
    ) -> MeasurementPrediction {
        assert_eq!(self.h.ncols(), union.len(), "stub Jacobian width mismatch");
        let gathered = estimate.mean_at(union);
        MeasurementPrediction {
            expected: &self.h * gathered,
            jacobian: self.h.clone(),
            noise: self.r.clone(),
        }
    }
}

/// Model observing the first three union slots (the robot position).
pub fn position_observer(union_len: usize, noise_var: f64) -> LinearModel {
    let mut h = DMatrix::zeros(3, union_len);
    for i in 0..3 {
        h[(i, i)] = 1.0;
    }
    LinearModel {
        h,
        r: DMatrix::identity(3, 3) * noise_var,
    }
}

/// Model observing the last three union slots (a point landmark).
pub fn landmark_observer(union_len: usize, noise_var: f64) -> LinearModel {
    let mut h = DMatrix::zeros(3, union_len);
    for i in 0..3 {
        h[(i, union_len - 3 + i)] = 1.0;
    }
    LinearModel {
        h,
        r: DMatrix::identity(3, 3) * noise_var,
    }
}

/// Model whose innovation covariance is exactly zero, so every update
/// must be rejected as degenerate.
pub fn degenerate_observer(union_len: usize) -> LinearModel {
    LinearModel {
        h: DMatrix::zeros(3, union_len),
        r: DMatrix::zeros(3, 3),
    }
}

/// Reproducible sequence of small velocity impulses.
pub fn random_controls(n: usize, seed: u64) -> Vec<DVector<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| DVector::from_fn(6, |_, _| rng.gen_range(-0.1..0.1)))
        .collect()
}
