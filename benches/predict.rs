//! Benchmark filter cycle performance.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nalgebra::{DMatrix, DVector};
use tara_slam::{
    ConstantVelocity, EkfSlam, IndexedEkf, LandmarkGeometry, MeasurementPrediction, RobotId,
    SensorId, SensorMount, SlotRange, StateEstimate, TaraConfig,
};

/// Estimator with one robot, one estimated sensor, and `landmarks` point
/// landmarks, every block seeded.
fn rig(landmarks: usize) -> (EkfSlam, RobotId, SensorId) {
    let mut config = TaraConfig::default();
    config.map.max_size = 13 + 7 + 3 * landmarks + 8;
    let mut slam = EkfSlam::from_config(&config);

    let robot = slam
        .map_mut()
        .spawn_robot("rover", Box::new(ConstantVelocity::default()))
        .expect("robot fits");
    let range = slam.map().robot(robot).expect("exists").range();
    slam.map_mut().estimate_mut().init_block(
        range,
        &config.motion.initial_robot_mean(),
        &DVector::from_element(13, 0.1),
    );

    let sensor = slam
        .map_mut()
        .attach_sensor(robot, "cam", SensorMount::Estimated)
        .expect("sensor fits");
    let sensor_range = slam
        .map()
        .sensor(sensor)
        .and_then(|s| s.range())
        .expect("estimated sensor");
    let mut sensor_mean = DVector::zeros(7);
    sensor_mean[3] = 1.0;
    slam.map_mut().estimate_mut().init_block(
        sensor_range,
        &sensor_mean,
        &DVector::from_element(7, 0.01),
    );

    for i in 0..landmarks {
        let id = slam
            .map_mut()
            .spawn_landmark(&format!("lm-{}", i), LandmarkGeometry::Euclidean)
            .expect("landmark fits");
        let lm_range = slam.map().landmark(id).expect("exists").range();
        slam.map_mut().estimate_mut().init_block(
            lm_range,
            &DVector::from_vec(vec![i as f64, 1.0, 0.0]),
            &DVector::from_element(3, 0.25),
        );
    }

    (slam, robot, sensor)
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");
    let control = DVector::from_element(6, 0.05);

    for landmarks in [0usize, 10, 40] {
        let (mut slam, robot, _sensor) = rig(landmarks);
        group.bench_with_input(
            BenchmarkId::from_parameter(landmarks),
            &landmarks,
            |b, _| {
                b.iter(|| {
                    slam.predict(robot, black_box(&control)).expect("robot is live");
                })
            },
        );
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    // Filter-level update over a 23-slot state, union of 17 slots.
    let mut estimate = StateEstimate::new(23);
    estimate.init_block(
        SlotRange::new(0, 13),
        &DVector::zeros(13),
        &DVector::from_element(13, 0.1),
    );
    estimate.init_block(
        SlotRange::new(13, 7),
        &DVector::zeros(7),
        &DVector::from_element(7, 0.01),
    );
    estimate.init_block(
        SlotRange::new(20, 3),
        &DVector::from_vec(vec![5.0, 0.0, 0.0]),
        &DVector::from_element(3, 0.25),
    );
    let union: Vec<usize> = (0..7).chain(13..23).collect();

    let mut h = DMatrix::zeros(3, union.len());
    for k in 0..3 {
        h[(k, union.len() - 3 + k)] = 1.0;
    }
    let measurement = DVector::from_vec(vec![5.1, 0.05, -0.02]);
    let filter = IndexedEkf::new();

    c.bench_function("update_union_17", |b| {
        b.iter(|| {
            let prediction = MeasurementPrediction {
                expected: &h * estimate.mean_at(&union),
                jacobian: h.clone(),
                noise: DMatrix::identity(3, 3) * 0.01,
            };
            let outcome = filter.update(
                &mut estimate,
                &union,
                black_box(&measurement),
                &prediction,
            );
            black_box(outcome)
        })
    });
}

fn bench_full_cycle(c: &mut Criterion) {
    let (mut slam, robot, sensor) = rig(3);
    let control = DVector::from_element(6, 0.05);
    let landmark_ids: Vec<_> = slam.map().landmarks().map(|lm| lm.id()).collect();

    let union_len = slam
        .map()
        .update_union(sensor, landmark_ids[0])
        .expect("pairing exists")
        .len();
    let mut h = DMatrix::zeros(3, union_len);
    for k in 0..3 {
        h[(k, union_len - 3 + k)] = 1.0;
    }

    struct Observer {
        h: DMatrix<f64>,
    }
    impl tara_slam::MeasurementModel for Observer {
        fn measurement_size(&self) -> usize {
            3
        }
        fn predict(
            &self,
            estimate: &StateEstimate,
            _sensor: SensorId,
            _landmark: tara_slam::LandmarkId,
            union: &[usize],
        ) -> MeasurementPrediction {
            MeasurementPrediction {
                expected: &self.h * estimate.mean_at(union),
                jacobian: self.h.clone(),
                noise: DMatrix::identity(3, 3) * 0.01,
            }
        }
    }
    let model = Observer { h };

    c.bench_function("full_cycle_3_landmarks", |b| {
        b.iter(|| {
            slam.begin_cycle();
            slam.predict(robot, black_box(&control)).expect("robot is live");
            for (i, id) in landmark_ids.iter().enumerate() {
                slam.record_match(
                    sensor,
                    *id,
                    DVector::from_vec(vec![i as f64 + 0.1, 1.0, 0.0]),
                    1.0,
                )
                .expect("pairing exists");
            }
            let report = slam.apply_matched(&model).expect("pairings are live");
            black_box(report)
        })
    });
}

criterion_group!(benches, bench_predict, bench_update, bench_full_cycle);
criterion_main!(benches);
