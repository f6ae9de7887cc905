//! Detection-to-update integration tests.
//!
//! These tests wire a stub extractor through the detector and feed its
//! output into the observation machinery, covering the path a real image
//! front end would drive.

mod common;

use std::cell::RefCell;

use nalgebra::DMatrix;
use tara_slam::{
    LandmarkGeometry, MapError, ObservationStatus, RegionOfInterest, SegmentCandidate,
    SegmentExtractor, SegmentFeature, SensorMount, TaraConfig,
};

/// Extractor returning a canned candidate list and recording the region it
/// was asked to search.
struct Canned {
    candidates: Vec<SegmentCandidate>,
    searched: RefCell<Option<RegionOfInterest>>,
}

impl Canned {
    fn new(candidates: Vec<SegmentCandidate>) -> Self {
        Self {
            candidates,
            searched: RefCell::new(None),
        }
    }
}

impl SegmentExtractor for Canned {
    type Image = ();

    fn extract(&self, _image: &(), roi: Option<&RegionOfInterest>) -> Vec<SegmentCandidate> {
        *self.searched.borrow_mut() = roi.copied();
        self.candidates.clone()
    }
}

// ============================================================================
// Configuration Wiring Tests
// ============================================================================

#[test]
fn test_containment_flag_defaults_off() {
    let config = TaraConfig::default();
    let detector = config.to_detector(Canned::new(Vec::new()));
    assert!(!detector.requires_endpoint_in_roi());
}

#[test]
fn test_containment_flag_comes_from_config() {
    let config = TaraConfig::from_yaml("detection:\n  require_endpoint_in_roi: true\n")
        .expect("valid yaml");
    let detector = config.to_detector(Canned::new(Vec::new()));
    assert!(detector.requires_endpoint_in_roi());
}

#[test]
fn test_region_is_forwarded_to_the_extractor() {
    let config = TaraConfig::default();
    let detector = config.to_detector(Canned::new(vec![SegmentCandidate::new(
        0.0, 0.0, 30.0, 0.0,
    )]));
    let roi = RegionOfInterest::new(2.0, 2.0, 8.0, 8.0);
    let mut feature = SegmentFeature::new();

    assert!(detector.detect_in(&(), &mut feature, Some(&roi)));
    // The region bounds the search, not the result: the extractor saw it,
    // and the boundary-crossing winner was still accepted.
    assert_eq!(*detector.extractor().searched.borrow(), Some(roi));
    assert_eq!(feature.measurement[2], 30.0);
}

// ============================================================================
// Detection Feeding the Filter
// ============================================================================

#[test]
fn test_detected_feature_drives_an_update() {
    let (mut slam, _robot, sensor, _lm) = common::rigged_slam(60);
    let landmark = slam
        .map_mut()
        .spawn_landmark("segment", LandmarkGeometry::AnchoredHomogeneous)
        .expect("fits");
    let range = slam.map().landmark(landmark).expect("exists").range();
    slam.map_mut().estimate_mut().init_block(
        range,
        &nalgebra::DVector::from_vec(vec![4.0, 1.0, 0.0, 0.8, 0.0, 0.6, 0.1]),
        &nalgebra::DVector::from_element(7, 0.25),
    );

    let detector = TaraConfig::default().to_detector(Canned::new(vec![
        SegmentCandidate::new(4.1, 0.9, 0.05, 0.78),
        SegmentCandidate::new(4.05, 0.95, 0.02, 0.79),
    ]));
    let mut feature = SegmentFeature::new();
    assert!(detector.detect_in(&(), &mut feature, None));

    // The winner's endpoints become the pairing's measurement.
    slam.begin_cycle();
    slam.record_match(sensor, landmark, feature.measurement.clone(), feature.score)
        .expect("pairing exists");

    // Stub model observing the first four slots of the landmark block.
    let union = slam
        .map()
        .update_union(sensor, landmark)
        .expect("pairing exists");
    let mut h = DMatrix::zeros(4, union.len());
    for k in 0..4 {
        h[(k, union.len() - 7 + k)] = 1.0;
    }
    let model = common::LinearModel {
        h,
        r: DMatrix::identity(4, 4) * 0.01,
    };

    let prior_x = slam.map().estimate().mean()[range.start()];
    let outcome = slam
        .apply_observation(sensor, landmark, &model)
        .expect("pairing matched");
    assert!(outcome.is_applied());

    let obs = slam
        .map()
        .observation(sensor, landmark)
        .expect("pairing exists");
    assert_eq!(obs.status(), ObservationStatus::Confirmed);
    assert_eq!(obs.score(), 1.0);
    assert_eq!(obs.measurement()[0], 4.1);

    // The landmark moved toward the measured endpoint.
    let posterior_x = slam.map().estimate().mean()[range.start()];
    assert!(posterior_x > prior_x);
    assert!(posterior_x < 4.1);
}

#[test]
fn test_failed_detection_leaves_pairing_pending() {
    let (mut slam, _robot, sensor, landmark) = common::rigged_slam(40);
    let detector = TaraConfig::default().to_detector(Canned::new(Vec::new()));
    let mut feature = SegmentFeature::new();

    slam.begin_cycle();
    // No candidates: detection reports failure and nothing is recorded.
    assert!(!detector.detect_in(&(), &mut feature, None));

    let obs = slam
        .map()
        .observation(sensor, landmark)
        .expect("pairing exists");
    assert_eq!(obs.status(), ObservationStatus::Pending);

    // Applying without a match is refused, and a batch apply is a no-op.
    let union = slam
        .map()
        .update_union(sensor, landmark)
        .expect("pairing exists");
    let model = common::landmark_observer(union.len(), 0.01);
    assert_eq!(
        slam.apply_observation(sensor, landmark, &model),
        Err(MapError::ObservationNotMatched {
            sensor,
            landmark
        })
    );
    let report = slam.apply_matched(&model).expect("nothing matched");
    assert_eq!(report.updates_applied, 0);
    assert_eq!(report.updates_rejected, 0);
}

#[test]
fn test_detection_cycle_with_fixed_sensor() {
    // A fixed-mount sensor holds no state but still pairs and updates.
    let (mut slam, robot) = common::seeded_slam(40);
    let sensor = slam
        .map_mut()
        .attach_sensor(robot, "rigid-cam", SensorMount::Fixed(tara_slam::frame::origin_frame()))
        .expect("no slots needed");
    let landmark = slam
        .map_mut()
        .spawn_landmark("corner", LandmarkGeometry::Euclidean)
        .expect("fits");
    let range = slam.map().landmark(landmark).expect("exists").range();
    slam.map_mut().estimate_mut().init_block(
        range,
        &nalgebra::DVector::from_vec(vec![3.0, 0.0, 0.0]),
        &nalgebra::DVector::from_element(3, 0.25),
    );

    // Union skips the sensor block entirely: robot pose plus landmark.
    let union = slam
        .map()
        .update_union(sensor, landmark)
        .expect("pairing exists");
    assert_eq!(union.len(), 7 + 3);

    slam.begin_cycle();
    slam.record_match(
        sensor,
        landmark,
        nalgebra::DVector::from_vec(vec![3.3, 0.0, 0.0]),
        1.0,
    )
    .expect("pairing exists");
    let model = common::landmark_observer(union.len(), 0.01);
    let report = slam.apply_matched(&model).expect("pairing is live");
    assert_eq!(report.updates_applied, 1);
}
