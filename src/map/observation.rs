//! Sensor/landmark observation pairings.

use nalgebra::DVector;

use super::{LandmarkId, SensorId};

/// Where an observation stands within the current estimation cycle.
///
/// Every observation re-enters `Pending` when a cycle begins. A successful
/// detector match moves it to `Matched`; applying the filter update settles
/// it as `Confirmed`, and a skipped or failed update as `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationStatus {
    /// Not yet searched, or searched without a match this cycle.
    Pending,
    /// Matched by the detector; carries a fresh measurement.
    Matched,
    /// Filter update applied this cycle.
    Confirmed,
    /// Update skipped this cycle; the estimate was left untouched.
    Rejected,
}

/// The pairing of one sensor with one landmark.
///
/// Observations occupy no state slots. They carry the latest matched
/// measurement (retained across cycles), the match score, the per-cycle
/// status, and lifetime counters.
#[derive(Debug, Clone)]
pub struct Observation {
    sensor: SensorId,
    landmark: LandmarkId,
    measurement: DVector<f64>,
    score: f64,
    status: ObservationStatus,
    searches: u32,
    matches: u32,
    confirmations: u32,
}

impl Observation {
    /// Create a fresh pairing with no measurement yet.
    pub fn new(sensor: SensorId, landmark: LandmarkId) -> Self {
        Self {
            sensor,
            landmark,
            measurement: DVector::zeros(0),
            score: 0.0,
            status: ObservationStatus::Pending,
            searches: 0,
            matches: 0,
            confirmations: 0,
        }
    }

    /// The observing sensor.
    #[inline]
    pub fn sensor(&self) -> SensorId {
        self.sensor
    }

    /// The observed landmark.
    #[inline]
    pub fn landmark(&self) -> LandmarkId {
        self.landmark
    }

    /// Latest matched measurement; empty until the first match.
    #[inline]
    pub fn measurement(&self) -> &DVector<f64> {
        &self.measurement
    }

    /// Score of the latest match.
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Current cycle status.
    #[inline]
    pub fn status(&self) -> ObservationStatus {
        self.status
    }

    /// Cycles in which this pairing was searched.
    #[inline]
    pub fn searches(&self) -> u32 {
        self.searches
    }

    /// Lifetime number of detector matches.
    #[inline]
    pub fn matches(&self) -> u32 {
        self.matches
    }

    /// Lifetime number of applied updates.
    #[inline]
    pub fn confirmations(&self) -> u32 {
        self.confirmations
    }

    /// Re-enter `Pending` for a new cycle, counting the search.
    pub fn reset(&mut self) {
        self.status = ObservationStatus::Pending;
        self.searches += 1;
    }

    /// Record a detector match for this cycle.
    pub fn record_match(&mut self, measurement: DVector<f64>, score: f64) {
        assert_eq!(
            self.status,
            ObservationStatus::Pending,
            "match recorded twice in one cycle"
        );
        self.measurement = measurement;
        self.score = score;
        self.status = ObservationStatus::Matched;
        self.matches += 1;
    }

    /// Settle a matched observation as confirmed (update applied).
    pub fn confirm(&mut self) {
        assert_eq!(
            self.status,
            ObservationStatus::Matched,
            "only a matched observation can be confirmed"
        );
        self.status = ObservationStatus::Confirmed;
        self.confirmations += 1;
    }

    /// Settle a matched observation as rejected (update skipped).
    pub fn reject(&mut self) {
        assert_eq!(
            self.status,
            ObservationStatus::Matched,
            "only a matched observation can be rejected"
        );
        self.status = ObservationStatus::Rejected;
    }
}
