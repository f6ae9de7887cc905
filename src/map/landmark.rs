//! Landmarks and their geometric parameterizations.

use crate::core::SlotRange;

use super::{LandmarkId, Observation, SensorId};

/// Geometric parameterization of a landmark.
///
/// A landmark commits to one parameterization for its lifetime; the variant
/// fixes how many state slots it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkGeometry {
    /// Euclidean 3D point (3 slots).
    Euclidean,
    /// Inverse-depth point: anchor, azimuth/elevation, inverse depth (6 slots).
    InverseDepth,
    /// Anchored homogeneous point (7 slots).
    AnchoredHomogeneous,
}

impl LandmarkGeometry {
    /// Slots this parameterization occupies.
    #[inline]
    pub fn state_size(&self) -> usize {
        match self {
            LandmarkGeometry::Euclidean => 3,
            LandmarkGeometry::InverseDepth => 6,
            LandmarkGeometry::AnchoredHomogeneous => 7,
        }
    }
}

/// A mapped landmark.
///
/// Owns one [`Observation`] per live sensor; the map keeps that set complete
/// as sensors and landmarks come and go.
#[derive(Debug, Clone)]
pub struct Landmark {
    id: LandmarkId,
    name: String,
    geometry: LandmarkGeometry,
    range: SlotRange,
    observations: Vec<Observation>,
}

impl Landmark {
    pub(crate) fn new(
        id: LandmarkId,
        name: &str,
        geometry: LandmarkGeometry,
        range: SlotRange,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            geometry,
            range,
            observations: Vec::new(),
        }
    }

    /// Landmark id.
    #[inline]
    pub fn id(&self) -> LandmarkId {
        self.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameterization this landmark was created with.
    #[inline]
    pub fn geometry(&self) -> LandmarkGeometry {
        self.geometry
    }

    /// Slot range owned by this landmark.
    #[inline]
    pub fn range(&self) -> SlotRange {
        self.range
    }

    /// All observations of this landmark, one per live sensor.
    #[inline]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Mutable access to the observations.
    #[inline]
    pub fn observations_mut(&mut self) -> &mut [Observation] {
        &mut self.observations
    }

    /// The observation pairing this landmark with `sensor`.
    pub fn observation_of(&self, sensor: SensorId) -> Option<&Observation> {
        self.observations.iter().find(|o| o.sensor() == sensor)
    }

    /// Mutable pairing with `sensor`.
    pub fn observation_of_mut(&mut self, sensor: SensorId) -> Option<&mut Observation> {
        self.observations.iter_mut().find(|o| o.sensor() == sensor)
    }

    pub(crate) fn add_observation(&mut self, sensor: SensorId) {
        debug_assert!(
            self.observation_of(sensor).is_none(),
            "duplicate observation pairing"
        );
        self.observations.push(Observation::new(sensor, self.id));
    }

    pub(crate) fn drop_observations_of(&mut self, sensor: SensorId) {
        self.observations.retain(|o| o.sensor() != sensor);
    }
}
