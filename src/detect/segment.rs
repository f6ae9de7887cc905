//! Segment candidates, selected features, and search regions.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Axis-aligned search region in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionOfInterest {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Region width.
    pub width: f64,
    /// Region height.
    pub height: f64,
}

impl RegionOfInterest {
    /// Create a region from its top-left corner and extent.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the point lies inside the region (edges inclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A raw candidate segment produced by an extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCandidate {
    /// First endpoint x.
    pub x1: f64,
    /// First endpoint y.
    pub y1: f64,
    /// Second endpoint x.
    pub x2: f64,
    /// Second endpoint y.
    pub y2: f64,
    /// Opaque appearance patch carried through for later matching.
    pub appearance: Vec<u8>,
}

impl SegmentCandidate {
    /// Candidate with the given endpoints and no appearance data.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            appearance: Vec::new(),
        }
    }

    /// Squared endpoint distance (avoids sqrt).
    #[inline]
    pub fn length_squared(&self) -> f64 {
        let dx = self.x1 - self.x2;
        let dy = self.y1 - self.y2;
        dx * dx + dy * dy
    }
}

/// The feature a successful detection fills in.
///
/// The measurement is the 4-vector `(x1, y1, x2, y2)` of the selected
/// candidate's endpoints. A failed detection leaves the feature exactly as
/// it was.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentFeature {
    /// Endpoint measurement `(x1, y1, x2, y2)`.
    pub measurement: DVector<f64>,
    /// Match score of the detection.
    pub score: f64,
    /// Appearance patch of the selected candidate.
    pub appearance: Vec<u8>,
}

impl SegmentFeature {
    /// An empty feature awaiting its first detection.
    pub fn new() -> Self {
        Self {
            measurement: DVector::zeros(4),
            score: 0.0,
            appearance: Vec::new(),
        }
    }
}

impl Default for SegmentFeature {
    fn default() -> Self {
        Self::new()
    }
}
