//! Longest-candidate selection over an extractor's output.

use log::debug;
use nalgebra::DVector;

use super::{RegionOfInterest, SegmentCandidate, SegmentFeature};

/// Produces candidate segments from an image, bounded to a search region.
///
/// Implementations wrap the actual image-processing backend; the region is
/// a search bound only, and extractors are free to return candidates whose
/// endpoints stick out of it.
pub trait SegmentExtractor {
    /// The image type the extractor consumes.
    type Image;

    /// Extract candidate segments, searching inside `roi` when given.
    fn extract(&self, image: &Self::Image, roi: Option<&RegionOfInterest>)
        -> Vec<SegmentCandidate>;
}

/// Selects the single strongest segment from an extractor's candidates.
///
/// Strongest means the largest squared endpoint distance; among equals the
/// first candidate in extraction order wins. With zero candidates the
/// detection fails and the output feature is left untouched.
#[derive(Debug, Clone)]
pub struct LongestSegmentDetector<E> {
    extractor: E,
    require_endpoint_in_roi: bool,
}

impl<E: SegmentExtractor> LongestSegmentDetector<E> {
    /// Wrap an extractor; endpoint containment filtering starts disabled.
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            require_endpoint_in_roi: false,
        }
    }

    /// Require both endpoints of the winning candidate to lie inside the
    /// region of interest.
    ///
    /// Off by default: the region then only bounds the search, and
    /// candidates may extend past it.
    pub fn with_endpoint_containment(mut self, enabled: bool) -> Self {
        self.require_endpoint_in_roi = enabled;
        self
    }

    /// True when endpoint containment filtering is enabled.
    pub fn requires_endpoint_in_roi(&self) -> bool {
        self.require_endpoint_in_roi
    }

    /// The wrapped extractor.
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Run one detection.
    ///
    /// On success fills `feature` with the winning candidate's endpoint
    /// measurement, its appearance patch and score 1.0, and returns `true`.
    /// Returns `false` without touching `feature` when no candidate
    /// survives.
    pub fn detect_in(
        &self,
        image: &E::Image,
        feature: &mut SegmentFeature,
        roi: Option<&RegionOfInterest>,
    ) -> bool {
        let mut candidates = self.extractor.extract(image, roi);
        if self.require_endpoint_in_roi {
            if let Some(region) = roi {
                candidates.retain(|c| {
                    region.contains(c.x1, c.y1) && region.contains(c.x2, c.y2)
                });
            }
        }

        let mut best: Option<&SegmentCandidate> = None;
        for candidate in &candidates {
            let better = match best {
                // Strict comparison keeps the first of equals.
                Some(current) => candidate.length_squared() > current.length_squared(),
                None => true,
            };
            if better {
                best = Some(candidate);
            }
        }

        match best {
            Some(winner) => {
                feature.measurement =
                    DVector::from_vec(vec![winner.x1, winner.y1, winner.x2, winner.y2]);
                feature.score = 1.0;
                feature.appearance = winner.appearance.clone();
                true
            }
            None => {
                debug!("Detection produced no candidates");
                false
            }
        }
    }
}
