//! Segment detection front for observation matching.
//!
//! The concrete extraction of candidate segments from an image is a
//! collaborator behind the [`SegmentExtractor`] trait; this module owns only
//! the selection rule and the feature/region types the estimator exchanges
//! with it.
//!
//! - [`LongestSegmentDetector`]: Picks the candidate with the largest
//!   squared endpoint distance, first-wins on ties
//! - [`SegmentCandidate`] / [`SegmentFeature`]: Raw candidates in, selected
//!   feature out
//! - [`RegionOfInterest`]: Search bound; endpoint containment filtering is
//!   an explicit option, off by default

mod detector;
mod segment;

pub use detector::{LongestSegmentDetector, SegmentExtractor};
pub use segment::{RegionOfInterest, SegmentCandidate, SegmentFeature};
