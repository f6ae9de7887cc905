//! Slot ranges over the shared state vector.

use serde::{Deserialize, Serialize};

/// A contiguous half-open range `[start, start + size)` of state-vector slots.
///
/// Every live map entity that carries estimated state owns exactly one range.
/// Ranges of live entities never overlap; the allocator guarantees this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRange {
    start: usize,
    size: usize,
}

impl SlotRange {
    /// Create a new range covering `size` slots from `start`.
    #[inline]
    pub fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    /// First slot index covered by the range.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of slots covered.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// One past the last covered slot (exclusive end).
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    /// True when the range covers no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// True when `index` falls inside the range.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    /// True when the two ranges share at least one slot.
    #[inline]
    pub fn overlaps(&self, other: &SlotRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// True when `other` starts exactly where this range ends, or vice versa.
    #[inline]
    pub fn adjoins(&self, other: &SlotRange) -> bool {
        self.end() == other.start || other.end() == self.start
    }

    /// Iterate the covered slot indices in ascending order.
    #[inline]
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }

    /// A sub-range of the first `size` slots. Panics if `size` exceeds the range.
    #[inline]
    pub fn head(&self, size: usize) -> SlotRange {
        assert!(size <= self.size, "sub-range larger than parent range");
        SlotRange::new(self.start, size)
    }
}

impl std::fmt::Display for SlotRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..{})", self.start, self.end())
    }
}
