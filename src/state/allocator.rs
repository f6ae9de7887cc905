//! First-fit slot allocation over the bounded state vector.

use thiserror::Error;

use crate::core::SlotRange;

/// Returned when no contiguous free span can hold a requested range.
///
/// This is the one recoverable allocation failure: callers may shrink the
/// request, remove entities, or skip the creation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("state capacity exceeded: requested {requested} contiguous slots, largest free span is {largest_free}")]
pub struct CapacityError {
    /// Number of contiguous slots that were requested.
    pub requested: usize,
    /// Largest contiguous free span at the time of the request.
    pub largest_free: usize,
}

/// Hands out disjoint [`SlotRange`]s over a state vector of fixed capacity.
///
/// Allocation is first-fit at the lowest start, so a given call sequence
/// always produces the same layout. Released ranges are coalesced with their
/// free neighbors and become reusable immediately.
#[derive(Debug, Clone)]
pub struct StateAllocator {
    capacity: usize,
    /// Free spans, sorted by start, never empty-sized, never adjacent.
    free: Vec<SlotRange>,
}

impl StateAllocator {
    /// Create an allocator over `capacity` slots, all initially free.
    pub fn new(capacity: usize) -> Self {
        let free = if capacity > 0 {
            vec![SlotRange::new(0, capacity)]
        } else {
            Vec::new()
        };
        Self { capacity, free }
    }

    /// Total number of slots managed.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently allocated.
    pub fn used_slots(&self) -> usize {
        self.capacity - self.free_slots()
    }

    /// Number of slots currently free (not necessarily contiguous).
    pub fn free_slots(&self) -> usize {
        self.free.iter().map(|r| r.size()).sum()
    }

    /// Largest contiguous free span.
    pub fn largest_free_span(&self) -> usize {
        self.free.iter().map(|r| r.size()).max().unwrap_or(0)
    }

    /// True when a request for `size` contiguous slots would succeed.
    ///
    /// Pure query: performs no allocation and never fails.
    pub fn capacity_for(&self, size: usize) -> bool {
        size == 0 || self.free.iter().any(|r| r.size() >= size)
    }

    /// Allocate `size` contiguous slots, first-fit at the lowest start.
    ///
    /// Zero-size requests always succeed and consume nothing.
    pub fn allocate(&mut self, size: usize) -> Result<SlotRange, CapacityError> {
        if size == 0 {
            return Ok(SlotRange::new(0, 0));
        }
        let slot = self
            .free
            .iter()
            .position(|r| r.size() >= size)
            .ok_or(CapacityError {
                requested: size,
                largest_free: self.largest_free_span(),
            })?;
        let span = self.free[slot];
        let allocated = SlotRange::new(span.start(), size);
        if span.size() == size {
            self.free.remove(slot);
        } else {
            self.free[slot] = SlotRange::new(span.start() + size, span.size() - size);
        }
        Ok(allocated)
    }

    /// Return `range` to the free pool, coalescing with free neighbors.
    ///
    /// Releasing slots that are already free, or slots outside the managed
    /// capacity, is a contract violation and panics.
    pub fn release(&mut self, range: SlotRange) {
        if range.is_empty() {
            return;
        }
        assert!(
            range.end() <= self.capacity,
            "released range {} exceeds capacity {}",
            range,
            self.capacity
        );
        for free in &self.free {
            assert!(
                !free.overlaps(&range),
                "double release of slots {} (already free: {})",
                range,
                free
            );
        }

        let at = self
            .free
            .iter()
            .position(|r| r.start() > range.start())
            .unwrap_or(self.free.len());
        self.free.insert(at, range);

        // Coalesce with the right neighbor first, then with the left.
        if at + 1 < self.free.len() && self.free[at].adjoins(&self.free[at + 1]) {
            let merged = SlotRange::new(
                self.free[at].start(),
                self.free[at].size() + self.free[at + 1].size(),
            );
            self.free[at] = merged;
            self.free.remove(at + 1);
        }
        if at > 0 && self.free[at - 1].adjoins(&self.free[at]) {
            let merged = SlotRange::new(
                self.free[at - 1].start(),
                self.free[at - 1].size() + self.free[at].size(),
            );
            self.free[at - 1] = merged;
            self.free.remove(at);
        }
    }

    /// Maximal contiguous spans of allocated slots, ascending by start.
    ///
    /// This is the complement of the free list. Adjacent entity ranges show
    /// up merged; callers that need per-entity ranges keep their own.
    pub fn used_ranges(&self) -> Vec<SlotRange> {
        let mut used = Vec::new();
        let mut cursor = 0;
        for free in &self.free {
            if free.start() > cursor {
                used.push(SlotRange::new(cursor, free.start() - cursor));
            }
            cursor = free.end();
        }
        if cursor < self.capacity {
            used.push(SlotRange::new(cursor, self.capacity - cursor));
        }
        used
    }

    /// All allocated slot indices, ascending.
    pub fn used_indices(&self) -> Vec<usize> {
        self.used_ranges()
            .iter()
            .flat_map(|r| r.indices())
            .collect()
    }
}
