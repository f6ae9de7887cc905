//! Recycling id issue for map entities.

use std::collections::BTreeSet;

/// Issues small unique ids, reusing released ones smallest-first.
///
/// Each entity class (robots, sensors, landmarks) gets its own pool, so ids
/// are unique within a class but not across classes. No id is ever held by
/// two live entities.
#[derive(Debug, Clone, Default)]
pub struct IdPool {
    next: u32,
    released: BTreeSet<u32>,
}

impl IdPool {
    /// Create an empty pool; the first issued id is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the smallest id not currently live.
    pub fn get_id(&mut self) -> u32 {
        if let Some(&id) = self.released.iter().next() {
            self.released.remove(&id);
            return id;
        }
        let id = self.next;
        self.next += 1;
        id
    }

    /// Return `id` to the pool for reuse.
    ///
    /// Releasing an id that was never issued, or one already released, is a
    /// contract violation and panics.
    pub fn release_id(&mut self, id: u32) {
        assert!(id < self.next, "release of never-issued id {}", id);
        assert!(self.released.insert(id), "double release of id {}", id);
    }

    /// Number of ids currently live.
    pub fn live_count(&self) -> usize {
        self.next as usize - self.released.len()
    }
}
