//! Shared-state storage and bookkeeping.
//!
//! The whole estimator works over one bounded Gaussian state: a mean vector
//! and a covariance matrix of fixed capacity, logically partitioned into
//! per-entity slot ranges.
//!
//! ## Type Categories
//!
//! ### Storage
//! - [`StateEstimate`]: The mean vector and covariance matrix, with block
//!   accessors over [`SlotRange`](crate::core::SlotRange)s and index lists
//!
//! ### Bookkeeping
//! - [`StateAllocator`]: First-fit allocator handing out disjoint slot
//!   ranges, with a non-allocating capacity pre-check
//! - [`IdPool`]: Recycling issuer of small unique entity ids
//!
//! Allocation failure is recoverable ([`CapacityError`]); handing the
//! storage a block of the wrong shape is a contract violation and panics.

mod allocator;
mod gaussian;
mod ids;

pub use allocator::{CapacityError, StateAllocator};
pub use gaussian::StateEstimate;
pub use ids::IdPool;
