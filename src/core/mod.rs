//! Core types for the TaraSLAM estimator.
//!
//! This module provides the building blocks the rest of the crate is indexed
//! by: slot ranges over the shared state vector, and the quaternion/frame
//! math used by the 3D motion models.
//!
//! ## Type Categories
//!
//! ### State indexing
//! - [`SlotRange`]: Contiguous half-open interval of state-vector slots,
//!   exclusively owned by one live map entity
//!
//! ### Frame math
//! - [`frame`]: Hamilton quaternion product, rotation-vector exponential and
//!   their Jacobians, plus the 7-element origin frame
//!
//! All quaternions are scalar-first `[w, x, y, z]` and a full frame is the
//! 7-vector `[px, py, pz, qw, qx, qy, qz]`.

mod indices;

pub mod frame;

pub use indices::SlotRange;
