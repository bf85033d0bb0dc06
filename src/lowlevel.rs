//! Low-level building blocks.
//!
//! These expose the per-gate offset construction and the label packing
//! arithmetic for callers that drive the template themselves. Most users
//! should prefer [`LookupTable`](crate::LookupTable) and the detectors.

pub use crate::detect::shear::shear_difference;
pub use crate::label::packer::{compact, decode, merge, CAPACITY, THREE_LABELS, TWO_LABELS};
pub use crate::lookup::{
    GateLookup, GateOffsets, GateSampling, Offset, MAX_WINDOW_DEG, NEAR_RADAR_KM,
};
