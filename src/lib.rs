//! SweepMatch is a polar-grid template matching engine for single radar sweeps.
//!
//! A [`LookupTable`] converts a kilometre template box into per-gate azimuth
//! offsets once per sweep geometry. The table then drives a rotational shear
//! (mesocyclone) test, a Nyquist ambiguity test, and a clump labeler that
//! spreads connected-component labels over the template footprint. Parallel
//! detector variants are available with the `rayon` feature.

pub mod detect;
pub mod fuzzy;
pub mod geometry;
pub mod grid;
pub mod label;
pub mod lookup;
pub mod lowlevel;
mod trace;
pub mod util;

pub use detect::{
    AmbiguityDetector, AmbiguityParams, DetectSummary, ShearDetector, ShearParams,
};
pub use fuzzy::{FuzzyFunction, PiecewiseLinear};
pub use geometry::{SweepGeom, SweepGeometry};
pub use grid::{Grid, PolarGrid};
pub use label::{Cell, Clump, ClumpExtender, PackedLabel, Region};
pub use lookup::{LookupTable, TemplateBox};
pub use util::{SweepMatchError, SweepMatchResult};
