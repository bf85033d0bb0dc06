//! Two-sided template detectors.
//!
//! Both detectors visit every valid cell of a sweep, gather the samples under
//! the side A and side B windows of the cell's gate, and write one statistic
//! per cell. Each ray is computed independently from the input grid, so a
//! ray's writes are collected first and applied afterwards; the `rayon`
//! feature uses the same split to map rays in parallel.

pub mod ambiguity;
pub mod shear;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;

pub use ambiguity::{AmbiguityDetector, AmbiguityParams};
pub use shear::{ShearDetector, ShearParams};

use crate::grid::Grid;
use crate::trace::trace_debug;

/// `(gate, value)` pairs produced for one ray.
pub(crate) type RayWrites = Vec<(usize, f64)>;

/// Counters for one whole-sweep detector run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetectSummary {
    /// Rays visited.
    pub rays: usize,
    /// Rays that could not be processed.
    pub skipped_rays: usize,
    /// Output cells written, including explicit zeros.
    pub cells_written: usize,
    /// Output cells written with a non-zero value.
    pub detections: usize,
}

impl DetectSummary {
    /// Applies one ray's writes to `out` and updates the counters.
    pub(crate) fn record<O: Grid + ?Sized>(
        &mut self,
        out: &mut O,
        ray: usize,
        writes: Option<&[(usize, f64)]>,
    ) {
        self.rays += 1;
        let Some(writes) = writes else {
            self.skipped_rays += 1;
            trace_debug!("ray_skipped", ray = ray);
            return;
        };
        for &(gate, value) in writes {
            if out.set(gate, ray, value) {
                self.cells_written += 1;
                if value != 0.0 {
                    self.detections += 1;
                }
            }
        }
    }
}

/// Samples gathered under one side of the template.
#[derive(Debug, Default)]
pub(crate) struct SideSample {
    /// Offsets that resolved to a cell of the grid.
    pub attempted: usize,
    /// Values contributed by those cells.
    pub values: Vec<f64>,
}

impl SideSample {
    pub fn clear(&mut self) {
        self.attempted = 0;
        self.values.clear();
    }

    /// Fraction of attempted offsets that contributed a value.
    pub fn pct_good(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.values.len() as f64 / self.attempted as f64
    }

    /// True when the side has samples and meets `min_pct_good`.
    pub fn passes(&self, min_pct_good: f64) -> bool {
        self.attempted > 0 && self.pct_good() >= min_pct_good
    }
}

#[cfg(test)]
mod tests {
    use super::{DetectSummary, SideSample};
    use crate::grid::{Grid, PolarGrid};

    #[test]
    fn record_counts_writes_and_detections() {
        let mut out = PolarGrid::new(4, 2, -1.0).unwrap();
        let mut summary = DetectSummary::default();
        summary.record(&mut out, 1, Some([(0, 0.0), (2, 0.7), (9, 1.0)].as_slice()));
        summary.record(&mut out, 0, None);
        assert_eq!(
            summary,
            DetectSummary {
                rays: 2,
                skipped_rays: 1,
                cells_written: 2,
                detections: 1,
            }
        );
        assert_eq!(out.get(0, 1), Some(0.0));
        assert_eq!(out.get(2, 1), Some(0.7));
    }

    #[test]
    fn side_sample_gating() {
        let mut side = SideSample::default();
        assert!(!side.passes(0.0));
        side.attempted = 4;
        side.values.extend([1.0, 2.0]);
        assert!((side.pct_good() - 0.5).abs() < 1e-12);
        assert!(side.passes(0.5));
        assert!(!side.passes(0.51));
        side.clear();
        assert_eq!(side.attempted, 0);
        assert!(side.values.is_empty());
    }
}
