//! Rotational shear (mesocyclone) template test.
//!
//! A cell is a candidate when the mean velocity on one side of the ray is
//! positive, the mean on the other side is negative, the two differ by more
//! than `min_diff`, and on each side most samples are at least half as strong
//! as that side's mean. Candidates are scored by passing the absolute
//! difference of the means through a fuzzy interest function.

use crate::detect::{DetectSummary, RayWrites, SideSample};
use crate::fuzzy::FuzzyFunction;
use crate::grid::Grid;
use crate::lookup::{LookupTable, Offset};
use crate::trace::{trace_event, trace_span};
use crate::util::math::mean;

/// Thresholds for the shear test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShearParams {
    /// Minimum fraction of valid samples required on each side.
    pub min_pct_good: f64,
    /// Minimum absolute difference between the side means (data units).
    pub min_diff: f64,
    /// Minimum fraction of samples on each side beyond half the side mean.
    pub min_pct_large: f64,
}

impl Default for ShearParams {
    fn default() -> Self {
        Self {
            min_pct_good: 0.5,
            min_diff: 10.0,
            min_pct_large: 0.5,
        }
    }
}

/// Shear detector bound to a lookup table built elsewhere.
pub struct ShearDetector<'a, F> {
    table: &'a LookupTable,
    params: ShearParams,
    fuzzy: F,
}

impl<'a, F: FuzzyFunction> ShearDetector<'a, F> {
    /// Creates a detector; `fuzzy` maps the mean difference to interest.
    pub fn new(table: &'a LookupTable, params: ShearParams, fuzzy: F) -> Self {
        Self {
            table,
            params,
            fuzzy,
        }
    }

    /// Returns the thresholds.
    pub fn params(&self) -> &ShearParams {
        &self.params
    }

    /// Returns the lookup table.
    pub fn table(&self) -> &'a LookupTable {
        self.table
    }

    /// Runs the test over every ray of `data`, writing into `out`.
    ///
    /// Cells that fail gating are left untouched; gated cells without a shear
    /// pattern are written as `0.0`.
    pub fn detect<G, O>(&self, data: &G, circular: bool, out: &mut O) -> DetectSummary
    where
        G: Grid + ?Sized,
        O: Grid + ?Sized,
    {
        let _span = trace_span!("shear_detect", gates = data.nx(), rays = data.ny()).entered();
        let mut summary = DetectSummary::default();
        let mut scratch = Scratch::default();
        for ray in 0..data.ny() {
            let writes = self.ray_writes(data, ray, circular, &mut scratch);
            summary.record(out, ray, writes.as_deref());
        }
        trace_event!(
            "shear_summary",
            written = summary.cells_written,
            detections = summary.detections
        );
        summary
    }

    /// Parallel variant of [`ShearDetector::detect`] with identical output.
    #[cfg(feature = "rayon")]
    pub fn detect_par<G, O>(&self, data: &G, circular: bool, out: &mut O) -> DetectSummary
    where
        G: Grid + Sync + ?Sized,
        O: Grid + ?Sized,
        F: Sync,
    {
        let _span = trace_span!(
            "shear_detect",
            gates = data.nx(),
            rays = data.ny(),
            parallel = true
        )
        .entered();
        let results = crate::detect::rayon::map_rays(data.ny(), |ray| {
            let mut scratch = Scratch::default();
            self.ray_writes(data, ray, circular, &mut scratch)
        });
        let mut summary = DetectSummary::default();
        for (ray, writes) in results.iter().enumerate() {
            summary.record(out, ray, writes.as_deref());
        }
        trace_event!(
            "shear_summary",
            written = summary.cells_written,
            detections = summary.detections
        );
        summary
    }

    /// Runs the test along one ray. Returns false when `ray` is outside `data`.
    pub fn detect_ray<G, O>(&self, data: &G, ray: usize, circular: bool, out: &mut O) -> bool
    where
        G: Grid + ?Sized,
        O: Grid + ?Sized,
    {
        let mut scratch = Scratch::default();
        match self.ray_writes(data, ray, circular, &mut scratch) {
            Some(writes) => {
                for (gate, value) in writes {
                    out.set(gate, ray, value);
                }
                true
            }
            None => false,
        }
    }

    /// Computes the output for one cell, `None` when it must stay untouched.
    pub fn cell_value<G: Grid + ?Sized>(
        &self,
        data: &G,
        gate: usize,
        ray: usize,
        circular: bool,
    ) -> Option<f64> {
        let mut scratch = Scratch::default();
        self.cell_value_with(data, gate, ray, circular, &mut scratch)
    }

    fn ray_writes<G: Grid + ?Sized>(
        &self,
        data: &G,
        ray: usize,
        circular: bool,
        scratch: &mut Scratch,
    ) -> Option<RayWrites> {
        if ray >= data.ny() {
            return None;
        }
        let mut writes = Vec::new();
        for gate in 0..data.nx() {
            if let Some(value) = self.cell_value_with(data, gate, ray, circular, scratch) {
                writes.push((gate, value));
            }
        }
        Some(writes)
    }

    fn cell_value_with<G: Grid + ?Sized>(
        &self,
        data: &G,
        gate: usize,
        ray: usize,
        circular: bool,
        scratch: &mut Scratch,
    ) -> Option<f64> {
        if data.is_missing(gate, ray) {
            return None;
        }
        let lookup = self.table.gate(gate)?;
        gather(data, lookup.side_a(), ray, circular, &mut scratch.a);
        gather(data, lookup.side_b(), ray, circular, &mut scratch.b);

        let min_pct_good = self.params.min_pct_good;
        if !scratch.a.passes(min_pct_good) || !scratch.b.passes(min_pct_good) {
            return None;
        }
        Some(
            match shear_difference(&scratch.a.values, &scratch.b.values, &self.params) {
                Some(diff) => self.fuzzy.apply(diff),
                None => 0.0,
            },
        )
    }
}

/// Returns `|mean(a) - mean(b)|` when the two sides form a shear couplet.
pub fn shear_difference(side_a: &[f64], side_b: &[f64], params: &ShearParams) -> Option<f64> {
    let ave1 = mean(side_a);
    let ave2 = mean(side_b);
    let opposite = (ave1 > 0.0 && ave2 < 0.0) || (ave1 < 0.0 && ave2 > 0.0);
    if !opposite {
        return None;
    }
    let diff = (ave1 - ave2).abs();
    if diff <= params.min_diff {
        return None;
    }
    if pct_large(side_a, ave1) < params.min_pct_large
        || pct_large(side_b, ave2) < params.min_pct_large
    {
        return None;
    }
    Some(diff)
}

/// Fraction of `values` beyond half of `side_mean`, in the direction of its sign.
fn pct_large(values: &[f64], side_mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let half = side_mean / 2.0;
    let large = if side_mean > 0.0 {
        values.iter().filter(|&&v| v > half).count()
    } else {
        values.iter().filter(|&&v| v < half).count()
    };
    large as f64 / values.len() as f64
}

#[derive(Default)]
struct Scratch {
    a: SideSample,
    b: SideSample,
}

/// Every offset that lands on the grid counts as attempted, valid or not.
fn gather<G: Grid + ?Sized>(
    data: &G,
    offsets: &[Offset],
    ray: usize,
    circular: bool,
    side: &mut SideSample,
) {
    side.clear();
    let (nx, ny) = (data.nx(), data.ny());
    for offset in offsets {
        let Some((gate, target)) = offset.resolve(ray, nx, ny, circular) else {
            continue;
        };
        side.attempted += 1;
        if let Some(value) = data.get(gate, target) {
            side.values.push(value);
        }
    }
}
