//! Nyquist (velocity folding) ambiguity test.
//!
//! Every sample under either side of the template is mapped through a fuzzy
//! function of its magnitude, and the cell receives the mean interest over
//! both sides combined.

use crate::detect::{DetectSummary, RayWrites, SideSample};
use crate::fuzzy::FuzzyFunction;
use crate::grid::Grid;
use crate::lookup::{LookupTable, Offset};
use crate::trace::{trace_event, trace_span};

/// Thresholds for the ambiguity test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbiguityParams {
    /// Minimum fraction of valid samples required on each side.
    pub min_pct_good: f64,
}

impl Default for AmbiguityParams {
    fn default() -> Self {
        Self { min_pct_good: 0.5 }
    }
}

/// Ambiguity detector bound to a lookup table built elsewhere.
pub struct AmbiguityDetector<'a, F> {
    table: &'a LookupTable,
    params: AmbiguityParams,
    fuzzy: F,
}

impl<'a, F: FuzzyFunction> AmbiguityDetector<'a, F> {
    /// Creates a detector; `fuzzy` maps `|v|` to interest per sample.
    pub fn new(table: &'a LookupTable, params: AmbiguityParams, fuzzy: F) -> Self {
        Self {
            table,
            params,
            fuzzy,
        }
    }

    /// Returns the thresholds.
    pub fn params(&self) -> &AmbiguityParams {
        &self.params
    }

    /// Returns the lookup table.
    pub fn table(&self) -> &'a LookupTable {
        self.table
    }

    /// Runs the test over every ray where both `data` and `mask` are valid.
    pub fn detect<G, M, O>(&self, data: &G, mask: &M, circular: bool, out: &mut O) -> DetectSummary
    where
        G: Grid + ?Sized,
        M: Grid + ?Sized,
        O: Grid + ?Sized,
    {
        let _span =
            trace_span!("ambiguity_detect", gates = data.nx(), rays = data.ny()).entered();
        let mut summary = DetectSummary::default();
        let mut scratch = Scratch::default();
        for ray in 0..data.ny() {
            let writes = self.ray_writes(data, mask, ray, circular, &mut scratch);
            summary.record(out, ray, writes.as_deref());
        }
        trace_event!(
            "ambiguity_summary",
            written = summary.cells_written,
            detections = summary.detections
        );
        summary
    }

    /// Parallel variant of [`AmbiguityDetector::detect`] with identical output.
    #[cfg(feature = "rayon")]
    pub fn detect_par<G, M, O>(
        &self,
        data: &G,
        mask: &M,
        circular: bool,
        out: &mut O,
    ) -> DetectSummary
    where
        G: Grid + Sync + ?Sized,
        M: Grid + Sync + ?Sized,
        O: Grid + ?Sized,
        F: Sync,
    {
        let _span = trace_span!(
            "ambiguity_detect",
            gates = data.nx(),
            rays = data.ny(),
            parallel = true
        )
        .entered();
        let results = crate::detect::rayon::map_rays(data.ny(), |ray| {
            let mut scratch = Scratch::default();
            self.ray_writes(data, mask, ray, circular, &mut scratch)
        });
        let mut summary = DetectSummary::default();
        for (ray, writes) in results.iter().enumerate() {
            summary.record(out, ray, writes.as_deref());
        }
        trace_event!(
            "ambiguity_summary",
            written = summary.cells_written,
            detections = summary.detections
        );
        summary
    }

    /// Runs the test along one ray. Returns false when `ray` is outside `data`.
    pub fn detect_ray<G, M, O>(
        &self,
        data: &G,
        mask: &M,
        ray: usize,
        circular: bool,
        out: &mut O,
    ) -> bool
    where
        G: Grid + ?Sized,
        M: Grid + ?Sized,
        O: Grid + ?Sized,
    {
        let mut scratch = Scratch::default();
        match self.ray_writes(data, mask, ray, circular, &mut scratch) {
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
    pub fn cell_value<G, M>(
        &self,
        data: &G,
        mask: &M,
        gate: usize,
        ray: usize,
        circular: bool,
    ) -> Option<f64>
    where
        G: Grid + ?Sized,
        M: Grid + ?Sized,
    {
        let mut scratch = Scratch::default();
        self.cell_value_with(data, mask, gate, ray, circular, &mut scratch)
    }

    fn ray_writes<G, M>(
        &self,
        data: &G,
        mask: &M,
        ray: usize,
        circular: bool,
        scratch: &mut Scratch,
    ) -> Option<RayWrites>
    where
        G: Grid + ?Sized,
        M: Grid + ?Sized,
    {
        if ray >= data.ny() {
            return None;
        }
        let mut writes = Vec::new();
        for gate in 0..data.nx() {
            if let Some(value) = self.cell_value_with(data, mask, gate, ray, circular, scratch) {
                writes.push((gate, value));
            }
        }
        Some(writes)
    }

    fn cell_value_with<G, M>(
        &self,
        data: &G,
        mask: &M,
        gate: usize,
        ray: usize,
        circular: bool,
        scratch: &mut Scratch,
    ) -> Option<f64>
    where
        G: Grid + ?Sized,
        M: Grid + ?Sized,
    {
        if data.is_missing(gate, ray) || mask.is_missing(gate, ray) {
            return None;
        }
        let lookup = self.table.gate(gate)?;
        self.gather(data, lookup.side_a(), ray, circular, &mut scratch.a);
        self.gather(data, lookup.side_b(), ray, circular, &mut scratch.b);

        let min_pct_good = self.params.min_pct_good;
        if !scratch.a.passes(min_pct_good) || !scratch.b.passes(min_pct_good) {
            return None;
        }
        let count = scratch.a.values.len() + scratch.b.values.len();
        if count == 0 {
            return Some(0.0);
        }
        let sum: f64 = scratch.a.values.iter().chain(&scratch.b.values).sum();
        Some(sum / count as f64)
    }

    /// Only offsets landing on a valid sample count as attempted.
    fn gather<G: Grid + ?Sized>(
        &self,
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
            if let Some(value) = data.get(gate, target) {
                side.attempted += 1;
                side.values.push(self.fuzzy.apply(value.abs()));
            }
        }
    }
}

#[derive(Default)]
struct Scratch {
    a: SideSample,
    b: SideSample,
}
