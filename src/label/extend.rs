//! Painting clump labels into an output grid.

use crate::grid::Grid;
use crate::label::packer::{compact, merge};
use crate::label::Region;
use crate::lookup::LookupTable;
use crate::trace::{trace_event, trace_span};

/// Writes clump labels, optionally spread over each cell's template footprint.
pub struct ClumpExtender<'a> {
    table: &'a LookupTable,
    extend: bool,
}

impl<'a> ClumpExtender<'a> {
    /// Creates an extender. With `extend` off only the clump cells are written.
    pub fn new(table: &'a LookupTable, extend: bool) -> Self {
        Self { table, extend }
    }

    /// True when labels are spread over the template footprint.
    pub fn extends(&self) -> bool {
        self.extend
    }

    /// Paints one clump into `out`. Returns the number of cells written.
    ///
    /// Without extension each clump cell is overwritten with the compact
    /// label. With extension every side A and side B offset of each cell's
    /// gate is visited, and the target cell merges the label into whatever
    /// code it already holds.
    pub fn apply<R, O>(&self, region: &R, circular: bool, out: &mut O) -> usize
    where
        R: Region + ?Sized,
        O: Grid + ?Sized,
    {
        let id = region.id();
        let label = compact(id) as f64;
        let mut written = 0usize;

        if !self.extend {
            for cell in region.cells() {
                if out.set(cell.gate, cell.ray, label) {
                    written += 1;
                }
            }
            return written;
        }

        let (nx, ny) = (out.nx(), out.ny());
        for cell in region.cells() {
            let Some(lookup) = self.table.gate(cell.gate) else {
                continue;
            };
            for offset in lookup.all_offsets() {
                let Some((gate, ray)) = offset.resolve(cell.ray, nx, ny, circular) else {
                    continue;
                };
                let value = match out.get(gate, ray).and_then(label_code) {
                    Some(previous) => merge(previous, id) as f64,
                    None => label,
                };
                if out.set(gate, ray, value) {
                    written += 1;
                }
            }
        }
        written
    }

    /// Paints `regions` in order. Returns the total number of cells written.
    pub fn apply_all<R, O>(&self, regions: &[R], circular: bool, out: &mut O) -> usize
    where
        R: Region,
        O: Grid + ?Sized,
    {
        let _span = trace_span!("clump_extend", clumps = regions.len(), extend = self.extend)
            .entered();
        let mut written = 0usize;
        for region in regions {
            written += self.apply(region, circular, out);
        }
        trace_event!("clump_summary", written = written);
        written
    }
}

/// Interprets a stored grid value as a label code.
fn label_code(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}
