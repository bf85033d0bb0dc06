//! Clump labels on the polar grid.
//!
//! Clumps come from an external connected-component labeler. This module
//! paints their compact labels into an output grid, optionally spreading each
//! clump over its template footprint and stacking overlapping clumps into a
//! packed label code.

pub mod extend;
pub mod packer;

pub use extend::ClumpExtender;
pub use packer::{compact, decode, merge, PackedLabel};

/// One cell of the polar grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Range gate index.
    pub gate: usize,
    /// Ray (azimuth) index.
    pub ray: usize,
}

impl Cell {
    pub fn new(gate: usize, ray: usize) -> Self {
        Self { gate, ray }
    }
}

/// A labeled connected set of cells.
pub trait Region {
    /// Clump identifier.
    fn id(&self) -> usize;

    /// Cells belonging to the clump.
    fn cells(&self) -> &[Cell];
}

/// Owned clump.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clump {
    id: usize,
    cells: Vec<Cell>,
}

impl Clump {
    pub fn new(id: usize, cells: Vec<Cell>) -> Self {
        Self { id, cells }
    }

    /// Builds a clump from `(gate, ray)` pairs.
    pub fn from_pairs<I>(id: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let cells = pairs
            .into_iter()
            .map(|(gate, ray)| Cell::new(gate, ray))
            .collect();
        Self { id, cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Region for Clump {
    fn id(&self) -> usize {
        self.id
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
