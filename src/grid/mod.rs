//! Polar data grids.
//!
//! The `x` axis is the range gate and the `y` axis is the ray (azimuth index).
//! `Grid` is the narrow capability the detectors need; `PolarGrid` is an owned
//! row-per-ray implementation with a sentinel for missing cells.

use crate::util::{SweepMatchError, SweepMatchResult};

/// Read/write access to a 2D grid with missing-value semantics.
pub trait Grid {
    /// Number of range gates.
    fn nx(&self) -> usize;

    /// Number of rays.
    fn ny(&self) -> usize;

    /// Returns the value at `(x, y)`, or `None` when missing or out of bounds.
    fn get(&self, x: usize, y: usize) -> Option<f64>;

    /// Stores `value` at `(x, y)`. Returns false when the cell is out of bounds.
    fn set(&mut self, x: usize, y: usize, value: f64) -> bool;

    /// Marks every cell missing.
    fn set_all_missing(&mut self);

    /// Returns true when `(x, y)` holds no value.
    fn is_missing(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_none()
    }
}

/// Owned polar grid stored ray by ray.
#[derive(Clone, Debug, PartialEq)]
pub struct PolarGrid {
    data: Vec<f64>,
    nx: usize,
    ny: usize,
    missing: f64,
}

impl PolarGrid {
    /// Creates a grid with every cell missing.
    pub fn new(nx: usize, ny: usize, missing: f64) -> SweepMatchResult<Self> {
        let len = required_len(nx, ny)?;
        Ok(Self {
            data: vec![missing; len],
            nx,
            ny,
            missing,
        })
    }

    /// Wraps ray-major values (`index = y * nx + x`).
    pub fn from_values(
        data: Vec<f64>,
        nx: usize,
        ny: usize,
        missing: f64,
    ) -> SweepMatchResult<Self> {
        let needed = required_len(nx, ny)?;
        if data.len() < needed {
            return Err(SweepMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        let mut data = data;
        data.truncate(needed);
        Ok(Self {
            data,
            nx,
            ny,
            missing,
        })
    }

    /// Returns the missing-value sentinel.
    pub fn missing(&self) -> f64 {
        self.missing
    }

    /// Returns the raw buffer including missing sentinels.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Returns the raw values of ray `y`.
    pub fn ray(&self, y: usize) -> Option<&[f64]> {
        if y >= self.ny {
            return None;
        }
        let start = y * self.nx;
        self.data.get(start..start + self.nx)
    }

    /// Counts cells holding a value.
    pub fn count_valid(&self) -> usize {
        self.data.iter().filter(|&&v| !self.is_sentinel(v)).count()
    }

    fn is_sentinel(&self, value: f64) -> bool {
        value == self.missing || (self.missing.is_nan() && value.is_nan())
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.nx || y >= self.ny {
            return None;
        }
        Some(y * self.nx + x)
    }
}

impl Grid for PolarGrid {
    fn nx(&self) -> usize {
        self.nx
    }

    fn ny(&self) -> usize {
        self.ny
    }

    fn get(&self, x: usize, y: usize) -> Option<f64> {
        let value = *self.data.get(self.index(x, y)?)?;
        if self.is_sentinel(value) {
            None
        } else {
            Some(value)
        }
    }

    fn set(&mut self, x: usize, y: usize, value: f64) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }

    fn set_all_missing(&mut self) {
        let missing = self.missing;
        self.data.iter_mut().for_each(|v| *v = missing);
    }
}

fn required_len(nx: usize, ny: usize) -> SweepMatchResult<usize> {
    if nx == 0 || ny == 0 {
        return Err(SweepMatchError::InvalidDimensions { nx, ny });
    }
    nx.checked_mul(ny)
        .ok_or(SweepMatchError::InvalidDimensions { nx, ny })
}
