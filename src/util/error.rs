//! Error types for sweepmatch.

use thiserror::Error;

/// Result alias for sweepmatch operations.
pub type SweepMatchResult<T> = std::result::Result<T, SweepMatchError>;

/// Errors raised while constructing grids, geometry, and lookup tables.
///
/// Per-cell processing never fails; these only surface at construction time.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SweepMatchError {
    /// Grid dimensions are zero or overflow.
    #[error("invalid grid dimensions: {nx}x{ny}")]
    InvalidDimensions { nx: usize, ny: usize },
    /// The backing buffer is shorter than the grid requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Sweep geometry parameters are unusable.
    #[error("invalid sweep geometry: {reason}")]
    InvalidGeometry { reason: &'static str },
    /// Template box parameters are unusable.
    #[error("invalid template box: {reason}")]
    InvalidTemplateBox { reason: &'static str },
    /// Fuzzy function knots are unusable.
    #[error("invalid fuzzy function: {reason}")]
    InvalidFuzzyFunction { reason: &'static str },
}
