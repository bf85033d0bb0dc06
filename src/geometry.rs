//! Sweep geometry.

use crate::util::{SweepMatchError, SweepMatchResult};

/// Range and azimuth sampling of a single sweep.
pub trait SweepGeometry {
    /// Number of range gates per ray.
    fn n_gates(&self) -> usize;

    /// Gate spacing in km.
    fn delta_gate_km(&self) -> f64;

    /// Azimuth spacing between rays in degrees.
    fn delta_az_deg(&self) -> f64;

    /// Range to the centre of gate 0 in km.
    fn start_range_km(&self) -> f64;

    /// True when rays cover a full 360° and the azimuth axis wraps.
    fn is_circular(&self) -> bool;

    /// Range to the centre of `gate` in km.
    fn gate_range_km(&self, gate: usize) -> f64 {
        self.start_range_km() + self.delta_gate_km() * gate as f64
    }
}

/// Plain sweep geometry value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepGeom {
    n_gates: usize,
    delta_gate_km: f64,
    delta_az_deg: f64,
    start_range_km: f64,
    circular: bool,
}

impl SweepGeom {
    /// Creates a validated geometry.
    pub fn new(
        n_gates: usize,
        start_range_km: f64,
        delta_gate_km: f64,
        delta_az_deg: f64,
        circular: bool,
    ) -> SweepMatchResult<Self> {
        let geom = Self {
            n_gates,
            delta_gate_km,
            delta_az_deg,
            start_range_km,
            circular,
        };
        validate(&geom)?;
        Ok(geom)
    }
}

impl SweepGeometry for SweepGeom {
    fn n_gates(&self) -> usize {
        self.n_gates
    }

    fn delta_gate_km(&self) -> f64 {
        self.delta_gate_km
    }

    fn delta_az_deg(&self) -> f64 {
        self.delta_az_deg
    }

    fn start_range_km(&self) -> f64 {
        self.start_range_km
    }

    fn is_circular(&self) -> bool {
        self.circular
    }
}

/// Checks the values a lookup build divides by.
pub(crate) fn validate<G: SweepGeometry + ?Sized>(geom: &G) -> SweepMatchResult<()> {
    if geom.n_gates() == 0 {
        return Err(SweepMatchError::InvalidGeometry {
            reason: "sweep has no gates",
        });
    }
    let dg = geom.delta_gate_km();
    if !dg.is_finite() || dg <= 0.0 {
        return Err(SweepMatchError::InvalidGeometry {
            reason: "gate spacing must be finite and > 0",
        });
    }
    let daz = geom.delta_az_deg();
    if !daz.is_finite() || daz <= 0.0 {
        return Err(SweepMatchError::InvalidGeometry {
            reason: "azimuth spacing must be finite and > 0",
        });
    }
    if !geom.start_range_km().is_finite() {
        return Err(SweepMatchError::InvalidGeometry {
            reason: "start range must be finite",
        });
    }
    Ok(())
}
