//! Precomputed template offsets for every gate of a sweep.
//!
//! Building the table converts the kilometre template box into per-gate
//! azimuth index windows once; detectors then reuse it for every sweep with
//! the same geometry. The table never rebuilds itself. Callers decide whether
//! an existing table can be reused with [`LookupTable::matches`].

pub mod gate;
pub mod offsets;

pub use gate::{GateLookup, NEAR_RADAR_KM};
pub use offsets::{GateOffsets, GateSampling, Offset, MAX_WINDOW_DEG};

use crate::geometry::{self, SweepGeometry};
use crate::trace::{trace_event, trace_span};
use crate::util::{SweepMatchError, SweepMatchResult};

/// Template box dimensions in km.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemplateBox {
    /// Extent along range, centred on the gate.
    pub length_km: f64,
    /// Extent across the ray on each side.
    pub width_km: f64,
    /// Gap between the ray and the near edge of each side.
    pub width_offset_km: f64,
}

impl Default for TemplateBox {
    fn default() -> Self {
        Self {
            length_km: 4.0,
            width_km: 2.0,
            width_offset_km: 0.0,
        }
    }
}

impl TemplateBox {
    /// Creates a validated box.
    pub fn new(length_km: f64, width_km: f64, width_offset_km: f64) -> SweepMatchResult<Self> {
        let tpl = Self {
            length_km,
            width_km,
            width_offset_km,
        };
        tpl.validate()?;
        Ok(tpl)
    }

    fn validate(&self) -> SweepMatchResult<()> {
        let dims = [self.length_km, self.width_km, self.width_offset_km];
        if dims.iter().any(|v| !v.is_finite()) {
            return Err(SweepMatchError::InvalidTemplateBox {
                reason: "dimensions must be finite",
            });
        }
        if dims.iter().any(|&v| v < 0.0) {
            return Err(SweepMatchError::InvalidTemplateBox {
                reason: "dimensions must be non-negative",
            });
        }
        Ok(())
    }
}

/// One [`GateLookup`] per gate of a sweep.
#[derive(Clone, Debug)]
pub struct LookupTable {
    tpl: TemplateBox,
    gates: Vec<GateLookup>,
}

impl LookupTable {
    /// Builds the table for `tpl` over the gates of `geom`.
    pub fn build<G: SweepGeometry + ?Sized>(tpl: TemplateBox, geom: &G) -> SweepMatchResult<Self> {
        tpl.validate()?;
        geometry::validate(geom)?;

        let n_gates = geom.n_gates();
        let _span = trace_span!("lookup_build", gates = n_gates).entered();

        let sampling = GateSampling {
            n_gates,
            start_range_km: geom.start_range_km(),
            delta_gate_km: geom.delta_gate_km(),
            delta_az_deg: geom.delta_az_deg(),
        };
        let mut gates = Vec::with_capacity(n_gates);
        let mut near = 0usize;
        for gate in 0..n_gates {
            if geom.gate_range_km(gate) <= NEAR_RADAR_KM {
                near += 1;
                gates.push(GateLookup::near_radar(gate));
            } else {
                gates.push(GateLookup::full(&tpl, gate, &sampling));
            }
        }

        trace_event!("lookup_built", gates = n_gates, near_radar = near);
        Ok(Self { tpl, gates })
    }

    /// True when the table was built for exactly these box dimensions.
    pub fn matches(&self, length_km: f64, width_km: f64, width_offset_km: f64) -> bool {
        self.tpl.length_km == length_km
            && self.tpl.width_km == width_km
            && self.tpl.width_offset_km == width_offset_km
    }

    /// Returns the box the table was built for.
    pub fn template_box(&self) -> TemplateBox {
        self.tpl
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True when the table has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Returns the entry for `gate`.
    pub fn gate(&self, gate: usize) -> Option<&GateLookup> {
        self.gates.get(gate)
    }

    /// Iterates over all entries in gate order.
    pub fn iter(&self) -> impl Iterator<Item = &GateLookup> + '_ {
        self.gates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{LookupTable, TemplateBox};
    use crate::geometry::SweepGeom;
    use crate::util::SweepMatchError;

    #[test]
    fn near_radar_gates_are_empty() {
        let geom = SweepGeom::new(20, 0.0, 0.25, 1.0, true).unwrap();
        let table = LookupTable::build(TemplateBox::default(), &geom).unwrap();
        assert_eq!(table.len(), 20);
        // 2.0 km is gate 8; it is still near radar.
        for gate in 0..=8 {
            assert!(table.gate(gate).unwrap().is_near_radar(), "gate {gate}");
        }
        assert!(!table.gate(9).unwrap().is_near_radar());
        assert_eq!(table.gate(9).unwrap().gate(), 9);
    }

    #[test]
    fn matches_compares_exact_box() {
        let geom = SweepGeom::new(10, 0.0, 1.0, 1.0, true).unwrap();
        let tpl = TemplateBox::new(3.0, 1.5, 0.5).unwrap();
        let table = LookupTable::build(tpl, &geom).unwrap();
        assert!(table.matches(3.0, 1.5, 0.5));
        assert!(!table.matches(3.0, 1.5, 0.6));
        assert_eq!(table.template_box(), tpl);
    }

    #[test]
    fn rejects_negative_box() {
        let err = TemplateBox::new(1.0, -1.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            SweepMatchError::InvalidTemplateBox {
                reason: "dimensions must be non-negative",
            }
        );
    }
}
