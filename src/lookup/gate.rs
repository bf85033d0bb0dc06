//! Lookup entry for a single range gate.

use crate::lookup::offsets::{GateOffsets, GateSampling, Offset};
use crate::lookup::TemplateBox;

/// Gates at or inside this range carry no template.
pub const NEAR_RADAR_KM: f64 = 2.0;

/// Template offsets for one gate, empty close to the radar.
#[derive(Clone, Debug, PartialEq)]
pub struct GateLookup {
    gate: usize,
    offsets: Option<GateOffsets>,
}

impl GateLookup {
    /// Creates an entry with no offsets.
    pub fn near_radar(gate: usize) -> Self {
        Self {
            gate,
            offsets: None,
        }
    }

    /// Creates an entry holding the template box offsets for `gate`.
    pub fn full(tpl: &TemplateBox, gate: usize, sampling: &GateSampling) -> Self {
        Self {
            gate,
            offsets: Some(GateOffsets::build(tpl, gate, sampling)),
        }
    }

    /// Returns the gate this entry belongs to.
    pub fn gate(&self) -> usize {
        self.gate
    }

    /// True for entries built with [`GateLookup::near_radar`].
    pub fn is_near_radar(&self) -> bool {
        self.offsets.is_none()
    }

    /// Side A offsets (positive angles).
    pub fn side_a(&self) -> &[Offset] {
        match &self.offsets {
            Some(offsets) => offsets.side_a(),
            None => &[],
        }
    }

    /// Side B offsets (negative angles).
    pub fn side_b(&self) -> &[Offset] {
        match &self.offsets {
            Some(offsets) => offsets.side_b(),
            None => &[],
        }
    }

    /// Number of side A offsets.
    pub fn side_a_len(&self) -> usize {
        self.side_a().len()
    }

    /// Number of side B offsets.
    pub fn side_b_len(&self) -> usize {
        self.side_b().len()
    }

    /// Side A offset at `idx`.
    pub fn side_a_at(&self, idx: usize) -> Option<Offset> {
        self.side_a().get(idx).copied()
    }

    /// Side B offset at `idx`.
    pub fn side_b_at(&self, idx: usize) -> Option<Offset> {
        self.side_b().get(idx).copied()
    }

    /// Side A followed by side B.
    pub fn all_offsets(&self) -> impl Iterator<Item = Offset> + '_ {
        self.side_a().iter().chain(self.side_b()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::GateLookup;
    use crate::lookup::offsets::{GateSampling, Offset};
    use crate::lookup::TemplateBox;

    fn sampling() -> GateSampling {
        GateSampling {
            n_gates: 1,
            start_range_km: 180.0 / std::f64::consts::PI,
            delta_gate_km: 1.0,
            delta_az_deg: 1.0,
        }
    }

    #[test]
    fn near_radar_entry_is_empty() {
        let entry = GateLookup::near_radar(3);
        assert_eq!(entry.gate(), 3);
        assert!(entry.is_near_radar());
        assert_eq!(entry.side_a_len(), 0);
        assert_eq!(entry.side_b_len(), 0);
        assert_eq!(entry.side_a_at(0), None);
        assert_eq!(entry.all_offsets().count(), 0);
    }

    #[test]
    fn full_entry_exposes_both_sides() {
        let tpl = TemplateBox {
            length_km: 0.0,
            width_km: 4.0,
            width_offset_km: 1.5,
        };
        let entry = GateLookup::full(&tpl, 0, &sampling());
        assert!(!entry.is_near_radar());
        assert_eq!(entry.side_a_len(), 4);
        assert_eq!(entry.side_b_len(), 4);
        assert_eq!(
            entry.side_a_at(0),
            Some(Offset {
                gate: 0,
                ray_offset: 1
            })
        );
        assert_eq!(
            entry.side_b_at(3),
            Some(Offset {
                gate: 0,
                ray_offset: -2
            })
        );
        let rays: Vec<i64> = entry.all_offsets().map(|o| o.ray_offset).collect();
        assert_eq!(rays, vec![1, 2, 3, 4, -5, -4, -3, -2]);
    }
}
