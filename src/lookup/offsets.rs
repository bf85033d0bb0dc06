//! Per-gate template offsets.
//!
//! For a centre gate the template is a box `length_km` long in range and
//! `width_km` wide in azimuth, displaced `width_offset_km` to either side of
//! the ray. Side A lies at positive angles and side B at negative angles. The
//! kilometre box is converted to azimuth indices separately at every range
//! inside the box, so the angular width shrinks with range.

use crate::lookup::TemplateBox;
use crate::util::math::{angle_to_index, deg_per_km, wrap_ray};

/// Maximum angular extent of one side of the box at a single range, in degrees.
///
/// Wider windows only occur close to the radar and are dropped.
pub const MAX_WINDOW_DEG: f64 = 45.0;

/// One template sample relative to a centre cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Absolute range gate index.
    pub gate: usize,
    /// Azimuth index offset relative to the centre ray.
    pub ray_offset: i64,
}

impl Offset {
    /// Resolves this offset around `ray` to a `(gate, ray)` cell of an
    /// `nx` x `ny` grid, wrapping the azimuth once when `circular`.
    pub fn resolve(
        &self,
        ray: usize,
        nx: usize,
        ny: usize,
        circular: bool,
    ) -> Option<(usize, usize)> {
        if self.gate >= nx {
            return None;
        }
        let target = wrap_ray(ray, self.ray_offset, ny, circular)?;
        Some((self.gate, target))
    }
}

/// Sweep sampling needed to place the template box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateSampling {
    /// Total number of gates.
    pub n_gates: usize,
    /// Range to gate 0 in km.
    pub start_range_km: f64,
    /// Gate spacing in km.
    pub delta_gate_km: f64,
    /// Azimuth spacing in degrees.
    pub delta_az_deg: f64,
}

impl GateSampling {
    fn range_km(&self, gate: usize) -> f64 {
        self.start_range_km + self.delta_gate_km * gate as f64
    }
}

/// Which side of the centre ray a window covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    A,
    B,
}

/// Side A and side B offsets for one centre gate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GateOffsets {
    side_a: Vec<Offset>,
    side_b: Vec<Offset>,
}

impl GateOffsets {
    /// Builds the offsets for the template box centred on `center_gate`.
    pub fn build(tpl: &TemplateBox, center_gate: usize, sampling: &GateSampling) -> Self {
        let mut out = Self::default();
        if sampling.n_gates == 0 {
            return out;
        }

        let half = (tpl.length_km / 2.0 / sampling.delta_gate_km).floor();
        let half = if half.is_finite() && half > 0.0 {
            half as usize
        } else {
            0
        };
        let first = center_gate.saturating_sub(half);
        let last = center_gate
            .saturating_add(half)
            .min(sampling.n_gates - 1);

        for gate in first..=last {
            let range_km = sampling.range_km(gate);
            for side in [Side::A, Side::B] {
                let Some((lo, hi)) = side_window(tpl, range_km, side, sampling.delta_az_deg)
                else {
                    continue;
                };
                let list = match side {
                    Side::A => &mut out.side_a,
                    Side::B => &mut out.side_b,
                };
                list.extend((lo..hi).map(|ray_offset| Offset { gate, ray_offset }));
            }
        }
        out
    }

    /// Offsets on the positive-angle side.
    pub fn side_a(&self) -> &[Offset] {
        &self.side_a
    }

    /// Offsets on the negative-angle side.
    pub fn side_b(&self) -> &[Offset] {
        &self.side_b
    }
}

/// Azimuth index window `[lo, hi)` for one side at `range_km`.
///
/// Returns `None` when the angular window exceeds [`MAX_WINDOW_DEG`] or is
/// not finite.
fn side_window(
    tpl: &TemplateBox,
    range_km: f64,
    side: Side,
    delta_az_deg: f64,
) -> Option<(i64, i64)> {
    let conv = deg_per_km(range_km);
    let near = conv * tpl.width_offset_km;
    let far = conv * (tpl.width_offset_km + tpl.width_km);
    let (min_deg, max_deg) = match side {
        Side::A => (near, far),
        Side::B => (-far, -near),
    };
    if !min_deg.is_finite() || !max_deg.is_finite() {
        return None;
    }
    if (max_deg - min_deg).abs() > MAX_WINDOW_DEG {
        return None;
    }
    Some((
        angle_to_index(min_deg, delta_az_deg),
        angle_to_index(max_deg, delta_az_deg),
    ))
}
