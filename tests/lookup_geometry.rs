use std::collections::HashSet;

use sweepmatch::lowlevel::{GateOffsets, GateSampling, Offset, NEAR_RADAR_KM};
use sweepmatch::{LookupTable, SweepGeom, SweepGeometry, TemplateBox};

fn radar_geom(n_gates: usize) -> SweepGeom {
    SweepGeom::new(n_gates, 0.125, 0.25, 1.0, true).unwrap()
}

#[test]
fn table_has_one_entry_per_gate() {
    let geom = radar_geom(400);
    let table = LookupTable::build(TemplateBox::default(), &geom).unwrap();
    assert_eq!(table.len(), geom.n_gates());
    for (idx, gate) in table.iter().enumerate() {
        assert_eq!(gate.gate(), idx);
        let near = geom.gate_range_km(idx) <= NEAR_RADAR_KM;
        assert_eq!(gate.is_near_radar(), near, "gate {idx}");
        if near {
            assert_eq!(gate.side_a_len(), 0);
            assert_eq!(gate.side_b_len(), 0);
        }
    }
}

#[test]
fn side_b_mirrors_side_a() {
    let geom = radar_geom(400);
    let tpl = TemplateBox::new(3.0, 1.75, 0.4).unwrap();
    let table = LookupTable::build(tpl, &geom).unwrap();
    for gate in table.iter() {
        assert_eq!(gate.side_a_len(), gate.side_b_len(), "gate {}", gate.gate());
        let side_b: HashSet<Offset> = gate.side_b().iter().copied().collect();
        for offset in gate.side_a() {
            let mirrored = Offset {
                gate: offset.gate,
                ray_offset: -offset.ray_offset - 1,
            };
            assert!(side_b.contains(&mirrored), "{offset:?} in gate {}", gate.gate());
        }
    }
}

#[test]
fn far_gates_have_narrower_windows() {
    let geom = radar_geom(400);
    let tpl = TemplateBox::new(0.0, 4.0, 0.0).unwrap();
    let table = LookupTable::build(tpl, &geom).unwrap();
    let near = table.gate(20).unwrap().side_a_len();
    let far = table.gate(399).unwrap().side_a_len();
    assert!(near > far, "near {near} far {far}");
    assert!(far >= 1);
}

#[test]
fn degenerate_ranges_are_dropped_from_both_sides() {
    let sampling = GateSampling {
        n_gates: 50,
        start_range_km: 0.125,
        delta_gate_km: 0.25,
        delta_az_deg: 1.0,
    };
    let tpl = TemplateBox::new(6.0, 2.0, 0.0).unwrap();
    // Centre at ~3.1 km; the window reaches back to ~0.1 km.
    let offsets = GateOffsets::build(&tpl, 12, &sampling);
    let gates_a: HashSet<usize> = offsets.side_a().iter().map(|o| o.gate).collect();
    let gates_b: HashSet<usize> = offsets.side_b().iter().map(|o| o.gate).collect();
    assert_eq!(gates_a, gates_b);
    for gate in 0..sampling.n_gates {
        let range = sampling.start_range_km + sampling.delta_gate_km * gate as f64;
        let span_deg = 180.0 / std::f64::consts::PI / range * tpl.width_km;
        if span_deg > 45.0 {
            assert!(!gates_a.contains(&gate), "gate {gate} should be dropped");
        }
    }
    assert!(!gates_a.is_empty());
}

#[test]
fn matches_is_a_pure_comparison() {
    let geom = radar_geom(100);
    let tpl = TemplateBox::new(2.0, 1.0, 0.25).unwrap();
    let table = LookupTable::build(tpl, &geom).unwrap();
    assert!(table.matches(2.0, 1.0, 0.25));
    assert!(!table.matches(2.0, 1.0, 0.0));
    assert!(!table.matches(2.5, 1.0, 0.25));
    // Asking does not change the answer.
    assert!(table.matches(2.0, 1.0, 0.25));
}

#[test]
fn wraparound_resolves_or_discards_single_offsets() {
    let offset = Offset {
        gate: 3,
        ray_offset: -5,
    };
    assert_eq!(offset.resolve(2, 10, 360, true), Some((3, 357)));
    assert_eq!(offset.resolve(2, 10, 360, false), None);
    assert_eq!(offset.resolve(7, 10, 360, false), Some((3, 2)));
    // Gate outside the grid is discarded even when the ray resolves.
    assert_eq!(offset.resolve(7, 3, 360, true), None);
}
