use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use sweepmatch::{
    AmbiguityDetector, AmbiguityParams, Clump, ClumpExtender, LookupTable, PiecewiseLinear,
    PolarGrid, ShearDetector, ShearParams, SweepGeom, TemplateBox,
};

const MISSING: f64 = -9999.0;

fn make_velocity(gates: usize, rays: usize) -> PolarGrid {
    let mut data = Vec::with_capacity(gates * rays);
    for ray in 0..rays {
        for gate in 0..gates {
            let value = ((gate * 13) ^ (ray * 7) ^ (gate * ray)) % 61;
            if value == 0 {
                data.push(MISSING);
            } else {
                data.push(value as f64 - 30.0);
            }
        }
    }
    PolarGrid::from_values(data, gates, rays, MISSING).unwrap()
}

fn bench_sweep(c: &mut Criterion) {
    let gates = 600;
    let rays = 360;
    let geom = SweepGeom::new(gates, 0.125, 0.25, 1.0, true).unwrap();
    let tpl = TemplateBox::new(2.0, 1.5, 0.25).unwrap();

    c.bench_function("lookup_build", |b| {
        b.iter(|| black_box(LookupTable::build(tpl, &geom).unwrap()));
    });

    let table = LookupTable::build(tpl, &geom).unwrap();
    let data = make_velocity(gates, rays);

    let shear = ShearDetector::new(
        &table,
        ShearParams::default(),
        PiecewiseLinear::new(vec![(10.0, 0.0), (30.0, 1.0)]).unwrap(),
    );
    c.bench_function("shear_detect", |b| {
        let mut out = PolarGrid::new(gates, rays, MISSING).unwrap();
        b.iter(|| black_box(shear.detect(&data, true, &mut out)));
    });

    let ambiguity = AmbiguityDetector::new(
        &table,
        AmbiguityParams::default(),
        PiecewiseLinear::new(vec![(15.0, 0.0), (28.0, 1.0)]).unwrap(),
    );
    c.bench_function("ambiguity_detect", |b| {
        let mut out = PolarGrid::new(gates, rays, MISSING).unwrap();
        b.iter(|| black_box(ambiguity.detect(&data, &data, true, &mut out)));
    });

    let clumps: Vec<Clump> = (0..50)
        .map(|id| {
            let ray0 = id * 7 % rays;
            Clump::from_pairs(
                id,
                (100..140).flat_map(move |gate| (ray0..ray0 + 3).map(move |ray| (gate, ray))),
            )
        })
        .collect();
    let extender = ClumpExtender::new(&table, true);
    c.bench_function("clump_extend", |b| {
        b.iter(|| {
            let mut out = PolarGrid::new(gates, rays, MISSING).unwrap();
            black_box(extender.apply_all(&clumps, true, &mut out))
        });
    });
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
