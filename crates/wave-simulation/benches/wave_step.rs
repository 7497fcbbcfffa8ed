use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wave_simulation::{WaveMode, WaveParams, WaveSimulation};

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("wave_frame");

    for mode in [WaveMode::Transverse, WaveMode::Longitudinal] {
        let mut sim = WaveSimulation::new(WaveParams::default(), mode);
        sim.set_auto(true);
        group.bench_function(mode.label(), |b| {
            b.iter(|| {
                sim.advance_frame();
                black_box(sim.nodes()[1].position)
            })
        });
    }

    group.finish();
}

fn bench_zones(c: &mut Criterion) {
    let mut sim = WaveSimulation::new(WaveParams::default(), WaveMode::Longitudinal);
    sim.set_auto(true);
    for _ in 0..120 {
        sim.advance_frame();
    }
    c.bench_function("zone_detection", |b| b.iter(|| black_box(sim.zones())));
}

criterion_group!(benches, bench_frame, bench_zones);
criterion_main!(benches);
