use boidbench::{FlockSimulation, IndexKind};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn benchmark_ticks(c: &mut Criterion) {
    let (width, height, radius) = (1200.0, 800.0, 50.0);

    let mut group = c.benchmark_group("simulation");
    group.sample_size(10);

    for &count in &[500usize, 2500] {
        for kind in IndexKind::ALL {
            if kind == IndexKind::Naive && count > 1000 {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(kind.name(), count), &count, |b, &count| {
                let mut sim = FlockSimulation::new(width, height).unwrap();
                sim.set_spatial_index(kind.create(width, height, radius).unwrap())
                    .unwrap();
                sim.set_neighbor_radius(radius).unwrap();
                sim.set_boid_count(count).unwrap();
                b.iter(|| sim.update())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, benchmark_ticks);
criterion_main!(benches);
