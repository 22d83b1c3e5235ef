//! Criterion benchmarks for the annealing engine and the walker.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_anneal::random::create_rng;
use u_anneal::tsp::{Point, Simulation, StartTemperature};
use u_anneal::walker::FiniteTemperatureWalker;

fn random_cities(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = create_rng(seed);
    (0..n)
        .map(|_| Point::new(rng.random_range(0..10_000), rng.random_range(0..10_000)))
        .collect()
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("tsp_sweep");
    group.sample_size(20);

    for &n in &[50usize, 200, 1000] {
        let points = random_cities(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, pts| {
            // mid-schedule temperature so both branches of the kernel run
            let mut sim = Simulation::with_start_temperature(
                pts.clone(),
                create_rng(42),
                StartTemperature::Fixed(500.0),
            )
            .expect("valid cities");
            b.iter(|| black_box(sim.one_sweep()))
        });
    }
    group.finish();
}

fn bench_walker(c: &mut Criterion) {
    let mut group = c.benchmark_group("walker_steps");

    for &m in &[4usize, 64] {
        let energies: Vec<f64> = (0..m).map(|i| i as f64).collect();
        group.bench_with_input(BenchmarkId::from_parameter(m), &energies, |b, e| {
            let mut walker =
                FiniteTemperatureWalker::new(e.clone(), create_rng(42)).expect("valid spectrum");
            walker.restart(10.0).expect("positive temperature");
            b.iter(|| {
                walker.run(10_000);
                black_box(walker.current_state())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweep, bench_walker);
criterion_main!(benches);
