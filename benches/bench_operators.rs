use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{Rgba, RgbaImage};

use evoimage::{
    genome::PrimitiveKind,
    individual::Individual,
    operators::{crossover, shuffle, GaussianMutation, SelectionStrategy, TournamentSelection},
    rng::RandomNumberGenerator,
    target::Target,
};

fn target() -> Arc<Target> {
    Arc::new(Target::from_rgba(RgbaImage::from_pixel(128, 96, Rgba([60, 120, 180, 255]))).unwrap())
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");
    let target = target();
    let mut rng = RandomNumberGenerator::from_seed(1);

    for genes in [64, 700].iter() {
        let kind = PrimitiveKind::Polygon { vertices: 3 };
        let parents = (
            Individual::random(&kind, *genes, &target, None, &mut rng),
            Individual::random(&kind, *genes, &target, None, &mut rng),
        );

        group.bench_with_input(BenchmarkId::from_parameter(genes), &parents, |b, (p1, p2)| {
            b.iter(|| crossover(black_box(p1), black_box(p2), 0.6, &mut rng).unwrap())
        });
    }

    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");
    let target = target();
    let extent = target.extent();
    let mut rng = RandomNumberGenerator::from_seed(2);

    for rate in [0.08, 0.25].iter() {
        let mutation = GaussianMutation::new(*rate, 16.0, 0.05).unwrap();
        let individual = Individual::random(
            &PrimitiveKind::Polygon { vertices: 3 },
            700,
            &target,
            None,
            &mut rng,
        );

        group.bench_with_input(BenchmarkId::from_parameter(rate), &individual, |b, ind| {
            b.iter(|| {
                let mut child = ind.clone();
                mutation.mutate(black_box(&mut child), extent, &mut rng);
                child
            })
        });
    }

    group.finish();
}

fn bench_selection_and_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_and_shuffle");
    let target = target();
    let mut rng = RandomNumberGenerator::from_seed(3);

    for size in [2, 5].iter() {
        let selection = TournamentSelection::new(*size).unwrap();
        group.bench_with_input(BenchmarkId::new("tournament", size), &selection, |b, sel| {
            b.iter(|| sel.select_index(black_box(200), &mut rng).unwrap())
        });
    }

    let individual = Individual::random(&PrimitiveKind::Rectangle, 700, &target, None, &mut rng);
    group.bench_function("shuffle_700", |b| {
        b.iter(|| shuffle(black_box(&individual), &mut rng))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_crossover,
    bench_mutation,
    bench_selection_and_shuffle
);
criterion_main!(benches);
