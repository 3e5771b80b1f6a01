use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use coin_packer_core::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

fn generate_pile(count: usize, seed: u64) -> Vec<PackableItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            if i % 8 == 0 {
                PackableItem::new(Denomination::Dollar.shape())
            } else {
                PackableItem::circle(rng.gen_range(12.0..35.0))
            }
        })
        .collect()
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_strategies");

    for count in [10usize, 40, 120] {
        let pile = generate_pile(count, 42);
        group.throughput(Throughput::Elements(count as u64));

        for strategy in [PackStrategy::Relaxation, PackStrategy::Radial, PackStrategy::Auto] {
            let engine = match PackingEngine::new(
                PackerConfig::builder()
                    .with_container(800.0, 600.0)
                    .strategy(strategy)
                    .build(),
            ) {
                Ok(e) => e,
                Err(e) => panic!("bench config rejected: {e}"),
            };
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), count),
                &pile,
                |b, pile| {
                    b.iter(|| {
                        let mut items = pile.clone();
                        black_box(engine.pack(&mut items))
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_separation_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("separation_passes");
    let pile = generate_pile(60, 7);

    for passes in [0usize, 25, 100] {
        let cfg = PackerConfig::builder()
            .with_container(800.0, 600.0)
            .separation_passes(passes)
            .build();
        let Ok(engine) = PackingEngine::new(cfg) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(passes), &pile, |b, pile| {
            b.iter(|| {
                let mut items = pile.clone();
                black_box(engine.pack(&mut items))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_separation_budget);
criterion_main!(benches);
