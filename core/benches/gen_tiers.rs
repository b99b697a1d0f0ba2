use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mineboard_core::*;

const TIERS: [(Coord, CellCount); 3] = [(9, 10), (16, 40), (64, 600)];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (size, mines) in TIERS {
        let config = GameConfig::new(size, mines).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size}x{size}/{mines}")),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    RandomMinefieldGenerator::new(seed, (size / 2, size / 2))
                        .generate(black_box(config))
                })
            },
        );
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for size in [16, 128, 255] {
        // single mine in a corner, the first reveal opens almost the whole board
        let minefield = Minefield::from_mine_coords(size, &[(size - 1, size - 1)]).unwrap();
        let game = Game::with_minefield(minefield, 0).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &game, |b, game| {
            b.iter(|| {
                let mut game = game.clone();
                game.reveal(black_box((0, 0))).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
