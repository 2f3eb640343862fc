use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

use treasure_hunt::access::SingleAdmin;
use treasure_hunt::core::{Cell, GameConfig, GameRng, Grid, PlayerId};
use treasure_hunt::engine::{relocate, GameEngine};
use treasure_hunt::ledger::InMemoryLedger;
use treasure_hunt::sim::{RandomWalk, RandomWalkConfig};

fn bench_geometry(c: &mut Criterion) {
    let grid = Grid::new(10);
    c.bench_function("grid/neighbors", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for cell in grid.cells() {
                acc += grid.neighbors(cell).len();
            }
            black_box(acc)
        })
    });
    c.bench_function("grid/is_adjacent", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for cell in grid.cells() {
                acc += u32::from(grid.is_adjacent(cell, Cell::new(44)));
            }
            black_box(acc)
        })
    });
}

fn bench_relocation(c: &mut Criterion) {
    let config = GameConfig::default();
    c.bench_function("relocation/all_landings", |b| {
        let mut rng = GameRng::new(42);
        b.iter(|| {
            let mut treasure = Cell::new(44);
            for landed in config.grid().cells() {
                treasure = relocate(&config, treasure, landed, &mut rng).position();
            }
            black_box(treasure)
        })
    });
}

fn bench_join(c: &mut Criterion) {
    c.bench_function("engine/join_64", |b| {
        b.iter_batched(
            || {
                let mut game = GameEngine::new(
                    GameConfig::default(),
                    GameRng::new(7),
                    InMemoryLedger::new(),
                    SingleAdmin(PlayerId(0)),
                )
                .unwrap();
                game.initialize(PlayerId(0), 1_000).unwrap();
                game
            },
            |mut game| {
                for id in 1..=64 {
                    game.join(PlayerId(id), 10).unwrap();
                }
                black_box(game.round_balance())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_simulation(c: &mut Criterion) {
    let sim = RandomWalk::new(GameConfig::default(), RandomWalkConfig::new().with_actions(10_000));
    c.bench_function("sim/random_walk_10k", |b| b.iter(|| black_box(sim.run().unwrap())));
}

criterion_group!(benches, bench_geometry, bench_relocation, bench_join, bench_simulation);
criterion_main!(benches);
