use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rewindsweeper_core::*;
use web_time::Instant;

const TIERS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

fn seeded_board(config: DifficultyConfig, seed: u64) -> Board {
    let blank = Board::new(config.size()).unwrap();
    RandomMineGenerator::from_seed(seed)
        .place_mines(&blank, config.mines, (0, 0))
        .unwrap()
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_mines");
    for difficulty in TIERS {
        let config = difficulty.preset().unwrap();
        let blank = Board::new(config.size()).unwrap();
        let mut generator = RandomMineGenerator::from_seed(7);
        group.bench_function(BenchmarkId::from_parameter(difficulty.name()), |b| {
            b.iter(|| generator.place_mines(black_box(&blank), config.mines, (0, 0)))
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_empty_area");
    for difficulty in TIERS {
        let board = seeded_board(difficulty.preset().unwrap(), 42);
        group.bench_function(BenchmarkId::from_parameter(difficulty.name()), |b| {
            b.iter_batched_ref(
                || board.clone(),
                |board| reveal_empty_area(board, black_box((0, 0))),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_snapshot_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_push");
    for difficulty in TIERS {
        let config = difficulty.preset().unwrap();
        let board = seeded_board(config, 42);
        let mut store = SnapshotStore::new(RewindTiming::default().capacity());
        group.bench_function(BenchmarkId::from_parameter(difficulty.name()), |b| {
            b.iter(|| {
                store.push(Snapshot {
                    board: board.clone(),
                    taken_at: Instant::now(),
                    flag_count: 0,
                    revealed_count: 0,
                })
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_placement,
    bench_flood_fill,
    bench_snapshot_capture
);
criterion_main!(benches);
