//! Search cost of each heuristic on scrambles of increasing depth

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;
use tile_search::{solve_with_config, Board, Heuristic, SearchConfig};

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_3x3");
    let mut rng = StdRng::seed_from_u64(2024);

    for moves in [10, 20, 30] {
        let Ok(start) = Board::scramble(3, moves, &mut rng) else {
            group.finish();
            return;
        };

        for heuristic in [Heuristic::Misplaced, Heuristic::Manhattan] {
            let config = SearchConfig::new(heuristic);
            group.bench_with_input(
                BenchmarkId::new(heuristic.to_string(), moves),
                &start,
                |b, start| b.iter(|| black_box(solve_with_config(start.clone(), &config))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_heuristics);
criterion_main!(benches);
