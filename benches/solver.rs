//! Benchmarks for the burr puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use burr_solver::blocking::BlockingGraph;
use burr_solver::collision::Occupancy;
use burr_solver::geometry::{Coord, Direction};
use burr_solver::grid::format_pieces;
use burr_solver::loader::parse_puzzle;
use burr_solver::pieces::PieceShape;
use burr_solver::Puzzle;

const DIM: i32 = 48;

fn load(text: &str) -> Puzzle {
    parse_puzzle(text, DIM).expect("bundled puzzle is valid")
}

fn tunnels() -> Puzzle {
    load(include_str!("../puzzles/tunnels.txt"))
}

fn combs() -> Puzzle {
    load(include_str!("../puzzles/combs.txt"))
}

/// Benchmark complete searches on the bundled puzzles.
fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(20);

    let puzzle = tunnels();
    group.bench_function("tunnels", |b| b.iter(|| black_box(&puzzle).solve()));

    let puzzle = combs();
    group.bench_function("combs", |b| b.iter(|| black_box(&puzzle).solve()));

    group.finish();
}

/// Benchmark building blocking graphs and their rigid groups for all six
/// directions of the assembled tunnels puzzle.
fn bench_blocking_graph(c: &mut Criterion) {
    let puzzle = tunnels();
    let start = puzzle.start_state();
    let mut occupancy = Occupancy::new(&puzzle);
    occupancy.rebuild(&start);

    c.bench_function("blocking_graph_all_directions", |b| {
        b.iter(|| {
            Direction::ALL
                .iter()
                .map(|&direction| {
                    BlockingGraph::build(&mut occupancy, black_box(&start), direction)
                        .rigid_groups()
                        .len()
                })
                .sum::<usize>()
        })
    });
}

/// Benchmark mask construction for the large block piece, cold and cached.
fn bench_mask_cache(c: &mut Criterion) {
    let puzzle = tunnels();
    let block = puzzle.shapes()[0].voxels().to_vec();
    let offset = Coord::new(20, 20, 20);

    c.bench_function("mask_at_cold", |b| {
        b.iter_batched(
            || PieceShape::new(block.clone(), DIM).expect("block shape is valid"),
            |mut shape| shape.mask_at(black_box(offset)).count(),
            BatchSize::SmallInput,
        )
    });

    let mut shape = PieceShape::new(block, DIM).expect("block shape is valid");
    shape.mask_at(offset);
    c.bench_function("mask_at_cached", |b| {
        b.iter(|| shape.mask_at(black_box(offset)).count())
    });
}

/// Benchmark rendering the assembled puzzle as text.
fn bench_format_pieces(c: &mut Criterion) {
    let puzzle = tunnels();
    let voxels = puzzle.world_voxels(puzzle.initial_offsets());

    c.bench_function("format_pieces", |b| {
        b.iter(|| format_pieces(black_box(&voxels)))
    });
}

criterion_group!(
    benches,
    bench_solve,
    bench_blocking_graph,
    bench_mask_cache,
    bench_format_pieces
);
criterion_main!(benches);
