use criterion::{criterion_group, criterion_main, Criterion};
use eller_mazes::{
    generators::MazeEngine,
    grid::MazeGrid,
    random::seeded_rng,
    sinks::RowCounter,
    units::{ColumnsCount, RowsCount},
};

fn bench_eller_maze_32_counted(c: &mut Criterion) {
    c.bench_function("eller_maze_32_counted", move |b| {
        b.iter(|| {
            let engine = MazeEngine::new(RowsCount(32), ColumnsCount(32), seeded_rng(7)).unwrap();
            let mut counter = RowCounter::new();
            engine.run(&mut counter).unwrap();
            counter
        })
    });
}

fn bench_eller_maze_256_counted(c: &mut Criterion) {
    c.bench_function("eller_maze_256_counted", move |b| {
        b.iter(|| {
            let engine = MazeEngine::new(RowsCount(256), ColumnsCount(256), seeded_rng(7)).unwrap();
            let mut counter = RowCounter::new();
            engine.run(&mut counter).unwrap();
            counter
        })
    });
}

fn bench_eller_maze_32_grid(c: &mut Criterion) {
    c.bench_function("eller_maze_32_grid", move |b| {
        b.iter(|| {
            let engine = MazeEngine::new(RowsCount(32), ColumnsCount(32), seeded_rng(7)).unwrap();
            let mut grid = MazeGrid::new();
            engine.run(&mut grid).unwrap();
            grid
        })
    });
}

criterion_group!(benches,
                 bench_eller_maze_32_counted,
                 bench_eller_maze_256_counted,
                 bench_eller_maze_32_grid);
criterion_main!(benches);
