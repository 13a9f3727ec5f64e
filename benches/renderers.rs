use criterion::{criterion_group, criterion_main, Criterion};
use ascii_mazes::{
    maze::Maze,
    units::{Height, Width},
};

fn bench_render_maze_200(c: &mut Criterion) {
    let maze = Maze::generate(Width(200), Height(200), 200).unwrap();
    c.bench_function("render_maze_200", move |b| b.iter(|| maze.to_string()));
}

criterion_group!(benches, bench_render_maze_200);
criterion_main!(benches);
