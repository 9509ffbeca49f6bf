use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use msweep_core::*;
use std::hint::black_box;

fn reveal_empty(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_empty");
    for size in [16, 64, 255] {
        let grid = Grid::from_mine_coords(size, size, &[]).unwrap();
        group.bench_function(format!("{size}x{size}"), |b| {
            b.iter_batched(
                || Field::new(grid.clone()),
                |mut field| black_box(field.reveal(black_box((0, 0)))),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn reveal_random(c: &mut Criterion) {
    let config = GameConfig::expert();
    let grid = Grid::new(config, RandomMinefieldGenerator::new(0xdeadbeef)).unwrap();
    let safe: Vec<Coord2> = (0..config.height)
        .flat_map(|y| (0..config.width).map(move |x| (x, y)))
        .filter(|&coords| grid.tile(coords).is_some_and(|tile| !tile.is_mine()))
        .collect();

    c.bench_function("reveal_all_safe_expert", |b| {
        b.iter_batched(
            || Field::new(grid.clone()),
            |mut field| {
                for &coords in &safe {
                    black_box(field.reveal(coords));
                }
                field
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, reveal_empty, reveal_random);
criterion_main!(benches);
