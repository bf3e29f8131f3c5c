use criterion::{Criterion, criterion_group, criterion_main};
use grainfall_core::simulation::Material;
use grainfall_core::world::Sandbox;
use std::hint::black_box;

/// A busy 200x150 scene: sand pile, pool of water, burning wood
fn busy_sandbox() -> Sandbox {
    let mut sandbox = Sandbox::with_seed(200, 150, 42);
    sandbox.place_area(50, 20, Material::Sand, 18);
    sandbox.place_area(140, 30, Material::Water, 20);
    for x in 60..140 {
        for y in 120..130 {
            sandbox.place(x, y, Material::Wood);
        }
    }
    sandbox.place_area(100, 120, Material::Fire, 3);
    sandbox
}

fn bench_step(c: &mut Criterion) {
    c.bench_function("step_busy_200x150", |b| {
        let mut sandbox = busy_sandbox();
        b.iter(|| {
            sandbox.step();
            black_box(sandbox.active().total())
        });
    });

    c.bench_function("settle_100_frames", |b| {
        b.iter(|| {
            let mut sandbox = busy_sandbox();
            for _ in 0..100 {
                sandbox.step();
            }
            black_box(sandbox.frame())
        });
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
