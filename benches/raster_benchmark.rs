//! Benchmark for frame rasterization and APNG encoding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scan_viz::prelude::*;

fn render_frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");

    for size in [256, 800] {
        let render = RenderConfig {
            width: size,
            height: size,
            ..RenderConfig::default()
        };
        let renderer = RasterRenderer::new(generate(512, 1).unwrap(), &render).unwrap();
        let snapshot = classify(512, 200).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| renderer.render_frame(black_box(&snapshot)).unwrap());
        });
    }

    group.finish();
}

fn apng_benchmark(c: &mut Criterion) {
    let render = RenderConfig {
        width: 256,
        height: 256,
        ..RenderConfig::default()
    };
    let mut animator = Animator::start(AnimationConfig::new().point_count(64).frame_count(64)).unwrap();
    let mut renderer = RasterRenderer::new(animator.buffer().clone(), &render).unwrap();
    animator.run(&mut renderer).unwrap();

    c.bench_function("apng_64_frames", |b| {
        b.iter(|| renderer.to_apng_bytes().unwrap());
    });
}

criterion_group!(benches, render_frame_benchmark, apng_benchmark);
criterion_main!(benches);
