mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use shape_wordle::geometry::{convex_polygons_intersect, crosses_boundary, rect, rotate_quad, Quad};

fn make_quads(count: usize, seed: u64) -> Vec<Quad> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let origin = Vec2::new(rng.random::<f32>() * 500.0, rng.random::<f32>() * 500.0);
            let size = Vec2::new(
                10.0 + rng.random::<f32>() * 60.0,
                5.0 + rng.random::<f32>() * 20.0,
            );
            let angle = (rng.random::<f32>() - 0.5) * std::f32::consts::PI;
            rotate_quad(rect(origin, size), origin + size * 0.5, angle)
        })
        .collect()
}

fn circle_contour(points: usize, radius: f32) -> Vec<Vec2> {
    (0..points)
        .map(|i| {
            let t = i as f32 / points as f32 * std::f32::consts::TAU;
            Vec2::new(250.0, 250.0) + Vec2::from_angle(t) * radius
        })
        .collect()
}

fn polygon_intersection_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/convex_polygons_intersect");

    for &n in &[64usize, 256, 1024] {
        let quads = make_quads(n, 0xC0FFEE);
        let query = make_quads(1, 0xBEEF)[0];
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let hits = quads
                    .iter()
                    .filter(|q| convex_polygons_intersect(&query[..], &q[..]))
                    .count();
                black_box(hits);
            });
        });
    }

    group.finish();
}

fn contour_crossing_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/crosses_boundary");

    for &n in &[128usize, 1024, 4096] {
        let contour = circle_contour(n, 200.0);
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::new("inside", n), &n, |b, _| {
            b.iter(|| {
                black_box(crosses_boundary(
                    &contour,
                    Vec2::new(240.0, 250.0),
                    Vec2::new(260.0, 250.0),
                ))
            });
        });

        group.bench_with_input(BenchmarkId::new("crossing", n), &n, |b, _| {
            b.iter(|| {
                black_box(crosses_boundary(
                    &contour,
                    Vec2::new(250.0, 250.0),
                    Vec2::new(480.0, 250.0),
                ))
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = polygon_intersection_benches, contour_crossing_benches
}
criterion_main!(benches);
