use camrig_core::{
    BezierSplineFactory, Bounds2, CameraState, CameraStateClamp, CameraStateTransform, Vec2,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn clamp_benchmark(c: &mut Criterion) {
    let region = Bounds2::new(Vec2::splat(-10.0), Vec2::splat(10.0));
    let center = CameraStateClamp::center(region);
    let bounds = CameraStateClamp::bounds(region);
    let state = CameraState::new(Vec2::new(15.0, -3.0), 2.0, 0.0);

    let mut group = c.benchmark_group("clamp_state");
    group.bench_function("center", |b| {
        b.iter(|| black_box(center.clamp_state(black_box(state), 16.0 / 9.0)))
    });
    group.bench_function("bounds", |b| {
        b.iter(|| black_box(bounds.clamp_state(black_box(state), 16.0 / 9.0)))
    });
    group.finish();
}

fn decay_benchmark(c: &mut Criterion) {
    let from = CameraState::new(Vec2::ZERO, 1.0, 0.0);
    let to = CameraState::new(Vec2::new(10.0, 4.0), 6.0, 170.0);

    c.bench_function("decay_all_channels", |b| {
        b.iter(|| {
            black_box(
                black_box(from)
                    .decay_position_to(&to, 5.0, 1.0 / 60.0)
                    .decay_zoom_to(&to, 5.0, 1.0 / 60.0)
                    .decay_rotation_to(&to, 5.0, 1.0 / 60.0),
            )
        })
    });
}

fn covering_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("covering_bounds");

    for count in [2, 16, 128].iter() {
        let points: Vec<Vec2> = (0..*count)
            .map(|i| Vec2::new((i as f32).sin() * 20.0, (i as f32).cos() * 8.0))
            .collect();

        group.bench_function(format!("{}_targets", count), |b| {
            b.iter(|| {
                let mut bounds = Bounds2::point(points[0]);
                for point in &points[1..] {
                    bounds.expand_to_include(*point);
                }
                black_box(CameraState::covering_bounds(bounds, 16.0 / 9.0, Vec2::splat(0.5)))
            })
        });
    }
    group.finish();
}

fn shake_curve_benchmark(c: &mut Criterion) {
    let curve = CameraStateTransform::spline(
        CameraStateTransform::empty(),
        CameraStateTransform::from_array([0.4, -0.2, 2.0, 0.05]),
        CameraStateTransform::from_array([-0.3, 0.3, -1.0, -0.05]),
        CameraStateTransform::empty(),
        &BezierSplineFactory,
    );

    c.bench_function("shake_curve_sample", |b| {
        b.iter(|| black_box(curve(black_box(0.37))))
    });
}

criterion_group!(
    benches,
    clamp_benchmark,
    decay_benchmark,
    covering_benchmark,
    shake_curve_benchmark
);
criterion_main!(benches);
