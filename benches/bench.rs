use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geom_roots::{
    __testing::bezier_from_roots,
    roots::{append_cubic_roots, append_quartic_roots, solve_quadratic},
    trig::{solve_unit_circle_ellipse_intersection, solve_unit_circle_line_intersection},
    BezierCoffs,
};

criterion_main!(micro_benches, realistic_benches);
criterion_group!(micro_benches, analytic, bezier_roots);

pub fn analytic(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytic");
    group.bench_function("quadratic", |b| {
        b.iter(|| black_box(solve_quadratic(black_box(-2.0), black_box(0.5), black_box(1.0))));
    });
    let mut roots = Vec::with_capacity(4);
    group.bench_function("cubic", |b| {
        b.iter(|| {
            roots.clear();
            append_cubic_roots(black_box(&[-6.0, 11.0, -6.0, 1.0]), &mut roots);
            black_box(roots.len())
        });
    });
    group.bench_function("quartic", |b| {
        b.iter(|| {
            roots.clear();
            append_quartic_roots(black_box(&[24.0, -50.0, 35.0, -10.0, 1.0]), &mut roots);
            black_box(roots.len())
        });
    });
    group.finish();
}

pub fn bezier_roots(c: &mut Criterion) {
    let mut group = c.benchmark_group("bezier roots");
    for n in [1, 2, 3, 4, 6, 8, 12] {
        let roots: Vec<f64> = (0..n)
            .map(|i| (f64::from(i) + 0.5) / f64::from(n))
            .collect();
        let bezier = BezierCoffs::from(bezier_from_roots(&roots, 1.0));
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| black_box(bezier.roots(black_box(0.0), true)));
        });
    }
    group.finish();
}

criterion_group!(realistic_benches, circle_intersections);

pub fn circle_intersections(c: &mut Criterion) {
    let mut group = c.benchmark_group("unit circle intersection");
    group.bench_function("line", |b| {
        b.iter(|| {
            black_box(solve_unit_circle_line_intersection(
                black_box(-0.5),
                black_box(0.6),
                black_box(0.8),
            ))
        });
    });
    group.bench_function("ellipse", |b| {
        b.iter(|| {
            black_box(solve_unit_circle_ellipse_intersection(
                black_box(0.2),
                black_box(-0.1),
                black_box(1.5),
                black_box(0.3),
                black_box(-0.2),
                black_box(0.6),
            ))
        });
    });
    group.finish();
}
