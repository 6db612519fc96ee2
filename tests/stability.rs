//! Randomized accuracy tests. The root streams keep roots apart by a minimum
//! gap, so these measure the solvers on well separated roots only.
//!
//! Tolerances should be tightened if the solvers improve.

use std::f64::consts::{PI, TAU};

use geom_roots::{
    __testing::{
        bezier_from_roots, check_roots, check_sorted_roots, separated_roots,
        test_case_power_roots, RandStreamR64,
    },
    roots::{append_cubic_roots, append_quartic_roots, solve_quadratic},
    trig::{solve_unit_circle_ellipse_intersection, solve_unit_circle_line_intersection},
    BezierCoffs,
};

#[test]
fn quadratic_real() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
    let mut start_stream = RandStreamR64::new(1, -2.0, 1.0);
    let mut gap_stream = RandStreamR64::new(2, 0.05, 1.0);
    let mut scale_stream = RandStreamR64::new(3, -10.0, 10.0);
    for i in 0..1000 {
        let expected = separated_roots(&mut start_stream, &mut gap_stream, 2);
        let c = test_case_power_roots(&expected, &mut scale_stream);
        let roots = solve_quadratic(c[0], c[1], c[2]);
        assert!(
            check_roots(&roots, &expected, 1E-9),
            "@ {i}: {roots:?} != {expected:?}"
        );
    }
}

#[test]
fn cubic_real() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
    let mut start_stream = RandStreamR64::new(4, -2.0, 0.0);
    let mut gap_stream = RandStreamR64::new(5, 0.1, 1.0);
    let mut scale_stream = RandStreamR64::new(6, 1.0, 10.0);
    let mut roots = vec![];
    for i in 0..1000 {
        let expected = separated_roots(&mut start_stream, &mut gap_stream, 3);
        let c = test_case_power_roots(&expected, &mut scale_stream);
        roots.clear();
        append_cubic_roots(&[c[0], c[1], c[2], c[3]], &mut roots);
        assert!(
            check_sorted_roots(&roots, &expected, 1E-9),
            "@ {i}: {roots:?} != {expected:?}"
        );
    }
}

#[test]
fn quartic_real() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
    let mut start_stream = RandStreamR64::new(7, -2.0, 0.0);
    let mut gap_stream = RandStreamR64::new(8, 0.1, 1.0);
    let mut scale_stream = RandStreamR64::new(9, 1.0, 10.0);
    let mut roots = vec![];
    for i in 0..1000 {
        let expected = separated_roots(&mut start_stream, &mut gap_stream, 4);
        let c = test_case_power_roots(&expected, &mut scale_stream);
        roots.clear();
        append_quartic_roots(&[c[0], c[1], c[2], c[3], c[4]], &mut roots);
        assert!(
            check_sorted_roots(&roots, &expected, 1E-8),
            "@ {i}: {roots:?} != {expected:?}"
        );
    }
}

/// Roots far from unit scale, where the depressed and resolvent coefficients
/// grow or shrink with powers of the roots.
#[test]
fn quartic_real_off_unit_scale() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
    let mut roots = vec![];
    for (seed, start, gap) in [
        (19, (-1000.0, 1000.0), (10.0, 500.0)),
        (22, (-100.0, 0.0), (1.0, 50.0)),
        (25, (-0.5, 0.0), (0.02, 0.2)),
        (28, (0.0, 0.1), (0.005, 0.05)),
    ] {
        let mut start_stream = RandStreamR64::new(seed, start.0, start.1);
        let mut gap_stream = RandStreamR64::new(seed + 1, gap.0, gap.1);
        let mut scale_stream = RandStreamR64::new(seed + 2, -10.0, 10.0);
        for i in 0..1000 {
            let expected = separated_roots(&mut start_stream, &mut gap_stream, 4);
            let c = test_case_power_roots(&expected, &mut scale_stream);
            roots.clear();
            append_quartic_roots(&[c[0], c[1], c[2], c[3], c[4]], &mut roots);
            assert!(
                check_sorted_roots(&roots, &expected, 1E-8),
                "@ {seed}/{i}: {roots:?} != {expected:?}"
            );
        }
    }
}

/// Orders 6 and 7 go through deflation rather than a closed form.
#[test]
fn bezier_deflation() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
    let mut start_stream = RandStreamR64::new(10, 0.03, 0.08);
    let mut gap_stream = RandStreamR64::new(11, 0.12, 0.16);
    let mut scale_stream = RandStreamR64::new(12, 1.0, 10.0);
    let mut target_stream = RandStreamR64::new(13, -1.0, 1.0);
    for i in 0..200 {
        let count = 5 + i % 2;
        let expected = separated_roots(&mut start_stream, &mut gap_stream, count);
        let c = scale_stream.next().unwrap();
        let target = target_stream.next().unwrap();
        let bezier = BezierCoffs::from(bezier_from_roots(&expected, c)).offset(target);
        assert!(matches!(bezier, BezierCoffs::General(_)));

        let roots = bezier.roots(target, true).unwrap();
        assert!(
            check_sorted_roots(&roots, &expected, 1E-7),
            "@ {i}: {roots:?} != {expected:?}"
        );
        for r in roots {
            assert!((bezier.evaluate(r) - target).abs() < 1E-8);
        }
    }
}

#[test]
fn unit_circle_and_line() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
    let mut direction_stream = RandStreamR64::new(14, -PI, PI);
    let mut distance_stream = RandStreamR64::new(15, -0.95, 0.95);
    for i in 0..1000 {
        let phi = direction_stream.next().unwrap();
        let d = distance_stream.next().unwrap();
        let (alpha, beta, gamma) = (-d, phi.cos(), phi.sin());
        let radians = solve_unit_circle_line_intersection(alpha, beta, gamma).unwrap();
        assert_eq!(radians.len(), 2, "@ {i}: {radians:?}");
        for theta in radians {
            let residual = gamma.mul_add(theta.sin(), beta.mul_add(theta.cos(), alpha));
            assert!(residual.abs() < 1E-10, "@ {i}: residual {residual}");
        }
    }
}

#[test]
fn unit_circle_and_ellipse() {
    const SAMPLES: u32 = 1024;

    let _ = simple_logger::init_with_level(log::Level::Debug);
    let mut center_stream = RandStreamR64::new(16, -0.5, 0.5);
    let mut axis_stream = RandStreamR64::new(17, 0.2, 2.0);
    let mut angle_stream = RandStreamR64::new(18, -PI, PI);
    for i in 0..2000 {
        let (cx, cy) = (center_stream.next().unwrap(), center_stream.next().unwrap());
        let (a, b) = (axis_stream.next().unwrap(), axis_stream.next().unwrap());
        let (s, c) = angle_stream.next().unwrap().sin_cos();
        let (ux, uy, vx, vy) = (a * c, a * s, -b * s, b * c);

        // crossings of the circle seen by sampling |P(phi)|^2 - 1 around the
        // ellipse; two crossings inside one sample interval are not seen
        let outside = |phi: f64| {
            let (sin_phi, cos_phi) = phi.sin_cos();
            let x = cx + ux * cos_phi + vx * sin_phi;
            let y = cy + uy * cos_phi + vy * sin_phi;
            x.mul_add(x, y * y) > 1.0
        };
        let samples: Vec<bool> = (0..SAMPLES)
            .map(|k| outside(TAU * f64::from(k) / f64::from(SAMPLES)))
            .collect();
        let crossings = samples
            .iter()
            .zip(samples.iter().cycle().skip(1))
            .filter(|(here, next)| here != next)
            .count();

        let hits = solve_unit_circle_ellipse_intersection(cx, cy, ux, uy, vx, vy).unwrap();
        assert!(hits.len() <= 4, "@ {i}: {hits:?}");
        assert!(hits.len() >= crossings, "@ {i}: {crossings} sampled crossings, {hits:?}");
        for hit in hits {
            let (sin_phi, cos_phi) = hit.ellipse_radians.sin_cos();
            let x = cx + ux * cos_phi + vx * sin_phi;
            let y = cy + uy * cos_phi + vy * sin_phi;
            assert!((x.hypot(y) - 1.0).abs() < 1E-8, "@ {i}: {hit:?}");
            assert!((hit.cos - x).abs() < 1E-15);
            assert!((hit.circle_radians.sin() - y).abs() < 1E-8);
        }
    }
}
