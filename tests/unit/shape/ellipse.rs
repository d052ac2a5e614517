use super::*;
use crate::color::gradient::{Color, ColorGradient};

fn unit_circle() -> EllipseGeom {
    EllipseGeom::new(Point::ORIGIN, Vec2::new(1.0, 1.0))
}

#[test]
fn circle_circumference_matches_tau() {
    assert!((unit_circle().circumference() - TAU).abs() < 1e-9);
}

#[test]
fn sampling_closes_the_loop() {
    let gradient = ColorGradient::solid(Color::rgb(0.0, 1.0, 0.0));
    let (points, _, ts) = unit_circle().sample(0.1, &gradient);
    assert_eq!(points[0], *points.last().unwrap());
    assert_eq!(ts[0], 0.0);
    assert_eq!(*ts.last().unwrap(), 1.0);
    for w in ts.windows(2) {
        assert!(w[1] >= w[0]);
    }
}

#[test]
fn containment_respects_radii() {
    let e = EllipseGeom::new(Point::new(1.0, 0.0), Vec2::new(2.0, 0.5));
    assert!(e.is_point_inside(Point::new(2.5, 0.0)));
    assert!(!e.is_point_inside(Point::new(1.0, 1.0)));
}

#[test]
fn line_test_accounts_for_center_offset() {
    let e = EllipseGeom::new(Point::new(3.0, 0.0), Vec2::new(1.0, 1.0));
    // Passes through the offset circle.
    assert!(e.is_line_inside(Point::new(0.0, 0.0), Point::new(6.0, 0.0)));
    // Would hit a circle at the origin but misses this one.
    assert!(!e.is_line_inside(Point::new(0.0, -0.5), Point::new(0.0, 0.5)));
}

#[test]
fn nearest_point_on_circle_is_radial() {
    let q = unit_circle().nearest_point(Point::new(2.0, 0.0));
    assert!((q.x - 1.0).abs() < 1e-9 && q.y.abs() < 1e-9);
}

#[test]
fn nearest_point_on_ellipse_converges() {
    let e = EllipseGeom::new(Point::ORIGIN, Vec2::new(2.0, 1.0));
    let q = e.nearest_point(Point::new(3.0, 0.0));
    assert!((q.x - 2.0).abs() < 1e-6 && q.y.abs() < 1e-6);
    // The result lies on the boundary.
    let on = (q.x / 2.0).powi(2) + q.y.powi(2);
    assert!((on - 1.0).abs() < 1e-6);
}

#[test]
fn signed_distance_is_negative_inside() {
    let c = unit_circle();
    assert!((c.signed_distance(Point::new(2.0, 0.0)) - 1.0).abs() < 1e-9);
    assert!((c.signed_distance(Point::ORIGIN) + 1.0).abs() < 1e-9);
}

#[test]
fn point_at_quarter_arc() {
    let p = unit_circle().point_at(0.25);
    assert!(p.x.abs() < 1e-9 && (p.y - 1.0).abs() < 1e-9);
}

#[test]
fn ellipse_arc_parameter_is_length_uniform() {
    // On a 2:1 ellipse, equal arc-parameter steps travel equal lengths.
    let e = EllipseGeom::new(Point::ORIGIN, Vec2::new(2.0, 1.0));
    let mut lens = Vec::new();
    let steps = 16;
    let mut prev = e.point_at(0.0);
    for i in 1..=steps {
        let p = e.point_at(i as f64 / steps as f64);
        lens.push(prev.distance(p));
        prev = p;
    }
    let mean = lens.iter().sum::<f64>() / lens.len() as f64;
    for len in lens {
        assert!((len - mean).abs() / mean < 0.05, "{len} vs {mean}");
    }
}

#[test]
fn tangent_is_perpendicular_to_radius_on_circle() {
    let t = unit_circle().tangent(0.125).unwrap();
    let p = unit_circle().point_at(0.125);
    assert!((t.dot(p.to_vec2())).abs() < 1e-6);
}
