use super::*;
use crate::color::gradient::Color;

fn white() -> ColorGradient {
    ColorGradient::solid(Color::rgb(1.0, 1.0, 1.0))
}

#[test]
fn square_perimeter() {
    let sq = Shape::square(Point::ORIGIN, 2.0, white()).unwrap();
    assert!((sq.path_length() - 8.0).abs() < 1e-12);
}

#[test]
fn rectangle_rejects_zero_size() {
    assert!(Shape::rectangle(Point::ORIGIN, Vec2::new(0.0, 1.0), white()).is_err());
}

#[test]
fn ngon_vertices_lie_on_the_circle() {
    let hex = Shape::regular_ngon(Point::ORIGIN, 6, 1.0, white()).unwrap();
    // Vertex at arc parameter 0 sits on the unit circle.
    let p = hex.point_by_arc_param(0.0, 0.0).unwrap();
    assert!((p.to_vec2().hypot() - 1.0).abs() < 1e-12);
}

#[test]
fn ngon_needs_three_sides() {
    assert!(Shape::regular_ngon(Point::ORIGIN, 2, 1.0, white()).is_err());
}

#[test]
fn star_alternates_radii() {
    let star = Shape::star(Point::ORIGIN, 5, 1.0, 0.4, white()).unwrap();
    assert!(star.is_point_inside(Point::new(0.0, 0.9)));
    // Between spikes the boundary pulls in to the inner radius.
    assert!(!star.is_point_inside(Point::new(0.0, -0.9)));
}

#[test]
fn parametric_curve_traces_the_function() {
    let curve = Shape::from_parametric(
        |t| Point::new(t, t * t),
        64,
        false,
        white(),
    )
    .unwrap();
    let end = curve.point_by_arc_param(1.0, 0.0).unwrap();
    assert!((end.x - 1.0).abs() < 1e-9 && (end.y - 1.0).abs() < 1e-9);
}
