use super::*;
use crate::color::gradient::Color;
use crate::foundation::core::DEFAULT_POINT_DENSITY;
use kurbo::Vec2;

fn white() -> ColorGradient {
    ColorGradient::solid(Color::rgb(1.0, 1.0, 1.0))
}

fn circle(center: Point, radius: f64) -> Shape {
    Shape::circle(center, radius, white()).unwrap()
}

#[test]
fn union_of_disjoint_circles_yields_two_contours() {
    let mut combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let a = circle(Point::new(-0.5, 0.0), 0.2);
    let b = circle(Point::new(0.5, 0.0), 0.2);
    let shapes = combiner.combine(&a, &b, CombineOp::Union, &white()).unwrap();
    assert_eq!(shapes.len(), 2);
}

#[test]
fn union_of_a_shape_with_itself_matches_its_boundary() {
    let mut combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let a = circle(Point::ORIGIN, 0.5);
    let shapes = combiner.combine(&a, &a, CombineOp::Union, &white()).unwrap();
    assert_eq!(shapes.len(), 1);
    let total: f64 = shapes.iter().map(Shape::path_length).sum();
    let expected = a.path_length();
    assert!(
        (total - expected).abs() / expected < 0.02,
        "{total} vs {expected}"
    );
}

#[test]
fn intersection_of_disjoint_circles_is_empty() {
    let mut combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let a = circle(Point::new(-0.5, 0.0), 0.2);
    let b = circle(Point::new(0.5, 0.0), 0.2);
    let shapes = combiner
        .combine(&a, &b, CombineOp::Intersection, &white())
        .unwrap();
    assert!(shapes.is_empty());
}

#[test]
fn overlapping_union_merges_into_one_contour() {
    let mut combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let a = circle(Point::new(-0.2, 0.0), 0.4);
    let b = circle(Point::new(0.2, 0.0), 0.4);
    let shapes = combiner.combine(&a, &b, CombineOp::Union, &white()).unwrap();
    assert_eq!(shapes.len(), 1);
    // The merged outline is longer than either circle alone.
    assert!(shapes[0].path_length() > a.path_length());
}

#[test]
fn difference_carves_a_hole() {
    let mut combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let outer = circle(Point::ORIGIN, 0.6);
    let inner = circle(Point::ORIGIN, 0.3);
    let shapes = combiner
        .combine(&outer, &inner, CombineOp::Difference, &white())
        .unwrap();
    // Annulus: outer boundary plus inner boundary, longest first.
    assert_eq!(shapes.len(), 2);
    assert!(shapes[0].path_length() > shapes[1].path_length());
}

#[test]
fn repeated_combination_hits_the_cache() {
    let mut combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let a = circle(Point::new(-0.2, 0.0), 0.4);
    let b = circle(Point::new(0.2, 0.0), 0.4);
    let first = combiner.combine(&a, &b, CombineOp::Union, &white()).unwrap();
    assert_eq!(combiner.cached_results(), 1);
    let second = combiner.combine(&a, &b, CombineOp::Union, &white()).unwrap();
    assert_eq!(combiner.cached_results(), 1);
    assert_eq!(first.len(), second.len());
}

#[test]
fn different_operators_get_different_cache_slots() {
    let mut combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let a = circle(Point::new(-0.2, 0.0), 0.4);
    let b = circle(Point::new(0.2, 0.0), 0.4);
    combiner.combine(&a, &b, CombineOp::Union, &white()).unwrap();
    combiner
        .combine(&a, &b, CombineOp::Intersection, &white())
        .unwrap();
    assert_eq!(combiner.cached_results(), 2);
}

#[test]
fn moved_operand_invalidates_the_key() {
    let mut combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let a = circle(Point::new(-0.2, 0.0), 0.4);
    let b = circle(Point::new(0.2, 0.0), 0.4);
    combiner.combine(&a, &b, CombineOp::Union, &white()).unwrap();
    let b_moved = b.translate(Vec2::new(0.1, 0.0));
    combiner
        .combine(&a, &b_moved, CombineOp::Union, &white())
        .unwrap();
    assert_eq!(combiner.cached_results(), 2);
}

#[test]
fn smooth_union_approaches_the_minimum_far_from_the_joint() {
    let op = CombineOp::SmoothUnion { k: 32.0 };
    assert!((op.apply(1.0, 3.0) - 1.0).abs() < 1e-9);
    // Near the joint it dips below both operands.
    assert!(op.apply(0.05, 0.05) < 0.05);
}

#[test]
fn custom_field_bypasses_the_cache() {
    let combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let a = circle(Point::new(-0.2, 0.0), 0.4);
    let b = circle(Point::new(0.2, 0.0), 0.4);
    let shapes = combiner
        .combine_with(&a, &b, |d1, d2| d1.min(d2), &white())
        .unwrap();
    assert_eq!(shapes.len(), 1);
    assert_eq!(combiner.cached_results(), 0);
}

#[test]
fn from_field_extracts_an_arbitrary_level_set() {
    let combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let shapes = combiner
        .from_field(
            |p| p.to_vec2().hypot() - 0.5,
            &white(),
            None,
        )
        .unwrap();
    assert_eq!(shapes.len(), 1);
    let expected = std::f64::consts::TAU * 0.5;
    let got = shapes[0].path_length();
    assert!((got - expected).abs() / expected < 0.02, "{got}");
}

#[test]
fn contours_are_sorted_longest_first() {
    let mut combiner = SdfCombiner::new(DEFAULT_POINT_DENSITY);
    let small = circle(Point::new(-0.6, 0.0), 0.15);
    let large = circle(Point::new(0.3, 0.0), 0.5);
    let shapes = combiner
        .combine(&small, &large, CombineOp::Union, &white())
        .unwrap();
    assert_eq!(shapes.len(), 2);
    assert!(shapes[0].path_length() >= shapes[1].path_length());
}
