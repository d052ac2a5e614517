use super::*;
use crate::color::gradient::{Color, ColorGradient};
use crate::foundation::core::DEFAULT_POINT_DENSITY;
use crate::shape::Shape;
use kurbo::Point;

fn red() -> ColorGradient {
    ColorGradient::solid(Color::rgb(1.0, 0.0, 0.0))
}

#[test]
fn name_and_duration_are_validated() {
    assert!(Animation::new("overlong name", 0.0, 1.0, |_| Ok(())).is_err());
    assert!(Animation::new("ok", 0.0, 0.0, |_| Ok(())).is_err());
    assert!(Animation::new("ok", 0.0, 1.0, |_| Ok(())).is_ok());
}

#[test]
fn frame_count_rounds_up() {
    let a = Animation::new("a", 0.0, 1.1, |_| Ok(())).unwrap();
    assert_eq!(a.frame_count(25.0), 28);
}

#[test]
fn frames_come_back_in_index_order() {
    let a = Animation::new("sweep", 0.0, 1.0, |frame: &mut Frame| {
        // x position encodes the frame index.
        let x = frame.index() as f64 / 100.0;
        frame.add_shape(Shape::point(Point::new(x, 0.0), red()));
        Ok(())
    })
    .unwrap();
    let evaluated = evaluate_animation(
        &a,
        25.0,
        DEFAULT_POINT_DENSITY,
        &[],
        false,
        FlipAxes::default(),
    )
    .unwrap();
    assert_eq!(evaluated.frames.len(), 25);
    for (i, lines) in evaluated.frames.iter().enumerate() {
        assert_eq!(lines.len(), 2);
        assert!((lines[1].p1.x - i as f64 / 100.0).abs() < 1e-12);
    }
}

#[test]
fn failing_population_aborts_the_animation() {
    let a = Animation::new("bad", 0.0, 1.0, |frame: &mut Frame| {
        if frame.index() == 7 {
            return Err(BeamlineError::evaluation("deliberate failure"));
        }
        frame.add_shape(Shape::point(Point::ORIGIN, red()));
        Ok(())
    })
    .unwrap();
    let result = evaluate_animation(
        &a,
        25.0,
        DEFAULT_POINT_DENSITY,
        &[],
        false,
        FlipAxes::default(),
    );
    assert!(result.is_err());
}

#[test]
fn show_zones_appends_exclusion_shapes() {
    let a = Animation::new("zones", 0.0, 0.04, |_| Ok(())).unwrap();
    let zones = vec![ExclusionZone::new(
        Shape::circle(Point::ORIGIN, 0.5, red()).unwrap(),
        true,
    )];
    let evaluated = evaluate_animation(
        &a,
        25.0,
        DEFAULT_POINT_DENSITY,
        &zones,
        true,
        FlipAxes::default(),
    )
    .unwrap();
    // The zone itself gets rendered (and is not clipped by itself).
    assert!(!evaluated.frames[0].is_empty());
    assert!(evaluated.frames[0].iter().all(|l| !l.blanked));
}
