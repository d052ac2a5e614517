use super::*;

#[test]
fn solid_gradient_is_constant() {
    let g = ColorGradient::solid(Color::rgb(1.0, 0.0, 0.0));
    for s in [0.0, 0.3, 1.0] {
        assert_eq!(g.get_color(s), Color::rgb(1.0, 0.0, 0.0));
    }
}

#[test]
fn endpoints_match_waypoints() {
    let g = ColorGradient::linear(
        Color::rgb(1.0, 0.0, 0.0),
        Color::rgb(0.0, 0.0, 1.0),
        InterpMode::Rgb,
    );
    assert_eq!(g.get_color(0.0), Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(g.get_color(1.0), Color::rgb(0.0, 0.0, 1.0));
}

#[test]
fn out_of_range_positions_clamp() {
    let g = ColorGradient::linear(
        Color::rgb(1.0, 0.0, 0.0),
        Color::rgb(0.0, 0.0, 1.0),
        InterpMode::Rgb,
    );
    assert_eq!(g.get_color(-0.5), Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(g.get_color(1.5), Color::rgb(0.0, 0.0, 1.0));
}

#[test]
fn rgb_interpolation_is_channelwise_monotonic() {
    let g = ColorGradient::linear(
        Color::rgb(1.0, 0.2, 0.0),
        Color::rgb(0.0, 0.8, 1.0),
        InterpMode::Rgb,
    );
    let mut prev = g.get_color(0.0);
    for i in 1..=10 {
        let c = g.get_color(i as f64 / 10.0);
        assert!(c.r <= prev.r + 1e-12);
        assert!(c.g >= prev.g - 1e-12);
        assert!(c.b >= prev.b - 1e-12);
        prev = c;
    }
}

#[test]
fn waypoints_stay_sorted_after_insertion() {
    let mut g = ColorGradient::solid(Color::rgb(1.0, 0.0, 0.0));
    g.add_color(0.5, Color::rgb(0.0, 1.0, 0.0)).unwrap();
    g.add_color(0.25, Color::rgb(0.0, 0.0, 1.0)).unwrap();
    let positions: Vec<f64> = g.waypoints().iter().map(|(p, _)| *p).collect();
    assert_eq!(positions, vec![0.0, 0.25, 0.5, 1.0]);
}

#[test]
fn rejects_out_of_range_waypoint() {
    let mut g = ColorGradient::solid(Color::BLACK);
    assert!(g.add_color(1.5, Color::BLACK).is_err());
}

#[test]
fn hsv_roundtrip_for_primaries() {
    for c in [
        Color::rgb(1.0, 0.0, 0.0),
        Color::rgb(0.0, 1.0, 0.0),
        Color::rgb(0.0, 0.0, 1.0),
        Color::rgb(0.5, 0.5, 0.5),
    ] {
        let (h, s, v) = c.to_hsv();
        let back = Color::hsv(h, s, v);
        assert!((back.r - c.r).abs() < 1e-9);
        assert!((back.g - c.g).abs() < 1e-9);
        assert!((back.b - c.b).abs() < 1e-9);
    }
}
