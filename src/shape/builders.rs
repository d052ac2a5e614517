//! Derived constructors: every one of these lowers to a polyline, so the
//! result supports the full shape contract with no special cases.

use std::f64::consts::TAU;

use kurbo::{Point, Vec2};

use crate::color::gradient::ColorGradient;
use crate::foundation::error::{BeamlineError, BeamlineResult};
use crate::shape::{Geometry, PolylineGeom, Shape};

impl Shape {
    /// A single open segment.
    pub fn line(start: Point, end: Point, gradient: ColorGradient) -> Self {
        Self::from_geometry(
            Geometry::Polyline(PolylineGeom::new(vec![start, end], false)),
            gradient,
        )
    }

    /// A triangle through three vertices.
    pub fn triangle(p0: Point, p1: Point, p2: Point, gradient: ColorGradient) -> Self {
        Self::from_geometry(
            Geometry::Polyline(PolylineGeom::new(vec![p0, p1, p2], true)),
            gradient,
        )
    }

    /// An axis-aligned rectangle centered at `center`.
    pub fn rectangle(
        center: Point,
        size: Vec2,
        gradient: ColorGradient,
    ) -> BeamlineResult<Self> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(BeamlineError::validation(format!(
                "rectangle size must be positive, got ({}, {})",
                size.x, size.y
            )));
        }
        let (hw, hh) = (size.x / 2.0, size.y / 2.0);
        Self::polygon(
            vec![
                Point::new(center.x - hw, center.y - hh),
                Point::new(center.x + hw, center.y - hh),
                Point::new(center.x + hw, center.y + hh),
                Point::new(center.x - hw, center.y + hh),
            ],
            gradient,
        )
    }

    /// An axis-aligned square centered at `center`.
    pub fn square(center: Point, side: f64, gradient: ColorGradient) -> BeamlineResult<Self> {
        Self::rectangle(center, Vec2::new(side, side), gradient)
    }

    /// A regular polygon with `sides` vertices on a circle of `radius`,
    /// the first vertex at angle `TAU / 4` (pointing up).
    pub fn regular_ngon(
        center: Point,
        sides: usize,
        radius: f64,
        gradient: ColorGradient,
    ) -> BeamlineResult<Self> {
        if sides < 3 {
            return Err(BeamlineError::validation(format!(
                "regular polygon needs at least 3 sides, got {sides}"
            )));
        }
        if radius <= 0.0 {
            return Err(BeamlineError::validation(format!(
                "regular polygon radius must be positive, got {radius}"
            )));
        }
        let points = (0..sides)
            .map(|i| {
                let angle = TAU / 4.0 + TAU * i as f64 / sides as f64;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();
        Self::polygon(points, gradient)
    }

    /// A star with `spikes` points, alternating between `outer_radius` and
    /// `inner_radius`, the first spike pointing up.
    pub fn star(
        center: Point,
        spikes: usize,
        outer_radius: f64,
        inner_radius: f64,
        gradient: ColorGradient,
    ) -> BeamlineResult<Self> {
        if spikes < 2 {
            return Err(BeamlineError::validation(format!(
                "star needs at least 2 spikes, got {spikes}"
            )));
        }
        if outer_radius <= 0.0 || inner_radius <= 0.0 {
            return Err(BeamlineError::validation(format!(
                "star radii must be positive, got ({outer_radius}, {inner_radius})"
            )));
        }
        let points = (0..2 * spikes)
            .map(|i| {
                let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
                let angle = TAU / 4.0 + TAU * i as f64 / (2 * spikes) as f64;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();
        Self::polygon(points, gradient)
    }

    /// A polyline traced from a parametric curve `f` evaluated at
    /// `samples` uniform parameter values over `[0, 1]`.
    pub fn from_parametric(
        f: impl Fn(f64) -> Point,
        samples: usize,
        closed: bool,
        gradient: ColorGradient,
    ) -> BeamlineResult<Self> {
        if samples < 2 {
            return Err(BeamlineError::validation(format!(
                "parametric curve needs at least 2 samples, got {samples}"
            )));
        }
        let points = (0..samples)
            .map(|i| f(i as f64 / (samples - 1) as f64))
            .collect();
        Self::polyline(points, closed, gradient)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/builders.rs"]
mod tests;
