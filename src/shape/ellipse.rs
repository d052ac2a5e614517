use std::f64::consts::TAU;

use kurbo::{Point, Vec2};

use crate::color::gradient::{Color, ColorGradient};
use crate::foundation::error::{BeamlineError, BeamlineResult};

/// Steps used when numerically inverting arc length to an angle.
const ARC_STEPS: usize = 256;

/// Axis-aligned ellipse in local coordinates.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EllipseGeom {
    center: Point,
    radii: Vec2,
}

impl EllipseGeom {
    pub(crate) fn new(center: Point, radii: Vec2) -> Self {
        Self { center, radii }
    }

    pub(crate) fn center(&self) -> Point {
        self.center
    }

    pub(crate) fn radii(&self) -> Vec2 {
        self.radii
    }

    /// Ramanujan's circumference approximation.
    pub(crate) fn circumference(&self) -> f64 {
        let (a, b) = (self.radii.x, self.radii.y);
        let h = ((a - b) / (a + b)).powi(2);
        std::f64::consts::PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
    }

    /// Boundary point at angle `theta`.
    fn at_angle(&self, theta: f64) -> Point {
        Point::new(
            self.center.x + self.radii.x * theta.cos(),
            self.center.y + self.radii.y * theta.sin(),
        )
    }

    /// Angle at arc parameter `s`. A circle inverts analytically; an
    /// ellipse walks a fixed chord subdivision and interpolates.
    fn angle_at(&self, s: f64) -> f64 {
        if self.radii.x == self.radii.y {
            return TAU * s;
        }

        let step = TAU / ARC_STEPS as f64;
        let mut total = 0.0;
        let mut chords = [0.0; ARC_STEPS];
        let mut prev = self.at_angle(0.0);
        for (i, chord) in chords.iter_mut().enumerate() {
            let next = self.at_angle((i + 1) as f64 * step);
            *chord = prev.distance(next);
            total += *chord;
            prev = next;
        }

        let target = s * total;
        let mut accumulated = 0.0;
        for (i, chord) in chords.iter().enumerate() {
            if accumulated + chord >= target && *chord > 0.0 {
                let frac = (target - accumulated) / chord;
                return (i as f64 + frac) * step;
            }
            accumulated += chord;
        }
        TAU
    }

    /// Counterclockwise boundary sampling starting at angle 0; the start
    /// point is repeated at arc parameter 1 to close the path.
    pub(crate) fn sample(
        &self,
        spacing: f64,
        gradient: &ColorGradient,
    ) -> (Vec<Point>, Vec<Color>, Vec<f64>) {
        let circumference = self.circumference();
        let n = ((circumference / spacing).round() as usize).max(3);

        let mut points = Vec::with_capacity(n + 1);
        let mut colors = Vec::with_capacity(n + 1);
        let mut arc_params = Vec::with_capacity(n + 1);

        let mut accumulated = 0.0;
        let mut prev = self.at_angle(0.0);
        for i in 0..=n {
            let p = self.at_angle(TAU * i as f64 / n as f64);
            accumulated += prev.distance(p);
            let t = if i == 0 {
                0.0
            } else if i == n {
                1.0
            } else {
                (accumulated / circumference).min(1.0)
            };
            points.push(p);
            colors.push(gradient.get_color(t));
            arc_params.push(t);
            prev = p;
        }

        (points, colors, arc_params)
    }

    pub(crate) fn is_point_inside(&self, p: Point) -> bool {
        let dx = (p.x - self.center.x) / self.radii.x;
        let dy = (p.y - self.center.y) / self.radii.y;
        dx * dx + dy * dy <= 1.0
    }

    /// Whether the segment `p0..p1` touches the ellipse interior, via the
    /// quadratic for the segment in the ellipse's normalized frame.
    pub(crate) fn is_line_inside(&self, p0: Point, p1: Point) -> bool {
        if self.is_point_inside(p0) || self.is_point_inside(p1) {
            return true;
        }
        let u = Vec2::new(
            (p0.x - self.center.x) / self.radii.x,
            (p0.y - self.center.y) / self.radii.y,
        );
        let d = Vec2::new(
            (p1.x - p0.x) / self.radii.x,
            (p1.y - p0.y) / self.radii.y,
        );
        let a = d.dot(d);
        if a == 0.0 {
            return false;
        }
        let b = 2.0 * u.dot(d);
        let c = u.dot(u) - 1.0;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return false;
        }
        let sqrt_disc = disc.sqrt();
        let t0 = (-b - sqrt_disc) / (2.0 * a);
        let t1 = (-b + sqrt_disc) / (2.0 * a);
        (0.0..=1.0).contains(&t0) || (0.0..=1.0).contains(&t1)
    }

    /// Closest boundary point via Newton iteration on the boundary angle.
    pub(crate) fn nearest_point(&self, p: Point) -> Point {
        let q = p - self.center;
        let (rx, ry) = (self.radii.x, self.radii.y);
        let mut theta = f64::atan2(q.y * rx, q.x * ry);
        for _ in 0..12 {
            let (sin, cos) = theta.sin_cos();
            let e = Vec2::new(rx * cos, ry * sin);
            let e1 = Vec2::new(-rx * sin, ry * cos);
            let e2 = Vec2::new(-rx * cos, -ry * sin);
            let d = e - q;
            let g = d.dot(e1);
            let g1 = e1.dot(e1) + d.dot(e2);
            if g1.abs() < 1e-12 {
                break;
            }
            theta -= g / g1;
        }
        self.at_angle(theta)
    }

    pub(crate) fn signed_distance(&self, p: Point) -> f64 {
        let dist = p.distance(self.nearest_point(p));
        if self.is_point_inside(p) {
            -dist
        } else {
            dist
        }
    }

    pub(crate) fn point_at(&self, s: f64) -> Point {
        self.at_angle(self.angle_at(s))
    }

    /// Untransformed tangent direction at arc parameter `s`.
    pub(crate) fn tangent(&self, s: f64) -> BeamlineResult<Vec2> {
        if self.radii.x == 0.0 && self.radii.y == 0.0 {
            return Err(BeamlineError::geometry(
                "tangent is undefined for degenerate geometry",
            ));
        }
        let theta = self.angle_at(s);
        let v = Vec2::new(-self.radii.x * theta.sin(), self.radii.y * theta.cos());
        if v.hypot() == 0.0 {
            return Err(BeamlineError::geometry(
                "tangent is undefined for degenerate geometry",
            ));
        }
        Ok(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/ellipse.rs"]
mod tests;
