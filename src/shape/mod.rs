//! The polymorphic shape model: points, polylines and ellipses, each
//! carrying a color gradient, a transform stack and a displacement chain.

pub mod builders;
pub mod displace;
mod ellipse;
mod polyline;
pub mod sdf;

use kurbo::{Point, Vec2};
use nalgebra::Matrix3;

use crate::color::gradient::{Color, ColorGradient};
use crate::foundation::core::{sample_spacing, DEFAULT_POINT_DENSITY};
use crate::foundation::error::{BeamlineError, BeamlineResult};
use crate::foundation::math::{on_segment, orientation};
use crate::transform::stack::{self, TransformStack};

pub use displace::{Axis, AxisMap, Displacement, NoiseField};

pub(crate) use ellipse::EllipseGeom;
pub(crate) use polyline::PolylineGeom;

/// Concrete local-space geometry behind a [`Shape`].
#[derive(Clone, Debug)]
pub(crate) enum Geometry {
    Point(Point),
    Polyline(PolylineGeom),
    Ellipse(EllipseGeom),
}

/// A drawable shape: local geometry plus gradient, transforms and
/// displacements.
///
/// Transform helpers take the shape by value and return it, so a shape is
/// typically built as a chain:
///
/// ```
/// use beamline::{Color, ColorGradient, Shape};
/// use kurbo::{Point, Vec2};
///
/// let shape = Shape::circle(Point::ORIGIN, 0.5, ColorGradient::solid(Color::rgb(1.0, 0.0, 0.0)))?
///     .scale(Vec2::new(0.5, 0.5))
///     .translate(Vec2::new(0.2, 0.0));
/// # let _ = shape;
/// # Ok::<(), beamline::BeamlineError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Shape {
    geometry: Geometry,
    gradient: ColorGradient,
    transforms: TransformStack,
    displacements: Vec<Displacement>,
    point_density: Option<f64>,
}

impl Shape {
    fn from_geometry(geometry: Geometry, gradient: ColorGradient) -> Self {
        Self {
            geometry,
            gradient,
            transforms: TransformStack::new(),
            displacements: Vec::new(),
            point_density: None,
        }
    }

    /// A single point (rendered as a two-sample dwell).
    pub fn point(p: Point, gradient: ColorGradient) -> Self {
        Self::from_geometry(Geometry::Point(p), gradient)
    }

    /// An open or closed vertex path. Needs at least two vertices.
    pub fn polyline(
        points: Vec<Point>,
        closed: bool,
        gradient: ColorGradient,
    ) -> BeamlineResult<Self> {
        if points.len() < 2 {
            return Err(BeamlineError::validation(format!(
                "polyline needs at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(Self::from_geometry(
            Geometry::Polyline(PolylineGeom::new(points, closed)),
            gradient,
        ))
    }

    /// A closed vertex path. Needs at least three vertices.
    pub fn polygon(points: Vec<Point>, gradient: ColorGradient) -> BeamlineResult<Self> {
        if points.len() < 3 {
            return Err(BeamlineError::validation(format!(
                "polygon needs at least 3 points, got {}",
                points.len()
            )));
        }
        Self::polyline(points, true, gradient)
    }

    /// An axis-aligned ellipse with strictly positive radii.
    pub fn ellipse(center: Point, radii: Vec2, gradient: ColorGradient) -> BeamlineResult<Self> {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return Err(BeamlineError::validation(format!(
                "ellipse radii must be positive, got ({}, {})",
                radii.x, radii.y
            )));
        }
        Ok(Self::from_geometry(
            Geometry::Ellipse(EllipseGeom::new(center, radii)),
            gradient,
        ))
    }

    /// A circle with a strictly positive radius.
    pub fn circle(center: Point, radius: f64, gradient: ColorGradient) -> BeamlineResult<Self> {
        if radius <= 0.0 {
            return Err(BeamlineError::validation(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        Ok(Self::from_geometry(
            Geometry::Ellipse(EllipseGeom::new(center, Vec2::new(radius, radius))),
            gradient,
        ))
    }

    // --- accessors -------------------------------------------------------

    /// The shape's color gradient.
    pub fn gradient(&self) -> &ColorGradient {
        &self.gradient
    }

    /// Replace the gradient.
    pub fn with_gradient(mut self, gradient: ColorGradient) -> Self {
        self.gradient = gradient;
        self
    }

    /// Per-shape point density override.
    pub fn point_density(&self) -> Option<f64> {
        self.point_density
    }

    /// Set a per-shape point density (points per normalized unit, scaled by
    /// the output resolution).
    pub fn with_point_density(mut self, density: f64) -> Self {
        self.point_density = Some(density);
        self
    }

    fn effective_density(&self, fallback: f64) -> f64 {
        self.point_density.unwrap_or(fallback)
    }

    /// Local path length: 0 for a point, cumulative segment length for a
    /// polyline, Ramanujan circumference for an ellipse.
    pub fn path_length(&self) -> f64 {
        match &self.geometry {
            Geometry::Point(_) => 0.0,
            Geometry::Polyline(poly) => poly.total_length(),
            Geometry::Ellipse(ell) => ell.circumference(),
        }
    }

    /// Centroid of the local geometry, pushed through the transform stack.
    pub fn centroid(&self) -> Point {
        let local = match &self.geometry {
            Geometry::Point(p) => *p,
            Geometry::Polyline(poly) => poly.centroid(),
            Geometry::Ellipse(ell) => ell.center(),
        };
        self.transforms.apply(local)
    }

    pub(crate) fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub(crate) fn transforms(&self) -> &TransformStack {
        &self.transforms
    }

    // --- sampling --------------------------------------------------------

    /// Sample the shape at `time` into output points, colors and arc
    /// parameters. Points are transformed and displaced; `density_fallback`
    /// applies when the shape has no density override.
    pub fn compute_sample_points(
        &self,
        time: f64,
        density_fallback: f64,
    ) -> (Vec<Point>, Vec<Color>, Vec<f64>) {
        let spacing = sample_spacing(self.effective_density(density_fallback));
        let (local, colors, arc_params) = match &self.geometry {
            Geometry::Point(p) => (
                vec![*p, *p],
                vec![self.gradient.get_color(0.0), self.gradient.get_color(1.0)],
                vec![0.0, 1.0],
            ),
            Geometry::Polyline(poly) => poly.sample(spacing, &self.gradient),
            Geometry::Ellipse(ell) => ell.sample(spacing, &self.gradient),
        };

        let points = local
            .into_iter()
            .zip(&arc_params)
            .map(|(p, &s)| self.apply_displacements(self.transforms.apply(p), s, time))
            .collect();
        (points, colors, arc_params)
    }

    /// Convenience wrapper using the engine default density.
    pub fn sample_points(&self, time: f64) -> (Vec<Point>, Vec<Color>, Vec<f64>) {
        self.compute_sample_points(time, DEFAULT_POINT_DENSITY)
    }

    fn apply_displacements(&self, p: Point, s: f64, time: f64) -> Point {
        self.displacements
            .iter()
            .fold(p, |acc, d| d.apply(self, acc, s, time))
    }

    // --- queries (world space, undisplaced path) -------------------------

    /// Signed distance from `p` to the shape boundary, measured in the
    /// shape's local frame. Negative inside closed geometry.
    pub fn signed_distance(&self, p: Point) -> f64 {
        let local = self.transforms.apply_inverse(p);
        match &self.geometry {
            Geometry::Point(q) => local.distance(*q),
            Geometry::Polyline(poly) => poly.signed_distance(local),
            Geometry::Ellipse(ell) => ell.signed_distance(local),
        }
    }

    /// Closest point on the shape boundary to `p`.
    pub fn nearest_point(&self, p: Point) -> Point {
        let local = self.transforms.apply_inverse(p);
        let nearest = match &self.geometry {
            Geometry::Point(q) => *q,
            Geometry::Polyline(poly) => poly.nearest_point(local),
            Geometry::Ellipse(ell) => ell.nearest_point(local),
        };
        self.transforms.apply(nearest)
    }

    /// Whether `p` lies inside the shape. Points and open polylines
    /// contain nothing.
    pub fn is_point_inside(&self, p: Point) -> bool {
        let local = self.transforms.apply_inverse(p);
        match &self.geometry {
            Geometry::Point(_) => false,
            Geometry::Polyline(poly) => poly.is_point_inside(local),
            Geometry::Ellipse(ell) => ell.is_point_inside(local),
        }
    }

    /// Whether the segment `p0..p1` touches the shape (an endpoint inside
    /// or a boundary crossing). A point geometry is touched when it lies
    /// on the segment.
    pub fn is_line_inside(&self, p0: Point, p1: Point) -> bool {
        let l0 = self.transforms.apply_inverse(p0);
        let l1 = self.transforms.apply_inverse(p1);
        match &self.geometry {
            Geometry::Point(q) => orientation(l0, l1, *q) == 0 && on_segment(l0, *q, l1),
            Geometry::Polyline(poly) => poly.is_line_inside(l0, l1),
            Geometry::Ellipse(ell) => ell.is_line_inside(l0, l1),
        }
    }

    /// Whether the segment `p0..p1` stays clear of the shape.
    pub fn is_line_outside(&self, p0: Point, p1: Point) -> bool {
        !self.is_line_inside(p0, p1)
    }

    fn check_arc_param(s: f64) -> BeamlineResult<()> {
        if !(0.0..=1.0).contains(&s) {
            return Err(BeamlineError::validation(format!(
                "arc parameter {s} outside [0, 1]"
            )));
        }
        Ok(())
    }

    /// Point on the shape at arc parameter `s`, transformed and displaced.
    pub fn point_by_arc_param(&self, s: f64, time: f64) -> BeamlineResult<Point> {
        Self::check_arc_param(s)?;
        let local = match &self.geometry {
            Geometry::Point(p) => *p,
            Geometry::Polyline(poly) => poly.point_at(s),
            Geometry::Ellipse(ell) => ell.point_at(s),
        };
        Ok(self.apply_displacements(self.transforms.apply(local), s, time))
    }

    /// Unit tangent of the transformed (undisplaced) path at `s`.
    pub fn tangent(&self, s: f64) -> BeamlineResult<Vec2> {
        Self::check_arc_param(s)?;
        let local = match &self.geometry {
            Geometry::Point(_) => {
                return Err(BeamlineError::geometry("tangent is undefined for a point"))
            }
            Geometry::Polyline(poly) => poly.tangent(s)?,
            Geometry::Ellipse(ell) => ell.tangent(s)?,
        };
        let world = self.transforms.apply_direction(local);
        let len = world.hypot();
        if len == 0.0 {
            return Err(BeamlineError::geometry(
                "tangent collapsed under the transform stack",
            ));
        }
        Ok(world / len)
    }

    /// Unit normal of the transformed (undisplaced) path at `s`, the
    /// tangent rotated a quarter turn counterclockwise.
    pub fn normal(&self, s: f64, _time: f64) -> BeamlineResult<Vec2> {
        let t = self.tangent(s)?;
        Ok(Vec2::new(-t.y, t.x))
    }

    // --- transforms ------------------------------------------------------

    /// Append an arbitrary homogeneous matrix.
    pub fn transform(mut self, matrix: Matrix3<f64>) -> Self {
        self.transforms.push(matrix);
        self
    }

    /// Translate by `v`.
    pub fn translate(self, v: Vec2) -> Self {
        self.transform(stack::translation(v))
    }

    /// Rotate about the origin.
    pub fn rotate(self, angle: f64) -> Self {
        self.rotate_about(angle, Point::ORIGIN)
    }

    /// Rotate about `center`.
    pub fn rotate_about(self, angle: f64, center: Point) -> Self {
        self.transform(stack::rotation(angle, center))
    }

    /// Scale about the origin.
    pub fn scale(self, factors: Vec2) -> Self {
        self.scale_about(factors, Point::ORIGIN)
    }

    /// Scale about `center`.
    pub fn scale_about(self, factors: Vec2, center: Point) -> Self {
        self.transform(stack::scaling(factors, center))
    }

    /// Shear with off-diagonal factors `v`.
    pub fn shear(self, v: Vec2) -> Self {
        self.transform(stack::shearing(v))
    }

    /// Skew by angles `v`.
    pub fn skew(self, v: Vec2) -> Self {
        self.transform(stack::skewing(v))
    }

    /// Reflect about the axis direction `axis`.
    pub fn reflect(self, axis: Vec2) -> Self {
        self.transform(stack::reflection(axis))
    }

    /// Project onto the direction at `angle`.
    pub fn project(self, angle: f64) -> Self {
        self.transform(stack::projection(angle))
    }

    /// Push an explicit identity (a no-op placeholder on the stack).
    pub fn identity(self) -> Self {
        self.transform(stack::identity())
    }

    /// Append a displacement to the chain.
    pub fn displace(mut self, displacement: Displacement) -> Self {
        self.displacements.push(displacement);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/shape.rs"]
mod tests;
