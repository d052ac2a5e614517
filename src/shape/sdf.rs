//! Boolean combination of shapes through their signed distance fields.
//!
//! The combined field is sampled on a fixed grid over the normalized
//! drawing area, its zero level set is extracted with marching squares,
//! and the chained contours are resampled into fresh polyline shapes.

use std::collections::HashMap;

use kurbo::Point;

use crate::color::gradient::{ColorGradient, InterpMode};
use crate::foundation::core::{sample_spacing, DRAW_BOUND};
use crate::foundation::error::BeamlineResult;
use crate::foundation::math::{mix, Fnv1a64};
use crate::shape::{Geometry, Shape};

/// Grid cells per axis used for field sampling.
pub const SDF_GRID_RESOLUTION: usize = 128;

/// Binary signed-distance operators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CombineOp {
    /// Minimum of both fields.
    Union,
    /// Maximum of both fields.
    Intersection,
    /// First field minus the second (`max(d1, -d2)`).
    Difference,
    /// Exponential smooth minimum `-ln(exp(-k*d1) + exp(-k*d2)) / k`.
    SmoothUnion {
        /// Sharpness; larger values approach the plain minimum.
        k: f64,
    },
    /// Linear interpolation between the fields at ratio `r`.
    Blend {
        /// Interpolation ratio in `[0, 1]`.
        r: f64,
    },
}

impl CombineOp {
    fn apply(self, d1: f64, d2: f64) -> f64 {
        match self {
            CombineOp::Union => d1.min(d2),
            CombineOp::Intersection => d1.max(d2),
            CombineOp::Difference => d1.max(-d2),
            CombineOp::SmoothUnion { k } => {
                -((-k * d1).exp() + (-k * d2).exp()).ln() / k
            }
            CombineOp::Blend { r } => mix(d1, d2, r),
        }
    }

    fn write_key(self, h: &mut Fnv1a64) {
        match self {
            CombineOp::Union => h.write_u8(0),
            CombineOp::Intersection => h.write_u8(1),
            CombineOp::Difference => h.write_u8(2),
            CombineOp::SmoothUnion { k } => {
                h.write_u8(3);
                h.write_f64(k);
            }
            CombineOp::Blend { r } => {
                h.write_u8(4);
                h.write_f64(r);
            }
        }
    }
}

/// Combines shapes through their signed distance fields, memoizing the
/// extracted contours per operand/operator state.
///
/// The cache key covers everything the result depends on: both operands'
/// geometry, transforms, gradients and density, the operator, the output
/// gradient and the grid resolution. Custom field closures bypass the
/// cache since closures have no stable identity.
#[derive(Debug)]
pub struct SdfCombiner {
    resolution: usize,
    default_density: f64,
    cache: HashMap<u64, Vec<Shape>>,
}

impl SdfCombiner {
    /// A combiner at the standard grid resolution.
    pub fn new(default_density: f64) -> Self {
        Self::with_resolution(default_density, SDF_GRID_RESOLUTION)
    }

    /// A combiner with an explicit grid resolution.
    pub fn with_resolution(default_density: f64, resolution: usize) -> Self {
        Self {
            resolution,
            default_density,
            cache: HashMap::new(),
        }
    }

    /// Drop all memoized results.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of memoized results.
    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }

    fn density_for(&self, a: &Shape, b: &Shape) -> f64 {
        let da = a.point_density().unwrap_or(self.default_density);
        let db = b.point_density().unwrap_or(self.default_density);
        da.max(db)
    }

    /// Combine two shapes with `op`, painting the result with `gradient`.
    ///
    /// Returns the extracted contour shapes sorted by path length,
    /// longest first.
    #[tracing::instrument(skip_all, fields(op = ?op))]
    pub fn combine(
        &mut self,
        a: &Shape,
        b: &Shape,
        op: CombineOp,
        gradient: &ColorGradient,
    ) -> BeamlineResult<Vec<Shape>> {
        let mut hasher = Fnv1a64::new_default();
        shape_state_key(&mut hasher, a);
        shape_state_key(&mut hasher, b);
        op.write_key(&mut hasher);
        gradient_key(&mut hasher, gradient);
        hasher.write_u64(self.resolution as u64);
        let density = self.density_for(a, b);
        hasher.write_f64(density);
        let key = hasher.finish();

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(key, "sdf cache hit");
            return Ok(cached.clone());
        }

        let field = |p: Point| op.apply(a.signed_distance(p), b.signed_distance(p));
        let shapes = self.extract(&field, gradient, density)?;
        self.cache.insert(key, shapes.clone());
        Ok(shapes)
    }

    /// Combine two shapes with a custom distance operator. Not memoized.
    pub fn combine_with(
        &self,
        a: &Shape,
        b: &Shape,
        op: impl Fn(f64, f64) -> f64,
        gradient: &ColorGradient,
    ) -> BeamlineResult<Vec<Shape>> {
        let density = self.density_for(a, b);
        let field = |p: Point| op(a.signed_distance(p), b.signed_distance(p));
        self.extract(&field, gradient, density)
    }

    /// Extract contours from an arbitrary signed distance field. Not
    /// memoized.
    pub fn from_field(
        &self,
        field: impl Fn(Point) -> f64,
        gradient: &ColorGradient,
        density: Option<f64>,
    ) -> BeamlineResult<Vec<Shape>> {
        self.extract(&field, gradient, density.unwrap_or(self.default_density))
    }

    fn extract(
        &self,
        field: &dyn Fn(Point) -> f64,
        gradient: &ColorGradient,
        density: f64,
    ) -> BeamlineResult<Vec<Shape>> {
        let spacing = sample_spacing(density);
        let contours = extract_contours(self.resolution, field);

        let mut shapes = Vec::new();
        for (points, closed) in contours {
            let resampled = resample_contour(&points, closed, spacing);
            let shape = if closed && resampled.len() >= 3 {
                Shape::polygon(resampled, gradient.clone())?
            } else if resampled.len() >= 2 {
                Shape::polyline(resampled, false, gradient.clone())?
            } else if let Some(&p) = resampled.first() {
                Shape::point(p, gradient.clone())
            } else {
                continue;
            };
            shapes.push(shape.with_point_density(density));
        }

        shapes.sort_by(|a, b| {
            b.path_length()
                .partial_cmp(&a.path_length())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        tracing::debug!(contours = shapes.len(), "sdf contours extracted");
        Ok(shapes)
    }
}

fn shape_state_key(h: &mut Fnv1a64, shape: &Shape) {
    match shape.geometry() {
        Geometry::Point(p) => {
            h.write_u8(0);
            h.write_f64(p.x);
            h.write_f64(p.y);
        }
        Geometry::Polyline(poly) => {
            h.write_u8(1);
            h.write_u8(poly.closed() as u8);
            h.write_u64(poly.points().len() as u64);
            for p in poly.points() {
                h.write_f64(p.x);
                h.write_f64(p.y);
            }
        }
        Geometry::Ellipse(ell) => {
            h.write_u8(2);
            h.write_f64(ell.center().x);
            h.write_f64(ell.center().y);
            h.write_f64(ell.radii().x);
            h.write_f64(ell.radii().y);
        }
    }
    for m in shape.transforms().matrices() {
        for v in m.iter() {
            h.write_f64(*v);
        }
    }
    gradient_key(h, shape.gradient());
    match shape.point_density() {
        Some(d) => {
            h.write_u8(1);
            h.write_f64(d);
        }
        None => h.write_u8(0),
    }
}

fn gradient_key(h: &mut Fnv1a64, gradient: &ColorGradient) {
    h.write_u8(match gradient.mode() {
        InterpMode::Rgb => 0,
        InterpMode::Hsv => 1,
    });
    h.write_u64(gradient.waypoints().len() as u64);
    for (pos, color) in gradient.waypoints() {
        h.write_f64(*pos);
        h.write_f64(color.r);
        h.write_f64(color.g);
        h.write_f64(color.b);
    }
}

// --- marching squares ----------------------------------------------------

/// Edge of a grid cell, identified by its lower-index node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Edge {
    /// Between node `(i, j)` and `(i + 1, j)`.
    Horizontal(usize, usize),
    /// Between node `(i, j)` and `(i, j + 1)`.
    Vertical(usize, usize),
}

fn node_coord(resolution: usize, i: usize) -> f64 {
    -DRAW_BOUND + 2.0 * DRAW_BOUND * i as f64 / resolution as f64
}

/// Extract the zero level set as chained contours with a closed flag.
fn extract_contours(
    resolution: usize,
    field: &dyn Fn(Point) -> f64,
) -> Vec<(Vec<Point>, bool)> {
    let nodes = resolution + 1;
    let mut values = vec![0.0; nodes * nodes];
    for j in 0..nodes {
        for i in 0..nodes {
            values[j * nodes + i] =
                field(Point::new(node_coord(resolution, i), node_coord(resolution, j)));
        }
    }
    let value = |i: usize, j: usize| values[j * nodes + i];
    let inside = |i: usize, j: usize| value(i, j) < 0.0;

    // Crossing points are computed once per edge so adjacent cells share
    // vertices exactly and chains connect without tolerance matching.
    let mut vertices: Vec<Point> = Vec::new();
    let mut edge_vertex: HashMap<Edge, usize> = HashMap::new();
    let mut vertex_on = |edge: Edge, vertices: &mut Vec<Point>| -> usize {
        *edge_vertex.entry(edge).or_insert_with(|| {
            let (p0, v0, p1, v1) = match edge {
                Edge::Horizontal(i, j) => (
                    Point::new(node_coord(resolution, i), node_coord(resolution, j)),
                    value(i, j),
                    Point::new(node_coord(resolution, i + 1), node_coord(resolution, j)),
                    value(i + 1, j),
                ),
                Edge::Vertical(i, j) => (
                    Point::new(node_coord(resolution, i), node_coord(resolution, j)),
                    value(i, j),
                    Point::new(node_coord(resolution, i), node_coord(resolution, j + 1)),
                    value(i, j + 1),
                ),
            };
            let t = v0 / (v0 - v1);
            vertices.push(p0 + (p1 - p0) * t);
            vertices.len() - 1
        })
    };

    let mut segments: Vec<(usize, usize)> = Vec::new();
    for j in 0..resolution {
        for i in 0..resolution {
            // Corner bits: 0 bottom-left, 1 bottom-right, 2 top-right,
            // 3 top-left ("bottom" is the lower j row).
            let case = inside(i, j) as u8
                | (inside(i + 1, j) as u8) << 1
                | (inside(i + 1, j + 1) as u8) << 2
                | (inside(i, j + 1) as u8) << 3;
            if case == 0 || case == 15 {
                continue;
            }

            let bottom = Edge::Horizontal(i, j);
            let top = Edge::Horizontal(i, j + 1);
            let left = Edge::Vertical(i, j);
            let right = Edge::Vertical(i + 1, j);

            let pairs: Vec<(Edge, Edge)> = match case {
                1 | 14 => vec![(left, bottom)],
                2 | 13 => vec![(bottom, right)],
                3 | 12 => vec![(left, right)],
                4 | 11 => vec![(right, top)],
                6 | 9 => vec![(bottom, top)],
                7 | 8 => vec![(left, top)],
                5 | 10 => {
                    // Ambiguous saddle: resolve with the field at the
                    // cell center.
                    let cx = (node_coord(resolution, i) + node_coord(resolution, i + 1)) / 2.0;
                    let cy = (node_coord(resolution, j) + node_coord(resolution, j + 1)) / 2.0;
                    let center_inside = field(Point::new(cx, cy)) < 0.0;
                    let diagonal = case == 5;
                    if diagonal == center_inside {
                        vec![(bottom, right), (left, top)]
                    } else {
                        vec![(left, bottom), (right, top)]
                    }
                }
                _ => unreachable!(),
            };
            for (e0, e1) in pairs {
                let v0 = vertex_on(e0, &mut vertices);
                let v1 = vertex_on(e1, &mut vertices);
                segments.push((v0, v1));
            }
        }
    }

    chain_segments(&vertices, &segments)
}

/// Chain unordered segments into polylines. Vertices with a single
/// incident segment start open contours; everything left over forms
/// closed loops.
fn chain_segments(
    vertices: &[Point],
    segments: &[(usize, usize)],
) -> Vec<(Vec<Point>, bool)> {
    let mut incident: HashMap<usize, Vec<usize>> = HashMap::new();
    for (idx, &(a, b)) in segments.iter().enumerate() {
        incident.entry(a).or_default().push(idx);
        incident.entry(b).or_default().push(idx);
    }

    let mut used = vec![false; segments.len()];
    let mut contours = Vec::new();

    let mut walk = |start: usize, used: &mut Vec<bool>| -> Vec<usize> {
        let mut path = vec![start];
        let mut current = start;
        loop {
            let Some(next_seg) = incident
                .get(&current)
                .and_then(|segs| segs.iter().copied().find(|&s| !used[s]))
            else {
                break;
            };
            used[next_seg] = true;
            let (a, b) = segments[next_seg];
            current = if a == current { b } else { a };
            path.push(current);
        }
        path
    };

    // Open contours first so loops never start mid-chain.
    let mut endpoints: Vec<usize> = incident
        .iter()
        .filter(|(_, segs)| segs.len() == 1)
        .map(|(&v, _)| v)
        .collect();
    endpoints.sort_unstable();
    for v in endpoints {
        if incident[&v].iter().all(|&s| used[s]) {
            continue;
        }
        let path = walk(v, &mut used);
        if path.len() >= 2 {
            contours.push((path.iter().map(|&i| vertices[i]).collect(), false));
        }
    }

    for start_seg in 0..segments.len() {
        if used[start_seg] {
            continue;
        }
        let start = segments[start_seg].0;
        let path = walk(start, &mut used);
        if path.len() >= 3 && path.first() == path.last() {
            // Drop the duplicated closing vertex; the polygon closes itself.
            let points = path[..path.len() - 1].iter().map(|&i| vertices[i]).collect();
            contours.push((points, true));
        } else if path.len() >= 2 {
            contours.push((path.iter().map(|&i| vertices[i]).collect(), false));
        }
    }

    contours
}

/// Resample a contour at uniform arc-length spacing.
fn resample_contour(points: &[Point], closed: bool, spacing: f64) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for w in points.windows(2) {
        let len = w[0].distance(w[1]);
        lengths.push(len);
        total += len;
    }
    if closed {
        let len = points[points.len() - 1].distance(points[0]);
        lengths.push(len);
        total += len;
    }
    if total == 0.0 {
        return vec![points[0]];
    }

    let point_along = |target: f64| -> Point {
        let mut accumulated = 0.0;
        for (i, &len) in lengths.iter().enumerate() {
            if accumulated + len >= target && len > 0.0 {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                return a + (b - a) * ((target - accumulated) / len);
            }
            accumulated += len;
        }
        if closed {
            points[0]
        } else {
            points[points.len() - 1]
        }
    };

    // Ceiling keeps every chord at or below the spacing, so sampling the
    // resulting polyline does not subdivide further.
    if closed {
        let n = ((total / spacing).ceil() as usize).max(3);
        (0..n).map(|k| point_along(total * k as f64 / n as f64)).collect()
    } else {
        let n = ((total / spacing).ceil() as usize + 1).max(2);
        (0..n)
            .map(|k| point_along(total * k as f64 / (n - 1) as f64))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/sdf.rs"]
mod tests;
