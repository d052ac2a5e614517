use kurbo::{Point, Vec2};

use crate::color::gradient::{Color, ColorGradient};
use crate::foundation::error::{BeamlineError, BeamlineResult};
use crate::foundation::math::{orientation, project_on_segment, segments_intersect};

/// Vertex-list geometry shared by polylines, polygons and every derived
/// shape (rectangles, stars, n-gons, parametric curves).
#[derive(Clone, Debug)]
pub(crate) struct PolylineGeom {
    points: Vec<Point>,
    closed: bool,
    total_length: f64,
}

impl PolylineGeom {
    pub(crate) fn new(points: Vec<Point>, closed: bool) -> Self {
        let mut geom = Self {
            points,
            closed,
            total_length: 0.0,
        };
        geom.total_length = geom.segments().map(|(a, b)| a.distance(b)).sum();
        geom
    }

    pub(crate) fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn total_length(&self) -> f64 {
        self.total_length
    }

    pub(crate) fn centroid(&self) -> Point {
        let n = self.points.len() as f64;
        let sum = self
            .points
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        (sum / n).to_point()
    }

    /// Consecutive vertex pairs, including the closing segment when closed.
    fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let wrap = if self.closed && self.points.len() > 1 {
            Some((self.points[self.points.len() - 1], self.points[0]))
        } else {
            None
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(wrap)
    }

    /// Density-controlled sampling: every vertex is emitted, and segments
    /// longer than `spacing` are subdivided. Arc parameters grow with
    /// cumulative length; the final sample of a non-degenerate path is
    /// pinned to 1.
    pub(crate) fn sample(
        &self,
        spacing: f64,
        gradient: &ColorGradient,
    ) -> (Vec<Point>, Vec<Color>, Vec<f64>) {
        let total = self.total_length;
        let mut points = vec![self.points[0]];
        let mut colors = vec![gradient.get_color(0.0)];
        let mut arc_params = vec![0.0];

        let mut accumulated = 0.0;
        for (a, b) in self.segments() {
            let seg_len = a.distance(b);
            if seg_len > spacing {
                let n = (seg_len / spacing).round() as usize;
                let step = (b - a) / (n as f64 + 1.0);
                for j in 1..=n {
                    let local = seg_len * j as f64 / (n as f64 + 1.0);
                    let t = if total > 0.0 {
                        ((accumulated + local) / total).min(1.0)
                    } else {
                        0.0
                    };
                    points.push(a + step * j as f64);
                    colors.push(gradient.get_color(t));
                    arc_params.push(t);
                }
            }
            accumulated += seg_len;
            let t = if total > 0.0 {
                (accumulated / total).min(1.0)
            } else {
                0.0
            };
            points.push(b);
            colors.push(gradient.get_color(t));
            arc_params.push(t);
        }

        if total > 0.0 {
            if let Some(last) = arc_params.last_mut() {
                *last = 1.0;
            }
        }

        (points, colors, arc_params)
    }

    /// Winding-number containment. Open polylines contain nothing.
    pub(crate) fn is_point_inside(&self, p: Point) -> bool {
        if !self.closed {
            return false;
        }
        let mut winding = 0i32;
        let n = self.points.len();
        for i in 0..n {
            let p0 = self.points[i];
            let p1 = self.points[(i + 1) % n];
            if p0.y <= p.y {
                if p1.y > p.y && orientation(p0, p1, p) == 1 {
                    winding += 1;
                }
            } else if p1.y <= p.y && orientation(p0, p1, p) == -1 {
                winding -= 1;
            }
        }
        winding != 0
    }

    pub(crate) fn is_line_inside(&self, p0: Point, p1: Point) -> bool {
        if self.closed && (self.is_point_inside(p0) || self.is_point_inside(p1)) {
            return true;
        }
        self.segments()
            .any(|(q0, q1)| segments_intersect(p0, p1, q0, q1))
    }

    pub(crate) fn nearest_point(&self, p: Point) -> Point {
        let mut best = self.points[0];
        let mut best_dist = f64::INFINITY;
        for (a, b) in self.segments() {
            let q = project_on_segment(p, a, b);
            let dist = p.distance(q);
            if dist < best_dist {
                best_dist = dist;
                best = q;
            }
        }
        best
    }

    pub(crate) fn signed_distance(&self, p: Point) -> f64 {
        let dist = p.distance(self.nearest_point(p));
        if self.closed && self.is_point_inside(p) {
            -dist
        } else {
            dist
        }
    }

    /// Point at arc parameter `s` (proportional to cumulative length).
    pub(crate) fn point_at(&self, s: f64) -> Point {
        if self.total_length == 0.0 {
            return self.points[0];
        }
        let target = s * self.total_length;
        let mut accumulated = 0.0;
        let mut last = self.points[0];
        for (a, b) in self.segments() {
            let seg_len = a.distance(b);
            if accumulated + seg_len >= target && seg_len > 0.0 {
                let local = (target - accumulated) / seg_len;
                return a + (b - a) * local;
            }
            accumulated += seg_len;
            last = b;
        }
        last
    }

    /// Index of the segment containing arc parameter `s`.
    fn segment_index(&self, s: f64) -> usize {
        let target = s * self.total_length;
        let mut accumulated = 0.0;
        let mut count = 0;
        for (i, (a, b)) in self.segments().enumerate() {
            accumulated += a.distance(b);
            if target <= accumulated {
                return i;
            }
            count = i;
        }
        count
    }

    fn two_point_tangent(p0: Point, p1: Point) -> Vec2 {
        p1 - p0
    }

    /// Chordal tangent at the middle point of a vertex triplet.
    fn three_point_tangent(p0: Point, p1: Point, p2: Point) -> Vec2 {
        let v01 = p1 - p0;
        let v12 = p2 - p1;
        let w01 = v01.hypot();
        let w12 = v12.hypot();
        if w01 + w12 == 0.0 {
            return Vec2::ZERO;
        }
        (v01 * w01 + v12 * w12) / (w01 + w12)
    }

    /// Untransformed tangent direction at arc parameter `s`.
    pub(crate) fn tangent(&self, s: f64) -> BeamlineResult<Vec2> {
        let pts = &self.points;
        let n = pts.len();
        if n < 2 || (n == 2 && pts[0] == pts[1]) {
            return Err(BeamlineError::geometry(
                "tangent is undefined for degenerate geometry",
            ));
        }

        let v = if s == 0.0 {
            if self.closed {
                Self::three_point_tangent(pts[n - 1], pts[0], pts[1])
            } else {
                Self::two_point_tangent(pts[0], pts[1])
            }
        } else if s == 1.0 {
            if self.closed {
                Self::three_point_tangent(pts[n - 1], pts[0], pts[1])
            } else {
                Self::two_point_tangent(pts[n - 2], pts[n - 1])
            }
        } else {
            let i = self.segment_index(s);
            if self.closed {
                Self::three_point_tangent(
                    pts[(i + n - 1) % n],
                    pts[i % n],
                    pts[(i + 1) % n],
                )
            } else if i == 0 {
                Self::two_point_tangent(pts[0], pts[1])
            } else if i >= n - 2 {
                Self::two_point_tangent(pts[n - 2], pts[n - 1])
            } else {
                Self::three_point_tangent(pts[i - 1], pts[i], pts[i + 1])
            }
        };

        if v.hypot() == 0.0 {
            return Err(BeamlineError::geometry(
                "tangent is undefined for coincident vertices",
            ));
        }
        Ok(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/polyline.rs"]
mod tests;
