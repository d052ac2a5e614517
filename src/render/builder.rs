use kurbo::Point;

use crate::color::gradient::Color;
use crate::foundation::core::DRAW_BOUND;
use crate::render::line::RenderLine;
use crate::shape::Shape;

/// A registered clipping region.
///
/// With `inside = true` the zone blanks geometry found inside it; with
/// `inside = false` it blanks geometry found outside it (constraining
/// output to a legal region).
#[derive(Clone, Debug)]
pub struct ExclusionZone {
    pub(crate) shape: Shape,
    pub(crate) inside: bool,
}

impl ExclusionZone {
    /// Register `shape` as a zone; see the type docs for `inside`.
    pub fn new(shape: Shape, inside: bool) -> Self {
        Self { shape, inside }
    }

    /// The zone's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Mirror flags matching the projector's mounting orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlipAxes {
    /// Negate every x coordinate.
    pub x: bool,
    /// Negate every y coordinate.
    pub y: bool,
}

/// Build one frame's render lines from its shape list.
///
/// Shapes are sampled at `time`, hard-clipped against the drawing area,
/// connected into segments colored by their trailing endpoint, clipped
/// against the zones (exclusion shapes themselves are exempt), joined by
/// blanked transits, primed with a duplicate of the first line and
/// optionally mirrored.
#[tracing::instrument(skip_all, fields(shapes = shapes.len(), time))]
pub(crate) fn build_render_lines(
    shapes: &[(Shape, bool)],
    time: f64,
    density_fallback: f64,
    zones: &[ExclusionZone],
    flip: FlipAxes,
) -> Vec<RenderLine> {
    let mut lines: Vec<RenderLine> = Vec::new();

    for (shape, is_exclusion) in shapes {
        let (points, colors, _) = shape.compute_sample_points(time, density_fallback);
        let survivors: Vec<(Point, Color)> = points
            .into_iter()
            .zip(colors)
            .filter(|(p, _)| p.x.abs() < DRAW_BOUND && p.y.abs() < DRAW_BOUND)
            .collect();

        let mut shape_lines: Vec<RenderLine> = survivors
            .windows(2)
            .map(|w| RenderLine::new(w[0].0, w[1].0, w[1].1))
            .collect();

        if !*is_exclusion {
            for line in &mut shape_lines {
                let excluded = zones.iter().any(|zone| {
                    if zone.inside {
                        zone.shape.is_line_inside(line.p0, line.p1)
                    } else {
                        zone.shape.is_line_outside(line.p0, line.p1)
                    }
                });
                if excluded {
                    line.blank();
                }
            }
        }

        if shape_lines.is_empty() {
            continue;
        }
        if let Some(prev) = lines.last() {
            lines.push(RenderLine::transit(prev.p1, shape_lines[0].p0));
        }
        lines.append(&mut shape_lines);
    }

    // The wire format is point-based: duplicate the first line so the
    // scanner is in position before the first lit record.
    if let Some(first) = lines.first().copied() {
        lines.insert(0, first);
    }

    if flip.x {
        for line in &mut lines {
            line.flip_x();
        }
    }
    if flip.y {
        for line in &mut lines {
            line.flip_y();
        }
    }

    lines
}

#[cfg(test)]
#[path = "../../tests/unit/render/builder.rs"]
mod tests;
