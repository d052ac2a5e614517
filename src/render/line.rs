use kurbo::Point;

use crate::color::gradient::Color;

/// A directed segment of laser output.
///
/// A blanked line is a travel move: the scanner traverses it with the
/// beam off. The wire format is point-based, so only `p1` is serialized
/// per record; `p0` exists for clipping and transit construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderLine {
    /// Segment start.
    pub p0: Point,
    /// Segment end (the point the encoder emits).
    pub p1: Point,
    /// Color of the segment, taken from its trailing endpoint.
    pub color: Color,
    /// Whether the beam is off while traversing this segment.
    pub blanked: bool,
}

impl RenderLine {
    /// A lit segment.
    pub fn new(p0: Point, p1: Point, color: Color) -> Self {
        Self {
            p0,
            p1,
            color,
            blanked: false,
        }
    }

    /// A blanked black travel move.
    pub fn transit(p0: Point, p1: Point) -> Self {
        Self {
            p0,
            p1,
            color: Color::BLACK,
            blanked: true,
        }
    }

    /// Turn the beam off for this segment.
    pub fn blank(&mut self) {
        self.blanked = true;
    }

    pub(crate) fn flip_x(&mut self) {
        self.p0.x = -self.p0.x;
        self.p1.x = -self.p1.x;
    }

    pub(crate) fn flip_y(&mut self) {
        self.p0.y = -self.p0.y;
        self.p1.y = -self.p1.y;
    }
}
