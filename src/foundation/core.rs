pub use kurbo::{Point, Vec2};

/// Angular resolution of the projector coordinate grid. Sampling spacing and
/// the wire-format coordinate scale are both expressed in terms of it.
pub const ILDX_RESOLUTION: f64 = 65536.0;

/// Point density applied to shapes that neither set their own density nor
/// inherit one from a frame.
pub const DEFAULT_POINT_DENSITY: f64 = 5.0e-4;

/// Half-extent of the legal drawing area `[-1, 1]^2` in normalized
/// projector coordinates. Points at or beyond it are dropped before
/// render lines are built.
pub const DRAW_BOUND: f64 = 1.0;

/// Sampling spacing (in normalized coordinates) implied by a point density.
pub(crate) fn sample_spacing(point_density: f64) -> f64 {
    1.0 / (point_density * ILDX_RESOLUTION)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
