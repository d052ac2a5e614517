use crate::shape::sdf::SdfCombiner;
use crate::shape::Shape;

/// One time step of an animation, populated by the caller's closure.
///
/// A frame owns its shape list and an [`SdfCombiner`] whose memo cache
/// lives exactly as long as the frame's evaluation. Timing accessors give
/// population code everything it needs to animate: absolute time,
/// animation-relative time and normalized progress.
#[derive(Debug)]
pub struct Frame {
    shapes: Vec<(Shape, bool)>,
    start_t: f64,
    t: f64,
    fps: f64,
    duration: f64,
    index: usize,
    total_frames: usize,
    point_density: f64,
    sdf: SdfCombiner,
}

impl Frame {
    pub(crate) fn empty(
        start_t: f64,
        index: usize,
        fps: f64,
        duration: f64,
        total_frames: usize,
        point_density: f64,
    ) -> Self {
        Self {
            shapes: Vec::new(),
            start_t,
            t: start_t + index as f64 / fps,
            fps,
            duration,
            index,
            total_frames,
            point_density,
            sdf: SdfCombiner::new(point_density),
        }
    }

    /// Absolute time of this frame in seconds.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Start time of the owning animation.
    pub fn start_t(&self) -> f64 {
        self.start_t
    }

    /// Time elapsed since the animation started.
    pub fn rel_t(&self) -> f64 {
        self.t - self.start_t
    }

    /// Normalized progress through the animation in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        self.rel_t() / self.duration
    }

    /// Frame index within the animation.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of frames in the animation.
    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// Output frame rate.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Animation duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Density fallback for shapes without their own override.
    pub fn point_density(&self) -> f64 {
        self.point_density
    }

    /// Add a shape to be rendered this frame.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push((shape, false));
    }

    pub(crate) fn add_exclusion_shape(&mut self, shape: Shape) {
        self.shapes.push((shape, true));
    }

    /// The frame's SDF combiner (memoized for this frame only).
    pub fn sdf(&mut self) -> &mut SdfCombiner {
        &mut self.sdf
    }

    pub(crate) fn shapes(&self) -> &[(Shape, bool)] {
        &self.shapes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/frame.rs"]
mod tests;
