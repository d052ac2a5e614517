use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;

use crate::eval::frame::Frame;
use crate::foundation::error::{BeamlineError, BeamlineResult};
use crate::render::{build_render_lines, ExclusionZone, FlipAxes, RenderLine};

/// Maximum length of the frame-name label carried in the output header.
pub const MAX_NAME_LENGTH: usize = 8;

/// Population callback filling one empty frame with shapes.
pub type PopulateFn = Arc<dyn Fn(&mut Frame) -> BeamlineResult<()> + Send + Sync>;

/// A named, timed run of frames sharing one population function.
#[derive(Clone)]
pub struct Animation {
    name: String,
    start_t: f64,
    duration: f64,
    populate: PopulateFn,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("name", &self.name)
            .field("start_t", &self.start_t)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl Animation {
    /// Build an animation. The name lands in an 8-byte header field and
    /// must fit; the duration must be positive.
    pub fn new(
        name: impl Into<String>,
        start_t: f64,
        duration: f64,
        populate: impl Fn(&mut Frame) -> BeamlineResult<()> + Send + Sync + 'static,
    ) -> BeamlineResult<Self> {
        let name = name.into();
        if name.len() > MAX_NAME_LENGTH {
            return Err(BeamlineError::validation(format!(
                "animation name {name:?} exceeds {MAX_NAME_LENGTH} bytes"
            )));
        }
        if !name.is_ascii() {
            return Err(BeamlineError::validation(format!(
                "animation name {name:?} is not ascii"
            )));
        }
        if duration <= 0.0 {
            return Err(BeamlineError::validation(format!(
                "animation duration must be positive, got {duration}"
            )));
        }
        Ok(Self {
            name,
            start_t,
            duration,
            populate: Arc::new(populate),
        })
    }

    /// The animation's header label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute start time in seconds.
    pub fn start_t(&self) -> f64 {
        self.start_t
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of frames at `fps`.
    pub fn frame_count(&self, fps: f64) -> usize {
        (fps * self.duration).ceil() as usize
    }
}

/// One animation's render lines, reassembled in frame-index order.
#[derive(Clone, Debug)]
pub struct EvaluatedAnimation {
    /// Header label.
    pub name: String,
    /// Absolute start time in seconds.
    pub start_t: f64,
    /// Per-frame render lines, index order.
    pub frames: Vec<Vec<RenderLine>>,
}

/// Evaluate every frame of `animation` in parallel.
///
/// Each frame task owns an empty frame descriptor and runs the population
/// closure, appends exclusion shapes when visualization is on, and builds
/// the frame's render lines. Results are collected back in index order; a
/// failing population aborts the whole animation.
#[tracing::instrument(skip_all, fields(animation = animation.name(), fps))]
pub(crate) fn evaluate_animation(
    animation: &Animation,
    fps: f64,
    point_density: f64,
    zones: &[ExclusionZone],
    show_zones: bool,
    flip: FlipAxes,
) -> BeamlineResult<EvaluatedAnimation> {
    let total_frames = animation.frame_count(fps);
    let frames: Vec<Vec<RenderLine>> = (0..total_frames)
        .into_par_iter()
        .map(|index| {
            let mut frame = Frame::empty(
                animation.start_t,
                index,
                fps,
                animation.duration,
                total_frames,
                point_density,
            );
            (animation.populate)(&mut frame).map_err(|err| {
                BeamlineError::evaluation(format!(
                    "population of frame {index} of {:?} failed: {err}",
                    animation.name
                ))
            })?;
            if show_zones {
                for zone in zones {
                    frame.add_exclusion_shape(zone.shape().clone());
                }
            }
            Ok(build_render_lines(
                frame.shapes(),
                frame.t(),
                frame.point_density(),
                zones,
                flip,
            ))
        })
        .collect::<BeamlineResult<_>>()?;
    tracing::debug!(frames = frames.len(), "animation evaluated");
    Ok(EvaluatedAnimation {
        name: animation.name.clone(),
        start_t: animation.start_t,
        frames,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/animation.rs"]
mod tests;
