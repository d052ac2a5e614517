use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;

use crate::dmx::fixture::ChannelValue;
use crate::foundation::error::{BeamlineError, BeamlineResult};

/// One lighting time step, accumulating channel writes.
///
/// Writes are kept in call order; when a frame is resolved into a channel
/// map, later writes to the same channel win.
#[derive(Debug)]
pub struct DmxFrame {
    start_t: f64,
    t: f64,
    fps: f64,
    duration: f64,
    index: usize,
    total_frames: usize,
    values: Vec<ChannelValue>,
}

impl DmxFrame {
    pub(crate) fn empty(
        start_t: f64,
        index: usize,
        fps: f64,
        duration: f64,
        total_frames: usize,
    ) -> Self {
        Self {
            start_t,
            t: start_t + index as f64 / fps,
            fps,
            duration,
            index,
            total_frames,
            values: Vec::new(),
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

    /// Record a channel write (typically the return value of a
    /// subchannel's `set`/`pulse`/`lerp`/`smooth`).
    pub fn set(&mut self, value: ChannelValue) {
        self.values.push(value);
    }

    /// Record several channel writes.
    pub fn set_all(&mut self, values: impl IntoIterator<Item = ChannelValue>) {
        self.values.extend(values);
    }

    /// Collapse the write list into a channel map, later writes winning.
    pub(crate) fn resolve(&self) -> BTreeMap<u16, u8> {
        self.values.iter().copied().collect()
    }
}

/// Population callback filling one lighting frame.
pub type DmxPopulateFn = Arc<dyn Fn(&mut DmxFrame) -> BeamlineResult<()> + Send + Sync>;

/// A timed run of lighting frames sharing one population function.
#[derive(Clone)]
pub struct DmxAnimation {
    start_t: f64,
    duration: f64,
    populate: DmxPopulateFn,
}

impl fmt::Debug for DmxAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DmxAnimation")
            .field("start_t", &self.start_t)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl DmxAnimation {
    /// Build a lighting animation; the duration must be positive.
    pub fn new(
        start_t: f64,
        duration: f64,
        populate: impl Fn(&mut DmxFrame) -> BeamlineResult<()> + Send + Sync + 'static,
    ) -> BeamlineResult<Self> {
        if duration <= 0.0 {
            return Err(BeamlineError::validation(format!(
                "animation duration must be positive, got {duration}"
            )));
        }
        Ok(Self {
            start_t,
            duration,
            populate: Arc::new(populate),
        })
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

/// A resolved lighting frame: timestamp plus final channel map.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ResolvedDmxFrame {
    pub(crate) t: f64,
    pub(crate) channels: BTreeMap<u16, u8>,
}

/// Evaluate every frame of `animation` in parallel, resolved in index
/// order. A failing population aborts the whole animation.
#[tracing::instrument(skip_all, fields(fps))]
pub(crate) fn evaluate_dmx_animation(
    animation: &DmxAnimation,
    fps: f64,
) -> BeamlineResult<Vec<ResolvedDmxFrame>> {
    let total_frames = animation.frame_count(fps);
    (0..total_frames)
        .into_par_iter()
        .map(|index| {
            let mut frame = DmxFrame::empty(
                animation.start_t,
                index,
                fps,
                animation.duration,
                total_frames,
            );
            (animation.populate)(&mut frame).map_err(|err| {
                BeamlineError::evaluation(format!(
                    "population of lighting frame {index} failed: {err}"
                ))
            })?;
            Ok(ResolvedDmxFrame {
                t: frame.t(),
                channels: frame.resolve(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/dmx/frame.rs"]
mod tests;
