//! Top-level pipelines assembling animations into output files.
//!
//! Each pipeline evaluates its animations sequentially (frames within an
//! animation run in parallel), assembles the whole file in memory and
//! writes it in one step, so no partial file is ever left behind.

use std::path::Path;
use std::sync::Arc;

use crate::dmx::{evaluate_dmx_animation, DmxAnimation, DmxFrame, ResolvedDmxFrame};
use crate::encode::{encode_dmx, encode_ildx, IldxSettings};
use crate::eval::{evaluate_animation, Animation, EvaluatedAnimation, Frame, MAX_NAME_LENGTH};
use crate::foundation::core::DEFAULT_POINT_DENSITY;
use crate::foundation::error::{BeamlineError, BeamlineResult};
use crate::render::{ExclusionZone, FlipAxes};
use crate::shape::Shape;

fn write_file(path: &Path, bytes: &[u8]) -> BeamlineResult<()> {
    std::fs::write(path, bytes).map_err(|err| {
        BeamlineError::encode(format!("cannot write {}: {err}", path.display()))
    })
}

/// Laser output pipeline: animations, exclusion zones and projector
/// configuration, encoded into one laser file.
#[derive(Debug)]
pub struct IldxPipeline {
    fps: f64,
    point_density: f64,
    animations: Vec<Animation>,
    exclusion_zones: Vec<ExclusionZone>,
    show_exclusion_zones: bool,
    flip: FlipAxes,
    company_name: String,
    projector_number: u8,
    legacy_mode: bool,
}

impl IldxPipeline {
    /// A pipeline at `fps` with the engine default point density.
    pub fn new(fps: f64) -> BeamlineResult<Self> {
        Self::with_point_density(fps, DEFAULT_POINT_DENSITY)
    }

    /// A pipeline with an explicit default point density.
    pub fn with_point_density(fps: f64, point_density: f64) -> BeamlineResult<Self> {
        if fps <= 0.0 {
            return Err(BeamlineError::validation(format!(
                "fps must be positive, got {fps}"
            )));
        }
        if point_density <= 0.0 {
            return Err(BeamlineError::validation(format!(
                "point density must be positive, got {point_density}"
            )));
        }
        Ok(Self {
            fps,
            point_density,
            animations: Vec::new(),
            exclusion_zones: Vec::new(),
            show_exclusion_zones: false,
            flip: FlipAxes::default(),
            company_name: String::new(),
            projector_number: 0,
            legacy_mode: false,
        })
    }

    /// Set the 8-byte company label carried in every frame header.
    pub fn company_name(mut self, name: impl Into<String>) -> BeamlineResult<Self> {
        let name = name.into();
        if name.len() > MAX_NAME_LENGTH || !name.is_ascii() {
            return Err(BeamlineError::validation(format!(
                "company name {name:?} must be ascii and at most {MAX_NAME_LENGTH} bytes"
            )));
        }
        self.company_name = name;
        Ok(self)
    }

    /// Set the projector number carried in every frame header.
    pub fn projector_number(mut self, number: u8) -> Self {
        self.projector_number = number;
        self
    }

    /// Emit the legacy wire format (different magic, zeroed timing).
    pub fn legacy_mode(mut self, legacy: bool) -> Self {
        self.legacy_mode = legacy;
        self
    }

    /// Render registered exclusion zones as visible shapes.
    pub fn show_exclusion_zones(mut self, show: bool) -> Self {
        self.show_exclusion_zones = show;
        self
    }

    /// Mirror output for the projector's mounting orientation.
    pub fn flip(mut self, x: bool, y: bool) -> Self {
        self.flip = FlipAxes { x, y };
        self
    }

    /// The configured frame rate.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// The configured default point density.
    pub fn point_density(&self) -> f64 {
        self.point_density
    }

    /// Append an animation; animations are encoded in insertion order.
    pub fn add_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    /// Register a clipping region. `inside = true` blanks geometry inside
    /// the zone; `false` blanks geometry outside it.
    pub fn add_exclusion_zone(&mut self, shape: Shape, inside: bool) {
        self.exclusion_zones.push(ExclusionZone::new(shape, inside));
    }

    fn evaluate(&self) -> BeamlineResult<Vec<EvaluatedAnimation>> {
        if self.legacy_mode && self.animations.len() > 1 {
            return Err(BeamlineError::validation(
                "legacy mode supports a single animation per file",
            ));
        }
        self.animations
            .iter()
            .map(|animation| {
                evaluate_animation(
                    animation,
                    self.fps,
                    self.point_density,
                    &self.exclusion_zones,
                    self.show_exclusion_zones,
                    self.flip,
                )
            })
            .collect()
    }

    /// Evaluate all animations and encode the complete file image.
    #[tracing::instrument(skip_all, fields(animations = self.animations.len()))]
    pub fn encode(&self) -> BeamlineResult<Vec<u8>> {
        let evaluated = self.evaluate()?;
        let settings = IldxSettings {
            fps: self.fps,
            company_name: self.company_name.clone(),
            projector_number: self.projector_number,
            legacy_mode: self.legacy_mode,
        };
        encode_ildx(&evaluated, &settings)
    }

    /// Encode and write the file in one step.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> BeamlineResult<()> {
        write_file(path.as_ref(), &self.encode()?)
    }
}

/// Lighting output pipeline: lighting animations delta-encoded into one
/// file for a single universe.
#[derive(Debug)]
pub struct DmxPipeline {
    fps: f64,
    universe: u16,
    animations: Vec<DmxAnimation>,
}

impl DmxPipeline {
    /// A pipeline at `fps` for `universe`.
    pub fn new(fps: f64, universe: u16) -> BeamlineResult<Self> {
        if fps <= 0.0 {
            return Err(BeamlineError::validation(format!(
                "fps must be positive, got {fps}"
            )));
        }
        Ok(Self {
            fps,
            universe,
            animations: Vec::new(),
        })
    }

    /// The configured frame rate.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Append a lighting animation.
    pub fn add_animation(&mut self, animation: DmxAnimation) {
        self.animations.push(animation);
    }

    fn evaluate(&self) -> BeamlineResult<Vec<ResolvedDmxFrame>> {
        let mut frames = Vec::new();
        for animation in &self.animations {
            frames.extend(evaluate_dmx_animation(animation, self.fps)?);
        }
        Ok(frames)
    }

    fn duration_ms(&self) -> u32 {
        let total: f64 = self.animations.iter().map(DmxAnimation::duration).sum();
        (total * 1000.0).round() as u32
    }

    /// Evaluate all animations and encode the complete file image.
    #[tracing::instrument(skip_all, fields(animations = self.animations.len()))]
    pub fn encode(&self) -> BeamlineResult<Vec<u8>> {
        encode_dmx(&self.evaluate()?, self.universe, self.duration_ms())
    }

    /// Encode and write the file in one step.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> BeamlineResult<()> {
        write_file(path.as_ref(), &self.encode()?)
    }
}

/// Combined population callback over a shared clock.
pub type ScenePopulateFn =
    Arc<dyn Fn(&mut Frame, &mut DmxFrame) -> BeamlineResult<()> + Send + Sync>;

/// Drives a laser and a lighting pipeline from single scene callbacks
/// that see both frames at the same instant.
#[derive(Debug)]
pub struct ShowPipeline {
    laser: IldxPipeline,
    lighting: DmxPipeline,
}

impl ShowPipeline {
    /// Pair a laser and a lighting pipeline. Their frame rates must
    /// match so scene callbacks see one shared clock.
    pub fn new(laser: IldxPipeline, lighting: DmxPipeline) -> BeamlineResult<Self> {
        if laser.fps() != lighting.fps() {
            return Err(BeamlineError::validation(format!(
                "laser fps {} and lighting fps {} differ",
                laser.fps(),
                lighting.fps()
            )));
        }
        Ok(Self { laser, lighting })
    }

    /// Add a scene: one named time window whose callback populates the
    /// laser frame and the lighting frame together.
    pub fn add_scene(
        &mut self,
        name: impl Into<String>,
        start_t: f64,
        duration: f64,
        populate: impl Fn(&mut Frame, &mut DmxFrame) -> BeamlineResult<()> + Send + Sync + 'static,
    ) -> BeamlineResult<()> {
        let populate: ScenePopulateFn = Arc::new(populate);
        let fps = self.laser.fps();
        let density = self.laser.point_density();

        let laser_populate = {
            let populate = Arc::clone(&populate);
            move |frame: &mut Frame| {
                let mut scratch = DmxFrame::empty(
                    frame.start_t(),
                    frame.index(),
                    frame.fps(),
                    frame.duration(),
                    frame.total_frames(),
                );
                populate(frame, &mut scratch)
            }
        };
        self.laser
            .add_animation(Animation::new(name, start_t, duration, laser_populate)?);

        let lighting_populate = {
            let populate = Arc::clone(&populate);
            let total_frames = (fps * duration).ceil() as usize;
            move |dmx: &mut DmxFrame| {
                let mut scratch = Frame::empty(
                    dmx.start_t(),
                    dmx.index(),
                    dmx.fps(),
                    duration,
                    total_frames,
                    density,
                );
                populate(&mut scratch, dmx)
            }
        };
        self.lighting
            .add_animation(DmxAnimation::new(start_t, duration, lighting_populate)?);
        Ok(())
    }

    /// The laser half of the show.
    pub fn laser(&self) -> &IldxPipeline {
        &self.laser
    }

    /// The lighting half of the show.
    pub fn lighting(&self) -> &DmxPipeline {
        &self.lighting
    }

    /// Encode both file images.
    pub fn encode(&self) -> BeamlineResult<(Vec<u8>, Vec<u8>)> {
        Ok((self.laser.encode()?, self.lighting.encode()?))
    }

    /// Encode and write both files.
    pub fn write_to_files(
        &self,
        laser_path: impl AsRef<Path>,
        lighting_path: impl AsRef<Path>,
    ) -> BeamlineResult<()> {
        write_file(laser_path.as_ref(), &self.laser.encode()?)?;
        write_file(lighting_path.as_ref(), &self.lighting.encode()?)
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
