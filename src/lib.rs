//! Beamline generates time-sequenced vector graphics for laser
//! projection and synchronized lighting control.
//!
//! The pipeline goes from [`Shape`]s (points, polylines, ellipses and
//! derived figures, each with a color gradient, a transform stack and a
//! displacement chain) through per-frame [`eval`] and [`render`] stages
//! into bit-exact laser and lighting file images:
//!
//! ```
//! use beamline::{Animation, Color, ColorGradient, IldxPipeline, Point, Shape};
//!
//! # fn main() -> beamline::BeamlineResult<()> {
//! let mut pipeline = IldxPipeline::new(25.0)?;
//! pipeline.add_animation(Animation::new("circle", 0.0, 1.0, |frame| {
//!     let gradient = ColorGradient::solid(Color::rgb(0.0, 1.0, 0.0));
//!     let circle = Shape::circle(Point::ORIGIN, 0.5, gradient)?
//!         .rotate(frame.progress() * std::f64::consts::TAU);
//!     frame.add_shape(circle);
//!     Ok(())
//! })?);
//! let bytes = pipeline.encode()?;
//! assert!(!bytes.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! Shapes can be combined through their signed distance fields with the
//! frame's [`SdfCombiner`], clipped by exclusion zones, and displaced by
//! externally seeded [`NoiseField`]s.

#![forbid(unsafe_code)]

pub mod color;
pub mod dmx;
pub mod encode;
pub mod eval;
pub mod foundation;
pub mod pipeline;
pub mod render;
pub mod shape;
pub mod transform;

pub use color::gradient::{Color, ColorGradient, InterpMode};
pub use dmx::{
    Channel, ChannelValue, DmxAnimation, DmxFrame, DmxPopulateFn, Fixture, Subchannel,
    SubchannelKind,
};
pub use encode::{DMX_MAGIC, ILDA_MAGIC, ILDX_MAGIC};
pub use eval::{Animation, EvaluatedAnimation, Frame, PopulateFn};
pub use foundation::core::{Point, Vec2, DEFAULT_POINT_DENSITY, DRAW_BOUND, ILDX_RESOLUTION};
pub use foundation::error::{BeamlineError, BeamlineResult};
pub use pipeline::{DmxPipeline, IldxPipeline, ScenePopulateFn, ShowPipeline};
pub use render::{ExclusionZone, FlipAxes, RenderLine};
pub use shape::sdf::{CombineOp, SdfCombiner, SDF_GRID_RESOLUTION};
pub use shape::{Axis, AxisMap, Displacement, NoiseField, Shape};
pub use transform::stack::TransformStack;
