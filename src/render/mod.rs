//! Conversion of sampled shapes into ordered, colored, blanking-aware
//! segments ready for serialization.

mod builder;
mod line;

pub use builder::{ExclusionZone, FlipAxes};
pub use line::RenderLine;

pub(crate) use builder::build_render_lines;
