//! Bit-exact binary serialization of evaluated frames.

mod dmx;
mod ildx;

pub use dmx::DMX_MAGIC;
pub use ildx::{ILDA_MAGIC, ILDX_MAGIC};

pub(crate) use dmx::encode_dmx;
pub(crate) use ildx::{encode_ildx, IldxSettings};
