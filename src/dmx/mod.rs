//! Lighting-fixture control: fixtures with channels and subchannels,
//! per-frame channel accumulation and delta-encoded output.

mod fixture;
mod frame;

pub use fixture::{Channel, ChannelValue, Fixture, FixtureDef, Subchannel, SubchannelKind};
pub use frame::{DmxAnimation, DmxFrame, DmxPopulateFn};

pub(crate) use frame::{evaluate_dmx_animation, ResolvedDmxFrame};
