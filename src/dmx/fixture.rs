use std::collections::BTreeMap;
use std::f64::consts::{FRAC_2_PI, TAU};

use crate::foundation::error::{BeamlineError, BeamlineResult};

/// A channel write: DMX address and byte value.
pub type ChannelValue = (u16, u8);

/// How a subchannel interprets its normalized input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubchannelKind {
    /// The full `[0, 1]` range maps linearly onto `[min, max]`.
    Continuous,
    /// A discrete mode selector; activated by setting the range midpoint.
    Category,
}

/// A named byte sub-range of one DMX channel.
#[derive(Clone, Debug)]
pub struct Subchannel {
    name: String,
    address: u16,
    min: u8,
    max: u8,
    kind: SubchannelKind,
}

impl Subchannel {
    /// The subchannel's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the subchannel is continuous or a category selector.
    pub fn kind(&self) -> SubchannelKind {
        self.kind
    }

    /// Map a normalized value (clamped to `[0, 1]`) into the byte range.
    pub fn set(&self, value: f64) -> ChannelValue {
        let value = value.clamp(0.0, 1.0);
        let byte = self.min as f64 + value * (self.max as f64 - self.min as f64);
        (self.address, byte as u8)
    }

    /// Beam off / range minimum.
    pub fn zero(&self) -> ChannelValue {
        self.set(0.0)
    }

    /// Range maximum.
    pub fn full(&self) -> ChannelValue {
        self.set(1.0)
    }

    /// Select a category subchannel by writing its range midpoint.
    pub fn activate(&self) -> ChannelValue {
        self.set(0.5)
    }

    /// Periodic pulse at time `t`: a sine of `frequency` and `phase`,
    /// morphed by `shape` in `[0, 1]` from a flattened sine (0) through a
    /// pure sine (0.5) to a triangle wave (1), scaled by `amplitude`.
    pub fn pulse(
        &self,
        t: f64,
        amplitude: f64,
        frequency: f64,
        phase: f64,
        shape: f64,
    ) -> ChannelValue {
        let s = shape * 2.0;
        let exponent = s.min(1.0);
        let alpha = s.max(1.0) - 1.0;

        let sine = (TAU * frequency * t + phase).sin();
        let shaped = sine.signum() * sine.abs().powf(exponent);
        let triangle = FRAC_2_PI * sine.asin();
        let y = amplitude * ((1.0 - alpha) * shaped + alpha * triangle + 1.0) / 2.0;
        self.set(y)
    }

    /// Linear ramp from `start_value` to `end_value` over
    /// `[start_t, end_t]`, held constant outside the window.
    pub fn lerp(
        &self,
        t: f64,
        start_t: f64,
        end_t: f64,
        start_value: f64,
        end_value: f64,
    ) -> ChannelValue {
        let y = if t < start_t {
            start_value
        } else if t > end_t {
            end_value
        } else {
            let progress = (t - start_t) / (end_t - start_t);
            start_value + progress * (end_value - start_value)
        };
        self.set(y)
    }

    /// Quadratic ease-in from `start_value` to `end_value` over
    /// `[start_t, end_t]`, held constant outside the window.
    pub fn smooth(
        &self,
        t: f64,
        start_t: f64,
        end_t: f64,
        start_value: f64,
        end_value: f64,
    ) -> ChannelValue {
        let y = if t < start_t {
            start_value
        } else if t > end_t {
            end_value
        } else {
            let progress = (t - start_t) / (end_t - start_t);
            start_value + (end_value - start_value) * progress * progress
        };
        self.set(y)
    }
}

/// One DMX channel of a fixture, optionally split into subchannels.
#[derive(Clone, Debug)]
pub struct Channel {
    name: String,
    address: u16,
    subchannels: Vec<Subchannel>,
}

impl Channel {
    fn new(name: String, address: u16) -> Self {
        // Until an explicit subchannel is added, the whole byte range is
        // addressable through a default continuous subchannel.
        Self {
            name,
            address,
            subchannels: vec![Subchannel {
                name: "default".to_owned(),
                address,
                min: 0,
                max: 255,
                kind: SubchannelKind::Continuous,
            }],
        }
    }

    /// The channel's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The channel's DMX address.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// Add a subchannel covering `[min, max]`. The first explicit
    /// subchannel replaces the implicit full-range default.
    pub fn add_subchannel(&mut self, name: &str, min: u8, max: u8, kind: SubchannelKind) {
        if self.subchannels.len() == 1 && self.subchannels[0].name == "default" {
            self.subchannels.clear();
        }
        self.subchannels.push(Subchannel {
            name: name.to_owned(),
            address: self.address,
            min,
            max,
            kind,
        });
    }

    /// Look up a subchannel by name.
    pub fn subchannel(&self, name: &str) -> BeamlineResult<&Subchannel> {
        self.subchannels
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| {
                BeamlineError::validation(format!(
                    "channel {:?} has no subchannel {name:?}",
                    self.name
                ))
            })
    }

    /// Write the whole channel range directly.
    pub fn set(&self, value: f64) -> ChannelValue {
        (self.address, (value.clamp(0.0, 1.0) * 255.0) as u8)
    }

    /// Channel minimum.
    pub fn zero(&self) -> ChannelValue {
        (self.address, 0)
    }

    /// Channel maximum.
    pub fn full(&self) -> ChannelValue {
        (self.address, 0xff)
    }
}

/// A lighting fixture: named channels at consecutive addresses starting
/// from a patch address.
#[derive(Clone, Debug)]
pub struct Fixture {
    name: String,
    start_address: u16,
    channels: Vec<Channel>,
}

impl Fixture {
    /// An empty fixture patched at `start_address`.
    pub fn new(name: impl Into<String>, start_address: u16) -> Self {
        Self {
            name: name.into(),
            start_address,
            channels: Vec::new(),
        }
    }

    /// Build a fixture from a JSON definition (see [`FixtureDef`] for the
    /// schema), patched at `start_address`.
    pub fn from_json(json: &str, start_address: u16) -> BeamlineResult<Self> {
        let def: FixtureDef = serde_json::from_str(json)
            .map_err(|err| BeamlineError::validation(format!("invalid fixture json: {err}")))?;
        let mut fixture = Self::new(def.name, start_address);
        for channel_def in def.channels {
            let channel = fixture.add_channel(&channel_def.name);
            for (name, sub) in channel_def.subchannels {
                let kind = match sub.kind {
                    SubchannelKindDef::Value => SubchannelKind::Continuous,
                    SubchannelKindDef::Category => SubchannelKind::Category,
                };
                channel.add_subchannel(&name, sub.range.0, sub.range.1, kind);
            }
        }
        Ok(fixture)
    }

    /// The fixture's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fixture's patch address.
    pub fn start_address(&self) -> u16 {
        self.start_address
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Append a channel at the next consecutive address.
    pub fn add_channel(&mut self, name: &str) -> &mut Channel {
        let index = self.channels.len();
        let address = self.start_address + index as u16;
        self.channels.push(Channel::new(name.to_owned(), address));
        &mut self.channels[index]
    }

    /// Look up a channel by name.
    pub fn channel(&self, name: &str) -> BeamlineResult<&Channel> {
        self.channels
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| {
                BeamlineError::validation(format!(
                    "fixture {:?} has no channel {name:?}",
                    self.name
                ))
            })
    }
}

/// JSON schema of a fixture definition.
#[derive(Debug, serde::Deserialize)]
pub struct FixtureDef {
    name: String,
    channels: Vec<ChannelDef>,
}

#[derive(Debug, serde::Deserialize)]
struct ChannelDef {
    name: String,
    #[serde(default)]
    subchannels: BTreeMap<String, SubchannelDef>,
}

#[derive(Debug, serde::Deserialize)]
struct SubchannelDef {
    #[serde(rename = "type")]
    kind: SubchannelKindDef,
    range: (u8, u8),
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
enum SubchannelKindDef {
    Value,
    Category,
}

#[cfg(test)]
#[path = "../../tests/unit/dmx/fixture.rs"]
mod tests;
