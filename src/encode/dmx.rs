//! The lighting wire format: a little-endian header followed by
//! timestamped elements holding only the channel values that changed.

use std::collections::BTreeMap;

use crate::dmx::ResolvedDmxFrame;
use crate::foundation::error::{BeamlineError, BeamlineResult};

/// Magic of the lighting format.
pub const DMX_MAGIC: u32 = 0x204D_5844;

/// Delta-encode resolved lighting frames into one in-memory file image.
///
/// A frame contributes one element only when its resolved channel map
/// differs from the previously persisted one; the persisted map is then
/// replaced wholesale. Unchanged frames cost zero bytes. A persisted
/// element carries only the changed `(channel, value)` pairs.
#[tracing::instrument(skip_all, fields(frames = frames.len(), universe))]
pub(crate) fn encode_dmx(
    frames: &[ResolvedDmxFrame],
    universe: u16,
    duration_ms: u32,
) -> BeamlineResult<Vec<u8>> {
    let mut elements: Vec<(u32, Vec<(u16, u8)>)> = Vec::new();
    let mut last: BTreeMap<u16, u8> = BTreeMap::new();
    for frame in frames {
        let diff: Vec<(u16, u8)> = frame
            .channels
            .iter()
            .filter(|(channel, value)| last.get(channel) != Some(value))
            .map(|(&channel, &value)| (channel, value))
            .collect();
        if diff.is_empty() {
            continue;
        }
        elements.push(((frame.t * 1000.0) as u32, diff));
        last = frame.channels.clone();
    }

    let element_count = u32::try_from(elements.len())
        .map_err(|_| BeamlineError::encode("lighting element count exceeds u32"))?;

    let mut buf = Vec::new();
    buf.extend_from_slice(&DMX_MAGIC.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&universe.to_le_bytes());
    buf.extend_from_slice(&element_count.to_le_bytes());
    buf.extend_from_slice(&duration_ms.to_le_bytes());

    for (time_ms, values) in elements {
        let value_count = u16::try_from(values.len()).map_err(|_| {
            BeamlineError::encode(format!(
                "lighting element at {time_ms} ms has {} values, limit is {}",
                values.len(),
                u16::MAX
            ))
        })?;
        buf.extend_from_slice(&time_ms.to_le_bytes());
        buf.extend_from_slice(&value_count.to_le_bytes());
        for (channel, value) in values {
            buf.extend_from_slice(&channel.to_le_bytes());
            buf.push(value);
        }
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/dmx.rs"]
mod tests;
