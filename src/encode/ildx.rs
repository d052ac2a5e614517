//! The laser wire format: big-endian fixed-size frame headers followed by
//! 7-byte 2D true-color point records.

use crate::eval::EvaluatedAnimation;
use crate::foundation::core::ILDX_RESOLUTION;
use crate::foundation::error::{BeamlineError, BeamlineResult};

/// Magic of the extended format (`ILDX`).
pub const ILDX_MAGIC: u32 = 0x494C_4458;
/// Magic of the legacy format (`ILDA`).
pub const ILDA_MAGIC: u32 = 0x494C_4441;

const FORMAT_2D_TRUE_COLOR: u8 = 5;
const STATUS_BLANKED: u8 = 0x40;
const STATUS_LAST_POINT: u8 = 0x80;
const HEADER_NAME_LENGTH: usize = 8;

/// Fixed per-file encoding parameters.
#[derive(Clone, Debug)]
pub(crate) struct IldxSettings {
    pub(crate) fps: f64,
    pub(crate) company_name: String,
    pub(crate) projector_number: u8,
    pub(crate) legacy_mode: bool,
}

impl IldxSettings {
    fn magic(&self) -> u32 {
        if self.legacy_mode {
            ILDA_MAGIC
        } else {
            ILDX_MAGIC
        }
    }
}

fn push_name(buf: &mut Vec<u8>, name: &str) {
    let bytes = name.as_bytes();
    buf.extend_from_slice(bytes);
    buf.resize(buf.len() + HEADER_NAME_LENGTH - bytes.len(), 0);
}

#[allow(clippy::too_many_arguments)]
fn push_header(
    buf: &mut Vec<u8>,
    magic: u32,
    start_time_ms: u32,
    format_code: u8,
    frame_name: &str,
    company_name: &str,
    record_count: u16,
    frame_number: u16,
    total_frames: u16,
    projector_number: u8,
    fps_field: u8,
) {
    buf.extend_from_slice(&magic.to_be_bytes());
    // 24-bit big-endian start time.
    buf.extend_from_slice(&start_time_ms.to_be_bytes()[1..4]);
    buf.push(format_code);
    push_name(buf, frame_name);
    push_name(buf, company_name);
    buf.extend_from_slice(&record_count.to_be_bytes());
    buf.extend_from_slice(&frame_number.to_be_bytes());
    buf.extend_from_slice(&total_frames.to_be_bytes());
    buf.push(projector_number);
    buf.push(fps_field);
}

fn scale_coordinate(v: f64) -> i16 {
    // Saturating cast, truncating toward zero like the format expects.
    (v * ILDX_RESOLUTION / 2.0) as i16
}

/// Encode evaluated animations into one in-memory file image.
///
/// Every frame gets one header plus one record per render line (the
/// record carries the line's end point); a terminator header with
/// zeroed fields closes the file.
#[tracing::instrument(skip_all, fields(animations = animations.len()))]
pub(crate) fn encode_ildx(
    animations: &[EvaluatedAnimation],
    settings: &IldxSettings,
) -> BeamlineResult<Vec<u8>> {
    let mut buf = Vec::new();
    for animation in animations {
        let total_frames = u16::try_from(animation.frames.len()).map_err(|_| {
            BeamlineError::encode(format!(
                "animation {:?} has {} frames, limit is {}",
                animation.name,
                animation.frames.len(),
                u16::MAX
            ))
        })?;
        let start_time_ms = if settings.legacy_mode {
            0
        } else {
            ((animation.start_t * 1000.0).round() as u32).min(0x00FF_FFFF)
        };

        for (frame_index, lines) in animation.frames.iter().enumerate() {
            let record_count = u16::try_from(lines.len()).map_err(|_| {
                BeamlineError::encode(format!(
                    "frame {frame_index} of {:?} has {} records, limit is {}",
                    animation.name,
                    lines.len(),
                    u16::MAX
                ))
            })?;
            let fps_field = if settings.legacy_mode {
                0
            } else if frame_index == 0 {
                settings.fps.round() as u8
            } else {
                1
            };
            push_header(
                &mut buf,
                settings.magic(),
                start_time_ms,
                FORMAT_2D_TRUE_COLOR,
                &animation.name,
                &settings.company_name,
                record_count,
                frame_index as u16,
                total_frames,
                settings.projector_number,
                fps_field,
            );

            let last = lines.len().saturating_sub(1);
            for (line_index, line) in lines.iter().enumerate() {
                let mut status = 0u8;
                if line.blanked {
                    status |= STATUS_BLANKED;
                }
                if line_index == last {
                    status |= STATUS_LAST_POINT;
                }
                buf.extend_from_slice(&scale_coordinate(line.p1.x).to_be_bytes());
                buf.extend_from_slice(&scale_coordinate(line.p1.y).to_be_bytes());
                buf.push(status);
                buf.push((line.color.r * 255.0) as u8);
                buf.push((line.color.g * 255.0) as u8);
                buf.push((line.color.b * 255.0) as u8);
            }
        }
    }

    // Terminator: magic plus all-zero fields.
    push_header(&mut buf, settings.magic(), 0, 0, "", "", 0, 0, 0, 0, 0);
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ildx.rs"]
mod tests;
