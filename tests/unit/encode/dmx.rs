use super::*;

const HEADER_LEN: usize = 14;
const ELEMENT_LEN: usize = 6;
const VALUE_LEN: usize = 3;

fn frame(t: f64, channels: &[(u16, u8)]) -> ResolvedDmxFrame {
    ResolvedDmxFrame {
        t,
        channels: channels.iter().copied().collect(),
    }
}

#[test]
fn header_is_little_endian_and_exact() {
    let frames = vec![frame(0.0, &[(5, 255)])];
    let bytes = encode_dmx(&frames, 7, 40).unwrap();
    assert_eq!(bytes.len(), HEADER_LEN + ELEMENT_LEN + VALUE_LEN);
    assert_eq!(&bytes[0..4], &DMX_MAGIC.to_le_bytes());
    assert_eq!(&bytes[4..6], &[0, 0]);
    assert_eq!(&bytes[6..8], &7u16.to_le_bytes());
    assert_eq!(&bytes[8..12], &1u32.to_le_bytes());
    assert_eq!(&bytes[12..16], &40u32.to_le_bytes());
}

#[test]
fn unchanged_frames_cost_zero_bytes() {
    let frames = vec![
        frame(0.0, &[(5, 255)]),
        frame(0.04, &[(5, 255)]),
        frame(0.08, &[(5, 255)]),
    ];
    let bytes = encode_dmx(&frames, 0, 120).unwrap();
    // One element for frame 0, nothing afterwards.
    assert_eq!(&bytes[8..12], &1u32.to_le_bytes());
    assert_eq!(bytes.len(), HEADER_LEN + ELEMENT_LEN + VALUE_LEN);
}

#[test]
fn only_changed_channels_are_persisted() {
    let frames = vec![
        frame(0.0, &[(1, 10), (2, 20)]),
        frame(0.04, &[(1, 10), (2, 30)]),
    ];
    let bytes = encode_dmx(&frames, 0, 80).unwrap();
    assert_eq!(&bytes[8..12], &2u32.to_le_bytes());
    // Second element holds a single value pair: channel 2 -> 30.
    let second = &bytes[HEADER_LEN + ELEMENT_LEN + 2 * VALUE_LEN..];
    assert_eq!(&second[0..4], &40u32.to_le_bytes());
    assert_eq!(&second[4..6], &1u16.to_le_bytes());
    assert_eq!(&second[6..8], &2u16.to_le_bytes());
    assert_eq!(second[8], 30);
}

#[test]
fn timestamps_are_milliseconds() {
    let frames = vec![frame(2.5, &[(0, 1)])];
    let bytes = encode_dmx(&frames, 0, 2500).unwrap();
    assert_eq!(&bytes[HEADER_LEN..HEADER_LEN + 4], &2500u32.to_le_bytes());
}

#[test]
fn empty_input_yields_a_bare_header() {
    let bytes = encode_dmx(&[], 0, 0).unwrap();
    assert_eq!(bytes.len(), HEADER_LEN);
    assert_eq!(&bytes[8..12], &0u32.to_le_bytes());
}

#[test]
fn silent_first_frame_emits_nothing() {
    let frames = vec![frame(0.0, &[]), frame(0.04, &[(3, 9)])];
    let bytes = encode_dmx(&frames, 0, 80).unwrap();
    assert_eq!(&bytes[8..12], &1u32.to_le_bytes());
    assert_eq!(&bytes[HEADER_LEN..HEADER_LEN + 4], &40u32.to_le_bytes());
}
