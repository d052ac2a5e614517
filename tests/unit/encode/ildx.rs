use super::*;
use crate::color::gradient::Color;
use crate::render::RenderLine;
use kurbo::Point;

// 4 + 3 + 1 + 8 + 8 + 2 + 2 + 2 + 1 + 1.
const HEADER_LEN: usize = 32;
const RECORD_LEN: usize = 7;

fn settings() -> IldxSettings {
    IldxSettings {
        fps: 25.0,
        company_name: "beamline".to_owned(),
        projector_number: 3,
        legacy_mode: false,
    }
}

fn red_point_frame() -> Vec<RenderLine> {
    let line = RenderLine::new(Point::ORIGIN, Point::ORIGIN, Color::rgb(1.0, 0.0, 0.0));
    vec![line, line]
}

fn one_animation(frames: Vec<Vec<RenderLine>>) -> EvaluatedAnimation {
    EvaluatedAnimation {
        name: "test".to_owned(),
        start_t: 2.0,
        frames,
    }
}

#[test]
fn file_layout_is_headers_records_terminator() {
    let animation = one_animation(vec![red_point_frame(), Vec::new()]);
    let bytes = encode_ildx(&[animation], &settings()).unwrap();
    // frame 0 header + 2 records, empty frame 1 header, terminator.
    assert_eq!(bytes.len(), HEADER_LEN + 2 * RECORD_LEN + HEADER_LEN + HEADER_LEN);
}

#[test]
fn header_fields_are_big_endian_and_exact() {
    let animation = one_animation(vec![red_point_frame(), red_point_frame()]);
    let bytes = encode_ildx(&[animation], &settings()).unwrap();

    assert_eq!(&bytes[0..4], &ILDX_MAGIC.to_be_bytes());
    // 2.0 seconds = 2000 ms in 3 bytes.
    assert_eq!(&bytes[4..7], &[0x00, 0x07, 0xD0]);
    assert_eq!(bytes[7], FORMAT_2D_TRUE_COLOR);
    assert_eq!(&bytes[8..16], b"test\0\0\0\0");
    assert_eq!(&bytes[16..24], b"beamline");
    // 2 records, frame 0 of 2, projector 3, fps 25 on the first frame.
    assert_eq!(&bytes[24..32], &[0, 2, 0, 0, 0, 2, 3, 25]);

    // Second frame's fps field degrades to 1.
    let header2 = &bytes[HEADER_LEN + 2 * RECORD_LEN..][..HEADER_LEN];
    assert_eq!(header2[31], 1);
    assert_eq!(&header2[26..28], &[0, 1]);
}

#[test]
fn records_scale_and_flag_correctly() {
    let lines = vec![
        RenderLine::new(Point::new(0.5, -0.5), Point::new(0.5, -0.5), Color::rgb(0.0, 1.0, 0.0)),
        RenderLine::transit(Point::new(0.5, -0.5), Point::new(0.0, 0.0)),
    ];
    let animation = one_animation(vec![lines]);
    let bytes = encode_ildx(&[animation], &settings()).unwrap();
    let records = &bytes[HEADER_LEN..HEADER_LEN + 2 * RECORD_LEN];

    // 0.5 * 65536 / 2 = 16384.
    assert_eq!(&records[0..2], &16384i16.to_be_bytes());
    assert_eq!(&records[2..4], &(-16384i16).to_be_bytes());
    assert_eq!(records[4], 0);
    assert_eq!(&records[5..8], &[0, 255, 0]);
}

#[test]
fn last_record_carries_the_end_flag_and_blanking_survives() {
    let lines = vec![
        RenderLine::new(Point::ORIGIN, Point::ORIGIN, Color::rgb(1.0, 1.0, 1.0)),
        RenderLine::transit(Point::ORIGIN, Point::new(0.1, 0.1)),
    ];
    let animation = one_animation(vec![lines]);
    let bytes = encode_ildx(&[animation], &settings()).unwrap();
    let first_status = bytes[HEADER_LEN + 4];
    let second_status = bytes[HEADER_LEN + RECORD_LEN + 4];
    assert_eq!(first_status, 0);
    assert_eq!(second_status, STATUS_BLANKED | STATUS_LAST_POINT);
}

#[test]
fn legacy_mode_zeroes_timing_and_switches_magic() {
    let animation = one_animation(vec![red_point_frame()]);
    let mut legacy = settings();
    legacy.legacy_mode = true;
    let bytes = encode_ildx(&[animation], &legacy).unwrap();
    assert_eq!(&bytes[0..4], &ILDA_MAGIC.to_be_bytes());
    assert_eq!(&bytes[4..7], &[0, 0, 0]);
    // fps field zeroed even on frame 0.
    assert_eq!(bytes[31], 0);
}

#[test]
fn terminator_is_all_zero_after_the_magic() {
    let bytes = encode_ildx(&[], &settings()).unwrap();
    assert_eq!(bytes.len(), HEADER_LEN);
    assert_eq!(&bytes[0..4], &ILDX_MAGIC.to_be_bytes());
    assert!(bytes[4..].iter().all(|&b| b == 0));
}

#[test]
fn empty_frame_is_a_valid_zero_record_frame() {
    let animation = one_animation(vec![Vec::new()]);
    let bytes = encode_ildx(&[animation], &settings()).unwrap();
    assert_eq!(bytes.len(), 2 * HEADER_LEN);
    // Record count zero.
    assert_eq!(&bytes[24..26], &[0, 0]);
}
