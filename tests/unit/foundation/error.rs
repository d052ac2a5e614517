use super::*;

#[test]
fn constructors_map_to_variants() {
    assert!(matches!(
        BeamlineError::validation("x"),
        BeamlineError::Validation(_)
    ));
    assert!(matches!(
        BeamlineError::geometry("x"),
        BeamlineError::Geometry(_)
    ));
    assert!(matches!(
        BeamlineError::evaluation("x"),
        BeamlineError::Evaluation(_)
    ));
    assert!(matches!(BeamlineError::encode("x"), BeamlineError::Encode(_)));
}

#[test]
fn display_includes_message() {
    let e = BeamlineError::validation("fps must be > 0");
    assert_eq!(e.to_string(), "validation error: fps must be > 0");
}
