use super::*;

#[test]
fn later_writes_win_per_channel() {
    let mut frame = DmxFrame::empty(0.0, 0, 25.0, 1.0, 25);
    frame.set((5, 10));
    frame.set((6, 20));
    frame.set((5, 30));
    let resolved = frame.resolve();
    assert_eq!(resolved.get(&5), Some(&30));
    assert_eq!(resolved.get(&6), Some(&20));
}

#[test]
fn frames_resolve_in_index_order() {
    let animation = DmxAnimation::new(2.0, 0.2, |frame: &mut DmxFrame| {
        frame.set((1, frame.index() as u8));
        Ok(())
    })
    .unwrap();
    let frames = evaluate_dmx_animation(&animation, 25.0).unwrap();
    assert_eq!(frames.len(), 5);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.channels.get(&1), Some(&(i as u8)));
        assert!((frame.t - (2.0 + i as f64 / 25.0)).abs() < 1e-12);
    }
}

#[test]
fn failing_population_aborts() {
    let animation = DmxAnimation::new(0.0, 1.0, |frame: &mut DmxFrame| {
        if frame.index() == 3 {
            return Err(BeamlineError::evaluation("deliberate failure"));
        }
        Ok(())
    })
    .unwrap();
    assert!(evaluate_dmx_animation(&animation, 25.0).is_err());
}
