use super::*;

#[test]
fn axis_map_rejects_empty_and_oversized() {
    assert!(AxisMap::new(vec![]).is_err());
    assert!(AxisMap::new(vec![Axis::X; 5]).is_err());
    assert!(AxisMap::new(vec![Axis::X, Axis::T]).is_ok());
}

#[test]
fn axis_map_resolves_in_order() {
    let map = AxisMap::new(vec![Axis::T, Axis::X]).unwrap();
    let coords = map.resolve(Point::new(3.0, 4.0), 7.0);
    assert_eq!(coords, vec![7.0, 3.0]);
}
