use super::*;

#[test]
fn span_pick_covers_inclusive_bounds() {
    let s = Span::new(105u8, 185u8);
    assert_eq!(s.pick(0.0), 105);
    assert_eq!(s.pick(0.999_999), 185);
    assert_eq!(Span::new(7u8, 7u8).pick(0.5), 7);
}

#[test]
fn span_pick_inverted_range_does_not_panic() {
    let s = Span::new(200u8, 100u8);
    let v = s.pick(0.5);
    assert!(v <= 200);
}

#[test]
fn span_lerp_endpoints() {
    let s = Span::new(10.0, 70.0);
    assert_eq!(s.lerp(0.0), 10.0);
    assert_eq!(s.lerp(0.5), 40.0);
}

#[test]
fn region_clip_and_area() {
    let r = Region::full(100, 50);
    assert_eq!(r.area(), 5000);
    assert_eq!(r.clipped_to(100, 50), r);

    let r = Region {
        x: 90,
        y: 40,
        width: 20,
        height: 20,
    }
    .clipped_to(100, 50);
    assert_eq!((r.width, r.height), (10, 10));

    let r = Region {
        x: 120,
        y: 0,
        width: 5,
        height: 5,
    }
    .clipped_to(100, 50);
    assert!(r.is_empty());
}

#[test]
fn span_deserializes_from_array_or_object() {
    let a: Span<f64> = serde_json::from_str("[0.3, 0.9]").unwrap();
    let b: Span<f64> = serde_json::from_str(r#"{"min": 0.3, "max": 0.9}"#).unwrap();
    assert_eq!(a, b);
    let c: Span<u8> = serde_json::from_str("[105, 185]").unwrap();
    assert_eq!(c, Span::new(105, 185));
}
