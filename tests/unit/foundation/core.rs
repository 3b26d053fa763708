use super::*;

#[test]
fn rgba8_bits_and_bgra_layout() {
    let c = Rgba8::new(1, 2, 3, 4);
    assert_eq!(Rgba8::from_bits(c.to_bits()), c);
    assert_eq!(c.to_bgra(), [3, 2, 1, 4]);
    assert_eq!(Rgba8::TRANSPARENT.to_bits(), 0);
}

#[test]
fn rgba8_from_unit_clamps_and_rounds() {
    assert_eq!(Rgba8::from_unit(Vec4::ONE), Rgba8::WHITE);
    assert_eq!(
        Rgba8::from_unit(Vec4::new(-1.0, 2.0, 0.5, f32::NAN)),
        Rgba8::new(0, 255, 128, 0)
    );
}

#[test]
fn viewport_mappings_round_trip_pixel_centers() {
    let vp = Viewport::new(1920, 1080).unwrap();
    for x in [0, 1, 959, 960, 1919] {
        assert_eq!(vp.x_ndc_to_screen(vp.x_screen_to_ndc(x)), x);
    }
    for y in [0, 1, 539, 1079] {
        assert_eq!(vp.y_ndc_to_screen(vp.y_screen_to_ndc(y)), y);
    }
    assert_eq!(vp.x_ndc_to_screen(1.0 - 1e-6), 1919);
    assert_eq!(vp.x_ndc_to_screen(-1.0 + 1e-6), 0);
}

#[test]
fn viewport_rejects_empty() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());
}

#[test]
fn culling_matches_winding() {
    let cw = Winding::from_determinant(-2.0);
    let ccw = Winding::from_determinant(2.0);
    assert_eq!(cw, Winding::Clockwise);
    assert_eq!(ccw, Winding::CounterClockwise);

    assert!(Culling::Clockwise.culls(cw));
    assert!(!Culling::Clockwise.culls(ccw));
    assert!(Culling::CounterClockwise.culls(ccw));
    assert!(!Culling::CounterClockwise.culls(cw));
    assert!(!Culling::None.culls(cw));
    assert!(!Culling::None.culls(ccw));
}

#[test]
fn clip_convention_rejects_wrong_sign() {
    assert!(!ClipConvention::PositiveW.rejects(1.0));
    assert!(ClipConvention::PositiveW.rejects(0.0));
    assert!(ClipConvention::PositiveW.rejects(-1.0));

    assert!(!ClipConvention::NegativeW.rejects(-1.0));
    assert!(ClipConvention::NegativeW.rejects(0.0));
    assert!(ClipConvention::NegativeW.rejects(1.0));
}
