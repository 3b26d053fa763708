use super::*;

#[test]
fn new_target_is_cleared() {
    let t = FrameTarget::new(4, 3).unwrap();
    for y in 0..3 {
        for x in 0..4 {
            assert_eq!(t.depth(x, y), CLEAR_DEPTH);
            assert_eq!(t.color(x, y), Rgba8::TRANSPARENT);
        }
    }
    assert!(FrameTarget::new(0, 3).is_err());
}

#[test]
fn row_zero_is_the_bottom_of_the_image() {
    let t = FrameTarget::new(2, 2).unwrap();
    t.store(1, 0, Rgba8::new(10, 20, 30, 40), 0.25);

    let rgba = t.to_rgba8();
    // Bottom-right pixel is the last one in storage order.
    assert_eq!(&rgba[12..16], &[10, 20, 30, 40]);
    assert_eq!(&t.to_bgra8()[12..16], &[30, 20, 10, 40]);

    let img = t.to_rgba_image();
    assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30, 40]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
}

#[test]
fn clear_resets_both_buffers() {
    let t = FrameTarget::new(3, 3).unwrap();
    t.store(2, 2, Rgba8::WHITE, -0.5);
    t.store_color(0, 0, Rgba8::WHITE);
    t.clear();
    assert_eq!(t.depth(2, 2), CLEAR_DEPTH);
    assert_eq!(t.color(2, 2), Rgba8::TRANSPARENT);
    assert_eq!(t.color(0, 0), Rgba8::TRANSPARENT);
}

#[test]
fn lock_table_matches_target_size() {
    let t = FrameTarget::new(64, 64).unwrap();
    assert_eq!(t.locks().len(), 64 * 64 / crate::target::lock::PIXELS_PER_LOCK);
}
