use super::*;

fn lit(target: &FrameTarget) -> usize {
    let mut n = 0;
    for y in 0..target.height() {
        for x in 0..target.width() {
            if target.color(x, y) != Rgba8::TRANSPARENT {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn horizontal_edge_covers_every_column() {
    let target = FrameTarget::new(8, 8).unwrap();
    let verts = [
        Vec4::new(-1.0, -0.75, 0.0, 1.0),
        Vec4::new(1.0, -0.75, 0.0, 1.0),
        Vec4::new(0.0, 0.75, 0.0, 1.0),
    ];
    draw_wireframe(&target, &verts, &[0, 1, 2], Vec4::ONE, ClipConvention::PositiveW).unwrap();
    for x in 0..8 {
        assert_eq!(target.color(x, 1), Rgba8::WHITE, "column {x}");
    }
    // Interior untouched; depth untouched.
    assert_eq!(target.color(4, 3), Rgba8::TRANSPARENT);
    assert_eq!(target.depth(0, 1), crate::target::frame::CLEAR_DEPTH);
}

#[test]
fn offscreen_edges_are_clipped() {
    let target = FrameTarget::new(6, 6).unwrap();
    let verts = [
        Vec4::new(-50.0, 0.0, 0.0, 1.0),
        Vec4::new(50.0, 0.0, 0.0, 1.0),
        Vec4::new(0.0, 1e9, 0.0, 1.0),
    ];
    draw_wireframe(&target, &verts, &[0, 1, 2], Vec4::ONE, ClipConvention::PositiveW).unwrap();
    assert!(lit(&target) >= 6);
}

#[test]
fn w_rejected_triangles_are_skipped() {
    let target = FrameTarget::new(6, 6).unwrap();
    let verts = [
        Vec4::new(-1.0, -1.0, 0.0, 1.0),
        Vec4::new(1.0, -1.0, 0.0, -1.0),
        Vec4::new(0.0, 1.0, 0.0, 1.0),
    ];
    draw_wireframe(&target, &verts, &[0, 1, 2], Vec4::ONE, ClipConvention::PositiveW).unwrap();
    assert_eq!(lit(&target), 0);
}

#[test]
fn bad_indices_are_rejected() {
    let target = FrameTarget::new(2, 2).unwrap();
    let verts = [Vec4::W; 3];
    assert!(draw_wireframe(&target, &verts, &[0, 1], Vec4::ONE, ClipConvention::PositiveW).is_err());
    assert!(draw_wireframe(&target, &verts, &[0, 1, 3], Vec4::ONE, ClipConvention::PositiveW).is_err());
}

#[test]
fn clip_segment_keeps_inside_portion() {
    let max = Vec2::new(9.0, 9.0);
    let (a, b) = clip_segment(Vec2::new(-10.0, 5.0), Vec2::new(20.0, 5.0), max).unwrap();
    assert!(a.abs_diff_eq(Vec2::new(0.0, 5.0), 1e-4), "{a}");
    assert!(b.abs_diff_eq(Vec2::new(9.0, 5.0), 1e-4), "{b}");
    assert!(clip_segment(Vec2::new(-5.0, -5.0), Vec2::new(-1.0, 20.0), max).is_none());
    assert!(clip_segment(Vec2::NAN, Vec2::ZERO, max).is_none());
}
