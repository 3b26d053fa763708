use super::*;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Rec {
    pos: Vec4,
    uv: Vec2,
    extra: [f32; 2],
}

crate::interpolate_fields!(Rec { pos, uv, extra });

#[test]
fn scalars_and_vectors_combine_linearly() {
    assert_eq!(f32::weighted(&1.0, &2.0, &4.0, [0.5, 0.25, 0.25]), 2.0);
    let v = Vec3::weighted(&Vec3::X, &Vec3::Y, &Vec3::Z, [0.2, 0.3, 0.5]);
    assert!((v - Vec3::new(0.2, 0.3, 0.5)).length() < 1e-6);
}

#[test]
fn vertex_weights_reproduce_the_vertex() {
    let a = Rec {
        pos: Vec4::new(1.0, 2.0, 3.0, 4.0),
        uv: Vec2::new(0.1, 0.2),
        extra: [7.0, 8.0],
    };
    let b = Rec {
        pos: Vec4::ZERO,
        uv: Vec2::ONE,
        extra: [0.0, 1.0],
    };
    assert_eq!(Rec::weighted(&a, &b, &b, [1.0, 0.0, 0.0]), a);
    assert_eq!(Rec::weighted(&a, &b, &a, [0.0, 1.0, 0.0]), b);
}

#[test]
fn fields_are_interpolated_independently() {
    let a = Rec {
        pos: Vec4::ZERO,
        uv: Vec2::ZERO,
        extra: [0.0, 10.0],
    };
    let b = Rec {
        pos: Vec4::ONE,
        uv: Vec2::new(1.0, 0.0),
        extra: [2.0, 20.0],
    };
    let c = Rec {
        pos: Vec4::splat(2.0),
        uv: Vec2::new(0.0, 1.0),
        extra: [4.0, 30.0],
    };
    let m = Rec::weighted(&a, &b, &c, [0.25, 0.25, 0.5]);
    assert!((m.pos - Vec4::splat(1.25)).length() < 1e-6);
    assert!((m.uv - Vec2::new(0.25, 0.5)).length() < 1e-6);
    assert!((m.extra[0] - 2.5).abs() < 1e-6);
    assert!((m.extra[1] - 22.5).abs() < 1e-6);
}
