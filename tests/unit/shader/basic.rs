use glam::{Vec2, Vec3};

use super::*;

fn vertex(pos: Vec3, color: Vec4) -> Vertex {
    Vertex {
        pos,
        tex: Vec2::ZERO,
        norm: Vec3::Z,
        color,
    }
}

#[test]
fn passthrough_returns_input() {
    let vs = Passthrough::<Vec4>::new();
    let p = Vec4::new(0.5, -0.5, 0.0, 1.0);
    assert_eq!(vs.shade(&p), p);
    assert_eq!(p.position(), p);
}

#[test]
fn flat_shader_projects_and_paints() {
    let fs = FlatShader {
        mvp: Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)),
        color: Vec4::new(1.0, 0.0, 0.0, 1.0),
    };
    let out = VertexShader::shade(&fs, &vertex(Vec3::ZERO, Vec4::ONE));
    assert_eq!(out, Vec4::new(1.0, 0.0, 0.0, 1.0));
    assert_eq!(FragmentShader::shade(&fs, &out), fs.color);
}

#[test]
fn color_shader_carries_vertex_color() {
    let cs = ColorShader::default();
    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let out = VertexShader::shade(&cs, &vertex(Vec3::new(0.1, 0.2, 0.3), red));
    assert_eq!(out.pos, Vec4::new(0.1, 0.2, 0.3, 1.0));
    assert_eq!(FragmentShader::shade(&cs, &out), red);
}

#[test]
fn solid_color_ignores_input() {
    let fs = SolidColor::<ColoredVertex>::new(Vec4::ONE);
    let v = ColoredVertex {
        pos: Vec4::ZERO,
        color: Vec4::ZERO,
    };
    assert_eq!(fs.shade(&v), Vec4::ONE);
}
