use image::{Rgba, RgbaImage};

use super::*;

fn red_texture() -> Arc<Texture> {
    let img = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 128]));
    Arc::new(Texture::from_image(img))
}

#[test]
fn vertex_shader_keeps_world_position_and_uv() {
    let shader = TexturedShader::new(red_texture());
    let out = VertexShader::shade(
        &shader,
        &Vertex {
            pos: Vec3::new(1.0, 2.0, 3.0),
            tex: Vec2::new(0.25, 0.75),
            norm: Vec3::Y,
            color: Vec4::ONE,
        },
    );
    assert_eq!(out.pos, Vec4::new(1.0, 2.0, 3.0, 1.0));
    assert_eq!(out.world_pos, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(out.tex, Vec2::new(0.25, 0.75));
}

#[test]
fn fully_lit_texel_keeps_alpha() {
    let mut shader = TexturedShader::new(red_texture());
    shader.camera_pos = Vec3::new(0.0, 0.0, 5.0);
    let color = FragmentShader::shade(
        &shader,
        &TexturedVarying {
            pos: Vec4::W,
            tex: Vec2::splat(0.5),
            norm: Vec3::Z,
            world_pos: Vec3::ZERO,
        },
    );
    assert!((color.x - 1.0).abs() < 1e-5);
    assert_eq!(color.y, 0.0);
    assert!((color.w - 128.0 / 255.0).abs() < 1e-5);
}

#[test]
fn facing_away_gets_ambient_only() {
    let shader = TexturedShader::new(red_texture());
    let color = FragmentShader::shade(
        &shader,
        &TexturedVarying {
            pos: Vec4::W,
            tex: Vec2::ZERO,
            norm: -Vec3::Z,
            world_pos: Vec3::new(0.0, 0.0, 1.0),
        },
    );
    assert!((color.x - 0.2).abs() < 1e-5);
}
