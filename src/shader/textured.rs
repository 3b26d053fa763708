use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::{
    assets::{mesh::Vertex, texture::Texture},
    shader::{FragmentShader, Varyings, VertexShader},
};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Varyings for [`TexturedShader`].
pub struct TexturedVarying {
    /// Clip-space position.
    pub pos: Vec4,
    /// Texture coordinate.
    pub tex: Vec2,
    /// World-space normal.
    pub norm: Vec3,
    /// World-space position.
    pub world_pos: Vec3,
}

crate::interpolate_fields!(TexturedVarying {
    pos,
    tex,
    norm,
    world_pos
});

impl Varyings for TexturedVarying {
    fn position(&self) -> Vec4 {
        self.pos
    }
}

/// Texture lookup lit by a directional light.
///
/// Mesh vertices are taken to be in world space already, so only `view_projection` transforms
/// them.
#[derive(Clone, Debug)]
pub struct TexturedShader {
    /// World to clip (projection * view).
    pub view_projection: Mat4,
    /// Sampled texture.
    pub texture: Arc<Texture>,
    /// World-space camera position.
    pub camera_pos: Vec3,
    /// Direction *towards* the light; normalized on use.
    pub light_dir: Vec3,
}

impl TexturedShader {
    /// Shader over `texture` with an identity transform and a light along `+z`.
    pub fn new(texture: Arc<Texture>) -> Self {
        Self {
            view_projection: Mat4::IDENTITY,
            texture,
            camera_pos: Vec3::ZERO,
            light_dir: Vec3::Z,
        }
    }
}

impl VertexShader for TexturedShader {
    type Input = Vertex;
    type Output = TexturedVarying;

    fn shade(&self, input: &Vertex) -> TexturedVarying {
        TexturedVarying {
            pos: self.view_projection * input.pos.extend(1.0),
            tex: input.tex,
            norm: input.norm,
            world_pos: input.pos,
        }
    }
}

impl FragmentShader for TexturedShader {
    type Input = TexturedVarying;

    fn shade(&self, input: &TexturedVarying) -> Vec4 {
        let texel = self.texture.fetch(input.tex);
        let norm = input.norm.normalize_or_zero();
        let light_dir = self.light_dir.normalize_or_zero();
        let view_dir = (self.camera_pos - input.world_pos).normalize_or_zero();
        let half = (light_dir + view_dir).normalize_or_zero();

        let diffuse = norm.dot(light_dir).max(0.0);
        let specular = norm.dot(half).max(0.0).powi(8);
        let intensity = 0.2 + 0.4 * diffuse + 0.4 * specular;

        (texel.truncate() * intensity).extend(texel.w)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/textured.rs"]
mod tests;
