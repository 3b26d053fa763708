use glam::{Mat4, Vec3, Vec4};

use crate::{
    assets::mesh::Vertex,
    shader::{FragmentShader, Varyings, VertexShader},
};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Varyings for Blinn-Phong lighting.
pub struct PhongVarying {
    /// Clip-space position.
    pub pos: Vec4,
    /// World-space normal.
    pub norm: Vec3,
    /// World-space position.
    pub world_pos: Vec3,
}

crate::interpolate_fields!(PhongVarying {
    pos,
    norm,
    world_pos
});

impl Varyings for PhongVarying {
    fn position(&self) -> Vec4 {
        self.pos
    }
}

/// Transforms positions and normals for [`PhongFragmentShader`].
#[derive(Clone, Copy, Debug)]
pub struct PhongVertexShader {
    /// Object to world.
    pub model: Mat4,
    /// World to clip (projection * view).
    pub view_projection: Mat4,
    /// Normal transform, usually [`crate::normal_matrix`] of `model`.
    pub normal: Mat4,
}

impl Default for PhongVertexShader {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
            normal: Mat4::IDENTITY,
        }
    }
}

impl PhongVertexShader {
    /// Set `model` and derive the matching normal matrix.
    pub fn set_model(&mut self, model: Mat4) {
        self.model = model;
        self.normal = crate::foundation::math::normal_matrix(model);
    }
}

impl VertexShader for PhongVertexShader {
    type Input = Vertex;
    type Output = PhongVarying;

    fn shade(&self, input: &Vertex) -> PhongVarying {
        let world = self.model * input.pos.extend(1.0);
        PhongVarying {
            pos: self.view_projection * world,
            norm: (self.normal * input.norm.extend(0.0))
                .truncate()
                .normalize_or_zero(),
            world_pos: world.truncate(),
        }
    }
}

/// Point-light Blinn-Phong with inverse-square diffuse falloff and exponential tone mapping.
///
/// The light is a plain field set by the caller; nothing here is global.
#[derive(Clone, Copy, Debug)]
pub struct PhongFragmentShader {
    /// World-space light position.
    pub light_pos: Vec3,
    /// Light RGBA color.
    pub light_color: Vec4,
    /// World-space camera position (for the half vector).
    pub camera_pos: Vec3,
    /// Specular weight.
    pub specular_coeff: f32,
    /// Specular exponent.
    pub specular_power: f32,
    /// Diffuse weight (before inverse-square falloff).
    pub diffuse_coeff: f32,
    /// Constant ambient term.
    pub ambient_intensity: f32,
    /// Exposure of the `1 - exp(-k * intensity)` tone curve.
    pub tonemapping_coeff: f32,
}

impl Default for PhongFragmentShader {
    fn default() -> Self {
        Self {
            light_pos: Vec3::ZERO,
            light_color: Vec4::ONE,
            camera_pos: Vec3::ZERO,
            specular_coeff: 1.0,
            specular_power: 100.0,
            diffuse_coeff: 90.0,
            ambient_intensity: 0.2,
            tonemapping_coeff: 0.25,
        }
    }
}

impl FragmentShader for PhongFragmentShader {
    type Input = PhongVarying;

    fn shade(&self, input: &PhongVarying) -> Vec4 {
        let norm = input.norm.normalize_or_zero();
        let to_light = self.light_pos - input.world_pos;
        let light_dir = to_light.normalize_or_zero();
        let view_dir = (self.camera_pos - input.world_pos).normalize_or_zero();
        let half = (light_dir + view_dir).normalize_or_zero();

        let dist_sq = to_light.length_squared().max(f32::EPSILON);
        let diffuse = norm.dot(light_dir).max(0.0) / dist_sq;
        let specular = half.dot(norm).max(0.0).powf(self.specular_power);
        let intensity = self.ambient_intensity
            + self.diffuse_coeff * diffuse
            + self.specular_coeff * specular;
        let mapped = 1.0 - (-intensity * self.tonemapping_coeff).exp();

        (self.light_color.truncate() * mapped).extend(self.light_color.w)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/phong.rs"]
mod tests;
