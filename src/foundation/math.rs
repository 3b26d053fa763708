use glam::{Mat4, Vec3, Vec4};

/// Right-handed perspective projection parameterized by the horizontal field of view.
///
/// Maps view-space depth `[-near, -far]` to NDC `[-1, 1]` and produces `w = -z_view`, so points
/// in front of the camera have positive `w` ([`crate::ClipConvention::PositiveW`]).
pub fn projection_matrix(horizontal_fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
    let cot_half_h = 1.0 / (horizontal_fov / 2.0).tan();
    let cot_half_v = cot_half_h * aspect_ratio;
    let depth_a = -(far + near) / (far - near);
    let depth_b = -2.0 * far * near / (far - near);

    Mat4::from_cols(
        Vec4::new(cot_half_h, 0.0, 0.0, 0.0),
        Vec4::new(0.0, cot_half_v, 0.0, 0.0),
        Vec4::new(0.0, 0.0, depth_a, -1.0),
        Vec4::new(0.0, 0.0, depth_b, 0.0),
    )
}

/// Right-handed view matrix looking from `eye` at `target`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}

/// Matrix for transforming normals: inverse transpose of the model matrix.
pub fn normal_matrix(model: Mat4) -> Mat4 {
    model.inverse().transpose()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
