use glam::{Mat4, Vec4};

use crate::{
    assets::mesh::Vertex,
    shader::{FragmentShader, Varyings, VertexShader},
};

/// Identity vertex shader: the input records already are clip-space varyings.
#[derive(Clone, Copy, Debug)]
pub struct Passthrough<V>(std::marker::PhantomData<fn() -> V>);

impl<V> Passthrough<V> {
    /// Build the shader.
    pub fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<V> Default for Passthrough<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Varyings> VertexShader for Passthrough<V> {
    type Input = V;
    type Output = V;

    fn shade(&self, input: &V) -> V {
        *input
    }
}

impl Varyings for Vec4 {
    fn position(&self) -> Vec4 {
        *self
    }
}

/// Projects mesh vertices and paints every fragment with one color.
#[derive(Clone, Copy, Debug)]
pub struct FlatShader {
    /// Combined projection * view * model matrix.
    pub mvp: Mat4,
    /// RGBA color in `[0, 1]`.
    pub color: Vec4,
}

impl Default for FlatShader {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            color: Vec4::ONE,
        }
    }
}

impl VertexShader for FlatShader {
    type Input = Vertex;
    type Output = Vec4;

    fn shade(&self, input: &Vertex) -> Vec4 {
        self.mvp * input.pos.extend(1.0)
    }
}

/// Constant-color fragment shader over any varyings.
#[derive(Clone, Copy, Debug)]
pub struct SolidColor<V> {
    /// RGBA color in `[0, 1]`.
    pub color: Vec4,
    _varyings: std::marker::PhantomData<fn(V)>,
}

impl<V> SolidColor<V> {
    /// Shader returning `color` for every fragment.
    pub fn new(color: Vec4) -> Self {
        Self {
            color,
            _varyings: std::marker::PhantomData,
        }
    }
}

impl<V: Varyings> FragmentShader for SolidColor<V> {
    type Input = V;

    fn shade(&self, _input: &V) -> Vec4 {
        self.color
    }
}

impl FragmentShader for FlatShader {
    type Input = Vec4;

    fn shade(&self, _input: &Vec4) -> Vec4 {
        self.color
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Clip position plus an interpolated RGBA color.
pub struct ColoredVertex {
    /// Clip-space position.
    pub pos: Vec4,
    /// RGBA color in `[0, 1]`.
    pub color: Vec4,
}

crate::interpolate_fields!(ColoredVertex { pos, color });

impl Varyings for ColoredVertex {
    fn position(&self) -> Vec4 {
        self.pos
    }
}

/// Gouraud-style shader: per-vertex colors interpolated perspective-correctly.
#[derive(Clone, Copy, Debug)]
pub struct ColorShader {
    /// Combined projection * view * model matrix.
    pub mvp: Mat4,
}

impl Default for ColorShader {
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
        }
    }
}

impl VertexShader for ColorShader {
    type Input = Vertex;
    type Output = ColoredVertex;

    fn shade(&self, input: &Vertex) -> ColoredVertex {
        ColoredVertex {
            pos: self.mvp * input.pos.extend(1.0),
            color: input.color,
        }
    }
}

impl FragmentShader for ColorShader {
    type Input = ColoredVertex;

    fn shade(&self, input: &ColoredVertex) -> Vec4 {
        input.color
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/basic.rs"]
mod tests;
