//! Shader capabilities consumed by the pipeline, plus a few ready-made shaders.

pub(crate) mod basic;
pub(crate) mod phong;
pub(crate) mod textured;

use glam::{Vec2, Vec3, Vec4};

/// Weighted linear combination of three values, used for barycentric attribute interpolation.
///
/// Implemented for `f32`, the `glam` float vectors and arrays of interpolatable values; records
/// made of such fields get an implementation from [`interpolate_fields!`](crate::interpolate_fields).
pub trait Interpolate: Copy {
    /// `w[0] * a + w[1] * b + w[2] * c`.
    fn weighted(a: &Self, b: &Self, c: &Self, w: [f32; 3]) -> Self;
}

macro_rules! impl_interpolate_linear {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Interpolate for $ty {
                #[inline]
                fn weighted(a: &Self, b: &Self, c: &Self, w: [f32; 3]) -> Self {
                    *a * w[0] + *b * w[1] + *c * w[2]
                }
            }
        )+
    };
}

impl_interpolate_linear!(f32, Vec2, Vec3, Vec4);

impl<T: Interpolate, const N: usize> Interpolate for [T; N] {
    fn weighted(a: &Self, b: &Self, c: &Self, w: [f32; 3]) -> Self {
        std::array::from_fn(|i| T::weighted(&a[i], &b[i], &c[i], w))
    }
}

/// Implement [`Interpolate`] for a struct by interpolating each listed field.
///
/// Every field of the struct must be listed and must itself implement [`Interpolate`].
///
/// ```
/// use glam::{Vec3, Vec4};
///
/// #[derive(Clone, Copy)]
/// struct Lit {
///     pos: Vec4,
///     normal: Vec3,
/// }
///
/// softraster::interpolate_fields!(Lit { pos, normal });
/// ```
#[macro_export]
macro_rules! interpolate_fields {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::Interpolate for $ty {
            fn weighted(a: &Self, b: &Self, c: &Self, w: [f32; 3]) -> Self {
                Self {
                    $($field: $crate::Interpolate::weighted(&a.$field, &b.$field, &c.$field, w),)+
                }
            }
        }
    };
}

/// Output record of a vertex shader: a clip-space position plus interpolatable attributes.
pub trait Varyings: Interpolate + Send + Sync + 'static {
    /// Homogeneous clip-space position `(x, y, z, w)`.
    fn position(&self) -> Vec4;
}

/// Per-vertex stage: maps one input record to one [`Varyings`] record.
///
/// Per-frame parameters (matrices, camera) live in the shader value itself; mutate them between
/// frames through [`crate::Rasterizer::vertex_shader_mut`].
pub trait VertexShader: Send + Sync + 'static {
    /// Input vertex record.
    type Input: Send + Sync + 'static;
    /// Transformed vertex record.
    type Output: Varyings;

    /// Transform one vertex.
    fn shade(&self, input: &Self::Input) -> Self::Output;
}

/// Per-pixel stage: maps interpolated varyings to an RGBA color in `[0, 1]`.
pub trait FragmentShader: Send + Sync + 'static {
    /// Interpolated record type (the vertex shader's output).
    type Input: Varyings;

    /// Shade one fragment.
    fn shade(&self, input: &Self::Input) -> Vec4;
}

#[cfg(test)]
#[path = "../../tests/unit/shader/interpolate.rs"]
mod tests;
