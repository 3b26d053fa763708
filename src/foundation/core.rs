use glam::Vec4;

use crate::foundation::error::{RasterError, RasterResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Straight-alpha RGBA8 color as stored in the frame target.
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Transparent black, the frame clear color.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert a shader output (`[0, 1]` per channel, out-of-range values clamped) to RGBA8.
    pub fn from_unit(c: Vec4) -> Self {
        fn channel(v: f32) -> u8 {
            // NaN saturates to 0 in the float-to-int cast.
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self::new(channel(c.x), channel(c.y), channel(c.z), channel(c.w))
    }

    /// Convert to `[0, 1]` floating-point channels.
    pub fn to_unit(self) -> Vec4 {
        Vec4::new(
            f32::from(self.r),
            f32::from(self.g),
            f32::from(self.b),
            f32::from(self.a),
        ) / 255.0
    }

    /// Pack into the 32-bit storage word used by the frame target.
    pub const fn to_bits(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    /// Unpack a storage word produced by [`Rgba8::to_bits`].
    pub const fn from_bits(bits: u32) -> Self {
        let [r, g, b, a] = bits.to_le_bytes();
        Self::new(r, g, b, a)
    }

    /// Byte order expected by Linux framebuffer devices (`/dev/fb*`).
    pub const fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Screen dimensions plus the NDC <-> pixel mappings used by setup.
///
/// Pixel `(x, y)` has its center at NDC `(-1 + (2x + 1) / w, -1 + (2y + 1) / h)`; row 0 is the
/// bottom of the image.
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Build a viewport; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> RasterResult<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::validation("viewport width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width over height.
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// NDC x of the center of pixel column `x`.
    pub fn x_screen_to_ndc(self, x: i32) -> f32 {
        -1.0 + (2.0 * x as f32 + 1.0) / self.width as f32
    }

    /// NDC y of the center of pixel row `y`.
    pub fn y_screen_to_ndc(self, y: i32) -> f32 {
        -1.0 + (2.0 * y as f32 + 1.0) / self.height as f32
    }

    /// Pixel column whose center is nearest to NDC `x`.
    pub fn x_ndc_to_screen(self, x: f32) -> i32 {
        (-0.5 + self.width as f32 / 2.0 * (x + 1.0)).round() as i32
    }

    /// Pixel row whose center is nearest to NDC `y`.
    pub fn y_ndc_to_screen(self, y: f32) -> i32 {
        (-0.5 + self.height as f32 / 2.0 * (y + 1.0)).round() as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// 2D winding of a triangle after the perspective divide (NDC, y up).
pub enum Winding {
    /// Positive signed area.
    CounterClockwise,
    /// Negative signed area.
    Clockwise,
}

impl Winding {
    /// Classify from the determinant `dx1 * dy2 - dy1 * dx2` of the first two edges.
    pub fn from_determinant(det: f32) -> Self {
        if det > 0.0 {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Which triangle winding the setup stage drops.
pub enum Culling {
    /// Drop clockwise triangles (counter-clockwise front faces).
    #[default]
    Clockwise,
    /// Drop counter-clockwise triangles.
    CounterClockwise,
    /// Keep every triangle.
    None,
}

impl Culling {
    /// `true` when a triangle with `winding` must be dropped.
    pub fn culls(self, winding: Winding) -> bool {
        match self {
            Self::Clockwise => winding == Winding::Clockwise,
            Self::CounterClockwise => winding == Winding::CounterClockwise,
            Self::None => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Sign of clip-space `w` for points in front of the camera.
///
/// Setup rejects a whole triangle as soon as one vertex has a `w` of the wrong sign; this is the
/// only clipping the pipeline performs.
pub enum ClipConvention {
    /// `w > 0` in front of the camera (OpenGL-style projection, `glam` matrices).
    #[default]
    PositiveW,
    /// `w < 0` in front of the camera.
    NegativeW,
}

impl ClipConvention {
    /// `true` when a vertex with this `w` lies behind the camera (or on its plane).
    pub fn rejects(self, w: f32) -> bool {
        match self {
            Self::PositiveW => w <= 0.0 || w.is_nan(),
            Self::NegativeW => w >= 0.0 || w.is_nan(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
