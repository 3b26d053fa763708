use std::path::Path;

use anyhow::Context;
use glam::{Vec2, Vec4};

use crate::foundation::error::{RasterError, RasterResult};

/// Decoded RGBA texture with nearest-neighbour sampling.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Vec4>,
}

impl Texture {
    /// Decode any image format supported by `image` (binary PPM included).
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> RasterResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).with_context(|| format!("decode texture '{}'", path.display()))?;
        let texture = Self::from_image(img.to_rgba8());
        if texture.texels.is_empty() {
            return Err(RasterError::asset(format!(
                "texture '{}' has no pixels",
                path.display()
            )));
        }
        tracing::debug!(width = texture.width, height = texture.height, "loaded texture");
        Ok(texture)
    }

    /// Convert 8-bit RGBA pixels to `[0, 1]` texels.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let texels = img
            .pixels()
            .map(|p| Vec4::from_array(p.0.map(f32::from)) / 255.0)
            .collect();
        Self {
            width,
            height,
            texels,
        }
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest texel for `uv`, with `v = 0` at the bottom row. Out-of-range coordinates clamp
    /// to the border; an empty texture samples as transparent black.
    pub fn fetch(&self, uv: Vec2) -> Vec4 {
        if self.texels.is_empty() {
            return Vec4::ZERO;
        }
        let x = texel_coord(uv.x, self.width);
        let y = texel_coord(1.0 - uv.y, self.height);
        self.texels[y * self.width as usize + x]
    }
}

fn texel_coord(t: f32, size: u32) -> usize {
    let max = size.saturating_sub(1) as f32;
    // `as` saturates and maps NaN to 0.
    (t * size as f32).round().clamp(0.0, max) as usize
}

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
