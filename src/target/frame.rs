use std::sync::atomic::{AtomicU32, Ordering};

use crate::{
    foundation::core::{Rgba8, Viewport},
    foundation::error::RasterResult,
    target::lock::PixelLockTable,
};

/// Depth value meaning "nothing drawn yet" (far plane).
pub const CLEAR_DEPTH: f32 = 1.0;

/// Color + depth buffer pair with its pixel lock table.
///
/// Coordinates are in screen space with row 0 at the bottom; storage is top row first, so the
/// raw buffers can be handed to image encoders and framebuffer devices as-is.
///
/// Every cell is an atomic word (packed [`Rgba8`] / `f32` bits). Fragment writers take the
/// pixel lock around the depth compare and both stores; unlocked reads are allowed anywhere and
/// may observe a stale value.
pub struct FrameTarget {
    viewport: Viewport,
    color: Box<[AtomicU32]>,
    depth: Box<[AtomicU32]>,
    locks: PixelLockTable,
}

impl FrameTarget {
    /// Allocate a cleared target.
    pub fn new(width: u32, height: u32) -> RasterResult<Self> {
        let viewport = Viewport::new(width, height)?;
        let area = viewport.area();
        Ok(Self {
            viewport,
            color: (0..area)
                .map(|_| AtomicU32::new(Rgba8::TRANSPARENT.to_bits()))
                .collect(),
            depth: (0..area)
                .map(|_| AtomicU32::new(CLEAR_DEPTH.to_bits()))
                .collect(),
            locks: PixelLockTable::new(viewport),
        })
    }

    /// Dimensions and NDC mappings.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.viewport.height
    }

    /// Lock table sized to this target.
    pub fn locks(&self) -> &PixelLockTable {
        &self.locks
    }

    /// Reset color to transparent black and depth to [`CLEAR_DEPTH`].
    ///
    /// Must not race with a draw; the rasterizer only touches the target inside `draw`.
    pub fn clear(&self) {
        let color = Rgba8::TRANSPARENT.to_bits();
        let depth = CLEAR_DEPTH.to_bits();
        for (c, d) in self.color.iter().zip(self.depth.iter()) {
            c.store(color, Ordering::Relaxed);
            d.store(depth, Ordering::Relaxed);
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        let row = (self.viewport.height - 1 - y) as usize;
        row * self.viewport.width as usize + x as usize
    }

    /// Stored depth at `(x, y)`.
    pub fn depth(&self, x: u32, y: u32) -> f32 {
        f32::from_bits(self.depth[self.offset(x, y)].load(Ordering::Relaxed))
    }

    /// Stored color at `(x, y)`.
    pub fn color(&self, x: u32, y: u32) -> Rgba8 {
        Rgba8::from_bits(self.color[self.offset(x, y)].load(Ordering::Relaxed))
    }

    /// Write color and depth without testing.
    ///
    /// Callers either hold the lock for `(x, y)` or have exclusive use of the target.
    pub fn store(&self, x: u32, y: u32, color: Rgba8, depth: f32) {
        let offset = self.offset(x, y);
        self.color[offset].store(color.to_bits(), Ordering::Relaxed);
        self.depth[offset].store(depth.to_bits(), Ordering::Relaxed);
    }

    /// Write only the color (used by the wireframe pass, which ignores depth).
    pub fn store_color(&self, x: u32, y: u32, color: Rgba8) {
        self.color[self.offset(x, y)].store(color.to_bits(), Ordering::Relaxed);
    }

    /// Tightly packed RGBA8 bytes, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.color.len() * 4);
        for c in self.color.iter() {
            let px = Rgba8::from_bits(c.load(Ordering::Relaxed));
            out.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
        out
    }

    /// Tightly packed BGRA8 bytes, top row first (Linux framebuffer layout).
    pub fn to_bgra8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.color.len() * 4);
        for c in self.color.iter() {
            out.extend_from_slice(&Rgba8::from_bits(c.load(Ordering::Relaxed)).to_bgra());
        }
        out
    }

    /// Copy of the color buffer as an `image` buffer.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let (w, h) = (self.viewport.width, self.viewport.height);
        image::RgbaImage::from_fn(w, h, |col, row| {
            let px = self.color(col, h - 1 - row);
            image::Rgba([px.r, px.g, px.b, px.a])
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/target/frame.rs"]
mod tests;
