//! softraster is a multi-threaded CPU triangle rasterizer.
//!
//! A frame is drawn by a [`Rasterizer`] in three stages, each split into batches that run on a
//! long-lived [`WorkerPool`]:
//!
//! - vertex transform through a caller-supplied [`VertexShader`]
//! - triangle setup: W-sign rejection, culling, bounding box scan, perspective-correct weights
//! - fragment shading through a [`FragmentShader`], depth-tested under per-pixel-block locks
//!
//! Frames land in a [`FrameTarget`]; a [`Device`] pairs one with a [`FrameSink`] for output.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod pool;
mod raster;
mod shader;
mod stats;
mod target;

pub use crate::foundation::core::{ClipConvention, Culling, Rgba8, Viewport, Winding};
pub use crate::foundation::error::{RasterError, RasterResult};
pub use crate::foundation::math::{look_at, normal_matrix, projection_matrix};

pub use crate::assets::mesh::{Mesh, Vertex};
pub use crate::assets::texture::Texture;
pub use crate::config::{DEFAULT_BATCH_SIZE, RasterConfig};
pub use crate::pool::{Task, WorkerPool};
pub use crate::raster::pipeline::Rasterizer;
pub use crate::raster::wireframe::draw_wireframe;
pub use crate::shader::basic::{
    ColorShader, ColoredVertex, FlatShader, Passthrough, SolidColor,
};
pub use crate::shader::phong::{PhongFragmentShader, PhongVarying, PhongVertexShader};
pub use crate::shader::textured::{TexturedShader, TexturedVarying};
pub use crate::shader::{FragmentShader, Interpolate, Varyings, VertexShader};
pub use crate::stats::{FrameStats, FrameTimings};
pub use crate::target::Device;
pub use crate::target::frame::{CLEAR_DEPTH, FrameTarget};
pub use crate::target::lock::{PIXELS_PER_LOCK, PixelGuard, PixelLockTable};
pub use crate::target::sink::{FbDevSink, FrameSink, MemorySink, NullSink, PngSink, RawBgraSink};

/// Re-export of the math crate used in every public signature.
pub use glam;
