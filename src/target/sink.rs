use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{foundation::error::RasterResult, target::frame::FrameTarget};

/// Destination for finished frames.
pub trait FrameSink: Send {
    /// Push the current color buffer of `frame` out.
    fn present(&mut self, frame: &FrameTarget) -> RasterResult<()>;
}

/// Writes every presented frame to one PNG file, replacing the previous one.
#[derive(Clone, Debug)]
pub struct PngSink {
    path: PathBuf,
}

impl PngSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSink for PngSink {
    fn present(&mut self, frame: &FrameTarget) -> RasterResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            &self.path,
            &frame.to_rgba8(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", self.path.display()))?;
        Ok(())
    }
}

/// Streams raw BGRA8 frames (top row first) into any writer.
pub struct RawBgraSink<W> {
    writer: W,
}

impl<W: Write + Send> RawBgraSink<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> FrameSink for RawBgraSink<W> {
    fn present(&mut self, frame: &FrameTarget) -> RasterResult<()> {
        self.writer.write_all(&frame.to_bgra8())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Linux framebuffer device (`/dev/fb0`): reopened per frame so each write starts at the top.
#[derive(Clone, Debug)]
pub struct FbDevSink {
    path: PathBuf,
}

impl FbDevSink {
    /// Sink for the device node at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FrameSink for FbDevSink {
    fn present(&mut self, frame: &FrameTarget) -> RasterResult<()> {
        let mut dev = std::fs::OpenOptions::new()
            .write(true)
            .open(&self.path)
            .with_context(|| format!("open framebuffer '{}'", self.path.display()))?;
        dev.write_all(&frame.to_bgra8())
            .with_context(|| format!("write framebuffer '{}'", self.path.display()))?;
        Ok(())
    }
}

/// Keeps the most recent frame in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    /// Last presented frame.
    pub last: Option<image::RgbaImage>,
    /// Number of frames presented.
    pub presented: u64,
}

impl FrameSink for MemorySink {
    fn present(&mut self, frame: &FrameTarget) -> RasterResult<()> {
        self.last = Some(frame.to_rgba_image());
        self.presented += 1;
        Ok(())
    }
}

/// Discards frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &FrameTarget) -> RasterResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/target/sink.rs"]
mod tests;
