pub(crate) mod frame;
pub(crate) mod lock;
pub(crate) mod sink;

use std::sync::Arc;

use crate::foundation::error::RasterResult;
use frame::FrameTarget;
use sink::FrameSink;

/// Output device: a shared [`FrameTarget`] plus the sink that frames are flushed to.
///
/// The rasterizer keeps its own handle to the target; the device owns clearing and flushing.
pub struct Device {
    target: Arc<FrameTarget>,
    sink: Box<dyn FrameSink>,
}

impl Device {
    /// Allocate a `width x height` target that flushes into `sink`.
    pub fn new(width: u32, height: u32, sink: impl FrameSink + 'static) -> RasterResult<Self> {
        Ok(Self {
            target: Arc::new(FrameTarget::new(width, height)?),
            sink: Box::new(sink),
        })
    }

    /// Shared handle to the color/depth target.
    pub fn target(&self) -> &Arc<FrameTarget> {
        &self.target
    }

    /// Clear color to transparent black and depth to the far plane.
    pub fn clear(&self) {
        self.target.clear();
    }

    /// Present the current color buffer to the sink.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn flush(&mut self) -> RasterResult<()> {
        self.sink.present(&self.target)
    }

    /// Swap the sink, returning the previous one.
    pub fn replace_sink(&mut self, sink: impl FrameSink + 'static) -> Box<dyn FrameSink> {
        std::mem::replace(&mut self.sink, Box::new(sink))
    }
}
