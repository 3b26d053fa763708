use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    core::{ClipConvention, Culling},
    error::{RasterError, RasterResult},
};

/// Default number of items per submitted task, for every stage.
pub const DEFAULT_BATCH_SIZE: usize = 2048;

fn default_threads() -> usize {
    1
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rasterizer construction parameters.
///
/// Every field has a default, so `{}` is a valid JSON configuration.
pub struct RasterConfig {
    /// Worker threads. `1` runs every stage on the calling thread without locks.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Which winding setup drops.
    #[serde(default)]
    pub culling: Culling,
    /// Sign of `w` in front of the camera.
    #[serde(default)]
    pub clip_convention: ClipConvention,
    /// Vertices per transform task.
    #[serde(default = "default_batch_size")]
    pub vertex_batch_size: usize,
    /// Triangles per setup task.
    #[serde(default = "default_batch_size")]
    pub triangle_batch_size: usize,
    /// Fragments per shade task.
    #[serde(default = "default_batch_size")]
    pub fragment_batch_size: usize,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            culling: Culling::default(),
            clip_convention: ClipConvention::default(),
            vertex_batch_size: DEFAULT_BATCH_SIZE,
            triangle_batch_size: DEFAULT_BATCH_SIZE,
            fragment_batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl RasterConfig {
    /// Default configuration with `threads` workers.
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads,
            ..Self::default()
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> RasterResult<()> {
        if self.threads == 0 {
            return Err(RasterError::validation("threads must be >= 1"));
        }
        for (name, size) in [
            ("vertex_batch_size", self.vertex_batch_size),
            ("triangle_batch_size", self.triangle_batch_size),
            ("fragment_batch_size", self.fragment_batch_size),
        ] {
            if size == 0 {
                return Err(RasterError::validation(format!("{name} must be >= 1")));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> RasterResult<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| RasterError::serde(format!("parse raster config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> RasterResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RasterError::validation(format!("open raster config '{}': {e}", path.display()))
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            RasterError::serde(format!("parse raster config '{}': {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
