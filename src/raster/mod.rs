//! The three-stage rasterization pipeline and the wireframe pass.

pub(crate) mod pipeline;
pub(crate) mod stages;
pub(crate) mod tasks;
pub(crate) mod wireframe;
