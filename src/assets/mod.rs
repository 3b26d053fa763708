//! Mesh and texture loading.

pub(crate) mod mesh;
pub(crate) mod texture;
