use std::{path::Path, sync::Arc};

use anyhow::Context;
use glam::{Vec2, Vec3, Vec4};

use crate::foundation::error::{RasterError, RasterResult};

#[derive(Clone, Copy, Debug, PartialEq)]
/// One mesh vertex as loaded from disk.
pub struct Vertex {
    /// Object-space position.
    pub pos: Vec3,
    /// Texture coordinate.
    pub tex: Vec2,
    /// Unit normal, or zero when the source has none.
    pub norm: Vec3,
    /// RGBA color in `[0, 1]`.
    pub color: Vec4,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            tex: Vec2::ZERO,
            norm: Vec3::ZERO,
            color: Vec4::ONE,
        }
    }
}

impl Vertex {
    /// White vertex at `pos` with no texture coordinate or normal.
    pub fn at(pos: Vec3) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }
}

/// Indexed triangle list.
///
/// Both arrays are reference counted so a frame can hand them to worker threads without copying.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex records.
    pub vertices: Arc<[Vertex]>,
    /// Three indices per triangle.
    pub indices: Arc<[u32]>,
}

impl Mesh {
    /// Build a mesh, checking the index count and range.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> RasterResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(RasterError::validation(format!(
                "mesh index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(RasterError::validation(format!(
                "mesh index {bad} out of range for {} vertices",
                vertices.len()
            )));
        }
        Ok(Self {
            vertices: vertices.into(),
            indices: indices.into(),
        })
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Read and parse a Wavefront OBJ file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_obj(path: impl AsRef<Path>) -> RasterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read obj file '{}'", path.display()))?;
        let mesh = Self::parse_obj(&text)?;
        tracing::debug!(
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            "loaded obj mesh"
        );
        Ok(mesh)
    }

    /// Parse OBJ text.
    ///
    /// Supports `v`, `vt`, `vn` and `f` records; face corners may be `v`, `v/t`, `v//n` or
    /// `v/t/n` with one-based or negative (relative) indices. Polygons are fan-triangulated and
    /// every face corner becomes its own vertex. Other records are ignored.
    pub fn parse_obj(text: &str) -> RasterResult<Self> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut tex_coords: Vec<Vec2> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();
        let mut vertices: Vec<Vertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();

        for (line_idx, line) in text.lines().enumerate() {
            let line_no = line_idx + 1;
            let bad = |what: &str| {
                RasterError::asset(format!("obj line {line_no}: {what}: '{}'", line.trim()))
            };
            let mut words = line.split_whitespace();
            match words.next() {
                Some("v") => {
                    let [x, y, z] = parse_floats(&mut words).ok_or_else(|| bad("bad position"))?;
                    positions.push(Vec3::new(x, y, z));
                }
                Some("vt") => {
                    let [u, v] = parse_floats(&mut words).ok_or_else(|| bad("bad tex coord"))?;
                    tex_coords.push(Vec2::new(u, v));
                }
                Some("vn") => {
                    let [x, y, z] = parse_floats(&mut words).ok_or_else(|| bad("bad normal"))?;
                    normals.push(Vec3::new(x, y, z).normalize_or_zero());
                }
                Some("f") => {
                    let first = vertices.len();
                    for corner in words {
                        let vertex = parse_corner(corner, &positions, &tex_coords, &normals)
                            .ok_or_else(|| bad("bad face corner"))?;
                        vertices.push(vertex);
                    }
                    let corners = vertices.len() - first;
                    if corners < 3 {
                        return Err(bad("face needs at least 3 corners"));
                    }
                    let base = u32::try_from(first).map_err(|_| bad("too many vertices"))?;
                    for i in 1..(corners as u32 - 1) {
                        indices.extend_from_slice(&[base, base + i, base + i + 1]);
                    }
                }
                _ => {}
            }
        }

        Self::new(vertices, indices)
    }
}

fn parse_floats<'a, const N: usize>(words: &mut impl Iterator<Item = &'a str>) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    for slot in &mut out {
        *slot = words.next()?.parse().ok()?;
    }
    Some(out)
}

/// One-based or negative OBJ index into a list of `len` items.
fn resolve_index(token: &str, len: usize) -> Option<usize> {
    let index: i64 = token.parse().ok()?;
    let resolved = match index {
        0 => return None,
        i if i > 0 => i - 1,
        i => len as i64 + i,
    };
    (0..len as i64).contains(&resolved).then_some(resolved as usize)
}

fn parse_corner(
    corner: &str,
    positions: &[Vec3],
    tex_coords: &[Vec2],
    normals: &[Vec3],
) -> Option<Vertex> {
    let mut parts = corner.split('/');
    let pos = positions[resolve_index(parts.next()?, positions.len())?];
    let mut vertex = Vertex::at(pos);

    match parts.next() {
        None => return Some(vertex),
        Some("") => {}
        Some(t) => vertex.tex = tex_coords[resolve_index(t, tex_coords.len())?],
    }
    match parts.next() {
        None => {}
        Some(n) => vertex.norm = normals[resolve_index(n, normals.len())?],
    }
    if parts.next().is_some() {
        return None;
    }
    Some(vertex)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/mesh.rs"]
mod tests;
