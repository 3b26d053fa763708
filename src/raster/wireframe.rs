use glam::{Vec2, Vec4};

use crate::{
    foundation::core::{ClipConvention, Rgba8, Viewport},
    foundation::error::{RasterError, RasterResult},
    shader::Varyings,
    target::frame::FrameTarget,
};

/// Outline every triangle of already transformed `vertices` with 1-pixel lines.
///
/// Runs on the calling thread outside the pipeline: no depth test, no pixel locks, color only.
/// Triangles with a vertex behind the camera (per `clip_convention`) are skipped whole.
pub fn draw_wireframe<V: Varyings>(
    target: &FrameTarget,
    vertices: &[V],
    indices: &[u32],
    color: Vec4,
    clip_convention: ClipConvention,
) -> RasterResult<()> {
    if indices.len() % 3 != 0 {
        return Err(RasterError::validation(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        )));
    }
    if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
        return Err(RasterError::validation(format!(
            "index {bad} out of range for {} vertices",
            vertices.len()
        )));
    }

    let viewport = target.viewport();
    let color = Rgba8::from_unit(color);
    for tri in indices.chunks_exact(3) {
        let clip = [0, 1, 2].map(|i| vertices[tri[i] as usize].position());
        if clip.iter().any(|p| clip_convention.rejects(p.w)) {
            continue;
        }
        let screen = clip.map(|p| to_screen(viewport, p));
        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            draw_line(target, screen[a], screen[b], color);
        }
    }
    Ok(())
}

/// Continuous screen position whose integer part is the pixel `Viewport` maps the NDC point to.
fn to_screen(viewport: Viewport, clip: Vec4) -> Vec2 {
    let ndc = clip.truncate().truncate() / clip.w;
    Vec2::new(
        -0.5 + viewport.width as f32 / 2.0 * (ndc.x + 1.0),
        -0.5 + viewport.height as f32 / 2.0 * (ndc.y + 1.0),
    )
}

fn draw_line(target: &FrameTarget, from: Vec2, to: Vec2, color: Rgba8) {
    let max = Vec2::new(target.width() as f32 - 1.0, target.height() as f32 - 1.0);
    let Some((from, to)) = clip_segment(from, to, max) else {
        return;
    };

    let (mut x0, mut y0) = (from.x.round() as i32, from.y.round() as i32);
    let (x1, y1) = (to.x.round() as i32, to.y.round() as i32);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        target.store_color(x0 as u32, y0 as u32, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Liang-Barsky clip of a segment to `[0, max.x] x [0, max.y]`.
fn clip_segment(from: Vec2, to: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    if !from.is_finite() || !to.is_finite() {
        return None;
    }
    let d = to - from;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in [
        (-d.x, from.x),
        (d.x, max.x - from.x),
        (-d.y, from.y),
        (d.y, max.y - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((from + d * t0, from + d * t1))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/wireframe.rs"]
mod tests;
