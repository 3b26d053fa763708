//! Per-item stage kernels shared by the threaded and the single-thread paths.

use glam::Vec3;

use crate::{
    foundation::core::{ClipConvention, Culling, Rgba8, Viewport, Winding},
    shader::{FragmentShader, Interpolate, Varyings, VertexShader},
    stats::FrameStats,
    target::frame::FrameTarget,
};

/// Bounding boxes are clamped this far inside `[-1, 1]` so they never leave the screen.
const NDC_EDGE_EPSILON: f32 = 1e-6;

/// A pixel covered by a triangle, waiting for the depth test and fragment shader.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fragment<V> {
    pub(crate) x: u32,
    pub(crate) y: u32,
    /// NDC depth, affine in screen space.
    pub(crate) depth: f32,
    /// Perspective-corrected weight of `vertices[1]`.
    pub(crate) b: f32,
    /// Perspective-corrected weight of `vertices[2]`.
    pub(crate) c: f32,
    pub(crate) vertices: [V; 3],
}

impl<V: Interpolate> Fragment<V> {
    pub(crate) fn weights(&self) -> [f32; 3] {
        [1.0 - self.b - self.c, self.b, self.c]
    }

    pub(crate) fn interpolate(&self) -> V {
        let [v0, v1, v2] = &self.vertices;
        V::weighted(v0, v1, v2, self.weights())
    }
}

/// Frame-constant inputs of triangle setup.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SetupParams {
    pub(crate) culling: Culling,
    pub(crate) clip_convention: ClipConvention,
    pub(crate) viewport: Viewport,
}

pub(crate) fn transform<VS: VertexShader>(
    shader: &VS,
    inputs: &[VS::Input],
    out: &mut Vec<VS::Output>,
) {
    out.extend(inputs.iter().map(|v| shader.shade(v)));
}

/// Screen-space triangle after the perspective divide, with its edge vectors from vertex 0.
pub(crate) struct ScreenTriangle {
    pub(crate) ndc: [Vec3; 3],
    pub(crate) w: [f32; 3],
    dx1: f32,
    dy1: f32,
    dx2: f32,
    dy2: f32,
    pub(crate) det: f32,
}

/// Outcome of the per-triangle checks that run before any pixel is visited.
pub(crate) enum Prepared {
    Visible(ScreenTriangle),
    WRejected,
    Degenerate,
    Culled,
}

pub(crate) fn prepare<V: Varyings>(params: &SetupParams, tri: &[V; 3]) -> Prepared {
    let clip = [tri[0].position(), tri[1].position(), tri[2].position()];
    if clip.iter().any(|p| params.clip_convention.rejects(p.w)) {
        return Prepared::WRejected;
    }

    let ndc = clip.map(|p| p.truncate() / p.w);
    let dx1 = ndc[1].x - ndc[0].x;
    let dy1 = ndc[1].y - ndc[0].y;
    let dx2 = ndc[2].x - ndc[0].x;
    let dy2 = ndc[2].y - ndc[0].y;
    let det = dx1 * dy2 - dy1 * dx2;
    if det == 0.0 || !det.is_finite() {
        return Prepared::Degenerate;
    }
    if params.culling.culls(Winding::from_determinant(det)) {
        return Prepared::Culled;
    }

    Prepared::Visible(ScreenTriangle {
        ndc,
        w: clip.map(|p| p.w),
        dx1,
        dy1,
        dx2,
        dy2,
        det,
    })
}

impl ScreenTriangle {
    /// Inclusive pixel bounds `(x_min, x_max, y_min, y_max)`, clipped to the viewport.
    pub(crate) fn pixel_bounds(&self, viewport: Viewport) -> (i32, i32, i32, i32) {
        let lo = -1.0 + NDC_EDGE_EPSILON;
        let hi = 1.0 - NDC_EDGE_EPSILON;
        let xs = self.ndc.map(|p| p.x);
        let ys = self.ndc.map(|p| p.y);
        let min_x = xs[0].min(xs[1]).min(xs[2]).clamp(lo, hi);
        let max_x = xs[0].max(xs[1]).max(xs[2]).clamp(lo, hi);
        let min_y = ys[0].min(ys[1]).min(ys[2]).clamp(lo, hi);
        let max_y = ys[0].max(ys[1]).max(ys[2]).clamp(lo, hi);
        (
            viewport.x_ndc_to_screen(min_x),
            viewport.x_ndc_to_screen(max_x),
            viewport.y_ndc_to_screen(min_y),
            viewport.y_ndc_to_screen(max_y),
        )
    }

    /// Screen-space barycentrics `(a0, b0, c0)` of the NDC point `(px, py)`.
    pub(crate) fn barycentric(&self, px: f32, py: f32) -> [f32; 3] {
        let dx = px - self.ndc[0].x;
        let dy = py - self.ndc[0].y;
        let det1 = dx * self.dy2 - dy * self.dx2;
        let det2 = self.dx1 * dy - self.dy1 * dx;
        let b0 = det1 / self.det;
        let c0 = det2 / self.det;
        [1.0 - b0 - c0, b0, c0]
    }
}

/// Emit one fragment per pixel center inside `tri`.
pub(crate) fn setup_triangle<V: Varyings>(
    params: &SetupParams,
    tri: [V; 3],
    out: &mut Vec<Fragment<V>>,
    stats: &mut FrameStats,
) {
    let screen = match prepare(params, &tri) {
        Prepared::Visible(screen) => screen,
        Prepared::WRejected => {
            stats.triangles_w_rejected += 1;
            return;
        }
        Prepared::Degenerate => {
            stats.triangles_degenerate += 1;
            return;
        }
        Prepared::Culled => {
            stats.triangles_culled += 1;
            return;
        }
    };

    let viewport = params.viewport;
    let (x_min, x_max, y_min, y_max) = screen.pixel_bounds(viewport);
    let [z0, z1, z2] = screen.ndc.map(|p| p.z);
    let [w0, w1, w2] = screen.w;

    for y in y_min..=y_max {
        let py = viewport.y_screen_to_ndc(y);
        for x in x_min..=x_max {
            let px = viewport.x_screen_to_ndc(x);
            let [a0, b0, c0] = screen.barycentric(px, py);
            if a0 < 0.0 || b0 < 0.0 || c0 < 0.0 {
                continue;
            }

            let depth = a0 * z0 + b0 * z1 + c0 * z2;
            let a = a0 / w0;
            let b = b0 / w1;
            let c = c0 / w2;
            let sum = a + b + c;

            out.push(Fragment {
                x: x as u32,
                y: y as u32,
                depth,
                b: b / sum,
                c: c / sum,
                vertices: tri,
            });
            stats.fragments_emitted += 1;
        }
    }
}

/// Depth-test, shade and store one fragment.
///
/// With `locked` the store happens under the pixel's lock after a second depth test; without
/// it the caller must have exclusive use of `target`.
pub(crate) fn shade_fragment<FS: FragmentShader>(
    shader: &FS,
    target: &FrameTarget,
    fragment: &Fragment<FS::Input>,
    locked: bool,
    stats: &mut FrameStats,
) {
    let (x, y) = (fragment.x, fragment.y);
    // Unlocked read: may be stale, only used to skip work early.
    if !passes_depth(fragment.depth, target.depth(x, y)) {
        return;
    }

    let input = fragment.interpolate();

    let _guard = locked.then(|| target.locks().lock(x, y));
    if !passes_depth(fragment.depth, target.depth(x, y)) {
        return;
    }
    let color = Rgba8::from_unit(shader.shade(&input));
    target.store(x, y, color, fragment.depth);
    stats.fragments_written += 1;
}

/// Closer (or equal) wins; NaN never passes.
fn passes_depth(depth: f32, stored: f32) -> bool {
    depth <= stored
}

#[cfg(test)]
#[path = "../../tests/unit/raster/stages.rs"]
mod tests;
