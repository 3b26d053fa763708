use std::sync::Arc;

use crate::{
    assets::mesh::{Mesh, Vertex},
    config::RasterConfig,
    foundation::error::{RasterError, RasterResult},
    pool::WorkerPool,
    raster::{
        stages::{self, SetupParams},
        tasks::{StageTask, WorkerScratch},
    },
    shader::{FragmentShader, VertexShader},
    stats::FrameStats,
    target::frame::FrameTarget,
};

/// Batched triangle rasterizer drawing into a shared [`FrameTarget`].
///
/// Each [`draw`](Self::draw) runs three stages, each fully parallel and separated by a
/// completion barrier: vertex transform, triangle setup (one fragment arena per worker), and
/// fragment shading with per-pixel-block locks. With `threads == 1` the same kernels run on the
/// calling thread, without a pool and without locks.
pub struct Rasterizer<VS: VertexShader, FS: FragmentShader<Input = VS::Output>> {
    config: RasterConfig,
    target: Arc<FrameTarget>,
    vertex_shader: Arc<VS>,
    fragment_shader: Arc<FS>,
    pool: Option<WorkerPool<StageTask<VS, FS>>>,
    transformed: Arc<Vec<VS::Output>>,
    spare_batches: Vec<Vec<VS::Output>>,
    gathered: Vec<(usize, Vec<VS::Output>)>,
    local: WorkerScratch<VS::Output>,
}

impl<VS, FS> Rasterizer<VS, FS>
where
    VS: VertexShader,
    FS: FragmentShader<Input = VS::Output>,
{
    /// Validate `config` and start its worker threads.
    pub fn new(
        config: RasterConfig,
        target: Arc<FrameTarget>,
        vertex_shader: VS,
        fragment_shader: FS,
    ) -> RasterResult<Self> {
        config.validate()?;
        let pool = if config.threads > 1 {
            let states = (0..config.threads).map(|_| WorkerScratch::default()).collect();
            Some(WorkerPool::new(states)?)
        } else {
            None
        };

        Ok(Self {
            config,
            target,
            vertex_shader: Arc::new(vertex_shader),
            fragment_shader: Arc::new(fragment_shader),
            pool,
            transformed: Arc::new(Vec::new()),
            spare_batches: Vec::new(),
            gathered: Vec::new(),
            local: WorkerScratch::default(),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Target every draw writes into.
    pub fn target(&self) -> &Arc<FrameTarget> {
        &self.target
    }

    /// Current vertex shader.
    pub fn vertex_shader(&self) -> &VS {
        &self.vertex_shader
    }

    /// Current fragment shader.
    pub fn fragment_shader(&self) -> &FS {
        &self.fragment_shader
    }

    /// Draw indexed triangles: three indices per triangle, each `< vertices.len()`.
    ///
    /// Fragments are depth-tested against what the target already holds; clearing between
    /// frames is the caller's job.
    #[tracing::instrument(
        skip_all,
        fields(vertices = vertices.len(), triangles = indices.len() / 3, threads = self.config.threads)
    )]
    pub fn draw(
        &mut self,
        vertices: &Arc<[VS::Input]>,
        indices: &Arc<[u32]>,
    ) -> RasterResult<FrameStats> {
        validate_draw(vertices.len(), indices)?;

        let params = SetupParams {
            culling: self.config.culling,
            clip_convention: self.config.clip_convention,
            viewport: self.target.viewport(),
        };
        let result = if self.pool.is_some() {
            self.draw_parallel(vertices, indices, params)
        } else {
            self.draw_serial(vertices, indices, params);
            Ok(())
        };

        let mut stats = self.finish_frame();
        stats.vertices = vertices.len();
        stats.triangles = indices.len() / 3;
        result?;

        tracing::debug!(
            fragments_emitted = stats.fragments_emitted,
            fragments_written = stats.fragments_written,
            culled = stats.triangles_culled,
            w_rejected = stats.triangles_w_rejected,
            degenerate = stats.triangles_degenerate,
            "frame drawn"
        );
        Ok(stats)
    }

    fn draw_serial(&mut self, vertices: &[VS::Input], indices: &[u32], params: SetupParams) {
        // A panicking shader on a previous frame may have left data behind.
        let transformed = Arc::make_mut(&mut self.transformed);
        transformed.clear();
        stages::transform(&*self.vertex_shader, vertices, transformed);

        let scratch = &mut self.local;
        scratch.fragments.clear();
        for tri in indices.chunks_exact(3) {
            let corners = [
                transformed[tri[0] as usize],
                transformed[tri[1] as usize],
                transformed[tri[2] as usize],
            ];
            stages::setup_triangle(&params, corners, &mut scratch.fragments, &mut scratch.stats);
        }

        for fragment in &scratch.fragments {
            stages::shade_fragment(
                &*self.fragment_shader,
                &self.target,
                fragment,
                false,
                &mut scratch.stats,
            );
        }
    }

    fn draw_parallel(
        &mut self,
        vertices: &Arc<[VS::Input]>,
        indices: &Arc<[u32]>,
        params: SetupParams,
    ) -> RasterResult<()> {
        let Some(pool) = self.pool.as_ref() else {
            return Err(RasterError::pipeline("worker pool is not running"));
        };

        // Stage 1: vertex transform.
        let vertex_count = vertices.len();
        let batch = self.config.vertex_batch_size;
        for start in (0..vertex_count).step_by(batch) {
            let end = (start + batch).min(vertex_count);
            let mut out = self.spare_batches.pop().unwrap_or_default();
            out.reserve(end - start);
            pool.submit(StageTask::Transform {
                shader: Arc::clone(&self.vertex_shader),
                vertices: Arc::clone(vertices),
                range: start..end,
                out,
            });
        }
        let transformed_ok = pool.wait();

        for index in 0..pool.threads() {
            self.gathered.append(&mut pool.state(index).transformed);
        }
        self.gathered.sort_unstable_by_key(|(start, _)| *start);
        let transformed = Arc::make_mut(&mut self.transformed);
        transformed.reserve(vertex_count);
        for (_, mut out) in self.gathered.drain(..) {
            transformed.append(&mut out);
            self.spare_batches.push(out);
        }
        transformed_ok?;

        // Stage 2: triangle setup into per-worker arenas.
        let triangle_count = indices.len() / 3;
        let batch = self.config.triangle_batch_size;
        for start in (0..triangle_count).step_by(batch) {
            pool.submit(StageTask::Setup {
                vertices: Arc::clone(&self.transformed),
                indices: Arc::clone(indices),
                range: start..(start + batch).min(triangle_count),
                params,
            });
        }
        pool.wait()?;

        // Stage 3: fragment shading. Arenas are lent out read-only for the stage.
        let arenas: Vec<_> = (0..pool.threads())
            .map(|index| Arc::new(std::mem::take(&mut pool.state(index).fragments)))
            .collect();
        let batch = self.config.fragment_batch_size;
        for arena in &arenas {
            for start in (0..arena.len()).step_by(batch) {
                pool.submit(StageTask::Shade {
                    shader: Arc::clone(&self.fragment_shader),
                    fragments: Arc::clone(arena),
                    range: start..(start + batch).min(arena.len()),
                    target: Arc::clone(&self.target),
                });
            }
        }
        let shaded = pool.wait();

        for (index, arena) in arenas.into_iter().enumerate() {
            if let Some(mut fragments) = Arc::into_inner(arena) {
                fragments.clear();
                pool.state(index).fragments = fragments;
            }
        }
        shaded
    }

    /// Empty every arena and the transformed-vertex array, returning the summed counters.
    fn finish_frame(&mut self) -> FrameStats {
        Arc::make_mut(&mut self.transformed).clear();
        let mut stats = self.local.reset();
        if let Some(pool) = &self.pool {
            for index in 0..pool.threads() {
                stats.merge(&pool.state(index).reset());
            }
        }
        stats
    }
}

impl<VS, FS> Rasterizer<VS, FS>
where
    VS: VertexShader + Clone,
    FS: FragmentShader<Input = VS::Output> + Clone,
{
    /// Mutable access to the vertex shader, for per-frame parameters such as matrices.
    pub fn vertex_shader_mut(&mut self) -> &mut VS {
        Arc::make_mut(&mut self.vertex_shader)
    }

    /// Mutable access to the fragment shader.
    pub fn fragment_shader_mut(&mut self) -> &mut FS {
        Arc::make_mut(&mut self.fragment_shader)
    }
}

impl<VS, FS> Rasterizer<VS, FS>
where
    VS: VertexShader<Input = Vertex>,
    FS: FragmentShader<Input = VS::Output>,
{
    /// Draw every triangle of `mesh`.
    pub fn draw_mesh(&mut self, mesh: &Mesh) -> RasterResult<FrameStats> {
        self.draw(&mesh.vertices, &mesh.indices)
    }
}

fn validate_draw(vertex_count: usize, indices: &[u32]) -> RasterResult<()> {
    if indices.len() % 3 != 0 {
        return Err(RasterError::validation(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        )));
    }
    if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(RasterError::validation(format!(
            "index {bad} out of range for {vertex_count} vertices"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pipeline.rs"]
mod tests;
