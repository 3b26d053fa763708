use std::{ops::Range, sync::Arc};

use crate::{
    pool::Task,
    raster::stages::{self, Fragment, SetupParams},
    shader::{FragmentShader, VertexShader},
    stats::FrameStats,
    target::frame::FrameTarget,
};

/// Private per-worker memory, reused across frames.
pub(crate) struct WorkerScratch<V> {
    /// Transformed vertex batches tagged with their first vertex index.
    pub(crate) transformed: Vec<(usize, Vec<V>)>,
    /// Fragments produced by this worker's setup tasks.
    pub(crate) fragments: Vec<Fragment<V>>,
    pub(crate) stats: FrameStats,
}

impl<V> Default for WorkerScratch<V> {
    fn default() -> Self {
        Self {
            transformed: Vec::new(),
            fragments: Vec::new(),
            stats: FrameStats::default(),
        }
    }
}

impl<V> WorkerScratch<V> {
    /// Drop this frame's contents, keeping allocations, and hand back the counters.
    pub(crate) fn reset(&mut self) -> FrameStats {
        self.transformed.clear();
        self.fragments.clear();
        std::mem::take(&mut self.stats)
    }
}

/// One batch of pipeline work.
pub(crate) enum StageTask<VS: VertexShader, FS> {
    /// Run the vertex shader over `vertices[range]` into `out`.
    Transform {
        shader: Arc<VS>,
        vertices: Arc<[VS::Input]>,
        range: Range<usize>,
        out: Vec<VS::Output>,
    },
    /// Set up triangles `range` (in triangles, not indices).
    Setup {
        vertices: Arc<Vec<VS::Output>>,
        indices: Arc<[u32]>,
        range: Range<usize>,
        params: SetupParams,
    },
    /// Shade `fragments[range]` into `target`.
    Shade {
        shader: Arc<FS>,
        fragments: Arc<Vec<Fragment<VS::Output>>>,
        range: Range<usize>,
        target: Arc<FrameTarget>,
    },
}

impl<VS, FS> Task for StageTask<VS, FS>
where
    VS: VertexShader,
    FS: FragmentShader<Input = VS::Output>,
{
    type State = WorkerScratch<VS::Output>;

    fn run(self, state: &mut Self::State) {
        match self {
            Self::Transform {
                shader,
                vertices,
                range,
                mut out,
            } => {
                let start = range.start;
                stages::transform(&*shader, &vertices[range], &mut out);
                state.transformed.push((start, out));
            }
            Self::Setup {
                vertices,
                indices,
                range,
                params,
            } => {
                let indices = &indices[range.start * 3..range.end * 3];
                for tri in indices.chunks_exact(3) {
                    let corners = [
                        vertices[tri[0] as usize],
                        vertices[tri[1] as usize],
                        vertices[tri[2] as usize],
                    ];
                    stages::setup_triangle(&params, corners, &mut state.fragments, &mut state.stats);
                }
            }
            Self::Shade {
                shader,
                fragments,
                range,
                target,
            } => {
                for fragment in &fragments[range] {
                    stages::shade_fragment(&*shader, &target, fragment, true, &mut state.stats);
                }
            }
        }
    }
}
