//! Per-draw counters and frame timing summaries.

use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// What one [`crate::Rasterizer::draw`] call did.
pub struct FrameStats {
    /// Vertices transformed.
    pub vertices: usize,
    /// Triangles submitted.
    pub triangles: usize,
    /// Triangles dropped because a vertex had `w` of the wrong sign.
    pub triangles_w_rejected: usize,
    /// Triangles dropped by face culling.
    pub triangles_culled: usize,
    /// Triangles with zero or non-finite screen area.
    pub triangles_degenerate: usize,
    /// Candidate fragments produced by setup.
    pub fragments_emitted: usize,
    /// Fragments that passed the depth test and were written.
    pub fragments_written: usize,
}

impl FrameStats {
    /// Add the per-worker counters of `other` into `self`.
    pub fn merge(&mut self, other: &FrameStats) {
        self.vertices += other.vertices;
        self.triangles += other.triangles;
        self.triangles_w_rejected += other.triangles_w_rejected;
        self.triangles_culled += other.triangles_culled;
        self.triangles_degenerate += other.triangles_degenerate;
        self.fragments_emitted += other.fragments_emitted;
        self.fragments_written += other.fragments_written;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Summary of a run of frame times, in milliseconds.
pub struct FrameTimings {
    /// Number of frames measured.
    pub frames: usize,
    /// Shortest frame.
    pub fastest_ms: f64,
    /// Longest frame.
    pub slowest_ms: f64,
    /// Arithmetic mean.
    pub average_ms: f64,
    /// Element at `len / 2` of the sorted samples.
    pub median_ms: f64,
    /// Element at `len * 99 / 100` of the sorted samples.
    pub p99_ms: f64,
}

impl FrameTimings {
    /// Summarize `samples`; `None` when there are none.
    pub fn from_durations(samples: &[Duration]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut ms: Vec<f64> = samples.iter().map(|d| d.as_secs_f64() * 1000.0).collect();
        ms.sort_by(f64::total_cmp);

        let n = ms.len();
        Some(Self {
            frames: n,
            fastest_ms: ms[0],
            slowest_ms: ms[n - 1],
            average_ms: ms.iter().sum::<f64>() / n as f64,
            median_ms: ms[n / 2],
            p99_ms: ms[n * 99 / 100],
        })
    }
}

impl std::fmt::Display for FrameTimings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "frames:  {}", self.frames)?;
        writeln!(f, "fastest: {:.3}ms", self.fastest_ms)?;
        writeln!(f, "slowest: {:.3}ms", self.slowest_ms)?;
        writeln!(f, "average: {:.3}ms", self.average_ms)?;
        writeln!(f, " median: {:.3}ms", self.median_ms)?;
        write!(f, "    99%: {:.3}ms", self.p99_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/stats.rs"]
mod tests;
