use crate::shader::ShaderId;
use crate::shape::ShapeType;

/// Outcome of a cache lookup: reuse the held pipeline handle or fetch a new
/// one from the shader.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Slot {
    Hit,
    Refresh,
}

/// Pure bind bookkeeping, split out from the pipeline handle so it can be
/// exercised without a GPU.
#[derive(Debug, Default)]
struct BindTracker {
    last: Option<(ShaderId, ShapeType)>,
    program_rebinds: u64,
}

impl BindTracker {
    /// Records a draw with `shader` and `shape`.
    ///
    /// The program-rebind counter moves only when the shader differs from the
    /// previous draw; a topology change alone refreshes the pipeline slot
    /// without counting as a program rebind.
    fn track(&mut self, shader: ShaderId, shape: ShapeType) -> Slot {
        if self.last.map(|(s, _)| s) != Some(shader) {
            self.program_rebinds += 1;
        }
        let hit = self.last == Some((shader, shape));
        self.last = Some((shader, shape));
        if hit { Slot::Hit } else { Slot::Refresh }
    }
}

/// Caller-owned draw-dispatch state.
///
/// Holds the last-bound shader/topology pair and the resolved pipeline
/// handle, so consecutive draws with the same shader skip the rebind and the
/// pipeline-cache lookup. One per rendering context; pass `&mut` into every
/// draw call.
#[derive(Debug, Default)]
pub struct DrawState {
    tracker: BindTracker,
    pipeline: Option<wgpu::RenderPipeline>,
}

impl DrawState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of program rebinds issued so far (the first draw counts
    /// as one).
    pub fn program_rebinds(&self) -> u64 {
        self.tracker.program_rebinds
    }

    /// Returns the pipeline for `(shader, shape)`, reusing the cached handle
    /// on a hit and calling `build` otherwise.
    pub(crate) fn resolve<F>(
        &mut self,
        shader: ShaderId,
        shape: ShapeType,
        build: F,
    ) -> wgpu::RenderPipeline
    where
        F: FnOnce() -> wgpu::RenderPipeline,
    {
        if self.tracker.track(shader, shape) == Slot::Hit {
            if let Some(pipeline) = &self.pipeline {
                return pipeline.clone();
            }
        }

        let pipeline = build();
        self.pipeline = Some(pipeline.clone());
        pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── program rebinds ───────────────────────────────────────────────────

    #[test]
    fn repeated_shader_does_not_rebind() {
        let id = ShaderId::next();
        let mut tracker = BindTracker::default();
        tracker.track(id, ShapeType::Triangles);
        tracker.track(id, ShapeType::Triangles);
        tracker.track(id, ShapeType::Triangles);
        assert_eq!(tracker.program_rebinds, 1);
    }

    #[test]
    fn switching_shaders_rebinds() {
        let a = ShaderId::next();
        let b = ShaderId::next();
        let mut tracker = BindTracker::default();
        tracker.track(a, ShapeType::Triangles);
        tracker.track(b, ShapeType::Triangles);
        tracker.track(a, ShapeType::Triangles);
        assert_eq!(tracker.program_rebinds, 3);
    }

    #[test]
    fn topology_change_is_not_a_program_rebind() {
        let id = ShaderId::next();
        let mut tracker = BindTracker::default();
        tracker.track(id, ShapeType::Triangles);
        let slot = tracker.track(id, ShapeType::Lines);
        assert_eq!(slot, Slot::Refresh);
        assert_eq!(tracker.program_rebinds, 1);
    }

    // ── slot reuse ────────────────────────────────────────────────────────

    #[test]
    fn same_shader_and_shape_hits() {
        let id = ShaderId::next();
        let mut tracker = BindTracker::default();
        assert_eq!(tracker.track(id, ShapeType::Fan), Slot::Refresh);
        assert_eq!(tracker.track(id, ShapeType::Fan), Slot::Hit);
    }
}
