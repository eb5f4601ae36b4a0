/// Primitive assembly mode used to interpret a vertex stream.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeType {
    Fan,
    Lines,
    LineLoop,
    LineStrip,
    Points,
    Triangles,
    TriStrip,
}

impl ShapeType {
    /// The wgpu topology this shape draws with.
    ///
    /// wgpu has no triangle-fan or line-loop modes; those two draw as indexed
    /// `TriangleList` / `LineList` over an expanded index list (see
    /// [`expand_fan`] / [`expand_line_loop`]).
    pub(crate) fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            ShapeType::Fan => wgpu::PrimitiveTopology::TriangleList,
            ShapeType::Lines => wgpu::PrimitiveTopology::LineList,
            ShapeType::LineLoop => wgpu::PrimitiveTopology::LineList,
            ShapeType::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            ShapeType::Points => wgpu::PrimitiveTopology::PointList,
            ShapeType::Triangles => wgpu::PrimitiveTopology::TriangleList,
            ShapeType::TriStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }

    /// Whether drawing this shape requires index expansion.
    pub(crate) fn is_emulated(self) -> bool {
        matches!(self, ShapeType::Fan | ShapeType::LineLoop)
    }
}

/// `0, 1, 2, .. n-1`: the implicit index list of a non-indexed draw.
pub(crate) fn sequential(count: u32) -> Vec<u16> {
    (0..count).map(|i| i as u16).collect()
}

/// Expands a triangle-fan index list into triangle-list indices.
///
/// Fewer than three indices assemble no primitive and yield an empty list.
pub(crate) fn expand_fan(indices: &[u16]) -> Vec<u16> {
    if indices.len() < 3 {
        return Vec::new();
    }
    let hub = indices[0];
    let mut out = Vec::with_capacity(3 * (indices.len() - 2));
    for pair in indices[1..].windows(2) {
        out.extend_from_slice(&[hub, pair[0], pair[1]]);
    }
    out
}

/// Expands a line-loop index list into line-list indices, including the
/// closing segment back to the first index.
pub(crate) fn expand_line_loop(indices: &[u16]) -> Vec<u16> {
    if indices.len() < 2 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(2 * indices.len());
    for k in 0..indices.len() {
        out.push(indices[k]);
        out.push(indices[(k + 1) % indices.len()]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── topology mapping ──────────────────────────────────────────────────

    #[test]
    fn direct_topologies() {
        use wgpu::PrimitiveTopology as T;
        assert_eq!(ShapeType::Lines.topology(), T::LineList);
        assert_eq!(ShapeType::LineStrip.topology(), T::LineStrip);
        assert_eq!(ShapeType::Points.topology(), T::PointList);
        assert_eq!(ShapeType::Triangles.topology(), T::TriangleList);
        assert_eq!(ShapeType::TriStrip.topology(), T::TriangleStrip);
    }

    #[test]
    fn only_fan_and_loop_are_emulated() {
        assert!(ShapeType::Fan.is_emulated());
        assert!(ShapeType::LineLoop.is_emulated());
        assert!(!ShapeType::Triangles.is_emulated());
        assert!(!ShapeType::LineStrip.is_emulated());
    }

    // ── fan expansion ─────────────────────────────────────────────────────

    #[test]
    fn fan_expands_to_hub_triangles() {
        assert_eq!(expand_fan(&[0, 1, 2, 3, 4]), [0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn fan_respects_caller_indices() {
        assert_eq!(expand_fan(&[9, 4, 7, 5]), [9, 4, 7, 9, 7, 5]);
    }

    #[test]
    fn fan_count_is_three_per_interior_edge() {
        let n = 17;
        assert_eq!(expand_fan(&sequential(n)).len(), 3 * (n as usize - 2));
    }

    #[test]
    fn degenerate_fan_is_empty() {
        assert!(expand_fan(&[]).is_empty());
        assert!(expand_fan(&[0]).is_empty());
        assert!(expand_fan(&[0, 1]).is_empty());
    }

    // ── line-loop expansion ───────────────────────────────────────────────

    #[test]
    fn line_loop_closes_back_to_start() {
        assert_eq!(expand_line_loop(&[0, 1, 2, 3]), [0, 1, 1, 2, 2, 3, 3, 0]);
    }

    #[test]
    fn line_loop_count_is_two_per_vertex() {
        let n = 11;
        assert_eq!(expand_line_loop(&sequential(n)).len(), 2 * n as usize);
    }

    #[test]
    fn degenerate_line_loop_is_empty() {
        assert!(expand_line_loop(&[]).is_empty());
        assert!(expand_line_loop(&[3]).is_empty());
    }

    // ── sequential ────────────────────────────────────────────────────────

    #[test]
    fn sequential_counts_up_from_zero() {
        assert_eq!(sequential(4), [0, 1, 2, 3]);
        assert!(sequential(0).is_empty());
    }
}
