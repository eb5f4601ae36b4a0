use bytemuck::{Pod, Zeroable};

use crate::color::Color;

/// A single vertex as the caller describes it.
///
/// Every field is optional in spirit: construct with struct-update syntax and
/// `..Vertex::default()` to leave the rest at their defaults: position
/// `(0, 0)`, opaque white color, texcoord `(0, 0)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub color: Color,
    pub u: f32,
    pub v: f32,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            color: Color::WHITE,
            u: 0.0,
            v: 0.0,
        }
    }
}

/// GPU-side vertex record (40 bytes):
///
///  offset  0  position  [f32; 4]   loc 0   (z = 0, w = 1)
///  offset 16  color     [f32; 4]   loc 1
///  offset 32  texcoord  [f32; 2]   loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct PackedVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub texcoord: [f32; 2],
}

impl PackedVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x4, // position
        1 => Float32x4, // color
        2 => Float32x2  // texcoord
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PackedVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    fn from_vertex(v: &Vertex) -> Self {
        Self {
            position: [v.x, v.y, 0.0, 1.0],
            color: v.color.to_array(),
            texcoord: [v.u, v.v],
        }
    }
}

/// Packs caller vertices into the interleaved upload layout.
pub(crate) fn pack(vertices: &[Vertex]) -> Vec<PackedVertex> {
    vertices.iter().map(PackedVertex::from_vertex).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn missing_color_packs_as_opaque_white() {
        let packed = pack(&[Vertex { x: 3.0, y: 4.0, ..Vertex::default() }]);
        assert_eq!(packed[0].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn missing_position_and_texcoord_pack_as_zero() {
        let packed = pack(&[Vertex::default()]);
        assert_eq!(packed[0].position[0], 0.0);
        assert_eq!(packed[0].position[1], 0.0);
        assert_eq!(packed[0].texcoord, [0.0, 0.0]);
    }

    #[test]
    fn position_is_padded_to_homogeneous() {
        let packed = pack(&[Vertex { x: 7.0, y: -2.0, ..Vertex::default() }]);
        assert_eq!(packed[0].position, [7.0, -2.0, 0.0, 1.0]);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn stride_is_forty_bytes() {
        assert_eq!(std::mem::size_of::<PackedVertex>(), 40);
        assert_eq!(PackedVertex::layout().array_stride, 40);
    }

    #[test]
    fn attribute_slots_and_offsets() {
        let attrs = PackedVertex::ATTRS;
        assert_eq!((attrs[0].shader_location, attrs[0].offset), (0, 0));
        assert_eq!((attrs[1].shader_location, attrs[1].offset), (1, 16));
        assert_eq!((attrs[2].shader_location, attrs[2].offset), (2, 32));
    }
}
