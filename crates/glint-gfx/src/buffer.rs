use wgpu::util::DeviceExt;

use crate::device::Context;
use crate::vertex::{self, Vertex};

/// Vertex buffer object: one static upload of interleaved vertex records.
///
/// Contents are immutable after construction; build a new buffer to change
/// geometry.
pub struct Vbo {
    buffer: wgpu::Buffer,
    len: u32,
}

impl Vbo {
    pub fn new(ctx: &Context<'_>, vertices: &[Vertex]) -> Self {
        let packed = vertex::pack(vertices);

        let buffer = ctx
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("glint vbo"),
                contents: bytemuck::cast_slice(&packed),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            buffer,
            len: vertices.len() as u32,
        }
    }

    /// Number of vertices in the buffer.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

/// Index buffer object: one static upload of 16-bit indices.
///
/// The index type bounds values at the API boundary, so the 16-bit range is
/// enforced by construction. A CPU copy of the list is retained so fan and
/// line-loop draws can expand it.
pub struct Ibo {
    buffer: wgpu::Buffer,
    indices: Vec<u16>,
}

impl Ibo {
    pub fn new(ctx: &Context<'_>, indices: &[u16]) -> Self {
        let buffer = ctx
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("glint ibo"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            buffer,
            indices: indices.to_vec(),
        }
    }

    /// Number of indices in the buffer.
    pub fn len(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub(crate) fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub(crate) fn indices(&self) -> &[u16] {
        &self.indices
    }
}
