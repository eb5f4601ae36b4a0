use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context as _, Result, bail};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::buffer::{Ibo, Vbo};
use crate::device::{Context, DEPTH_FORMAT, Frame};
use crate::shape::{self, ShapeType};
use crate::state::DrawState;
use crate::texture::Texture;
use crate::transform::Transform;
use crate::vertex::PackedVertex;

/// Vertex-stage and fragment-stage WGSL source texts.
///
/// Where the sources come from is the caller's business (network fetch,
/// asset pipeline); this crate ships an embedded default pair and a blocking
/// filesystem loader.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// The built-in default sources compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            vertex: include_str!("shaders/default.vert.wgsl").to_string(),
            fragment: include_str!("shaders/default.frag.wgsl").to_string(),
        }
    }

    /// Loads `default.vert.wgsl` / `default.frag.wgsl` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let vert = dir.join("default.vert.wgsl");
        let frag = dir.join("default.frag.wgsl");

        Ok(Self {
            vertex: std::fs::read_to_string(&vert)
                .with_context(|| format!("failed to load vertex shader source {}", vert.display()))?,
            fragment: std::fs::read_to_string(&frag)
                .with_context(|| format!("failed to load fragment shader source {}", frag.display()))?,
        })
    }
}

/// Process-unique shader identity, used by [`DrawState`] to detect program
/// switches between draw calls.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderId(u64);

impl ShaderId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Per-draw uniform block. Layout must match the `DrawUniforms` struct the
/// WGSL sources declare (mat4x4 at offset 0, flag at offset 64, 80 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniforms {
    projview: [f32; 16],
    use_texture: u32,
    _pad: [u32; 3],
}

/// A compiled and linked shader program plus its draw dispatch.
///
/// Construction validates both stages and the stage interface; a shader
/// either exists fully linked or not at all. Pipelines are one per primitive
/// topology, built on first use against the context's surface format.
pub struct Shader {
    id: ShaderId,
    vs_module: wgpu::ShaderModule,
    fs_module: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<wgpu::PrimitiveTopology, wgpu::RenderPipeline>,
    surface_format: wgpu::TextureFormat,
}

impl Shader {
    /// Compiles both stages and links them.
    ///
    /// Fails with the underlying compiler diagnostic if either stage does not
    /// compile, or with the linker diagnostic if the stage interfaces do not
    /// match. Attribute slots are fixed: 0 position, 1 color, 2 texcoord.
    pub fn new(ctx: &Context<'_>, sources: &ShaderSources) -> Result<Self> {
        let device = ctx.device();

        let vs_module = compile_stage(device, "vertex", &sources.vertex)?;
        let fs_module = compile_stage(device, "fragment", &sources.fragment)?;

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("glint shader bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: std::num::NonZeroU64::new(
                                std::mem::size_of::<DrawUniforms>() as u64,
                            ),
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glint shader pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let mut shader = Self {
            id: ShaderId::next(),
            vs_module,
            fs_module,
            bind_group_layout,
            pipeline_layout,
            pipelines: HashMap::new(),
            surface_format: ctx.surface_format(),
        };

        // The eager TriangleList pipeline doubles as the link step: a stage
        // interface mismatch surfaces here and fails construction.
        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = shader.build_pipeline(device, wgpu::PrimitiveTopology::TriangleList);
        if let Some(err) = pollster::block_on(error_scope.pop()) {
            bail!("failed to link shader program:\n{err}");
        }
        shader
            .pipelines
            .insert(wgpu::PrimitiveTopology::TriangleList, pipeline);

        Ok(shader)
    }

    /// Draws the full vertex buffer, non-indexed.
    ///
    /// With no transform, positions are taken as pixels: an orthographic
    /// projection derived from the current surface size is used.
    pub fn draw(
        &mut self,
        ctx: &Context<'_>,
        frame: &mut Frame,
        state: &mut DrawState,
        shape: ShapeType,
        vbo: &Vbo,
        texture: Option<&Texture>,
        transform: Option<&Transform>,
    ) {
        let fallback = Transform::ortho_screen(ctx.width() as f32, ctx.height() as f32);
        self.dispatch(ctx, frame, state, shape, vbo, None, texture, transform, fallback);
    }

    /// Draws through an index buffer.
    ///
    /// With no transform, the identity matrix is uploaded, unlike [`draw`],
    /// which projects from pixel space.
    pub fn draw_indexed(
        &mut self,
        ctx: &Context<'_>,
        frame: &mut Frame,
        state: &mut DrawState,
        shape: ShapeType,
        vbo: &Vbo,
        ibo: &Ibo,
        texture: Option<&Texture>,
        transform: Option<&Transform>,
    ) {
        self.dispatch(
            ctx,
            frame,
            state,
            shape,
            vbo,
            Some(ibo),
            texture,
            transform,
            Transform::IDENTITY,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn dispatch(
        &mut self,
        ctx: &Context<'_>,
        frame: &mut Frame,
        state: &mut DrawState,
        shape: ShapeType,
        vbo: &Vbo,
        ibo: Option<&Ibo>,
        texture: Option<&Texture>,
        transform: Option<&Transform>,
        fallback: Transform,
    ) {
        let device = ctx.device();

        let id = self.id;
        let pipeline = state.resolve(id, shape, || {
            self.pipeline_for(device, shape.topology())
        });

        let uniforms = DrawUniforms {
            projview: transform.unwrap_or(&fallback).elements,
            use_texture: texture.is_some() as u32,
            _pad: [0; 3],
        };

        let ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint draw uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let texture_view = texture.map_or_else(|| ctx.white_view(), |t| t.view());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint draw bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(ctx.sampler()),
                },
            ],
        });

        // Fan and line-loop shapes draw through an expanded scratch index
        // list; everything else uses the caller's buffers directly.
        let expanded: Option<Vec<u16>> = if shape.is_emulated() {
            let source = match ibo {
                Some(ibo) => ibo.indices().to_vec(),
                None => shape::sequential(vbo.len()),
            };
            Some(match shape {
                ShapeType::Fan => shape::expand_fan(&source),
                _ => shape::expand_line_loop(&source),
            })
        } else {
            None
        };

        let scratch_ibo = expanded.as_ref().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("glint scratch indices"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint draw pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: ctx.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.buffer().slice(..));

        if let (Some(scratch), Some(indices)) = (&scratch_ibo, &expanded) {
            rpass.set_index_buffer(scratch.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..indices.len() as u32, 0, 0..1);
        } else if let Some(ibo) = ibo {
            rpass.set_index_buffer(ibo.buffer().slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..ibo.len(), 0, 0..1);
        } else {
            rpass.draw(0..vbo.len(), 0..1);
        }
    }

    /// Returns the pipeline for `topology`, building and caching it on first
    /// use.
    fn pipeline_for(
        &mut self,
        device: &wgpu::Device,
        topology: wgpu::PrimitiveTopology,
    ) -> wgpu::RenderPipeline {
        if let Some(pipeline) = self.pipelines.get(&topology) {
            return pipeline.clone();
        }

        let pipeline = self.build_pipeline(device, topology);
        self.pipelines.insert(topology, pipeline.clone());
        pipeline
    }

    fn build_pipeline(
        &self,
        device: &wgpu::Device,
        topology: wgpu::PrimitiveTopology,
    ) -> wgpu::RenderPipeline {
        // Strip topologies must name their index format up front so the same
        // pipeline serves indexed and non-indexed draws.
        let strip_index_format = matches!(
            topology,
            wgpu::PrimitiveTopology::LineStrip | wgpu::PrimitiveTopology::TriangleStrip
        )
        .then_some(wgpu::IndexFormat::Uint16);

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glint pipeline"),
            layout: Some(&self.pipeline_layout),

            vertex: wgpu::VertexState {
                module: &self.vs_module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[PackedVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &self.fs_module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            // The depth-stencil attachment is cleared alongside color but
            // never tested against: depth writes off, compare Always.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),

            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}

/// Creates one shader module, surfacing validation diagnostics as an error.
fn compile_stage(device: &wgpu::Device, stage: &str, source: &str) -> Result<wgpu::ShaderModule> {
    let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(stage),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    if let Some(err) = pollster::block_on(error_scope.pop()) {
        bail!("failed to compile {stage} shader:\n{err}");
    }

    Ok(module)
}
