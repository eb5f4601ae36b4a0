//! Windowed demo for glint-gfx.
//!
//! Draws a vertex-colored triangle with a line-loop outline (pixel space,
//! default projection) and a textured quad through the indexed path
//! (clip space, default identity).

use anyhow::{Context as _, Result};
use image::{Rgba, RgbaImage};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use glint_gfx::Gfx;
use glint_gfx::buffer::{Ibo, Vbo};
use glint_gfx::color::Color;
use glint_gfx::device::{Context, ContextInit, SurfaceErrorAction};
use glint_gfx::logging::{LoggingConfig, init_logging};
use glint_gfx::shader::ShaderSources;
use glint_gfx::shape::ShapeType;
use glint_gfx::texture::Texture;
use glint_gfx::vertex::Vertex;

#[self_referencing]
struct GfxEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gfx: Gfx<'this>,
}

/// Static geometry, uploaded once at startup.
struct Scene {
    triangle: Vbo,
    outline: Vbo,
    quad: Vbo,
    quad_indices: Ibo,
    checker: Texture,
}

impl Scene {
    fn build(ctx: &Context<'_>) -> Self {
        // Pixel-space triangle, one color per corner.
        let corners = [
            (400.0, 120.0, Color::new(1.0, 0.2, 0.2, 1.0)),
            (160.0, 480.0, Color::new(0.2, 1.0, 0.2, 1.0)),
            (640.0, 480.0, Color::new(0.2, 0.4, 1.0, 1.0)),
        ];

        let triangle = Vbo::new(
            ctx,
            &corners.map(|(x, y, color)| Vertex { x, y, color, ..Vertex::default() }),
        );

        // Same corners again, default (white) color, closed by the line loop.
        let outline = Vbo::new(
            ctx,
            &corners.map(|(x, y, _)| Vertex { x, y, ..Vertex::default() }),
        );

        // Clip-space quad in the bottom-left corner; the indexed path uploads
        // identity when no transform is given, so positions are clip
        // coordinates directly.
        let quad = Vbo::new(
            ctx,
            &[
                Vertex { x: -0.9, y: -0.9, u: 0.0, v: 0.0, ..Vertex::default() },
                Vertex { x: -0.3, y: -0.9, u: 1.0, v: 0.0, ..Vertex::default() },
                Vertex { x: -0.3, y: -0.3, u: 1.0, v: 1.0, ..Vertex::default() },
                Vertex { x: -0.9, y: -0.3, u: 0.0, v: 1.0, ..Vertex::default() },
            ],
        );
        let quad_indices = Ibo::new(ctx, &[0, 1, 2, 0, 2, 3]);

        let checker = Texture::new(
            ctx,
            &RgbaImage::from_fn(64, 64, |x, y| {
                if (x / 8 + y / 8) % 2 == 0 {
                    Rgba([230, 90, 40, 255])
                } else {
                    Rgba([250, 240, 220, 255])
                }
            }),
        );

        Self {
            triangle,
            outline,
            quad,
            quad_indices,
            checker,
        }
    }
}

#[derive(Default)]
struct DemoApp {
    entry: Option<GfxEntry>,
    scene: Option<Scene>,
}

impl DemoApp {
    /// Renders one frame. Returns `true` on a fatal surface error.
    fn render(&mut self) -> bool {
        let (Some(entry), Some(scene)) = (self.entry.as_mut(), self.scene.as_ref()) else {
            return false;
        };

        entry.with_gfx_mut(|gfx| {
            let mut frame = match gfx.context.begin_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    return gfx.context.handle_surface_error(err) == SurfaceErrorAction::Fatal;
                }
            };

            gfx.context.clear(&mut frame);

            gfx.default_shader.draw(
                &gfx.context,
                &mut frame,
                &mut gfx.draw_state,
                ShapeType::Triangles,
                &scene.triangle,
                None,
                None,
            );
            gfx.default_shader.draw(
                &gfx.context,
                &mut frame,
                &mut gfx.draw_state,
                ShapeType::LineLoop,
                &scene.outline,
                None,
                None,
            );
            gfx.default_shader.draw_indexed(
                &gfx.context,
                &mut frame,
                &mut gfx.draw_state,
                ShapeType::Triangles,
                &scene.quad,
                &scene.quad_indices,
                Some(&scene.checker),
                None,
            );

            gfx.context.present(frame);
            false
        })
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("glint demo")
            .with_inner_size(LogicalSize::new(800.0, 600.0));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let entry = GfxEntryBuilder {
            window,
            gfx_builder: |w| {
                pollster::block_on(glint_gfx::init(
                    w,
                    ContextInit::default(),
                    ShaderSources::embedded(),
                ))
                .expect("rendering initialization failed")
            },
        }
        .build();

        self.scene = Some(entry.with_gfx(|gfx| Scene::build(&gfx.context)));
        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gfx_mut(|gfx| gfx.context.resize(new_size.width, new_size.height));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                if self.render() {
                    log::error!("fatal surface error, exiting");
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = DemoApp::default();

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    Ok(())
}
