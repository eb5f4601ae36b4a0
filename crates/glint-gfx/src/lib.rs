//! Glint: an immediate-mode drawing layer over wgpu.
//!
//! This crate owns the GPU context plus the handful of object types a caller
//! needs to push geometry at the screen: vertex/index buffers, textures,
//! shader programs, and a 4x4 transform. Draw dispatch lives on [`shader::Shader`];
//! everything else is construction-time upload.

pub mod buffer;
pub mod color;
pub mod device;
pub mod logging;
pub mod shader;
pub mod shape;
pub mod state;
pub mod texture;
pub mod transform;
pub mod vertex;

use anyhow::Result;
use winit::window::Window;

use crate::device::{Context, ContextInit};
use crate::shader::{Shader, ShaderSources};
use crate::state::DrawState;

/// Everything initialization produces, bundled so setup is a single awaited
/// step before the first draw call.
///
/// The fields are deliberately public: draw calls borrow `context` shared,
/// `default_shader` and `draw_state` mutable, and those are disjoint field
/// borrows.
pub struct Gfx<'w> {
    pub context: Context<'w>,
    pub default_shader: Shader,
    pub draw_state: DrawState,
}

/// Acquires a rendering context bound to `window` and builds the default
/// shader from `sources`.
///
/// Fails if context acquisition fails or the default shader does not
/// compile/link. `sources` is typically [`ShaderSources::embedded`] or the
/// result of a caller-side fetch.
pub async fn init<'w>(
    window: &'w Window,
    config: ContextInit,
    sources: ShaderSources,
) -> Result<Gfx<'w>> {
    let context = Context::new(window, config).await?;
    let default_shader = Shader::new(&context, &sources)?;

    Ok(Gfx {
        context,
        default_shader,
        draw_state: DrawState::new(),
    })
}
