//! GPU context + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Surface/Adapter/Device/Queue
//! - configuring the surface and the depth-stencil attachment
//! - the screen API: dimensions, clear, resize
//! - acquiring and presenting frames

mod context;
mod frame;
mod init;

pub use context::{Context, SurfaceErrorAction};
pub use frame::Frame;
pub use init::ContextInit;

pub(crate) use context::DEPTH_FORMAT;
