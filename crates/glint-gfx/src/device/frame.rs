/// A single acquired frame: the surface texture, its color view, and the
/// command encoder draw calls record into.
///
/// Short-lived: holding the surface texture blocks acquisition of
/// subsequent frames, so clear/draw/present promptly.
pub struct Frame {
    pub(crate) surface_texture: wgpu::SurfaceTexture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) encoder: wgpu::CommandEncoder,
}
