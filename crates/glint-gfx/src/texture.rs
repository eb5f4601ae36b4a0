use image::RgbaImage;

use crate::device::Context;

/// GPU 2D texture built from a decoded RGBA image.
///
/// Fixed policy: the image is flipped vertically on upload (texcoords assume
/// a bottom-left origin while decoded images are top-left), sampling is
/// linear with clamp-to-edge wrapping (the context's shared sampler), and no
/// mipmaps are generated. Dimensions are immutable after construction.
pub struct Texture {
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn new(ctx: &Context<'_>, image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let flipped = image::imageops::flip_vertical(image);

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("glint texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            flipped.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        Self {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}
