use std::sync::Arc;

use crate::mesh::BatchKey;

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture {
    /// Upload tightly packed RGBA8 pixels. Callers validate dimensions first;
    /// wgpu treats a bad upload as a device error.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (width, height),
        }
    }
}

struct GpuTextureInner {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// Shared handle to an uploaded texture and its bind group. The GPU
/// resources are released when the last clone is dropped, including clones
/// held by a not-yet-presented frame.
#[derive(Clone)]
pub struct GpuTexture(Arc<GpuTextureInner>);

impl GpuTexture {
    pub fn new(texture: Texture, bind_group: wgpu::BindGroup) -> Self {
        Self(Arc::new(GpuTextureInner {
            texture,
            bind_group,
        }))
    }

    pub fn size(&self) -> (u32, u32) {
        self.0.texture.size
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.0.bind_group
    }
}

impl BatchKey for GpuTexture {
    fn same_batch(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for GpuTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.size();
        write!(f, "GpuTexture({}x{})", w, h)
    }
}
