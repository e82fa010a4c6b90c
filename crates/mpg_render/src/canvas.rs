//! `Canvas` implementation on top of wgpu.
//!
//! Draw calls only append quads to a CPU-side mesh; nothing touches the GPU
//! until `present()`, which streams the mesh into vertex/index buffers,
//! records one render pass and presents the surface texture. The logical
//! canvas is stretched over the whole surface, so the window can be any
//! physical size.

use std::sync::Arc;

use mpg_core::{validate_rgba, Canvas, CanvasError, Color, Rect};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::gpu_context::{GpuContext, RenderError};
use crate::mesh::{BatchKey, QuadMesh};
use crate::projection::ScreenProjection;
use crate::quad_pipeline::QuadPipeline;
use crate::texture::{GpuTexture, Texture};
use crate::vertex::QuadVertex;

pub struct GpuCanvas {
    gpu: GpuContext,
    pipeline: QuadPipeline,
    projection: ScreenProjection,
    projection_bind_group: wgpu::BindGroup,
    white: GpuTexture,
    clear_color: wgpu::Color,

    // The mesh is rebuilt every frame, then streamed into these buffers.
    // Buffers grow (power-of-two) but never shrink.
    mesh: QuadMesh<GpuTexture>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
}

impl GpuCanvas {
    pub fn new(
        window: Arc<Window>,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Result<Self, RenderError> {
        let gpu = GpuContext::new(window)?;
        let pipeline = QuadPipeline::new(&gpu.device, gpu.surface_format);
        let projection = ScreenProjection::new(canvas_width, canvas_height);

        let projection_buffer =
            gpu.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Projection Uniform Buffer"),
                    contents: bytemuck::cast_slice(&[projection.build_uniform()]),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
        let projection_bind_group =
            pipeline.create_projection_bind_group(&gpu.device, &projection_buffer);

        let white_texture = Texture::from_rgba8(
            &gpu.device,
            &gpu.queue,
            &Color::WHITE.to_rgba8(),
            1,
            1,
            "solid_white",
        );
        let white_bind_group = pipeline.create_texture_bind_group(&gpu.device, &white_texture);
        let white = GpuTexture::new(white_texture, white_bind_group);

        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        log::info!(
            "Renderer ready: {:?}, canvas {}x{} on surface {}x{}",
            gpu.surface_format,
            canvas_width,
            canvas_height,
            gpu.size.0,
            gpu.size.1
        );

        Ok(Self {
            gpu,
            pipeline,
            projection,
            projection_bind_group,
            white,
            clear_color: wgpu::Color::BLACK,
            mesh: QuadMesh::new(),
            vertex_buffer,
            index_buffer,
            mesh_vertex_capacity: 1,
            mesh_index_capacity: 1,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        log::debug!("Surface resized to {}x{}", width, height);
    }

    /// Physical size of the window surface.
    pub fn surface_size(&self) -> (u32, u32) {
        self.gpu.size
    }

    pub fn present(&mut self) {
        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            self.mesh.clear();
            return;
        }
        let Some((output, view)) = self.gpu.begin_frame() else {
            self.mesh.clear();
            return;
        };

        self.ensure_mesh_capacity(self.mesh.vertices.len(), self.mesh.indices.len());
        if !self.mesh.is_empty() {
            self.gpu.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&self.mesh.vertices),
            );
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.mesh.indices));
        }

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if !self.mesh.draw_calls.is_empty() {
                render_pass.set_pipeline(&self.pipeline.render_pipeline);
                render_pass.set_bind_group(0, &self.projection_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                let mut last_bound: Option<&GpuTexture> = None;
                for draw in &self.mesh.draw_calls {
                    let need_rebind = match last_bound {
                        Some(last) => !last.same_batch(&draw.key),
                        None => true,
                    };
                    if need_rebind {
                        render_pass.set_bind_group(1, draw.key.bind_group(), &[]);
                        last_bound = Some(&draw.key);
                    }
                    render_pass.draw_indexed(
                        draw.index_start..(draw.index_start + draw.index_count),
                        0,
                        0..1,
                    );
                }
            }
        }

        log::trace!(
            "Frame: {} quads in {} draw calls",
            self.mesh.quad_count(),
            self.mesh.draw_calls.len()
        );

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.mesh.clear();
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }
}

impl Canvas for GpuCanvas {
    type Texture = GpuTexture;

    fn size(&self) -> (u32, u32) {
        self.projection.canvas
    }

    /// Clearing discards everything queued so far this frame.
    fn clear(&mut self, color: Color) {
        let [r, g, b, a] = color.to_f32_array();
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };
        self.mesh.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.mesh.push_quad(rect, color, &self.white);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        for edge in rect.outline_edges() {
            self.mesh.push_quad(edge, color, &self.white);
        }
    }

    fn draw_texture(&mut self, texture: &GpuTexture, dst: Rect) {
        self.mesh.push_quad(dst, Color::WHITE, texture);
    }

    fn create_texture(
        &mut self,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Result<GpuTexture, CanvasError> {
        validate_rgba(rgba, width, height, self.gpu.max_texture_dimension(), label)?;
        let texture = Texture::from_rgba8(&self.gpu.device, &self.gpu.queue, rgba, width, height, label);
        let bind_group = self
            .pipeline
            .create_texture_bind_group(&self.gpu.device, &texture);
        Ok(GpuTexture::new(texture, bind_group))
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<QuadVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Canvas Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Canvas Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
