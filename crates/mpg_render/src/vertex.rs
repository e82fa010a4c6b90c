use mpg_core::{Color, Rect};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl QuadVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(QuadVertex, position) as wgpu::BufferAddress,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // tex_coords
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(QuadVertex, tex_coords) as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // color
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(QuadVertex, color) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }

    /// Corners of `rect` in top-left, top-right, bottom-right, bottom-left
    /// order, with the full texture mapped across it.
    pub fn quad(rect: Rect, color: Color) -> [QuadVertex; 4] {
        let color = color.to_f32_array();
        let left = rect.x as f32;
        let top = rect.y as f32;
        let right = left + rect.w as f32;
        let bottom = top + rect.h as f32;
        [
            QuadVertex {
                position: [left, top],
                tex_coords: [0.0, 0.0],
                color,
            },
            QuadVertex {
                position: [right, top],
                tex_coords: [1.0, 0.0],
                color,
            },
            QuadVertex {
                position: [right, bottom],
                tex_coords: [1.0, 1.0],
                color,
            },
            QuadVertex {
                position: [left, bottom],
                tex_coords: [0.0, 1.0],
                color,
            },
        ]
    }
}
