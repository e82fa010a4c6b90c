use glam::{Mat4, Vec4};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProjectionUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Maps logical canvas pixels (origin top-left, y down) to clip space.
pub struct ScreenProjection {
    pub canvas: (u32, u32),
}

impl ScreenProjection {
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas: (canvas_width, canvas_height),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            0.0,
            self.canvas.0 as f32,
            self.canvas.1 as f32,
            0.0,
            -1.0,
            1.0,
        )
    }

    pub fn build_uniform(&self) -> ProjectionUniform {
        ProjectionUniform {
            view_proj: self.matrix().to_cols_array_2d(),
        }
    }

    pub fn to_clip(&self, x: f32, y: f32) -> (f32, f32) {
        let clip = self.matrix() * Vec4::new(x, y, 0.0, 1.0);
        (clip.x, clip.y)
    }
}
