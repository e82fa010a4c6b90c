pub mod canvas;
pub mod gpu_context;
pub mod mesh;
pub mod projection;
pub mod quad_pipeline;
pub mod texture;
pub mod vertex;

pub use canvas::GpuCanvas;
pub use gpu_context::{GpuContext, RenderError};
pub use mesh::{BatchKey, DrawCall, QuadMesh};
pub use projection::{ProjectionUniform, ScreenProjection};
pub use quad_pipeline::QuadPipeline;
pub use texture::{GpuTexture, Texture};
pub use vertex::QuadVertex;
