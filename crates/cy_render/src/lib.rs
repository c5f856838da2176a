pub mod camera;
pub mod gpu_context;
pub mod mesh_pipeline;
pub mod skybox_pipeline;
pub mod texture;
pub mod uniforms;
pub mod vertex;

pub use camera::{CameraUniform, FlyCamera, MoveDirection, SkyboxUniform};
pub use gpu_context::{GpuContext, DEPTH_FORMAT};
pub use mesh_pipeline::MeshPipeline;
pub use skybox_pipeline::SkyboxPipeline;
pub use texture::{Cubemap, Texture};
pub use uniforms::{LightsUniform, RenderParams};
pub use vertex::{MeshVertex, SkyVertex};
