//! Plain data exchanged with the wrappers: descriptors, results and the
//! uniform value container.

mod buffer;
mod shader;
mod texture;
mod uniform;
mod vertex;

pub use buffer::BufferMemoryRange;
pub use shader::{ShaderCompilationResult, ShaderLinkingResult};
pub use texture::{MutableTextureDesc, TextureDesc};
pub use uniform::{Uniform, UniformInfo, UniformValue};
pub use vertex::VertexAttribute;
