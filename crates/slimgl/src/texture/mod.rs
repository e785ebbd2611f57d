//! Textures: a non-owning [`TextureHandle`] view and the owning [`Texture`].

mod handle;
mod storage;

pub use handle::TextureHandle;
pub use storage::Texture;
