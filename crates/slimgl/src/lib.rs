//! slimgl: thin RAII handles over OpenGL 4.5 core objects.
//!
//! Every GL object (buffer, vertex array, shader stage, program, texture,
//! renderbuffer, framebuffer) is owned by a wrapper that deletes it on drop.
//! Raw integer constants are replaced by the typed enums in [`types`], and all
//! native calls go through the [`backend::Backend`] seam so the wrappers can be
//! exercised without a GPU.
//!
//! Wrappers keep a reference to the backend they were created from and are
//! `!Send`: GL contexts are bound to one thread.

pub mod backend;
pub mod data;
pub mod logging;
pub mod types;

mod buffer;
mod context;
mod error;
mod framebuffer;
mod renderbuffer;
mod shader;
mod texture;
mod vertex_array;

pub use buffer::Buffer;
pub use context::{Context, ContextInit};
pub use error::{Error, Result};
pub use framebuffer::{Attachable, Attachment, Framebuffer};
pub use renderbuffer::Renderbuffer;
pub use shader::{ShaderProgram, ShaderStage};
pub use texture::{Texture, TextureHandle};
pub use vertex_array::VertexArray;

/// Re-exported so applications can build a `glow::Context` for [`Context::from_glow`].
pub use glow;
