//! Shader stages and the programs they are linked into.

mod program;
mod stage;

pub use program::ShaderProgram;
pub use stage::ShaderStage;
