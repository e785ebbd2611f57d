use std::rc::Rc;

use crate::backend::{Backend, NativeId};
use crate::context::Context;
use crate::data::ShaderCompilationResult;
use crate::types::ShaderType;

/// A single shader stage (vertex, fragment, compute, ...).
pub struct ShaderStage {
    backend: Rc<dyn Backend>,
    id: NativeId,
    ty: ShaderType,
}

impl ShaderStage {
    pub fn new(context: &Context, ty: ShaderType) -> Self {
        let backend = context.backend();
        let id = backend.create_shader(ty);
        log::trace!("{ty} shader {id} created");

        Self { backend, id, ty }
    }

    /// Replaces the stage's source code. Takes effect on the next [`compile`](Self::compile).
    pub fn upload(&self, source: &str) {
        self.backend.shader_source(self.id, source);
    }

    /// Compiles the uploaded source. On failure the result carries the driver's info log.
    pub fn compile(&self) -> ShaderCompilationResult {
        self.backend.compile_shader(self.id);

        if self.backend.shader_compile_status(self.id) {
            ShaderCompilationResult::succeeded()
        } else {
            let message = self.backend.shader_info_log(self.id);
            log::debug!("{} shader {} failed to compile", self.ty, self.id);
            ShaderCompilationResult::failed(message)
        }
    }

    pub fn shader_type(&self) -> ShaderType {
        self.ty
    }

    pub fn id(&self) -> NativeId {
        self.id
    }
}

impl Drop for ShaderStage {
    fn drop(&mut self) {
        self.backend.delete_shader(self.id);
        log::trace!("{} shader {} deleted", self.ty, self.id);
    }
}
