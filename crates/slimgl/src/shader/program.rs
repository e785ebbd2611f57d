use std::collections::HashMap;
use std::rc::Rc;

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use super::ShaderStage;
use crate::backend::{Backend, NativeId};
use crate::context::Context;
use crate::data::{ShaderLinkingResult, Uniform, UniformInfo, UniformValue};
use crate::types::UniformType;

/// Linked shader program with a reflected view of its active uniforms.
///
/// After a successful [`link`](Self::link) every active uniform with a
/// location is cached by name, so [`set_uniform`](Self::set_uniform) and
/// [`uniform`](Self::uniform) never query the driver for locations.
pub struct ShaderProgram {
    backend: Rc<dyn Backend>,
    id: NativeId,
    attached: Vec<NativeId>,
    locations: HashMap<String, u32>,
    uniforms: HashMap<String, UniformInfo>,
}

impl ShaderProgram {
    pub fn new(context: &Context) -> Self {
        let backend = context.backend();
        let id = backend.create_program();
        log::trace!("program {id} created");

        Self {
            backend,
            id,
            attached: Vec::new(),
            locations: HashMap::new(),
            uniforms: HashMap::new(),
        }
    }

    pub fn bind(&self) {
        self.backend.use_program(self.id);
    }

    pub fn unbind(&self) {
        self.backend.use_program(0);
    }

    pub fn attach(&mut self, stage: &ShaderStage) {
        self.backend.attach_shader(self.id, stage.id());
        self.attached.push(stage.id());
    }

    pub fn detach(&mut self, stage: &ShaderStage) {
        self.backend.detach_shader(self.id, stage.id());
        self.attached.retain(|id| *id != stage.id());
    }

    /// Detaches every stage attached through [`attach`](Self::attach).
    pub fn detach_all(&mut self) {
        for shader in self.attached.drain(..) {
            self.backend.detach_shader(self.id, shader);
        }
    }

    /// Links the attached stages. On success, uniforms are reflected again.
    pub fn link(&mut self) -> ShaderLinkingResult {
        self.backend.link_program(self.id);

        if !self.backend.program_link_status(self.id) {
            let message = self.backend.program_info_log(self.id);
            log::debug!("program {} failed to link", self.id);
            return ShaderLinkingResult::failed(message);
        }

        self.query_uniforms();
        log::debug!(
            "program {} linked with {} reflected uniforms",
            self.id,
            self.uniforms.len()
        );

        ShaderLinkingResult::succeeded()
    }

    /// Sets `name` on this program. The program must be bound.
    ///
    /// Names without a cached location are ignored.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: &T) {
        if let Some(&location) = self.locations.get(name) {
            self.backend.set_uniform(location, value.into_value());
        }
    }

    /// Reads the current value of `name`, or `T::default()` for unknown names.
    pub fn uniform<T: Uniform>(&self, name: &str) -> T {
        self.locations
            .get(name)
            .map(|&location| T::read(self.backend.as_ref(), self.id, location))
            .unwrap_or_default()
    }

    pub fn uniform_info(&self, name: &str) -> Option<&UniformInfo> {
        self.uniforms.get(name)
    }

    pub fn uniforms(&self) -> &HashMap<String, UniformInfo> {
        &self.uniforms
    }

    /// Rebuilds the location cache and the uniform table from the driver.
    ///
    /// Uniforms without a location (block members) are skipped. Uniforms of
    /// unsupported types keep their cached location but are not listed.
    pub fn query_uniforms(&mut self) {
        self.locations.clear();
        self.uniforms.clear();

        for index in 0..self.backend.active_uniform_count(self.id) {
            let Some(active) = self.backend.active_uniform(self.id, index) else {
                continue;
            };
            let Some(location) = self.backend.uniform_location(self.id, &active.name) else {
                log::trace!("uniform `{}` has no location, skipped", active.name);
                continue;
            };

            self.locations.insert(active.name.clone(), location);

            let Some(ty) = active.ty else {
                continue;
            };
            let Some(default_value) = self.read_default(ty, location) else {
                log::trace!("uniform `{}` of type {ty:?} is not reflected", active.name);
                continue;
            };

            self.uniforms.insert(
                active.name.clone(),
                UniformInfo {
                    ty,
                    name: active.name,
                    default_value,
                },
            );
        }
    }

    fn read_default(&self, ty: UniformType, location: u32) -> Option<UniformValue> {
        let backend = self.backend.as_ref();
        let id = self.id;

        let value = match ty {
            UniformType::Bool => UniformValue::Bool(bool::read(backend, id, location)),
            UniformType::Int => UniformValue::Int(i32::read(backend, id, location)),
            UniformType::UnsignedInt => UniformValue::UnsignedInt(u32::read(backend, id, location)),
            UniformType::Float => UniformValue::Float(f32::read(backend, id, location)),
            UniformType::FloatVec2 => UniformValue::Vec2(Vec2::read(backend, id, location)),
            UniformType::FloatVec3 => UniformValue::Vec3(Vec3::read(backend, id, location)),
            UniformType::FloatVec4 => UniformValue::Vec4(Vec4::read(backend, id, location)),
            UniformType::FloatMat3 => UniformValue::Mat3(Mat3::read(backend, id, location)),
            UniformType::FloatMat4 => UniformValue::Mat4(Mat4::read(backend, id, location)),
            UniformType::Sampler2D | UniformType::SamplerCube => UniformValue::Sampler(None),
            UniformType::DoubleMat4 | UniformType::Image2D | UniformType::ImageCube => {
                return None;
            }
        };

        Some(value)
    }

    pub fn id(&self) -> NativeId {
        self.id
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.backend.delete_program(self.id);
        log::trace!("program {} deleted", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, ObjectKind};
    use crate::types::ShaderType;

    fn linked_program(ctx: &Context) -> ShaderProgram {
        let vs = ShaderStage::new(ctx, ShaderType::Vertex);
        let fs = ShaderStage::new(ctx, ShaderType::Fragment);
        let mut program = ShaderProgram::new(ctx);
        program.attach(&vs);
        program.attach(&fs);
        assert!(program.link().success);
        program.detach_all();
        program
    }

    #[test]
    fn bind_and_unbind_are_symmetric() {
        let (ctx, mock) = Context::mock();
        let program = linked_program(&ctx);
        mock.take_calls();

        program.bind();
        program.unbind();
        assert_eq!(
            mock.calls(),
            vec![Call::UseProgram(program.id()), Call::UseProgram(0)]
        );
    }

    #[test]
    fn reflection_lists_supported_uniforms() {
        let (ctx, mock) = Context::mock();
        mock.declare_uniform("u_model", Some(UniformType::FloatMat4), Some(0));
        mock.declare_uniform("u_tint", Some(UniformType::FloatVec4), Some(1));
        mock.declare_uniform("u_albedo", Some(UniformType::Sampler2D), Some(2));
        mock.declare_uniform("u_wireframe", Some(UniformType::Bool), Some(3));

        let program = linked_program(&ctx);

        assert_eq!(program.uniforms().len(), 4);
        let albedo = program.uniform_info("u_albedo").unwrap();
        assert_eq!(albedo.ty, UniformType::Sampler2D);
        assert_eq!(albedo.default_value, UniformValue::Sampler(None));
        assert_eq!(
            program.uniform_info("u_wireframe").unwrap().default_value,
            UniformValue::Bool(false)
        );
        assert_eq!(
            program.uniform_info("u_model").unwrap().default_value,
            UniformValue::Mat4(Mat4::ZERO)
        );
    }

    #[test]
    fn location_zero_is_a_real_location() {
        let (ctx, mock) = Context::mock();
        mock.declare_uniform("u_time", Some(UniformType::Float), Some(0));

        let program = linked_program(&ctx);
        program.bind();
        program.set_uniform("u_time", &1.5f32);

        assert!(mock.calls().contains(&Call::SetUniform(0, UniformValue::Float(1.5))));
        assert_eq!(program.uniform::<f32>("u_time"), 1.5);
    }

    #[test]
    fn block_members_and_unsupported_types_are_skipped() {
        let (ctx, mock) = Context::mock();
        mock.declare_uniform("Camera.view", Some(UniformType::FloatMat4), None);
        mock.declare_uniform("u_image", Some(UniformType::Image2D), Some(4));
        mock.declare_uniform("u_exotic", None, Some(5));
        mock.declare_uniform("u_scale", Some(UniformType::Float), Some(6));

        let program = linked_program(&ctx);

        assert!(program.uniform_info("Camera.view").is_none());
        assert!(program.uniform_info("u_image").is_none());
        assert!(program.uniform_info("u_exotic").is_none());
        assert!(program.uniform_info("u_scale").is_some());
        assert_eq!(program.uniforms().len(), 1);

        // Unlisted but located uniforms remain settable.
        program.bind();
        program.set_uniform("u_image", &3i32);
        assert!(mock.calls().contains(&Call::SetUniform(4, UniformValue::Int(3))));
    }

    #[test]
    fn typed_values_round_trip() {
        let (ctx, mock) = Context::mock();
        mock.declare_uniform("u_offset", Some(UniformType::FloatVec3), Some(0));
        mock.declare_uniform("u_normal", Some(UniformType::FloatMat3), Some(1));
        mock.declare_uniform("u_count", Some(UniformType::UnsignedInt), Some(2));
        mock.declare_uniform("u_enabled", Some(UniformType::Bool), Some(3));

        let program = linked_program(&ctx);
        program.bind();

        let offset = Vec3::new(1.0, -2.0, 0.5);
        let normal = Mat3::from_cols(Vec3::X, Vec3::Z, Vec3::Y);
        program.set_uniform("u_offset", &offset);
        program.set_uniform("u_normal", &normal);
        program.set_uniform("u_count", &7u32);
        program.set_uniform("u_enabled", &true);

        assert_eq!(program.uniform::<Vec3>("u_offset"), offset);
        assert_eq!(program.uniform::<Mat3>("u_normal"), normal);
        assert_eq!(program.uniform::<u32>("u_count"), 7);
        assert!(program.uniform::<bool>("u_enabled"));
    }

    #[test]
    fn unsigned_values_keep_their_high_bit() {
        let (ctx, mock) = Context::mock();
        mock.declare_uniform("u_seed", Some(UniformType::UnsignedInt), Some(0));

        let program = linked_program(&ctx);
        program.bind();
        program.set_uniform("u_seed", &u32::MAX);
        assert_eq!(program.uniform::<u32>("u_seed"), u32::MAX);
    }

    #[test]
    fn unknown_names_are_ignored() {
        let (ctx, mock) = Context::mock();
        let program = linked_program(&ctx);
        mock.take_calls();

        program.set_uniform("u_missing", &Vec4::ONE);
        assert!(mock.calls().is_empty());
        assert_eq!(program.uniform::<Vec4>("u_missing"), Vec4::ZERO);
        assert_eq!(program.uniform::<i32>("u_missing"), 0);
    }

    #[test]
    fn relinking_refreshes_reflection() {
        let (ctx, mock) = Context::mock();
        mock.declare_uniform("u_a", Some(UniformType::Int), Some(0));

        let mut program = linked_program(&ctx);
        assert_eq!(program.uniforms().len(), 1);

        mock.declare_uniform("u_b", Some(UniformType::Int), Some(1));
        assert!(program.link().success);
        assert_eq!(program.uniforms().len(), 2);
    }

    #[test]
    fn failed_link_reports_log_and_keeps_previous_reflection() {
        let (ctx, mock) = Context::mock();
        mock.declare_uniform("u_a", Some(UniformType::Int), Some(0));
        let mut program = linked_program(&ctx);

        mock.fail_next_link("error: missing main");
        let result = program.link();
        assert!(!result.success);
        assert_eq!(result.message, "error: missing main");
        assert!(result.into_result().is_err());
        assert!(program.uniform_info("u_a").is_some());
    }

    #[test]
    fn detach_all_detaches_each_stage_once() {
        let (ctx, mock) = Context::mock();
        let vs = ShaderStage::new(&ctx, ShaderType::Vertex);
        let fs = ShaderStage::new(&ctx, ShaderType::Fragment);
        let mut program = ShaderProgram::new(&ctx);
        program.attach(&vs);
        program.attach(&fs);
        program.detach(&vs);
        mock.take_calls();

        program.detach_all();
        assert_eq!(
            mock.calls(),
            vec![Call::DetachShader {
                program: program.id(),
                shader: fs.id()
            }]
        );
    }

    #[test]
    fn drop_deletes_the_program() {
        let (ctx, mock) = Context::mock();
        drop(ShaderProgram::new(&ctx));
        assert_eq!(mock.live_count(ObjectKind::Program), 0);
    }
}
