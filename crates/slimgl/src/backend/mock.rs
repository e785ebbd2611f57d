use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use super::{ActiveUniform, Backend, DriverString, NativeId, SamplerParams};
use crate::context::{Context, ContextInit};
use crate::data::UniformValue;
use crate::types::{
    AccessSpecifier, BlendingEquation, BlendingFactor, BufferType, ComparisonAlgorithm, CullFace,
    DataType, Format, FramebufferAttachment, FramebufferStatus, GraphicsBackend,
    ImageAccessSpecifier, InternalFormat, MemoryBarrierFlags, PixelDataType, PrimitiveMode,
    RasterizationMode, RenderingCapability, ShaderType, StencilOperation, TextureType,
    UniformType,
};

/// Kinds of native objects the mock hands out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Buffer,
    VertexArray,
    Shader,
    Program,
    Texture,
    Renderbuffer,
    Framebuffer,
}

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(ObjectKind, NativeId),
    Delete(ObjectKind, NativeId),
    BufferStorage { buffer: NativeId, size: u64, usage: AccessSpecifier },
    BufferSubData { buffer: NativeId, offset: u64, data: Vec<u8> },
    BindBuffer(BufferType, NativeId),
    BindBufferBase(BufferType, u32, NativeId),
    BindVertexArray(NativeId),
    EnableVertexAttrib(u32),
    DisableVertexAttrib(u32),
    VertexAttribPointer {
        index: u32,
        count: u8,
        ty: DataType,
        normalized: bool,
        stride: u32,
        offset: u32,
    },
    ShaderSource(NativeId, String),
    CompileShader(NativeId),
    AttachShader { program: NativeId, shader: NativeId },
    DetachShader { program: NativeId, shader: NativeId },
    LinkProgram(NativeId),
    UseProgram(NativeId),
    SetUniform(u32, UniformValue),
    BindTexture(TextureType, NativeId),
    BindTextureUnit { unit: u32, ty: TextureType, texture: NativeId },
    BindImageTexture {
        unit: u32,
        texture: NativeId,
        level: u32,
        layered: bool,
        layer: u32,
        access: ImageAccessSpecifier,
        format: InternalFormat,
    },
    TexImage2D {
        texture: NativeId,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
        format: Format,
        ty: PixelDataType,
        with_data: bool,
    },
    TexStorage2D {
        texture: NativeId,
        ty: TextureType,
        levels: u32,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
    },
    TexSubImage2D {
        texture: NativeId,
        face: u32,
        width: u32,
        height: u32,
        len: usize,
    },
    SamplerParams(NativeId, SamplerParams),
    BorderColor(NativeId, [f32; 4]),
    GenerateMipmap(NativeId),
    BindRenderbuffer(NativeId),
    RenderbufferStorage { renderbuffer: NativeId, format: InternalFormat, width: u32, height: u32 },
    BindFramebuffer(NativeId),
    FramebufferTexture {
        framebuffer: NativeId,
        point: FramebufferAttachment,
        index: u32,
        texture: NativeId,
        level: u32,
        layer: Option<u32>,
    },
    FramebufferRenderbuffer {
        framebuffer: NativeId,
        point: FramebufferAttachment,
        index: u32,
        renderbuffer: NativeId,
    },
    DrawBuffer(NativeId, Option<u32>),
    ReadBuffer(NativeId, Option<u32>),
    Blit { src: NativeId, dst: NativeId, src_size: (u32, u32), dst_size: (u32, u32) },
    ReadPixels { x: u32, y: u32, width: u32, height: u32 },
    Clear { color: bool, depth: bool, stencil: bool },
    ClearColor([f32; 4]),
    DrawElements { mode: PrimitiveMode, count: u32, instances: Option<u32> },
    DrawArrays { mode: PrimitiveMode, count: u32, instances: Option<u32> },
    DispatchCompute(u32, u32, u32),
    MemoryBarrier(MemoryBarrierFlags),
    LineWidth(f32),
    PolygonMode(RasterizationMode),
    SetCapability(RenderingCapability, bool),
    StencilFunc(ComparisonAlgorithm, i32, u32),
    DepthFunc(ComparisonAlgorithm),
    StencilMask(u32),
    StencilOp(StencilOperation, StencilOperation, StencilOperation),
    BlendFunc(BlendingFactor, BlendingFactor),
    BlendEquation(BlendingEquation),
    CullFace(CullFace),
    DepthMask(bool),
    ColorMask(bool, bool, bool, bool),
    Viewport(u32, u32, u32, u32),
    PatchVertices(u32),
}

/// Uniform the mock reports as active in every successfully linked program.
#[derive(Debug, Clone, PartialEq)]
pub struct MockUniform {
    pub name: String,
    pub ty: Option<UniformType>,
    /// `None` mimics uniforms without a location (block members).
    pub location: Option<u32>,
}

#[derive(Default)]
struct MockState {
    next_id: NativeId,
    live: BTreeMap<NativeId, ObjectKind>,
    calls: Vec<Call>,

    compile_failure: Option<String>,
    link_failure: Option<String>,
    shader_status: HashMap<NativeId, (bool, String)>,
    program_status: HashMap<NativeId, (bool, String)>,

    uniforms: Vec<MockUniform>,
    uniform_values: HashMap<(NativeId, u32), UniformValue>,
    current_program: NativeId,

    capabilities: BTreeSet<RenderingCapability>,
    attachments: BTreeMap<(NativeId, FramebufferAttachment, u32), NativeId>,
    forced_status: Option<FramebufferStatus>,
}

/// Recording fake driver.
///
/// Hands out increasing non-zero ids, tracks which objects are alive and
/// logs every state-changing call. Knobs allow tests to force compile and
/// link failures, declare active uniforms and override framebuffer status.
#[derive(Default)]
pub struct MockBackend {
    state: RefCell<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Drains the recorded calls.
    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    /// Number of live objects of `kind`.
    pub fn live_count(&self, kind: ObjectKind) -> usize {
        self.state.borrow().live.values().filter(|k| **k == kind).count()
    }

    pub fn is_alive(&self, id: NativeId) -> bool {
        self.state.borrow().live.contains_key(&id)
    }

    /// The next compiled shader fails with `message`.
    pub fn fail_next_compile(&self, message: impl Into<String>) {
        self.state.borrow_mut().compile_failure = Some(message.into());
    }

    /// The next linked program fails with `message`.
    pub fn fail_next_link(&self, message: impl Into<String>) {
        self.state.borrow_mut().link_failure = Some(message.into());
    }

    pub fn declare_uniform(
        &self,
        name: impl Into<String>,
        ty: Option<UniformType>,
        location: Option<u32>,
    ) {
        self.state.borrow_mut().uniforms.push(MockUniform {
            name: name.into(),
            ty,
            location,
        });
    }

    /// Overrides the status every framebuffer reports (`None` restores the default).
    pub fn force_framebuffer_status(&self, status: Option<FramebufferStatus>) {
        self.state.borrow_mut().forced_status = status;
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn create(&self, kind: ObjectKind) -> NativeId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.live.insert(id, kind);
        state.calls.push(Call::Create(kind, id));
        id
    }

    fn delete(&self, kind: ObjectKind, id: NativeId) {
        if id == 0 {
            return;
        }
        let mut state = self.state.borrow_mut();
        if state.live.get(&id) == Some(&kind) {
            state.live.remove(&id);
        }
        state.calls.push(Call::Delete(kind, id));
    }

    fn linked(&self, program: NativeId) -> bool {
        self.state
            .borrow()
            .program_status
            .get(&program)
            .is_some_and(|(ok, _)| *ok)
    }

    fn stored_uniform(&self, program: NativeId, location: u32) -> Option<UniformValue> {
        self.state
            .borrow()
            .uniform_values
            .get(&(program, location))
            .copied()
    }
}

impl Context {
    /// Context on top of a fresh [`MockBackend`], with initialization calls
    /// already drained.
    pub fn mock() -> (Context, Rc<MockBackend>) {
        let backend = Rc::new(MockBackend::new());
        let context = Context::new(backend.clone(), ContextInit::default());
        backend.take_calls();
        (context, backend)
    }
}

impl Backend for MockBackend {
    fn kind(&self) -> GraphicsBackend {
        GraphicsBackend::Mock
    }

    fn create_buffer(&self) -> NativeId {
        self.create(ObjectKind::Buffer)
    }

    fn delete_buffer(&self, buffer: NativeId) {
        self.delete(ObjectKind::Buffer, buffer);
    }

    fn buffer_storage(&self, buffer: NativeId, size: u64, usage: AccessSpecifier) {
        self.record(Call::BufferStorage { buffer, size, usage });
    }

    fn buffer_sub_data(&self, buffer: NativeId, offset: u64, data: &[u8]) {
        self.record(Call::BufferSubData {
            buffer,
            offset,
            data: data.to_vec(),
        });
    }

    fn bind_buffer(&self, target: BufferType, buffer: NativeId) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn bind_buffer_base(&self, target: BufferType, index: u32, buffer: NativeId) {
        self.record(Call::BindBufferBase(target, index, buffer));
    }

    fn create_vertex_array(&self) -> NativeId {
        self.create(ObjectKind::VertexArray)
    }

    fn delete_vertex_array(&self, vertex_array: NativeId) {
        self.delete(ObjectKind::VertexArray, vertex_array);
    }

    fn bind_vertex_array(&self, vertex_array: NativeId) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn enable_vertex_attrib(&self, index: u32) {
        self.record(Call::EnableVertexAttrib(index));
    }

    fn disable_vertex_attrib(&self, index: u32) {
        self.record(Call::DisableVertexAttrib(index));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        count: u8,
        ty: DataType,
        normalized: bool,
        stride: u32,
        offset: u32,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            count,
            ty,
            normalized,
            stride,
            offset,
        });
    }

    fn create_shader(&self, _ty: ShaderType) -> NativeId {
        self.create(ObjectKind::Shader)
    }

    fn delete_shader(&self, shader: NativeId) {
        self.delete(ObjectKind::Shader, shader);
    }

    fn shader_source(&self, shader: NativeId, source: &str) {
        self.record(Call::ShaderSource(shader, source.to_owned()));
    }

    fn compile_shader(&self, shader: NativeId) {
        let mut state = self.state.borrow_mut();
        let status = match state.compile_failure.take() {
            Some(message) => (false, message),
            None => (true, String::new()),
        };
        state.shader_status.insert(shader, status);
        state.calls.push(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: NativeId) -> bool {
        self.state
            .borrow()
            .shader_status
            .get(&shader)
            .is_some_and(|(ok, _)| *ok)
    }

    fn shader_info_log(&self, shader: NativeId) -> String {
        self.state
            .borrow()
            .shader_status
            .get(&shader)
            .map(|(_, log)| log.clone())
            .unwrap_or_default()
    }

    fn create_program(&self) -> NativeId {
        self.create(ObjectKind::Program)
    }

    fn delete_program(&self, program: NativeId) {
        self.delete(ObjectKind::Program, program);
    }

    fn attach_shader(&self, program: NativeId, shader: NativeId) {
        self.record(Call::AttachShader { program, shader });
    }

    fn detach_shader(&self, program: NativeId, shader: NativeId) {
        self.record(Call::DetachShader { program, shader });
    }

    fn link_program(&self, program: NativeId) {
        let mut state = self.state.borrow_mut();
        let status = match state.link_failure.take() {
            Some(message) => (false, message),
            None => (true, String::new()),
        };
        state.program_status.insert(program, status);
        state.calls.push(Call::LinkProgram(program));
    }

    fn program_link_status(&self, program: NativeId) -> bool {
        self.linked(program)
    }

    fn program_info_log(&self, program: NativeId) -> String {
        self.state
            .borrow()
            .program_status
            .get(&program)
            .map(|(_, log)| log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: NativeId) {
        let mut state = self.state.borrow_mut();
        state.current_program = program;
        state.calls.push(Call::UseProgram(program));
    }

    fn active_uniform_count(&self, program: NativeId) -> u32 {
        if self.linked(program) {
            self.state.borrow().uniforms.len() as u32
        } else {
            0
        }
    }

    fn active_uniform(&self, program: NativeId, index: u32) -> Option<ActiveUniform> {
        if !self.linked(program) {
            return None;
        }
        let state = self.state.borrow();
        let uniform = state.uniforms.get(index as usize)?;
        Some(ActiveUniform {
            name: uniform.name.clone(),
            ty: uniform.ty,
            size: 1,
        })
    }

    fn uniform_location(&self, program: NativeId, name: &str) -> Option<u32> {
        if !self.linked(program) {
            return None;
        }
        self.state
            .borrow()
            .uniforms
            .iter()
            .find(|u| u.name == name)
            .and_then(|u| u.location)
    }

    fn set_uniform(&self, location: u32, value: UniformValue) {
        let mut state = self.state.borrow_mut();
        let program = state.current_program;
        state.uniform_values.insert((program, location), value);
        state.calls.push(Call::SetUniform(location, value));
    }

    fn get_uniform_i32(&self, program: NativeId, location: u32, out: &mut [i32]) {
        let values = self
            .stored_uniform(program, location)
            .map(UniformValue::to_i32s)
            .unwrap_or_default();
        for (dst, src) in out.iter_mut().zip(values.into_iter().chain(std::iter::repeat(0))) {
            *dst = src;
        }
    }

    fn get_uniform_u32(&self, program: NativeId, location: u32, out: &mut [u32]) {
        let values: Vec<u32> = match self.stored_uniform(program, location) {
            Some(UniformValue::UnsignedInt(v)) => vec![v],
            Some(other) => other.to_i32s().into_iter().map(|v| v as u32).collect(),
            None => Vec::new(),
        };
        for (dst, src) in out.iter_mut().zip(values.into_iter().chain(std::iter::repeat(0))) {
            *dst = src;
        }
    }

    fn get_uniform_f32(&self, program: NativeId, location: u32, out: &mut [f32]) {
        let values = self
            .stored_uniform(program, location)
            .map(UniformValue::to_f32s)
            .unwrap_or_default();
        for (dst, src) in out.iter_mut().zip(values.into_iter().chain(std::iter::repeat(0.0))) {
            *dst = src;
        }
    }

    fn create_texture(&self, _ty: TextureType) -> NativeId {
        self.create(ObjectKind::Texture)
    }

    fn delete_texture(&self, texture: NativeId) {
        self.delete(ObjectKind::Texture, texture);
    }

    fn bind_texture(&self, ty: TextureType, texture: NativeId) {
        self.record(Call::BindTexture(ty, texture));
    }

    fn bind_texture_unit(&self, unit: u32, ty: TextureType, texture: NativeId) {
        self.record(Call::BindTextureUnit { unit, ty, texture });
    }

    fn bind_image_texture(
        &self,
        unit: u32,
        texture: NativeId,
        level: u32,
        layered: bool,
        layer: u32,
        access: ImageAccessSpecifier,
        format: InternalFormat,
    ) {
        self.record(Call::BindImageTexture {
            unit,
            texture,
            level,
            layered,
            layer,
            access,
            format,
        });
    }

    fn tex_image_2d(
        &self,
        texture: NativeId,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
        format: Format,
        ty: PixelDataType,
        data: Option<&[u8]>,
    ) {
        self.record(Call::TexImage2D {
            texture,
            internal_format,
            width,
            height,
            format,
            ty,
            with_data: data.is_some(),
        });
    }

    fn tex_storage_2d(
        &self,
        texture: NativeId,
        ty: TextureType,
        levels: u32,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
    ) {
        self.record(Call::TexStorage2D {
            texture,
            ty,
            levels,
            internal_format,
            width,
            height,
        });
    }

    fn tex_sub_image_2d(
        &self,
        texture: NativeId,
        _ty: TextureType,
        face: u32,
        width: u32,
        height: u32,
        _format: Format,
        _pixel_type: PixelDataType,
        data: &[u8],
    ) {
        self.record(Call::TexSubImage2D {
            texture,
            face,
            width,
            height,
            len: data.len(),
        });
    }

    fn texture_sampler_params(&self, texture: NativeId, _ty: TextureType, params: SamplerParams) {
        self.record(Call::SamplerParams(texture, params));
    }

    fn texture_border_color(&self, texture: NativeId, _ty: TextureType, color: [f32; 4]) {
        self.record(Call::BorderColor(texture, color));
    }

    fn generate_mipmap(&self, texture: NativeId, _ty: TextureType) {
        self.record(Call::GenerateMipmap(texture));
    }

    fn create_renderbuffer(&self) -> NativeId {
        self.create(ObjectKind::Renderbuffer)
    }

    fn delete_renderbuffer(&self, renderbuffer: NativeId) {
        self.delete(ObjectKind::Renderbuffer, renderbuffer);
    }

    fn bind_renderbuffer(&self, renderbuffer: NativeId) {
        self.record(Call::BindRenderbuffer(renderbuffer));
    }

    fn renderbuffer_storage(
        &self,
        renderbuffer: NativeId,
        format: InternalFormat,
        width: u32,
        height: u32,
    ) {
        self.record(Call::RenderbufferStorage {
            renderbuffer,
            format,
            width,
            height,
        });
    }

    fn create_framebuffer(&self) -> NativeId {
        self.create(ObjectKind::Framebuffer)
    }

    fn delete_framebuffer(&self, framebuffer: NativeId) {
        self.state
            .borrow_mut()
            .attachments
            .retain(|(fb, _, _), _| *fb != framebuffer);
        self.delete(ObjectKind::Framebuffer, framebuffer);
    }

    fn bind_framebuffer(&self, framebuffer: NativeId) {
        self.record(Call::BindFramebuffer(framebuffer));
    }

    fn framebuffer_texture(
        &self,
        framebuffer: NativeId,
        point: FramebufferAttachment,
        index: u32,
        texture: NativeId,
        level: u32,
        layer: Option<u32>,
    ) {
        let mut state = self.state.borrow_mut();
        if texture == 0 {
            state.attachments.remove(&(framebuffer, point, index));
        } else {
            state.attachments.insert((framebuffer, point, index), texture);
        }
        state.calls.push(Call::FramebufferTexture {
            framebuffer,
            point,
            index,
            texture,
            level,
            layer,
        });
    }

    fn framebuffer_renderbuffer(
        &self,
        framebuffer: NativeId,
        point: FramebufferAttachment,
        index: u32,
        renderbuffer: NativeId,
    ) {
        let mut state = self.state.borrow_mut();
        if renderbuffer == 0 {
            state.attachments.remove(&(framebuffer, point, index));
        } else {
            state
                .attachments
                .insert((framebuffer, point, index), renderbuffer);
        }
        state.calls.push(Call::FramebufferRenderbuffer {
            framebuffer,
            point,
            index,
            renderbuffer,
        });
    }

    fn framebuffer_status(&self, framebuffer: NativeId) -> Option<FramebufferStatus> {
        let state = self.state.borrow();
        if let Some(status) = state.forced_status {
            return Some(status);
        }
        let attached = state.attachments.keys().any(|(fb, _, _)| *fb == framebuffer);
        Some(if attached {
            FramebufferStatus::Complete
        } else {
            FramebufferStatus::MissingAttachment
        })
    }

    fn framebuffer_draw_buffer(&self, framebuffer: NativeId, color_index: Option<u32>) {
        self.record(Call::DrawBuffer(framebuffer, color_index));
    }

    fn framebuffer_read_buffer(&self, framebuffer: NativeId, color_index: Option<u32>) {
        self.record(Call::ReadBuffer(framebuffer, color_index));
    }

    fn blit_framebuffer(
        &self,
        src: NativeId,
        dst: NativeId,
        src_size: (u32, u32),
        dst_size: (u32, u32),
    ) {
        self.record(Call::Blit {
            src,
            dst,
            src_size,
            dst_size,
        });
    }

    fn read_pixels(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        _format: Format,
        _ty: PixelDataType,
        out: &mut [u8],
    ) {
        out.fill(0);
        self.record(Call::ReadPixels {
            x,
            y,
            width,
            height,
        });
    }

    fn clear(&self, color: bool, depth: bool, stencil: bool) {
        self.record(Call::Clear {
            color,
            depth,
            stencil,
        });
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    fn draw_elements(&self, mode: PrimitiveMode, count: u32, instances: Option<u32>) {
        self.record(Call::DrawElements {
            mode,
            count,
            instances,
        });
    }

    fn draw_arrays(&self, mode: PrimitiveMode, count: u32, instances: Option<u32>) {
        self.record(Call::DrawArrays {
            mode,
            count,
            instances,
        });
    }

    fn dispatch_compute(&self, x: u32, y: u32, z: u32) {
        self.record(Call::DispatchCompute(x, y, z));
    }

    fn memory_barrier(&self, barriers: MemoryBarrierFlags) {
        self.record(Call::MemoryBarrier(barriers));
    }

    fn line_width(&self, width: f32) {
        self.record(Call::LineWidth(width));
    }

    fn polygon_mode(&self, mode: RasterizationMode) {
        self.record(Call::PolygonMode(mode));
    }

    fn set_capability(&self, capability: RenderingCapability, enabled: bool) {
        let mut state = self.state.borrow_mut();
        if enabled {
            state.capabilities.insert(capability);
        } else {
            state.capabilities.remove(&capability);
        }
        state.calls.push(Call::SetCapability(capability, enabled));
    }

    fn capability(&self, capability: RenderingCapability) -> bool {
        self.state.borrow().capabilities.contains(&capability)
    }

    fn stencil_func(&self, algorithm: ComparisonAlgorithm, reference: i32, mask: u32) {
        self.record(Call::StencilFunc(algorithm, reference, mask));
    }

    fn depth_func(&self, algorithm: ComparisonAlgorithm) {
        self.record(Call::DepthFunc(algorithm));
    }

    fn stencil_mask(&self, mask: u32) {
        self.record(Call::StencilMask(mask));
    }

    fn stencil_op(
        &self,
        stencil_fail: StencilOperation,
        depth_fail: StencilOperation,
        both_pass: StencilOperation,
    ) {
        self.record(Call::StencilOp(stencil_fail, depth_fail, both_pass));
    }

    fn blend_func(&self, source: BlendingFactor, destination: BlendingFactor) {
        self.record(Call::BlendFunc(source, destination));
    }

    fn blend_equation(&self, equation: BlendingEquation) {
        self.record(Call::BlendEquation(equation));
    }

    fn cull_face(&self, face: CullFace) {
        self.record(Call::CullFace(face));
    }

    fn depth_mask(&self, enabled: bool) {
        self.record(Call::DepthMask(enabled));
    }

    fn color_mask(&self, red: bool, green: bool, blue: bool, alpha: bool) {
        self.record(Call::ColorMask(red, green, blue, alpha));
    }

    fn viewport(&self, x: u32, y: u32, width: u32, height: u32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn patch_vertices(&self, count: u32) {
        self.record(Call::PatchVertices(count));
    }

    fn driver_string(&self, which: DriverString) -> String {
        match which {
            DriverString::Vendor => "slimgl".to_owned(),
            DriverString::Renderer => "mock".to_owned(),
            DriverString::Version => "4.5 (mock)".to_owned(),
            DriverString::ShadingLanguageVersion => "4.50".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_non_zero_and_unique() {
        let mock = MockBackend::new();
        let a = mock.create_buffer();
        let b = mock.create_texture(TextureType::Texture2D);
        assert_ne!(a, 0);
        assert_ne!(a, b);
        assert_eq!(mock.live_count(ObjectKind::Buffer), 1);
        assert_eq!(mock.live_count(ObjectKind::Texture), 1);
    }

    #[test]
    fn deleting_null_is_not_recorded() {
        let mock = MockBackend::new();
        mock.delete_buffer(0);
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn compile_failure_applies_once() {
        let mock = MockBackend::new();
        mock.fail_next_compile("0:1: syntax error");

        let first = mock.create_shader(ShaderType::Vertex);
        mock.compile_shader(first);
        assert!(!mock.shader_compile_status(first));
        assert_eq!(mock.shader_info_log(first), "0:1: syntax error");

        let second = mock.create_shader(ShaderType::Vertex);
        mock.compile_shader(second);
        assert!(mock.shader_compile_status(second));
    }

    #[test]
    fn uniform_values_are_per_program() {
        let mock = MockBackend::new();
        mock.declare_uniform("u_scale", Some(UniformType::Float), Some(0));
        let a = mock.create_program();
        let b = mock.create_program();
        mock.link_program(a);
        mock.link_program(b);

        mock.use_program(a);
        mock.set_uniform(0, UniformValue::Float(2.5));

        let mut out = [0.0];
        mock.get_uniform_f32(a, 0, &mut out);
        assert_eq!(out, [2.5]);
        mock.get_uniform_f32(b, 0, &mut out);
        assert_eq!(out, [0.0]);
    }

    #[test]
    fn framebuffer_status_follows_attachments() {
        let mock = MockBackend::new();
        let fb = mock.create_framebuffer();
        assert_eq!(
            mock.framebuffer_status(fb),
            Some(FramebufferStatus::MissingAttachment)
        );

        let rb = mock.create_renderbuffer();
        mock.framebuffer_renderbuffer(fb, FramebufferAttachment::Depth, 0, rb);
        assert_eq!(mock.framebuffer_status(fb), Some(FramebufferStatus::Complete));

        mock.force_framebuffer_status(Some(FramebufferStatus::Unsupported));
        assert_eq!(mock.framebuffer_status(fb), Some(FramebufferStatus::Unsupported));
    }
}
