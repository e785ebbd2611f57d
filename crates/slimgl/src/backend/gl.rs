use std::num::NonZeroU32;

use glow::HasContext;

use super::{ActiveUniform, Backend, DriverString, NativeId, SamplerParams};
use crate::data::UniformValue;
use crate::types::{
    AccessSpecifier, BlendingEquation, BlendingFactor, BufferType, ComparisonAlgorithm, CullFace,
    DataType, Format, FramebufferAttachment, FramebufferStatus, GraphicsBackend,
    ImageAccessSpecifier, InternalFormat, MemoryBarrierFlags, PixelDataType, PrimitiveMode,
    RasterizationMode, RenderingCapability, ShaderType, StencilOperation, TextureType,
    UniformType,
};

/// Driver messages that carry no actionable information (buffer placement
/// hints, recompilation notices, and similar).
const IGNORED_DEBUG_IDS: [u32; 4] = [131169, 131185, 131218, 131204];

/// OpenGL backend on top of a `glow` context.
///
/// Every method requires the wrapped context to be current on the calling
/// thread. Edits to buffers, textures, renderbuffers and framebuffers go
/// through bind points; the previous binding is restored afterwards.
pub struct GlBackend {
    gl: glow::Context,
}

impl GlBackend {
    /// Wraps `gl`, optionally routing driver debug output into `log`.
    ///
    /// # Safety
    /// `gl` must have been created for a context that is current on this
    /// thread and stays alive for as long as the backend is used.
    pub unsafe fn new(mut gl: glow::Context, debug: bool) -> Self {
        if debug {
            unsafe {
                if gl.supports_debug() {
                    gl.enable(glow::DEBUG_OUTPUT);
                    gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
                    gl.debug_message_callback(log_debug_message);
                    log::debug!("driver debug output enabled");
                } else {
                    log::warn!("driver debug output requested but not supported by this context");
                }
            }
        }

        // Pixel transfers assume tightly packed rows.
        unsafe {
            gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        }

        Self { gl }
    }

    /// Escape hatch for calls the wrappers do not cover.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Bytes a pixel transfer of `width` x `height` touches under the
    /// current pack (or unpack) alignment and row length.
    unsafe fn pixel_transfer_len(
        &self,
        pack: bool,
        format: Format,
        ty: PixelDataType,
        width: u32,
        height: u32,
    ) -> usize {
        let (alignment, row_length) = if pack {
            (glow::PACK_ALIGNMENT, glow::PACK_ROW_LENGTH)
        } else {
            (glow::UNPACK_ALIGNMENT, glow::UNPACK_ROW_LENGTH)
        };
        let (alignment, row_length) = unsafe {
            (
                self.gl.get_parameter_i32(alignment),
                self.gl.get_parameter_i32(row_length),
            )
        };
        transfer_len(
            format.bytes_per_pixel(ty) as usize,
            width as usize,
            height as usize,
            alignment.max(1) as usize,
            row_length.max(0) as usize,
        )
    }

    unsafe fn binding(&self, query: u32) -> Option<NonZeroU32> {
        unsafe { NonZeroU32::new(self.gl.get_parameter_i32(query) as u32) }
    }

    /// Runs `f` with `texture` bound to its target, then restores the previous binding.
    unsafe fn with_texture(&self, ty: TextureType, texture: NativeId, f: impl FnOnce(&glow::Context)) {
        let query = match ty {
            TextureType::Texture2D => glow::TEXTURE_BINDING_2D,
            TextureType::TextureCube => glow::TEXTURE_BINDING_CUBE_MAP,
        };
        unsafe {
            let previous = self.binding(query).map(glow::NativeTexture);
            self.gl.bind_texture(ty.gl(), native_texture(texture));
            f(&self.gl);
            self.gl.bind_texture(ty.gl(), previous);
        }
    }

    unsafe fn with_framebuffer<R>(&self, framebuffer: NativeId, f: impl FnOnce(&glow::Context) -> R) -> R {
        unsafe {
            let previous = self.binding(glow::FRAMEBUFFER_BINDING).map(glow::NativeFramebuffer);
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, native_framebuffer(framebuffer));
            let result = f(&self.gl);
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, previous);
            result
        }
    }

    unsafe fn with_renderbuffer(&self, renderbuffer: NativeId, f: impl FnOnce(&glow::Context)) {
        unsafe {
            let previous = self.binding(glow::RENDERBUFFER_BINDING).map(glow::NativeRenderbuffer);
            self.gl.bind_renderbuffer(glow::RENDERBUFFER, native_renderbuffer(renderbuffer));
            f(&self.gl);
            self.gl.bind_renderbuffer(glow::RENDERBUFFER, previous);
        }
    }
}

fn native_buffer(id: NativeId) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(id).map(glow::NativeBuffer)
}

fn native_vertex_array(id: NativeId) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(id).map(glow::NativeVertexArray)
}

fn native_shader(id: NativeId) -> Option<glow::NativeShader> {
    NonZeroU32::new(id).map(glow::NativeShader)
}

fn native_program(id: NativeId) -> Option<glow::NativeProgram> {
    NonZeroU32::new(id).map(glow::NativeProgram)
}

fn native_texture(id: NativeId) -> Option<glow::NativeTexture> {
    NonZeroU32::new(id).map(glow::NativeTexture)
}

fn native_renderbuffer(id: NativeId) -> Option<glow::NativeRenderbuffer> {
    NonZeroU32::new(id).map(glow::NativeRenderbuffer)
}

fn native_framebuffer(id: NativeId) -> Option<glow::NativeFramebuffer> {
    NonZeroU32::new(id).map(glow::NativeFramebuffer)
}

fn created<T>(what: &str, result: Result<T, String>, raw: impl FnOnce(T) -> NonZeroU32) -> NativeId {
    match result {
        Ok(object) => raw(object).get(),
        Err(e) => {
            log::error!("failed to create {what}: {e}");
            0
        }
    }
}

fn attachment_point(point: FramebufferAttachment, index: u32) -> u32 {
    match point {
        FramebufferAttachment::Color => glow::COLOR_ATTACHMENT0 + index,
        other => other.gl(),
    }
}

fn log_debug_message(source: u32, kind: u32, id: u32, severity: u32, message: &str) {
    if IGNORED_DEBUG_IDS.contains(&id) {
        return;
    }

    let source = match source {
        glow::DEBUG_SOURCE_API => "api",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "window system",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "shader compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "third party",
        glow::DEBUG_SOURCE_APPLICATION => "application",
        _ => "other",
    };
    let kind = match kind {
        glow::DEBUG_TYPE_ERROR => "error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated behaviour",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined behaviour",
        glow::DEBUG_TYPE_PORTABILITY => "portability",
        glow::DEBUG_TYPE_PERFORMANCE => "performance",
        glow::DEBUG_TYPE_MARKER => "marker",
        glow::DEBUG_TYPE_PUSH_GROUP => "push group",
        glow::DEBUG_TYPE_POP_GROUP => "pop group",
        _ => "other",
    };
    let (level, severity) = match severity {
        glow::DEBUG_SEVERITY_HIGH => (log::Level::Error, "high"),
        glow::DEBUG_SEVERITY_MEDIUM => (log::Level::Warn, "medium"),
        glow::DEBUG_SEVERITY_LOW => (log::Level::Info, "low"),
        _ => (log::Level::Info, "notification"),
    };

    log::log!(
        target: "slimgl::driver",
        level,
        "[{source}/{kind}/{severity}] ({id}) {message}"
    );
}

impl Backend for GlBackend {
    fn kind(&self) -> GraphicsBackend {
        GraphicsBackend::OpenGl
    }

    fn create_buffer(&self) -> NativeId {
        unsafe { created("buffer", self.gl.create_buffer(), |b| b.0) }
    }

    fn delete_buffer(&self, buffer: NativeId) {
        if let Some(b) = native_buffer(buffer) {
            unsafe { self.gl.delete_buffer(b) }
        }
    }

    fn buffer_storage(&self, buffer: NativeId, size: u64, usage: AccessSpecifier) {
        let Ok(size) = i32::try_from(size) else {
            log::error!("buffer {buffer}: {size} bytes exceeds the 2 GiB allocation limit");
            return;
        };
        unsafe {
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, native_buffer(buffer));
            self.gl.buffer_data_size(glow::COPY_WRITE_BUFFER, size, usage.gl());
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, None);
        }
    }

    fn buffer_sub_data(&self, buffer: NativeId, offset: u64, data: &[u8]) {
        let Ok(offset) = i32::try_from(offset) else {
            log::error!("buffer {buffer}: upload offset {offset} exceeds the 2 GiB limit");
            return;
        };
        unsafe {
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, native_buffer(buffer));
            self.gl.buffer_sub_data_u8_slice(glow::COPY_WRITE_BUFFER, offset, data);
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, None);
        }
    }

    fn bind_buffer(&self, target: BufferType, buffer: NativeId) {
        unsafe { self.gl.bind_buffer(target.gl(), native_buffer(buffer)) }
    }

    fn bind_buffer_base(&self, target: BufferType, index: u32, buffer: NativeId) {
        unsafe { self.gl.bind_buffer_base(target.gl(), index, native_buffer(buffer)) }
    }

    fn create_vertex_array(&self) -> NativeId {
        unsafe { created("vertex array", self.gl.create_vertex_array(), |v| v.0) }
    }

    fn delete_vertex_array(&self, vertex_array: NativeId) {
        if let Some(v) = native_vertex_array(vertex_array) {
            unsafe { self.gl.delete_vertex_array(v) }
        }
    }

    fn bind_vertex_array(&self, vertex_array: NativeId) {
        unsafe { self.gl.bind_vertex_array(native_vertex_array(vertex_array)) }
    }

    fn enable_vertex_attrib(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn disable_vertex_attrib(&self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) }
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
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                i32::from(count),
                ty.gl(),
                normalized,
                stride as i32,
                offset as i32,
            )
        }
    }

    fn create_shader(&self, ty: ShaderType) -> NativeId {
        unsafe { created("shader", self.gl.create_shader(ty.gl()), |s| s.0) }
    }

    fn delete_shader(&self, shader: NativeId) {
        if let Some(s) = native_shader(shader) {
            unsafe { self.gl.delete_shader(s) }
        }
    }

    fn shader_source(&self, shader: NativeId, source: &str) {
        if let Some(s) = native_shader(shader) {
            unsafe { self.gl.shader_source(s, source) }
        }
    }

    fn compile_shader(&self, shader: NativeId) {
        if let Some(s) = native_shader(shader) {
            unsafe { self.gl.compile_shader(s) }
        }
    }

    fn shader_compile_status(&self, shader: NativeId) -> bool {
        native_shader(shader).is_some_and(|s| unsafe { self.gl.get_shader_compile_status(s) })
    }

    fn shader_info_log(&self, shader: NativeId) -> String {
        native_shader(shader)
            .map(|s| unsafe { self.gl.get_shader_info_log(s) })
            .unwrap_or_default()
    }

    fn create_program(&self) -> NativeId {
        unsafe { created("program", self.gl.create_program(), |p| p.0) }
    }

    fn delete_program(&self, program: NativeId) {
        if let Some(p) = native_program(program) {
            unsafe { self.gl.delete_program(p) }
        }
    }

    fn attach_shader(&self, program: NativeId, shader: NativeId) {
        if let (Some(p), Some(s)) = (native_program(program), native_shader(shader)) {
            unsafe { self.gl.attach_shader(p, s) }
        }
    }

    fn detach_shader(&self, program: NativeId, shader: NativeId) {
        if let (Some(p), Some(s)) = (native_program(program), native_shader(shader)) {
            unsafe { self.gl.detach_shader(p, s) }
        }
    }

    fn link_program(&self, program: NativeId) {
        if let Some(p) = native_program(program) {
            unsafe { self.gl.link_program(p) }
        }
    }

    fn program_link_status(&self, program: NativeId) -> bool {
        native_program(program).is_some_and(|p| unsafe { self.gl.get_program_link_status(p) })
    }

    fn program_info_log(&self, program: NativeId) -> String {
        native_program(program)
            .map(|p| unsafe { self.gl.get_program_info_log(p) })
            .unwrap_or_default()
    }

    fn use_program(&self, program: NativeId) {
        unsafe { self.gl.use_program(native_program(program)) }
    }

    fn active_uniform_count(&self, program: NativeId) -> u32 {
        native_program(program).map_or(0, |p| unsafe { self.gl.get_active_uniforms(p) })
    }

    fn active_uniform(&self, program: NativeId, index: u32) -> Option<ActiveUniform> {
        let p = native_program(program)?;
        let active = unsafe { self.gl.get_active_uniform(p, index) }?;
        Some(ActiveUniform {
            ty: UniformType::from_gl(active.utype),
            size: active.size,
            name: active.name,
        })
    }

    fn uniform_location(&self, program: NativeId, name: &str) -> Option<u32> {
        let p = native_program(program)?;
        unsafe { self.gl.get_uniform_location(p, name) }.map(|l| l.0)
    }

    fn set_uniform(&self, location: u32, value: UniformValue) {
        let loc = glow::NativeUniformLocation(location);
        let loc = Some(&loc);
        unsafe {
            match value {
                UniformValue::Bool(v) => self.gl.uniform_1_i32(loc, i32::from(v)),
                UniformValue::Int(v) => self.gl.uniform_1_i32(loc, v),
                UniformValue::UnsignedInt(v) => self.gl.uniform_1_u32(loc, v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(loc, v),
                UniformValue::Vec2(v) => self.gl.uniform_2_f32_slice(loc, &v.to_array()),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32_slice(loc, &v.to_array()),
                UniformValue::Vec4(v) => self.gl.uniform_4_f32_slice(loc, &v.to_array()),
                UniformValue::Mat3(m) => {
                    self.gl.uniform_matrix_3_f32_slice(loc, false, &m.to_cols_array())
                }
                UniformValue::Mat4(m) => {
                    self.gl.uniform_matrix_4_f32_slice(loc, false, &m.to_cols_array())
                }
                UniformValue::Sampler(unit) => self.gl.uniform_1_i32(loc, unit.unwrap_or(0)),
            }
        }
    }

    fn get_uniform_i32(&self, program: NativeId, location: u32, out: &mut [i32]) {
        if let Some(p) = native_program(program) {
            let loc = glow::NativeUniformLocation(location);
            unsafe { self.gl.get_uniform_i32(p, &loc, out) }
        }
    }

    fn get_uniform_u32(&self, program: NativeId, location: u32, out: &mut [u32]) {
        if let Some(p) = native_program(program) {
            let loc = glow::NativeUniformLocation(location);
            unsafe { self.gl.get_uniform_u32(p, &loc, out) }
        }
    }

    fn get_uniform_f32(&self, program: NativeId, location: u32, out: &mut [f32]) {
        if let Some(p) = native_program(program) {
            let loc = glow::NativeUniformLocation(location);
            unsafe { self.gl.get_uniform_f32(p, &loc, out) }
        }
    }

    fn create_texture(&self, ty: TextureType) -> NativeId {
        let id = unsafe { created("texture", self.gl.create_texture(), |t| t.0) };
        if id != 0 {
            // First bind fixes the texture's target.
            unsafe { self.with_texture(ty, id, |_| {}) }
        }
        id
    }

    fn delete_texture(&self, texture: NativeId) {
        if let Some(t) = native_texture(texture) {
            unsafe { self.gl.delete_texture(t) }
        }
    }

    fn bind_texture(&self, ty: TextureType, texture: NativeId) {
        unsafe { self.gl.bind_texture(ty.gl(), native_texture(texture)) }
    }

    fn bind_texture_unit(&self, unit: u32, ty: TextureType, texture: NativeId) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(ty.gl(), native_texture(texture));
        }
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
        unsafe {
            self.gl.bind_image_texture(
                unit,
                native_texture(texture),
                level as i32,
                layered,
                layer as i32,
                access.gl(),
                format.gl(),
            )
        }
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
        if let Some(data) = data {
            let needed = unsafe { self.pixel_transfer_len(false, format, ty, width, height) };
            assert!(
                data.len() >= needed,
                "texture upload of {width}x{height} {format:?}/{ty:?} needs {needed} bytes, got {}",
                data.len()
            );
        }
        unsafe {
            self.with_texture(TextureType::Texture2D, texture, |gl| {
                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    internal_format.gl() as i32,
                    width as i32,
                    height as i32,
                    0,
                    format.gl(),
                    ty.gl(),
                    glow::PixelUnpackData::Slice(data),
                )
            })
        }
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
        unsafe {
            self.with_texture(ty, texture, |gl| {
                gl.tex_storage_2d(
                    ty.gl(),
                    levels as i32,
                    internal_format.gl(),
                    width as i32,
                    height as i32,
                )
            })
        }
    }

    fn tex_sub_image_2d(
        &self,
        texture: NativeId,
        ty: TextureType,
        face: u32,
        width: u32,
        height: u32,
        format: Format,
        pixel_type: PixelDataType,
        data: &[u8],
    ) {
        let target = match ty {
            TextureType::Texture2D => glow::TEXTURE_2D,
            TextureType::TextureCube => glow::TEXTURE_CUBE_MAP_POSITIVE_X + face,
        };
        let needed = unsafe { self.pixel_transfer_len(false, format, pixel_type, width, height) };
        assert!(
            data.len() >= needed,
            "texture upload of {width}x{height} {format:?}/{pixel_type:?} needs {needed} bytes, got {}",
            data.len()
        );
        unsafe {
            self.with_texture(ty, texture, |gl| {
                gl.tex_sub_image_2d(
                    target,
                    0,
                    0,
                    0,
                    width as i32,
                    height as i32,
                    format.gl(),
                    pixel_type.gl(),
                    glow::PixelUnpackData::Slice(Some(data)),
                )
            })
        }
    }

    fn texture_sampler_params(&self, texture: NativeId, ty: TextureType, params: SamplerParams) {
        let target = ty.gl();
        unsafe {
            self.with_texture(ty, texture, |gl| {
                gl.tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, params.min_filter.gl() as i32);
                gl.tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, params.mag_filter.gl() as i32);
                gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_S, params.wrap_s.gl() as i32);
                gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_T, params.wrap_t.gl() as i32);
            })
        }
    }

    fn texture_border_color(&self, texture: NativeId, ty: TextureType, color: [f32; 4]) {
        let target = ty.gl();
        unsafe {
            self.with_texture(ty, texture, |gl| {
                gl.tex_parameter_f32_slice(target, glow::TEXTURE_BORDER_COLOR, &color)
            })
        }
    }

    fn generate_mipmap(&self, texture: NativeId, ty: TextureType) {
        let target = ty.gl();
        unsafe { self.with_texture(ty, texture, |gl| gl.generate_mipmap(target)) }
    }

    fn create_renderbuffer(&self) -> NativeId {
        unsafe { created("renderbuffer", self.gl.create_renderbuffer(), |r| r.0) }
    }

    fn delete_renderbuffer(&self, renderbuffer: NativeId) {
        if let Some(r) = native_renderbuffer(renderbuffer) {
            unsafe { self.gl.delete_renderbuffer(r) }
        }
    }

    fn bind_renderbuffer(&self, renderbuffer: NativeId) {
        unsafe { self.gl.bind_renderbuffer(glow::RENDERBUFFER, native_renderbuffer(renderbuffer)) }
    }

    fn renderbuffer_storage(
        &self,
        renderbuffer: NativeId,
        format: InternalFormat,
        width: u32,
        height: u32,
    ) {
        unsafe {
            self.with_renderbuffer(renderbuffer, |gl| {
                gl.renderbuffer_storage(glow::RENDERBUFFER, format.gl(), width as i32, height as i32)
            })
        }
    }

    fn create_framebuffer(&self) -> NativeId {
        unsafe { created("framebuffer", self.gl.create_framebuffer(), |f| f.0) }
    }

    fn delete_framebuffer(&self, framebuffer: NativeId) {
        if let Some(f) = native_framebuffer(framebuffer) {
            unsafe { self.gl.delete_framebuffer(f) }
        }
    }

    fn bind_framebuffer(&self, framebuffer: NativeId) {
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, native_framebuffer(framebuffer)) }
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
        let attachment = attachment_point(point, index);
        unsafe {
            self.with_framebuffer(framebuffer, |gl| match layer {
                Some(layer) => gl.framebuffer_texture_layer(
                    glow::FRAMEBUFFER,
                    attachment,
                    native_texture(texture),
                    level as i32,
                    layer as i32,
                ),
                None => gl.framebuffer_texture(
                    glow::FRAMEBUFFER,
                    attachment,
                    native_texture(texture),
                    level as i32,
                ),
            })
        }
    }

    fn framebuffer_renderbuffer(
        &self,
        framebuffer: NativeId,
        point: FramebufferAttachment,
        index: u32,
        renderbuffer: NativeId,
    ) {
        let attachment = attachment_point(point, index);
        unsafe {
            self.with_framebuffer(framebuffer, |gl| {
                gl.framebuffer_renderbuffer(
                    glow::FRAMEBUFFER,
                    attachment,
                    glow::RENDERBUFFER,
                    native_renderbuffer(renderbuffer),
                )
            })
        }
    }

    fn framebuffer_status(&self, framebuffer: NativeId) -> Option<FramebufferStatus> {
        let raw = unsafe {
            self.with_framebuffer(framebuffer, |gl| gl.check_framebuffer_status(glow::FRAMEBUFFER))
        };
        FramebufferStatus::from_gl(raw)
    }

    fn framebuffer_draw_buffer(&self, framebuffer: NativeId, color_index: Option<u32>) {
        let buffer = color_index.map_or(glow::NONE, |i| glow::COLOR_ATTACHMENT0 + i);
        unsafe { self.with_framebuffer(framebuffer, |gl| gl.draw_buffer(buffer)) }
    }

    fn framebuffer_read_buffer(&self, framebuffer: NativeId, color_index: Option<u32>) {
        let buffer = color_index.map_or(glow::NONE, |i| glow::COLOR_ATTACHMENT0 + i);
        unsafe { self.with_framebuffer(framebuffer, |gl| gl.read_buffer(buffer)) }
    }

    fn blit_framebuffer(
        &self,
        src: NativeId,
        dst: NativeId,
        src_size: (u32, u32),
        dst_size: (u32, u32),
    ) {
        unsafe {
            let read = self.binding(glow::READ_FRAMEBUFFER_BINDING).map(glow::NativeFramebuffer);
            let draw = self.binding(glow::DRAW_FRAMEBUFFER_BINDING).map(glow::NativeFramebuffer);

            self.gl.bind_framebuffer(glow::READ_FRAMEBUFFER, native_framebuffer(src));
            self.gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, native_framebuffer(dst));
            self.gl.blit_framebuffer(
                0,
                0,
                src_size.0 as i32,
                src_size.1 as i32,
                0,
                0,
                dst_size.0 as i32,
                dst_size.1 as i32,
                glow::COLOR_BUFFER_BIT,
                glow::LINEAR,
            );

            self.gl.bind_framebuffer(glow::READ_FRAMEBUFFER, read);
            self.gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, draw);
        }
    }

    fn read_pixels(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        format: Format,
        ty: PixelDataType,
        out: &mut [u8],
    ) {
        let needed = unsafe { self.pixel_transfer_len(true, format, ty, width, height) };
        assert!(
            out.len() >= needed,
            "reading {width}x{height} {format:?}/{ty:?} pixels needs {needed} bytes, got {}",
            out.len()
        );
        unsafe {
            self.gl.read_pixels(
                x as i32,
                y as i32,
                width as i32,
                height as i32,
                format.gl(),
                ty.gl(),
                glow::PixelPackData::Slice(Some(out)),
            )
        }
    }

    fn clear(&self, color: bool, depth: bool, stencil: bool) {
        let mut mask = 0;
        if color {
            mask |= glow::COLOR_BUFFER_BIT;
        }
        if depth {
            mask |= glow::DEPTH_BUFFER_BIT;
        }
        if stencil {
            mask |= glow::STENCIL_BUFFER_BIT;
        }
        unsafe { self.gl.clear(mask) }
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { self.gl.clear_color(red, green, blue, alpha) }
    }

    fn draw_elements(&self, mode: PrimitiveMode, count: u32, instances: Option<u32>) {
        unsafe {
            match instances {
                Some(n) => self.gl.draw_elements_instanced(
                    mode.gl(),
                    count as i32,
                    glow::UNSIGNED_INT,
                    0,
                    n as i32,
                ),
                None => self.gl.draw_elements(mode.gl(), count as i32, glow::UNSIGNED_INT, 0),
            }
        }
    }

    fn draw_arrays(&self, mode: PrimitiveMode, count: u32, instances: Option<u32>) {
        unsafe {
            match instances {
                Some(n) => self.gl.draw_arrays_instanced(mode.gl(), 0, count as i32, n as i32),
                None => self.gl.draw_arrays(mode.gl(), 0, count as i32),
            }
        }
    }

    fn dispatch_compute(&self, x: u32, y: u32, z: u32) {
        unsafe { self.gl.dispatch_compute(x, y, z) }
    }

    fn memory_barrier(&self, barriers: MemoryBarrierFlags) {
        unsafe { self.gl.memory_barrier(barriers.bits()) }
    }

    fn line_width(&self, width: f32) {
        unsafe { self.gl.line_width(width) }
    }

    fn polygon_mode(&self, mode: RasterizationMode) {
        unsafe { self.gl.polygon_mode(glow::FRONT_AND_BACK, mode.gl()) }
    }

    fn set_capability(&self, capability: RenderingCapability, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(capability.gl());
            } else {
                self.gl.disable(capability.gl());
            }
        }
    }

    fn capability(&self, capability: RenderingCapability) -> bool {
        unsafe { self.gl.is_enabled(capability.gl()) }
    }

    fn stencil_func(&self, algorithm: ComparisonAlgorithm, reference: i32, mask: u32) {
        unsafe { self.gl.stencil_func(algorithm.gl(), reference, mask) }
    }

    fn depth_func(&self, algorithm: ComparisonAlgorithm) {
        unsafe { self.gl.depth_func(algorithm.gl()) }
    }

    fn stencil_mask(&self, mask: u32) {
        unsafe { self.gl.stencil_mask(mask) }
    }

    fn stencil_op(
        &self,
        stencil_fail: StencilOperation,
        depth_fail: StencilOperation,
        both_pass: StencilOperation,
    ) {
        unsafe { self.gl.stencil_op(stencil_fail.gl(), depth_fail.gl(), both_pass.gl()) }
    }

    fn blend_func(&self, source: BlendingFactor, destination: BlendingFactor) {
        unsafe { self.gl.blend_func(source.gl(), destination.gl()) }
    }

    fn blend_equation(&self, equation: BlendingEquation) {
        unsafe { self.gl.blend_equation(equation.gl()) }
    }

    fn cull_face(&self, face: CullFace) {
        unsafe { self.gl.cull_face(face.gl()) }
    }

    fn depth_mask(&self, enabled: bool) {
        unsafe { self.gl.depth_mask(enabled) }
    }

    fn color_mask(&self, red: bool, green: bool, blue: bool, alpha: bool) {
        unsafe { self.gl.color_mask(red, green, blue, alpha) }
    }

    fn viewport(&self, x: u32, y: u32, width: u32, height: u32) {
        unsafe { self.gl.viewport(x as i32, y as i32, width as i32, height as i32) }
    }

    fn patch_vertices(&self, count: u32) {
        unsafe { self.gl.patch_parameter_i32(glow::PATCH_VERTICES, count as i32) }
    }

    fn driver_string(&self, which: DriverString) -> String {
        let name = match which {
            DriverString::Vendor => glow::VENDOR,
            DriverString::Renderer => glow::RENDERER,
            DriverString::Version => glow::VERSION,
            DriverString::ShadingLanguageVersion => glow::SHADING_LANGUAGE_VERSION,
        };
        unsafe { self.gl.get_parameter_string(name) }
    }
}

/// Bytes spanned by `height` rows of `width` pixels, each row starting on an
/// `alignment` boundary `row_length` pixels (or `width` when 0) after the previous one.
fn transfer_len(
    pixel_size: usize,
    width: usize,
    height: usize,
    alignment: usize,
    row_length: usize,
) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    let row_pixels = if row_length > 0 { row_length } else { width };
    let stride = (row_pixels * pixel_size).div_ceil(alignment) * alignment;
    stride * (height - 1) + width * pixel_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_attachments_offset_by_index() {
        assert_eq!(
            attachment_point(FramebufferAttachment::Color, 3),
            glow::COLOR_ATTACHMENT0 + 3
        );
        assert_eq!(
            attachment_point(FramebufferAttachment::Depth, 3),
            glow::DEPTH_ATTACHMENT
        );
    }

    #[test]
    fn null_ids_map_to_no_object() {
        assert!(native_buffer(0).is_none());
        assert!(native_texture(0).is_none());
        assert_eq!(native_framebuffer(7).map(|f| f.0.get()), Some(7));
    }

    #[test]
    fn creation_errors_yield_null_id() {
        let id = created::<NonZeroU32>("buffer", Err("out of memory".into()), |n| n);
        assert_eq!(id, 0);
    }

    #[test]
    fn transfer_len_follows_row_alignment() {
        // 3 RGB u8 pixels per row: 9 bytes, padded to 12 under the default alignment.
        assert_eq!(transfer_len(3, 3, 2, 1, 0), 18);
        assert_eq!(transfer_len(3, 3, 2, 4, 0), 12 + 9);
        assert_eq!(transfer_len(4, 2, 3, 4, 8), 32 * 2 + 8);
        assert_eq!(transfer_len(4, 0, 10, 4, 0), 0);
    }
}
