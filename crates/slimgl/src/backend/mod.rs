//! Driver seam.
//!
//! [`Backend`] lists every native call the wrappers issue, already typed.
//! Two implementations exist:
//! - [`GlBackend`]: OpenGL through `glow`, requires a current context
//! - [`MockBackend`]: recording fake used by tests
//!
//! Object ids are plain `u32`s; `0` is the null object, as in the driver.

mod gl;
mod mock;

pub use gl::GlBackend;
pub use mock::{Call, MockBackend, MockUniform, ObjectKind};

use crate::data::UniformValue;
use crate::types::{
    AccessSpecifier, BlendingEquation, BlendingFactor, BufferType, ComparisonAlgorithm, CullFace,
    DataType, Format, FramebufferAttachment, FramebufferStatus, GraphicsBackend,
    ImageAccessSpecifier, InternalFormat, MemoryBarrierFlags, PixelDataType, PrimitiveMode,
    RasterizationMode, RenderingCapability, ShaderType, StencilOperation, TextureFilteringMode,
    TextureType, TextureWrapMode, UniformType,
};

/// Native object name. `0` never names a live object.
pub type NativeId = u32;

/// Active uniform as reported by the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveUniform {
    pub name: String,
    /// `None` when the driver reports a type this crate does not model.
    pub ty: Option<UniformType>,
    /// Array length (1 for non-arrays).
    pub size: i32,
}

/// Informational strings exposed by the driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DriverString {
    Vendor,
    Renderer,
    Version,
    ShadingLanguageVersion,
}

/// Sampler state applied once to a freshly allocated texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SamplerParams {
    pub min_filter: TextureFilteringMode,
    pub mag_filter: TextureFilteringMode,
    pub wrap_s: TextureWrapMode,
    pub wrap_t: TextureWrapMode,
}

/// Typed view of the driver API used by the wrappers.
///
/// Calls are synchronous and must be issued from the thread owning the
/// context. Binding `0` unbinds.
pub trait Backend {
    fn kind(&self) -> GraphicsBackend;

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> NativeId;
    fn delete_buffer(&self, buffer: NativeId);
    /// Allocates `size` uninitialized bytes.
    fn buffer_storage(&self, buffer: NativeId, size: u64, usage: AccessSpecifier);
    fn buffer_sub_data(&self, buffer: NativeId, offset: u64, data: &[u8]);
    fn bind_buffer(&self, target: BufferType, buffer: NativeId);
    fn bind_buffer_base(&self, target: BufferType, index: u32, buffer: NativeId);

    // ── vertex arrays ─────────────────────────────────────────────────────

    fn create_vertex_array(&self) -> NativeId;
    fn delete_vertex_array(&self, vertex_array: NativeId);
    fn bind_vertex_array(&self, vertex_array: NativeId);
    fn enable_vertex_attrib(&self, index: u32);
    fn disable_vertex_attrib(&self, index: u32);
    #[allow(clippy::too_many_arguments)]
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        count: u8,
        ty: DataType,
        normalized: bool,
        stride: u32,
        offset: u32,
    );

    // ── shader stages ─────────────────────────────────────────────────────

    fn create_shader(&self, ty: ShaderType) -> NativeId;
    fn delete_shader(&self, shader: NativeId);
    fn shader_source(&self, shader: NativeId, source: &str);
    fn compile_shader(&self, shader: NativeId);
    fn shader_compile_status(&self, shader: NativeId) -> bool;
    fn shader_info_log(&self, shader: NativeId) -> String;

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> NativeId;
    fn delete_program(&self, program: NativeId);
    fn attach_shader(&self, program: NativeId, shader: NativeId);
    fn detach_shader(&self, program: NativeId, shader: NativeId);
    fn link_program(&self, program: NativeId);
    fn program_link_status(&self, program: NativeId) -> bool;
    fn program_info_log(&self, program: NativeId) -> String;
    fn use_program(&self, program: NativeId);
    fn active_uniform_count(&self, program: NativeId) -> u32;
    fn active_uniform(&self, program: NativeId, index: u32) -> Option<ActiveUniform>;
    /// `None` for names without a location (inactive, or uniform block members).
    fn uniform_location(&self, program: NativeId, name: &str) -> Option<u32>;
    /// Sets a uniform of the program currently in use.
    fn set_uniform(&self, location: u32, value: UniformValue);
    fn get_uniform_i32(&self, program: NativeId, location: u32, out: &mut [i32]);
    fn get_uniform_u32(&self, program: NativeId, location: u32, out: &mut [u32]);
    fn get_uniform_f32(&self, program: NativeId, location: u32, out: &mut [f32]);

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&self, ty: TextureType) -> NativeId;
    fn delete_texture(&self, texture: NativeId);
    fn bind_texture(&self, ty: TextureType, texture: NativeId);
    fn bind_texture_unit(&self, unit: u32, ty: TextureType, texture: NativeId);
    #[allow(clippy::too_many_arguments)]
    fn bind_image_texture(
        &self,
        unit: u32,
        texture: NativeId,
        level: u32,
        layered: bool,
        layer: u32,
        access: ImageAccessSpecifier,
        format: InternalFormat,
    );
    /// Mutable 2D allocation, optionally with initial pixels.
    #[allow(clippy::too_many_arguments)]
    fn tex_image_2d(
        &self,
        texture: NativeId,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
        format: Format,
        ty: PixelDataType,
        data: Option<&[u8]>,
    );
    /// Immutable allocation; covers all faces of a cube map.
    fn tex_storage_2d(
        &self,
        texture: NativeId,
        ty: TextureType,
        levels: u32,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
    );
    /// Uploads level 0 of one face (`face` is ignored for 2D textures).
    #[allow(clippy::too_many_arguments)]
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
    );
    fn texture_sampler_params(&self, texture: NativeId, ty: TextureType, params: SamplerParams);
    fn texture_border_color(&self, texture: NativeId, ty: TextureType, color: [f32; 4]);
    fn generate_mipmap(&self, texture: NativeId, ty: TextureType);

    // ── renderbuffers ─────────────────────────────────────────────────────

    fn create_renderbuffer(&self) -> NativeId;
    fn delete_renderbuffer(&self, renderbuffer: NativeId);
    fn bind_renderbuffer(&self, renderbuffer: NativeId);
    fn renderbuffer_storage(
        &self,
        renderbuffer: NativeId,
        format: InternalFormat,
        width: u32,
        height: u32,
    );

    // ── framebuffers ──────────────────────────────────────────────────────

    fn create_framebuffer(&self) -> NativeId;
    fn delete_framebuffer(&self, framebuffer: NativeId);
    fn bind_framebuffer(&self, framebuffer: NativeId);
    #[allow(clippy::too_many_arguments)]
    fn framebuffer_texture(
        &self,
        framebuffer: NativeId,
        point: FramebufferAttachment,
        index: u32,
        texture: NativeId,
        level: u32,
        layer: Option<u32>,
    );
    fn framebuffer_renderbuffer(
        &self,
        framebuffer: NativeId,
        point: FramebufferAttachment,
        index: u32,
        renderbuffer: NativeId,
    );
    fn framebuffer_status(&self, framebuffer: NativeId) -> Option<FramebufferStatus>;
    /// `None` disables color output.
    fn framebuffer_draw_buffer(&self, framebuffer: NativeId, color_index: Option<u32>);
    /// `None` disables color reads.
    fn framebuffer_read_buffer(&self, framebuffer: NativeId, color_index: Option<u32>);
    /// Copies the color buffer of `src` into `dst` with linear filtering.
    fn blit_framebuffer(
        &self,
        src: NativeId,
        dst: NativeId,
        src_size: (u32, u32),
        dst_size: (u32, u32),
    );
    /// Reads from the framebuffer currently bound for reading.
    #[allow(clippy::too_many_arguments)]
    fn read_pixels(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        format: Format,
        ty: PixelDataType,
        out: &mut [u8],
    );

    // ── pipeline state & commands ─────────────────────────────────────────

    fn clear(&self, color: bool, depth: bool, stencil: bool);
    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);
    fn draw_elements(&self, mode: PrimitiveMode, count: u32, instances: Option<u32>);
    fn draw_arrays(&self, mode: PrimitiveMode, count: u32, instances: Option<u32>);
    fn dispatch_compute(&self, x: u32, y: u32, z: u32);
    fn memory_barrier(&self, barriers: MemoryBarrierFlags);
    fn line_width(&self, width: f32);
    fn polygon_mode(&self, mode: RasterizationMode);
    fn set_capability(&self, capability: RenderingCapability, enabled: bool);
    fn capability(&self, capability: RenderingCapability) -> bool;
    fn stencil_func(&self, algorithm: ComparisonAlgorithm, reference: i32, mask: u32);
    fn depth_func(&self, algorithm: ComparisonAlgorithm);
    fn stencil_mask(&self, mask: u32);
    fn stencil_op(
        &self,
        stencil_fail: StencilOperation,
        depth_fail: StencilOperation,
        both_pass: StencilOperation,
    );
    fn blend_func(&self, source: BlendingFactor, destination: BlendingFactor);
    fn blend_equation(&self, equation: BlendingEquation);
    fn cull_face(&self, face: CullFace);
    fn depth_mask(&self, enabled: bool);
    fn color_mask(&self, red: bool, green: bool, blue: bool, alpha: bool);
    fn viewport(&self, x: u32, y: u32, width: u32, height: u32);
    fn patch_vertices(&self, count: u32);
    fn driver_string(&self, which: DriverString) -> String;
}
