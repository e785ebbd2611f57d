use std::rc::Rc;

use super::ContextInit;
use crate::backend::{Backend, DriverString, GlBackend};
use crate::types::{
    BlendingEquation, BlendingFactor, ComparisonAlgorithm, CullFace, GraphicsBackend,
    MemoryBarrierFlags, PrimitiveMode, RasterizationMode, RenderingCapability, StencilOperation,
};

/// Entry point of the crate: owns the backend and exposes global pipeline
/// state, draw and dispatch commands.
///
/// `Context` is `!Send`; every call must come from the thread that owns the
/// native context.
pub struct Context {
    backend: Rc<dyn Backend>,
}

impl Context {
    /// Wraps an existing backend and applies the startup state from `init`.
    pub fn new(backend: Rc<dyn Backend>, init: ContextInit) -> Self {
        let ContextInit {
            debug: _,
            seamless_cubemap,
            default_blending,
            default_cull_face,
        } = init;

        if seamless_cubemap {
            backend.set_capability(RenderingCapability::TextureCubeMapSeamless, true);
        }
        backend.blend_func(default_blending.0, default_blending.1);
        backend.cull_face(default_cull_face);

        log::info!(
            "{:?} context initialized: {} ({})",
            backend.kind(),
            backend.driver_string(DriverString::Renderer),
            backend.driver_string(DriverString::Version),
        );

        Self { backend }
    }

    /// Builds a context on top of a loaded `glow` context.
    ///
    /// # Safety
    /// The native context `gl` was loaded from must be current on this thread
    /// and must outlive the returned `Context` and every resource created from it.
    pub unsafe fn from_glow(gl: glow::Context, init: ContextInit) -> Self {
        let backend = unsafe { GlBackend::new(gl, init.debug) };
        Self::new(Rc::new(backend), init)
    }

    pub fn backend_kind(&self) -> GraphicsBackend {
        self.backend.kind()
    }

    /// Shared backend handle, for resources created from this context.
    pub(crate) fn backend(&self) -> Rc<dyn Backend> {
        Rc::clone(&self.backend)
    }

    /// Clears the selected buffers of the bound framebuffer. No-op when none is selected.
    pub fn clear(&self, color: bool, depth: bool, stencil: bool) {
        if color || depth || stencil {
            self.backend.clear(color, depth, stencil);
        }
    }

    /// Draws `index_count` `u32` indices from the bound element buffer.
    pub fn draw_elements(&self, mode: PrimitiveMode, index_count: u32) {
        self.backend.draw_elements(mode, index_count, None);
    }

    pub fn draw_elements_instanced(&self, mode: PrimitiveMode, index_count: u32, instances: u32) {
        self.backend.draw_elements(mode, index_count, Some(instances));
    }

    /// Draws `vertex_count` vertices starting at the first one.
    pub fn draw_arrays(&self, mode: PrimitiveMode, vertex_count: u32) {
        self.backend.draw_arrays(mode, vertex_count, None);
    }

    pub fn draw_arrays_instanced(&self, mode: PrimitiveMode, vertex_count: u32, instances: u32) {
        self.backend.draw_arrays(mode, vertex_count, Some(instances));
    }

    /// Launches compute work groups with the bound program.
    pub fn dispatch_compute(&self, x: u32, y: u32, z: u32) {
        debug_assert!(
            x > 0 && y > 0 && z > 0,
            "dispatch work group count cannot be zero"
        );
        self.backend.dispatch_compute(x, y, z);
    }

    pub fn memory_barrier(&self, barriers: MemoryBarrierFlags) {
        self.backend.memory_barrier(barriers);
    }

    pub fn set_clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.backend.clear_color(red, green, blue, alpha);
    }

    pub fn set_rasterization_lines_width(&self, width: f32) {
        self.backend.line_width(width);
    }

    /// Applies to both front and back faces.
    pub fn set_rasterization_mode(&self, mode: RasterizationMode) {
        self.backend.polygon_mode(mode);
    }

    pub fn set_capability(&self, capability: RenderingCapability, enabled: bool) {
        self.backend.set_capability(capability, enabled);
    }

    pub fn capability(&self, capability: RenderingCapability) -> bool {
        self.backend.capability(capability)
    }

    pub fn set_stencil_algorithm(&self, algorithm: ComparisonAlgorithm, reference: i32, mask: u32) {
        self.backend.stencil_func(algorithm, reference, mask);
    }

    pub fn set_depth_algorithm(&self, algorithm: ComparisonAlgorithm) {
        self.backend.depth_func(algorithm);
    }

    pub fn set_stencil_mask(&self, mask: u32) {
        self.backend.stencil_mask(mask);
    }

    pub fn set_stencil_operations(
        &self,
        stencil_fail: StencilOperation,
        depth_fail: StencilOperation,
        both_pass: StencilOperation,
    ) {
        self.backend.stencil_op(stencil_fail, depth_fail, both_pass);
    }

    pub fn set_blending_function(&self, source: BlendingFactor, destination: BlendingFactor) {
        self.backend.blend_func(source, destination);
    }

    pub fn set_blending_equation(&self, equation: BlendingEquation) {
        self.backend.blend_equation(equation);
    }

    pub fn set_cull_face(&self, face: CullFace) {
        self.backend.cull_face(face);
    }

    pub fn set_depth_writing(&self, enabled: bool) {
        self.backend.depth_mask(enabled);
    }

    pub fn set_color_writing(&self, red: bool, green: bool, blue: bool, alpha: bool) {
        self.backend.color_mask(red, green, blue, alpha);
    }

    pub fn set_viewport(&self, x: u32, y: u32, width: u32, height: u32) {
        self.backend.viewport(x, y, width, height);
    }

    /// Number of vertices per patch consumed by tessellation stages.
    pub fn set_patch_vertices(&self, count: u32) {
        debug_assert!(count > 0, "a patch needs at least one vertex");
        self.backend.patch_vertices(count);
    }

    pub fn vendor(&self) -> String {
        self.backend.driver_string(DriverString::Vendor)
    }

    /// Renderer (GPU) name as reported by the driver.
    pub fn hardware(&self) -> String {
        self.backend.driver_string(DriverString::Renderer)
    }

    pub fn version(&self) -> String {
        self.backend.driver_string(DriverString::Version)
    }

    pub fn shading_language_version(&self) -> String {
        self.backend.driver_string(DriverString::ShadingLanguageVersion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, MockBackend};

    #[test]
    fn init_applies_startup_state() {
        let mock = Rc::new(MockBackend::new());
        let ctx = Context::new(mock.clone(), ContextInit::default());

        assert_eq!(
            mock.calls(),
            vec![
                Call::SetCapability(RenderingCapability::TextureCubeMapSeamless, true),
                Call::BlendFunc(BlendingFactor::SrcAlpha, BlendingFactor::OneMinusSrcAlpha),
                Call::CullFace(CullFace::Back),
            ]
        );
        assert!(ctx.capability(RenderingCapability::TextureCubeMapSeamless));
        assert_eq!(ctx.backend_kind(), GraphicsBackend::Mock);
    }

    #[test]
    fn seamless_cubemap_can_be_left_off() {
        let mock = Rc::new(MockBackend::new());
        let init = ContextInit {
            seamless_cubemap: false,
            default_cull_face: CullFace::Front,
            ..Default::default()
        };
        let ctx = Context::new(mock.clone(), init);

        assert!(!ctx.capability(RenderingCapability::TextureCubeMapSeamless));
        assert!(mock.calls().contains(&Call::CullFace(CullFace::Front)));
    }

    #[test]
    fn clear_without_buffers_issues_nothing() {
        let (ctx, mock) = Context::mock();
        ctx.clear(false, false, false);
        assert!(mock.calls().is_empty());

        ctx.clear(true, false, true);
        assert_eq!(
            mock.calls(),
            vec![Call::Clear {
                color: true,
                depth: false,
                stencil: true
            }]
        );
    }

    #[test]
    fn draws_forward_counts_and_instances() {
        let (ctx, mock) = Context::mock();
        ctx.draw_elements(PrimitiveMode::Triangles, 36);
        ctx.draw_arrays_instanced(PrimitiveMode::Points, 4, 10);

        assert_eq!(
            mock.calls(),
            vec![
                Call::DrawElements {
                    mode: PrimitiveMode::Triangles,
                    count: 36,
                    instances: None
                },
                Call::DrawArrays {
                    mode: PrimitiveMode::Points,
                    count: 4,
                    instances: Some(10)
                },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "work group count cannot be zero")]
    #[cfg(debug_assertions)]
    fn dispatch_rejects_empty_work() {
        let (ctx, _mock) = Context::mock();
        ctx.dispatch_compute(4, 0, 1);
    }

    #[test]
    fn capabilities_toggle() {
        let (ctx, _mock) = Context::mock();
        ctx.set_capability(RenderingCapability::DepthTest, true);
        assert!(ctx.capability(RenderingCapability::DepthTest));
        ctx.set_capability(RenderingCapability::DepthTest, false);
        assert!(!ctx.capability(RenderingCapability::DepthTest));
    }

    #[test]
    fn state_setters_forward() {
        let (ctx, mock) = Context::mock();
        ctx.set_viewport(0, 0, 800, 600);
        ctx.set_patch_vertices(4);
        ctx.memory_barrier(MemoryBarrierFlags::SHADER_STORAGE);
        ctx.set_stencil_operations(
            StencilOperation::Keep,
            StencilOperation::Keep,
            StencilOperation::Replace,
        );

        assert_eq!(
            mock.calls(),
            vec![
                Call::Viewport(0, 0, 800, 600),
                Call::PatchVertices(4),
                Call::MemoryBarrier(MemoryBarrierFlags::SHADER_STORAGE),
                Call::StencilOp(
                    StencilOperation::Keep,
                    StencilOperation::Keep,
                    StencilOperation::Replace
                ),
            ]
        );
    }

    #[test]
    fn driver_strings() {
        let (ctx, _mock) = Context::mock();
        assert_eq!(ctx.hardware(), "mock");
        assert!(!ctx.version().is_empty());
    }
}
