use bitflags::bitflags;

gl_enum! {
    /// Primitive assembly modes for draw calls.
    pub enum PrimitiveMode {
        Points = glow::POINTS,
        Lines = glow::LINES,
        LineLoop = glow::LINE_LOOP,
        LineStrip = glow::LINE_STRIP,
        Triangles = glow::TRIANGLES,
        TriangleStrip = glow::TRIANGLE_STRIP,
        TriangleFan = glow::TRIANGLE_FAN,
        LinesAdjacency = glow::LINES_ADJACENCY,
        LineStripAdjacency = glow::LINE_STRIP_ADJACENCY,
        TrianglesAdjacency = glow::TRIANGLES_ADJACENCY,
        TriangleStripAdjacency = glow::TRIANGLE_STRIP_ADJACENCY,
        /// Input of the tessellation stages; see [`Context::set_patch_vertices`](crate::Context::set_patch_vertices).
        Patches = glow::PATCHES,
    }
}

gl_enum! {
    /// Server-side capabilities toggled with enable/disable.
    pub enum RenderingCapability {
        Blend = glow::BLEND,
        CullFace = glow::CULL_FACE,
        DepthTest = glow::DEPTH_TEST,
        Dither = glow::DITHER,
        PolygonOffsetFill = glow::POLYGON_OFFSET_FILL,
        SampleAlphaToCoverage = glow::SAMPLE_ALPHA_TO_COVERAGE,
        SampleCoverage = glow::SAMPLE_COVERAGE,
        ScissorTest = glow::SCISSOR_TEST,
        StencilTest = glow::STENCIL_TEST,
        Multisample = glow::MULTISAMPLE,
        TextureCubeMapSeamless = glow::TEXTURE_CUBE_MAP_SEAMLESS,
        ProgramPointSize = glow::PROGRAM_POINT_SIZE,
    }
}

gl_enum! {
    /// Comparison functions for depth and stencil tests.
    pub enum ComparisonAlgorithm {
        Never = glow::NEVER,
        Less = glow::LESS,
        Equal = glow::EQUAL,
        LessEqual = glow::LEQUAL,
        Greater = glow::GREATER,
        NotEqual = glow::NOTEQUAL,
        GreaterEqual = glow::GEQUAL,
        Always = glow::ALWAYS,
    }
}

gl_enum! {
    /// Actions applied to the stencil buffer.
    pub enum StencilOperation {
        Keep = glow::KEEP,
        Zero = glow::ZERO,
        Replace = glow::REPLACE,
        Increment = glow::INCR,
        IncrementWrap = glow::INCR_WRAP,
        Decrement = glow::DECR,
        DecrementWrap = glow::DECR_WRAP,
        Invert = glow::INVERT,
    }
}

gl_enum! {
    /// Equations combining source and destination colors when blending.
    pub enum BlendingEquation {
        FuncAdd = glow::FUNC_ADD,
        FuncSubtract = glow::FUNC_SUBTRACT,
        FuncReverseSubtract = glow::FUNC_REVERSE_SUBTRACT,
        Min = glow::MIN,
        Max = glow::MAX,
    }
}

gl_enum! {
    /// Source/destination weights used by blending.
    pub enum BlendingFactor {
        Zero = glow::ZERO,
        One = glow::ONE,
        SrcColor = glow::SRC_COLOR,
        OneMinusSrcColor = glow::ONE_MINUS_SRC_COLOR,
        DstColor = glow::DST_COLOR,
        OneMinusDstColor = glow::ONE_MINUS_DST_COLOR,
        SrcAlpha = glow::SRC_ALPHA,
        OneMinusSrcAlpha = glow::ONE_MINUS_SRC_ALPHA,
        DstAlpha = glow::DST_ALPHA,
        OneMinusDstAlpha = glow::ONE_MINUS_DST_ALPHA,
        ConstantColor = glow::CONSTANT_COLOR,
        OneMinusConstantColor = glow::ONE_MINUS_CONSTANT_COLOR,
        ConstantAlpha = glow::CONSTANT_ALPHA,
        OneMinusConstantAlpha = glow::ONE_MINUS_CONSTANT_ALPHA,
        SrcAlphaSaturate = glow::SRC_ALPHA_SATURATE,
        Src1Color = glow::SRC1_COLOR,
        OneMinusSrc1Color = glow::ONE_MINUS_SRC1_COLOR,
        Src1Alpha = glow::SRC1_ALPHA,
        OneMinusSrc1Alpha = glow::ONE_MINUS_SRC1_ALPHA,
    }
}

gl_enum! {
    /// Faces eligible for culling.
    pub enum CullFace {
        Front = glow::FRONT,
        Back = glow::BACK,
        FrontAndBack = glow::FRONT_AND_BACK,
    }
}

gl_enum! {
    /// Polygon rasterization modes.
    pub enum RasterizationMode {
        Point = glow::POINT,
        Line = glow::LINE,
        Fill = glow::FILL,
    }
}

bitflags! {
    /// Barriers passed to [`Context::memory_barrier`](crate::Context::memory_barrier).
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct MemoryBarrierFlags: u32 {
        const VERTEX_ATTRIB_ARRAY = glow::VERTEX_ATTRIB_ARRAY_BARRIER_BIT;
        const ELEMENT_ARRAY = glow::ELEMENT_ARRAY_BARRIER_BIT;
        const UNIFORM = glow::UNIFORM_BARRIER_BIT;
        const TEXTURE_FETCH = glow::TEXTURE_FETCH_BARRIER_BIT;
        const SHADER_IMAGE_ACCESS = glow::SHADER_IMAGE_ACCESS_BARRIER_BIT;
        const COMMAND = glow::COMMAND_BARRIER_BIT;
        const PIXEL_BUFFER = glow::PIXEL_BUFFER_BARRIER_BIT;
        const TEXTURE_UPDATE = glow::TEXTURE_UPDATE_BARRIER_BIT;
        const BUFFER_UPDATE = glow::BUFFER_UPDATE_BARRIER_BIT;
        const FRAMEBUFFER = glow::FRAMEBUFFER_BARRIER_BIT;
        const TRANSFORM_FEEDBACK = glow::TRANSFORM_FEEDBACK_BARRIER_BIT;
        const ATOMIC_COUNTER = glow::ATOMIC_COUNTER_BARRIER_BIT;
        const SHADER_STORAGE = glow::SHADER_STORAGE_BARRIER_BIT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barrier_bits_combine() {
        let flags = MemoryBarrierFlags::SHADER_STORAGE | MemoryBarrierFlags::VERTEX_ATTRIB_ARRAY;
        assert_eq!(
            flags.bits(),
            glow::SHADER_STORAGE_BARRIER_BIT | glow::VERTEX_ATTRIB_ARRAY_BARRIER_BIT
        );
        assert!(flags.contains(MemoryBarrierFlags::SHADER_STORAGE));
        assert!(!flags.contains(MemoryBarrierFlags::UNIFORM));
    }

    #[test]
    fn zero_factor_and_stencil_zero_share_a_constant() {
        // Both map onto GL_ZERO; reverse lookup is per-enum so this stays unambiguous.
        assert_eq!(BlendingFactor::Zero.gl(), StencilOperation::Zero.gl());
        assert_eq!(BlendingFactor::from_gl(glow::ZERO), Some(BlendingFactor::Zero));
        assert_eq!(StencilOperation::from_gl(glow::ZERO), Some(StencilOperation::Zero));
    }
}
