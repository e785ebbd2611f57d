gl_enum! {
    /// Programmable pipeline stages.
    pub enum ShaderType {
        Vertex = glow::VERTEX_SHADER,
        Fragment = glow::FRAGMENT_SHADER,
        Geometry = glow::GEOMETRY_SHADER,
        Compute = glow::COMPUTE_SHADER,
        TessellationControl = glow::TESS_CONTROL_SHADER,
        TessellationEvaluation = glow::TESS_EVALUATION_SHADER,
    }
}

gl_enum! {
    /// Types of active uniforms reported by program reflection.
    pub enum UniformType {
        Bool = glow::BOOL,
        Int = glow::INT,
        UnsignedInt = glow::UNSIGNED_INT,
        Float = glow::FLOAT,
        FloatVec2 = glow::FLOAT_VEC2,
        FloatVec3 = glow::FLOAT_VEC3,
        FloatVec4 = glow::FLOAT_VEC4,
        FloatMat3 = glow::FLOAT_MAT3,
        FloatMat4 = glow::FLOAT_MAT4,
        DoubleMat4 = glow::DOUBLE_MAT4,
        Sampler2D = glow::SAMPLER_2D,
        SamplerCube = glow::SAMPLER_CUBE,
        Image2D = glow::IMAGE_2D,
        ImageCube = glow::IMAGE_CUBE,
    }
}

impl UniformType {
    #[inline]
    pub const fn is_sampler(self) -> bool {
        matches!(self, Self::Sampler2D | Self::SamplerCube)
    }
}

impl std::fmt::Display for ShaderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
            Self::Geometry => "geometry",
            Self::Compute => "compute",
            Self::TessellationControl => "tessellation control",
            Self::TessellationEvaluation => "tessellation evaluation",
        };
        f.write_str(name)
    }
}
