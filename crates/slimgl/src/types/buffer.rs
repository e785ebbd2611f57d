gl_enum! {
    /// Usage hints for buffer storage.
    #[derive(Default)]
    pub enum AccessSpecifier {
        StreamDraw = glow::STREAM_DRAW,
        StreamRead = glow::STREAM_READ,
        StreamCopy = glow::STREAM_COPY,
        DynamicDraw = glow::DYNAMIC_DRAW,
        DynamicRead = glow::DYNAMIC_READ,
        DynamicCopy = glow::DYNAMIC_COPY,
        #[default]
        StaticDraw = glow::STATIC_DRAW,
        StaticRead = glow::STATIC_READ,
        StaticCopy = glow::STATIC_COPY,
    }
}

gl_enum! {
    /// Binding targets a buffer can be bound to.
    pub enum BufferType {
        Vertex = glow::ARRAY_BUFFER,
        Index = glow::ELEMENT_ARRAY_BUFFER,
        Uniform = glow::UNIFORM_BUFFER,
        ShaderStorage = glow::SHADER_STORAGE_BUFFER,
    }
}

impl BufferType {
    /// True for targets that accept an indexed binding point.
    #[inline]
    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::Uniform | Self::ShaderStorage)
    }
}

gl_enum! {
    /// Scalar component types of vertex attributes.
    #[derive(Default)]
    pub enum DataType {
        Byte = glow::BYTE,
        UnsignedByte = glow::UNSIGNED_BYTE,
        Short = glow::SHORT,
        UnsignedShort = glow::UNSIGNED_SHORT,
        Int = glow::INT,
        UnsignedInt = glow::UNSIGNED_INT,
        #[default]
        Float = glow::FLOAT,
        Double = glow::DOUBLE,
    }
}

impl DataType {
    /// Size of one component in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> u32 {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::Int | Self::UnsignedInt | Self::Float => 4,
            Self::Double => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_sizes() {
        assert_eq!(DataType::UnsignedByte.size_in_bytes(), 1);
        assert_eq!(DataType::Short.size_in_bytes(), 2);
        assert_eq!(DataType::Float.size_in_bytes(), 4);
        assert_eq!(DataType::Double.size_in_bytes(), 8);
    }

    #[test]
    fn only_block_targets_are_indexed() {
        assert!(BufferType::ShaderStorage.is_indexed());
        assert!(BufferType::Uniform.is_indexed());
        assert!(!BufferType::Vertex.is_indexed());
        assert!(!BufferType::Index.is_indexed());
    }
}
