gl_enum! {
    /// Texture targets supported by [`Texture`](crate::Texture).
    #[derive(Default)]
    pub enum TextureType {
        #[default]
        Texture2D = glow::TEXTURE_2D,
        TextureCube = glow::TEXTURE_CUBE_MAP,
    }
}

impl TextureType {
    /// Number of 2D images making up one mip level.
    #[inline]
    pub const fn face_count(self) -> u32 {
        match self {
            Self::Texture2D => 1,
            Self::TextureCube => 6,
        }
    }
}

gl_enum! {
    /// Minification/magnification filters.
    pub enum TextureFilteringMode {
        Nearest = glow::NEAREST,
        Linear = glow::LINEAR,
        NearestMipmapNearest = glow::NEAREST_MIPMAP_NEAREST,
        LinearMipmapLinear = glow::LINEAR_MIPMAP_LINEAR,
        LinearMipmapNearest = glow::LINEAR_MIPMAP_NEAREST,
        NearestMipmapLinear = glow::NEAREST_MIPMAP_LINEAR,
    }
}

impl TextureFilteringMode {
    /// True when the filter samples from the mip chain.
    #[inline]
    pub const fn is_mipmap(self) -> bool {
        matches!(
            self,
            Self::NearestMipmapNearest
                | Self::NearestMipmapLinear
                | Self::LinearMipmapNearest
                | Self::LinearMipmapLinear
        )
    }
}

gl_enum! {
    /// Texture coordinate wrapping.
    pub enum TextureWrapMode {
        Repeat = glow::REPEAT,
        ClampToEdge = glow::CLAMP_TO_EDGE,
        ClampToBorder = glow::CLAMP_TO_BORDER,
        MirroredRepeat = glow::MIRRORED_REPEAT,
        MirrorClampToEdge = glow::MIRROR_CLAMP_TO_EDGE,
    }
}

gl_enum! {
    /// Storage formats of textures and renderbuffers.
    #[derive(Default)]
    pub enum InternalFormat {
        Red = glow::RED,
        Rg = glow::RG,
        Rgb = glow::RGB,
        #[default]
        Rgba = glow::RGBA,
        R8 = glow::R8,
        Rg8 = glow::RG8,
        Rgb8 = glow::RGB8,
        Rgba8 = glow::RGBA8,
        Srgb8 = glow::SRGB8,
        Srgb8Alpha8 = glow::SRGB8_ALPHA8,
        R16F = glow::R16F,
        Rg16F = glow::RG16F,
        Rgb16F = glow::RGB16F,
        Rgba16F = glow::RGBA16F,
        R32F = glow::R32F,
        Rg32F = glow::RG32F,
        Rgb32F = glow::RGB32F,
        Rgba32F = glow::RGBA32F,
        R32UI = glow::R32UI,
        Rgba32UI = glow::RGBA32UI,
        R11FG11FB10F = glow::R11F_G11F_B10F,
        DepthComponent = glow::DEPTH_COMPONENT,
        DepthComponent16 = glow::DEPTH_COMPONENT16,
        DepthComponent24 = glow::DEPTH_COMPONENT24,
        DepthComponent32F = glow::DEPTH_COMPONENT32F,
        DepthStencil = glow::DEPTH_STENCIL,
        Depth24Stencil8 = glow::DEPTH24_STENCIL8,
        Depth32FStencil8 = glow::DEPTH32F_STENCIL8,
        StencilIndex8 = glow::STENCIL_INDEX8,
    }
}

gl_enum! {
    /// Layout of client-side pixel data (uploads and read-backs).
    #[derive(Default)]
    pub enum Format {
        Red = glow::RED,
        Rg = glow::RG,
        Rgb = glow::RGB,
        Bgr = glow::BGR,
        #[default]
        Rgba = glow::RGBA,
        Bgra = glow::BGRA,
        RedInteger = glow::RED_INTEGER,
        RgbaInteger = glow::RGBA_INTEGER,
        DepthComponent = glow::DEPTH_COMPONENT,
        StencilIndex = glow::STENCIL_INDEX,
        DepthStencil = glow::DEPTH_STENCIL,
    }
}

gl_enum! {
    /// Component type of client-side pixel data.
    #[derive(Default)]
    pub enum PixelDataType {
        Byte = glow::BYTE,
        #[default]
        UnsignedByte = glow::UNSIGNED_BYTE,
        Short = glow::SHORT,
        UnsignedShort = glow::UNSIGNED_SHORT,
        Int = glow::INT,
        UnsignedInt = glow::UNSIGNED_INT,
        HalfFloat = glow::HALF_FLOAT,
        Float = glow::FLOAT,
        UnsignedInt248 = glow::UNSIGNED_INT_24_8,
        Float32UnsignedInt248Rev = glow::FLOAT_32_UNSIGNED_INT_24_8_REV,
    }
}

gl_enum! {
    /// Shader access to an image unit.
    pub enum ImageAccessSpecifier {
        ReadOnly = glow::READ_ONLY,
        WriteOnly = glow::WRITE_ONLY,
        ReadWrite = glow::READ_WRITE,
    }
}

impl Format {
    /// Components per pixel.
    #[inline]
    pub const fn component_count(self) -> u32 {
        match self {
            Self::Red | Self::RedInteger | Self::DepthComponent | Self::StencilIndex => 1,
            Self::Rg | Self::DepthStencil => 2,
            Self::Rgb | Self::Bgr => 3,
            Self::Rgba | Self::Bgra | Self::RgbaInteger => 4,
        }
    }

    /// Size of one pixel of this layout stored as `ty`.
    #[inline]
    pub const fn bytes_per_pixel(self, ty: PixelDataType) -> u32 {
        if ty.is_packed() {
            ty.size_in_bytes()
        } else {
            self.component_count() * ty.size_in_bytes()
        }
    }

    /// Bytes of a tightly packed `width` x `height` image.
    #[inline]
    pub const fn image_size(self, ty: PixelDataType, width: u32, height: u32) -> usize {
        width as usize * height as usize * self.bytes_per_pixel(ty) as usize
    }
}

impl PixelDataType {
    /// Size of one component, or of a whole pixel for packed types.
    #[inline]
    pub const fn size_in_bytes(self) -> u32 {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort | Self::HalfFloat => 2,
            Self::Int | Self::UnsignedInt | Self::Float | Self::UnsignedInt248 => 4,
            Self::Float32UnsignedInt248Rev => 8,
        }
    }

    /// True when one value holds every component of a pixel.
    #[inline]
    pub const fn is_packed(self) -> bool {
        matches!(self, Self::UnsignedInt248 | Self::Float32UnsignedInt248Rev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mipmap_filters() {
        let mip: Vec<_> = TextureFilteringMode::ALL
            .iter()
            .filter(|m| m.is_mipmap())
            .collect();
        assert_eq!(mip.len(), 4);
        assert!(!TextureFilteringMode::Linear.is_mipmap());
        assert!(!TextureFilteringMode::Nearest.is_mipmap());
    }

    #[test]
    fn cube_has_six_faces() {
        assert_eq!(TextureType::TextureCube.face_count(), 6);
        assert_eq!(TextureType::Texture2D.face_count(), 1);
    }

    #[test]
    fn pixel_sizes() {
        assert_eq!(Format::Rgba.bytes_per_pixel(PixelDataType::UnsignedByte), 4);
        assert_eq!(Format::Rgb.bytes_per_pixel(PixelDataType::Float), 12);
        assert_eq!(Format::Red.bytes_per_pixel(PixelDataType::HalfFloat), 2);
        assert_eq!(
            Format::DepthStencil.bytes_per_pixel(PixelDataType::UnsignedInt248),
            4
        );
        assert_eq!(
            Format::DepthStencil.bytes_per_pixel(PixelDataType::Float32UnsignedInt248Rev),
            8
        );
        assert_eq!(Format::Rgba.image_size(PixelDataType::UnsignedByte, 100, 100), 40_000);
    }
}
