use crate::types::{
    Format, InternalFormat, PixelDataType, TextureFilteringMode, TextureWrapMode,
};

/// Extra description for mutable (re-specifiable) textures.
///
/// Mutable textures are allocated with `glTexImage2D` and can be resized or
/// re-uploaded wholesale; immutable ones use `glTexStorage2D`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct MutableTextureDesc {
    pub format: Format,
    pub ty: PixelDataType,
}

/// Description of a texture allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub min_filter: TextureFilteringMode,
    pub mag_filter: TextureFilteringMode,
    pub horizontal_wrap: TextureWrapMode,
    pub vertical_wrap: TextureWrapMode,
    pub internal_format: InternalFormat,
    pub use_mipmaps: bool,
    pub mutable: Option<MutableTextureDesc>,
}

impl Default for TextureDesc {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            min_filter: TextureFilteringMode::LinearMipmapLinear,
            mag_filter: TextureFilteringMode::Linear,
            horizontal_wrap: TextureWrapMode::Repeat,
            vertical_wrap: TextureWrapMode::Repeat,
            internal_format: InternalFormat::Rgba,
            use_mipmaps: true,
            mutable: None,
        }
    }
}

impl TextureDesc {
    /// Number of mip levels an immutable allocation of this size receives.
    ///
    /// `floor(log2(max(width, height))) + 1`, or 1 when mipmaps are disabled.
    pub fn mip_levels(&self) -> u32 {
        if !self.use_mipmaps {
            return 1;
        }

        let largest = self.width.max(self.height).max(1);
        u32::BITS - largest.leading_zeros()
    }
}
