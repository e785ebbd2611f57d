//! Typed replacements for the raw integer constants of the driver API.
//!
//! Every enum exposes `gl()` (typed value -> native constant) and `from_gl()`
//! (native constant -> typed value). Only the backend translates; wrappers and
//! applications stay on the typed side.

/// Declares a fieldless enum whose variants map 1:1 onto native constants.
macro_rules! gl_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the native constant for this value.
            #[inline]
            pub const fn gl(self) -> u32 {
                match self {
                    $($name::$variant => $value),+
                }
            }

            /// Maps a native constant back to its typed value.
            pub fn from_gl(value: u32) -> Option<Self> {
                match value {
                    $(v if v == $value => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

mod buffer;
mod framebuffer;
mod pipeline;
mod shader;
mod texture;

pub use buffer::{AccessSpecifier, BufferType, DataType};
pub use framebuffer::{FramebufferAttachment, FramebufferStatus};
pub use pipeline::{
    BlendingEquation, BlendingFactor, ComparisonAlgorithm, CullFace, MemoryBarrierFlags,
    PrimitiveMode, RasterizationMode, RenderingCapability, StencilOperation,
};
pub use shader::{ShaderType, UniformType};
pub use texture::{
    Format, ImageAccessSpecifier, InternalFormat, PixelDataType, TextureFilteringMode,
    TextureType, TextureWrapMode,
};

/// Graphics backends a [`Context`](crate::Context) can drive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GraphicsBackend {
    /// Recording fake driver, used by tests.
    Mock,
    /// OpenGL 4.5 core through `glow`.
    OpenGl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_round_trips_through_its_native_constant() {
        for &v in ShaderType::ALL {
            assert_eq!(ShaderType::from_gl(v.gl()), Some(v));
        }
        for &v in UniformType::ALL {
            assert_eq!(UniformType::from_gl(v.gl()), Some(v));
        }
        for &v in FramebufferAttachment::ALL {
            assert_eq!(FramebufferAttachment::from_gl(v.gl()), Some(v));
        }
    }

    #[test]
    fn unknown_constant_maps_to_none() {
        assert_eq!(UniformType::from_gl(0xDEAD), None);
        assert_eq!(BufferType::from_gl(0), None);
    }

    #[test]
    fn native_constants_match_the_driver_headers() {
        assert_eq!(BufferType::Vertex.gl(), 0x8892);
        assert_eq!(BufferType::Index.gl(), 0x8893);
        assert_eq!(PrimitiveMode::Triangles.gl(), 0x0004);
        assert_eq!(PrimitiveMode::Patches.gl(), 0x000E);
        assert_eq!(FramebufferAttachment::Color.gl(), 0x8CE0);
        assert_eq!(TextureType::TextureCube.gl(), 0x8513);
    }
}
