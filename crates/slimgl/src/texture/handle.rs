use std::rc::Rc;

use crate::backend::{Backend, NativeId};
use crate::context::Context;
use crate::types::{ImageAccessSpecifier, InternalFormat, TextureType};

/// Non-owning view of a native texture: binding only, no lifetime management.
///
/// Useful to bind textures created elsewhere. [`Texture`](super::Texture)
/// derefs to its handle.
pub struct TextureHandle {
    pub(super) backend: Rc<dyn Backend>,
    pub(super) id: NativeId,
    pub(super) ty: TextureType,
}

impl TextureHandle {
    /// Wraps an existing native texture. The caller keeps ownership of `id`.
    pub fn new(context: &Context, ty: TextureType, id: NativeId) -> Self {
        Self {
            backend: context.backend(),
            id,
            ty,
        }
    }

    /// Binds to the texture's target, or to texture unit `slot`.
    pub fn bind(&self, slot: Option<u32>) {
        match slot {
            Some(slot) => self.backend.bind_texture_unit(slot, self.ty, self.id),
            None => self.backend.bind_texture(self.ty, self.id),
        }
    }

    /// Binds `level` to image unit `slot` for load/store access.
    ///
    /// Without `layer` every layer (every cube face) is bound.
    pub fn bind_image(
        &self,
        slot: u32,
        access: ImageAccessSpecifier,
        format: InternalFormat,
        level: u32,
        layer: Option<u32>,
    ) {
        self.backend.bind_image_texture(
            slot,
            self.id,
            level,
            layer.is_none(),
            layer.unwrap_or(0),
            access,
            format,
        );
    }

    pub fn unbind(&self) {
        self.backend.bind_texture(self.ty, 0);
    }

    pub fn texture_type(&self) -> TextureType {
        self.ty
    }

    pub fn id(&self) -> NativeId {
        self.id
    }
}

impl std::fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureHandle")
            .field("id", &self.id)
            .field("ty", &self.ty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Call;

    #[test]
    fn slot_binding_uses_texture_units() {
        let (ctx, mock) = Context::mock();
        let handle = TextureHandle::new(&ctx, TextureType::TextureCube, 42);

        handle.bind(Some(3));
        handle.bind(None);
        handle.unbind();

        assert_eq!(
            mock.calls(),
            vec![
                Call::BindTextureUnit {
                    unit: 3,
                    ty: TextureType::TextureCube,
                    texture: 42
                },
                Call::BindTexture(TextureType::TextureCube, 42),
                Call::BindTexture(TextureType::TextureCube, 0),
            ]
        );
    }

    #[test]
    fn image_binding_is_layered_without_a_layer() {
        let (ctx, mock) = Context::mock();
        let handle = TextureHandle::new(&ctx, TextureType::Texture2D, 7);

        handle.bind_image(0, ImageAccessSpecifier::WriteOnly, InternalFormat::Rgba32F, 0, None);
        handle.bind_image(1, ImageAccessSpecifier::ReadOnly, InternalFormat::R32F, 2, Some(4));

        assert_eq!(
            mock.calls(),
            vec![
                Call::BindImageTexture {
                    unit: 0,
                    texture: 7,
                    level: 0,
                    layered: true,
                    layer: 0,
                    access: ImageAccessSpecifier::WriteOnly,
                    format: InternalFormat::Rgba32F,
                },
                Call::BindImageTexture {
                    unit: 1,
                    texture: 7,
                    level: 2,
                    layered: false,
                    layer: 4,
                    access: ImageAccessSpecifier::ReadOnly,
                    format: InternalFormat::R32F,
                },
            ]
        );
    }

    #[test]
    fn handles_do_not_delete_their_texture() {
        let (ctx, mock) = Context::mock();
        drop(TextureHandle::new(&ctx, TextureType::Texture2D, 9));
        assert!(mock.calls().is_empty());
    }
}
