use std::ops::Deref;

use glam::Vec4;

use super::TextureHandle;
use crate::backend::SamplerParams;
use crate::context::Context;
use crate::data::{MutableTextureDesc, TextureDesc};
use crate::types::{Format, PixelDataType, TextureType};

/// Owning texture: creates the native object and manages its storage.
///
/// Immutable textures (no [`MutableTextureDesc`]) get fixed storage for
/// every mip level and every cube face. Mutable textures are 2D only and may
/// be resized or re-specified with new pixels.
pub struct Texture {
    handle: TextureHandle,
    desc: TextureDesc,
    allocated: bool,
    debug_name: String,
}

impl Texture {
    pub fn new(context: &Context, ty: TextureType, debug_name: impl Into<String>) -> Self {
        let backend = context.backend();
        let id = backend.create_texture(ty);
        let debug_name = debug_name.into();
        log::trace!("texture `{debug_name}` ({id}) created");

        Self {
            handle: TextureHandle { backend, id, ty },
            desc: TextureDesc::default(),
            allocated: false,
            debug_name,
        }
    }

    /// Allocates storage described by `desc`. Width and height are clamped to at least 1.
    ///
    /// Sampling parameters are applied on the first allocation only.
    pub fn allocate(&mut self, desc: &TextureDesc) {
        self.desc = desc.clone();
        self.desc.width = self.desc.width.max(1);
        self.desc.height = self.desc.height.max(1);
        self.allocate_storage(None);
    }

    fn allocate_storage(&mut self, pixels: Option<&[u8]>) {
        let TextureHandle { backend, id, ty } = &self.handle;
        let desc = &self.desc;

        match desc.mutable {
            Some(MutableTextureDesc { format, ty: pixel_type }) => {
                debug_assert!(
                    *ty == TextureType::Texture2D,
                    "mutable textures are only supported for 2D textures"
                );
                backend.tex_image_2d(
                    *id,
                    desc.internal_format,
                    desc.width,
                    desc.height,
                    format,
                    pixel_type,
                    pixels,
                );
            }
            None => backend.tex_storage_2d(
                *id,
                *ty,
                desc.mip_levels(),
                desc.internal_format,
                desc.width,
                desc.height,
            ),
        }

        if !self.allocated {
            backend.texture_sampler_params(
                *id,
                *ty,
                SamplerParams {
                    min_filter: desc.min_filter,
                    mag_filter: desc.mag_filter,
                    wrap_s: desc.horizontal_wrap,
                    wrap_t: desc.vertical_wrap,
                },
            );
        }

        self.allocated = true;
    }

    /// True once storage has been allocated.
    pub fn is_valid(&self) -> bool {
        self.allocated
    }

    pub fn is_mutable(&self) -> bool {
        debug_assert!(
            self.is_valid(),
            "cannot check if a texture is mutable before it has been allocated"
        );
        self.desc.mutable.is_some()
    }

    /// Uploads level 0.
    ///
    /// Mutable textures are re-specified with `pixels`. Cube maps receive
    /// the same pixels on all six faces.
    pub fn upload(&mut self, pixels: &[u8], format: Format, ty: PixelDataType) {
        debug_assert!(
            self.is_valid(),
            "cannot upload data to a texture before it has been allocated"
        );
        debug_assert!(!pixels.is_empty(), "cannot upload an empty pixel buffer");

        // Every face of a cube map receives the same image.
        let needed = format.image_size(ty, self.desc.width, self.desc.height);
        assert!(
            pixels.len() >= needed,
            "{}x{} {format:?}/{ty:?} texture upload needs {needed} bytes per face, got {}",
            self.desc.width,
            self.desc.height,
            pixels.len()
        );

        if self.is_mutable() {
            self.desc.mutable = Some(MutableTextureDesc { format, ty });
            self.allocate_storage(Some(pixels));
            return;
        }

        let TextureHandle { backend, id, ty: target } = &self.handle;
        for face in 0..target.face_count() {
            backend.tex_sub_image_2d(
                *id,
                *target,
                face,
                self.desc.width,
                self.desc.height,
                format,
                ty,
                pixels,
            );
        }
    }

    /// Reallocates a mutable texture at the new size. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug_assert!(
            self.is_valid(),
            "cannot resize a texture before it has been allocated"
        );
        debug_assert!(self.is_mutable(), "cannot resize an immutable texture");

        if width != self.desc.width || height != self.desc.height {
            self.desc.width = width.max(1);
            self.desc.height = height.max(1);
            self.allocate_storage(None);
        }
    }

    pub fn desc(&self) -> &TextureDesc {
        debug_assert!(
            self.is_valid(),
            "cannot get the descriptor of a texture before it has been allocated"
        );
        &self.desc
    }

    /// Regenerates the mip chain from level 0.
    pub fn generate_mipmaps(&self) {
        debug_assert!(
            self.is_valid(),
            "cannot generate mipmaps for a texture before it has been allocated"
        );
        debug_assert!(
            self.desc.use_mipmaps,
            "cannot generate mipmaps for a texture that doesn't use them"
        );

        if self.desc.min_filter.is_mipmap() {
            self.handle.backend.generate_mipmap(self.handle.id, self.handle.ty);
        } else {
            log::error!(
                "texture `{}`: cannot generate mipmaps with non-mipmap min filter {:?}",
                self.debug_name,
                self.desc.min_filter
            );
        }
    }

    /// Color sampled outside the texture with [`ClampToBorder`](crate::types::TextureWrapMode::ClampToBorder).
    pub fn set_border_color(&self, color: Vec4) {
        debug_assert!(
            self.is_valid(),
            "cannot set border color for a texture before it has been allocated"
        );
        self.handle
            .backend
            .texture_border_color(self.handle.id, self.handle.ty, color.to_array());
    }

    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    pub fn handle(&self) -> &TextureHandle {
        &self.handle
    }
}

impl Deref for Texture {
    type Target = TextureHandle;

    fn deref(&self) -> &TextureHandle {
        &self.handle
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.handle.backend.delete_texture(self.handle.id);
        log::trace!("texture `{}` ({}) deleted", self.debug_name, self.handle.id);
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("debug_name", &self.debug_name)
            .field("handle", &self.handle)
            .field("desc", &self.desc)
            .field("allocated", &self.allocated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, ObjectKind};
    use crate::types::{InternalFormat, TextureFilteringMode};

    fn desc(width: u32, height: u32) -> TextureDesc {
        TextureDesc {
            width,
            height,
            ..Default::default()
        }
    }

    fn mutable_desc(width: u32, height: u32) -> TextureDesc {
        TextureDesc {
            use_mipmaps: false,
            min_filter: TextureFilteringMode::Linear,
            internal_format: InternalFormat::Rgba8,
            mutable: Some(MutableTextureDesc::default()),
            ..desc(width, height)
        }
    }

    #[test]
    fn immutable_allocation_uses_full_mip_chain() {
        let (ctx, mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::Texture2D, "albedo");
        assert!(!texture.is_valid());

        texture.allocate(&desc(256, 128));
        assert!(texture.is_valid());
        assert!(!texture.is_mutable());
        assert!(mock.calls().contains(&Call::TexStorage2D {
            texture: texture.id(),
            ty: TextureType::Texture2D,
            levels: 9,
            internal_format: InternalFormat::Rgba,
            width: 256,
            height: 128,
        }));
    }

    #[test]
    fn zero_sizes_are_clamped() {
        let (ctx, _mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::Texture2D, "empty");
        texture.allocate(&desc(0, 0));
        assert_eq!((texture.desc().width, texture.desc().height), (1, 1));
        assert_eq!(texture.desc().mip_levels(), 1);
    }

    #[test]
    fn sampler_parameters_are_set_once() {
        let (ctx, mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::Texture2D, "target");
        texture.allocate(&mutable_desc(64, 64));
        texture.resize(128, 128);
        texture.resize(256, 64);

        let params = mock
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::SamplerParams(..)))
            .count();
        assert_eq!(params, 1);
    }

    #[test]
    fn resize_reallocates_only_on_change() {
        let (ctx, mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::Texture2D, "target");
        texture.allocate(&mutable_desc(64, 32));
        mock.take_calls();

        texture.resize(64, 32);
        assert!(mock.calls().is_empty());

        // Height-only change must be detected.
        texture.resize(64, 48);
        assert_eq!(
            mock.calls(),
            vec![Call::TexImage2D {
                texture: texture.id(),
                internal_format: InternalFormat::Rgba8,
                width: 64,
                height: 48,
                format: Format::Rgba,
                ty: PixelDataType::UnsignedByte,
                with_data: false,
            }]
        );
    }

    #[test]
    fn cube_upload_fills_every_face() {
        let (ctx, mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::TextureCube, "skybox");
        texture.allocate(&desc(2, 2));
        mock.take_calls();

        texture.upload(&[255u8; 16], Format::Rgba, PixelDataType::UnsignedByte);
        let faces: Vec<_> = mock
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::TexSubImage2D { face, .. } => Some(face),
                _ => None,
            })
            .collect();
        assert_eq!(faces, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn mutable_upload_respecifies_storage() {
        let (ctx, mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::Texture2D, "noise");
        texture.allocate(&mutable_desc(1, 1));
        mock.take_calls();

        texture.upload(&[0u8; 4], Format::Red, PixelDataType::Float);
        assert!(matches!(
            mock.calls().as_slice(),
            [Call::TexImage2D {
                format: Format::Red,
                ty: PixelDataType::Float,
                with_data: true,
                ..
            }]
        ));
    }

    #[test]
    #[should_panic(expected = "needs 262144 bytes per face, got 4")]
    fn short_pixel_slices_are_rejected() {
        let (ctx, _mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::Texture2D, "albedo");
        texture.allocate(&desc(256, 256));
        texture.upload(&[0u8; 4], Format::Rgba, PixelDataType::UnsignedByte);
    }

    #[test]
    #[should_panic(expected = "needs 64 bytes per face, got 16")]
    fn short_pixel_slices_are_rejected_before_respecifying() {
        let (ctx, _mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::Texture2D, "noise");
        texture.allocate(&mutable_desc(2, 2));
        texture.upload(&[0u8; 16], Format::Rgba, PixelDataType::Float);
    }

    #[test]
    fn short_cube_face_is_rejected_before_any_face_uploads() {
        let (ctx, mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::TextureCube, "skybox");
        texture.allocate(&desc(2, 2));
        mock.take_calls();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            texture.upload(&[255u8; 15], Format::Rgba, PixelDataType::UnsignedByte)
        }));
        assert!(result.is_err());
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn mipmaps_require_a_mipmap_filter() {
        let (ctx, mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::Texture2D, "albedo");
        texture.allocate(&desc(4, 4));
        texture.generate_mipmaps();
        assert!(mock.calls().contains(&Call::GenerateMipmap(texture.id())));

        let mut linear = Texture::new(&ctx, TextureType::Texture2D, "linear");
        linear.allocate(&TextureDesc {
            min_filter: TextureFilteringMode::Linear,
            ..desc(4, 4)
        });
        mock.take_calls();
        linear.generate_mipmaps();
        assert!(mock.calls().is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "immutable")]
    fn immutable_textures_cannot_resize() {
        let (ctx, _mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::Texture2D, "albedo");
        texture.allocate(&desc(4, 4));
        texture.resize(8, 8);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "only supported for 2D")]
    fn mutable_cube_maps_are_rejected() {
        let (ctx, _mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::TextureCube, "skybox");
        texture.allocate(&mutable_desc(4, 4));
    }

    #[test]
    fn border_color_and_drop() {
        let (ctx, mock) = Context::mock();
        let mut texture = Texture::new(&ctx, TextureType::Texture2D, "shadow");
        texture.allocate(&desc(4, 4));
        texture.set_border_color(Vec4::ONE);
        assert!(mock.calls().contains(&Call::BorderColor(texture.id(), [1.0; 4])));
        assert_eq!(texture.debug_name(), "shadow");

        drop(texture);
        assert_eq!(mock.live_count(ObjectKind::Texture), 0);
    }
}
