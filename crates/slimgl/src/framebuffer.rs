use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::backend::{Backend, NativeId};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::renderbuffer::Renderbuffer;
use crate::texture::Texture;
use crate::types::{Format, FramebufferAttachment, FramebufferStatus, PixelDataType};

/// Image attached to a framebuffer. The framebuffer shares ownership.
#[derive(Debug, Clone)]
pub enum Attachment {
    Texture(Rc<RefCell<Texture>>),
    Renderbuffer(Rc<RefCell<Renderbuffer>>),
}

impl Attachment {
    fn size(&self) -> (u32, u32) {
        match self {
            Self::Texture(texture) => {
                let texture = texture.borrow();
                (texture.desc().width, texture.desc().height)
            }
            Self::Renderbuffer(renderbuffer) => {
                let renderbuffer = renderbuffer.borrow();
                (renderbuffer.width(), renderbuffer.height())
            }
        }
    }

    fn resize(&self, width: u32, height: u32) {
        match self {
            Self::Texture(texture) => texture.borrow_mut().resize(width, height),
            Self::Renderbuffer(renderbuffer) => renderbuffer.borrow_mut().resize(width, height),
        }
    }
}

/// Resources that can be attached to a [`Framebuffer`].
pub trait Attachable: Sized {
    fn into_attachment(target: Rc<RefCell<Self>>) -> Attachment;

    fn from_attachment(attachment: &Attachment) -> Option<Rc<RefCell<Self>>>;
}

impl Attachable for Texture {
    fn into_attachment(target: Rc<RefCell<Self>>) -> Attachment {
        Attachment::Texture(target)
    }

    fn from_attachment(attachment: &Attachment) -> Option<Rc<RefCell<Self>>> {
        match attachment {
            Attachment::Texture(texture) => Some(Rc::clone(texture)),
            Attachment::Renderbuffer(_) => None,
        }
    }
}

impl Attachable for Renderbuffer {
    fn into_attachment(target: Rc<RefCell<Self>>) -> Attachment {
        Attachment::Renderbuffer(target)
    }

    fn from_attachment(attachment: &Attachment) -> Option<Rc<RefCell<Self>>> {
        match attachment {
            Attachment::Renderbuffer(renderbuffer) => Some(Rc::clone(renderbuffer)),
            Attachment::Texture(_) => None,
        }
    }
}

/// Off-screen render target assembled from textures and renderbuffers.
///
/// Attachments are keyed by attachment point and index; only color
/// attachments use indices above 0. Call [`validate`](Self::validate) after
/// changing attachments: most operations require a complete framebuffer.
pub struct Framebuffer {
    backend: Rc<dyn Backend>,
    id: NativeId,
    valid: bool,
    debug_name: String,
    attachments: BTreeMap<(FramebufferAttachment, u32), Attachment>,
}

impl Framebuffer {
    pub fn new(context: &Context, debug_name: impl Into<String>) -> Self {
        let backend = context.backend();
        let id = backend.create_framebuffer();
        let debug_name = debug_name.into();
        log::trace!("framebuffer `{debug_name}` ({id}) created");

        Self {
            backend,
            id,
            valid: false,
            debug_name,
            attachments: BTreeMap::new(),
        }
    }

    pub fn bind(&self) {
        self.backend.bind_framebuffer(self.id);
    }

    pub fn unbind(&self) {
        self.backend.bind_framebuffer(0);
    }

    /// Completeness as reported by the driver, `None` for unrecognized codes.
    pub fn status(&self) -> Option<FramebufferStatus> {
        self.backend.framebuffer_status(self.id)
    }

    /// Checks completeness and records the outcome in [`is_valid`](Self::is_valid).
    pub fn validate(&mut self) -> bool {
        match self.status() {
            Some(FramebufferStatus::Complete) => self.valid = true,
            Some(status) => {
                log::error!("framebuffer `{}` validation failed: {status}", self.debug_name);
                self.valid = false;
            }
            None => {
                log::error!(
                    "framebuffer `{}` validation failed with an unknown status",
                    self.debug_name
                );
                self.valid = false;
            }
        }

        self.valid
    }

    /// Like [`validate`](Self::validate), but reports an incomplete framebuffer as an error.
    pub fn ensure_complete(&mut self) -> Result<()> {
        if self.validate() {
            Ok(())
        } else {
            Err(Error::IncompleteFramebuffer {
                name: self.debug_name.clone(),
                status: self.status(),
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Resizes every attachment.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug_assert!(self.is_valid(), "cannot resize an invalid framebuffer");

        for attachment in self.attachments.values() {
            attachment.resize(width, height);
        }
    }

    /// Attaches `target` at `point`/`index`, replacing what was there.
    ///
    /// `layer` selects a single layer (cube face) of a texture; renderbuffers
    /// have no layers.
    pub fn attach<T: Attachable>(
        &mut self,
        target: Rc<RefCell<T>>,
        point: FramebufferAttachment,
        index: u32,
        layer: Option<u32>,
    ) {
        debug_assert!(
            point == FramebufferAttachment::Color || index == 0,
            "only color attachments can be indexed"
        );

        let attachment = T::into_attachment(target);
        match &attachment {
            Attachment::Texture(texture) => {
                let texture = texture.borrow().id();
                self.backend
                    .framebuffer_texture(self.id, point, index, texture, 0, layer);
            }
            Attachment::Renderbuffer(renderbuffer) => {
                debug_assert!(layer.is_none(), "renderbuffers cannot use layers");
                let renderbuffer = renderbuffer.borrow().id();
                self.backend
                    .framebuffer_renderbuffer(self.id, point, index, renderbuffer);
            }
        }

        self.attachments.insert((point, index), attachment);
    }

    /// The `T` attached at `point`/`index`; `None` when absent or of the other kind.
    pub fn attachment<T: Attachable>(
        &self,
        point: FramebufferAttachment,
        index: u32,
    ) -> Option<Rc<RefCell<T>>> {
        self.attachments
            .get(&(point, index))
            .and_then(T::from_attachment)
    }

    /// Selects the color attachment fragment outputs go to; `None` disables color output.
    pub fn set_target_draw_buffer(&self, index: Option<u32>) {
        debug_assert!(self.is_valid(), "invalid framebuffer");
        self.backend.framebuffer_draw_buffer(self.id, index);
    }

    /// Selects the color attachment reads come from; `None` disables color reads.
    pub fn set_target_read_buffer(&self, index: Option<u32>) {
        debug_assert!(self.is_valid(), "invalid framebuffer");
        self.backend.framebuffer_read_buffer(self.id, index);
    }

    /// Size of the lowest-indexed attachment at `point`, `(0, 0)` when there is none.
    pub fn size(&self, point: FramebufferAttachment) -> (u32, u32) {
        debug_assert!(self.is_valid(), "cannot get the size of an invalid framebuffer");

        self.attachments
            .range((point, 0)..=(point, u32::MAX))
            .next()
            .map_or((0, 0), |(_, attachment)| attachment.size())
    }

    /// Copies the color attachment to the default framebuffer, scaled to
    /// the back buffer size.
    pub fn blit_to_back_buffer(&self, back_buffer_width: u32, back_buffer_height: u32) {
        debug_assert!(self.is_valid(), "cannot blit an invalid framebuffer");

        let source = self.size(FramebufferAttachment::Color);
        self.backend.blit_framebuffer(
            self.id,
            0,
            source,
            (back_buffer_width, back_buffer_height),
        );
    }

    /// Reads a rectangle of the read buffer into `out`.
    #[allow(clippy::too_many_arguments)]
    pub fn read_pixels(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        format: Format,
        ty: PixelDataType,
        out: &mut [u8],
    ) {
        debug_assert!(self.is_valid(), "cannot read pixels from an invalid framebuffer");
        debug_assert!(width > 0 && height > 0, "invalid read size");
        let needed = format.image_size(ty, width, height);
        assert!(
            out.len() >= needed,
            "reading {width}x{height} {format:?}/{ty:?} pixels needs {needed} bytes, got {}",
            out.len()
        );

        self.bind();
        self.backend
            .read_pixels(x, y, width, height, format, ty, out);
        self.unbind();
    }

    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    pub fn id(&self) -> NativeId {
        self.id
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        self.backend.delete_framebuffer(self.id);
        log::trace!("framebuffer `{}` ({}) deleted", self.debug_name, self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, ObjectKind};
    use crate::data::{MutableTextureDesc, TextureDesc};
    use crate::types::{InternalFormat, TextureFilteringMode, TextureType};

    fn color_texture(ctx: &Context, width: u32, height: u32) -> Rc<RefCell<Texture>> {
        let mut texture = Texture::new(ctx, TextureType::Texture2D, "color");
        texture.allocate(&TextureDesc {
            width,
            height,
            min_filter: TextureFilteringMode::Linear,
            use_mipmaps: false,
            mutable: Some(MutableTextureDesc::default()),
            ..Default::default()
        });
        Rc::new(RefCell::new(texture))
    }

    fn depth_buffer(ctx: &Context, width: u32, height: u32) -> Rc<RefCell<Renderbuffer>> {
        let mut rb = Renderbuffer::new(ctx);
        rb.allocate(width, height, InternalFormat::Depth24Stencil8);
        Rc::new(RefCell::new(rb))
    }

    #[test]
    fn empty_framebuffer_fails_validation() {
        let (ctx, _mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "empty");
        assert!(!fb.validate());
        assert!(!fb.is_valid());

        let err = fb.ensure_complete().unwrap_err();
        assert!(err.to_string().contains("`empty`"));
    }

    #[test]
    fn attachments_are_looked_up_by_kind() {
        let (ctx, _mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "scene");
        let color = color_texture(&ctx, 64, 32);
        let depth = depth_buffer(&ctx, 64, 32);

        fb.attach(color.clone(), FramebufferAttachment::Color, 0, None);
        fb.attach(depth.clone(), FramebufferAttachment::DepthStencil, 0, None);
        assert!(fb.validate());

        let found = fb
            .attachment::<Texture>(FramebufferAttachment::Color, 0)
            .unwrap();
        assert!(Rc::ptr_eq(&found, &color));
        assert!(fb
            .attachment::<Renderbuffer>(FramebufferAttachment::Color, 0)
            .is_none());
        assert!(fb
            .attachment::<Texture>(FramebufferAttachment::Color, 1)
            .is_none());
        assert!(fb
            .attachment::<Renderbuffer>(FramebufferAttachment::DepthStencil, 0)
            .is_some());
    }

    #[test]
    fn color_indices_select_native_attachment() {
        let (ctx, mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "gbuffer");
        let normals = color_texture(&ctx, 8, 8);
        let normals_id = normals.borrow().id();
        mock.take_calls();

        fb.attach(normals, FramebufferAttachment::Color, 2, Some(0));
        assert_eq!(
            mock.calls(),
            vec![Call::FramebufferTexture {
                framebuffer: fb.id(),
                point: FramebufferAttachment::Color,
                index: 2,
                texture: normals_id,
                level: 0,
                layer: Some(0),
            }]
        );
    }

    #[test]
    fn resize_propagates_to_every_attachment() {
        let (ctx, _mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "scene");
        let color = color_texture(&ctx, 64, 32);
        let depth = depth_buffer(&ctx, 64, 32);
        fb.attach(color.clone(), FramebufferAttachment::Color, 0, None);
        fb.attach(depth.clone(), FramebufferAttachment::Depth, 0, None);
        assert!(fb.validate());

        fb.resize(320, 200);
        assert_eq!(fb.size(FramebufferAttachment::Color), (320, 200));
        assert_eq!(fb.size(FramebufferAttachment::Depth), (320, 200));
        assert_eq!(color.borrow().desc().width, 320);
        assert_eq!(depth.borrow().height(), 200);
    }

    #[test]
    fn size_honours_the_attachment_point() {
        let (ctx, _mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "shadow");
        fb.attach(depth_buffer(&ctx, 1024, 1024), FramebufferAttachment::Depth, 0, None);
        fb.attach(color_texture(&ctx, 16, 16), FramebufferAttachment::Color, 1, None);
        fb.attach(color_texture(&ctx, 8, 8), FramebufferAttachment::Color, 0, None);
        assert!(fb.validate());

        assert_eq!(fb.size(FramebufferAttachment::Depth), (1024, 1024));
        assert_eq!(fb.size(FramebufferAttachment::Color), (8, 8));
        assert_eq!(fb.size(FramebufferAttachment::Stencil), (0, 0));
    }

    #[test]
    fn blit_uses_color_attachment_size() {
        let (ctx, mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "scene");
        fb.attach(color_texture(&ctx, 400, 300), FramebufferAttachment::Color, 0, None);
        assert!(fb.validate());
        mock.take_calls();

        fb.blit_to_back_buffer(800, 600);
        assert_eq!(
            mock.calls(),
            vec![Call::Blit {
                src: fb.id(),
                dst: 0,
                src_size: (400, 300),
                dst_size: (800, 600),
            }]
        );
    }

    #[test]
    fn read_pixels_binds_around_the_read() {
        let (ctx, mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "picking");
        fb.attach(color_texture(&ctx, 4, 4), FramebufferAttachment::Color, 0, None);
        assert!(fb.validate());
        mock.take_calls();

        let mut pixel = [0xAAu8; 4];
        fb.read_pixels(1, 2, 1, 1, Format::Rgba, PixelDataType::UnsignedByte, &mut pixel);

        assert_eq!(pixel, [0; 4]);
        assert_eq!(
            mock.calls(),
            vec![
                Call::BindFramebuffer(fb.id()),
                Call::ReadPixels {
                    x: 1,
                    y: 2,
                    width: 1,
                    height: 1
                },
                Call::BindFramebuffer(0),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "needs 40000 bytes, got 1")]
    fn read_pixels_rejects_a_short_destination() {
        let (ctx, _mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "picking");
        fb.attach(color_texture(&ctx, 100, 100), FramebufferAttachment::Color, 0, None);

        let mut out = [0u8; 1];
        fb.read_pixels(0, 0, 100, 100, Format::Rgba, PixelDataType::UnsignedByte, &mut out);
    }

    #[test]
    fn bind_and_unbind_are_symmetric() {
        let (ctx, mock) = Context::mock();
        let fb = Framebuffer::new(&ctx, "scene");
        mock.take_calls();

        fb.bind();
        fb.unbind();
        assert_eq!(
            mock.calls(),
            vec![Call::BindFramebuffer(fb.id()), Call::BindFramebuffer(0)]
        );
    }

    #[test]
    fn draw_and_read_buffer_selection() {
        let (ctx, mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "depth-only");
        fb.attach(depth_buffer(&ctx, 4, 4), FramebufferAttachment::Depth, 0, None);
        assert!(fb.validate());
        mock.take_calls();

        fb.set_target_draw_buffer(None);
        fb.set_target_read_buffer(Some(1));
        assert_eq!(
            mock.calls(),
            vec![Call::DrawBuffer(fb.id(), None), Call::ReadBuffer(fb.id(), Some(1))]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot use layers")]
    fn renderbuffers_reject_layers() {
        let (ctx, _mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "scene");
        fb.attach(depth_buffer(&ctx, 4, 4), FramebufferAttachment::Depth, 0, Some(1));
    }

    #[test]
    fn framebuffer_keeps_attachments_alive() {
        let (ctx, mock) = Context::mock();
        let mut fb = Framebuffer::new(&ctx, "scene");
        fb.attach(color_texture(&ctx, 4, 4), FramebufferAttachment::Color, 0, None);
        assert_eq!(mock.live_count(ObjectKind::Texture), 1);

        drop(fb);
        assert_eq!(mock.live_count(ObjectKind::Texture), 0);
        assert_eq!(mock.live_count(ObjectKind::Framebuffer), 0);
    }
}
