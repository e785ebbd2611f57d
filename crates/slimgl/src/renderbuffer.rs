use std::rc::Rc;

use crate::backend::{Backend, NativeId};
use crate::context::Context;
use crate::types::InternalFormat;

/// Render-only image storage, typically a depth/stencil framebuffer attachment.
pub struct Renderbuffer {
    backend: Rc<dyn Backend>,
    id: NativeId,
    width: u32,
    height: u32,
    format: InternalFormat,
    allocated: bool,
}

impl Renderbuffer {
    pub fn new(context: &Context) -> Self {
        let backend = context.backend();
        let id = backend.create_renderbuffer();
        log::trace!("renderbuffer {id} created");

        Self {
            backend,
            id,
            width: 0,
            height: 0,
            format: InternalFormat::default(),
            allocated: false,
        }
    }

    pub fn bind(&self) {
        self.backend.bind_renderbuffer(self.id);
    }

    pub fn unbind(&self) {
        self.backend.bind_renderbuffer(0);
    }

    pub fn allocate(&mut self, width: u32, height: u32, format: InternalFormat) {
        self.width = width;
        self.height = height;
        self.format = format;

        self.backend
            .renderbuffer_storage(self.id, format, width, height);
        self.allocated = true;
    }

    /// True once storage has been allocated.
    pub fn is_valid(&self) -> bool {
        self.allocated
    }

    /// Reallocates with the current format.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug_assert!(
            self.is_valid(),
            "cannot resize a renderbuffer that has not been allocated"
        );
        self.allocate(width, height, self.format);
    }

    pub fn width(&self) -> u32 {
        debug_assert!(self.is_valid(), "cannot get width of an invalid renderbuffer");
        self.width
    }

    pub fn height(&self) -> u32 {
        debug_assert!(self.is_valid(), "cannot get height of an invalid renderbuffer");
        self.height
    }

    pub fn format(&self) -> InternalFormat {
        self.format
    }

    pub fn id(&self) -> NativeId {
        self.id
    }
}

impl Drop for Renderbuffer {
    fn drop(&mut self) {
        self.backend.delete_renderbuffer(self.id);
        log::trace!("renderbuffer {} deleted", self.id);
    }
}

impl std::fmt::Debug for Renderbuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderbuffer")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, ObjectKind};

    #[test]
    fn resize_keeps_format() {
        let (ctx, mock) = Context::mock();
        let mut rb = Renderbuffer::new(&ctx);
        assert!(!rb.is_valid());

        rb.allocate(800, 600, InternalFormat::Depth24Stencil8);
        rb.resize(1024, 768);

        assert_eq!((rb.width(), rb.height()), (1024, 768));
        assert_eq!(
            mock.calls().last(),
            Some(&Call::RenderbufferStorage {
                renderbuffer: rb.id(),
                format: InternalFormat::Depth24Stencil8,
                width: 1024,
                height: 768,
            })
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not been allocated")]
    fn resize_requires_allocation() {
        let (ctx, _mock) = Context::mock();
        let mut rb = Renderbuffer::new(&ctx);
        rb.resize(4, 4);
    }

    #[test]
    fn bind_and_drop() {
        let (ctx, mock) = Context::mock();
        let rb = Renderbuffer::new(&ctx);
        let id = rb.id();
        rb.bind();
        rb.unbind();
        drop(rb);

        assert_eq!(
            mock.calls()[1..3],
            [Call::BindRenderbuffer(id), Call::BindRenderbuffer(0)]
        );
        assert_eq!(mock.live_count(ObjectKind::Renderbuffer), 0);
    }
}
