gl_enum! {
    /// Attachment points of a framebuffer.
    ///
    /// Color attachments are further addressed by an index; the native point is
    /// `Color.gl() + index`.
    #[derive(Default)]
    pub enum FramebufferAttachment {
        #[default]
        Color = glow::COLOR_ATTACHMENT0,
        Depth = glow::DEPTH_ATTACHMENT,
        Stencil = glow::STENCIL_ATTACHMENT,
        DepthStencil = glow::DEPTH_STENCIL_ATTACHMENT,
    }
}

gl_enum! {
    /// Completeness status reported by the driver.
    pub enum FramebufferStatus {
        Complete = glow::FRAMEBUFFER_COMPLETE,
        Undefined = glow::FRAMEBUFFER_UNDEFINED,
        IncompleteAttachment = glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
        MissingAttachment = glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT,
        IncompleteDrawBuffer = glow::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER,
        IncompleteReadBuffer = glow::FRAMEBUFFER_INCOMPLETE_READ_BUFFER,
        Unsupported = glow::FRAMEBUFFER_UNSUPPORTED,
        IncompleteMultisample = glow::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE,
        IncompleteLayerTargets = glow::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS,
    }
}

impl FramebufferStatus {
    #[inline]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?} (0x{:04X})", self.gl())
    }
}
