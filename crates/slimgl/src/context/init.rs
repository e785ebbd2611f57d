use crate::types::{BlendingFactor, CullFace};

/// Initialization parameters for a [`Context`](super::Context).
///
/// The defaults mirror the state most renderers expect out of the box.
#[derive(Debug, Clone)]
pub struct ContextInit {
    /// Route driver debug output into `log`.
    ///
    /// Only honoured by [`Context::from_glow`](super::Context::from_glow);
    /// enabled by default in debug builds.
    pub debug: bool,

    /// Sample across cube map faces at seams.
    pub seamless_cubemap: bool,

    /// Blending function installed at startup (source, destination).
    pub default_blending: (BlendingFactor, BlendingFactor),

    /// Face culled once culling is enabled.
    pub default_cull_face: CullFace,
}

impl Default for ContextInit {
    fn default() -> Self {
        Self {
            debug: cfg!(debug_assertions),
            seamless_cubemap: true,
            default_blending: (BlendingFactor::SrcAlpha, BlendingFactor::OneMinusSrcAlpha),
            default_cull_face: CullFace::Back,
        }
    }
}
