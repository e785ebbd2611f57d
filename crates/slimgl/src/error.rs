use crate::types::{FramebufferStatus, ShaderType};

/// Errors surfaced by the fallible operations of this crate.
///
/// Precondition violations are not errors: they are debug assertions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{stage} shader failed to compile: {message}")]
    Compilation { stage: ShaderType, message: String },

    #[error("shader program failed to link: {message}")]
    Linking { message: String },

    /// `status` is `None` when the driver reported an unrecognized code.
    #[error("framebuffer `{name}` is incomplete: {}", describe_status(.status))]
    IncompleteFramebuffer {
        name: String,
        status: Option<FramebufferStatus>,
    },
}

fn describe_status(status: &Option<FramebufferStatus>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "unknown status".to_owned(),
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
