use crate::error::{Error, Result};
use crate::types::ShaderType;

/// Outcome of [`ShaderStage::compile`](crate::ShaderStage::compile).
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ShaderCompilationResult {
    pub success: bool,
    /// Driver info log; empty on success.
    pub message: String,
}

impl ShaderCompilationResult {
    pub(crate) fn succeeded() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }

    pub(crate) fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }

    /// Converts into a `Result` so callers can propagate with `?`.
    pub fn into_result(self, stage: ShaderType) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Compilation {
                stage,
                message: self.message,
            })
        }
    }
}

/// Outcome of [`ShaderProgram::link`](crate::ShaderProgram::link).
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ShaderLinkingResult {
    pub success: bool,
    /// Driver info log; empty on success.
    pub message: String,
}

impl ShaderLinkingResult {
    pub(crate) fn succeeded() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }

    pub(crate) fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }

    pub fn into_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Linking {
                message: self.message,
            })
        }
    }
}
