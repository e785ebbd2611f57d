//! Logger setup for applications built on slimgl.
//!
//! The library itself only talks to the `log` facade. Driver debug output is
//! forwarded under the `slimgl::driver` target when the context is created
//! with debugging enabled.

mod init;

pub use init::{LoggingConfig, init_logging};
