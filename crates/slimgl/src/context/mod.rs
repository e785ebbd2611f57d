//! Driver context and global pipeline state.
//!
//! A [`Context`] owns the backend every wrapper forwards to. Resource
//! constructors take `&Context` and keep their own handle on the backend, so
//! resources may outlive the `Context` value itself.

mod state;
mod init;

pub use state::Context;
pub use init::ContextInit;
