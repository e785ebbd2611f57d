//! Shared scaffolding for the slimgl sample programs.
//!
//! Each binary in `src/bin` implements [`DemoApp`] and hands it to [`run`],
//! which owns the window, the GL context and the redraw loop.

mod clock;
mod mesh;
mod program;
mod runtime;

pub use clock::{FrameClock, FrameTime};
pub use mesh::Mesh;
pub use program::link_program;
pub use runtime::{DemoApp, DemoConfig, Frame, run};

pub use winit::keyboard::KeyCode;
