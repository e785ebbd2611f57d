use std::num::NonZeroU32;

use anyhow::{Context as _, Result, anyhow};
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use slimgl::logging::{LoggingConfig, init_logging};
use slimgl::{Context, ContextInit};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::clock::FrameClock;

/// Window and context configuration of a demo.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    /// Initial logical size.
    pub size: (u32, u32),
    /// Requested core profile version.
    pub gl_version: (u8, u8),
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "slimgl".to_string(),
            size: (800, 600),
            gl_version: (4, 5),
        }
    }
}

impl DemoConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            size: (width, height),
            ..Default::default()
        }
    }
}

/// Per-frame information handed to [`DemoApp::frame`].
#[derive(Debug, Copy, Clone)]
pub struct Frame {
    /// Framebuffer size in physical pixels.
    pub width: u32,
    pub height: u32,
    /// Seconds since the demo started.
    pub time: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
}

impl Frame {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// A sample program driven by [`run`].
pub trait DemoApp: Sized {
    /// Builds GPU resources. The context is current.
    fn new(context: &Context) -> Result<Self>;

    /// Renders one frame into the back buffer.
    fn frame(&mut self, context: &Context, frame: &Frame);

    /// Keyboard input. Escape is handled by the runtime.
    fn key(&mut self, _key: KeyCode, _pressed: bool) {}
}

/// Opens a window with a GL core context and drives `D` until the window closes.
pub fn run<D: DemoApp>(config: DemoConfig) -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut state = DemoState::<D> {
        config,
        gpu: None,
        error: None,
    };

    event_loop
        .run_app(&mut state)
        .context("winit event loop terminated with error")?;

    match state.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

// Fields drop in declaration order: GL objects go before the context that owns them.
struct Gpu<D> {
    demo: D,
    context: Context,
    clock: FrameClock,
    surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl<D: DemoApp> Gpu<D> {
    fn create(event_loop: &ActiveEventLoop, config: &DemoConfig) -> Result<Self> {
        let (width, height) = config.size;
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24)
            .with_stencil_size(8);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|best, config| {
                        if config.num_samples() > best.num_samples() {
                            config
                        } else {
                            best
                        }
                    })
                    .expect("display offers no framebuffer configuration")
            })
            .map_err(|e| anyhow!("failed to create window: {e}"))?;
        let window = window.context("display builder returned no window")?;

        let raw_handle = window
            .window_handle()
            .map_err(|e| anyhow!("window has no native handle: {e}"))?
            .as_raw();
        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_handle));

        let display = gl_config.display();
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .with_context(|| format!("failed to create an OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| anyhow!("failed to describe the window surface: {e}"))?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create the window surface")?;

        let gl_context = not_current
            .make_current(&surface)
            .context("failed to make the GL context current")?;

        if let Err(e) = surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN)) {
            log::warn!("vsync unavailable: {e}");
        }

        let gl = unsafe {
            slimgl::glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol))
        };
        // SAFETY: the context created above is current on this thread.
        let context = unsafe { Context::from_glow(gl, ContextInit::default()) };

        let demo = D::new(&context).context("failed to initialize demo")?;

        Ok(Self {
            demo,
            context,
            clock: FrameClock::new(),
            surface,
            gl_context,
            window,
        })
    }

    fn resize(&self, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.gl_context, width, height);
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }

        let time = self.clock.tick();
        let frame = Frame {
            width: size.width,
            height: size.height,
            time: time.elapsed,
            dt: time.dt,
        };

        self.demo.frame(&self.context, &frame);
        self.surface
            .swap_buffers(&self.gl_context)
            .context("failed to swap buffers")
    }
}

struct DemoState<D> {
    config: DemoConfig,
    gpu: Option<Gpu<D>>,
    error: Option<anyhow::Error>,
}

impl<D: DemoApp> DemoState<D> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl<D: DemoApp> ApplicationHandler for DemoState<D> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::create(event_loop, &self.config) {
            Ok(gpu) => {
                log::info!(
                    "{} running on {} ({})",
                    self.config.title,
                    gpu.context.hardware(),
                    gpu.context.version()
                );
                self.gpu = Some(gpu);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);

        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
                gpu.window.request_redraw();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if code == KeyCode::Escape && pressed {
                    event_loop.exit();
                } else {
                    gpu.demo.key(code, pressed);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = gpu.redraw() {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release GL objects while the context is still current.
        self.gpu = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_requests_gl_45() {
        let config = DemoConfig::new("1-triangle", 800, 600);
        assert_eq!(config.gl_version, (4, 5));
        assert_eq!(config.size, (800, 600));
    }

    #[test]
    fn aspect_ratio_tolerates_zero_height() {
        let frame = Frame {
            width: 640,
            height: 0,
            time: 0.0,
            dt: 0.0,
        };
        assert_eq!(frame.aspect_ratio(), 640.0);
    }
}
