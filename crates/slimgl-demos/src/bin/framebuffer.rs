//! Renders the triangle into an off-screen framebuffer, then blits it to the window.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use slimgl::data::{MutableTextureDesc, TextureDesc, VertexAttribute};
use slimgl::types::{
    DataType, Format, FramebufferAttachment, InternalFormat, PixelDataType, PrimitiveMode,
    ShaderType, TextureFilteringMode, TextureType,
};
use slimgl::{Context, Framebuffer, Renderbuffer, ShaderProgram, Texture};
use slimgl_demos::{DemoApp, DemoConfig, Frame, Mesh, link_program};

const VERTEX_SHADER: &str = r#"
#version 450 core
layout(location = 0) in vec3 geo_Pos;
layout(location = 1) in vec2 geo_UV;
out vec2 v_UV;
void main() {
    gl_Position = vec4(geo_Pos, 1.0);
    v_UV = geo_UV;
}
"#;

const FRAGMENT_SHADER: &str = r#"
#version 450 core
in vec2 v_UV;
out vec4 FragColor;
void main() {
    FragColor = vec4(v_UV, 0.5, 1.0);
}
"#;

#[rustfmt::skip]
const VERTICES: [f32; 15] = [
    -0.5, -0.5, 0.0,    0.0, 0.0,
     0.5, -0.5, 0.0,    1.0, 0.0,
     0.0,  0.5, 0.0,    0.5, 1.0,
];

const INDICES: [u32; 3] = [0, 1, 2];

struct Offscreen {
    mesh: Mesh,
    program: ShaderProgram,
    framebuffer: Framebuffer,
}

impl DemoApp for Offscreen {
    fn new(context: &Context) -> Result<Self> {
        let mesh = Mesh::new(
            context,
            &VERTICES,
            &INDICES,
            &[
                VertexAttribute::new(DataType::Float, 3),
                VertexAttribute::new(DataType::Float, 2),
            ],
        );
        let program = link_program(
            context,
            &[
                (ShaderType::Vertex, VERTEX_SHADER),
                (ShaderType::Fragment, FRAGMENT_SHADER),
            ],
        )?;

        // Attachments start at 1x1 and follow the window size every frame.
        let mut color = Texture::new(context, TextureType::Texture2D, "scene color");
        color.allocate(&TextureDesc {
            width: 1,
            height: 1,
            internal_format: InternalFormat::Rgba32F,
            min_filter: TextureFilteringMode::Linear,
            use_mipmaps: false,
            mutable: Some(MutableTextureDesc {
                format: Format::Rgba,
                ty: PixelDataType::Float,
            }),
            ..Default::default()
        });

        let mut depth = Renderbuffer::new(context);
        depth.allocate(1, 1, InternalFormat::DepthComponent);

        let mut framebuffer = Framebuffer::new(context, "scene");
        framebuffer.attach(Rc::new(RefCell::new(color)), FramebufferAttachment::Color, 0, None);
        framebuffer.attach(Rc::new(RefCell::new(depth)), FramebufferAttachment::Depth, 0, None);
        framebuffer
            .ensure_complete()
            .context("off-screen framebuffer is unusable")?;

        Ok(Self {
            mesh,
            program,
            framebuffer,
        })
    }

    fn frame(&mut self, context: &Context, frame: &Frame) {
        self.framebuffer.bind();
        self.framebuffer.resize(frame.width, frame.height);
        context.set_viewport(0, 0, frame.width, frame.height);
        context.clear(true, true, true);

        self.program.bind();
        self.mesh.draw(context, PrimitiveMode::Triangles);
        self.program.unbind();
        self.framebuffer.unbind();

        self.framebuffer.blit_to_back_buffer(frame.width, frame.height);
    }
}

fn main() -> Result<()> {
    slimgl_demos::run::<Offscreen>(DemoConfig::new("3-framebuffer", 800, 600))
}
