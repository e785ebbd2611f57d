//! A single indexed triangle colored by its UVs.

use anyhow::Result;
use slimgl::data::VertexAttribute;
use slimgl::types::{DataType, PrimitiveMode, ShaderType};
use slimgl::{Context, ShaderProgram};
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
    // position         uv
    -0.5, -0.5, 0.0,    0.0, 0.0,
     0.5, -0.5, 0.0,    1.0, 0.0,
     0.0,  0.5, 0.0,    0.5, 1.0,
];

const INDICES: [u32; 3] = [0, 1, 2];

struct Triangle {
    mesh: Mesh,
    program: ShaderProgram,
}

impl DemoApp for Triangle {
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

        Ok(Self { mesh, program })
    }

    fn frame(&mut self, context: &Context, frame: &Frame) {
        context.set_viewport(0, 0, frame.width, frame.height);
        context.clear(true, true, true);

        self.program.bind();
        self.mesh.draw(context, PrimitiveMode::Triangles);
        self.program.unbind();
    }
}

fn main() -> Result<()> {
    slimgl_demos::run::<Triangle>(DemoConfig::new("1-triangle", 800, 600))
}
