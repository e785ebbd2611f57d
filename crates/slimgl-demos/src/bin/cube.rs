//! A lit, spinning cube. WASD/QE move the camera.

use std::collections::HashSet;

use anyhow::Result;
use glam::{Mat4, Vec3};
use slimgl::data::VertexAttribute;
use slimgl::types::{DataType, PrimitiveMode, RenderingCapability, ShaderType};
use slimgl::{Context, ShaderProgram};
use slimgl_demos::{DemoApp, DemoConfig, Frame, KeyCode, Mesh, link_program};

const VERTEX_SHADER: &str = r#"
#version 450 core
layout(location = 0) in vec3 geo_Pos;
layout(location = 1) in vec2 geo_UV;
layout(location = 2) in vec3 geo_Normal;
uniform mat4 u_Model = mat4(1.0);
uniform mat4 u_View = mat4(1.0);
uniform mat4 u_Projection = mat4(1.0);
out vec3 v_Normal;
void main() {
    gl_Position = u_Projection * u_View * u_Model * vec4(geo_Pos, 1.0);
    v_Normal = normalize(mat3(u_Model) * geo_Normal);
}
"#;

const FRAGMENT_SHADER: &str = r#"
#version 450 core
in vec3 v_Normal;
out vec4 FragColor;
uniform vec3 u_Color = vec3(1.0, 1.0, 0.0);
void main() {
    float light = max(dot(v_Normal, vec3(0.0, 0.0, 1.0)), 0.2);
    FragColor = vec4(u_Color * light, 1.0);
}
"#;

#[rustfmt::skip]
const VERTICES: [f32; 192] = [
    // position           uv          normal
    // front
    -1.0, -1.0,  1.0,     0.0, 0.0,   0.0,  0.0,  1.0,
     1.0, -1.0,  1.0,     1.0, 0.0,   0.0,  0.0,  1.0,
     1.0,  1.0,  1.0,     1.0, 1.0,   0.0,  0.0,  1.0,
    -1.0,  1.0,  1.0,     0.0, 1.0,   0.0,  0.0,  1.0,
    // back
    -1.0, -1.0, -1.0,     1.0, 0.0,   0.0,  0.0, -1.0,
     1.0, -1.0, -1.0,     0.0, 0.0,   0.0,  0.0, -1.0,
     1.0,  1.0, -1.0,     0.0, 1.0,   0.0,  0.0, -1.0,
    -1.0,  1.0, -1.0,     1.0, 1.0,   0.0,  0.0, -1.0,
    // left
    -1.0, -1.0, -1.0,     0.0, 0.0,  -1.0,  0.0,  0.0,
    -1.0, -1.0,  1.0,     1.0, 0.0,  -1.0,  0.0,  0.0,
    -1.0,  1.0,  1.0,     1.0, 1.0,  -1.0,  0.0,  0.0,
    -1.0,  1.0, -1.0,     0.0, 1.0,  -1.0,  0.0,  0.0,
    // right
     1.0, -1.0,  1.0,     0.0, 0.0,   1.0,  0.0,  0.0,
     1.0, -1.0, -1.0,     1.0, 0.0,   1.0,  0.0,  0.0,
     1.0,  1.0, -1.0,     1.0, 1.0,   1.0,  0.0,  0.0,
     1.0,  1.0,  1.0,     0.0, 1.0,   1.0,  0.0,  0.0,
    // top
    -1.0,  1.0,  1.0,     0.0, 0.0,   0.0,  1.0,  0.0,
     1.0,  1.0,  1.0,     1.0, 0.0,   0.0,  1.0,  0.0,
     1.0,  1.0, -1.0,     1.0, 1.0,   0.0,  1.0,  0.0,
    -1.0,  1.0, -1.0,     0.0, 1.0,   0.0,  1.0,  0.0,
    // bottom
    -1.0, -1.0, -1.0,     0.0, 0.0,   0.0, -1.0,  0.0,
     1.0, -1.0, -1.0,     1.0, 0.0,   0.0, -1.0,  0.0,
     1.0, -1.0,  1.0,     1.0, 1.0,   0.0, -1.0,  0.0,
    -1.0, -1.0,  1.0,     0.0, 1.0,   0.0, -1.0,  0.0,
];

#[rustfmt::skip]
const INDICES: [u32; 36] = [
     0,  1,  2,   0,  2,  3,
     4,  5,  6,   4,  6,  7,
     8,  9, 10,   8, 10, 11,
    12, 13, 14,  12, 14, 15,
    16, 17, 18,  16, 18, 19,
    20, 21, 22,  20, 22, 23,
];

/// Camera displacement per frame while a movement key is held.
const CAMERA_SPEED: f32 = 0.1;

struct Cube {
    mesh: Mesh,
    program: ShaderProgram,
    camera: Vec3,
    held: HashSet<KeyCode>,
}

impl Cube {
    fn move_camera(&mut self) {
        for (key, direction) in [
            (KeyCode::KeyW, Vec3::NEG_Z),
            (KeyCode::KeyS, Vec3::Z),
            (KeyCode::KeyA, Vec3::NEG_X),
            (KeyCode::KeyD, Vec3::X),
            (KeyCode::KeyQ, Vec3::NEG_Y),
            (KeyCode::KeyE, Vec3::Y),
        ] {
            if self.held.contains(&key) {
                self.camera += direction * CAMERA_SPEED;
            }
        }
    }
}

impl DemoApp for Cube {
    fn new(context: &Context) -> Result<Self> {
        context.set_capability(RenderingCapability::DepthTest, true);

        let mesh = Mesh::new(
            context,
            &VERTICES,
            &INDICES,
            &[
                VertexAttribute::new(DataType::Float, 3),
                VertexAttribute::new(DataType::Float, 2),
                VertexAttribute::new(DataType::Float, 3),
            ],
        );
        let program = link_program(
            context,
            &[
                (ShaderType::Vertex, VERTEX_SHADER),
                (ShaderType::Fragment, FRAGMENT_SHADER),
            ],
        )?;

        Ok(Self {
            mesh,
            program,
            camera: Vec3::new(0.0, 0.0, 5.0),
            held: HashSet::new(),
        })
    }

    fn key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    fn frame(&mut self, context: &Context, frame: &Frame) {
        self.move_camera();

        context.set_viewport(0, 0, frame.width, frame.height);
        context.clear(true, true, true);

        let model = Mat4::from_axis_angle(Vec3::ONE.normalize(), frame.time);
        let view = Mat4::look_at_rh(self.camera, self.camera + Vec3::NEG_Z, Vec3::Y);
        let projection =
            Mat4::perspective_rh_gl(60f32.to_radians(), frame.aspect_ratio(), 0.1, 100.0);

        self.program.bind();
        self.program.set_uniform("u_Model", &model);
        self.program.set_uniform("u_View", &view);
        self.program.set_uniform("u_Projection", &projection);
        self.program.set_uniform("u_Color", &Vec3::new(1.0, 1.0, 0.0));

        self.mesh.draw(context, PrimitiveMode::Triangles);
        self.program.unbind();
    }
}

fn main() -> Result<()> {
    slimgl_demos::run::<Cube>(DemoConfig::new("2-cube", 640, 480))
}
