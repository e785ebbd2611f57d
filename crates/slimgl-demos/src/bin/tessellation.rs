//! A wireframe plane tessellated on the GPU and deformed into waves.

use anyhow::Result;
use glam::{Mat4, Vec3};
use slimgl::data::VertexAttribute;
use slimgl::types::{DataType, PrimitiveMode, RasterizationMode, RenderingCapability, ShaderType};
use slimgl::{Context, ShaderProgram};
use slimgl_demos::{DemoApp, DemoConfig, Frame, Mesh, link_program};

const VERTEX_SHADER: &str = r#"
#version 450 core
layout(location = 0) in vec3 geo_Pos;
layout(location = 1) in vec2 geo_UV;
out vec3 vs_Position;
out vec2 vs_UV;

void main() {
    vs_Position = geo_Pos;
    vs_UV = geo_UV;
}
"#;

const CONTROL_SHADER: &str = r#"
#version 450 core
layout(vertices = 4) out;
in vec3 vs_Position[];
in vec2 vs_UV[];
out vec3 tcs_Position[];
out vec2 tcs_UV[];
uniform float u_TessellationLevel = 16.0;
uniform float u_Time;

void main() {
    tcs_Position[gl_InvocationID] = vs_Position[gl_InvocationID];
    tcs_UV[gl_InvocationID] = vs_UV[gl_InvocationID];

    if (gl_InvocationID == 0) {
        float level = mix(0, u_TessellationLevel, (sin(u_Time) + 1.0) / 2.0);
        gl_TessLevelOuter[0] = gl_TessLevelOuter[1] = gl_TessLevelOuter[2] = gl_TessLevelOuter[3] = level;
        gl_TessLevelInner[0] = gl_TessLevelInner[1] = level;
    }
}
"#;

const EVALUATION_SHADER: &str = r#"
#version 450 core
layout(quads, equal_spacing, ccw) in;
in vec3 tcs_Position[];
in vec2 tcs_UV[];
out vec2 tes_UV;
out vec3 tes_WorldPos;
uniform float u_Time = 0.0;
uniform mat4 u_ViewProjection;

vec3 interpolate3D(vec3 v0, vec3 v1, vec3 v2, vec3 v3, vec2 coord) {
    return mix(mix(v0, v1, coord.x), mix(v3, v2, coord.x), coord.y);
}

vec2 interpolate2D(vec2 v0, vec2 v1, vec2 v2, vec2 v3, vec2 coord) {
    return mix(mix(v0, v1, coord.x), mix(v3, v2, coord.x), coord.y);
}

void main() {
    vec3 position = interpolate3D(tcs_Position[0], tcs_Position[1], tcs_Position[2], tcs_Position[3], gl_TessCoord.xy);
    tes_UV = interpolate2D(tcs_UV[0], tcs_UV[1], tcs_UV[2], tcs_UV[3], gl_TessCoord.xy);

    position.y = sin(position.x * 2.0 + u_Time * 1.5) * 0.5 + cos(position.z * 2.0 + u_Time) * 0.3;

    tes_WorldPos = position;
    gl_Position = u_ViewProjection * vec4(position, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
#version 450 core
in vec2 tes_UV;
in vec3 tes_WorldPos;
out vec4 FragColor;

void main() {
    float height = (tes_WorldPos.y + 1.0) * 0.5;
    vec3 color = mix(vec3(0.2, 0.2, 1.0), vec3(1.0, 0.2, 0.2), height);
    FragColor = vec4(color, 1.0);
}
"#;

#[rustfmt::skip]
const VERTICES: [f32; 20] = [
    -2.0, 0.0, -2.0,    0.0, 0.0,
     2.0, 0.0, -2.0,    1.0, 0.0,
     2.0, 0.0,  2.0,    1.0, 1.0,
    -2.0, 0.0,  2.0,    0.0, 1.0,
];

const INDICES: [u32; 4] = [0, 1, 2, 3];

struct Waves {
    patch: Mesh,
    program: ShaderProgram,
}

impl DemoApp for Waves {
    fn new(context: &Context) -> Result<Self> {
        context.set_capability(RenderingCapability::DepthTest, true);
        context.set_rasterization_mode(RasterizationMode::Line);
        context.set_patch_vertices(INDICES.len() as u32);

        let patch = Mesh::new(
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
                (ShaderType::TessellationControl, CONTROL_SHADER),
                (ShaderType::TessellationEvaluation, EVALUATION_SHADER),
                (ShaderType::Fragment, FRAGMENT_SHADER),
            ],
        )?;

        Ok(Self { patch, program })
    }

    fn frame(&mut self, context: &Context, frame: &Frame) {
        context.set_viewport(0, 0, frame.width, frame.height);
        context.clear(true, true, true);

        let projection =
            Mat4::perspective_rh_gl(60f32.to_radians(), frame.aspect_ratio(), 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y);

        self.program.bind();
        self.program.set_uniform("u_Time", &frame.time);
        self.program.set_uniform("u_TessellationLevel", &64.0f32);
        self.program
            .set_uniform("u_ViewProjection", &(projection * view));
        self.patch.draw(context, PrimitiveMode::Patches);
        self.program.unbind();
    }
}

fn main() -> Result<()> {
    slimgl_demos::run::<Waves>(DemoConfig::new("6-tessellation", 800, 600))
}
