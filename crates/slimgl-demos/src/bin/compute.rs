//! GPU particle fountain: a compute shader integrates particles stored in a
//! shader storage buffer, and an instanced quad draws them.

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use slimgl::data::VertexAttribute;
use slimgl::types::{
    AccessSpecifier, BlendingFactor, BufferType, DataType, MemoryBarrierFlags, PrimitiveMode,
    RenderingCapability, ShaderType,
};
use slimgl::{Buffer, Context, ShaderProgram};
use slimgl_demos::{DemoApp, DemoConfig, Frame, Mesh, link_program};

const PARTICLE_COUNT: u32 = 4096;
const WORK_GROUP_SIZE: u32 = 64;

const COMPUTE_SHADER: &str = r#"
#version 450 core
layout(local_size_x = 64, local_size_y = 1, local_size_z = 1) in;

struct Particle {
    vec2 position;
    vec2 velocity;
    float life;
};

layout(std430, binding = 0) restrict buffer ParticleBuffer {
    Particle particles[];
};

uniform float u_DeltaTime;
uniform float u_Time;

float random(vec2 st) {
    return fract(sin(dot(st.xy, vec2(12.9898, 78.233))) * 43758.5453123);
}

void main() {
    uint index = gl_GlobalInvocationID.x;
    if (index >= particles.length()) return;

    particles[index].position += particles[index].velocity * u_DeltaTime;
    particles[index].life -= u_DeltaTime;

    if (particles[index].life <= 0.0) {
        particles[index].position = vec2(0.0, 0.0);

        vec2 seed = vec2(float(index), u_Time + float(index));
        float angle = random(seed) * 6.28318530718;
        float speed = 0.1 + random(seed + vec2(1.0, 0.0)) * 0.2;
        particles[index].velocity = vec2(cos(angle) * speed, sin(angle) * speed);

        // 2 to 5 seconds
        particles[index].life = 2.0 + random(seed + vec2(0.0, 1.0)) * 3.0;
    }

    particles[index].velocity.y -= 0.05 * u_DeltaTime;
    particles[index].velocity *= 0.999;
}
"#;

const VERTEX_SHADER: &str = r#"
#version 450 core
layout(location = 0) in vec2 a_Position;

struct Particle {
    vec2 position;
    vec2 velocity;
    float life;
};

layout(std430, binding = 0) restrict readonly buffer ParticleBuffer {
    Particle particles[];
};

out float v_Life;
out float v_MaxLife;

void main() {
    vec2 worldPos = a_Position + particles[gl_InstanceID].position;
    gl_Position = vec4(worldPos, 0.0, 1.0);
    v_Life = particles[gl_InstanceID].life;
    v_MaxLife = 5.0;
}
"#;

const FRAGMENT_SHADER: &str = r#"
#version 450 core
in float v_Life;
in float v_MaxLife;
out vec4 FragColor;

void main() {
    if (v_Life <= 0.0) discard;

    float alpha = clamp(v_Life / v_MaxLife, 0.0, 1.0);
    vec3 color = mix(vec3(1.0, 0.0, 0.0), vec3(1.0, 1.0, 1.0), alpha);
    FragColor = vec4(color, alpha * 0.8);
}
"#;

#[rustfmt::skip]
const QUAD_VERTICES: [f32; 8] = [
    -0.005, -0.005,
     0.005, -0.005,
     0.005,  0.005,
    -0.005,  0.005,
];

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// std430 layout of the shader's `Particle` struct (8-byte aligned, 24-byte stride).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
struct Particle {
    position: [f32; 2],
    velocity: [f32; 2],
    life: f32,
    _pad: f32,
}

struct Particles {
    particles: Buffer,
    quad: Mesh,
    simulation: ShaderProgram,
    rendering: ShaderProgram,
}

impl DemoApp for Particles {
    fn new(context: &Context) -> Result<Self> {
        let initial = vec![Particle::default(); PARTICLE_COUNT as usize];
        let mut particles = Buffer::new(context);
        particles.allocate(
            std::mem::size_of_val(initial.as_slice()) as u64,
            AccessSpecifier::DynamicDraw,
        );
        particles.upload(&initial, None);

        let quad = Mesh::new(
            context,
            &QUAD_VERTICES,
            &QUAD_INDICES,
            &[VertexAttribute::new(DataType::Float, 2)],
        );

        let simulation = link_program(context, &[(ShaderType::Compute, COMPUTE_SHADER)])?;
        let rendering = link_program(
            context,
            &[
                (ShaderType::Vertex, VERTEX_SHADER),
                (ShaderType::Fragment, FRAGMENT_SHADER),
            ],
        )?;

        context.set_capability(RenderingCapability::Blend, true);
        context.set_blending_function(BlendingFactor::SrcAlpha, BlendingFactor::OneMinusSrcAlpha);

        Ok(Self {
            particles,
            quad,
            simulation,
            rendering,
        })
    }

    fn frame(&mut self, context: &Context, frame: &Frame) {
        context.set_viewport(0, 0, frame.width, frame.height);
        context.clear(true, true, true);

        self.simulation.bind();
        self.particles.bind(BufferType::ShaderStorage, Some(0));
        self.simulation.set_uniform("u_DeltaTime", &frame.dt);
        self.simulation.set_uniform("u_Time", &frame.time);
        context.dispatch_compute(PARTICLE_COUNT.div_ceil(WORK_GROUP_SIZE), 1, 1);
        context.memory_barrier(MemoryBarrierFlags::SHADER_STORAGE);

        self.rendering.bind();
        self.quad
            .draw_instanced(context, PrimitiveMode::Triangles, PARTICLE_COUNT);
        self.rendering.unbind();
        self.particles.unbind();
    }
}

fn main() -> Result<()> {
    slimgl_demos::run::<Particles>(DemoConfig::new("5-compute", 800, 600))
}
