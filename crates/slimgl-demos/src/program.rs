use anyhow::Context as _;
use slimgl::types::ShaderType;
use slimgl::{Context, ShaderProgram, ShaderStage};

/// Compiles `stages` and links them into a program.
///
/// Compilation and link failures carry the driver's info log.
pub fn link_program(context: &Context, stages: &[(ShaderType, &str)]) -> anyhow::Result<ShaderProgram> {
    let mut program = ShaderProgram::new(context);
    let mut compiled = Vec::with_capacity(stages.len());

    for &(ty, source) in stages {
        let stage = ShaderStage::new(context, ty);
        stage.upload(source);
        stage
            .compile()
            .into_result(ty)
            .with_context(|| format!("failed to compile {ty} shader"))?;

        program.attach(&stage);
        compiled.push(stage);
    }

    program
        .link()
        .into_result()
        .context("failed to link shader program")?;
    program.detach_all();

    log::debug!(
        "linked program {} with uniforms {:?}",
        program.id(),
        program.uniforms().keys().collect::<Vec<_>>()
    );

    Ok(program)
}
