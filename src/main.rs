use std::path::PathBuf;

use clap::Parser;

use quadspin::{app, config::RenderConfig};

/// A minimal textured-quad rendering demo.
#[derive(Debug, Parser)]
#[command(name = "quadspin", version, about)]
struct Args {
    /// Filepath of the WGSL vertex shader.
    #[arg(long, value_name = "PATH")]
    vertex_shader: PathBuf,

    /// Filepath of the WGSL fragment shader.
    #[arg(long, value_name = "PATH")]
    fragment_shader: PathBuf,

    /// Filepath of the texture image.
    #[arg(long, value_name = "PATH")]
    texture: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = RenderConfig {
        vertex_shader_path: args.vertex_shader,
        fragment_shader_path: args.fragment_shader,
        texture_path: args.texture,
    };
    app::run(config)
}
