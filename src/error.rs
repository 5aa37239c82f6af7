//! Startup error taxonomy.
//!
//! Every variant is fatal: the program reports it and exits with a non-zero
//! status before the render loop starts. Nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading assets or building GPU state at
/// startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read shader source {}", path.display())]
    ShaderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Shader validation failed; `message` carries the compiler diagnostic.
    #[error("failed to compile shader {}: {message}", path.display())]
    ShaderCompile { path: PathBuf, message: String },

    #[error("failed to read texture {}", path.display())]
    TextureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture {}", path.display())]
    TextureDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
