//! Demo configuration: user-supplied asset paths and fixed scene constants.

use std::path::PathBuf;

use cgmath::Vector3;

/// Fixed window dimensions; the window is not resizable.
pub const WINDOW_WIDTH: u32 = 640;
pub const WINDOW_HEIGHT: u32 = 480;

/// Vertical field of view in radians.
pub const FIELD_OF_VIEW: f32 = 45.0 * std::f32::consts::PI / 180.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 10.0;

/// How fast the quad spins, in degrees per second of wall-clock time.
pub const ROTATION_SPEED_DEG: f32 = 50.0;
/// Rotation axis for the spin; already unit-length.
pub const SPIN_AXIS: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);
/// Where the quad sits in front of the fixed identity camera.
pub const QUAD_OFFSET: Vector3<f32> = Vector3::new(0.0, 0.0, -5.0);

/// Everything the demo needs from the command line, built once at startup
/// and passed into [`crate::app::run`].
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Path to the WGSL vertex shader source.
    pub vertex_shader_path: PathBuf,
    /// Path to the WGSL fragment shader source.
    pub fragment_shader_path: PathBuf,
    /// Path to the image file mapped onto the quad.
    pub texture_path: PathBuf,
}
