//! quadspin
//!
//! A minimal real-time rendering demo: open a window, compile a shader pair,
//! upload a textured quad, and spin it with a time-driven rotation each
//! frame. The point is the canonical graphics setup sequence (context
//! creation, buffer upload, shader binding, per-frame draw), not production
//! rendering.
//!
//! High-level modules
//! - `transform`: pure matrix builders for translation, axis-angle rotation
//!   and perspective projection
//! - `data_structures`: the quad model, its interleaved vertex layout, and
//!   GPU textures
//! - `context`: central GPU and window context that owns device/queue/pipeline
//! - `pipeline`: the single textured-quad render pipeline
//! - `resources`: asset loading (shader sources, texture image)
//! - `app`: the event loop and per-frame driver
//! - `config` / `error`: startup configuration and the fatal error taxonomy

pub mod app;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod pipeline;
pub mod resources;
pub mod transform;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Matrix4, Vector3};
pub use winit::event::WindowEvent;
