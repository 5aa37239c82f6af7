//! Demo data structures: the quad model and GPU textures.
//!
//! - `model` contains the interleaved vertex record, its buffer-layout
//!   contract, and the posed quad model
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod model;
pub mod texture;
