//! Quad geometry, the interleaved vertex record, and the demo model.
//!
//! The vertex layout here is a contract with the render pipeline: any
//! geometry feeding it must pack attributes in exactly this order and width
//! or the attribute slots will read garbage.

use bytemuck::{Pod, Zeroable};
use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3};

use crate::transform::{compute_rotation, compute_translation};

/// Types that can describe their GPU vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// One interleaved per-vertex record: position, color, texture coordinate.
///
/// Eight contiguous f32s per vertex, so the stride between consecutive
/// records is 32 bytes and the attributes sit at byte offsets 0, 12 and 24.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for QuadVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// The demo entity: immutable geometry with a mutable pose.
///
/// `orientation` is a Rodrigues vector — its direction is the rotation axis
/// and its magnitude the rotation angle in radians. Pose fields are replaced
/// wholesale via the setters; the vertex and index buffers never change after
/// construction.
#[derive(Clone, Debug)]
pub struct Model {
    orientation: Vector3<f32>,
    position: Vector3<f32>,
    vertices: Vec<QuadVertex>,
    indices: Vec<u32>,
}

impl Model {
    pub fn new(
        orientation: Vector3<f32>,
        position: Vector3<f32>,
        vertices: Vec<QuadVertex>,
        indices: Vec<u32>,
    ) -> Self {
        Self {
            orientation,
            position,
            vertices,
            indices,
        }
    }

    /// The unit quad in the xy-plane, two counter-clockwise triangles.
    ///
    /// Corner colors are red/green/blue/red; texture coordinates cover the
    /// whole image with v growing downwards.
    pub fn unit_quad(orientation: Vector3<f32>, position: Vector3<f32>) -> Self {
        let vertices = vec![
            QuadVertex {
                position: [0.0, 1.0, 0.0],
                color: [1.0, 0.0, 0.0],
                tex_coords: [0.0, 0.0],
            },
            QuadVertex {
                position: [0.0, 0.0, 0.0],
                color: [0.0, 1.0, 0.0],
                tex_coords: [0.0, 1.0],
            },
            QuadVertex {
                position: [1.0, 1.0, 0.0],
                color: [0.0, 0.0, 1.0],
                tex_coords: [1.0, 0.0],
            },
            QuadVertex {
                position: [1.0, 0.0, 0.0],
                color: [1.0, 0.0, 0.0],
                tex_coords: [1.0, 1.0],
            },
        ];
        let indices = vec![0, 1, 3, 0, 3, 2];
        Self::new(orientation, position, vertices, indices)
    }

    pub fn set_orientation(&mut self, orientation: Vector3<f32>) {
        self.orientation = orientation;
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn orientation(&self) -> Vector3<f32> {
        self.orientation
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn vertices(&self) -> &[QuadVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The model matrix for the current pose: rotate in object space, then
    /// translate. A zero orientation yields the translation exactly.
    pub fn pose_matrix(&self) -> Matrix4<f32> {
        let angle = self.orientation.magnitude();
        let rotation = if angle > 0.0 {
            compute_rotation(self.orientation / angle, angle)
        } else {
            Matrix4::identity()
        };
        compute_translation(self.position) * rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_descriptor_matches_the_layout_contract() {
        let desc = QuadVertex::desc();
        assert_eq!(desc.array_stride, 32);
        assert_eq!(desc.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(desc.attributes.len(), 3);
        assert_eq!(desc.attributes[0].offset, 0);
        assert_eq!(desc.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(desc.attributes[1].offset, 12);
        assert_eq!(desc.attributes[1].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(desc.attributes[2].offset, 24);
        assert_eq!(desc.attributes[2].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn raw_bytes_decode_at_the_declared_offsets() {
        let vertex = QuadVertex {
            position: [1.0, 2.0, 3.0],
            color: [0.25, 0.5, 0.75],
            tex_coords: [0.125, 0.875],
        };
        let bytes = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 32);

        let read_f32 = |offset: usize| {
            f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
        };
        assert_eq!([read_f32(0), read_f32(4), read_f32(8)], vertex.position);
        assert_eq!([read_f32(12), read_f32(16), read_f32(20)], vertex.color);
        assert_eq!([read_f32(24), read_f32(28)], vertex.tex_coords);
    }

    #[test]
    fn unit_quad_triangles_wind_counter_clockwise() {
        let quad = Model::unit_quad(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(quad.indices(), &[0, 1, 3, 0, 3, 2]);
        for triangle in quad.indices().chunks(3) {
            let [a, b, c] = [
                quad.vertices()[triangle[0] as usize].position,
                quad.vertices()[triangle[1] as usize].position,
                quad.vertices()[triangle[2] as usize].position,
            ];
            // Screen-plane cross product; positive z means CCW.
            let signed_area =
                (b[0] - a[0]) * (c[1] - b[1]) - (b[1] - a[1]) * (c[0] - b[0]);
            assert!(signed_area > 0.0, "triangle {triangle:?} winds clockwise");
        }
    }

    #[test]
    fn setters_replace_the_pose_wholesale() {
        let mut quad = Model::unit_quad(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
        quad.set_position(Vector3::new(0.0, 0.0, -5.0));
        quad.set_orientation(Vector3::new(0.0, 1.5, 0.0));
        assert_eq!(quad.position(), Vector3::new(0.0, 0.0, -5.0));
        assert_eq!(quad.orientation(), Vector3::new(0.0, 1.5, 0.0));
    }
}
