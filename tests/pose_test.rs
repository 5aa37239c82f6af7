//! End-to-end pose composition, without a GPU: the quad as the frame driver
//! poses it on the first frame.

use cgmath::{InnerSpace, Matrix3, SquareMatrix, Vector3, Vector4};

use quadspin::data_structures::model::Model;
use quadspin::transform::compute_translation;

const QUAD_OFFSET: Vector3<f32> = Vector3::new(0.0, 0.0, -5.0);

#[test]
fn first_frame_pose_is_exactly_the_translation() {
    // angle = 0 on the first frame: the rotation factor is the identity, so
    // the composed model matrix must equal the translation bit-for-bit.
    let model = Model::unit_quad(Vector3::new(0.0, 0.0, 0.0), QUAD_OFFSET);
    assert_eq!(model.pose_matrix(), compute_translation(QUAD_OFFSET));
}

#[test]
fn spinning_preserves_the_translation_column() {
    let mut model = Model::unit_quad(Vector3::new(0.0, 0.0, 0.0), QUAD_OFFSET);
    for angle in [0.3_f32, 1.7, 4.4] {
        model.set_orientation(Vector3::unit_y() * angle);
        let pose = model.pose_matrix();
        assert_eq!(pose.w, Vector4::new(0.0, 0.0, -5.0, 1.0));

        let rotation = Matrix3::from_cols(
            pose.x.truncate(),
            pose.y.truncate(),
            pose.z.truncate(),
        );
        let det = rotation.determinant();
        assert!((det - 1.0).abs() < 1e-6, "det {det} at angle {angle}");
    }
}

#[test]
fn orientation_magnitude_is_the_rotation_angle() {
    // A Rodrigues vector of magnitude pi about +Y flips +X to -X.
    let mut model = Model::unit_quad(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
    model.set_orientation(Vector3::unit_y() * std::f32::consts::PI);
    let rotated = model.pose_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
    assert!((rotated.x + 1.0).abs() < 1e-6);
    assert!(rotated.y.abs() < 1e-6);
    assert!(rotated.z.abs() < 1e-6);

    assert!((model.orientation().magnitude() - std::f32::consts::PI).abs() < 1e-6);
}
