//! Transformation and projection matrix builders.
//!
//! All builders are pure functions producing column-major
//! [`cgmath::Matrix4<f32>`] values. The model matrix convention is
//! post-multiply: `clip = projection * view * model * vertex`, so a pose is
//! composed as `compute_translation(position) * compute_rotation(axis, angle)`
//! (rotate in object space, then translate). Reversing that order changes the
//! visual result.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Matrix3, Matrix4, SquareMatrix, Vector3};

/// Depth-range correction from the GL clip-space convention produced by the
/// projection builders (z in [-1, 1]) to wgpu's (z in [0, 1]). Applied once
/// when the projection is written into the shader uniform; the builders
/// themselves stay in the GL convention.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Build a translation matrix: identity with the translation column set to
/// `[offset.x, offset.y, offset.z, 1]`.
pub fn compute_translation(offset: Vector3<f32>) -> Matrix4<f32> {
    let mut transformation = Matrix4::identity();
    transformation.w = offset.extend(1.0);
    transformation
}

/// Build a rotation of `angle` radians around `axis` via the Rodrigues
/// formula `R = I + sin(t) K + (1 - cos(t)) K^2`, where K is the
/// skew-symmetric cross-product matrix of the axis. The 3x3 rotation block is
/// embedded in an otherwise-identity 4x4 matrix.
///
/// `axis` must be unit-length; a non-unit axis scales the rotation
/// unpredictably and a zero axis degenerates to the identity terms only.
/// Normalizing is the caller's responsibility.
pub fn compute_rotation(axis: Vector3<f32>, angle: f32) -> Matrix4<f32> {
    let (sin, cos) = angle.sin_cos();
    // Columns of K = [[0, -z, y], [z, 0, -x], [-y, x, 0]].
    let k = Matrix3::new(
        0.0, axis.z, -axis.y, //
        -axis.z, 0.0, axis.x, //
        axis.y, -axis.x, 0.0,
    );
    let rotation = Matrix3::identity() + k * sin + (k * k) * (1.0 - cos);
    Matrix4::from(rotation)
}

/// Build a right-handed perspective projection from six frustum bounds
/// (the general off-axis form).
///
/// The bottom-right 2x2 block encodes the perspective divide: element
/// (row 3, col 2) is -1 and (row 3, col 3) is 0. Preconditions:
/// `right != left`, `top != bottom`, `far != near` — violating any of them
/// divides by zero. They are not guarded at runtime.
pub fn compute_frustum_projection(
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    near: f32,
    far: f32,
) -> Matrix4<f32> {
    let mut projection = Matrix4::identity();
    projection[0][0] = 2.0 * near / (right - left);
    projection[1][1] = 2.0 * near / (top - bottom);
    projection[2][2] = -(far + near) / (far - near);
    projection[2][0] = (right + left) / (right - left);
    projection[2][1] = (top + bottom) / (top - bottom);
    projection[3][2] = -2.0 * far * near / (far - near);
    projection[2][3] = -1.0;
    projection[3][3] = 0.0;
    projection
}

/// Cotangent via the flipped-and-shifted tangent, `tan(pi/2 - angle)`.
#[inline]
fn cotangent(angle: f32) -> f32 {
    (FRAC_PI_2 - angle).tan()
}

/// Build a right-handed perspective projection from a symmetric frustum
/// (the four-parameter convenience form).
///
/// `field_of_view` is the vertical field of view in radians and must satisfy
/// `0 < field_of_view < pi` (the cotangent has a vertical asymptote at 0).
/// `aspect_ratio > 0`, `0 < near < far`. Produces the same matrix as
/// [`compute_frustum_projection`] for the equivalent symmetric bounds.
pub fn compute_perspective_projection(
    field_of_view: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
) -> Matrix4<f32> {
    let y_scale = cotangent(0.5 * field_of_view);
    let x_scale = y_scale / aspect_ratio;
    let planes_distance = far - near;
    let z_scale = -(near + far) / planes_distance;
    let homogeneous_scale = -2.0 * near * far / planes_distance;
    Matrix4::new(
        x_scale, 0.0, 0.0, 0.0, //
        0.0, y_scale, 0.0, 0.0, //
        0.0, 0.0, z_scale, -1.0, //
        0.0, 0.0, homogeneous_scale, 0.0,
    )
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Vector4};

    use super::*;

    fn rotation_block(m: &Matrix4<f32>) -> Matrix3<f32> {
        Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate())
    }

    fn assert_matrix_eq(a: &Matrix4<f32>, b: &Matrix4<f32>, eps: f32) {
        for col in 0..4 {
            for row in 0..4 {
                assert!(
                    (a[col][row] - b[col][row]).abs() < eps,
                    "element (row {row}, col {col}): {} vs {}",
                    a[col][row],
                    b[col][row]
                );
            }
        }
    }

    #[test]
    fn translation_moves_the_homogeneous_origin() {
        let m = compute_translation(Vector3::new(1.5, -2.0, 7.25));
        let moved = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(moved, Vector4::new(1.5, -2.0, 7.25, 1.0));
    }

    #[test]
    fn rotation_at_zero_angle_is_identity() {
        for axis in [
            Vector3::unit_x(),
            Vector3::unit_y(),
            Vector3::new(1.0, 1.0, 1.0).normalize(),
        ] {
            assert_eq!(compute_rotation(axis, 0.0), Matrix4::identity());
        }
    }

    #[test]
    fn rotation_block_has_unit_determinant() {
        let cases = [
            (Vector3::unit_y(), 0.7),
            (Vector3::unit_x(), -2.4),
            (Vector3::new(0.3, -1.0, 2.0).normalize(), 1.9),
        ];
        for (axis, angle) in cases {
            let det = rotation_block(&compute_rotation(axis, angle)).determinant();
            assert!((det - 1.0).abs() < 1e-6, "det {det} for angle {angle}");
        }
    }

    #[test]
    fn quarter_turn_about_y_maps_x_to_negative_z() {
        let m = compute_rotation(Vector3::unit_y(), FRAC_PI_2);
        let v = m * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(v.x.abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
        assert!((v.z + 1.0).abs() < 1e-6);
        assert_eq!(v.w, 1.0);
    }

    #[test]
    fn translation_after_rotation_is_not_rotation_after_translation() {
        let t = compute_translation(Vector3::new(0.0, 0.0, -5.0));
        let r = compute_rotation(Vector3::unit_y(), 1.0);
        let origin = Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_ne!((t * r) * origin, (r * t) * origin);
    }

    #[test]
    fn projection_forms_agree_on_a_symmetric_frustum() {
        let fov = 45.0_f32.to_radians();
        let aspect = 640.0 / 480.0;
        let (near, far) = (0.1, 10.0);

        let top = near * (0.5 * fov).tan();
        let right = top * aspect;
        let general = compute_frustum_projection(-right, right, top, -top, near, far);
        let symmetric = compute_perspective_projection(fov, aspect, near, far);

        assert_matrix_eq(&general, &symmetric, 1e-5);
    }

    #[test]
    fn perspective_projection_encodes_the_divide() {
        let m = compute_perspective_projection(45.0_f32.to_radians(), 640.0 / 480.0, 0.1, 10.0);
        // Column-major indexing: m[col][row].
        assert_eq!(m[2][3], -1.0);
        assert_eq!(m[3][3], 0.0);
        assert!(m[0][0] > 0.0);
        assert!(m[1][1] > 0.0);
    }
}
