/// Rigid-transformation helpers for glam's homogeneous matrices.
///
/// `Mat3` is used as the 2D homogeneous transformation, `Mat4` as the 3D one.

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3};
use super::type_traits::{fuzzy_equal, fuzzy_zero, is_normalized_squared};

/// Operations on homogeneous matrices that only hold for rigid transformations
pub trait RigidMatrix: Sized {
    /// Translation vector type (`Vec2` for `Mat3`, `Vec3` for `Mat4`)
    type Vector;

    /// Whether the matrix is made of rotation, reflection and translation only
    ///
    /// The rotation part must be orthonormal and the bottom row must be
    /// `(0, ..., 0, 1)`.
    fn is_rigid_transformation(&self) -> bool;

    /// Inverse of a rigid transformation: transposed rotation, rotated
    /// negative translation
    ///
    /// The input must be rigid, checked in debug builds only.
    fn inverted_rigid(&self) -> Self;

    /// Rotation part re-orthonormalized with Gram-Schmidt, translation kept
    fn orthonormalized_rotation(&self) -> Self;

    /// Translation part
    fn translation_part(&self) -> Self::Vector;
}

impl RigidMatrix for Mat3 {
    type Vector = Vec2;

    fn is_rigid_transformation(&self) -> bool {
        let x = self.x_axis.truncate();
        let y = self.y_axis.truncate();
        is_normalized_squared(x.length_squared())
            && is_normalized_squared(y.length_squared())
            && fuzzy_zero(x.dot(y))
            && fuzzy_zero(self.x_axis.z)
            && fuzzy_zero(self.y_axis.z)
            && fuzzy_equal(self.z_axis.z, 1.0)
    }

    fn inverted_rigid(&self) -> Self {
        debug_assert!(self.is_rigid_transformation(), "Mat3::inverted_rigid(): not a rigid transformation");

        let rotation = Mat2::from_mat3(*self).transpose();
        let translation = -(rotation * self.translation_part());
        Mat3::from_cols(
            rotation.x_axis.extend(0.0),
            rotation.y_axis.extend(0.0),
            translation.extend(1.0),
        )
    }

    fn orthonormalized_rotation(&self) -> Self {
        let x = self.x_axis.truncate().normalize();
        let y = (self.y_axis.truncate() - x * x.dot(self.y_axis.truncate())).normalize();
        Mat3::from_cols(x.extend(0.0), y.extend(0.0), self.z_axis)
    }

    fn translation_part(&self) -> Vec2 {
        self.z_axis.truncate()
    }
}

impl RigidMatrix for Mat4 {
    type Vector = Vec3;

    fn is_rigid_transformation(&self) -> bool {
        let columns = [
            self.x_axis.truncate(),
            self.y_axis.truncate(),
            self.z_axis.truncate(),
        ];
        for (i, column) in columns.iter().enumerate() {
            if !is_normalized_squared(column.length_squared()) {
                return false;
            }
            for other in &columns[i + 1..] {
                if !fuzzy_zero(column.dot(*other)) {
                    return false;
                }
            }
        }

        let last_row = self.row(3);
        fuzzy_zero(last_row.x)
            && fuzzy_zero(last_row.y)
            && fuzzy_zero(last_row.z)
            && fuzzy_equal(last_row.w, 1.0)
    }

    fn inverted_rigid(&self) -> Self {
        debug_assert!(self.is_rigid_transformation(), "Mat4::inverted_rigid(): not a rigid transformation");

        let rotation = Mat3::from_mat4(*self).transpose();
        let translation = -(rotation * self.translation_part());
        let mut out = Mat4::from_mat3(rotation);
        out.w_axis = translation.extend(1.0);
        out
    }

    fn orthonormalized_rotation(&self) -> Self {
        let a = self.x_axis.truncate();
        let b = self.y_axis.truncate();
        let c = self.z_axis.truncate();

        let x = a.normalize();
        let y = (b - x * x.dot(b)).normalize();
        let z = (c - x * x.dot(c) - y * y.dot(c)).normalize();

        Mat4::from_cols(x.extend(0.0), y.extend(0.0), z.extend(0.0), self.w_axis)
    }

    fn translation_part(&self) -> Vec3 {
        self.w_axis.truncate()
    }
}

/// 2D reflection across the line through the origin with given normal
///
/// The normal must be normalized, checked in debug builds only.
pub fn reflection_2d(normal: Vec2) -> Mat3 {
    debug_assert!(
        is_normalized_squared(normal.length_squared()),
        "reflection_2d(): normal {:?} is not normalized", normal
    );
    let x = Vec2::X - normal * (2.0 * normal.x);
    let y = Vec2::Y - normal * (2.0 * normal.y);
    Mat3::from_mat2(Mat2::from_cols(x, y))
}

/// 3D reflection across the plane through the origin with given normal
///
/// The normal must be normalized, checked in debug builds only.
pub fn reflection_3d(normal: Vec3) -> Mat4 {
    debug_assert!(
        is_normalized_squared(normal.length_squared()),
        "reflection_3d(): normal {:?} is not normalized", normal
    );
    let x = Vec3::X - normal * (2.0 * normal.x);
    let y = Vec3::Y - normal * (2.0 * normal.y);
    let z = Vec3::Z - normal * (2.0 * normal.z);
    Mat4::from_mat3(Mat3::from_cols(x, y, z))
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
