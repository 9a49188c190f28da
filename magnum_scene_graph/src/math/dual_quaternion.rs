/// Dual quaternion, a 3D rigid transformation.
///
/// The real part is a unit quaternion holding the rotation. The dual part
/// is `(t/2)·real` for translation `t`, so the translation is only
/// recoverable through `2·dual·real*`. Quaternions use glam's xyzw layout,
/// `w` being the scalar part.

use std::ops::{Mul, MulAssign, Neg};
use glam::{Mat3, Mat4, Quat, Vec3};
use crate::engine_bail;
use crate::error::Result;
use super::dual::Dual;
use super::matrix::RigidMatrix;
use super::type_traits::{fuzzy_zero, is_normalized_squared, EPSILON};

/// Quaternion from a vector part and a scalar part
fn quat(vector: Vec3, scalar: f32) -> Quat {
    Quat::from_xyzw(vector.x, vector.y, vector.z, scalar)
}

/// 3D rigid transformation as a dual quaternion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualQuaternion(Dual<Quat>);

impl Default for DualQuaternion {
    /// Identity transformation
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Dual<Quat>> for DualQuaternion {
    fn from(dual: Dual<Quat>) -> Self {
        Self(dual)
    }
}

impl From<DualQuaternion> for Dual<Quat> {
    fn from(dual_quaternion: DualQuaternion) -> Self {
        dual_quaternion.0
    }
}

impl DualQuaternion {
    /// No rotation, no translation
    pub const IDENTITY: Self = Self(Dual::new(Quat::IDENTITY, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)));

    pub const fn new(real: Quat, dual: Quat) -> Self {
        Self(Dual::new(real, dual))
    }

    /// Assemble from dual vector and dual scalar parts
    pub fn from_parts(vector: Dual<Vec3>, scalar: Dual<f32>) -> Self {
        Self::new(quat(vector.real, scalar.real), quat(vector.dual, scalar.dual))
    }

    /// Rotation by `angle` radians around a normalized `axis`
    ///
    /// The axis must be normalized, checked in debug builds only.
    pub fn from_rotation(angle: f32, normalized_axis: Vec3) -> Self {
        debug_assert!(
            is_normalized_squared(normalized_axis.length_squared()),
            "DualQuaternion::from_rotation(): axis {:?} is not normalized", normalized_axis
        );
        Self::new(Quat::from_axis_angle(normalized_axis, angle), quat(Vec3::ZERO, 0.0))
    }

    /// Translation by `vector`
    pub fn from_translation(vector: Vec3) -> Self {
        Self::new(Quat::IDENTITY, quat(vector * 0.5, 0.0))
    }

    /// Rotation followed by translation
    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self::new(rotation, quat(translation * 0.5, 0.0) * rotation)
    }

    /// Point as a dual quaternion, `1 + ε p`
    pub fn from_point(point: Vec3) -> Self {
        Self::new(Quat::IDENTITY, quat(point, 0.0))
    }

    /// Convert a rigid 3D homogeneous matrix
    ///
    /// Fails with `NotRigidTransformation` for matrices with scaling, shear
    /// or a projective row.
    pub fn from_matrix(matrix: &Mat4) -> Result<Self> {
        if !matrix.is_rigid_transformation() {
            engine_bail!("magnum::Math::DualQuaternion", NotRigidTransformation,
                "DualQuaternion::from_matrix(): {:?}", matrix);
        }
        let rotation = Quat::from_mat3(&Mat3::from_mat4(*matrix));
        Ok(Self::from_rotation_translation(rotation, matrix.translation_part()))
    }

    pub fn real(&self) -> Quat {
        self.0.real
    }

    pub fn dual(&self) -> Quat {
        self.0.dual
    }

    /// Whether the transformation is a proper rigid one
    ///
    /// Both the real part has unit length and the dual part of the squared
    /// length is zero, meaning real and dual parts are orthogonal.
    pub fn is_normalized(&self) -> bool {
        let length_squared = self.length_squared();
        is_normalized_squared(length_squared.real) && fuzzy_zero(length_squared.dual)
    }

    /// Rotation part
    pub fn rotation(&self) -> Quat {
        self.0.real
    }

    /// Translation part, `2·(dual·real*)` vector part
    pub fn translation(&self) -> Vec3 {
        (self.0.dual * self.0.real.conjugate()).xyz() * 2.0
    }

    /// Homogeneous matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.0.real, self.translation())
    }

    /// Quaternion conjugation of both parts
    pub fn quaternion_conjugated(&self) -> Self {
        Self::new(self.0.real.conjugate(), self.0.dual.conjugate())
    }

    /// Dual conjugation
    pub fn dual_conjugated(&self) -> Self {
        Self(self.0.conjugated())
    }

    /// Quaternion and dual conjugation
    pub fn conjugated(&self) -> Self {
        let dual = self.0.dual;
        Self::new(self.0.real.conjugate(), quat(dual.xyz(), -dual.w))
    }

    /// Squared length, `real·real + ε 2 real·dual`
    pub fn length_squared(&self) -> Dual<f32> {
        Dual::new(
            self.0.real.dot(self.0.real),
            2.0 * self.0.real.dot(self.0.dual),
        )
    }

    pub fn length(&self) -> Dual<f32> {
        self.length_squared().sqrt()
    }

    /// Normalized dual quaternion, both parts divided by the dual length
    pub fn normalized(&self) -> Self {
        Self(self.0 / self.length())
    }

    /// Inverse transformation
    pub fn inverted(&self) -> Self {
        Self(self.quaternion_conjugated().0 / self.length_squared())
    }

    /// Inverse of a normalized transformation, equal to the quaternion
    /// conjugate
    ///
    /// Must be normalized, checked in debug builds only.
    pub fn inverted_normalized(&self) -> Self {
        debug_assert!(self.is_normalized(), "DualQuaternion::inverted_normalized(): {:?} is not normalized", self);
        self.quaternion_conjugated()
    }

    /// Rotate a vector, translation not applied
    ///
    /// The rotation part is expected to have unit length.
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.0.real * vector
    }

    /// Rotate and translate a point
    ///
    /// Works for non-normalized dual quaternions as well. See
    /// [`transform_point_normalized`](Self::transform_point_normalized) for
    /// the faster variant.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let result = *self * Self::from_point(point) * self.inverted().dual_conjugated();
        result.0.dual.xyz()
    }

    /// Rotate and translate a point with a normalized dual quaternion
    ///
    /// Must be normalized, checked in debug builds only. Release builds
    /// return garbage for non-normalized input.
    pub fn transform_point_normalized(&self, point: Vec3) -> Vec3 {
        debug_assert!(self.is_normalized(), "DualQuaternion::transform_point_normalized(): {:?} is not normalized", self);
        let result = *self * Self::from_point(point) * self.conjugated();
        result.0.dual.xyz()
    }

    /// Fuzzy compare of all eight components
    pub fn fuzzy_eq(&self, other: &Self) -> bool {
        self.0.real.abs_diff_eq(other.0.real, EPSILON) && self.0.dual.abs_diff_eq(other.0.dual, EPSILON)
    }

    /// Screw linear interpolation
    ///
    /// Interpolates rotation and translation along a single screw motion
    /// from `a` (at `t = 0`) to `b` (at `t = 1`), taking the shortest path.
    /// When both rotations are equal, only the dual part is interpolated.
    /// Fails with `NotNormalized` unless both inputs are normalized.
    pub fn sclerp(a: &Self, b: &Self, t: f32) -> Result<Self> {
        if !a.is_normalized() || !b.is_normalized() {
            engine_bail!("magnum::Math::DualQuaternion", NotNormalized,
                "DualQuaternion::sclerp(): {:?} and {:?} must be normalized", a, b);
        }

        let dot = a.0.real.xyz().dot(b.0.real.xyz());
        let cos_half_angle = dot + a.0.real.w * b.0.real.w;
        if cos_half_angle.abs() >= 1.0 {
            let dual = a.0.dual.xyz().lerp(b.0.dual.xyz(), t);
            return Ok(Self::new(a.0.real, quat(dual, 0.0)));
        }

        // l + εm = a*·b, negated b keeps the shortest path
        let diff = a.quaternion_conjugated() * if dot < 0.0 { -*b } else { *b };
        let l = diff.0.real;
        let m = diff.0.dual;

        let l_vector = l.xyz();
        let m_vector = m.xyz();
        let inv_r = 1.0 / l_vector.length();
        let half_angle = Dual::new(l.w.acos(), -m.w * inv_r);

        let direction = l_vector * inv_r;
        let moment = (m_vector - direction * (half_angle.dual * l.w)) * inv_r;
        let axis = Dual::new(direction, moment);

        let (sin, cos) = (half_angle * t).sin_cos();
        Ok(*a * Self::from_parts(axis * sin, cos))
    }
}

/// Composition `a·b`, applying `b` first
///
/// Full dual product, quaternion parts don't commute.
impl Mul for DualQuaternion {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }
}

impl MulAssign for DualQuaternion {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Neg for DualQuaternion {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

#[cfg(test)]
#[path = "dual_quaternion_tests.rs"]
mod tests;
