/// Dual complex number, a 2D rigid transformation.
///
/// The real part is a unit complex number holding the rotation, the dual
/// part holds the translation vector directly. A point `p` is transformed
/// as `real·p + dual`.

use std::ops::{Mul, MulAssign};
use glam::{Mat2, Mat3, Vec2};
use crate::engine_bail;
use crate::error::Result;
use super::complex::Complex;
use super::dual::Dual;
use super::matrix::RigidMatrix;
use super::type_traits::is_normalized_squared;

/// 2D rigid transformation as a dual complex number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualComplex(Dual<Complex>);

impl Default for DualComplex {
    /// Identity transformation
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Dual<Complex>> for DualComplex {
    fn from(dual: Dual<Complex>) -> Self {
        Self(dual)
    }
}

impl From<DualComplex> for Dual<Complex> {
    fn from(dual_complex: DualComplex) -> Self {
        dual_complex.0
    }
}

impl DualComplex {
    /// No rotation, no translation
    pub const IDENTITY: Self = Self(Dual::new(Complex::IDENTITY, Complex::ZERO));

    pub const fn new(real: Complex, dual: Complex) -> Self {
        Self(Dual::new(real, dual))
    }

    /// Rotation by `angle` radians around the origin
    pub fn from_rotation(angle: f32) -> Self {
        Self::new(Complex::rotation(angle), Complex::ZERO)
    }

    /// Translation by `vector`
    pub fn from_translation(vector: Vec2) -> Self {
        Self::new(Complex::IDENTITY, Complex::from(vector))
    }

    /// Rotation followed by translation
    pub fn from_rotation_translation(rotation: Complex, translation: Vec2) -> Self {
        Self::new(rotation, Complex::from(translation))
    }

    /// Point as a dual complex number, `1 + ε p`
    pub fn from_point(point: Vec2) -> Self {
        Self::new(Complex::IDENTITY, Complex::from(point))
    }

    /// Convert a rigid 2D homogeneous matrix
    ///
    /// Fails with `NotRigidTransformation` for matrices with scaling, shear
    /// or a projective row. Reflections pass the check.
    pub fn from_matrix(matrix: &Mat3) -> Result<Self> {
        if !matrix.is_rigid_transformation() {
            engine_bail!("magnum::Math::DualComplex", NotRigidTransformation,
                "DualComplex::from_matrix(): {:?}", matrix);
        }
        Ok(Self::new(
            Complex::from_matrix(&Mat2::from_mat3(*matrix)),
            Complex::from(matrix.translation_part()),
        ))
    }

    pub fn real(&self) -> Complex {
        self.0.real
    }

    pub fn dual(&self) -> Complex {
        self.0.dual
    }

    /// Whether the rotation part has unit length
    pub fn is_normalized(&self) -> bool {
        is_normalized_squared(self.length_squared())
    }

    /// Rotation part
    pub fn rotation(&self) -> Complex {
        self.0.real
    }

    /// Translation part
    pub fn translation(&self) -> Vec2 {
        Vec2::from(self.0.dual)
    }

    /// Homogeneous matrix
    pub fn to_matrix(&self) -> Mat3 {
        let rotation = self.0.real.to_matrix();
        Mat3::from_cols(
            rotation.x_axis.extend(0.0),
            rotation.y_axis.extend(0.0),
            self.translation().extend(1.0),
        )
    }

    /// Complex conjugation of both parts
    pub fn complex_conjugated(&self) -> Self {
        Self::new(self.0.real.conjugated(), self.0.dual.conjugated())
    }

    /// Dual conjugation
    pub fn dual_conjugated(&self) -> Self {
        Self(self.0.conjugated())
    }

    /// Complex and dual conjugation
    pub fn conjugated(&self) -> Self {
        Self::new(
            self.0.real.conjugated(),
            Complex::new(-self.0.dual.re, self.0.dual.im),
        )
    }

    /// Squared length of the rotation part
    pub fn length_squared(&self) -> f32 {
        self.0.real.dot()
    }

    /// Length of the rotation part
    pub fn length(&self) -> f32 {
        self.0.real.length()
    }

    /// Rotation part normalized, translation left as is
    pub fn normalized(&self) -> Self {
        Self::new(self.0.real / self.length(), self.0.dual)
    }

    /// Inverse transformation
    pub fn inverted(&self) -> Self {
        Self::new(self.0.real.inverted(), Complex::ZERO) * Self::new(Complex::IDENTITY, -self.0.dual)
    }

    /// Inverse of a normalized transformation
    ///
    /// Must be normalized, checked in debug builds only.
    pub fn inverted_normalized(&self) -> Self {
        debug_assert!(self.is_normalized(), "DualComplex::inverted_normalized(): {:?} is not normalized", self);
        Self::new(self.0.real.inverted_normalized(), Complex::ZERO) * Self::new(Complex::IDENTITY, -self.0.dual)
    }

    /// Rotate a vector, translation not applied
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        self.0.real.transform_vector(vector)
    }

    /// Rotate and translate a point
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        Vec2::from((*self * Self::from_point(point)).0.dual)
    }

    /// Fuzzy compare of all four components
    pub fn fuzzy_eq(&self, other: &Self) -> bool {
        self.0.real.fuzzy_eq(&other.0.real) && self.0.dual.fuzzy_eq(&other.0.dual)
    }
}

/// Composition `a·b`, applying `b` first
///
/// The translation of `b` is rotated by `a` and offset by the translation
/// of `a`. The `a.dual·b.real` term of the general dual product would
/// rotate `a`'s translation by `b` and is dropped.
impl Mul for DualComplex {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(
            self.0.real * other.0.real,
            self.0.real * other.0.dual + self.0.dual,
        )
    }
}

impl MulAssign for DualComplex {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

#[cfg(test)]
#[path = "dual_complex_tests.rs"]
mod tests;
