/// Complex number, used as the 2D rotation in dual complex numbers and
/// translation-rotation-scaling transformations.
///
/// A unit complex number `cos θ + i sin θ` represents a rotation by θ.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use glam::{Mat2, Vec2};
use super::type_traits::{fuzzy_equal, is_normalized_squared};

/// Complex number `re + i im`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    /// Real part
    pub re: f32,
    /// Imaginary part
    pub im: f32,
}

impl Default for Complex {
    /// Identity rotation `1 + 0i`
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Complex {
    /// `0 + 0i`
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// `1 + 0i`, no rotation
    pub const IDENTITY: Self = Self { re: 1.0, im: 0.0 };

    pub const fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }

    /// Rotation by `angle` radians, counterclockwise
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { re: cos, im: sin }
    }

    /// Complex number from the first column of a rotation matrix
    pub fn from_matrix(matrix: &Mat2) -> Self {
        Self { re: matrix.x_axis.x, im: matrix.x_axis.y }
    }

    /// Rotation angle in radians, in `(-π, π]`
    pub fn angle(&self) -> f32 {
        self.im.atan2(self.re)
    }

    /// Rotation matrix
    pub fn to_matrix(&self) -> Mat2 {
        Mat2::from_cols(
            Vec2::new(self.re, self.im),
            Vec2::new(-self.im, self.re),
        )
    }

    /// Dot product with itself
    pub fn dot(&self) -> f32 {
        self.re * self.re + self.im * self.im
    }

    pub fn length(&self) -> f32 {
        self.dot().sqrt()
    }

    pub fn is_normalized(&self) -> bool {
        is_normalized_squared(self.dot())
    }

    pub fn normalized(&self) -> Self {
        *self / self.length()
    }

    /// `re - i im`
    pub fn conjugated(&self) -> Self {
        Self { re: self.re, im: -self.im }
    }

    /// Multiplicative inverse, `conjugated / dot`
    pub fn inverted(&self) -> Self {
        self.conjugated() / self.dot()
    }

    /// Inverse of a unit complex number, equal to its conjugate
    ///
    /// The number must be normalized, checked in debug builds only.
    pub fn inverted_normalized(&self) -> Self {
        debug_assert!(self.is_normalized(), "Complex::inverted_normalized(): {:?} is not normalized", self);
        self.conjugated()
    }

    /// Rotate a vector
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        Vec2::from(*self * Complex::from(vector))
    }

    /// Component-wise fuzzy compare
    pub fn fuzzy_eq(&self, other: &Self) -> bool {
        fuzzy_equal(self.re, other.re) && fuzzy_equal(self.im, other.im)
    }
}

impl From<Vec2> for Complex {
    fn from(vector: Vec2) -> Self {
        Self { re: vector.x, im: vector.y }
    }
}

impl From<Complex> for Vec2 {
    fn from(complex: Complex) -> Self {
        Vec2::new(complex.re, complex.im)
    }
}

// ===== ARITHMETIC =====

impl Add for Complex {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self { re: self.re + other.re, im: self.im + other.im }
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self { re: self.re - other.re, im: self.im - other.im }
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Complex {
    type Output = Self;
    fn neg(self) -> Self {
        Self { re: -self.re, im: -self.im }
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.im * other.re + self.re * other.im,
        }
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<f32> for Complex {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self { re: self.re * scalar, im: self.im * scalar }
    }
}

impl Div<f32> for Complex {
    type Output = Self;
    fn div(self, scalar: f32) -> Self {
        Self { re: self.re / scalar, im: self.im / scalar }
    }
}

#[cfg(test)]
#[path = "complex_tests.rs"]
mod tests;
