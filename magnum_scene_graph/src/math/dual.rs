/// Dual numbers `real + ε dual` with `ε² = 0`.
///
/// Generic over the part type so the same algebra backs scalars, complex
/// numbers and quaternions.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use glam::Vec3;
use super::type_traits::fuzzy_equal;

/// Dual number
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dual<T> {
    /// Real part
    pub real: T,
    /// Dual part
    pub dual: T,
}

impl<T> Dual<T> {
    pub const fn new(real: T, dual: T) -> Self {
        Self { real, dual }
    }
}

impl<T: Copy + Neg<Output = T>> Dual<T> {
    /// Dual conjugation `real - ε dual`
    pub fn conjugated(&self) -> Self {
        Self { real: self.real, dual: -self.dual }
    }
}

impl Dual<f32> {
    /// Square root, `√a + ε b / (2√a)`
    ///
    /// Real part must be positive.
    pub fn sqrt(self) -> Self {
        let real = self.real.sqrt();
        Self { real, dual: self.dual / (2.0 * real) }
    }

    /// Sine and cosine, `sin a + ε b cos a` and `cos a - ε b sin a`
    pub fn sin_cos(self) -> (Self, Self) {
        let (sin, cos) = self.real.sin_cos();
        (
            Self { real: sin, dual: self.dual * cos },
            Self { real: cos, dual: -self.dual * sin },
        )
    }

    /// Fuzzy compare of both parts
    pub fn fuzzy_eq(&self, other: &Self) -> bool {
        fuzzy_equal(self.real, other.real) && fuzzy_equal(self.dual, other.dual)
    }
}

// ===== ADDITIVE =====

impl<T: Add<Output = T>> Add for Dual<T> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self { real: self.real + other.real, dual: self.dual + other.dual }
    }
}

impl<T: Copy + Add<Output = T>> AddAssign for Dual<T> {
    fn add_assign(&mut self, other: Self) {
        self.real = self.real + other.real;
        self.dual = self.dual + other.dual;
    }
}

impl<T: Sub<Output = T>> Sub for Dual<T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self { real: self.real - other.real, dual: self.dual - other.dual }
    }
}

impl<T: Copy + Sub<Output = T>> SubAssign for Dual<T> {
    fn sub_assign(&mut self, other: Self) {
        self.real = self.real - other.real;
        self.dual = self.dual - other.dual;
    }
}

impl<T: Neg<Output = T>> Neg for Dual<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self { real: -self.real, dual: -self.dual }
    }
}

// ===== MULTIPLICATIVE =====

/// `(a₀ + ε a₁)(b₀ + ε b₁) = a₀b₀ + ε (a₀b₁ + a₁b₀)`
///
/// Part order is kept, so non-commutative parts (quaternions) compose
/// correctly.
impl<T: Copy + Add<Output = T> + Mul<Output = T>> Mul for Dual<T> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self {
            real: self.real * other.real,
            dual: self.real * other.dual + self.dual * other.real,
        }
    }
}

impl<T: Mul<f32, Output = T>> Mul<f32> for Dual<T> {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self { real: self.real * scalar, dual: self.dual * scalar }
    }
}

impl<T: Div<f32, Output = T>> Div<f32> for Dual<T> {
    type Output = Self;
    fn div(self, scalar: f32) -> Self {
        Self { real: self.real / scalar, dual: self.dual / scalar }
    }
}

/// Division by a scalar dual number
///
/// `(a₀ + ε a₁) / (b₀ + ε b₁) = a₀/b₀ + ε (a₁b₀ - a₀b₁) / b₀²`. The divisor's
/// real part must not be zero.
impl<T> Div<Dual<f32>> for Dual<T>
where
    T: Copy + Sub<Output = T> + Mul<f32, Output = T> + Div<f32, Output = T>,
{
    type Output = Self;
    fn div(self, other: Dual<f32>) -> Self {
        Self {
            real: self.real / other.real,
            dual: (self.dual * other.real - self.real * other.dual) / (other.real * other.real),
        }
    }
}

/// Vector dual number scaled by a scalar dual number
impl Mul<Dual<f32>> for Dual<Vec3> {
    type Output = Self;
    fn mul(self, other: Dual<f32>) -> Self {
        Self {
            real: self.real * other.real,
            dual: self.real * other.dual + self.dual * other.real,
        }
    }
}

#[cfg(test)]
#[path = "dual_tests.rs"]
mod tests;
