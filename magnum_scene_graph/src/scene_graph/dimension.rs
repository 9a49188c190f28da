/// Dimension markers selecting the homogeneous matrix type.

use std::fmt::Debug;
use std::ops::Mul;
use glam::{Mat3, Mat4};

/// 2D or 3D space
///
/// Features and the dimension-polymorphic object interface only depend on
/// the dimension, never on the concrete transformation strategy.
pub trait Dimension: Debug + 'static {
    /// Homogeneous transformation matrix
    type Matrix: Copy + Debug + PartialEq + Mul<Output = Self::Matrix>;

    /// Number of spatial dimensions
    const DIMENSIONS: usize;

    /// Identity matrix
    fn identity() -> Self::Matrix;
}

/// 2D space, transformed by `Mat3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dim2;

impl Dimension for Dim2 {
    type Matrix = Mat3;
    const DIMENSIONS: usize = 2;

    fn identity() -> Mat3 {
        Mat3::IDENTITY
    }
}

/// 3D space, transformed by `Mat4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dim3;

impl Dimension for Dim3 {
    type Matrix = Mat4;
    const DIMENSIONS: usize = 3;

    fn identity() -> Mat4 {
        Mat4::IDENTITY
    }
}
