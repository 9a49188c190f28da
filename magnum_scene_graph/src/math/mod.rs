//! Math module
//!
//! Dual-number algebra for rigid transformations on top of glam, plus the
//! rigid-matrix helpers and fuzzy comparisons used by the scene graph.

mod complex;
mod dual;
mod dual_complex;
mod dual_quaternion;
mod matrix;
mod type_traits;

pub use complex::Complex;
pub use dual::Dual;
pub use dual_complex::DualComplex;
pub use dual_quaternion::DualQuaternion;
pub use matrix::{RigidMatrix, reflection_2d, reflection_3d};
pub use type_traits::{EPSILON, fuzzy_equal, fuzzy_zero, is_normalized_squared};
