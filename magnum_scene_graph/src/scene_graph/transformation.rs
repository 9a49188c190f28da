/// Transformation strategy contract shared by every object representation.

use std::fmt::Debug;
use crate::error::Result;
use super::dimension::Dimension;

/// Homogeneous matrix type of a strategy
pub type MatrixOf<T> = <<T as Transformation>::Dim as Dimension>::Matrix;

/// Transformation strategy
///
/// A strategy stores the local transformation of one object in its own
/// representation (`DataType`) and tells the scene graph how to convert,
/// compose and invert that representation. `SceneGraph<T>` is generic over
/// it, so the representation is fixed at compile time.
///
/// The mutators that keep the representation valid live on
/// [`ObjectMut`](super::ObjectMut), one `impl` block per strategy.
pub trait Transformation: Default + Clone + Debug + 'static {
    /// Space the strategy transforms
    type Dim: Dimension;

    /// Stored representation (matrix, dual quaternion, ...)
    type DataType: Copy + Debug + PartialEq;

    /// Current local transformation
    fn transformation(&self) -> Self::DataType;

    /// Replace the stored transformation without structural checks
    ///
    /// Used by the scene graph for values it computed itself.
    fn store(&mut self, transformation: Self::DataType);

    /// Check that a computed value can be stored
    ///
    /// Representations that decompose their input reject values they can't
    /// decompose. Everything else is accepted.
    fn validate(_transformation: &Self::DataType) -> Result<()> {
        Ok(())
    }

    /// Identity in the strategy's representation
    fn identity() -> Self::DataType;

    /// Convert from a homogeneous matrix
    ///
    /// Fails when the matrix can't be represented, e.g. a scaling matrix
    /// for a rigid strategy.
    fn from_matrix(matrix: &MatrixOf<Self>) -> Result<Self::DataType>;

    /// Convert to a homogeneous matrix
    fn to_matrix(transformation: &Self::DataType) -> MatrixOf<Self>;

    /// Compose a parent transformation with a child one, `parent·child`
    fn compose(parent: &Self::DataType, child: &Self::DataType) -> Self::DataType;

    /// Cheapest valid inverse for the representation
    fn inverted(transformation: &Self::DataType) -> Self::DataType;
}
