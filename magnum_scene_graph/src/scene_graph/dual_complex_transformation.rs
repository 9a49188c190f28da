/// Dual complex strategy.
///
/// The local transformation is a dual complex number with a unit rotation
/// part, so only rotation and translation are representable.

use glam::{Mat3, Vec2};
use crate::engine_bail;
use crate::error::Result;
use crate::math::DualComplex;
use super::dimension::Dim2;
use super::object::ObjectMut;
use super::transformation::Transformation;

/// 2D rigid transformation stored as a `DualComplex`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DualComplexTransformation {
    transformation: DualComplex,
}

impl Transformation for DualComplexTransformation {
    type Dim = Dim2;
    type DataType = DualComplex;

    fn transformation(&self) -> DualComplex {
        self.transformation
    }

    fn store(&mut self, transformation: DualComplex) {
        self.transformation = transformation;
    }

    fn identity() -> DualComplex {
        DualComplex::IDENTITY
    }

    fn from_matrix(matrix: &Mat3) -> Result<DualComplex> {
        DualComplex::from_matrix(matrix)
    }

    fn to_matrix(transformation: &DualComplex) -> Mat3 {
        transformation.to_matrix()
    }

    fn compose(parent: &DualComplex, child: &DualComplex) -> DualComplex {
        *parent * *child
    }

    fn inverted(transformation: &DualComplex) -> DualComplex {
        transformation.inverted_normalized()
    }
}

fn check_normalized(transformation: &DualComplex, operation: &str) -> Result<()> {
    if !transformation.is_normalized() {
        engine_bail!("magnum::SceneGraph::DualComplexTransformation", NotNormalized,
            "{}(): the dual complex number {:?} is not normalized", operation, transformation);
    }
    Ok(())
}

impl ObjectMut<'_, DualComplexTransformation> {
    /// Replace the local transformation
    ///
    /// Fails with `NotNormalized` and leaves the object untouched when the
    /// rotation part doesn't have unit length.
    pub fn set_transformation(&mut self, transformation: DualComplex) -> Result<&mut Self> {
        check_normalized(&transformation, "set_transformation")?;
        Ok(self.set_transformation_unchecked(transformation))
    }

    pub fn reset_transformation(&mut self) -> &mut Self {
        self.set_transformation_unchecked(DualComplex::IDENTITY)
    }

    /// Renormalize the rotation part
    pub fn normalize_rotation(&mut self) -> &mut Self {
        let normalized = self.strategy().transformation.normalized();
        self.set_transformation_unchecked(normalized)
    }

    /// Apply a normalized `transformation` after the current one
    pub fn transform(&mut self, transformation: DualComplex) -> Result<&mut Self> {
        check_normalized(&transformation, "transform")?;
        Ok(self.transform_unchecked(transformation))
    }

    /// Apply a normalized `transformation` before the current one
    pub fn transform_local(&mut self, transformation: DualComplex) -> Result<&mut Self> {
        check_normalized(&transformation, "transform_local")?;
        Ok(self.transform_local_unchecked(transformation))
    }

    pub fn translate(&mut self, vector: Vec2) -> &mut Self {
        self.transform_unchecked(DualComplex::from_translation(vector))
    }

    pub fn translate_local(&mut self, vector: Vec2) -> &mut Self {
        self.transform_local_unchecked(DualComplex::from_translation(vector))
    }

    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        self.transform_unchecked(DualComplex::from_rotation(angle))
    }

    pub fn rotate_local(&mut self, angle: f32) -> &mut Self {
        self.transform_local_unchecked(DualComplex::from_rotation(angle))
    }

    fn set_transformation_unchecked(&mut self, transformation: DualComplex) -> &mut Self {
        self.update_transformation(|strategy| strategy.transformation = transformation)
    }

    fn transform_unchecked(&mut self, transformation: DualComplex) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation_unchecked(transformation * current)
    }

    fn transform_local_unchecked(&mut self, transformation: DualComplex) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation_unchecked(current * transformation)
    }
}

#[cfg(test)]
#[path = "dual_complex_transformation_tests.rs"]
mod tests;
