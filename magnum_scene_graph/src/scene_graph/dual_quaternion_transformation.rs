/// Dual quaternion strategy.
///
/// The local transformation is a normalized dual quaternion, so only
/// rotation and translation are representable. Compared to a rigid matrix
/// it is smaller and cheaper to renormalize.

use glam::{Mat4, Vec3};
use crate::engine_bail;
use crate::error::Result;
use crate::math::DualQuaternion;
use super::dimension::Dim3;
use super::object::ObjectMut;
use super::transformation::Transformation;

/// 3D rigid transformation stored as a `DualQuaternion`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DualQuaternionTransformation {
    transformation: DualQuaternion,
}

impl Transformation for DualQuaternionTransformation {
    type Dim = Dim3;
    type DataType = DualQuaternion;

    fn transformation(&self) -> DualQuaternion {
        self.transformation
    }

    fn store(&mut self, transformation: DualQuaternion) {
        self.transformation = transformation;
    }

    fn identity() -> DualQuaternion {
        DualQuaternion::IDENTITY
    }

    fn from_matrix(matrix: &Mat4) -> Result<DualQuaternion> {
        DualQuaternion::from_matrix(matrix)
    }

    fn to_matrix(transformation: &DualQuaternion) -> Mat4 {
        transformation.to_matrix()
    }

    fn compose(parent: &DualQuaternion, child: &DualQuaternion) -> DualQuaternion {
        *parent * *child
    }

    fn inverted(transformation: &DualQuaternion) -> DualQuaternion {
        transformation.inverted_normalized()
    }
}

fn check_normalized(transformation: &DualQuaternion, operation: &str) -> Result<()> {
    if !transformation.is_normalized() {
        engine_bail!("magnum::SceneGraph::DualQuaternionTransformation", NotNormalized,
            "{}(): the dual quaternion {:?} is not normalized", operation, transformation);
    }
    Ok(())
}

impl ObjectMut<'_, DualQuaternionTransformation> {
    /// Replace the local transformation
    ///
    /// Fails with `NotNormalized` and leaves the object untouched when the
    /// dual quaternion is not normalized.
    pub fn set_transformation(&mut self, transformation: DualQuaternion) -> Result<&mut Self> {
        check_normalized(&transformation, "set_transformation")?;
        Ok(self.set_transformation_unchecked(transformation))
    }

    pub fn reset_transformation(&mut self) -> &mut Self {
        self.set_transformation_unchecked(DualQuaternion::IDENTITY)
    }

    /// Renormalize to remove accumulated floating-point drift
    pub fn normalize_rotation(&mut self) -> &mut Self {
        let normalized = self.strategy().transformation.normalized();
        self.set_transformation_unchecked(normalized)
    }

    /// Apply a normalized `transformation` after the current one
    pub fn transform(&mut self, transformation: DualQuaternion) -> Result<&mut Self> {
        check_normalized(&transformation, "transform")?;
        Ok(self.transform_unchecked(transformation))
    }

    /// Apply a normalized `transformation` before the current one
    pub fn transform_local(&mut self, transformation: DualQuaternion) -> Result<&mut Self> {
        check_normalized(&transformation, "transform_local")?;
        Ok(self.transform_local_unchecked(transformation))
    }

    pub fn translate(&mut self, vector: Vec3) -> &mut Self {
        self.transform_unchecked(DualQuaternion::from_translation(vector))
    }

    pub fn translate_local(&mut self, vector: Vec3) -> &mut Self {
        self.transform_local_unchecked(DualQuaternion::from_translation(vector))
    }

    /// Rotate around a normalized axis
    pub fn rotate(&mut self, angle: f32, normalized_axis: Vec3) -> &mut Self {
        self.transform_unchecked(DualQuaternion::from_rotation(angle, normalized_axis))
    }

    pub fn rotate_local(&mut self, angle: f32, normalized_axis: Vec3) -> &mut Self {
        self.transform_local_unchecked(DualQuaternion::from_rotation(angle, normalized_axis))
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotate(angle, Vec3::X)
    }

    pub fn rotate_x_local(&mut self, angle: f32) -> &mut Self {
        self.rotate_local(angle, Vec3::X)
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotate(angle, Vec3::Y)
    }

    pub fn rotate_y_local(&mut self, angle: f32) -> &mut Self {
        self.rotate_local(angle, Vec3::Y)
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotate(angle, Vec3::Z)
    }

    pub fn rotate_z_local(&mut self, angle: f32) -> &mut Self {
        self.rotate_local(angle, Vec3::Z)
    }

    fn set_transformation_unchecked(&mut self, transformation: DualQuaternion) -> &mut Self {
        self.update_transformation(|strategy| strategy.transformation = transformation)
    }

    fn transform_unchecked(&mut self, transformation: DualQuaternion) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation_unchecked(transformation * current)
    }

    fn transform_local_unchecked(&mut self, transformation: DualQuaternion) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation_unchecked(current * transformation)
    }
}

#[cfg(test)]
#[path = "dual_quaternion_transformation_tests.rs"]
mod tests;
