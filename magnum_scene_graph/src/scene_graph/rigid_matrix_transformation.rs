/// Rigid matrix strategies.
///
/// The local transformation is a homogeneous matrix restricted to rotation,
/// reflection and translation. Arbitrary matrices are checked on entry;
/// the convenience mutators compose canonical rigid primitives and skip the
/// check. Accumulated floating-point drift is removed with
/// `normalize_rotation()`.

use glam::{Mat3, Mat4, Vec2, Vec3};
use crate::engine_bail;
use crate::error::Result;
use crate::math::{reflection_2d, reflection_3d, RigidMatrix};
use super::dimension::{Dim2, Dim3};
use super::object::ObjectMut;
use super::transformation::Transformation;

// ===== 2D =====

/// 2D rigid transformation stored as a `Mat3`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidMatrixTransformation2D {
    transformation: Mat3,
}

impl RigidMatrixTransformation2D {
    pub fn matrix(&self) -> Mat3 {
        self.transformation
    }
}

impl Transformation for RigidMatrixTransformation2D {
    type Dim = Dim2;
    type DataType = Mat3;

    fn transformation(&self) -> Mat3 {
        self.transformation
    }

    fn store(&mut self, transformation: Mat3) {
        self.transformation = transformation;
    }

    fn identity() -> Mat3 {
        Mat3::IDENTITY
    }

    fn from_matrix(matrix: &Mat3) -> Result<Mat3> {
        if !matrix.is_rigid_transformation() {
            engine_bail!("magnum::SceneGraph::RigidMatrixTransformation2D", NotRigidTransformation,
                "from_matrix(): {:?}", matrix);
        }
        Ok(*matrix)
    }

    fn to_matrix(transformation: &Mat3) -> Mat3 {
        *transformation
    }

    fn compose(parent: &Mat3, child: &Mat3) -> Mat3 {
        *parent * *child
    }

    fn inverted(transformation: &Mat3) -> Mat3 {
        transformation.inverted_rigid()
    }
}

impl ObjectMut<'_, RigidMatrixTransformation2D> {
    /// Replace the local transformation
    ///
    /// Fails with `NotRigidTransformation` and leaves the object untouched
    /// when the matrix has scaling or shear.
    pub fn set_transformation(&mut self, transformation: Mat3) -> Result<&mut Self> {
        let transformation = RigidMatrixTransformation2D::from_matrix(&transformation)?;
        Ok(self.set_transformation_unchecked(transformation))
    }

    pub fn reset_transformation(&mut self) -> &mut Self {
        self.set_transformation_unchecked(Mat3::IDENTITY)
    }

    /// Re-orthonormalize the rotation part
    pub fn normalize_rotation(&mut self) -> &mut Self {
        let normalized = self.strategy().transformation.orthonormalized_rotation();
        self.set_transformation_unchecked(normalized)
    }

    /// Apply a rigid `transformation` after the current one
    pub fn transform(&mut self, transformation: Mat3) -> Result<&mut Self> {
        let transformation = RigidMatrixTransformation2D::from_matrix(&transformation)?;
        Ok(self.transform_unchecked(transformation))
    }

    /// Apply a rigid `transformation` before the current one
    pub fn transform_local(&mut self, transformation: Mat3) -> Result<&mut Self> {
        let transformation = RigidMatrixTransformation2D::from_matrix(&transformation)?;
        Ok(self.transform_local_unchecked(transformation))
    }

    pub fn translate(&mut self, vector: Vec2) -> &mut Self {
        self.transform_unchecked(Mat3::from_translation(vector))
    }

    pub fn translate_local(&mut self, vector: Vec2) -> &mut Self {
        self.transform_local_unchecked(Mat3::from_translation(vector))
    }

    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        self.transform_unchecked(Mat3::from_angle(angle))
    }

    pub fn rotate_local(&mut self, angle: f32) -> &mut Self {
        self.transform_local_unchecked(Mat3::from_angle(angle))
    }

    /// Reflect across the line with given normal, which must be normalized
    pub fn reflect(&mut self, normal: Vec2) -> &mut Self {
        self.transform_unchecked(reflection_2d(normal))
    }

    pub fn reflect_local(&mut self, normal: Vec2) -> &mut Self {
        self.transform_local_unchecked(reflection_2d(normal))
    }

    fn set_transformation_unchecked(&mut self, transformation: Mat3) -> &mut Self {
        self.update_transformation(|strategy| strategy.transformation = transformation)
    }

    fn transform_unchecked(&mut self, transformation: Mat3) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation_unchecked(transformation * current)
    }

    fn transform_local_unchecked(&mut self, transformation: Mat3) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation_unchecked(current * transformation)
    }
}

// ===== 3D =====

/// 3D rigid transformation stored as a `Mat4`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidMatrixTransformation3D {
    transformation: Mat4,
}

impl RigidMatrixTransformation3D {
    pub fn matrix(&self) -> Mat4 {
        self.transformation
    }
}

impl Transformation for RigidMatrixTransformation3D {
    type Dim = Dim3;
    type DataType = Mat4;

    fn transformation(&self) -> Mat4 {
        self.transformation
    }

    fn store(&mut self, transformation: Mat4) {
        self.transformation = transformation;
    }

    fn identity() -> Mat4 {
        Mat4::IDENTITY
    }

    fn from_matrix(matrix: &Mat4) -> Result<Mat4> {
        if !matrix.is_rigid_transformation() {
            engine_bail!("magnum::SceneGraph::RigidMatrixTransformation3D", NotRigidTransformation,
                "from_matrix(): {:?}", matrix);
        }
        Ok(*matrix)
    }

    fn to_matrix(transformation: &Mat4) -> Mat4 {
        *transformation
    }

    fn compose(parent: &Mat4, child: &Mat4) -> Mat4 {
        *parent * *child
    }

    fn inverted(transformation: &Mat4) -> Mat4 {
        transformation.inverted_rigid()
    }
}

impl ObjectMut<'_, RigidMatrixTransformation3D> {
    /// Replace the local transformation
    ///
    /// Fails with `NotRigidTransformation` and leaves the object untouched
    /// when the matrix has scaling, shear or a projective row.
    pub fn set_transformation(&mut self, transformation: Mat4) -> Result<&mut Self> {
        let transformation = RigidMatrixTransformation3D::from_matrix(&transformation)?;
        Ok(self.set_transformation_unchecked(transformation))
    }

    pub fn reset_transformation(&mut self) -> &mut Self {
        self.set_transformation_unchecked(Mat4::IDENTITY)
    }

    /// Re-orthonormalize the rotation part with Gram-Schmidt
    pub fn normalize_rotation(&mut self) -> &mut Self {
        let normalized = self.strategy().transformation.orthonormalized_rotation();
        self.set_transformation_unchecked(normalized)
    }

    /// Apply a rigid `transformation` after the current one
    pub fn transform(&mut self, transformation: Mat4) -> Result<&mut Self> {
        let transformation = RigidMatrixTransformation3D::from_matrix(&transformation)?;
        Ok(self.transform_unchecked(transformation))
    }

    /// Apply a rigid `transformation` before the current one
    pub fn transform_local(&mut self, transformation: Mat4) -> Result<&mut Self> {
        let transformation = RigidMatrixTransformation3D::from_matrix(&transformation)?;
        Ok(self.transform_local_unchecked(transformation))
    }

    pub fn translate(&mut self, vector: Vec3) -> &mut Self {
        self.transform_unchecked(Mat4::from_translation(vector))
    }

    pub fn translate_local(&mut self, vector: Vec3) -> &mut Self {
        self.transform_local_unchecked(Mat4::from_translation(vector))
    }

    /// Rotate around a normalized axis
    pub fn rotate(&mut self, angle: f32, normalized_axis: Vec3) -> &mut Self {
        self.transform_unchecked(Mat4::from_axis_angle(normalized_axis, angle))
    }

    pub fn rotate_local(&mut self, angle: f32, normalized_axis: Vec3) -> &mut Self {
        self.transform_local_unchecked(Mat4::from_axis_angle(normalized_axis, angle))
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.transform_unchecked(Mat4::from_rotation_x(angle))
    }

    pub fn rotate_x_local(&mut self, angle: f32) -> &mut Self {
        self.transform_local_unchecked(Mat4::from_rotation_x(angle))
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.transform_unchecked(Mat4::from_rotation_y(angle))
    }

    pub fn rotate_y_local(&mut self, angle: f32) -> &mut Self {
        self.transform_local_unchecked(Mat4::from_rotation_y(angle))
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.transform_unchecked(Mat4::from_rotation_z(angle))
    }

    pub fn rotate_z_local(&mut self, angle: f32) -> &mut Self {
        self.transform_local_unchecked(Mat4::from_rotation_z(angle))
    }

    /// Reflect across the plane with given normal, which must be normalized
    pub fn reflect(&mut self, normal: Vec3) -> &mut Self {
        self.transform_unchecked(reflection_3d(normal))
    }

    pub fn reflect_local(&mut self, normal: Vec3) -> &mut Self {
        self.transform_local_unchecked(reflection_3d(normal))
    }

    fn set_transformation_unchecked(&mut self, transformation: Mat4) -> &mut Self {
        self.update_transformation(|strategy| strategy.transformation = transformation)
    }

    fn transform_unchecked(&mut self, transformation: Mat4) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation_unchecked(transformation * current)
    }

    fn transform_local_unchecked(&mut self, transformation: Mat4) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation_unchecked(current * transformation)
    }
}

#[cfg(test)]
#[path = "rigid_matrix_transformation_tests.rs"]
mod tests;
