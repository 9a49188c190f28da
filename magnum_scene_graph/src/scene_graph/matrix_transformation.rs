/// General matrix strategies.
///
/// The local transformation is a plain homogeneous matrix with no structural
/// constraint: scaling, shear and projective parts are all accepted. The
/// inverse is the general one.
///
/// Angles are in radians, counterclockwise.

use glam::{Mat3, Mat4, Vec2, Vec3};
use crate::error::Result;
use crate::math::{reflection_2d, reflection_3d};
use super::dimension::{Dim2, Dim3};
use super::object::ObjectMut;
use super::transformation::Transformation;

// ===== 2D =====

/// 2D transformation stored as a `Mat3`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatrixTransformation2D {
    transformation: Mat3,
}

impl MatrixTransformation2D {
    pub fn matrix(&self) -> Mat3 {
        self.transformation
    }
}

impl Transformation for MatrixTransformation2D {
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
        Ok(*matrix)
    }

    fn to_matrix(transformation: &Mat3) -> Mat3 {
        *transformation
    }

    fn compose(parent: &Mat3, child: &Mat3) -> Mat3 {
        *parent * *child
    }

    fn inverted(transformation: &Mat3) -> Mat3 {
        transformation.inverse()
    }
}

impl ObjectMut<'_, MatrixTransformation2D> {
    /// Replace the local transformation
    pub fn set_transformation(&mut self, transformation: Mat3) -> &mut Self {
        self.update_transformation(|strategy| strategy.transformation = transformation)
    }

    pub fn reset_transformation(&mut self) -> &mut Self {
        self.set_transformation(Mat3::IDENTITY)
    }

    /// Apply `transformation` after the current one
    pub fn transform(&mut self, transformation: Mat3) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation(transformation * current)
    }

    /// Apply `transformation` before the current one
    pub fn transform_local(&mut self, transformation: Mat3) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation(current * transformation)
    }

    pub fn translate(&mut self, vector: Vec2) -> &mut Self {
        self.transform(Mat3::from_translation(vector))
    }

    pub fn translate_local(&mut self, vector: Vec2) -> &mut Self {
        self.transform_local(Mat3::from_translation(vector))
    }

    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        self.transform(Mat3::from_angle(angle))
    }

    pub fn rotate_local(&mut self, angle: f32) -> &mut Self {
        self.transform_local(Mat3::from_angle(angle))
    }

    pub fn scale(&mut self, vector: Vec2) -> &mut Self {
        self.transform(Mat3::from_scale(vector))
    }

    pub fn scale_local(&mut self, vector: Vec2) -> &mut Self {
        self.transform_local(Mat3::from_scale(vector))
    }

    /// Reflect across the line with given normal, which must be normalized
    pub fn reflect(&mut self, normal: Vec2) -> &mut Self {
        self.transform(reflection_2d(normal))
    }

    pub fn reflect_local(&mut self, normal: Vec2) -> &mut Self {
        self.transform_local(reflection_2d(normal))
    }
}

// ===== 3D =====

/// 3D transformation stored as a `Mat4`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatrixTransformation3D {
    transformation: Mat4,
}

impl MatrixTransformation3D {
    pub fn matrix(&self) -> Mat4 {
        self.transformation
    }
}

impl Transformation for MatrixTransformation3D {
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
        Ok(*matrix)
    }

    fn to_matrix(transformation: &Mat4) -> Mat4 {
        *transformation
    }

    fn compose(parent: &Mat4, child: &Mat4) -> Mat4 {
        *parent * *child
    }

    fn inverted(transformation: &Mat4) -> Mat4 {
        transformation.inverse()
    }
}

impl ObjectMut<'_, MatrixTransformation3D> {
    /// Replace the local transformation
    pub fn set_transformation(&mut self, transformation: Mat4) -> &mut Self {
        self.update_transformation(|strategy| strategy.transformation = transformation)
    }

    pub fn reset_transformation(&mut self) -> &mut Self {
        self.set_transformation(Mat4::IDENTITY)
    }

    /// Apply `transformation` after the current one
    pub fn transform(&mut self, transformation: Mat4) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation(transformation * current)
    }

    /// Apply `transformation` before the current one
    pub fn transform_local(&mut self, transformation: Mat4) -> &mut Self {
        let current = self.strategy().transformation;
        self.set_transformation(current * transformation)
    }

    pub fn translate(&mut self, vector: Vec3) -> &mut Self {
        self.transform(Mat4::from_translation(vector))
    }

    pub fn translate_local(&mut self, vector: Vec3) -> &mut Self {
        self.transform_local(Mat4::from_translation(vector))
    }

    /// Rotate around a normalized axis
    pub fn rotate(&mut self, angle: f32, normalized_axis: Vec3) -> &mut Self {
        self.transform(Mat4::from_axis_angle(normalized_axis, angle))
    }

    pub fn rotate_local(&mut self, angle: f32, normalized_axis: Vec3) -> &mut Self {
        self.transform_local(Mat4::from_axis_angle(normalized_axis, angle))
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.transform(Mat4::from_rotation_x(angle))
    }

    pub fn rotate_x_local(&mut self, angle: f32) -> &mut Self {
        self.transform_local(Mat4::from_rotation_x(angle))
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.transform(Mat4::from_rotation_y(angle))
    }

    pub fn rotate_y_local(&mut self, angle: f32) -> &mut Self {
        self.transform_local(Mat4::from_rotation_y(angle))
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.transform(Mat4::from_rotation_z(angle))
    }

    pub fn rotate_z_local(&mut self, angle: f32) -> &mut Self {
        self.transform_local(Mat4::from_rotation_z(angle))
    }

    pub fn scale(&mut self, vector: Vec3) -> &mut Self {
        self.transform(Mat4::from_scale(vector))
    }

    pub fn scale_local(&mut self, vector: Vec3) -> &mut Self {
        self.transform_local(Mat4::from_scale(vector))
    }

    /// Reflect across the plane with given normal, which must be normalized
    pub fn reflect(&mut self, normal: Vec3) -> &mut Self {
        self.transform(reflection_3d(normal))
    }

    pub fn reflect_local(&mut self, normal: Vec3) -> &mut Self {
        self.transform_local(reflection_3d(normal))
    }
}

#[cfg(test)]
#[path = "matrix_transformation_tests.rs"]
mod tests;
