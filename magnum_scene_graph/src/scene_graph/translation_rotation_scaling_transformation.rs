/// Translation/rotation/scaling strategies.
///
/// Translation, rotation and scaling are stored separately and combined
/// into `T·R·S` on demand: scaling applies first, then rotation, then
/// translation, whatever order the mutators were called in. The scene
/// graph sees the combined matrix.

use glam::{Mat2, Mat3, Mat4, Quat, Vec2, Vec3};
use crate::engine_bail;
use crate::error::Result;
use crate::math::{fuzzy_zero, Complex};
use super::dimension::{Dim2, Dim3};
use super::object::ObjectMut;
use super::transformation::Transformation;

// ===== 2D =====

/// 2D transformation stored as translation, rotation and scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationRotationScalingTransformation2D {
    translation: Vec2,
    rotation: Complex,
    scaling: Vec2,
}

impl Default for TranslationRotationScalingTransformation2D {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            rotation: Complex::IDENTITY,
            scaling: Vec2::ONE,
        }
    }
}

impl TranslationRotationScalingTransformation2D {
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn rotation(&self) -> Complex {
        self.rotation
    }

    pub fn scaling(&self) -> Vec2 {
        self.scaling
    }

    /// Expects every basis axis to have a non-zero length
    fn decompose(matrix: &Mat3) -> Self {
        let x = matrix.x_axis.truncate();
        let y = matrix.y_axis.truncate();
        let scaling = Vec2::new(x.length(), y.length());
        let rotation = Mat2::from_cols(x / scaling.x, y / scaling.y);
        Self {
            translation: matrix.z_axis.truncate(),
            rotation: Complex::from_matrix(&rotation),
            scaling,
        }
    }
}

impl Transformation for TranslationRotationScalingTransformation2D {
    type Dim = Dim2;
    type DataType = Mat3;

    fn transformation(&self) -> Mat3 {
        let rotation = self.rotation.to_matrix();
        Mat3::from_cols(
            (rotation.x_axis * self.scaling.x).extend(0.0),
            (rotation.y_axis * self.scaling.y).extend(0.0),
            self.translation.extend(1.0),
        )
    }

    fn store(&mut self, transformation: Mat3) {
        *self = Self::decompose(&transformation);
    }

    fn validate(transformation: &Mat3) -> Result<()> {
        let axes = [transformation.x_axis.truncate(), transformation.y_axis.truncate()];
        if axes.iter().any(|axis| fuzzy_zero(axis.length())) {
            engine_bail!("magnum::SceneGraph", DegenerateTransformation,
                "TranslationRotationScalingTransformation2D: can't decompose {:?}, a basis axis has zero length",
                transformation);
        }
        Ok(())
    }

    fn identity() -> Mat3 {
        Mat3::IDENTITY
    }

    fn from_matrix(matrix: &Mat3) -> Result<Mat3> {
        Self::validate(matrix)?;
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

impl ObjectMut<'_, TranslationRotationScalingTransformation2D> {
    /// Replace the whole transformation, decomposed into its parts
    ///
    /// Shear is lost in the decomposition. Fails with
    /// `DegenerateTransformation` when a basis axis has zero length, the
    /// object is left unchanged then.
    pub fn set_transformation(&mut self, transformation: Mat3) -> Result<&mut Self> {
        let transformation = TranslationRotationScalingTransformation2D::from_matrix(&transformation)?;
        Ok(self.update_transformation(|strategy| strategy.store(transformation)))
    }

    pub fn reset_transformation(&mut self) -> &mut Self {
        self.update_transformation(|strategy| *strategy = Default::default())
    }

    pub fn set_translation(&mut self, translation: Vec2) -> &mut Self {
        self.update_transformation(|strategy| strategy.translation = translation)
    }

    /// Set the rotation, which is expected to be normalized
    pub fn set_rotation(&mut self, rotation: Complex) -> &mut Self {
        self.update_transformation(|strategy| strategy.rotation = rotation)
    }

    pub fn set_scaling(&mut self, scaling: Vec2) -> &mut Self {
        self.update_transformation(|strategy| strategy.scaling = scaling)
    }

    pub fn translate(&mut self, vector: Vec2) -> &mut Self {
        let translation = vector + self.strategy().translation;
        self.set_translation(translation)
    }

    /// Same as [`translate`](Self::translate), translation is always applied
    /// last
    pub fn translate_local(&mut self, vector: Vec2) -> &mut Self {
        let translation = self.strategy().translation + vector;
        self.set_translation(translation)
    }

    /// Rotate after the current rotation
    pub fn rotate(&mut self, rotation: Complex) -> &mut Self {
        let rotation = rotation * self.strategy().rotation;
        self.set_rotation(rotation)
    }

    /// Rotate before the current rotation
    pub fn rotate_local(&mut self, rotation: Complex) -> &mut Self {
        let rotation = self.strategy().rotation * rotation;
        self.set_rotation(rotation)
    }

    pub fn rotate_angle(&mut self, angle: f32) -> &mut Self {
        self.rotate(Complex::rotation(angle))
    }

    pub fn rotate_angle_local(&mut self, angle: f32) -> &mut Self {
        self.rotate_local(Complex::rotation(angle))
    }

    /// Multiply the scaling component-wise
    pub fn scale(&mut self, vector: Vec2) -> &mut Self {
        let scaling = vector * self.strategy().scaling;
        self.set_scaling(scaling)
    }

    pub fn scale_local(&mut self, vector: Vec2) -> &mut Self {
        let scaling = self.strategy().scaling * vector;
        self.set_scaling(scaling)
    }
}

// ===== 3D =====

/// 3D transformation stored as translation, rotation and scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationRotationScalingTransformation3D {
    translation: Vec3,
    rotation: Quat,
    scaling: Vec3,
}

impl Default for TranslationRotationScalingTransformation3D {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scaling: Vec3::ONE,
        }
    }
}

impl TranslationRotationScalingTransformation3D {
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scaling(&self) -> Vec3 {
        self.scaling
    }
}

impl Transformation for TranslationRotationScalingTransformation3D {
    type Dim = Dim3;
    type DataType = Mat4;

    fn transformation(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scaling, self.rotation, self.translation)
    }

    fn store(&mut self, transformation: Mat4) {
        let (scaling, rotation, translation) = transformation.to_scale_rotation_translation();
        *self = Self { translation, rotation, scaling };
    }

    fn validate(transformation: &Mat4) -> Result<()> {
        let axes = [
            transformation.x_axis.truncate(),
            transformation.y_axis.truncate(),
            transformation.z_axis.truncate(),
        ];
        if axes.iter().any(|axis| fuzzy_zero(axis.length())) {
            engine_bail!("magnum::SceneGraph", DegenerateTransformation,
                "TranslationRotationScalingTransformation3D: can't decompose {:?}, a basis axis has zero length",
                transformation);
        }
        Ok(())
    }

    fn identity() -> Mat4 {
        Mat4::IDENTITY
    }

    fn from_matrix(matrix: &Mat4) -> Result<Mat4> {
        Self::validate(matrix)?;
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

impl ObjectMut<'_, TranslationRotationScalingTransformation3D> {
    /// Replace the whole transformation, decomposed into its parts
    ///
    /// Shear is lost in the decomposition. Fails with
    /// `DegenerateTransformation` when a basis axis has zero length, the
    /// object is left unchanged then.
    pub fn set_transformation(&mut self, transformation: Mat4) -> Result<&mut Self> {
        let transformation = TranslationRotationScalingTransformation3D::from_matrix(&transformation)?;
        Ok(self.update_transformation(|strategy| strategy.store(transformation)))
    }

    pub fn reset_transformation(&mut self) -> &mut Self {
        self.update_transformation(|strategy| *strategy = Default::default())
    }

    pub fn set_translation(&mut self, translation: Vec3) -> &mut Self {
        self.update_transformation(|strategy| strategy.translation = translation)
    }

    /// Set the rotation, which is expected to be normalized
    pub fn set_rotation(&mut self, rotation: Quat) -> &mut Self {
        self.update_transformation(|strategy| strategy.rotation = rotation)
    }

    pub fn set_scaling(&mut self, scaling: Vec3) -> &mut Self {
        self.update_transformation(|strategy| strategy.scaling = scaling)
    }

    pub fn translate(&mut self, vector: Vec3) -> &mut Self {
        let translation = vector + self.strategy().translation;
        self.set_translation(translation)
    }

    /// Same as [`translate`](Self::translate), translation is always applied
    /// last
    pub fn translate_local(&mut self, vector: Vec3) -> &mut Self {
        let translation = self.strategy().translation + vector;
        self.set_translation(translation)
    }

    /// Rotate after the current rotation
    pub fn rotate(&mut self, rotation: Quat) -> &mut Self {
        let rotation = rotation * self.strategy().rotation;
        self.set_rotation(rotation)
    }

    /// Rotate before the current rotation
    pub fn rotate_local(&mut self, rotation: Quat) -> &mut Self {
        let rotation = self.strategy().rotation * rotation;
        self.set_rotation(rotation)
    }

    /// Rotate around a normalized axis
    pub fn rotate_axis_angle(&mut self, angle: f32, normalized_axis: Vec3) -> &mut Self {
        self.rotate(Quat::from_axis_angle(normalized_axis, angle))
    }

    pub fn rotate_axis_angle_local(&mut self, angle: f32, normalized_axis: Vec3) -> &mut Self {
        self.rotate_local(Quat::from_axis_angle(normalized_axis, angle))
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotate(Quat::from_rotation_x(angle))
    }

    pub fn rotate_x_local(&mut self, angle: f32) -> &mut Self {
        self.rotate_local(Quat::from_rotation_x(angle))
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotate(Quat::from_rotation_y(angle))
    }

    pub fn rotate_y_local(&mut self, angle: f32) -> &mut Self {
        self.rotate_local(Quat::from_rotation_y(angle))
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotate(Quat::from_rotation_z(angle))
    }

    pub fn rotate_z_local(&mut self, angle: f32) -> &mut Self {
        self.rotate_local(Quat::from_rotation_z(angle))
    }

    /// Multiply the scaling component-wise
    pub fn scale(&mut self, vector: Vec3) -> &mut Self {
        let scaling = vector * self.strategy().scaling;
        self.set_scaling(scaling)
    }

    pub fn scale_local(&mut self, vector: Vec3) -> &mut Self {
        let scaling = self.strategy().scaling * vector;
        self.set_scaling(scaling)
    }
}

#[cfg(test)]
#[path = "translation_rotation_scaling_transformation_tests.rs"]
mod tests;
