/// Scene graph: object tree, transformation caching and features.

mod abstract_object;
mod dimension;
mod dual_complex_transformation;
mod dual_quaternion_transformation;
mod feature;
mod linked_list;
mod matrix_transformation;
mod object;
mod rigid_matrix_transformation;
mod transformation;
mod translation_rotation_scaling_transformation;

pub use abstract_object::AbstractObject;
pub use dimension::{Dim2, Dim3, Dimension};
pub use dual_complex_transformation::DualComplexTransformation;
pub use dual_quaternion_transformation::DualQuaternionTransformation;
pub use feature::{AbstractFeature, CachedTransformations, FeatureKey};
pub use matrix_transformation::{MatrixTransformation2D, MatrixTransformation3D};
pub use object::{ObjectKey, ObjectMut, ObjectRef, SceneGraph};
pub use rigid_matrix_transformation::{RigidMatrixTransformation2D, RigidMatrixTransformation3D};
pub use transformation::{MatrixOf, Transformation};
pub use translation_rotation_scaling_transformation::{
    TranslationRotationScalingTransformation2D,
    TranslationRotationScalingTransformation3D,
};
