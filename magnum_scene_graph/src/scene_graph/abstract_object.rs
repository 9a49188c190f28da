/// Dimension-polymorphic object interface.

use crate::error::Result;
use super::dimension::Dimension;
use super::object::ObjectKey;

/// Object surface that doesn't depend on the transformation strategy
///
/// Code working with matrices only (draw loops, batch cleaning, camera
/// setup) takes `&mut dyn AbstractObject<Dim3>` and accepts objects of any
/// 3D strategy.
///
/// # Example
///
/// ```no_run
/// use magnum_scene_graph::magnum::scene_graph::{AbstractObject, Dim3};
/// use magnum_scene_graph::glam::Mat4;
///
/// fn camera_matrix(camera: &mut dyn AbstractObject<Dim3>) -> Mat4 {
///     camera.set_clean();
///     camera.absolute_transformation_matrix().inverse()
/// }
/// ```
pub trait AbstractObject<D: Dimension> {
    fn key(&self) -> ObjectKey;

    /// Scene root, `None` if the tree isn't rooted in a scene
    fn scene(&self) -> Option<ObjectKey>;

    fn parent(&self) -> Option<ObjectKey>;

    /// Local transformation as a matrix
    fn transformation_matrix(&self) -> D::Matrix;

    /// Transformation relative to the root as a matrix
    fn absolute_transformation_matrix(&self) -> D::Matrix;

    /// Absolute transformations of many objects, with this object as the
    /// scene
    fn transformation_matrices(&self, objects: &[ObjectKey], final_transformation_matrix: &D::Matrix) -> Result<Vec<D::Matrix>>;

    fn is_dirty(&self) -> bool;

    /// Mark this object and its subtree dirty
    fn set_dirty(&mut self);

    /// Clean this object and its dirty ancestors
    fn set_clean(&mut self);

    /// Clean many objects of the same graph at once
    fn set_clean_objects(&mut self, objects: &[ObjectKey]) -> Result<()>;
}
