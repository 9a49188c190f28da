/// Features attached to scene graph objects.
///
/// A feature is a behaviour (drawable, camera, collider, ...) that wants to
/// know the absolute transformation of its object. It declares which cached
/// transformations it needs and receives them during the clean pass.

use std::any::Any;
use bitflags::bitflags;
use slotmap::new_key_type;
use super::dimension::Dimension;
use super::linked_list::{Linked, Links};
use super::object::ObjectKey;

new_key_type! {
    /// Stable key for a feature within a SceneGraph.
    ///
    /// Becomes invalid when the feature or its object is removed.
    pub struct FeatureKey;
}

bitflags! {
    /// Transformations a feature wants delivered when its object is cleaned
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CachedTransformations: u8 {
        /// Absolute transformation, passed to `clean()`
        const ABSOLUTE = 1 << 0;
        /// Inverted absolute transformation, passed to `clean_inverted()`
        const INVERTED_ABSOLUTE = 1 << 1;
    }
}

/// Feature hooks
///
/// All hooks default to no-ops. They run synchronously inside
/// `set_dirty()`/`set_clean()` and only receive matrices, the object tree
/// can't be reached from them.
///
/// # Example
///
/// ```no_run
/// use magnum_scene_graph::magnum::scene_graph::{AbstractFeature, Dim3};
/// use magnum_scene_graph::glam::Mat4;
///
/// struct Camera {
///     view: Mat4,
/// }
///
/// impl AbstractFeature<Dim3> for Camera {
///     fn clean_inverted(&mut self, inverted_absolute: &Mat4) {
///         self.view = *inverted_absolute;
///     }
/// }
/// ```
pub trait AbstractFeature<D: Dimension>: Any {
    /// Object (or an ancestor) became dirty
    ///
    /// Hook for features keeping data derived from the transformation
    /// outside of the cached matrices.
    fn mark_dirty(&mut self) {}

    /// New absolute transformation, called when `ABSOLUTE` is cached
    fn clean(&mut self, _absolute_transformation_matrix: &D::Matrix) {}

    /// New inverted absolute transformation, called when
    /// `INVERTED_ABSOLUTE` is cached
    fn clean_inverted(&mut self, _inverted_absolute_transformation_matrix: &D::Matrix) {}
}

/// Arena entry for one attached feature
pub(crate) struct FeatureSlot<D: Dimension> {
    /// Owning object
    pub(crate) object: ObjectKey,
    /// Position in the object's feature list
    pub(crate) links: Links<FeatureKey>,
    /// Transformations delivered on clean
    pub(crate) cached: CachedTransformations,
    pub(crate) feature: Box<dyn AbstractFeature<D>>,
}

impl<D: Dimension> Linked<FeatureKey> for FeatureSlot<D> {
    fn links(&self) -> &Links<FeatureKey> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<FeatureKey> {
        &mut self.links
    }
}

impl<D: Dimension> FeatureSlot<D> {
    /// Concrete feature, if it is of type `F`
    pub(crate) fn downcast_ref<F: AbstractFeature<D>>(&self) -> Option<&F> {
        let any: &dyn Any = &*self.feature;
        any.downcast_ref::<F>()
    }

    /// Concrete feature, if it is of type `F`
    pub(crate) fn downcast_mut<F: AbstractFeature<D>>(&mut self) -> Option<&mut F> {
        let any: &mut dyn Any = &mut *self.feature;
        any.downcast_mut::<F>()
    }
}
