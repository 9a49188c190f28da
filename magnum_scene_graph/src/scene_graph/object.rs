/// SceneGraph - arena of objects with cached absolute transformations.
///
/// Objects and features live in SlotMaps and refer to each other by key.
/// Parent/child and object/feature relations are index-based linked lists,
/// so reparenting, removal and reordering are O(1) apart from the cycle
/// check and subtree walks.
///
/// Every object starts dirty. `set_dirty()` propagates down the subtree,
/// `set_clean()` walks up to the nearest clean ancestor and recomputes the
/// absolute transformation down to the object, notifying features on the
/// way.

use bitflags::bitflags;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::{engine_bail, engine_err, engine_trace};
use super::abstract_object::AbstractObject;
use super::dimension::Dimension;
use super::feature::{AbstractFeature, CachedTransformations, FeatureKey, FeatureSlot};
use super::linked_list::{Linked, Links, ListHead};
use super::transformation::{MatrixOf, Transformation};

new_key_type! {
    /// Stable key for an object within a SceneGraph.
    ///
    /// Keys remain valid even after other objects are removed.
    /// A key becomes invalid only when its own object (or an ancestor) is removed.
    pub struct ObjectKey;
}

bitflags! {
    /// Per-object state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct ObjectFlags: u8 {
        /// Absolute transformation not yet delivered to features
        const DIRTY = 1 << 0;
        /// Scene root, always identity and never parented
        const SCENE = 1 << 1;
    }
}

/// Arena entry for one object
pub(crate) struct ObjectNode<T: Transformation> {
    pub(crate) parent: Option<ObjectKey>,
    pub(crate) children: ListHead<ObjectKey>,
    /// Position in the parent's children list
    pub(crate) siblings: Links<ObjectKey>,
    pub(crate) features: ListHead<FeatureKey>,
    pub(crate) flags: ObjectFlags,
    pub(crate) transformation: T,
}

impl<T: Transformation> ObjectNode<T> {
    fn new(flags: ObjectFlags) -> Self {
        Self {
            parent: None,
            children: ListHead::default(),
            siblings: Links::default(),
            features: ListHead::default(),
            flags,
            transformation: T::default(),
        }
    }

    fn is_dirty(&self) -> bool {
        self.flags.contains(ObjectFlags::DIRTY)
    }
}

impl<T: Transformation> Linked<ObjectKey> for ObjectNode<T> {
    fn links(&self) -> &Links<ObjectKey> {
        &self.siblings
    }

    fn links_mut(&mut self) -> &mut Links<ObjectKey> {
        &mut self.siblings
    }
}

/// Object tree with one transformation strategy
///
/// # Example
///
/// ```no_run
/// use magnum_scene_graph::magnum::scene_graph::{SceneGraph, RigidMatrixTransformation3D};
/// use magnum_scene_graph::glam::Vec3;
///
/// let mut graph = SceneGraph::<RigidMatrixTransformation3D>::new();
/// let scene = graph.add_scene();
/// let arm = graph.add_object(Some(scene))?;
/// let hand = graph.add_object(Some(arm))?;
///
/// graph.object_mut(arm)?.rotate_y(1.2);
/// graph.object_mut(hand)?.translate(Vec3::new(0.0, 0.0, 2.0));
/// graph.set_clean(hand)?;
/// # Ok::<(), magnum_scene_graph::magnum::Error>(())
/// ```
pub struct SceneGraph<T: Transformation> {
    objects: SlotMap<ObjectKey, ObjectNode<T>>,
    features: SlotMap<FeatureKey, FeatureSlot<T::Dim>>,
}

impl<T: Transformation> Default for SceneGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transformation> SceneGraph<T> {
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            features: SlotMap::with_key(),
        }
    }

    /// Graph with preallocated room for objects and features
    pub fn with_capacity(objects: usize, features: usize) -> Self {
        Self {
            objects: SlotMap::with_capacity_and_key(objects),
            features: SlotMap::with_capacity_and_key(features),
        }
    }

    // ===== OBJECT LIFECYCLE =====

    /// Create a scene root
    ///
    /// Scenes keep an identity transformation and can't be parented.
    pub fn add_scene(&mut self) -> ObjectKey {
        let key = self.objects.insert(ObjectNode::new(ObjectFlags::DIRTY | ObjectFlags::SCENE));
        engine_trace!("magnum::SceneGraph", "Created scene {:?}", key);
        key
    }

    /// Create a dirty object with identity transformation, appended as the
    /// last child of `parent`
    pub fn add_object(&mut self, parent: Option<ObjectKey>) -> Result<ObjectKey> {
        if let Some(parent) = parent {
            self.check_object(parent, "add_object")?;
        }

        let key = self.objects.insert(ObjectNode::new(ObjectFlags::DIRTY));
        if let Some(parent) = parent {
            self.link_child(parent, key, None);
        }
        engine_trace!("magnum::SceneGraph", "Created object {:?} under {:?}", key, parent);
        Ok(key)
    }

    /// Destroy an object, its whole subtree and every attached feature
    ///
    /// Returns the number of destroyed objects.
    pub fn remove_object(&mut self, key: ObjectKey) -> Result<usize> {
        self.check_object(key, "remove_object")?;
        self.unlink_from_parent(key);

        let mut removed = 0;
        let mut pending = vec![key];
        while let Some(current) = pending.pop() {
            let Some(node) = self.objects.remove(current) else {
                continue;
            };
            pending.extend(node.children.iter(&self.objects));

            let mut feature = node.features.first;
            while let Some(feature_key) = feature {
                feature = self.features.remove(feature_key).and_then(|slot| slot.links.next);
            }
            removed += 1;
        }

        engine_trace!("magnum::SceneGraph", "Removed object {:?} with {} objects in its subtree", key, removed);
        Ok(removed)
    }

    // ===== QUERIES =====

    pub fn contains(&self, key: ObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over all object keys, in no particular order
    pub fn object_keys(&self) -> impl Iterator<Item = ObjectKey> + '_ {
        self.objects.keys()
    }

    /// Read access to an object
    pub fn object(&self, key: ObjectKey) -> Result<ObjectRef<'_, T>> {
        self.check_object(key, "object")?;
        Ok(ObjectRef { graph: self, key })
    }

    /// Write access to an object, with the strategy's mutators
    pub fn object_mut(&mut self, key: ObjectKey) -> Result<ObjectMut<'_, T>> {
        self.check_object(key, "object_mut")?;
        Ok(ObjectMut { graph: self, key })
    }

    pub fn is_scene(&self, key: ObjectKey) -> Result<bool> {
        Ok(self.object(key)?.is_scene())
    }

    /// Scene the object belongs to, `None` for objects in a parentless tree
    pub fn scene(&self, key: ObjectKey) -> Result<Option<ObjectKey>> {
        self.check_object(key, "scene")?;
        Ok(self.scene_of(key))
    }

    pub fn parent(&self, key: ObjectKey) -> Result<Option<ObjectKey>> {
        Ok(self.object(key)?.parent())
    }

    /// Children in order
    pub fn children(&self, key: ObjectKey) -> Result<Vec<ObjectKey>> {
        Ok(self.object(key)?.children().collect())
    }

    pub fn is_dirty(&self, key: ObjectKey) -> Result<bool> {
        Ok(self.object(key)?.is_dirty())
    }

    // ===== TREE MUTATION =====

    /// Reparent an object, `None` detaching it into its own tree
    ///
    /// Returns `false` without changing anything when the parent is already
    /// set, when the object is a scene or when `parent` is the object itself
    /// or one of its descendants. On success the moved subtree is dirty.
    pub fn set_parent(&mut self, key: ObjectKey, parent: Option<ObjectKey>) -> Result<bool> {
        self.check_object(key, "set_parent")?;
        if let Some(parent) = parent {
            self.check_object(parent, "set_parent")?;
        }
        Ok(self.set_parent_internal(key, parent))
    }

    /// Reparent an object so its absolute transformation stays the same
    ///
    /// Fails with `DifferentScenes` when the object and the new parent are
    /// not in the same scene, and with the strategy's error when the new
    /// local transformation can't be stored. Nothing changes on failure.
    /// Returns `false` when the reparenting itself is
    /// rejected, see [`set_parent`](Self::set_parent).
    pub fn set_parent_keep_transformation(&mut self, key: ObjectKey, parent: ObjectKey) -> Result<bool> {
        self.check_object(key, "set_parent_keep_transformation")?;
        self.check_object(parent, "set_parent_keep_transformation")?;

        if self.scene_of(key) != self.scene_of(parent) {
            engine_bail!("magnum::SceneGraph", DifferentScenes,
                "set_parent_keep_transformation(): object {:?} and parent {:?} must be in the same scene",
                key, parent);
        }

        let transformation = T::compose(
            &T::inverted(&self.absolute_transformation_internal(parent)),
            &self.absolute_transformation_internal(key),
        );
        T::validate(&transformation)?;
        if !self.set_parent_internal(key, Some(parent)) {
            return Ok(false);
        }
        self.update_transformation(key, |strategy| strategy.store(transformation));
        Ok(true)
    }

    /// Reorder `child` among its siblings
    ///
    /// Places it before `before`, or last when `before` is `None`. The dirty
    /// state is untouched. Returns `false` when `child` is not a child of
    /// `parent` or `before` is not its sibling.
    pub fn move_child(&mut self, parent: ObjectKey, child: ObjectKey, before: Option<ObjectKey>) -> bool {
        let parent_of = |key: ObjectKey| self.objects.get(key).and_then(|node| node.parent);

        if !self.objects.contains_key(parent) || parent_of(child) != Some(parent) {
            return false;
        }
        if let Some(before) = before {
            if before == child {
                return true;
            }
            if parent_of(before) != Some(parent) {
                return false;
            }
        }

        let Some(mut children) = self.objects.get(parent).map(|node| node.children) else {
            return false;
        };
        children.cut(&mut self.objects, child);
        children.insert(&mut self.objects, child, before);
        if let Some(node) = self.objects.get_mut(parent) {
            node.children = children;
        }
        true
    }

    // ===== CACHING =====

    /// Mark the object and its subtree dirty
    pub fn set_dirty(&mut self, key: ObjectKey) -> Result<()> {
        self.check_object(key, "set_dirty")?;
        self.set_dirty_internal(key);
        Ok(())
    }

    /// Clean the object and all its dirty ancestors
    ///
    /// Children stay dirty.
    pub fn set_clean(&mut self, key: ObjectKey) -> Result<()> {
        self.check_object(key, "set_clean")?;
        self.set_clean_internal(key);
        Ok(())
    }

    /// Clean many objects at once, computing each shared ancestor only once
    ///
    /// Clean objects are skipped. All dirty objects must be part of the
    /// same scene, otherwise fails with `NotSameTree` and cleans nothing.
    pub fn set_clean_objects(&mut self, objects: &[ObjectKey]) -> Result<()> {
        for &object in objects {
            self.check_object(object, "set_clean_objects")?;
        }

        let mut list: Vec<ObjectKey> = objects
            .iter()
            .copied()
            .filter(|&object| self.objects.get(object).is_some_and(ObjectNode::is_dirty))
            .collect();
        if list.is_empty() {
            return Ok(());
        }

        // Dirty ancestors have to be cleaned too, each only once
        let mut visited: FxHashSet<ObjectKey> = list.iter().copied().collect();
        for i in 0..list.len() {
            let mut parent = self.objects.get(list[i]).and_then(|node| node.parent);
            while let Some(key) = parent {
                let Some(node) = self.objects.get(key) else {
                    break;
                };
                if !node.is_dirty() || !visited.insert(key) {
                    break;
                }
                list.push(key);
                parent = node.parent;
            }
        }

        let Some(scene) = self.scene_of(list[0]) else {
            engine_bail!("magnum::SceneGraph", NotSameTree,
                "set_clean_objects(): object {:?} is not part of any scene", list[0]);
        };
        let transformations = self.transformations(scene, &list, &T::identity())?;

        engine_trace!("magnum::SceneGraph", "Cleaning {} objects ({} requested)", list.len(), objects.len());
        for (&key, transformation) in list.iter().zip(&transformations) {
            if self.objects.get(key).is_some_and(ObjectNode::is_dirty) {
                self.clean_object(key, transformation);
            }
        }
        Ok(())
    }

    // ===== TRANSFORMATIONS =====

    /// Composition of all transformations from the root down to the object
    pub fn absolute_transformation(&self, key: ObjectKey) -> Result<T::DataType> {
        self.check_object(key, "absolute_transformation")?;
        Ok(self.absolute_transformation_internal(key))
    }

    pub fn absolute_transformation_matrix(&self, key: ObjectKey) -> Result<MatrixOf<T>> {
        Ok(T::to_matrix(&self.absolute_transformation(key)?))
    }

    /// Absolute transformations of many objects, each prefixed by
    /// `final_transformation`
    ///
    /// Objects listed or sitting where two paths to the root meet become
    /// joints. The transformation between a joint and the next joint up is
    /// computed once and shared by everything below it. Results are in
    /// input order, duplicates get identical results.
    ///
    /// Fails with `NotScene` when `scene` is not a scene root and with
    /// `NotSameTree` when an object is not part of it.
    pub fn transformations(
        &self,
        scene: ObjectKey,
        objects: &[ObjectKey],
        final_transformation: &T::DataType,
    ) -> Result<Vec<T::DataType>> {
        self.check_object(scene, "transformations")?;
        if !self.objects.get(scene).is_some_and(|node| node.flags.contains(ObjectFlags::SCENE)) {
            engine_bail!("magnum::SceneGraph", NotScene,
                "transformations(): object {:?} is not a scene", scene);
        }
        for &object in objects {
            self.check_object(object, "transformations")?;
        }

        // Listed objects are joints, duplicates map to the first occurrence
        let mut joints: Vec<ObjectKey> = objects.to_vec();
        let mut joint_index: FxHashMap<ObjectKey, usize> = FxHashMap::default();
        for (i, &object) in objects.iter().enumerate() {
            joint_index.entry(object).or_insert(i);
        }

        // Walk up from every object until the root, a joint or an already
        // walked path, which then becomes a joint as well
        let mut visited: FxHashSet<ObjectKey> = FxHashSet::default();
        for &object in objects {
            let mut current = object;
            while visited.insert(current) {
                match self.objects.get(current).and_then(|node| node.parent) {
                    None => {
                        if current != scene {
                            engine_bail!("magnum::SceneGraph", NotSameTree,
                                "transformations(): object {:?} is not part of scene {:?}", object, scene);
                        }
                    }
                    Some(parent) if joint_index.contains_key(&parent) => {}
                    Some(parent) if visited.contains(&parent) => {
                        joint_index.insert(parent, joints.len());
                        joints.push(parent);
                    }
                    Some(parent) => current = parent,
                }
            }
        }

        let mut relative: Vec<Option<(T::DataType, Option<usize>)>> = vec![None; joints.len()];
        let mut absolute: Vec<Option<T::DataType>> = vec![None; joints.len()];
        for joint in 0..joints.len() {
            if joint_index.get(&joints[joint]) != Some(&joint) {
                continue;
            }

            let mut pending = vec![joint];
            while let Some(&current) = pending.last() {
                if absolute[current].is_some() {
                    pending.pop();
                    continue;
                }

                let (local, parent_joint) = *relative[current]
                    .get_or_insert_with(|| self.joint_relative_transformation(joints[current], &joint_index));
                match parent_joint {
                    None => {
                        absolute[current] = Some(T::compose(final_transformation, &local));
                        pending.pop();
                    }
                    Some(parent_joint) => match absolute[parent_joint] {
                        Some(base) => {
                            absolute[current] = Some(T::compose(&base, &local));
                            pending.pop();
                        }
                        None => pending.push(parent_joint),
                    },
                }
            }
        }

        Ok(objects
            .iter()
            .map(|object| {
                joint_index
                    .get(object)
                    .and_then(|&joint| absolute[joint])
                    .unwrap_or_else(T::identity)
            })
            .collect())
    }

    /// Matrix form of [`transformations`](Self::transformations)
    pub fn transformation_matrices(
        &self,
        scene: ObjectKey,
        objects: &[ObjectKey],
        final_transformation_matrix: &MatrixOf<T>,
    ) -> Result<Vec<MatrixOf<T>>> {
        let final_transformation = T::from_matrix(final_transformation_matrix)?;
        Ok(self
            .transformations(scene, objects, &final_transformation)?
            .iter()
            .map(T::to_matrix)
            .collect())
    }

    // ===== FEATURES =====

    /// Attach a feature at the end of the object's feature list
    pub fn add_feature<F: AbstractFeature<T::Dim>>(
        &mut self,
        object: ObjectKey,
        feature: F,
        cached: CachedTransformations,
    ) -> Result<FeatureKey> {
        self.add_boxed_feature(object, Box::new(feature), cached)
    }

    /// Attach an already boxed feature
    pub fn add_boxed_feature(
        &mut self,
        object: ObjectKey,
        feature: Box<dyn AbstractFeature<T::Dim>>,
        cached: CachedTransformations,
    ) -> Result<FeatureKey> {
        self.check_object(object, "add_feature")?;

        let key = self.features.insert(FeatureSlot {
            object,
            links: Links::default(),
            cached,
            feature,
        });
        if let Some(node) = self.objects.get_mut(object) {
            node.features.push_back(&mut self.features, key);
        }
        Ok(key)
    }

    /// Detach a feature and hand it back
    pub fn remove_feature(&mut self, key: FeatureKey) -> Result<Box<dyn AbstractFeature<T::Dim>>> {
        let Some(object) = self.features.get(key).map(|slot| slot.object) else {
            engine_bail!("magnum::SceneGraph", InvalidObject,
                "remove_feature(): feature {:?} doesn't exist", key);
        };
        if let Some(node) = self.objects.get_mut(object) {
            node.features.cut(&mut self.features, key);
        }
        self.features
            .remove(key)
            .map(|slot| slot.feature)
            .ok_or_else(|| engine_err!("magnum::SceneGraph", InvalidObject,
                "remove_feature(): feature {:?} doesn't exist", key))
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Features attached to an object, in attachment order
    pub fn features(&self, object: ObjectKey) -> Result<Vec<FeatureKey>> {
        Ok(self.object(object)?.features().collect())
    }

    /// Concrete feature, `None` if the key is stale or the type differs
    pub fn feature<F: AbstractFeature<T::Dim>>(&self, key: FeatureKey) -> Option<&F> {
        self.features.get(key).and_then(FeatureSlot::downcast_ref)
    }

    pub fn feature_mut<F: AbstractFeature<T::Dim>>(&mut self, key: FeatureKey) -> Option<&mut F> {
        self.features.get_mut(key).and_then(FeatureSlot::downcast_mut)
    }

    /// Object a feature is attached to
    pub fn feature_object(&self, key: FeatureKey) -> Option<ObjectKey> {
        self.features.get(key).map(|slot| slot.object)
    }

    pub fn cached_transformations(&self, key: FeatureKey) -> Option<CachedTransformations> {
        self.features.get(key).map(|slot| slot.cached)
    }

    /// Change which transformations a feature receives on clean
    ///
    /// Takes effect on the next clean pass of its object.
    pub fn set_cached_transformations(&mut self, key: FeatureKey, cached: CachedTransformations) -> Result<()> {
        match self.features.get_mut(key) {
            Some(slot) => {
                slot.cached = cached;
                Ok(())
            }
            None => Err(engine_err!("magnum::SceneGraph", InvalidObject,
                "set_cached_transformations(): feature {:?} doesn't exist", key)),
        }
    }

    // ===== INTERNAL =====

    fn check_object(&self, key: ObjectKey, operation: &str) -> Result<()> {
        if !self.objects.contains_key(key) {
            engine_bail!("magnum::SceneGraph", InvalidObject,
                "{}(): object {:?} doesn't exist", operation, key);
        }
        Ok(())
    }

    fn local_transformation(&self, key: ObjectKey) -> T::DataType {
        self.objects
            .get(key)
            .map(|node| node.transformation.transformation())
            .unwrap_or_else(T::identity)
    }

    fn scene_of(&self, key: ObjectKey) -> Option<ObjectKey> {
        let mut current = key;
        while let Some(node) = self.objects.get(current) {
            match node.parent {
                Some(parent) => current = parent,
                None => return node.flags.contains(ObjectFlags::SCENE).then_some(current),
            }
        }
        None
    }

    fn absolute_transformation_internal(&self, key: ObjectKey) -> T::DataType {
        let mut chain = Vec::new();
        let mut current = Some(key);
        while let Some(object) = current {
            chain.push(object);
            current = self.objects.get(object).and_then(|node| node.parent);
        }

        chain.iter().rev().fold(T::identity(), |absolute, &object| {
            T::compose(&absolute, &self.local_transformation(object))
        })
    }

    /// Transformation from `key` up to the next joint (excluded) or the
    /// root (included), with the index of that joint
    fn joint_relative_transformation(
        &self,
        key: ObjectKey,
        joint_index: &FxHashMap<ObjectKey, usize>,
    ) -> (T::DataType, Option<usize>) {
        let mut transformation = self.local_transformation(key);
        let mut current = key;
        while let Some(parent) = self.objects.get(current).and_then(|node| node.parent) {
            if let Some(&joint) = joint_index.get(&parent) {
                return (transformation, Some(joint));
            }
            transformation = T::compose(&self.local_transformation(parent), &transformation);
            current = parent;
        }
        (transformation, None)
    }

    fn link_child(&mut self, parent: ObjectKey, child: ObjectKey, before: Option<ObjectKey>) {
        let Some(mut children) = self.objects.get(parent).map(|node| node.children) else {
            return;
        };
        children.insert(&mut self.objects, child, before);
        if let Some(node) = self.objects.get_mut(parent) {
            node.children = children;
        }
        if let Some(node) = self.objects.get_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn unlink_from_parent(&mut self, child: ObjectKey) {
        let Some(parent) = self.objects.get(child).and_then(|node| node.parent) else {
            return;
        };
        let Some(mut children) = self.objects.get(parent).map(|node| node.children) else {
            return;
        };
        children.cut(&mut self.objects, child);
        if let Some(node) = self.objects.get_mut(parent) {
            node.children = children;
        }
        if let Some(node) = self.objects.get_mut(child) {
            node.parent = None;
        }
    }

    pub(crate) fn set_parent_internal(&mut self, key: ObjectKey, parent: Option<ObjectKey>) -> bool {
        let Some(node) = self.objects.get(key) else {
            return false;
        };
        if node.parent == parent {
            return false;
        }
        if node.flags.contains(ObjectFlags::SCENE) {
            engine_trace!("magnum::SceneGraph", "Ignored set_parent() on scene {:?}", key);
            return false;
        }

        // The new parent can't be the object itself or one of its descendants
        let mut ancestor = parent;
        while let Some(current) = ancestor {
            if current == key {
                engine_trace!("magnum::SceneGraph",
                    "Ignored set_parent(): {:?} is {:?} or its descendant", parent, key);
                return false;
            }
            ancestor = self.objects.get(current).and_then(|node| node.parent);
        }

        self.unlink_from_parent(key);
        if let Some(parent) = parent {
            self.link_child(parent, key, None);
        }
        self.set_dirty_internal(key);
        true
    }

    /// Apply a strategy mutation and mark the object dirty
    ///
    /// Scenes keep their identity transformation, the mutation is dropped
    /// for them.
    pub(crate) fn update_transformation(&mut self, key: ObjectKey, update: impl FnOnce(&mut T)) {
        let Some(node) = self.objects.get_mut(key) else {
            return;
        };
        if node.flags.contains(ObjectFlags::SCENE) {
            return;
        }
        update(&mut node.transformation);
        self.set_dirty_internal(key);
    }

    pub(crate) fn set_dirty_internal(&mut self, key: ObjectKey) {
        let mut pending = vec![key];
        while let Some(current) = pending.pop() {
            let Some(node) = self.objects.get_mut(current) else {
                continue;
            };
            // Already dirty means the whole subtree is dirty
            if node.is_dirty() {
                continue;
            }
            node.flags.insert(ObjectFlags::DIRTY);

            let mut feature = node.features.first;
            let children = node.children;
            while let Some(feature_key) = feature {
                let Some(slot) = self.features.get_mut(feature_key) else {
                    break;
                };
                slot.feature.mark_dirty();
                feature = slot.links.next;
            }
            pending.extend(children.iter(&self.objects));
        }
    }

    pub(crate) fn set_clean_internal(&mut self, key: ObjectKey) {
        if !self.objects.get(key).is_some_and(ObjectNode::is_dirty) {
            return;
        }

        // Collect dirty ancestors, base is the nearest clean one
        let mut chain = vec![key];
        let mut absolute = T::identity();
        let mut parent = self.objects.get(key).and_then(|node| node.parent);
        while let Some(current) = parent {
            let Some(node) = self.objects.get(current) else {
                break;
            };
            if !node.is_dirty() {
                absolute = self.absolute_transformation_internal(current);
                break;
            }
            chain.push(current);
            parent = node.parent;
        }

        for &object in chain.iter().rev() {
            absolute = T::compose(&absolute, &self.local_transformation(object));
            self.clean_object(object, &absolute);
        }
    }

    /// Deliver the absolute transformation to the object's features and
    /// clear its dirty flag
    fn clean_object(&mut self, key: ObjectKey, absolute: &T::DataType) {
        let Some(node) = self.objects.get_mut(key) else {
            return;
        };
        node.flags.remove(ObjectFlags::DIRTY);

        let mut absolute_matrix = None;
        let mut inverted_matrix = None;
        let mut feature = node.features.first;
        while let Some(feature_key) = feature {
            let Some(slot) = self.features.get_mut(feature_key) else {
                break;
            };
            if slot.cached.contains(CachedTransformations::ABSOLUTE) {
                let matrix = *absolute_matrix.get_or_insert_with(|| T::to_matrix(absolute));
                slot.feature.clean(&matrix);
            }
            if slot.cached.contains(CachedTransformations::INVERTED_ABSOLUTE) {
                let inverted = *inverted_matrix.get_or_insert_with(|| T::to_matrix(&T::inverted(absolute)));
                slot.feature.clean_inverted(&inverted);
            }
            feature = slot.links.next;
        }
    }
}

// ===== OBJECT HANDLES =====

/// Read-only view of one object
///
/// Holds a shared borrow of the graph, so the key is valid for the whole
/// lifetime of the handle.
pub struct ObjectRef<'a, T: Transformation> {
    graph: &'a SceneGraph<T>,
    key: ObjectKey,
}

impl<T: Transformation> Clone for ObjectRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Transformation> Copy for ObjectRef<'_, T> {}

impl<'a, T: Transformation> ObjectRef<'a, T> {
    fn node(&self) -> &'a ObjectNode<T> {
        &self.graph.objects[self.key]
    }

    pub fn key(&self) -> ObjectKey {
        self.key
    }

    pub fn is_scene(&self) -> bool {
        self.node().flags.contains(ObjectFlags::SCENE)
    }

    /// Scene root of the tree, `None` when the root is not a scene
    pub fn scene(&self) -> Option<ObjectKey> {
        self.graph.scene_of(self.key)
    }

    pub fn parent(&self) -> Option<ObjectKey> {
        self.node().parent
    }

    pub fn has_children(&self) -> bool {
        !self.node().children.is_empty()
    }

    /// Children in order
    pub fn children(&self) -> impl Iterator<Item = ObjectKey> + 'a {
        self.node().children.iter(&self.graph.objects)
    }

    pub fn first_child(&self) -> Option<ObjectKey> {
        self.node().children.first
    }

    pub fn last_child(&self) -> Option<ObjectKey> {
        self.node().children.last
    }

    pub fn previous_sibling(&self) -> Option<ObjectKey> {
        self.node().siblings.previous
    }

    pub fn next_sibling(&self) -> Option<ObjectKey> {
        self.node().siblings.next
    }

    /// Attached features in attachment order
    pub fn features(&self) -> impl Iterator<Item = FeatureKey> + 'a {
        self.node().features.iter(&self.graph.features)
    }

    pub fn is_dirty(&self) -> bool {
        self.node().is_dirty()
    }

    /// Strategy state, for representation-specific getters
    pub fn strategy(&self) -> &'a T {
        &self.node().transformation
    }

    /// Local transformation
    pub fn transformation(&self) -> T::DataType {
        self.node().transformation.transformation()
    }

    pub fn transformation_matrix(&self) -> MatrixOf<T> {
        T::to_matrix(&self.transformation())
    }

    pub fn absolute_transformation(&self) -> T::DataType {
        self.graph.absolute_transformation_internal(self.key)
    }

    pub fn absolute_transformation_matrix(&self) -> MatrixOf<T> {
        T::to_matrix(&self.absolute_transformation())
    }
}

/// Mutable handle to one object
///
/// Strategy-specific mutators (`translate()`, `rotate()`, ...) are
/// implemented on `ObjectMut<'_, Strategy>` next to each strategy. Mutators
/// chain; the checked ones return `Result<&mut Self>`.
pub struct ObjectMut<'a, T: Transformation> {
    graph: &'a mut SceneGraph<T>,
    key: ObjectKey,
}

impl<T: Transformation> ObjectMut<'_, T> {
    pub fn key(&self) -> ObjectKey {
        self.key
    }

    /// Read-only view of the same object
    pub fn to_ref(&self) -> ObjectRef<'_, T> {
        ObjectRef { graph: &*self.graph, key: self.key }
    }

    /// Local transformation
    pub fn transformation(&self) -> T::DataType {
        self.to_ref().transformation()
    }

    pub fn is_scene(&self) -> bool {
        self.to_ref().is_scene()
    }

    /// Reparent, see [`SceneGraph::set_parent`]
    ///
    /// Rejected or stale parents leave the object untouched.
    pub fn set_parent(&mut self, parent: Option<ObjectKey>) -> &mut Self {
        if parent.is_none_or(|parent| self.graph.contains(parent)) {
            self.graph.set_parent_internal(self.key, parent);
        }
        self
    }

    /// Reparent keeping the absolute transformation, see
    /// [`SceneGraph::set_parent_keep_transformation`]
    pub fn set_parent_keep_transformation(&mut self, parent: ObjectKey) -> Result<&mut Self> {
        self.graph.set_parent_keep_transformation(self.key, parent)?;
        Ok(self)
    }

    pub fn set_dirty(&mut self) -> &mut Self {
        self.graph.set_dirty_internal(self.key);
        self
    }

    pub fn set_clean(&mut self) -> &mut Self {
        self.graph.set_clean_internal(self.key);
        self
    }

    /// Attach a feature, see [`SceneGraph::add_feature`]
    pub fn add_feature<F: AbstractFeature<T::Dim>>(&mut self, feature: F, cached: CachedTransformations) -> Result<FeatureKey> {
        self.graph.add_feature(self.key, feature, cached)
    }

    /// Strategy state, for representation-specific getters
    pub(crate) fn strategy(&self) -> &T {
        self.to_ref().strategy()
    }

    /// Apply a strategy mutation unless the object is a scene, then mark it
    /// dirty
    pub(crate) fn update_transformation(&mut self, update: impl FnOnce(&mut T)) -> &mut Self {
        self.graph.update_transformation(self.key, update);
        self
    }
}

impl<T: Transformation> AbstractObject<T::Dim> for ObjectMut<'_, T> {
    fn key(&self) -> ObjectKey {
        self.key
    }

    fn scene(&self) -> Option<ObjectKey> {
        self.to_ref().scene()
    }

    fn parent(&self) -> Option<ObjectKey> {
        self.to_ref().parent()
    }

    fn transformation_matrix(&self) -> <T::Dim as Dimension>::Matrix {
        self.to_ref().transformation_matrix()
    }

    fn absolute_transformation_matrix(&self) -> <T::Dim as Dimension>::Matrix {
        self.to_ref().absolute_transformation_matrix()
    }

    fn transformation_matrices(
        &self,
        objects: &[ObjectKey],
        final_transformation_matrix: &<T::Dim as Dimension>::Matrix,
    ) -> Result<Vec<<T::Dim as Dimension>::Matrix>> {
        self.graph.transformation_matrices(self.key, objects, final_transformation_matrix)
    }

    fn is_dirty(&self) -> bool {
        self.to_ref().is_dirty()
    }

    fn set_dirty(&mut self) {
        ObjectMut::set_dirty(self);
    }

    fn set_clean(&mut self) {
        ObjectMut::set_clean(self);
    }

    fn set_clean_objects(&mut self, objects: &[ObjectKey]) -> Result<()> {
        self.graph.set_clean_objects(objects)
    }
}

#[cfg(test)]
#[path = "object_tests.rs"]
mod tests;
