//! Integration tests for the scene graph
//!
//! These tests drive a small hierarchy through the public API only: build,
//! animate, reparent, and clean, with features observing the results.
//!
//! Run with: cargo test --test scene_graph_integration_tests

use magnum_scene_graph::glam::{Mat4, Vec3};
use magnum_scene_graph::magnum::scene_graph::{
    AbstractFeature, CachedTransformations, Dim3, DualQuaternionTransformation,
    MatrixTransformation3D, SceneGraph,
};
use std::f32::consts::FRAC_PI_2;

fn assert_mat4_eq(actual: Mat4, expected: Mat4) {
    assert!(actual.abs_diff_eq(expected, 1.0e-5), "{:?} != {:?}", actual, expected);
}

/// Feature counting how often it was cleaned, remembering the last matrix
#[derive(Default)]
struct Tracker {
    cleaned: usize,
    absolute: Mat4,
}

impl AbstractFeature<Dim3> for Tracker {
    fn clean(&mut self, absolute_transformation_matrix: &Mat4) {
        self.cleaned += 1;
        self.absolute = *absolute_transformation_matrix;
    }
}

// ============================================================================
// HIERARCHY LIFECYCLE
// ============================================================================

#[test]
fn test_integration_robot_arm() {
    let mut graph = SceneGraph::<MatrixTransformation3D>::new();
    let scene = graph.add_scene();
    let shoulder = graph.add_object(Some(scene)).unwrap();
    let elbow = graph.add_object(Some(shoulder)).unwrap();
    let hand = graph.add_object(Some(elbow)).unwrap();

    graph.object_mut(shoulder).unwrap().rotate_z(FRAC_PI_2);
    graph.object_mut(elbow).unwrap().translate(Vec3::X);
    graph.object_mut(hand).unwrap().translate(Vec3::X);

    let tracker = graph.add_feature(hand, Tracker::default(), CachedTransformations::ABSOLUTE).unwrap();

    graph.set_clean(hand).unwrap();
    let expected = Mat4::from_rotation_z(FRAC_PI_2) * Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0));
    {
        let tracker = graph.feature::<Tracker>(tracker).unwrap();
        assert_eq!(tracker.cleaned, 1);
        assert_mat4_eq(tracker.absolute, expected);
    }
    assert!(!graph.is_dirty(shoulder).unwrap());

    // Cleaning again is a no-op until something moves
    graph.set_clean(hand).unwrap();
    assert_eq!(graph.feature::<Tracker>(tracker).unwrap().cleaned, 1);

    graph.object_mut(shoulder).unwrap().rotate_z(-FRAC_PI_2);
    assert!(graph.is_dirty(hand).unwrap());
    graph.set_clean_objects(&[hand, elbow]).unwrap();
    {
        let tracker = graph.feature::<Tracker>(tracker).unwrap();
        assert_eq!(tracker.cleaned, 2);
        assert_mat4_eq(tracker.absolute, Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));
    }

    // Detaching the elbow takes the hand with it
    assert_eq!(graph.remove_object(elbow).unwrap(), 2);
    assert!(!graph.contains(hand));
    assert_eq!(graph.feature_count(), 0);
    assert!(graph.children(shoulder).unwrap().is_empty());
}

#[test]
fn test_integration_reparent_between_branches() {
    let mut graph = SceneGraph::<DualQuaternionTransformation>::new();
    let scene = graph.add_scene();
    let left = graph.add_object(Some(scene)).unwrap();
    let right = graph.add_object(Some(scene)).unwrap();
    let item = graph.add_object(Some(left)).unwrap();

    graph.object_mut(left).unwrap().translate(Vec3::new(-5.0, 0.0, 0.0));
    graph.object_mut(right).unwrap().rotate_y(FRAC_PI_2).translate(Vec3::new(5.0, 0.0, 0.0));
    graph.object_mut(item).unwrap().translate(Vec3::Y);

    let world = graph.absolute_transformation_matrix(item).unwrap();
    assert!(graph.set_parent_keep_transformation(item, right).unwrap());
    assert_eq!(graph.parent(item).unwrap(), Some(right));
    assert_mat4_eq(graph.absolute_transformation_matrix(item).unwrap(), world);

    let batch = graph
        .transformation_matrices(scene, &[item, left, right], &Mat4::IDENTITY)
        .unwrap();
    assert_mat4_eq(batch[0], world);
    assert_mat4_eq(batch[1], Mat4::from_translation(Vec3::new(-5.0, 0.0, 0.0)));
    assert_mat4_eq(
        batch[2],
        Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)) * Mat4::from_rotation_y(FRAC_PI_2),
    );
}

#[test]
fn test_integration_two_scenes_are_independent() {
    let mut graph = SceneGraph::<MatrixTransformation3D>::new();
    let first = graph.add_scene();
    let second = graph.add_scene();
    let a = graph.add_object(Some(first)).unwrap();
    let b = graph.add_object(Some(second)).unwrap();

    assert_eq!(graph.scene(a).unwrap(), Some(first));
    assert_eq!(graph.scene(b).unwrap(), Some(second));
    assert!(graph.set_parent_keep_transformation(a, b).is_err());
    assert!(graph.transformations(first, &[b], &Mat4::IDENTITY).is_err());

    // Plain reparent across scenes is allowed
    assert!(graph.set_parent(a, Some(b)).unwrap());
    assert_eq!(graph.scene(a).unwrap(), Some(second));
}
