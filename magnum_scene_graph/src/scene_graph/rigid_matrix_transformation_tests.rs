use glam::{Mat3, Mat4, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;
use crate::error::Error;
use crate::scene_graph::SceneGraph;
use super::*;

fn assert_mat3_eq(actual: Mat3, expected: Mat3) {
    assert!(actual.abs_diff_eq(expected, 1.0e-5), "{:?} != {:?}", actual, expected);
}

fn assert_mat4_eq(actual: Mat4, expected: Mat4) {
    assert!(actual.abs_diff_eq(expected, 1.0e-5), "{:?} != {:?}", actual, expected);
}

// ============================================================================
// 2D
// ============================================================================

#[test]
fn test_2d_rejects_scaling() {
    let mut graph = SceneGraph::<RigidMatrixTransformation2D>::new();
    let o = graph.add_object(None).unwrap();
    graph.object_mut(o).unwrap().translate(Vec2::X);

    let scaling = Mat3::from_scale(Vec2::splat(2.0));
    assert!(matches!(
        graph.object_mut(o).unwrap().set_transformation(scaling),
        Err(Error::NotRigidTransformation(_))
    ));
    assert!(matches!(
        graph.object_mut(o).unwrap().transform(scaling),
        Err(Error::NotRigidTransformation(_))
    ));
    assert!(matches!(
        graph.object_mut(o).unwrap().transform_local(scaling),
        Err(Error::NotRigidTransformation(_))
    ));

    assert_eq!(graph.object(o).unwrap().transformation(), Mat3::from_translation(Vec2::X));
}

#[test]
fn test_2d_transform_order() {
    let mut graph = SceneGraph::<RigidMatrixTransformation2D>::new();
    let o = graph.add_object(None).unwrap();

    graph.object_mut(o).unwrap()
        .translate(Vec2::X)
        .transform(Mat3::from_angle(FRAC_PI_2))
        .unwrap()
        .translate_local(Vec2::Y)
        .reflect_local(Vec2::X);
    assert_mat3_eq(
        graph.object(o).unwrap().strategy().matrix(),
        Mat3::from_angle(FRAC_PI_2)
            * Mat3::from_translation(Vec2::X)
            * Mat3::from_translation(Vec2::Y)
            * Mat3::from_scale(Vec2::new(-1.0, 1.0)),
    );
}

#[test]
fn test_2d_rigid_inverse() {
    let m = Mat3::from_translation(Vec2::new(3.0, -1.0)) * Mat3::from_angle(0.4);
    let inverted = RigidMatrixTransformation2D::inverted(&m);
    assert_mat3_eq(RigidMatrixTransformation2D::compose(&m, &inverted), Mat3::IDENTITY);
    assert_mat3_eq(inverted, m.inverse());
}

#[test]
fn test_2d_normalize_rotation() {
    let mut graph = SceneGraph::<RigidMatrixTransformation2D>::new();
    let o = graph.add_object(None).unwrap();
    for _ in 0..1000 {
        graph.object_mut(o).unwrap().rotate(0.001).rotate_local(0.002).translate(Vec2::X * 0.01);
    }

    let before = graph.object(o).unwrap().transformation();
    graph.object_mut(o).unwrap().normalize_rotation();
    let after = graph.object(o).unwrap().transformation();

    assert!((after.x_axis.truncate().length() - 1.0).abs() < 1.0e-6);
    assert!((after.y_axis.truncate().length() - 1.0).abs() < 1.0e-6);
    assert!(after.x_axis.truncate().dot(after.y_axis.truncate()).abs() < 1.0e-6);
    assert_eq!(after.z_axis, before.z_axis);
}

// ============================================================================
// 3D
// ============================================================================

#[test]
fn test_3d_rejects_scaling() {
    let mut graph = SceneGraph::<RigidMatrixTransformation3D>::new();
    let o = graph.add_object(None).unwrap();
    graph.object_mut(o).unwrap().rotate_x(0.5);
    let before = graph.object(o).unwrap().transformation();

    let scaling = Mat4::from_scale(Vec3::new(1.0, 2.0, 1.0));
    assert!(matches!(
        graph.object_mut(o).unwrap().set_transformation(scaling),
        Err(Error::NotRigidTransformation(_))
    ));
    assert!(matches!(
        graph.object_mut(o).unwrap().transform(scaling),
        Err(Error::NotRigidTransformation(_))
    ));
    assert!(matches!(
        RigidMatrixTransformation3D::from_matrix(&scaling),
        Err(Error::NotRigidTransformation(_))
    ));

    assert_eq!(graph.object(o).unwrap().transformation(), before);
}

#[test]
fn test_3d_accepts_reflection() {
    let mut graph = SceneGraph::<RigidMatrixTransformation3D>::new();
    let o = graph.add_object(None).unwrap();

    let reflection = Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0)) * Mat4::from_translation(Vec3::Z);
    graph.object_mut(o).unwrap().set_transformation(reflection).unwrap();
    assert_eq!(graph.object(o).unwrap().transformation(), reflection);
}

#[test]
fn test_3d_convenience_mutators() {
    let mut graph = SceneGraph::<RigidMatrixTransformation3D>::new();
    let o = graph.add_object(None).unwrap();

    graph.object_mut(o).unwrap()
        .rotate_z(FRAC_PI_2)
        .translate(Vec3::Y)
        .rotate_local(FRAC_PI_2, Vec3::X)
        .reflect(Vec3::Z);
    assert_mat4_eq(
        graph.object(o).unwrap().transformation(),
        Mat4::from_scale(Vec3::new(1.0, 1.0, -1.0))
            * Mat4::from_translation(Vec3::Y)
            * Mat4::from_rotation_z(FRAC_PI_2)
            * Mat4::from_rotation_x(FRAC_PI_2),
    );
    assert!(graph.object(o).unwrap().transformation().is_rigid_transformation());
}

#[test]
fn test_3d_rigid_inverse() {
    let m = Mat4::from_rotation_translation(
        glam::Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0).normalize(), 0.8),
        Vec3::new(-1.0, 4.0, 2.0),
    );
    let inverted = RigidMatrixTransformation3D::inverted(&m);
    assert_mat4_eq(RigidMatrixTransformation3D::compose(&m, &inverted), Mat4::IDENTITY);
}

#[test]
fn test_3d_normalize_rotation() {
    let mut graph = SceneGraph::<RigidMatrixTransformation3D>::new();
    let o = graph.add_object(None).unwrap();
    for _ in 0..1000 {
        graph.object_mut(o).unwrap().rotate_x(0.001).rotate_y_local(0.002).translate(Vec3::Z * 0.01);
    }

    let before = graph.object(o).unwrap().transformation();
    graph.object_mut(o).unwrap().normalize_rotation();
    let after = graph.object(o).unwrap().transformation();

    assert!(after.is_rigid_transformation());
    assert_eq!(after.w_axis, before.w_axis);
}

#[test]
fn test_batch_with_non_rigid_final_matrix() {
    let mut graph = SceneGraph::<RigidMatrixTransformation3D>::new();
    let scene = graph.add_scene();
    let o = graph.add_object(Some(scene)).unwrap();

    let result = graph.transformation_matrices(scene, &[o], &Mat4::from_scale(Vec3::splat(2.0)));
    assert!(matches!(result, Err(Error::NotRigidTransformation(_))));
}
