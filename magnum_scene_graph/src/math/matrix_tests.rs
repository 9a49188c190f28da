use glam::{Mat3, Mat4, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;
use super::*;

// ============================================================================
// RIGIDITY
// ============================================================================

#[test]
fn test_mat4_rigid_rotation_translation() {
    let m = Mat4::from_translation(Vec3::new(1.0, -2.0, 3.0))
        * Mat4::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), 0.7);
    assert!(m.is_rigid_transformation());
}

#[test]
fn test_mat4_reflection_is_rigid() {
    let m = Mat4::from_translation(Vec3::X) * reflection_3d(Vec3::Y);
    assert!(m.is_rigid_transformation());
}

#[test]
fn test_mat4_scaling_is_not_rigid() {
    assert!(!Mat4::from_scale(Vec3::splat(2.0)).is_rigid_transformation());
}

#[test]
fn test_mat4_shear_is_not_rigid() {
    let mut m = Mat4::IDENTITY;
    m.y_axis.x = 0.3;
    assert!(!m.is_rigid_transformation());
}

#[test]
fn test_mat4_projective_row_is_not_rigid() {
    let mut m = Mat4::IDENTITY;
    m.x_axis.w = 0.5;
    assert!(!m.is_rigid_transformation());
}

#[test]
fn test_mat3_rigid_checks() {
    let rigid = Mat3::from_translation(Vec2::new(3.0, 1.0)) * Mat3::from_angle(1.2);
    assert!(rigid.is_rigid_transformation());
    assert!(!Mat3::from_scale(Vec2::new(1.0, 3.0)).is_rigid_transformation());
}

// ============================================================================
// RIGID INVERSE
// ============================================================================

#[test]
fn test_mat4_inverted_rigid_matches_general_inverse() {
    let m = Mat4::from_translation(Vec3::new(1.0, 2.0, -3.0)) * Mat4::from_rotation_y(FRAC_PI_2);
    assert!(m.inverted_rigid().abs_diff_eq(m.inverse(), 1.0e-5));
    assert!((m * m.inverted_rigid()).abs_diff_eq(Mat4::IDENTITY, 1.0e-5));
}

#[test]
fn test_mat3_inverted_rigid_matches_general_inverse() {
    let m = Mat3::from_translation(Vec2::new(-1.0, 4.0)) * Mat3::from_angle(0.4);
    assert!(m.inverted_rigid().abs_diff_eq(m.inverse(), 1.0e-5));
}

// ============================================================================
// GRAM-SCHMIDT
// ============================================================================

#[test]
fn test_mat4_orthonormalized_rotation_restores_rigidity() {
    let mut m = Mat4::from_translation(Vec3::new(5.0, 0.0, 1.0)) * Mat4::from_rotation_z(0.3);
    m.x_axis *= 1.01;
    m.y_axis.x += 0.02;
    assert!(!m.is_rigid_transformation());

    let fixed = m.orthonormalized_rotation();
    assert!(fixed.is_rigid_transformation());
    assert_eq!(fixed.translation_part(), Vec3::new(5.0, 0.0, 1.0));
    assert!(fixed.x_axis.truncate().abs_diff_eq(m.x_axis.truncate().normalize(), 1.0e-6));
}

#[test]
fn test_mat3_orthonormalized_rotation_restores_rigidity() {
    let mut m = Mat3::from_translation(Vec2::new(2.0, 2.0)) * Mat3::from_angle(0.9);
    m.y_axis *= 1.05;
    let fixed = m.orthonormalized_rotation();
    assert!(fixed.is_rigid_transformation());
    assert_eq!(fixed.translation_part(), Vec2::new(2.0, 2.0));
}

// ============================================================================
// REFLECTION
// ============================================================================

#[test]
fn test_reflection_3d_flips_normal_component() {
    let m = reflection_3d(Vec3::Z);
    assert!(m.transform_point3(Vec3::new(1.0, 2.0, 3.0)).abs_diff_eq(Vec3::new(1.0, 2.0, -3.0), 1.0e-6));
}

#[test]
fn test_reflection_2d_flips_normal_component() {
    let m = reflection_2d(Vec2::X);
    assert!(m.transform_point2(Vec2::new(4.0, 1.0)).abs_diff_eq(Vec2::new(-4.0, 1.0), 1.0e-6));
    assert!((m * m).abs_diff_eq(Mat3::IDENTITY, 1.0e-6));
}
