use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;
use super::*;

#[test]
fn test_default_is_zero() {
    let d: Dual<f32> = Dual::default();
    assert_eq!(d, Dual::new(0.0, 0.0));
}

#[test]
fn test_additive_ops_are_component_wise() {
    let a = Dual::new(2.0f32, -7.5);
    let b = Dual::new(-3.2f32, 2.0);
    assert_eq!(a + b, Dual::new(-1.2, -5.5));
    assert_eq!(a - b, Dual::new(5.2, -9.5));
    assert_eq!(-a, Dual::new(-2.0, 7.5));

    let mut c = a;
    c += b;
    c -= b;
    assert_eq!(c, a);
}

#[test]
fn test_multiplication() {
    let a = Dual::new(1.5f32, -4.0);
    let b = Dual::new(-2.0f32, 0.5);
    assert_eq!(a * b, Dual::new(-3.0, 8.75));
}

#[test]
fn test_division() {
    let a = Dual::new(1.5f32, -4.0);
    let b = Dual::new(-2.0f32, 0.5);
    let c = a / b;
    assert!(c.fuzzy_eq(&Dual::new(-0.75, 1.8125)));
    assert!((c * b).fuzzy_eq(&a));
}

#[test]
fn test_scalar_ops() {
    let a = Dual::new(1.0f32, 2.0);
    assert_eq!(a * 2.0, Dual::new(2.0, 4.0));
    assert_eq!(a / 2.0, Dual::new(0.5, 1.0));
}

#[test]
fn test_conjugated() {
    assert_eq!(Dual::new(1.0f32, -6.5).conjugated(), Dual::new(1.0, 6.5));
}

#[test]
fn test_sqrt() {
    let s = Dual::new(16.0f32, 2.0).sqrt();
    assert!(s.fuzzy_eq(&Dual::new(4.0, 0.25)));
    assert!((s * s).fuzzy_eq(&Dual::new(16.0, 2.0)));
}

#[test]
fn test_sin_cos() {
    let (sin, cos) = Dual::new(FRAC_PI_2, 3.0f32).sin_cos();
    assert!(sin.fuzzy_eq(&Dual::new(1.0, 0.0)));
    assert!(cos.fuzzy_eq(&Dual::new(0.0, -3.0)));
}

#[test]
fn test_quaternion_parts_keep_order() {
    let a = Dual::new(Quat::from_rotation_x(0.5), Quat::from_xyzw(1.0, 0.0, 0.0, 0.0));
    let b = Dual::new(Quat::from_rotation_y(0.3), Quat::from_xyzw(0.0, 2.0, 0.0, 0.0));
    let product = a * b;
    assert!(product.real.abs_diff_eq(a.real * b.real, 1.0e-6));
    assert!(product.dual.abs_diff_eq(a.real * b.dual + a.dual * b.real, 1.0e-6));
}

#[test]
fn test_vector_times_scalar_dual() {
    let v = Dual::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 1.0, 0.0));
    let s = Dual::new(2.0f32, 0.5);
    let product = v * s;
    assert_eq!(product.real, Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(product.dual, Vec3::new(0.5, 3.0, 1.5));
}
