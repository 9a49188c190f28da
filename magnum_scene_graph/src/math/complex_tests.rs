use glam::{Mat2, Vec2};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use super::*;

#[test]
fn test_default_is_identity() {
    assert_eq!(Complex::default(), Complex::IDENTITY);
    assert!(Complex::default().is_normalized());
}

#[test]
fn test_multiplication() {
    let a = Complex::new(5.0, 3.0);
    let b = Complex::new(6.0, -3.0);
    assert_eq!(a * b, Complex::new(39.0, 3.0));
}

#[test]
fn test_rotation_and_angle() {
    let c = Complex::rotation(FRAC_PI_4);
    assert!(c.is_normalized());
    assert!((c.angle() - FRAC_PI_4).abs() < 1.0e-6);

    let composed = c * Complex::rotation(FRAC_PI_4);
    assert!(composed.fuzzy_eq(&Complex::rotation(FRAC_PI_2)));
}

#[test]
fn test_matrix_round_trip() {
    let c = Complex::rotation(0.6);
    let m = c.to_matrix();
    assert!(m.abs_diff_eq(Mat2::from_angle(0.6), 1.0e-6));
    assert!(Complex::from_matrix(&m).fuzzy_eq(&c));
}

#[test]
fn test_transform_vector_matches_matrix() {
    let c = Complex::rotation(1.1);
    let v = Vec2::new(2.0, -1.0);
    assert!(c.transform_vector(v).abs_diff_eq(c.to_matrix() * v, 1.0e-6));
}

#[test]
fn test_inverted() {
    let c = Complex::new(3.0, 4.0);
    assert!((c * c.inverted()).fuzzy_eq(&Complex::IDENTITY));
    assert_eq!(c.length(), 5.0);
    assert!(c.normalized().is_normalized());
}

#[test]
fn test_inverted_normalized_is_conjugate() {
    let c = Complex::rotation(-2.0);
    assert_eq!(c.inverted_normalized(), c.conjugated());
    assert!((c * c.inverted_normalized()).fuzzy_eq(&Complex::IDENTITY));
}

#[test]
fn test_scalar_and_additive_ops() {
    let c = Complex::new(1.0, 2.0);
    assert_eq!(c * 2.0, Complex::new(2.0, 4.0));
    assert_eq!(c / 2.0, Complex::new(0.5, 1.0));
    assert_eq!(c + c - c, c);
    assert_eq!(-c, Complex::new(-1.0, -2.0));
    assert_eq!(Vec2::from(c), Vec2::new(1.0, 2.0));
}
