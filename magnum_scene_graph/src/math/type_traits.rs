/// Fuzzy floating-point comparison used by every normalization and rigidity check.

/// Tolerance for `f32` comparisons
pub const EPSILON: f32 = 1.0e-5;

/// Fuzzy compare of two floats
///
/// Absolute comparison near zero, relative comparison elsewhere.
pub fn fuzzy_equal(a: f32, b: f32) -> bool {
    if a == b {
        return true;
    }

    let abs_a = a.abs();
    let abs_b = b.abs();
    let difference = (a - b).abs();

    if a == 0.0 || b == 0.0 || difference < EPSILON {
        return difference < EPSILON;
    }

    difference / (abs_a + abs_b) < EPSILON
}

/// Fuzzy compare against zero
pub fn fuzzy_zero(value: f32) -> bool {
    value.abs() < EPSILON
}

/// Whether a squared length denotes a unit length
///
/// The tolerance is doubled because the length is squared.
pub fn is_normalized_squared(length_squared: f32) -> bool {
    (length_squared - 1.0).abs() < 2.0 * EPSILON
}

#[cfg(test)]
#[path = "type_traits_tests.rs"]
mod tests;
