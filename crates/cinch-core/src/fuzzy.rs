//! Tolerant floating-point comparisons.
//!
//! Coordinates produced by earlier layout phases carry rounding noise. Two
//! borders that are meant to touch may be off by a tiny amount, which must
//! not create a constraint between them. All comparisons here treat values
//! within [`TOLERANCE`] of each other as equal.

/// Values closer than this are considered equal.
pub const TOLERANCE: f64 = 1e-4;

/// Returns true if `a` and `b` are equal within [`TOLERANCE`].
pub fn eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Returns true if `a` is greater than `b` by more than [`TOLERANCE`].
pub fn gt(a: f64, b: f64) -> bool {
    a - b > TOLERANCE
}

/// Returns true if `a` is less than `b` by more than [`TOLERANCE`].
pub fn lt(a: f64, b: f64) -> bool {
    b - a > TOLERANCE
}

/// Returns true if `a` is greater than or fuzzily equal to `b`.
pub fn ge(a: f64, b: f64) -> bool {
    !lt(a, b)
}

/// Returns true if `a` is less than or fuzzily equal to `b`.
pub fn le(a: f64, b: f64) -> bool {
    !gt(a, b)
}
