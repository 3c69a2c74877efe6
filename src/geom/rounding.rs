/// Default number of decimals applied to reported measurements.
pub const DEFAULT_PRECISION: u32 = 14;

/// Largest magnitude at which every integer is exactly representable in `f64`.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Rounds `value` to `digits` decimal places, halves away from zero.
///
/// If `value * 10^digits` leaves the exact-integer range of `f64` the value
/// already carries fewer than `digits` significant decimals and is returned as is.
#[must_use]
pub fn round_to_precision(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Ok(exponent) = i32::try_from(digits) else {
        return value;
    };
    let scale = 10f64.powi(exponent);
    let scaled = value * scale;
    if !scale.is_finite() || !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    scaled.round() / scale
}
