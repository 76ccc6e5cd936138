/// Default rounding step for box bounds (one millimeter when units are meters).
pub const DEFAULT_QUANTUM: f64 = 0.001;

/// Snap `value` to the nearest multiple of `quantum`.
///
/// Two inputs that round to the same step always produce bit-identical outputs,
/// which is what keeps adjoining walls free of hairline gaps. A non-positive or
/// non-finite quantum disables snapping.
#[inline]
pub fn snap(value: f64, quantum: f64) -> f64 {
    if quantum > 0.0 && quantum.is_finite() {
        (value / quantum).round() * quantum
    } else {
        value
    }
}
