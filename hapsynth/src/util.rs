//! Various utility functions and helpful constants

// currently the only users of this function are unit tests... shut up dead code warning
#[cfg(test)]
pub fn calculate_cents(base: f32, freq: f32) -> f32 {
    (1200.0 * f32::log2(freq / base)).abs()
}

/// Linearly rescale `x` from the range `[in_min, in_max]` onto
/// `[out_min, out_max]` using integer arithmetic, truncating toward zero.
///
/// The input is not clamped, so values outside of the input range extrapolate.
/// A degenerate input range (`in_min == in_max`) returns `out_min`.
pub fn rescale(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Saturate a drive strength into the range accepted by the motor PWM
pub fn to_magnitude(x: i32) -> u8 {
    x.clamp(0, u8::MAX as i32) as u8
}
