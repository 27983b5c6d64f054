//! Floating point fast approximations, used when the `libm` feature is off

#[cfg(any(test, doc, not(feature = "libm")))]
mod detail {
    use num_traits::float::FloatCore;

    /// calculate e^x in the range [-0.5, 0.5) using an order 4 Taylor series
    fn exp_approx_small(x: f32) -> f32 {
        // e^x ~= 1 + x + x^2/2! + x^3/3! + x^4/4!
        //     ~= 1 + x * { 1 + x/2 * [ 1 + x/3 * ( 1 + x/4 )]}
        let c_nested = 1.0 + (x / 4.0);
        let b_nested = 1.0 + ((x / 3.0) * c_nested);
        let a_nested = 1.0 + ((x / 2.0) * b_nested);
        1.0 + (x * a_nested)
    }

    /// Approximate 2^x.
    ///
    /// The integral part is exact (via `powi`).  The fractional part `f` is
    /// shifted to be centered on zero so the Taylor series stays accurate:
    ///
    /// ```text
    /// 2^f = sqrt(2) * e^[(f - 1/2) * ln(2)]
    /// ```
    pub fn exp2_approx(x: f32) -> f32 {
        let floor = FloatCore::floor(x);
        let frac = x - floor;
        let whole = FloatCore::powi(2.0f32, floor as i32);
        let small = (frac - 0.5) * core::f32::consts::LN_2;
        whole * core::f32::consts::SQRT_2 * exp_approx_small(small)
    }
}

#[cfg(any(test, doc, not(feature = "libm")))]
pub use detail::*;
