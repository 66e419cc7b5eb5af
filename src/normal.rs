//! Standard normal distribution approximations
//!
//! Rational approximations for the standard normal CDF and its inverse,
//! chosen for speed and zero dependencies over last-digit accuracy:
//!
//! - Forward: Abramowitz & Stegun formula 26.2.17 (Hastings coefficients),
//!   absolute error below 7.5e-8.
//! - Inverse: Acklam's three-region algorithm, relative error below
//!   1.15e-9 across the open interval.
//!
//! The forward error is amplified by `1/pdf(x)` when composed with the
//! inverse, so round-trips drift toward ~1e-4 near |x| = 4 while staying
//! under 1e-6 for |x| <= 1.5.

use crate::error::{EngineError, Result};

/// Central-region numerator coefficients for the inverse CDF (Acklam)
const INV_CENTRAL_NUM: [f64; 6] = [
    -39.6968302866538,
    220.946098424521,
    -275.928510446969,
    138.357751867269,
    -30.6647980661472,
    2.50662827745924,
];

/// Central-region denominator coefficients for the inverse CDF (Acklam)
const INV_CENTRAL_DEN: [f64; 5] = [
    -54.4760987982241,
    161.585836858041,
    -155.698979859887,
    66.8013118877197,
    -13.2806815528857,
];

/// Tail-region numerator coefficients for the inverse CDF (Acklam)
const INV_TAIL_NUM: [f64; 6] = [
    -0.00778489400243029,
    -0.322396458041136,
    -2.40075827716184,
    -2.54973253934373,
    4.37466414146497,
    2.93816398269878,
];

/// Tail-region denominator coefficients for the inverse CDF (Acklam)
const INV_TAIL_DEN: [f64; 4] = [
    0.00778469570904146,
    0.32246712907004,
    2.445134137143,
    3.75440866190742,
];

/// Boundary between the lower tail and the central region
const P_LOW: f64 = 0.02425;

/// Cumulative distribution function of the standard normal
///
/// Abramowitz & Stegun 26.2.17. Total over all finite `x`; the
/// approximation evaluates the lower tail and reflects for positive `x`.
pub fn normal_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * x.abs());
    let d = 0.3989423 * (-x * x / 2.0).exp();
    let p = d
        * t
        * (0.3193815 + t * (-0.3565638 + t * (1.781478 + t * (-1.821256 + t * 1.330274))));
    if x > 0.0 {
        1.0 - p
    } else {
        p
    }
}

/// Quantile function (inverse CDF) of the standard normal
///
/// Acklam's rational approximation: a central region for
/// `p` in `[P_LOW, 1 - P_LOW]` and two symmetric tail expansions in
/// `sqrt(-2 ln p)`.
///
/// # Errors
/// Returns [`EngineError::Domain`] when `p` is outside the open interval
/// `(0, 1)`. NaN fails the same guard.
pub fn inverse_normal_cdf(p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(EngineError::Domain { p });
    }

    let p_high = 1.0 - P_LOW;
    let [a1, a2, a3, a4, a5, a6] = INV_CENTRAL_NUM;
    let [b1, b2, b3, b4, b5] = INV_CENTRAL_DEN;
    let [c1, c2, c3, c4, c5, c6] = INV_TAIL_NUM;
    let [d1, d2, d3, d4] = INV_TAIL_DEN;

    let x = if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((c1 * q + c2) * q + c3) * q + c4) * q + c5) * q + c6)
            / ((((d1 * q + d2) * q + d3) * q + d4) * q + 1.0)
    } else if p <= p_high {
        let q = p - 0.5;
        let r = q * q;
        (((((a1 * r + a2) * r + a3) * r + a4) * r + a5) * r + a6) * q
            / (((((b1 * r + b2) * r + b3) * r + b4) * r + b5) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((c1 * q + c2) * q + c3) * q + c4) * q + c5) * q + c6)
            / ((((d1 * q + d2) * q + d3) * q + d4) * q + 1.0)
    };

    Ok(x)
}
