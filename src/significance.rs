//! Two-proportion z-test significance calculator
//!
//! The core question this module answers: is the difference between the
//! control and variant conversion rates real, or noise? It runs a pooled
//! two-proportion z-test (two-tailed), reports the minimum detectable
//! effect at the current sample size, and, when the result is not yet
//! significant, estimates how many more days of data collection the
//! experiment needs.

use crate::config::AnalysisConfig;
use crate::error::{EngineError, Result};
use crate::normal::{inverse_normal_cdf, normal_cdf};
use serde::{Deserialize, Serialize};

/// Statistical power assumed for the minimum detectable effect (80%)
const POWER: f64 = 0.8;

/// Outcome of the two-proportion z-test for one variant against control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSignificance {
    /// Whether the two-tailed p-value fell below alpha
    pub is_significant: bool,
    /// Two-tailed p-value under the pooled null hypothesis
    ///
    /// Computed as `2 * (1 - cdf(|z|))`; approximation error can leave it
    /// marginally above 1.0 when `z` is at or near zero.
    pub p_value: f64,
    /// Confidence level the test was run at
    pub confidence_level: f64,
    /// Combined sample size of both arms
    pub sample_size: u64,
    /// Smallest relative lift detectable at this sample size and 80% power
    pub minimum_detectable_effect: f64,
    /// Estimated additional runtime before the test can conclude
    ///
    /// `None` once the result is significant. The estimate extrapolates
    /// from `AnalysisConfig::assumed_elapsed_days` and is a planning hint,
    /// not a power analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_significance: Option<f64>,
}

/// Closed interval `[lower, upper]` around an estimated quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Whether the interval brackets `value` (false when either bound is NaN)
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Run the pooled two-proportion z-test
///
/// # Arguments
/// * `control_conversions` / `control_sample` - successes and trials in control
/// * `variant_conversions` / `variant_sample` - successes and trials in the variant
/// * `config` - confidence level and days-to-significance assumptions
///
/// # Errors
/// [`EngineError::InvalidInput`] when either sample is empty, the control
/// has zero conversions (no baseline to compare against), the combined
/// counts overflow `u64`, the pooled rate is saturated (zero variance),
/// or the config fails validation.
pub fn compute_significance(
    control_conversions: u64,
    control_sample: u64,
    variant_conversions: u64,
    variant_sample: u64,
    config: &AnalysisConfig,
) -> Result<StatisticalSignificance> {
    config.validate()?;

    if control_sample == 0 {
        return Err(EngineError::InvalidInput {
            reason: "control_sample must be > 0".to_string(),
        });
    }
    if variant_sample == 0 {
        return Err(EngineError::InvalidInput {
            reason: "variant_sample must be > 0".to_string(),
        });
    }
    if control_conversions == 0 {
        return Err(EngineError::InvalidInput {
            reason: "control_conversions must be > 0: a zero baseline rate has no \
                     measurable relative effect"
                .to_string(),
        });
    }

    let sample_size = control_sample
        .checked_add(variant_sample)
        .ok_or_else(|| EngineError::InvalidInput {
            reason: "combined sample size overflows u64".to_string(),
        })?;
    let pooled_conversions = control_conversions
        .checked_add(variant_conversions)
        .ok_or_else(|| EngineError::InvalidInput {
            reason: "combined conversion count overflows u64".to_string(),
        })?;

    let p1 = control_conversions as f64 / control_sample as f64;
    let p2 = variant_conversions as f64 / variant_sample as f64;

    // Pooled rate under the null hypothesis of no difference
    let pooled = pooled_conversions as f64 / sample_size as f64;
    let se = (pooled
        * (1.0 - pooled)
        * (1.0 / control_sample as f64 + 1.0 / variant_sample as f64))
        .sqrt();

    if se == 0.0 {
        return Err(EngineError::InvalidInput {
            reason: format!(
                "pooled conversion rate {pooled} leaves zero variance, nothing to test"
            ),
        });
    }

    let z = (p2 - p1) / se;
    let p_value = 2.0 * (1.0 - normal_cdf(z.abs()));

    let alpha = config.alpha();
    let is_significant = p_value < alpha;

    let z_alpha = inverse_normal_cdf(1.0 - alpha / 2.0)?;
    let z_beta = inverse_normal_cdf(POWER)?;
    let minimum_detectable_effect = (z_alpha + z_beta) * se / p1;

    let days_to_significance = if is_significant {
        None
    } else {
        Some(estimate_days_to_significance(
            sample_size,
            p_value,
            alpha,
            config,
        ))
    };

    Ok(StatisticalSignificance {
        is_significant,
        p_value,
        confidence_level: config.confidence_level,
        sample_size,
        minimum_detectable_effect,
        days_to_significance,
    })
}

/// Extrapolate how many days of data collection reach significance
///
/// The multiplier `1 / (1 - p/alpha)` diverges at the boundary and flips
/// sign above it, so its magnitude is clamped to
/// `[1, max_extension_factor]` before scaling the elapsed-days
/// assumption. Heuristic by construction; the value is a hint for
/// experiment dashboards.
fn estimate_days_to_significance(
    sample_size: u64,
    p_value: f64,
    alpha: f64,
    config: &AnalysisConfig,
) -> f64 {
    let total = sample_size as f64;
    let raw = 1.0 / (1.0 - p_value / alpha);
    let factor = raw.abs().clamp(1.0, config.max_extension_factor);
    let required_sample = (total * factor).ceil();
    (required_sample / total * config.assumed_elapsed_days).ceil()
}

/// Confidence interval for the absolute lift `p2 - p1`
///
/// Unpooled two-proportion interval: each arm contributes its own
/// variance term, and the critical value comes from the requested
/// confidence level rather than a fixed 1.96.
pub fn lift_interval(
    control_conversions: u64,
    control_sample: u64,
    variant_conversions: u64,
    variant_sample: u64,
    confidence_level: f64,
) -> Result<ConfidenceInterval> {
    if control_sample == 0 || variant_sample == 0 {
        return Err(EngineError::InvalidInput {
            reason: "both samples must be > 0 for a lift interval".to_string(),
        });
    }
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(EngineError::InvalidInput {
            reason: format!("confidence_level must be in (0, 1), got {confidence_level}"),
        });
    }

    let p1 = control_conversions as f64 / control_sample as f64;
    let p2 = variant_conversions as f64 / variant_sample as f64;

    let se = (p1 * (1.0 - p1) / control_sample as f64
        + p2 * (1.0 - p2) / variant_sample as f64)
        .sqrt();
    let z = inverse_normal_cdf(1.0 - (1.0 - confidence_level) / 2.0)?;
    let margin = z * se;
    let difference = p2 - p1;

    Ok(ConfidenceInterval {
        lower: difference - margin,
        upper: difference + margin,
    })
}

/// Per-arm sample size needed to detect a relative lift
///
/// # Arguments
/// * `baseline_rate` - control conversion proportion, in (0, 1)
/// * `relative_mde` - smallest relative lift worth detecting (0.10 = 10%)
/// * `alpha` - significance level
/// * `power` - desired statistical power, in (0, 1)
///
/// Uses the pooled-variance normal approximation
/// `n = 2 * p(1-p) * (z_alpha + z_beta)^2 / delta^2` evaluated at the
/// midpoint rate, rounded up.
pub fn required_sample_size(
    baseline_rate: f64,
    relative_mde: f64,
    alpha: f64,
    power: f64,
) -> Result<u64> {
    if !(baseline_rate > 0.0 && baseline_rate < 1.0) {
        return Err(EngineError::InvalidInput {
            reason: format!("baseline_rate must be in (0, 1), got {baseline_rate}"),
        });
    }
    if !(relative_mde > 0.0) {
        return Err(EngineError::InvalidInput {
            reason: format!("relative_mde must be positive, got {relative_mde}"),
        });
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(EngineError::InvalidInput {
            reason: format!("alpha must be in (0, 1), got {alpha}"),
        });
    }
    if !(power > 0.0 && power < 1.0) {
        return Err(EngineError::InvalidInput {
            reason: format!("power must be in (0, 1), got {power}"),
        });
    }

    let target_rate = baseline_rate * (1.0 + relative_mde);
    if target_rate >= 1.0 {
        return Err(EngineError::InvalidInput {
            reason: format!(
                "baseline_rate {baseline_rate} lifted by {relative_mde} exceeds 1.0"
            ),
        });
    }

    let z_alpha = inverse_normal_cdf(1.0 - alpha / 2.0)?;
    let z_beta = inverse_normal_cdf(power)?;
    let midpoint = (baseline_rate + target_rate) / 2.0;
    let effect = target_rate - baseline_rate;
    let n = 2.0 * midpoint * (1.0 - midpoint) * (z_alpha + z_beta).powi(2) / (effect * effect);

    Ok(n.ceil() as u64)
}
