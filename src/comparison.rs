// Single-metric comparison between control and variant
//
// Quick per-metric readout with a fixed 95% interval, independent of the
// configured confidence level used by the z-test. The variance formula
// assumes the metric is a proportion in [0, 1]; for anything else
// (revenue, AOV) the margin degenerates to NaN and `interval_valid`
// records that the interval carries no meaning.

use crate::error::{EngineError, Result};
use crate::significance::ConfidenceInterval;
use serde::{Deserialize, Serialize};

/// Fixed critical value for the 95% two-sided interval
const Z_95: f64 = 1.96;

/// Side-by-side readout of one metric across the two arms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    /// Metric name as supplied by the caller
    pub metric: String,
    /// Control arm value
    pub control: f64,
    /// Variant arm value
    pub variant: f64,
    /// Relative change, percent
    pub improvement: f64,
    /// Whether the relative change clears the interval margin
    pub is_significant: bool,
    /// 95% interval around the variant value
    pub confidence_interval: ConfidenceInterval,
    /// False when the control value is not a proportion, in which case
    /// the interval bounds are NaN and `is_significant` is always false
    pub interval_valid: bool,
}

/// Compare one metric between control and variant
///
/// # Errors
/// [`EngineError::InvalidInput`] when `control_impressions` is zero or
/// the control value is zero (the relative change is undefined).
pub fn compare_metric(
    control_value: f64,
    variant_value: f64,
    control_impressions: u64,
    metric: &str,
) -> Result<MetricComparison> {
    if control_impressions == 0 {
        return Err(EngineError::InvalidInput {
            reason: format!("control_impressions must be > 0 to compare {metric}"),
        });
    }
    if control_value == 0.0 {
        return Err(EngineError::InvalidInput {
            reason: format!("control value for {metric} is zero, relative change undefined"),
        });
    }

    let improvement = (variant_value - control_value) / control_value * 100.0;

    let interval_valid = (0.0..=1.0).contains(&control_value);
    if !interval_valid {
        tracing::warn!(
            "Control value {} for metric {} is not a proportion; interval is not meaningful",
            control_value,
            metric
        );
    }

    // NaN margin for non-proportion inputs; comparisons below then stay false
    let se = (control_value * (1.0 - control_value) / control_impressions as f64).sqrt();
    let margin = Z_95 * se;

    let is_significant = improvement.abs() > margin * 100.0;

    Ok(MetricComparison {
        metric: metric.to_string(),
        control: control_value,
        variant: variant_value,
        improvement,
        is_significant,
        confidence_interval: ConfidenceInterval {
            lower: variant_value - margin,
            upper: variant_value + margin,
        },
        interval_valid,
    })
}

/// Relative change from control to variant, percent
///
/// # Errors
/// [`EngineError::InvalidInput`] when the control value is zero.
pub fn relative_improvement(control: f64, variant: f64) -> Result<f64> {
    if control == 0.0 {
        return Err(EngineError::InvalidInput {
            reason: "control value is zero, relative change undefined".to_string(),
        });
    }
    Ok((variant - control) / control * 100.0)
}
