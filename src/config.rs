// Configuration for experiment analysis
//
// The two tuning knobs that used to live as inline constants in the
// significance calculator (test duration assumption, extension cap) are
// explicit fields here so callers can see and override them.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for experiment significance analysis
///
/// Controls the confidence level of the two-proportion z-test and the
/// assumptions behind the days-to-significance estimate:
/// - `confidence_level` sets alpha (`alpha = 1 - confidence_level`)
/// - `assumed_elapsed_days` scales the extra-runtime estimate
/// - `max_extension_factor` caps that estimate near the significance boundary
///
/// # Example
/// ```
/// use veredicto::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.confidence_level, 0.95); // alpha = 0.05
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Confidence level for hypothesis testing
    ///
    /// - 0.95 (default): alpha = 0.05, the conventional choice
    /// - 0.99: stricter, fewer false positives, slower to conclude
    /// - 0.90: looser, faster to conclude, more false positives
    ///
    /// Must lie strictly between 0 and 1.
    pub confidence_level: f64,

    /// Days the experiment is assumed to have been running
    ///
    /// The days-to-significance estimate extrapolates from this duration:
    /// if twice the current sample is needed, the answer is twice this
    /// many days.
    ///
    /// Default: 7.0 (one full weekly cycle)
    pub assumed_elapsed_days: f64,

    /// Upper bound on the sample extension multiplier
    ///
    /// The extension estimate diverges as the p-value approaches alpha
    /// from above. The multiplier is clamped to
    /// `[1.0, max_extension_factor]` so the estimate stays a usable hint
    /// instead of blowing up near the boundary.
    ///
    /// Default: 10.0
    pub max_extension_factor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,    // alpha = 0.05 (standard in practice)
            assumed_elapsed_days: 7.0, // one weekly seasonality cycle
            max_extension_factor: 10.0,
        }
    }
}

impl AnalysisConfig {
    /// Create a strict configuration (fewer false positives, slower calls)
    ///
    /// Use when shipping the variant is expensive to reverse.
    pub fn strict() -> Self {
        Self {
            confidence_level: 0.99, // alpha = 0.01
            assumed_elapsed_days: 7.0,
            max_extension_factor: 10.0,
        }
    }

    /// Create a permissive configuration (earlier calls, more false positives)
    ///
    /// Use for low-stakes experiments where iteration speed matters more.
    pub fn permissive() -> Self {
        Self {
            confidence_level: 0.90, // alpha = 0.10
            assumed_elapsed_days: 7.0,
            max_extension_factor: 10.0,
        }
    }

    /// Significance level (alpha) implied by the confidence level
    pub fn alpha(&self) -> f64 {
        1.0 - self.confidence_level
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(EngineError::InvalidInput {
                reason: format!(
                    "confidence_level must be in (0, 1), got {}",
                    self.confidence_level
                ),
            });
        }

        if !(self.assumed_elapsed_days > 0.0) {
            return Err(EngineError::InvalidInput {
                reason: format!(
                    "assumed_elapsed_days must be positive, got {}",
                    self.assumed_elapsed_days
                ),
            });
        }

        if !(self.max_extension_factor >= 1.0) {
            return Err(EngineError::InvalidInput {
                reason: format!(
                    "max_extension_factor must be >= 1, got {}",
                    self.max_extension_factor
                ),
            });
        }

        Ok(())
    }
}
