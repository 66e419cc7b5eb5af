// Experiment assessment: orchestrates the z-test, metric deltas, and
// recommendation rules into one result record
//
// The headline numbers (winner, confidence, revenue lift) follow the
// variant with the largest revenue-per-visitor improvement; every variant
// still gets its own outcome entry and feeds the per-variant rules.

use crate::comparison::relative_improvement;
use crate::config::AnalysisConfig;
use crate::error::{EngineError, Result};
use crate::recommendation::{generate_recommendations, Recommendation};
use crate::significance::{compute_significance, StatisticalSignificance};
use crate::variant::TestVariant;
use serde::{Deserialize, Serialize};

/// Per-variant result within an experiment assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantOutcome {
    pub variant_id: String,
    pub variant_name: String,
    /// z-test outcome for this variant against control
    pub significance: StatisticalSignificance,
    /// Revenue-per-visitor lift over control, percent
    pub improvement: f64,
    /// Projected absolute revenue gain at the variant's traffic volume
    pub estimated_revenue_lift: f64,
}

/// Full analysis of one experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentAssessment {
    /// Identifier of the control arm the outcomes are measured against
    pub control_id: String,
    /// One outcome per treatment variant, in input order
    pub outcomes: Vec<VariantOutcome>,

    /// Significance result for the primary (best-improving) variant
    pub significance: StatisticalSignificance,
    /// Primary variant's revenue-per-visitor lift, percent
    pub improvement: f64,
    /// Primary variant's projected revenue gain
    pub estimated_revenue_lift: f64,
    /// Percent certainty that the primary difference is real, `(1 - p) * 100`
    pub confidence: f64,

    /// Primary variant's id when it significantly beats control
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,

    /// Prioritized next actions
    pub recommendations: Vec<Recommendation>,
}

impl ExperimentAssessment {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        // Verdict header
        if let Some(winner) = &self.winner {
            report.push_str(&format!("✅ WINNER: {winner}\n\n"));
            report.push_str(&format!(
                "Revenue per visitor lift: {:+.1}%\n",
                self.improvement
            ));
            report.push_str(&format!(
                "Confidence: {:.1}% (p={:.4})\n",
                self.confidence, self.significance.p_value
            ));
        } else if self.significance.is_significant {
            report.push_str("❌ CONTROL HOLDS\n\n");
            report.push_str(&format!(
                "The best variant changes revenue per visitor by {:+.1}% (p={:.4})\n",
                self.improvement, self.significance.p_value
            ));
        } else {
            report.push_str("⚠️  NOT YET CONCLUSIVE\n\n");
            report.push_str(&format!(
                "Best observed lift: {:+.1}% (p={:.4})\n",
                self.improvement, self.significance.p_value
            ));
            if let Some(days) = self.significance.days_to_significance {
                report.push_str(&format!("Estimated additional runtime: {days:.0} days\n"));
            }
        }
        report.push_str(&format!(
            "Sample size: {} ({:.0}% confidence level)\n",
            self.significance.sample_size,
            self.significance.confidence_level * 100.0
        ));

        // Per-variant outcomes
        if !self.outcomes.is_empty() {
            report.push_str(&format!("\n📊 Variants vs {}:\n", self.control_id));
            for outcome in &self.outcomes {
                report.push_str(&format!(
                    "  {} ({}): {:+.1}% rpv, p={:.4}, projected {:+.2} revenue\n",
                    outcome.variant_name,
                    outcome.variant_id,
                    outcome.improvement,
                    outcome.significance.p_value,
                    outcome.estimated_revenue_lift
                ));
            }
        }

        // Recommendations
        if !self.recommendations.is_empty() {
            report.push_str(&format!(
                "\n💡 Recommendations ({}):\n",
                self.recommendations.len()
            ));
            for rec in &self.recommendations {
                report.push_str(&format!("  [{}] {}\n", rec.priority.label(), rec.title));
            }
        }

        report
    }
}

/// Assess an experiment: significance per variant, headline verdict, and
/// recommendations
///
/// The primary variant is the one with the largest revenue-per-visitor
/// improvement; `winner` is set only when that variant's lift is both
/// positive and statistically significant.
///
/// # Errors
/// [`EngineError::InvalidInput`] when `variants` is empty, any arm has
/// zero impressions, the control has zero conversions or zero revenue per
/// visitor, or the config fails validation.
///
/// # Example
/// ```
/// use veredicto::{assess_experiment, AnalysisConfig, TestVariant};
///
/// let control = TestVariant::from_counts("control", "Control", 15420, 1234, 185, 27750.0);
/// let variant = TestVariant::from_counts("variant-b", "Variant B", 15680, 1568, 251, 40160.0);
///
/// let assessment =
///     assess_experiment(&control, &[variant], &AnalysisConfig::default()).unwrap();
/// assert_eq!(assessment.winner.as_deref(), Some("variant-b"));
/// ```
pub fn assess_experiment(
    control: &TestVariant,
    variants: &[TestVariant],
    config: &AnalysisConfig,
) -> Result<ExperimentAssessment> {
    config.validate()?;

    if variants.is_empty() {
        return Err(EngineError::InvalidInput {
            reason: "at least one treatment variant is required".to_string(),
        });
    }

    let mut outcomes = Vec::with_capacity(variants.len());
    for variant in variants {
        let significance = compute_significance(
            control.conversions,
            control.impressions,
            variant.conversions,
            variant.impressions,
            config,
        )?;
        let improvement = relative_improvement(
            control.revenue_per_visitor,
            variant.revenue_per_visitor,
        )?;
        let estimated_revenue_lift = (variant.revenue_per_visitor
            - control.revenue_per_visitor)
            * variant.impressions as f64;

        tracing::debug!(
            "Variant {}: rpv improvement {:.2}%, p-value {:.4}",
            variant.id,
            improvement,
            significance.p_value
        );

        outcomes.push(VariantOutcome {
            variant_id: variant.id.clone(),
            variant_name: variant.name.clone(),
            significance,
            improvement,
            estimated_revenue_lift,
        });
    }

    // Primary variant: largest improvement, first wins ties
    let mut best = 0;
    for (index, outcome) in outcomes.iter().enumerate() {
        if outcome.improvement > outcomes[best].improvement {
            best = index;
        }
    }
    let primary = outcomes[best].clone();

    let winner = if primary.significance.is_significant && primary.improvement > 0.0 {
        Some(primary.variant_id.clone())
    } else {
        None
    };
    let confidence = (1.0 - primary.significance.p_value) * 100.0;

    let recommendations =
        generate_recommendations(&primary.significance, primary.improvement, control, variants);

    Ok(ExperimentAssessment {
        control_id: control.id.clone(),
        outcomes,
        significance: primary.significance,
        improvement: primary.improvement,
        estimated_revenue_lift: primary.estimated_revenue_lift,
        confidence,
        winner,
        recommendations,
    })
}
