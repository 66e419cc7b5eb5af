//! Rule-based next-action recommendations
//!
//! Translates a statistical verdict plus raw metric deltas into a
//! prioritized action list. One headline recommendation comes from a
//! mutually exclusive cascade (implement / continue / stop); independent
//! per-variant rules then scan for CTR and AOV follow-ups. The list is
//! sorted by priority, ties keeping insertion order.

use crate::significance::StatisticalSignificance;
use crate::variant::TestVariant;
use serde::{Deserialize, Serialize};

/// CTR lift ratio above which the conversion-funnel rule fires (10%)
const CTR_LIFT_THRESHOLD: f64 = 1.1;

/// AOV lift ratio above which the order-value rule fires (15%)
const AOV_LIFT_THRESHOLD: f64 = 1.15;

/// Category of action a recommendation proposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Ship the variant
    Implement,
    /// Keep collecting data
    Continue,
    /// End the experiment and keep control
    Stop,
    /// Investigate and run a follow-up test
    Iterate,
}

/// Urgency bucket for sorting recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ordinal weight used for sorting (high=3, medium=2, low=1)
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Lowercase label for report rendering
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// One suggested next step with its expected impact and effort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Expected upside on a 0-10 scale
    pub impact: f64,
    /// Implementation cost on a 0-10 scale
    pub effort: f64,
    /// Concrete steps, in suggested order
    pub actions: Vec<String>,
}

/// Generate the prioritized recommendation list for one experiment readout
///
/// `improvement` is the headline relative lift in percent (revenue per
/// visitor in the orchestrated flow). The headline cascade fires at most
/// one of implement/continue/stop; the per-variant CTR and AOV rules are
/// appended independently for every variant that clears its threshold.
pub fn generate_recommendations(
    significance: &StatisticalSignificance,
    improvement: f64,
    control: &TestVariant,
    variants: &[TestVariant],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if significance.is_significant && improvement > 0.0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Implement,
            title: "Implement winning variant".to_string(),
            description: format!(
                "The variant shows a {improvement:.1}% improvement with statistical \
                 significance (p={:.4}).",
                significance.p_value
            ),
            priority: Priority::High,
            impact: (improvement / 10.0).min(10.0),
            effort: 3.0,
            actions: vec![
                "Review the variant's technical implementation".to_string(),
                "Prepare a gradual rollout plan".to_string(),
                "Set up post-launch monitoring metrics".to_string(),
                "Document learnings and best practices".to_string(),
            ],
        });
    } else if let (false, Some(days)) =
        (significance.is_significant, significance.days_to_significance)
    {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Continue,
            title: "Continue test until significance".to_string(),
            description: format!(
                "The test needs approximately {days:.0} more days to reach statistical \
                 significance."
            ),
            priority: Priority::Medium,
            impact: 6.0,
            effort: 2.0,
            actions: vec![
                format!("Keep the test running for {days:.0} more days"),
                "Monitor metrics daily".to_string(),
                "Check for external changes that could skew the results".to_string(),
                "Review whether the sample size is sufficient".to_string(),
            ],
        });
    } else if improvement < 0.0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Stop,
            title: "Stop test and keep control".to_string(),
            description: format!(
                "The variant shows a {:.1}% drop in performance. Keeping the current \
                 version is recommended.",
                improvement.abs()
            ),
            priority: Priority::High,
            impact: 8.0,
            effort: 1.0,
            actions: vec![
                "Stop the test immediately".to_string(),
                "Analyze why the variant underperformed".to_string(),
                "Document learnings for future iterations".to_string(),
                "Consider new hypotheses based on the results".to_string(),
            ],
        });
    }

    for variant in variants {
        if variant.ctr > control.ctr * CTR_LIFT_THRESHOLD {
            let ctr_lift = (variant.ctr / control.ctr - 1.0) * 100.0;
            recommendations.push(Recommendation {
                kind: RecommendationKind::Iterate,
                title: "Optimize conversion rate".to_string(),
                description: format!(
                    "CTR improved {ctr_lift:.1}% but conversion rate did not follow the \
                     same trend."
                ),
                priority: Priority::Medium,
                impact: 7.0,
                effort: 5.0,
                actions: vec![
                    "Analyze the full conversion funnel".to_string(),
                    "Identify post-click friction points".to_string(),
                    "Optimize the landing page for consistency".to_string(),
                    "Run follow-up tests on later funnel steps".to_string(),
                ],
            });
        }

        if variant.avg_order_value > control.avg_order_value * AOV_LIFT_THRESHOLD {
            let aov_lift = (variant.avg_order_value / control.avg_order_value - 1.0) * 100.0;
            recommendations.push(Recommendation {
                kind: RecommendationKind::Implement,
                title: "Capitalize on higher average order value".to_string(),
                description: format!(
                    "Average order value increased {aov_lift:.1}%. Strong opportunity to \
                     grow revenue."
                ),
                priority: Priority::High,
                impact: 9.0,
                effort: 4.0,
                actions: vec![
                    "Implement the elements that lifted AOV".to_string(),
                    "Apply the learnings to other products and categories".to_string(),
                    "Consider upsell and cross-sell strategies".to_string(),
                    "Monitor the impact on customer lifetime value".to_string(),
                ],
            });
        }
    }

    // Stable sort keeps insertion order within each priority bucket
    recommendations.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
    recommendations
}
