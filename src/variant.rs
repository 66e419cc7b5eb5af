// Aggregate metrics for one experiment arm
//
// Counters are trusted as reported by the collection pipeline; this type
// only derives the per-visitor rates from them. Rates are percentages
// except avg_order_value and revenue_per_visitor, which are currency.

use serde::{Deserialize, Serialize};

/// Aggregate metrics for a single experiment arm (control or treatment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestVariant {
    /// Stable identifier, unique within the experiment
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional free-form note about what the arm changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Times the arm was shown
    pub impressions: u64,
    /// Clicks attributed to the arm
    pub clicks: u64,
    /// Conversions attributed to the arm
    pub conversions: u64,
    /// Revenue attributed to the arm
    pub revenue: f64,

    /// Click-through rate, percent (clicks per impression)
    pub ctr: f64,
    /// Conversion rate, percent (conversions per click)
    pub conversion_rate: f64,
    /// Average order value (revenue per conversion)
    pub avg_order_value: f64,
    /// Revenue per visitor (revenue per impression)
    pub revenue_per_visitor: f64,
}

impl TestVariant {
    /// Build a variant from raw counters, deriving the four rate fields
    ///
    /// Each rate falls back to 0.0 when its denominator is zero, so a
    /// freshly launched arm with no traffic is representable without
    /// producing NaN downstream.
    pub fn from_counts(
        id: impl Into<String>,
        name: impl Into<String>,
        impressions: u64,
        clicks: u64,
        conversions: u64,
        revenue: f64,
    ) -> Self {
        let ctr = if impressions > 0 {
            clicks as f64 / impressions as f64 * 100.0
        } else {
            0.0
        };
        let conversion_rate = if clicks > 0 {
            conversions as f64 / clicks as f64 * 100.0
        } else {
            0.0
        };
        let avg_order_value = if conversions > 0 {
            revenue / conversions as f64
        } else {
            0.0
        };
        let revenue_per_visitor = if impressions > 0 {
            revenue / impressions as f64
        } else {
            0.0
        };

        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            impressions,
            clicks,
            conversions,
            revenue,
            ctr,
            conversion_rate,
            avg_order_value,
            revenue_per_visitor,
        }
    }

    /// Conversions per impression as a proportion in `[0, 1]`
    ///
    /// This is the rate the significance test operates on, as opposed to
    /// `conversion_rate`, which is per click and in percent.
    pub fn conversion_proportion(&self) -> f64 {
        if self.impressions > 0 {
            self.conversions as f64 / self.impressions as f64
        } else {
            0.0
        }
    }
}
