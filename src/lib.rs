//! Veredicto - statistical significance and recommendation engine for A/B experiments
//!
//! Given aggregate metrics for a control arm and one or more treatment
//! variants, this library answers three questions: is the observed
//! difference in conversion statistically reliable (pooled two-proportion
//! z-test), how much longer should a pending experiment run, and what
//! should the team do next (rule-based, prioritized recommendations).
//!
//! The engine is stateless and synchronous; all outputs are plain
//! serializable records.
//!
//! # Example
//! ```
//! use veredicto::{assess_experiment, AnalysisConfig, TestVariant};
//!
//! let control = TestVariant::from_counts("control", "Control", 15420, 1234, 185, 27750.0);
//! let variant = TestVariant::from_counts("variant-b", "Variant B", 15680, 1568, 251, 40160.0);
//!
//! let assessment = assess_experiment(&control, &[variant], &AnalysisConfig::default())?;
//! assert!(assessment.significance.is_significant);
//! println!("{}", assessment.to_report_string());
//! # Ok::<(), veredicto::EngineError>(())
//! ```

pub mod assessment;
pub mod comparison;
pub mod config;
pub mod error;
pub mod normal;
pub mod recommendation;
pub mod significance;
pub mod variant;

pub use assessment::{assess_experiment, ExperimentAssessment, VariantOutcome};
pub use comparison::{compare_metric, relative_improvement, MetricComparison};
pub use config::AnalysisConfig;
pub use error::{EngineError, Result};
pub use normal::{inverse_normal_cdf, normal_cdf};
pub use recommendation::{
    generate_recommendations, Priority, Recommendation, RecommendationKind,
};
pub use significance::{
    compute_significance, lift_interval, required_sample_size, ConfidenceInterval,
    StatisticalSignificance,
};
pub use variant::TestVariant;
