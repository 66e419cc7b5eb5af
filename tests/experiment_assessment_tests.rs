//! End-to-end tests for the experiment assessment flow
//!
//! Drives the public API the way a dashboard backend would: build variants
//! from raw counters, run the full assessment, and check the verdict, the
//! recommendation cascade, the report rendering, and the JSON contract.

use veredicto::{
    assess_experiment, compute_significance, lift_interval, required_sample_size,
    AnalysisConfig, EngineError, RecommendationKind, TestVariant,
};

fn reference_control() -> TestVariant {
    TestVariant::from_counts("control", "Control", 15420, 1234, 185, 27750.0)
}

fn reference_variant() -> TestVariant {
    TestVariant::from_counts("variant-b", "Variant B", 15680, 1568, 251, 40160.0)
}

#[test]
fn test_winning_experiment_end_to_end() {
    let config = AnalysisConfig::default();
    let assessment =
        assess_experiment(&reference_control(), &[reference_variant()], &config).unwrap();

    // Verdict
    assert_eq!(assessment.winner.as_deref(), Some("variant-b"));
    assert!(assessment.significance.is_significant);
    assert!(assessment.significance.p_value < 0.01);
    assert!((assessment.significance.p_value - 0.00263).abs() < 1e-4);
    assert_eq!(assessment.significance.sample_size, 31100);
    assert!(assessment.significance.days_to_significance.is_none());

    // Headline numbers
    assert!((assessment.improvement - 42.32).abs() < 0.01);
    assert!((assessment.estimated_revenue_lift - 11942.10).abs() < 0.01);
    assert!((assessment.confidence - 99.74).abs() < 0.01);

    // Recommendations: implement headline first, CTR follow-up after
    assert_eq!(assessment.recommendations.len(), 2);
    let implement = &assessment.recommendations[0];
    assert_eq!(implement.kind, RecommendationKind::Implement);
    assert!(implement.description.contains("42.3%"));
    assert!(implement.description.contains("p=0.0026"));
    assert_eq!(implement.actions.len(), 4);
    assert_eq!(assessment.recommendations[1].kind, RecommendationKind::Iterate);
}

#[test]
fn test_pending_experiment_end_to_end() {
    let config = AnalysisConfig::default();
    let control = TestVariant::from_counts("control", "Control", 10000, 800, 470, 47000.0);
    let variant = TestVariant::from_counts("variant-b", "Variant B", 10000, 820, 522, 52000.0);
    let assessment = assess_experiment(&control, &[variant], &config).unwrap();

    assert!(assessment.winner.is_none());
    assert!(!assessment.significance.is_significant);
    assert_eq!(assessment.significance.days_to_significance, Some(9.0));

    assert_eq!(assessment.recommendations.len(), 1);
    let rec = &assessment.recommendations[0];
    assert_eq!(rec.kind, RecommendationKind::Continue);
    assert!(rec.description.contains("9 more days"));
}

#[test]
fn test_losing_experiment_end_to_end() {
    // Reference arms swapped: the variant significantly underperforms
    let config = AnalysisConfig::default();
    let control = TestVariant::from_counts("control", "Control", 15680, 1568, 251, 40160.0);
    let variant = TestVariant::from_counts("variant-b", "Variant B", 15420, 1234, 185, 27750.0);
    let assessment = assess_experiment(&control, &[variant], &config).unwrap();

    assert!(assessment.winner.is_none());
    assert!(assessment.significance.is_significant);
    assert!((assessment.improvement + 29.74).abs() < 0.01);
    assert!((assessment.estimated_revenue_lift + 11744.08).abs() < 0.01);

    assert_eq!(assessment.recommendations.len(), 1);
    let rec = &assessment.recommendations[0];
    assert_eq!(rec.kind, RecommendationKind::Stop);
    assert!(rec.description.contains("29.7%"));
}

#[test]
fn test_three_arm_experiment_picks_best_variant() {
    let config = AnalysisConfig::default();
    let third = TestVariant::from_counts("variant-d", "Variant D", 12000, 950, 160, 30000.0);
    let assessment = assess_experiment(
        &reference_control(),
        &[third, reference_variant()],
        &config,
    )
    .unwrap();

    // variant-d lifts rpv by 38.9% but variant-b's 42.3% takes the headline
    assert_eq!(assessment.outcomes.len(), 2);
    assert_eq!(assessment.outcomes[0].variant_id, "variant-d");
    assert_eq!(assessment.outcomes[1].variant_id, "variant-b");
    assert_eq!(assessment.winner.as_deref(), Some("variant-b"));
    assert!((assessment.improvement - 42.32).abs() < 0.01);

    // variant-d's 187.50 AOV (vs 150.00 control) triggers the AOV rule,
    // variant-b's 10% CTR triggers the funnel rule
    assert_eq!(assessment.recommendations.len(), 3);
    assert_eq!(assessment.recommendations[0].kind, RecommendationKind::Implement);
    assert_eq!(assessment.recommendations[1].kind, RecommendationKind::Implement);
    assert_eq!(assessment.recommendations[2].kind, RecommendationKind::Iterate);
}

#[test]
fn test_strict_config_defers_marginal_experiment() {
    // p = 0.035: clears alpha at the default level, not at strict
    let default_result =
        compute_significance(470, 10000, 535, 10000, &AnalysisConfig::default()).unwrap();
    assert!(default_result.is_significant);

    let strict_result =
        compute_significance(470, 10000, 535, 10000, &AnalysisConfig::strict()).unwrap();
    assert!(!strict_result.is_significant);
    assert!(strict_result.days_to_significance.is_some());
}

#[test]
fn test_planning_helpers_agree_with_assessment() {
    // The lift interval for a significant result excludes zero
    let interval = lift_interval(185, 15420, 251, 15680, 0.95).unwrap();
    assert!(interval.lower > 0.0);

    // Planning a fresh test at a 5% baseline for a 10% relative lift
    let per_arm = required_sample_size(0.05, 0.10, 0.05, 0.80).unwrap();
    assert_eq!(per_arm, 31235);
}

#[test]
fn test_error_taxonomy() {
    let config = AnalysisConfig::default();

    let err = assess_experiment(&reference_control(), &[], &config).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput { .. }));

    let empty_arm = TestVariant::from_counts("variant-b", "Variant B", 0, 0, 0, 0.0);
    let err = assess_experiment(&reference_control(), &[empty_arm], &config).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput { .. }));

    let bad_config = AnalysisConfig {
        confidence_level: 0.0,
        ..AnalysisConfig::default()
    };
    let err =
        assess_experiment(&reference_control(), &[reference_variant()], &bad_config).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput { .. }));

    let err = veredicto::inverse_normal_cdf(1.0).unwrap_err();
    assert!(matches!(err, EngineError::Domain { .. }));
}

#[test]
fn test_json_contract() {
    let config = AnalysisConfig::default();
    let assessment =
        assess_experiment(&reference_control(), &[reference_variant()], &config).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&assessment).unwrap()).unwrap();

    assert_eq!(value["winner"], "variant-b");
    assert_eq!(value["control_id"], "control");
    assert_eq!(value["significance"]["is_significant"], true);
    // Significant result: the runtime estimate is omitted entirely
    assert!(value["significance"]
        .as_object()
        .unwrap()
        .get("days_to_significance")
        .is_none());
    assert_eq!(value["recommendations"][0]["kind"], "implement");
    assert_eq!(value["recommendations"][0]["priority"], "high");
    assert_eq!(value["outcomes"][0]["variant_id"], "variant-b");

    // The record round-trips losslessly
    let back: veredicto::ExperimentAssessment = serde_json::from_value(value).unwrap();
    assert_eq!(back, assessment);
}

#[test]
fn test_report_round_trip_reads_naturally() {
    let config = AnalysisConfig::default();
    let assessment =
        assess_experiment(&reference_control(), &[reference_variant()], &config).unwrap();
    let report = assessment.to_report_string();

    assert!(report.starts_with("✅ WINNER: variant-b"));
    assert!(report.contains("Sample size: 31100 (95% confidence level)"));
    assert!(report.contains("📊 Variants vs control:"));
    assert!(report.contains("💡 Recommendations (2):"));
}
