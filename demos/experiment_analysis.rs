//! Experiment analysis walkthrough
//!
//! Runs the full assessment flow over three experiment states (clear
//! winner, still collecting data, clear loser) and prints the reports,
//! the JSON payload a dashboard would consume, and the planning helpers.
//!
//! Run with: cargo run --example experiment_analysis
//! Set RUST_LOG=debug to see the per-variant evaluation trace.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use veredicto::{
    assess_experiment, compare_metric, lift_interval, required_sample_size, AnalysisConfig,
    TestVariant,
};

fn separator(title: &str) {
    println!("\n============================================================");
    println!("{title}");
    println!("============================================================\n");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AnalysisConfig::default();

    separator("Scenario 1: Clear winner");

    let control = TestVariant::from_counts("control", "Control", 15420, 1234, 185, 27750.0);
    let mut variant =
        TestVariant::from_counts("variant-b", "Variant B", 15680, 1568, 251, 40160.0);
    variant.description = Some("Simplified checkout with trust badges".to_string());

    let assessment = assess_experiment(&control, &[variant], &config)?;
    print!("{}", assessment.to_report_string());

    separator("Scenario 2: Still collecting data");

    let control = TestVariant::from_counts("control", "Control", 10000, 800, 470, 47000.0);
    let variant = TestVariant::from_counts("variant-b", "Variant B", 10000, 820, 522, 52000.0);

    let assessment = assess_experiment(&control, &[variant], &config)?;
    print!("{}", assessment.to_report_string());

    separator("Scenario 3: Variant loses to control");

    let control = TestVariant::from_counts("control", "Control", 15680, 1568, 251, 40160.0);
    let variant = TestVariant::from_counts("variant-b", "Variant B", 15420, 1234, 185, 27750.0);

    let assessment = assess_experiment(&control, &[variant], &config)?;
    print!("{}", assessment.to_report_string());

    separator("Dashboard payload (scenario 3, JSON)");

    println!("{}", serde_json::to_string_pretty(&assessment)?);

    separator("Per-metric readout (scenario 1 arms)");

    let control = TestVariant::from_counts("control", "Control", 15420, 1234, 185, 27750.0);
    let variant = TestVariant::from_counts("variant-b", "Variant B", 15680, 1568, 251, 40160.0);

    let conversion = compare_metric(
        control.conversion_proportion(),
        variant.conversion_proportion(),
        control.impressions,
        "conversion_rate",
    )?;
    println!(
        "conversion_rate: {:+.1}%  95% interval [{:.4}, {:.4}]  significant: {}",
        conversion.improvement,
        conversion.confidence_interval.lower,
        conversion.confidence_interval.upper,
        conversion.is_significant
    );

    // Currency metrics get the same readout, but the proportion-variance
    // interval is meaningless for them and comes back flagged
    let aov = compare_metric(
        control.avg_order_value,
        variant.avg_order_value,
        control.impressions,
        "avg_order_value",
    )?;
    println!(
        "avg_order_value: {:+.1}%  interval valid: {}",
        aov.improvement, aov.interval_valid
    );

    separator("Planning helpers");

    let interval = lift_interval(185, 15420, 251, 15680, 0.95)?;
    println!(
        "95% interval for the winning lift: [{:.4}, {:.4}] (absolute)",
        interval.lower, interval.upper
    );

    let per_arm = required_sample_size(0.05, 0.10, 0.05, 0.80)?;
    println!("Samples per arm to detect a 10% lift on a 5% baseline: {per_arm}");

    Ok(())
}
