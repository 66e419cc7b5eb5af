#![no_main]

use libfuzzer_sys::fuzz_target;
use veredicto::{compute_significance, AnalysisConfig};

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }

    let mut words = data
        .chunks_exact(8)
        .map(|chunk| u64::from_le_bytes(chunk.try_into().unwrap()));
    let a = words.next().unwrap();
    let b = words.next().unwrap();
    let c = words.next().unwrap();
    let d = words.next().unwrap();

    let config = AnalysisConfig::default();

    // Arbitrary counters, including ones violating the documented
    // conversions <= sample contract: must never panic
    let _ = compute_significance(a, b, c, d, &config);

    // Counters inside the contract: the call returns a typed error or a
    // result with finite statistics
    let control_sample = b % 1_000_000 + 1;
    let variant_sample = d % 1_000_000 + 1;
    let control_conversions = a % (control_sample + 1);
    let variant_conversions = c % (variant_sample + 1);

    if let Ok(result) = compute_significance(
        control_conversions,
        control_sample,
        variant_conversions,
        variant_sample,
        &config,
    ) {
        assert!(result.p_value.is_finite());
        assert!(result.minimum_detectable_effect.is_finite());
        if let Some(days) = result.days_to_significance {
            assert!(days.is_finite());
            assert!(days >= config.assumed_elapsed_days);
        }
    }
});
