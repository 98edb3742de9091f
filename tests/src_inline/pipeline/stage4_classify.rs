use super::*;

#[test]
fn test_band_boundaries_are_inclusive() {
    assert_eq!(classify(0.90), Category::Exceeds);
    assert_eq!(classify(0.8999999), Category::Meets);
    assert_eq!(classify(0.60), Category::Meets);
    assert_eq!(classify(0.5999999), Category::Approaching);
    assert_eq!(classify(0.40), Category::Approaching);
    assert_eq!(classify(0.3999999), Category::WellBelow);
    assert_eq!(classify(0.0), Category::WellBelow);
}

#[test]
fn test_out_of_range_values_fall_in_natural_band() {
    assert_eq!(classify(1.7), Category::Exceeds);
    assert_eq!(classify(-0.2), Category::WellBelow);
    assert_eq!(classify(f64::INFINITY), Category::Exceeds);
    assert_eq!(classify(f64::NEG_INFINITY), Category::WellBelow);
    assert_eq!(classify(f64::NAN), Category::WellBelow);
}

#[test]
fn test_bands_are_monotonic_over_a_sweep() {
    let mut prev = classify(-1.0);
    for step in 0..=300 {
        let v = -1.0 + step as f64 * 0.01;
        let cat = classify(v);
        // categories never move back toward a lower band as the mean grows
        assert!(cat <= prev, "{v} -> {cat:?} after {prev:?}");
        prev = cat;
    }
}

#[test]
fn test_custom_thresholds() {
    let strict = MasteryThresholds {
        exceeds_min: 0.95,
        meets_min: 0.75,
        approaching_min: 0.50,
    };
    assert_eq!(classify_with(0.92, &strict), Category::Meets);
    assert_eq!(classify_with(0.45, &strict), Category::WellBelow);
}

#[test]
fn test_mean_of_empty_is_zero() {
    assert_eq!(mean(&[]), 0.0);
    assert!((mean(&[0.95, 0.50]) - 0.725).abs() < 1e-12);
}

#[test]
fn test_run_stage4_classifies_each_student() {
    let mut scores = StudentScores::new();
    scores.insert(EntityId::new("s1").unwrap(), vec![0.95, 0.50]);
    scores.insert(EntityId::new("s2").unwrap(), vec![0.30]);
    scores.insert(EntityId::new("s3").unwrap(), vec![]);
    let out = run_stage4(&scores);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].category, Category::Meets);
    assert_eq!(out[1].category, Category::WellBelow);
    assert_eq!(out[2].category, Category::WellBelow);
    assert_eq!(out[2].n_scores, 0);
    assert_eq!(out[2].mean, 0.0);
}
