use eda_charts::models::FeatureFrame;
use eda_charts::stats::{box_summary, grouped_summary, kde_curve, silverman_bandwidth};

fn frame() -> FeatureFrame {
    let mut f = FeatureFrame::new();
    f.push_numeric(
        "v",
        vec![1.0, 2.0, 3.0, 4.0, 10.0, 20.0, f64::NAN, 30.0],
    )
    .unwrap();
    f.push_labels(
        "g",
        vec![
            "low".into(),
            "low".into(),
            "low".into(),
            "low".into(),
            "high".into(),
            "high".into(),
            "high".into(),
            "high".into(),
        ],
    )
    .unwrap();
    f
}

#[test]
fn box_summary_quartiles_and_whiskers() {
    let values: Vec<f64> = (1..=9).map(f64::from).collect();
    let s = box_summary(&values).unwrap();
    assert_eq!(s.q1, 3.0);
    assert_eq!(s.median, 5.0);
    assert_eq!(s.q3, 7.0);
    assert_eq!(s.lower_whisker, 1.0);
    assert_eq!(s.upper_whisker, 9.0);
    assert!(s.outliers.is_empty());
}

#[test]
fn box_summary_puts_extremes_in_outliers() {
    let mut values: Vec<f64> = (1..=9).map(f64::from).collect();
    values.push(100.0);
    let s = box_summary(&values).unwrap();
    assert_eq!(s.upper_whisker, 9.0);
    assert_eq!(s.outliers, vec![100.0]);
    assert_eq!(s.max(), 100.0);
    assert_eq!(s.min(), 1.0);
}

#[test]
fn grouped_summary_counts_and_missing() {
    let summaries = grouped_summary(&frame(), "v", "g").unwrap();
    // sorted by group name
    assert_eq!(summaries[0].group, "high");
    assert_eq!(summaries[1].group, "low");

    let high = &summaries[0];
    assert_eq!(high.count, 3);
    assert_eq!(high.missing, 1);
    assert_eq!(high.min, Some(10.0));
    assert_eq!(high.max, Some(30.0));
    assert_eq!(high.mean, Some(20.0));
    assert_eq!(high.median, Some(20.0));

    let low = &summaries[1];
    assert_eq!(low.count, 4);
    assert_eq!(low.missing, 0);
    assert_eq!(low.median, Some(2.5));
}

#[test]
fn grouped_summary_unknown_column_is_error() {
    assert!(grouped_summary(&frame(), "w", "g").is_err());
    assert!(grouped_summary(&frame(), "v", "h").is_err());
}

#[test]
fn silverman_bandwidth_tracks_spread() {
    let narrow = silverman_bandwidth(&[1.0, 1.1, 0.9, 1.05, 0.95]);
    let wide = silverman_bandwidth(&[1.0, 11.0, -9.0, 6.0, -4.0]);
    assert!(narrow > 0.0);
    assert!(wide > narrow);
}

#[test]
fn kde_curve_is_a_normalized_density() {
    let values = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5];
    let curve = kde_curve(&values, 1.0, 500, -6.0, 10.0);
    assert_eq!(curve.len(), 500);
    assert!(curve.iter().all(|(_, d)| *d >= 0.0));

    let step = curve[1].0 - curve[0].0;
    let mass: f64 = curve.iter().map(|(_, d)| d * step).sum();
    assert!((mass - 1.0).abs() < 0.02, "mass = {mass}");

    // independently normalized: more observations do not grow the mass
    let many: Vec<f64> = (0..80).map(|i| (i % 8) as f64 * 0.5).collect();
    let curve_many = kde_curve(&many, 1.0, 500, -6.0, 10.0);
    let mass_many: f64 = curve_many.iter().map(|(_, d)| d * step).sum();
    assert!((mass_many - 1.0).abs() < 0.02, "mass = {mass_many}");
}

#[test]
fn kde_curve_handles_tiny_input() {
    assert!(kde_curve(&[], 0.2, 100, 0.0, 1.0).is_empty());
    // a constant sample still yields a finite, narrow spike
    let curve = kde_curve(&[2.0, 2.0, 2.0], 0.2, 100, 1.0, 3.0);
    assert!(curve.iter().all(|(_, d)| d.is_finite()));
    let peak = curve
        .iter()
        .cloned()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .unwrap();
    assert!((peak.0 - 2.0).abs() < 0.05);
}
