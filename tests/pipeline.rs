//! End-to-end pipeline tests: detector + attribution + report assembly

use chrono::NaiveDate;

use metric_shift::{
    assess_data_quality, build_driver_summary, AttributionEngine, CategoryKey, ChangeDetector,
    DimensionColumn, Granularity, MetricFrame, ReportBuilder,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

/// 28 days, three rows per day (one per region). In the current half the
/// "emea" region (and with it the "pro" plan) jumps from 100 to 160.
fn build_dataset() -> (MetricFrame, MetricFrame, MetricFrame) {
    let mut dates = Vec::new();
    let mut values = Vec::new();
    let mut regions = Vec::new();
    let mut plans = Vec::new();

    for d in 1..=28u32 {
        let emea = if d <= 14 { 100.0 } else { 160.0 };
        for (region, value) in [("emea", emea), ("amer", 80.0), ("apac", 60.0)] {
            dates.push(day(d));
            values.push(value);
            regions.push(region.to_string());
            plans.push(if region == "emea" { "pro" } else { "free" }.to_string());
        }
    }

    let dims = |lo: usize, hi: usize| {
        vec![
            DimensionColumn::categorical("region", regions[lo..hi].to_vec()),
            DimensionColumn::categorical("plan", plans[lo..hi].to_vec()),
        ]
    };

    let full = MetricFrame::new(dates.clone(), values.clone(), dims(0, 84)).unwrap();
    let previous = MetricFrame::new(dates[..42].to_vec(), values[..42].to_vec(), dims(0, 42)).unwrap();
    let current = MetricFrame::new(dates[42..].to_vec(), values[42..].to_vec(), dims(42, 84)).unwrap();
    (full, current, previous)
}

#[test]
fn full_pipeline_attributes_the_jump_to_emea() {
    let (full, current, previous) = build_dataset();

    let ctx = ChangeDetector::new().detect(&full, &current, &previous).unwrap();
    assert_eq!(ctx.previous_value, 80.0);
    assert_eq!(ctx.current_value, 100.0);
    assert_eq!(ctx.absolute_change, 20.0);
    assert_eq!(ctx.relative_change_pct, Some(25.0));
    assert!(ctx.any_change_detected);

    let drivers = AttributionEngine::new().calculate(&current, &previous, None);
    let names: Vec<&str> = drivers.iter().map(|d| d.dimension.as_str()).collect();
    assert_eq!(names, vec!["region", "plan"]);

    // Only the moved segments survive the share filter
    let region = &drivers[0];
    assert_eq!(region.num_drivers, 1);
    assert_eq!(region.drivers[0].category, CategoryKey::text("emea"));
    assert!(region.drivers[0].contrib_delta > 0.0);
    assert_eq!(region.top_positive.len(), 1);
    assert!(region.top_negative.is_empty());

    let plan = &drivers[1];
    assert_eq!(plan.num_drivers, 1);
    assert_eq!(plan.drivers[0].category, CategoryKey::text("pro"));

    let quality = assess_data_quality(&full, &current, &previous);
    assert_eq!(quality.completeness_score_avg, 1.0);
    assert!(!quality.anomalies_detected);

    let report = ReportBuilder::new()
        .with_company("Acme")
        .build(
            "revenue",
            Granularity::Week,
            &current,
            &previous,
            &ctx,
            &drivers,
            quality.to_value().unwrap(),
        );

    assert_eq!(report.meta.company, "Acme");
    assert_eq!(report.meta.comparison_type, "week_over_week");
    assert_eq!(report.period_comparison.direction, "up");
    assert_eq!(report.period_comparison.current_period.start, Some(day(15)));
    assert_eq!(report.period_comparison.current_period.end, Some(day(28)));
    assert_eq!(report.period_comparison.previous_period.rows, 42);
    assert!(report.period_comparison.summary.ends_with("in the target metric."));

    // Both dimensions surface the same underlying jump; input order breaks
    // the effect-score tie in the global list
    assert_eq!(report.drivers.by_dimension.len(), 2);
    assert_eq!(report.drivers.top_positive_overall.len(), 2);
    assert_eq!(report.drivers.top_positive_overall[0].dimension, "region");
    assert!(report.drivers.top_negative_overall.is_empty());
    assert_eq!(report.recommended_checks.len(), 3);

    let value = report.to_value().unwrap();
    assert_eq!(value["data_quality"]["completeness_score_avg"], 1.0);
    assert!(value["meta"]["generated_at"].as_str().unwrap().ends_with('Z'));
    assert_eq!(
        value["change_strength"]["level_change_label"],
        serde_json::to_value(ctx.level_change_label).unwrap()
    );
    // Flattened driver records keep their category alongside the dimension tag
    assert_eq!(value["drivers"]["top_positive_overall"][0]["category"], "emea");

    let rows = build_driver_summary(&report.drivers, 10);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].dimension, "region");
    assert_eq!(rows[0].direction, "up");
}

#[test]
fn flat_series_reports_no_meaningful_change() {
    let dates: Vec<NaiveDate> = (1..=28).map(day).collect();
    let values = vec![50.0; 28];
    let seg: Vec<String> = (0..28).map(|i| if i % 2 == 0 { "a" } else { "b" }.to_string()).collect();
    let dims = |lo: usize, hi: usize| {
        vec![DimensionColumn::categorical("seg", seg[lo..hi].to_vec())]
    };

    let full = MetricFrame::new(dates.clone(), values.clone(), dims(0, 28)).unwrap();
    let previous = MetricFrame::new(dates[..14].to_vec(), values[..14].to_vec(), dims(0, 14)).unwrap();
    let current = MetricFrame::new(dates[14..].to_vec(), values[14..].to_vec(), dims(14, 28)).unwrap();

    let ctx = ChangeDetector::new().detect(&full, &current, &previous).unwrap();
    assert!(!ctx.any_change_detected);
    assert!(!ctx.trustworthy);

    let drivers = AttributionEngine::new().calculate(&current, &previous, None);
    // Nothing moved: the dimension is reported with empty driver lists
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].num_drivers, 0);

    let quality = assess_data_quality(&full, &current, &previous);
    let report = ReportBuilder::new().build(
        "orders",
        Granularity::Day,
        &current,
        &previous,
        &ctx,
        &drivers,
        quality.to_value().unwrap(),
    );

    assert_eq!(
        report.period_comparison.summary,
        "No meaningful change detected in this period."
    );
    assert_eq!(report.period_comparison.direction, "flat");
    assert_eq!(
        report.change_trust.reliability_summary,
        "The detected change may be influenced by volatility or inconsistent trends."
    );
    assert!(report.drivers.top_positive_overall.is_empty());
    assert!(build_driver_summary(&report.drivers, 10).is_empty());
}

#[test]
fn detector_rejects_empty_periods_end_to_end() {
    let dates: Vec<NaiveDate> = (1..=5).map(day).collect();
    let full = MetricFrame::from_series(dates.clone(), vec![1.0; 5]).unwrap();
    let previous = MetricFrame::from_series(dates, vec![1.0; 5]).unwrap();
    let empty = MetricFrame::from_series(Vec::new(), Vec::new()).unwrap();

    let err = ChangeDetector::new().detect(&full, &empty, &previous).unwrap_err();
    assert!(matches!(err, metric_shift::Error::InvalidInput(_)));
}
