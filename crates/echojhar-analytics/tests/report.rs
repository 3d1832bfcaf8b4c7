use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use echojhar_analytics::catalog::Product;
use echojhar_analytics::config::AnalyticsConfig;
use echojhar_analytics::data::aggregate::Granularity;
use echojhar_analytics::jitter::{MidpointJitter, SeededJitter};
use echojhar_analytics::metrics::forecast::FORECAST_DAYS;
use echojhar_analytics::report::{generate_report, Dashboard, ReportRequest};
use echojhar_analytics::results::series_digest;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

#[test]
fn request_uses_today_unless_config_pins_end_date() {
    let config = AnalyticsConfig::default();
    let request = ReportRequest::from_config(&config, today());
    assert_eq!(request.end_date, today());
    assert_eq!(request.days, 30);

    let pinned = AnalyticsConfig {
        end_date: NaiveDate::from_ymd_opt(2026, 3, 8),
        days: -1,
        ..AnalyticsConfig::default()
    };
    let request = ReportRequest::from_config(&pinned, today());
    assert_eq!(request.end_date, NaiveDate::from_ymd_opt(2026, 3, 8).expect("date"));
    assert_eq!(request.days, 0);
}

#[test]
fn weekly_report_over_fixture_week() {
    let config = AnalyticsConfig {
        days: 7,
        granularity: Granularity::Week,
        ..AnalyticsConfig::default()
    };
    let request = ReportRequest::from_config(&config, today());
    let catalog: Vec<Product> = Vec::new();
    let (series, report) = generate_report(&request, &catalog, &mut MidpointJitter);

    assert_eq!(series.len(), 7);
    assert_eq!(report.days, 7);
    assert_eq!(report.footfall.len(), 2);
    assert_eq!(report.revenue.len(), 2);
    assert_eq!(report.totals.visitors, 1901);
    assert_eq!(report.totals.revenue, 664_879);
    assert_eq!(report.top_products.len(), 5);
    assert_eq!(report.origins.len(), 7);
    assert_eq!(report.ratings.trend.len(), 8);

    let forecast = report.forecast.as_ref().expect("forecast enabled by default");
    assert_eq!(forecast.iter().filter(|p| p.is_future()).count(), FORECAST_DAYS);
}

#[test]
fn weekly_forecast_actuals_line_up_with_revenue_buckets() {
    let config = AnalyticsConfig {
        days: 60,
        granularity: Granularity::Week,
        ..AnalyticsConfig::default()
    };
    let request = ReportRequest::from_config(&config, today());
    let (_, report) =
        generate_report(&request, &Vec::<Product>::new(), &mut SeededJitter::from_seed(5));

    let bucket_labels: HashSet<&str> = report.revenue.iter().map(|b| b.label.as_str()).collect();
    let forecast = report.forecast.as_ref().expect("forecast enabled by default");
    let actual: Vec<_> = forecast.iter().filter(|p| p.actual.is_some()).collect();

    assert_eq!(actual.len(), report.revenue.len());
    assert!(actual.iter().all(|p| bucket_labels.contains(p.label.as_str())));
    for (point, bucket) in actual.iter().zip(&report.revenue) {
        assert_eq!(point.actual, Some(bucket.point.revenue as f64));
    }

    let future: Vec<_> = forecast.iter().filter(|p| p.is_future()).collect();
    assert_eq!(future.len(), FORECAST_DAYS);
    assert!(future.iter().all(|p| !bucket_labels.contains(p.label.as_str())));
    assert_eq!(future[0].label, "2026-W44");
}

#[test]
fn dashboard_reuses_one_series_across_granularities() {
    let config = AnalyticsConfig {
        days: 45,
        ..AnalyticsConfig::default()
    };
    let daily = ReportRequest::from_config(&config, today());
    let monthly = ReportRequest {
        granularity: Granularity::Month,
        ..daily.clone()
    };
    let catalog: Vec<Product> = Vec::new();
    let mut dashboard = Dashboard::new();

    let (day_series, day_report) = dashboard.report(&daily, 11, &catalog);
    let (month_series, month_report) = dashboard.report(&monthly, 11, &catalog);

    assert!(Arc::ptr_eq(&day_series, &month_series));
    assert_eq!(dashboard.cached_series(), 1);
    assert_eq!(day_report.totals, month_report.totals);
    assert_eq!(month_report.revenue.len(), 2);
    assert_eq!(
        month_report.forecast.as_ref().expect("forecast")[0].label,
        "Sep 2026"
    );

    let (_, again) = dashboard.report(&daily, 11, &catalog);
    assert_eq!(again, day_report);

    dashboard.report(&daily, 12, &catalog);
    assert_eq!(dashboard.cached_series(), 2);
}

#[test]
fn forecast_opt_out_omits_forecast() {
    let config = AnalyticsConfig {
        days: 14,
        forecast: false,
        ..AnalyticsConfig::default()
    };
    let request = ReportRequest::from_config(&config, today());
    let (_, report) = generate_report(&request, &Vec::<Product>::new(), &mut SeededJitter::from_seed(1));
    assert!(report.forecast.is_none());

    let json = serde_json::to_value(&report).expect("serialize report");
    assert!(json.get("forecast").is_none());
    assert!(json["footfall"][0].get("label").is_some());
    assert!(json["footfall"][0].get("local").is_some());
}

#[test]
fn zero_day_report_degenerates_gracefully() {
    let config = AnalyticsConfig {
        days: 0,
        ..AnalyticsConfig::default()
    };
    let request = ReportRequest::from_config(&config, today());
    let (series, report) =
        generate_report(&request, &Vec::<Product>::new(), &mut SeededJitter::from_seed(1));
    assert!(series.is_empty());
    assert!(report.footfall.is_empty());
    assert_eq!(report.totals.revenue, 0);
    assert!(report.origins.is_empty());
    assert_eq!(report.forecast, Some(Vec::new()));
}

#[test]
fn series_digest_tracks_seed() {
    let config = AnalyticsConfig {
        days: 21,
        ..AnalyticsConfig::default()
    };
    let request = ReportRequest::from_config(&config, today());
    let catalog: Vec<Product> = Vec::new();
    let (a, _) = generate_report(&request, &catalog, &mut SeededJitter::from_seed(42));
    let (b, _) = generate_report(&request, &catalog, &mut SeededJitter::from_seed(42));
    let (c, _) = generate_report(&request, &catalog, &mut SeededJitter::from_seed(43));

    let digest_a = series_digest(&a).expect("digest");
    assert_eq!(digest_a.len(), 64);
    assert_eq!(digest_a, series_digest(&b).expect("digest"));
    assert_ne!(digest_a, series_digest(&c).expect("digest"));
}
