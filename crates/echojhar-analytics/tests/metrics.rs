use chrono::NaiveDate;
use echojhar_analytics::catalog::Product;
use echojhar_analytics::data::generator::{generate_daily_series, Season};
use echojhar_analytics::jitter::{MidpointJitter, SeededJitter};
use echojhar_analytics::metrics::origin::{origin_breakdown, OriginRegion, TOP_REGION_LIMIT};
use echojhar_analytics::metrics::products::{top_products, TOP_PRODUCT_LIMIT};
use echojhar_analytics::metrics::ratings::{
    ratings_summary, weighted_average, RatingBucket, DEFAULT_DISTRIBUTION,
};
use echojhar_analytics::metrics::totals::{compute_totals, Totals, DEFAULT_CONVERSION_RATE};

fn october_totals() -> Totals {
    let series = generate_daily_series(
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"),
        7,
        &Season::default(),
        &mut MidpointJitter,
    );
    compute_totals(
        &series.footfall(),
        &series.revenue(),
        DEFAULT_CONVERSION_RATE,
    )
}

#[test]
fn totals_for_fixture_week() {
    let totals = october_totals();
    assert_eq!(totals.local, 951);
    assert_eq!(totals.domestic, 759);
    assert_eq!(totals.international, 191);
    assert_eq!(totals.visitors, 1901);
    assert_eq!(totals.revenue, 664_879);
    assert_eq!(totals.converting_visitors, 1140);
    assert!((totals.average_order_value - 664_879.0 / 1140.0).abs() < 1e-9);
}

#[test]
fn totals_of_empty_series_are_zero() {
    let totals = compute_totals(std::iter::empty(), std::iter::empty(), DEFAULT_CONVERSION_RATE);
    assert_eq!(totals.visitors, 0);
    assert_eq!(totals.revenue, 0);
    assert_eq!(totals.converting_visitors, 1);
    assert_eq!(totals.average_order_value, 0.0);
}

#[test]
fn conversion_rate_is_configurable() {
    let series = generate_daily_series(
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"),
        7,
        &Season::default(),
        &mut MidpointJitter,
    );
    let totals = compute_totals(&series.footfall(), &series.revenue(), 0.5);
    assert_eq!(totals.converting_visitors, 950);
}

#[test]
fn origin_breakdown_for_fixture_week() {
    let regions = origin_breakdown(&october_totals());
    let expected = [
        ("Ranchi", 427),
        ("Jamshedpur", 237),
        ("West Bengal", 166),
        ("Dhanbad", 142),
        ("Rest of Jharkhand", 142),
        ("Bihar", 136),
        ("Odisha", 113),
    ];
    let expected: Vec<OriginRegion> = expected
        .iter()
        .map(|(region, count)| OriginRegion {
            region: (*region).to_string(),
            count: *count,
        })
        .collect();
    assert_eq!(regions, expected);
}

#[test]
fn origin_breakdown_never_exceeds_source_totals() {
    let totals = october_totals();
    let regions = origin_breakdown(&totals);
    assert!(regions.len() <= TOP_REGION_LIMIT);
    let sum: u64 = regions.iter().map(|r| r.count).sum();
    assert!(sum <= totals.visitors);
}

#[test]
fn origin_breakdown_of_zero_totals_is_empty() {
    assert!(origin_breakdown(&Totals::default()).is_empty());
}

#[test]
fn top_products_fall_back_to_seed_list() {
    let empty: Vec<Product> = Vec::new();
    let shares = top_products(&empty, &mut MidpointJitter);
    let pairs: Vec<(&str, u32)> = shares.iter().map(|s| (s.name.as_str(), s.value)).collect();
    assert_eq!(
        pairs,
        vec![
            ("Dokra Metal Craft", 35),
            ("Bamboo Basketry", 25),
            ("Sohrai Paintings", 20),
            ("Paitkar Scrolls", 12),
            ("Guided Heritage Walks", 8),
        ]
    );
}

#[test]
fn top_products_weight_catalog_by_price() {
    let catalog = vec![
        Product::new("Terracotta Lamp", 100.0),
        Product::new("Dokra Horse", 300.0),
    ];
    let shares = top_products(&catalog, &mut MidpointJitter);
    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].name, "Dokra Horse");
    assert_eq!(shares[0].value, 75);
    assert_eq!(shares[1].value, 25);
}

#[test]
fn top_products_cap_at_five_and_sum_to_hundred() {
    let catalog: Vec<Product> = (1..=9)
        .map(|i| Product::new(format!("item-{i}"), f64::from(i) * 17.5))
        .collect();
    let shares = top_products(&catalog, &mut SeededJitter::from_seed(5));
    assert_eq!(shares.len(), TOP_PRODUCT_LIMIT);
    assert_eq!(shares.iter().map(|s| s.value).sum::<u32>(), 100);
}

#[test]
fn products_without_usable_price_are_ignored() {
    let catalog = vec![
        Product::new("free sample", 0.0),
        Product::new("broken", f64::NAN),
        Product::new("Sohrai Panel", 450.0),
    ];
    let shares = top_products(&catalog, &mut MidpointJitter);
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].name, "Sohrai Panel");
    assert_eq!(shares[0].value, 100);
}

#[test]
fn ratings_average_is_count_weighted() {
    let average = weighted_average(&DEFAULT_DISTRIBUTION);
    assert!((average - 1141.0 / 262.0).abs() < 1e-12);

    let summary = ratings_summary(&DEFAULT_DISTRIBUTION, 8);
    assert_eq!(summary.total, 262);
    assert_eq!(summary.average, 4.35);
    assert_eq!(summary.trend.len(), 8);
    assert_eq!(summary.trend[0].label, "W1");
    assert_eq!(summary.trend[7].label, "W8");
    for point in &summary.trend {
        assert!(
            (point.average - average).abs() <= 0.1 + 0.005 + 1e-9,
            "{} drifted to {}",
            point.label,
            point.average
        );
    }
}

#[test]
fn ratings_trend_clamps_to_star_range() {
    let all_fives = [RatingBucket { stars: 5, count: 10 }];
    let summary = ratings_summary(&all_fives, 4);
    assert_eq!(summary.average, 5.0);
    assert!(summary.trend.iter().all(|p| p.average <= 5.0));
}

#[test]
fn ratings_without_votes_degenerate_to_zero() {
    let summary = ratings_summary(&[], 3);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.average, 0.0);
    assert!(summary.trend.iter().all(|p| p.average == 0.0));
}
