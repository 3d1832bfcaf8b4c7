use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::ProductCatalog;
use crate::config::AnalyticsConfig;
use crate::data::aggregate::{aggregate, AggregatedPoint, Granularity};
use crate::data::cache::SeriesCache;
use crate::data::datasets::{DailySeries, FootfallPoint, RevenuePoint};
use crate::data::generator::{generate_daily_series, Season};
use crate::jitter::{Jitter, SeededJitter};
use crate::metrics::forecast::{forecast_buckets, ForecastPoint};
use crate::metrics::origin::{origin_breakdown, OriginRegion};
use crate::metrics::products::{top_products, TopProductShare};
use crate::metrics::ratings::{ratings_summary, RatingsSummary, DEFAULT_DISTRIBUTION};
use crate::metrics::totals::{compute_totals, Totals};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub end_date: NaiveDate,
    pub days: usize,
    pub granularity: Granularity,
    pub conversion_rate: f64,
    pub season: Season,
    pub forecast: bool,
    pub rating_weeks: usize,
}

impl ReportRequest {
    /// `today` is used when the config does not pin an end date.
    pub fn from_config(config: &AnalyticsConfig, today: NaiveDate) -> Self {
        Self {
            end_date: config.end_date.unwrap_or(today),
            days: config.clamped_days(),
            granularity: config.granularity,
            conversion_rate: config.conversion_rate,
            season: config.season(),
            forecast: config.forecast,
            rating_weeks: config.rating_weeks,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub end_date: NaiveDate,
    pub days: usize,
    pub granularity: Granularity,
    pub footfall: Vec<AggregatedPoint<FootfallPoint>>,
    pub revenue: Vec<AggregatedPoint<RevenuePoint>>,
    pub totals: Totals,
    pub top_products: Vec<TopProductShare>,
    pub origins: Vec<OriginRegion>,
    pub ratings: RatingsSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Vec<ForecastPoint>>,
}

/// Derives every dashboard metric from an already generated series.
pub fn build_report<C, J>(
    request: &ReportRequest,
    series: &DailySeries,
    catalog: &C,
    jitter: &mut J,
) -> DashboardReport
where
    C: ProductCatalog + ?Sized,
    J: Jitter,
{
    let footfall = aggregate(&series.footfall(), request.granularity);
    let revenue = aggregate(&series.revenue(), request.granularity);
    let totals = compute_totals(
        footfall.iter().map(|bucket| &bucket.point),
        revenue.iter().map(|bucket| &bucket.point),
        request.conversion_rate,
    );
    let top_products = top_products(catalog, jitter);
    let origins = origin_breakdown(&totals);
    let ratings = ratings_summary(&DEFAULT_DISTRIBUTION, request.rating_weeks);
    let forecast = match (request.forecast, series.last_date()) {
        (false, _) => None,
        (true, None) => Some(Vec::new()),
        (true, Some(last_date)) => Some(forecast_buckets(
            &revenue,
            last_date,
            request.granularity,
            jitter,
        )),
    };

    info!(
        days = series.len(),
        buckets = footfall.len(),
        granularity = request.granularity.as_str(),
        visitors = totals.visitors,
        revenue = totals.revenue,
        "built dashboard report"
    );

    DashboardReport {
        end_date: request.end_date,
        days: series.len(),
        granularity: request.granularity,
        footfall,
        revenue,
        totals,
        top_products,
        origins,
        ratings,
        forecast,
    }
}

/// Generates the series and the report from one jitter stream.
pub fn generate_report<C, J>(
    request: &ReportRequest,
    catalog: &C,
    jitter: &mut J,
) -> (DailySeries, DashboardReport)
where
    C: ProductCatalog + ?Sized,
    J: Jitter,
{
    let series = generate_daily_series(request.end_date, request.days, &request.season, jitter);
    let report = build_report(request, &series, catalog, jitter);
    (series, report)
}

/// Serves reports from a series cache, so re-grouping or re-running the same
/// seeded window reuses one generated series.
#[derive(Debug, Default)]
pub struct Dashboard {
    cache: SeriesCache,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_series(&self) -> usize {
        self.cache.len()
    }

    pub fn series(&mut self, request: &ReportRequest, seed: u64) -> Arc<DailySeries> {
        self.cache
            .get_or_generate(request.end_date, request.days, &request.season, Some(seed))
    }

    /// Derived metrics draw from their own stream seeded with `seed`, so the
    /// same request and seed always produce the same report.
    pub fn report<C>(
        &mut self,
        request: &ReportRequest,
        seed: u64,
        catalog: &C,
    ) -> (Arc<DailySeries>, DashboardReport)
    where
        C: ProductCatalog + ?Sized,
    {
        let series = self.series(request, seed);
        let mut jitter = SeededJitter::from_seed(seed);
        let report = build_report(request, &series, catalog, &mut jitter);
        (series, report)
    }
}
