use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::aggregate::{aggregate, AggregatedPoint, Granularity};
use crate::data::datasets::{DailySeries, RevenuePoint};
use crate::jitter::Jitter;

pub const HISTORY_WINDOW: usize = 30;
pub const FORECAST_DAYS: usize = 14;
const NEAR_TERM_DAYS: usize = 7;
const NEAR_TERM_UPLIFT: f64 = 1.05;
const LONG_TERM_UPLIFT: f64 = 1.15;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted: Option<f64>,
}

impl ForecastPoint {
    pub fn is_future(&self) -> bool {
        self.actual.is_none() && self.predicted.is_some()
    }
}

/// Projects `FORECAST_DAYS` buckets past `last_date` from the mean of the
/// trailing `HISTORY_WINDOW` history values. `history` holds bucket labels in
/// ascending order; future labels step forward by `granularity`.
pub fn forecast<J: Jitter>(
    history: &[(String, f64)],
    last_date: NaiveDate,
    granularity: Granularity,
    jitter: &mut J,
) -> Vec<ForecastPoint> {
    let Some((last_label, last_value)) = history.last() else {
        return Vec::new();
    };
    let window = &history[history.len().saturating_sub(HISTORY_WINDOW)..];
    let mean = window.iter().map(|(_, value)| value).sum::<f64>() / window.len() as f64;

    let mut merged = ForecastMerge::default();
    for (label, value) in window {
        merged.actual(label.clone(), *value);
    }
    // The last observed bucket also carries a prediction so both lines join.
    merged.predicted(last_label.clone(), *last_value);

    for ahead in 1..=FORECAST_DAYS {
        let Some(date) = granularity.advance(last_date, ahead as u32) else {
            break;
        };
        let uplift = if ahead <= NEAR_TERM_DAYS {
            NEAR_TERM_UPLIFT
        } else {
            LONG_TERM_UPLIFT
        };
        let predicted = (mean * uplift * jitter.in_range(0.95, 1.05)).round();
        merged.predicted(granularity.label(date), predicted);
    }

    merged.points
}

/// Forecasts from revenue buckets already aggregated at `granularity`, so
/// the actual points reuse the bucket labels. `last_date` is the last day
/// covered by the buckets.
pub fn forecast_buckets<J: Jitter>(
    buckets: &[AggregatedPoint<RevenuePoint>],
    last_date: NaiveDate,
    granularity: Granularity,
    jitter: &mut J,
) -> Vec<ForecastPoint> {
    let history: Vec<(String, f64)> = buckets
        .iter()
        .map(|bucket| (bucket.label.clone(), bucket.point.revenue as f64))
        .collect();
    forecast(&history, last_date, granularity, jitter)
}

pub fn forecast_revenue<J: Jitter>(
    series: &DailySeries,
    granularity: Granularity,
    jitter: &mut J,
) -> Vec<ForecastPoint> {
    let Some(last_date) = series.last_date() else {
        return Vec::new();
    };
    let buckets = aggregate(&series.revenue(), granularity);
    forecast_buckets(&buckets, last_date, granularity, jitter)
}

#[derive(Default)]
struct ForecastMerge {
    points: Vec<ForecastPoint>,
    index_by_label: HashMap<String, usize>,
}

impl ForecastMerge {
    fn entry(&mut self, label: String) -> &mut ForecastPoint {
        let idx = match self.index_by_label.get(&label) {
            Some(&idx) => idx,
            None => {
                let idx = self.points.len();
                self.index_by_label.insert(label.clone(), idx);
                self.points.push(ForecastPoint {
                    label,
                    ..ForecastPoint::default()
                });
                idx
            }
        };
        &mut self.points[idx]
    }

    fn actual(&mut self, label: String, value: f64) {
        self.entry(label).actual = Some(value);
    }

    fn predicted(&mut self, label: String, value: f64) {
        self.entry(label).predicted = Some(value);
    }
}
