use std::collections::HashMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::datasets::{FootfallPoint, RevenuePoint};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    /// Unknown values fall back to `Day`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Self::Week,
            "month" => Self::Month,
            _ => Self::Day,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn label(self, date: NaiveDate) -> String {
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Week => {
                let week = date.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Self::Month => date.format("%b %Y").to_string(),
        }
    }

    /// Moves `date` forward by whole buckets. Month steps clamp to the last
    /// day of shorter months, so each step still lands in the next bucket.
    pub fn advance(self, date: NaiveDate, periods: u32) -> Option<NaiveDate> {
        match self {
            Self::Day => date.checked_add_days(Days::new(u64::from(periods))),
            Self::Week => date.checked_add_days(Days::new(7 * u64::from(periods))),
            Self::Month => date.checked_add_months(Months::new(periods)),
        }
    }
}

/// A daily point that can be summed into a coarser bucket.
pub trait Bucketed: Clone {
    fn date(&self) -> NaiveDate;
    fn accumulate(&mut self, other: &Self);
}

impl Bucketed for FootfallPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn accumulate(&mut self, other: &Self) {
        self.local += other.local;
        self.domestic += other.domestic;
        self.international += other.international;
    }
}

impl Bucketed for RevenuePoint {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn accumulate(&mut self, other: &Self) {
        self.revenue += other.revenue;
        self.dokra = add_optional(self.dokra, other.dokra);
        self.bamboo = add_optional(self.bamboo, other.bamboo);
        self.paintings = add_optional(self.paintings, other.paintings);
        self.services = add_optional(self.services, other.services);
    }
}

fn add_optional(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (a, None) => a,
        (None, b) => b,
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint<T> {
    pub label: String,
    pub days: u32,
    #[serde(flatten)]
    pub point: T,
}

/// Groups points by bucket label and sums them field by field. Buckets come
/// out in the order their label first appears in `points`.
pub fn aggregate<T: Bucketed>(points: &[T], granularity: Granularity) -> Vec<AggregatedPoint<T>> {
    let mut out: Vec<AggregatedPoint<T>> = Vec::new();
    let mut index_by_label = HashMap::<String, usize>::new();

    for point in points {
        let label = granularity.label(point.date());
        if let Some(&idx) = index_by_label.get(&label) {
            let bucket = &mut out[idx];
            bucket.point.accumulate(point);
            bucket.days += 1;
            continue;
        }
        index_by_label.insert(label.clone(), out.len());
        out.push(AggregatedPoint {
            label,
            days: 1,
            point: point.clone(),
        });
    }

    debug!(
        input = points.len(),
        buckets = out.len(),
        granularity = granularity.as_str(),
        "aggregated series"
    );
    out
}
