use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::datasets::{DailyRecord, DailySeries, FootfallPoint, RevenuePoint};
use crate::jitter::Jitter;

pub const DEFAULT_FESTIVAL_MONTHS: [u32; 2] = [10, 11];
pub const WEEKEND_BOOST: f64 = 1.25;
pub const FESTIVAL_BOOST: f64 = 1.2;

const BASE_MIDPOINT: f64 = 120.0;
const BASE_AMPLITUDE: f64 = 30.0;
const BASE_PERIOD_DAYS: f64 = 3.0;

const LOCAL_FLOOR: f64 = 5.0;
const DOMESTIC_FLOOR: f64 = 3.0;
const INTERNATIONAL_FLOOR: f64 = 1.0;

/// Average spend per visitor by origin (local, domestic, international) and
/// the multiplier the category gets inside the festival window.
struct CategoryProfile {
    weights: [f64; 3],
    festival_factor: f64,
}

const DOKRA: CategoryProfile = CategoryProfile {
    weights: [42.0, 95.0, 230.0],
    festival_factor: 1.17,
};
const BAMBOO: CategoryProfile = CategoryProfile {
    weights: [31.0, 64.0, 118.0],
    festival_factor: 1.07,
};
const PAINTINGS: CategoryProfile = CategoryProfile {
    weights: [18.0, 72.0, 265.0],
    festival_factor: 1.23,
};
const SERVICES: CategoryProfile = CategoryProfile {
    weights: [57.0, 112.0, 310.0],
    festival_factor: 1.13,
};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub festival_months: Vec<u32>,
}

impl Default for Season {
    fn default() -> Self {
        Self {
            festival_months: DEFAULT_FESTIVAL_MONTHS.to_vec(),
        }
    }
}

impl Season {
    pub fn new(festival_months: impl Into<Vec<u32>>) -> Self {
        Self {
            festival_months: festival_months.into(),
        }
    }

    pub fn is_festival(&self, date: NaiveDate) -> bool {
        self.festival_months.contains(&date.month())
    }
}

pub fn seasonal_multiplier(month: u32, festival_months: &[u32], boost: f64) -> f64 {
    if festival_months.contains(&month) {
        boost
    } else {
        1.0
    }
}

pub fn weekend_multiplier(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => WEEKEND_BOOST,
        _ => 1.0,
    }
}

/// Produces `days` records ending at `end_date` inclusive, oldest first.
pub fn generate_daily_series<J: Jitter>(
    end_date: NaiveDate,
    days: usize,
    season: &Season,
    jitter: &mut J,
) -> DailySeries {
    let Some(start) = series_start(end_date, days) else {
        return DailySeries::default();
    };

    let mut records = Vec::with_capacity(days);
    for offset in 0..days {
        let date = start + Duration::days(offset as i64);
        records.push(generate_day(date, offset, season, jitter));
    }

    debug!(days, %start, %end_date, "generated daily series");
    DailySeries::from_records(records)
}

fn series_start(end_date: NaiveDate, days: usize) -> Option<NaiveDate> {
    if days == 0 {
        return None;
    }
    let back = i64::try_from(days - 1).ok()?;
    end_date.checked_sub_signed(Duration::try_days(back)?)
}

fn generate_day<J: Jitter>(
    date: NaiveDate,
    offset: usize,
    season: &Season,
    jitter: &mut J,
) -> DailyRecord {
    let weekend = weekend_multiplier(date);
    let festival = seasonal_multiplier(date.month(), &season.festival_months, FESTIVAL_BOOST);
    let base = BASE_MIDPOINT + BASE_AMPLITUDE * (offset as f64 / BASE_PERIOD_DAYS).sin();

    let local = floored(base * 0.9 * weekend * jitter.in_range(0.85, 1.15), LOCAL_FLOOR);
    let domestic = floored(
        base * 0.6 * weekend * festival * jitter.in_range(0.8, 1.2),
        DOMESTIC_FLOOR,
    );
    let international = floored(
        base * 0.15 * weekend * festival * jitter.in_range(0.7, 1.3),
        INTERNATIONAL_FLOOR,
    );

    let footfall = FootfallPoint {
        date,
        local,
        domestic,
        international,
    };

    let in_festival = festival > 1.0;
    let mut category = |profile: &CategoryProfile| {
        category_revenue(profile, &footfall, in_festival, jitter)
    };
    let dokra = category(&DOKRA);
    let bamboo = category(&BAMBOO);
    let paintings = category(&PAINTINGS);
    let services = category(&SERVICES);

    DailyRecord {
        date,
        revenue: RevenuePoint::from_categories(date, dokra, bamboo, paintings, services),
        footfall,
    }
}

fn category_revenue<J: Jitter>(
    profile: &CategoryProfile,
    footfall: &FootfallPoint,
    in_festival: bool,
    jitter: &mut J,
) -> u64 {
    let [w_local, w_domestic, w_international] = profile.weights;
    let spend = footfall.local as f64 * w_local
        + footfall.domestic as f64 * w_domestic
        + footfall.international as f64 * w_international;
    let seasonal = if in_festival {
        profile.festival_factor
    } else {
        1.0
    };
    floored(spend * seasonal * jitter.in_range(0.9, 1.1), 0.0)
}

fn floored(value: f64, floor: f64) -> u64 {
    value.round().max(floor) as u64
}
