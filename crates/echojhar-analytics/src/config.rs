use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::data::aggregate::Granularity;
use crate::data::generator::{Season, DEFAULT_FESTIVAL_MONTHS};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::ratings::DEFAULT_TREND_WEEKS;
use crate::metrics::totals::DEFAULT_CONVERSION_RATE;

pub const DEFAULT_DAYS: i64 = 30;
/// Ten years of daily points.
pub const MAX_DAYS: i64 = 3_660;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default, deserialize_with = "lenient_granularity")]
    pub granularity: Granularity,
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: f64,
    #[serde(default = "default_festival_months")]
    pub festival_months: Vec<u32>,
    #[serde(default = "default_enabled")]
    pub forecast: bool,
    #[serde(default = "default_rating_weeks")]
    pub rating_weeks: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            granularity: Granularity::Day,
            conversion_rate: DEFAULT_CONVERSION_RATE,
            festival_months: default_festival_months(),
            forecast: true,
            rating_weeks: DEFAULT_TREND_WEEKS,
            seed: None,
            end_date: None,
            catalog_path: None,
        }
    }
}

const fn default_days() -> i64 {
    DEFAULT_DAYS
}

const fn default_conversion_rate() -> f64 {
    DEFAULT_CONVERSION_RATE
}

fn default_festival_months() -> Vec<u32> {
    DEFAULT_FESTIVAL_MONTHS.to_vec()
}

const fn default_enabled() -> bool {
    true
}

const fn default_rating_weeks() -> usize {
    DEFAULT_TREND_WEEKS
}

fn lenient_granularity<'de, D>(deserializer: D) -> Result<Granularity, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(Granularity::parse(&value))
}

pub fn clamp_days(days: i64) -> usize {
    days.clamp(0, MAX_DAYS) as usize
}

impl AnalyticsConfig {
    pub fn clamped_days(&self) -> usize {
        clamp_days(self.days)
    }

    pub fn season(&self) -> Season {
        Season::new(self.festival_months.clone())
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if !(self.conversion_rate > 0.0 && self.conversion_rate <= 1.0) {
            return Err(AnalyticsError::InvalidArgument(format!(
                "conversion_rate must be in (0, 1], got {}",
                self.conversion_rate
            )));
        }
        if let Some(month) = self
            .festival_months
            .iter()
            .find(|month| !(1..=12).contains(*month))
        {
            return Err(AnalyticsError::InvalidArgument(format!(
                "festival month {month} is out of range (expected 1-12)"
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> AnalyticsResult<AnalyticsConfig> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let config = serde_yaml::from_slice::<AnalyticsConfig>(&bytes).map_err(|error| {
        AnalyticsError::InvalidArgument(format!("invalid config '{}': {error}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

pub fn load_config_or_default(path: Option<&Path>) -> AnalyticsResult<AnalyticsConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(AnalyticsConfig::default()),
    }
}
