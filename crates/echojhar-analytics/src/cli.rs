use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::AnalyticsConfig;
use crate::data::aggregate::Granularity;
use crate::error::{AnalyticsError, AnalyticsResult};

#[derive(Debug, Parser)]
#[command(
    name = "echojhar-analytics",
    about = "Synthetic footfall and revenue analytics for the EchoJhar business dashboard"
)]
pub struct Args {
    #[arg(long, env = "ECHOJHAR_CONFIG")]
    pub config: Option<PathBuf>,
    #[arg(long, env = "ECHOJHAR_SETTINGS")]
    pub settings: Option<PathBuf>,
    #[arg(long, env = "ECHOJHAR_CATALOG")]
    pub catalog: Option<PathBuf>,
    #[arg(long, env = "ECHOJHAR_RESULTS", default_value = "results")]
    pub results_dir: PathBuf,
    #[arg(long, env = "ECHOJHAR_LABEL", default_value = "local")]
    pub label: String,
    #[command(flatten)]
    pub window: WindowArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct WindowArgs {
    /// Trailing days to generate; negative values clamp to zero.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub days: Option<i64>,
    #[arg(long, global = true)]
    pub end_date: Option<NaiveDate>,
    #[arg(long, global = true, env = "ECHOJHAR_SEED")]
    pub seed: Option<u64>,
    /// day, week or month; anything else means day.
    #[arg(long, global = true)]
    pub group_by: Option<String>,
    #[arg(long, global = true)]
    pub no_forecast: bool,
}

impl WindowArgs {
    pub fn apply_to(&self, config: &mut AnalyticsConfig) {
        if let Some(days) = self.days {
            config.days = days;
        }
        if let Some(end_date) = self.end_date {
            config.end_date = Some(end_date);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(group_by) = self.group_by.as_deref() {
            config.granularity = Granularity::parse(group_by);
        }
        if self.no_forecast {
            config.forecast = false;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the bucketed footfall and revenue series as JSON.
    Series,
    /// Write the full dashboard report under the results directory.
    Report {
        #[arg(long)]
        save_settings: bool,
        /// Also write report-day/week/month.json, all from the same series.
        #[arg(long)]
        all_granularities: bool,
    },
    /// Print the merged actual/predicted revenue forecast as JSON.
    Forecast,
    Doctor,
}

pub fn validate_label(label: &str) -> AnalyticsResult<()> {
    if label.is_empty() {
        return Err(AnalyticsError::InvalidArgument(
            "label must not be empty".to_string(),
        ));
    }
    if matches!(label, "." | "..") {
        return Err(AnalyticsError::InvalidArgument(format!(
            "label '{label}' is not allowed"
        )));
    }
    if !label
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'))
    {
        return Err(AnalyticsError::InvalidArgument(
            "label contains invalid characters; allowed: [A-Za-z0-9._-]".to_string(),
        ));
    }
    Ok(())
}
