use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::AnalyticsConfig;
use crate::data::aggregate::Granularity;
use crate::error::{AnalyticsError, AnalyticsResult};

pub const RANGE_DAYS_KEY: &str = "range_days";
pub const GROUP_BY_KEY: &str = "group_by";
pub const FORECAST_OPT_IN_KEY: &str = "forecast_opt_in";

/// Dashboard preferences kept as `KEY=VALUE` lines.
#[derive(Clone, Debug, Default)]
pub struct SettingsStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl SettingsStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let path = path.as_ref().to_path_buf();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let values = parse_settings(&path, &content)?;
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> AnalyticsResult<()> {
        validate_key(key)?;
        self.values.insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn save(&self) -> AnalyticsResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut out = String::new();
        for (key, value) in &self.values {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }

    /// Overlays stored preferences on `config`. Unparseable values are
    /// logged and left at the config's value.
    pub fn apply_to(&self, config: &mut AnalyticsConfig) {
        if let Some(raw) = self.get(RANGE_DAYS_KEY) {
            match raw.trim().parse::<i64>() {
                Ok(days) => config.days = days,
                Err(_) => warn!(key = RANGE_DAYS_KEY, value = raw, "ignoring unparseable setting"),
            }
        }
        if let Some(raw) = self.get(GROUP_BY_KEY) {
            config.granularity = Granularity::parse(raw);
        }
        if let Some(raw) = self.get(FORECAST_OPT_IN_KEY) {
            match parse_flag(raw) {
                Some(flag) => config.forecast = flag,
                None => warn!(
                    key = FORECAST_OPT_IN_KEY,
                    value = raw,
                    "ignoring unparseable setting"
                ),
            }
        }
    }

    pub fn record_from(&mut self, config: &AnalyticsConfig) {
        self.values
            .insert(RANGE_DAYS_KEY.to_string(), config.days.to_string());
        self.values.insert(
            GROUP_BY_KEY.to_string(),
            config.granularity.as_str().to_string(),
        );
        self.values
            .insert(FORECAST_OPT_IN_KEY.to_string(), config.forecast.to_string());
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn validate_key(key: &str) -> AnalyticsResult<()> {
    if key.is_empty() {
        return Err(AnalyticsError::InvalidArgument(
            "setting key must not be empty".to_string(),
        ));
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'))
    {
        return Err(AnalyticsError::InvalidArgument(format!(
            "invalid setting key '{key}'; allowed characters: [A-Za-z0-9._-]"
        )));
    }
    Ok(())
}

fn parse_settings(file: &Path, content: &str) -> AnalyticsResult<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(AnalyticsError::InvalidArgument(format!(
                "invalid settings line {} in '{}': expected KEY=VALUE",
                line_no + 1,
                file.display()
            )));
        };
        let key = key.trim();
        validate_key(key).map_err(|_| {
            AnalyticsError::InvalidArgument(format!(
                "invalid settings line {} in '{}': bad key '{key}'",
                line_no + 1,
                file.display()
            ))
        })?;
        values.insert(key.to_string(), value.trim().to_string());
    }
    Ok(values)
}
