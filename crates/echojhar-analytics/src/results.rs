use std::process::Command;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::data::datasets::DailySeries;
use crate::error::AnalyticsResult;
use crate::report::DashboardReport;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportContext {
    pub schema_version: u32,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub series_sha256: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub schema_version: u32,
    pub context: ReportContext,
    pub report: DashboardReport,
}

/// SHA-256 over the canonical JSON of the series.
pub fn series_digest(series: &DailySeries) -> AnalyticsResult<String> {
    let bytes = serde_json::to_vec(series)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{digest:x}"))
}

pub fn host_name() -> String {
    if let Ok(output) = Command::new("uname").arg("-n").output() {
        let v = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !v.is_empty() {
            return v;
        }
    }
    "unknown-host".to_string()
}
