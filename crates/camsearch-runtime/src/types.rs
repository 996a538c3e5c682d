//! Runtime report types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of one directory refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub provider: String,
    pub camera_count: usize,
    pub generation: u64,
    pub refreshed_at: DateTime<Utc>,
}

/// Snapshot of the directory for status output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStatus {
    pub camera_count: usize,
    pub generation: u64,
    pub replaced_at: Option<DateTime<Utc>>,
    pub search_radius: f64,
    pub nearby_radius: f64,
}
