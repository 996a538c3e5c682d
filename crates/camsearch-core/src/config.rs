//! Configuration and data directory management.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{BoundingBox, CctvSource};

/// Paths to camsearch data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Vendor camera database (`data/cameras.db`).
    pub cameras_db: PathBuf,
    /// Optional vendor camera list imported at startup (`data/vendor-cameras.json`).
    pub vendor_seed: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            cameras_db: root.join("cameras.db"),
            vendor_seed: root.join("vendor-cameras.json"),
            root,
        })
    }
}

/// Language of the keyword suffix/particle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordLocale {
    #[default]
    Ko,
    En,
}

impl FromStr for KeywordLocale {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ko" | "kr" | "korean" => Ok(Self::Ko),
            "en" | "english" => Ok(Self::En),
            other => Err(crate::Error::Config(format!("unknown keyword locale: {}", other))),
        }
    }
}

/// Search knobs injected into the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSettings {
    /// Radius around a geocoded keyword, in degrees.
    pub search_radius: f64,
    /// Radius around the caller's own position, in degrees.
    pub nearby_radius: f64,
    pub keyword_locale: KeywordLocale,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            search_radius: 0.01,
            nearby_radius: 0.05,
            keyword_locale: KeywordLocale::Ko,
        }
    }
}

/// Credentials for third-party APIs. Never serialized.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub its_api_key: Option<String>,
    pub naver_client_id: Option<String>,
    pub naver_client_secret: Option<String>,
    pub vworld_api_key: Option<String>,
}

/// Top-level camsearch configuration.
#[derive(Debug, Clone)]
pub struct CamSearchConfig {
    /// HTTP server port.
    pub port: u16,
    pub data_paths: DataPaths,
    pub source: CctvSource,
    pub search: SearchSettings,
    pub api_keys: ApiKeys,
    /// Timeout applied to every outbound geocoder/directory request.
    pub request_timeout: Duration,
    /// Directory poll interval.
    pub refresh_interval: Duration,
    /// Area fetched on every directory refresh.
    pub refresh_bbox: BoundingBox,
    /// ITS road network: `its` (national roads), `ex` (expressways) or `all`.
    pub its_road_type: String,
}

impl CamSearchConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let data_paths = DataPaths::new(data_dir)?;

        let search = SearchSettings {
            search_radius: env_radius("SEARCH_RADIUS_DEG", 0.01),
            nearby_radius: env_radius("NEARBY_RADIUS_DEG", 0.05),
            keyword_locale: env_parse("KEYWORD_LOCALE", KeywordLocale::Ko),
        };

        let api_keys = ApiKeys {
            its_api_key: env_opt("ITS_API_KEY"),
            naver_client_id: env_opt("NAVER_MAP_CLIENT_ID"),
            naver_client_secret: env_opt("NAVER_MAP_CLIENT_SECRET"),
            vworld_api_key: env_opt("VWORLD_API_KEY"),
        };

        Ok(Self {
            port: env_parse("PORT", 3000),
            data_paths,
            source: env_parse("CCTV_SOURCE", CctvSource::Sample),
            search,
            api_keys,
            request_timeout: Duration::from_millis(env_parse("GEOCODE_TIMEOUT_MS", 5000)),
            refresh_interval: Duration::from_secs(env_parse("REFRESH_INTERVAL_SECS", 60)),
            refresh_bbox: BoundingBox {
                min_longitude: env_parse("BBOX_MIN_X", 126.7),
                max_longitude: env_parse("BBOX_MAX_X", 127.3),
                min_latitude: env_parse("BBOX_MIN_Y", 37.4),
                max_latitude: env_parse("BBOX_MAX_Y", 37.7),
            },
            its_road_type: env_opt("ITS_ROAD_TYPE").unwrap_or_else(|| "all".to_string()),
        })
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr>(key: &str, raw: &str, default: T) -> T {
    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }
    }
}

/// Radii must be finite and non-negative; anything else keeps the default.
fn env_radius(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(raw) => radius_or(key, &raw, default),
        Err(_) => default,
    }
}

fn radius_or(key: &str, raw: &str, default: f64) -> f64 {
    let value = parse_or(key, raw, default);
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("Ignoring out-of-range {}={:?}, using default", key, raw);
        default
    }
}
