//! camsearch core: camera data model, configuration, error type.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ApiKeys, CamSearchConfig, DataPaths, KeywordLocale, SearchSettings};
pub use error::{Error, Result};
pub use types::*;
