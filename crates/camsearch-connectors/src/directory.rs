//! Directory provider trait, vendor/combined providers, and backend selection.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use camsearch_core::{BoundingBox, Camera, CamSearchConfig, CctvSource, Error, Result};
use camsearch_store::CameraStore;

use crate::its::ItsDirectory;
use crate::sample::SampleDirectory;

/// A backend that can hand over a full camera list for an area.
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Short identifier used in logs and status output.
    fn name(&self) -> &str;

    /// Fetch every camera inside `bbox`. Errors mean the backend could not
    /// be reached, never "no cameras".
    async fn fetch(&self, bbox: &BoundingBox) -> Result<Vec<Camera>>;
}

/// Vendor cameras kept in the local SQLite table.
pub struct SqliteDirectory {
    store: Arc<CameraStore>,
}

impl SqliteDirectory {
    pub fn new(store: Arc<CameraStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DirectoryProvider for SqliteDirectory {
    fn name(&self) -> &str {
        "vendor"
    }

    async fn fetch(&self, bbox: &BoundingBox) -> Result<Vec<Camera>> {
        let store = self.store.clone();
        let bbox = *bbox;
        tokio::task::spawn_blocking(move || store.cameras_in_bbox(&bbox))
            .await
            .map_err(|e| Error::Internal(format!("vendor query task failed: {}", e)))?
    }
}

/// Several providers merged in order. The first occurrence of an id wins.
///
/// A failing member is logged and skipped; the fetch fails only when every
/// member fails.
pub struct CombinedDirectory {
    providers: Vec<Arc<dyn DirectoryProvider>>,
}

impl CombinedDirectory {
    pub fn new(providers: Vec<Arc<dyn DirectoryProvider>>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl DirectoryProvider for CombinedDirectory {
    fn name(&self) -> &str {
        "combined"
    }

    async fn fetch(&self, bbox: &BoundingBox) -> Result<Vec<Camera>> {
        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        let mut last_err = None;
        let mut any_ok = false;

        for provider in &self.providers {
            match provider.fetch(bbox).await {
                Ok(cameras) => {
                    any_ok = true;
                    for cam in cameras {
                        if seen.insert(cam.id.clone()) {
                            merged.push(cam);
                        }
                    }
                }
                Err(e) => {
                    warn!("Directory provider {} failed: {}", provider.name(), e);
                    last_err = Some(e);
                }
            }
        }

        match (any_ok, last_err) {
            (false, Some(e)) => Err(e),
            _ => Ok(merged),
        }
    }
}

/// Build the provider for the configured source.
pub fn create_directory(
    config: &CamSearchConfig,
    store: Arc<CameraStore>,
) -> Result<Arc<dyn DirectoryProvider>> {
    let its = || -> Result<Arc<dyn DirectoryProvider>> {
        let key = config
            .api_keys
            .its_api_key
            .clone()
            .ok_or_else(|| Error::Config("ITS_API_KEY is required for the its source".into()))?;
        let its = ItsDirectory::new(key, config.request_timeout)?
            .with_road_type(config.its_road_type.clone());
        Ok(Arc::new(its))
    };

    let provider: Arc<dyn DirectoryProvider> = match config.source {
        CctvSource::Sample => Arc::new(SampleDirectory::new()),
        CctvSource::Its => its()?,
        CctvSource::Vendor => Arc::new(SqliteDirectory::new(store)),
        CctvSource::Both => Arc::new(CombinedDirectory::new(vec![
            its()?,
            Arc::new(SqliteDirectory::new(store)),
        ])),
    };

    info!("Directory provider: {} (source={})", provider.name(), config.source);
    Ok(provider)
}
