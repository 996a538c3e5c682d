//! Shared application state.

use std::sync::Arc;

use parking_lot::RwLock;

use camsearch_connectors::{DirectoryProvider, Geocoder};
use camsearch_core::CamSearchConfig;
use camsearch_runtime::{Orchestrator, RefreshReport};
use camsearch_store::{CameraStore, DirectoryIndex};

use crate::history::SearchHistory;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: CamSearchConfig,
    pub store: Arc<CameraStore>,
    pub provider: Arc<dyn DirectoryProvider>,
    pub orchestrator: Orchestrator,
    pub history: SearchHistory,
    pub last_refresh: RwLock<Option<RefreshReport>>,
    pub last_refresh_error: RwLock<Option<String>>,
    /// Held for a whole fetch-and-swap so the poller and manual refreshes
    /// never interleave.
    pub refresh_lock: tokio::sync::Mutex<()>,
}

impl AppState {
    /// Wire up state around an empty directory index. Callers refresh
    /// before serving.
    pub fn new(
        config: CamSearchConfig,
        store: Arc<CameraStore>,
        provider: Arc<dyn DirectoryProvider>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        let index = Arc::new(DirectoryIndex::new());
        let orchestrator = Orchestrator::new(index, geocoder, config.search.clone());

        Self {
            config,
            store,
            provider,
            orchestrator,
            history: SearchHistory::default(),
            last_refresh: RwLock::new(None),
            last_refresh_error: RwLock::new(None),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }
}
