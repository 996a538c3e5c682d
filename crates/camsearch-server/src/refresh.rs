//! Background directory poller, the only writer of the directory index.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use camsearch_core::Result;
use camsearch_runtime::RefreshReport;

use crate::state::AppState;

/// Fetch from the configured provider and swap the index. Remembers the
/// outcome for `/api/status`. Refreshes run one at a time, so the newest
/// fetch is always the one left in the index.
pub async fn refresh_directory(state: &AppState) -> Result<RefreshReport> {
    let _guard = state.refresh_lock.lock().await;
    let result = state
        .orchestrator
        .refresh(state.provider.as_ref(), &state.config.refresh_bbox)
        .await;

    match &result {
        Ok(report) => {
            *state.last_refresh.write() = Some(report.clone());
            *state.last_refresh_error.write() = None;
        }
        Err(e) => {
            *state.last_refresh_error.write() = Some(e.to_string());
        }
    }
    result
}

/// Start the periodic refresh task. A zero interval disables polling.
pub fn start_refresh_poller(state: Arc<AppState>) -> Option<JoinHandle<()>> {
    let period = state.config.refresh_interval;
    if period.is_zero() {
        info!("Directory polling disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        info!("Directory poller started: every {}s", period.as_secs());
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick fires immediately; startup already refreshed.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = refresh_directory(&state).await {
                warn!("Scheduled directory refresh failed: {}", e);
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use camsearch_connectors::{DirectoryProvider, GazetteerGeocoder};
    use camsearch_core::{
        BoundingBox, CamSearchConfig, Camera, CameraSource, CameraStatus, Coordinate,
    };
    use camsearch_store::CameraStore;

    /// First fetch is slow and returns one camera; later fetches return two.
    struct SlowThenFast {
        calls: AtomicUsize,
    }

    fn camera(id: &str) -> Camera {
        Camera {
            id: id.into(),
            name: id.into(),
            coordinate: Coordinate::new(37.5, 127.0),
            direction: None,
            status: CameraStatus::Normal,
            image_url: None,
            stream_url: None,
            source: CameraSource::Sample,
        }
    }

    #[async_trait]
    impl DirectoryProvider for SlowThenFast {
        fn name(&self) -> &str {
            "slow-then-fast"
        }

        async fn fetch(&self, _bbox: &BoundingBox) -> camsearch_core::Result<Vec<Camera>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(vec![camera("old-1")])
            } else {
                Ok(vec![camera("new-1"), camera("new-2")])
            }
        }
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_keep_newest_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let config = CamSearchConfig::from_env(dir.path()).unwrap();
        let store = Arc::new(CameraStore::open(dir.path().join("cameras.db")).unwrap());
        let provider = Arc::new(SlowThenFast {
            calls: AtomicUsize::new(0),
        });
        let state = Arc::new(AppState::new(
            config,
            store,
            provider.clone(),
            Arc::new(GazetteerGeocoder::new()),
        ));

        let first = {
            let state = state.clone();
            tokio::spawn(async move { refresh_directory(&state).await })
        };
        while provider.calls.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        // Waits for the slow fetch to finish and swap before fetching again.
        let second = refresh_directory(&state).await.unwrap();
        let first = first.await.unwrap().unwrap();

        assert_eq!(first.camera_count, 1);
        assert_eq!(second.camera_count, 2);
        assert!(second.generation > first.generation);
        assert_eq!(state.orchestrator.status().camera_count, 2);
        assert_eq!(
            state.last_refresh.read().as_ref().map(|r| r.camera_count),
            Some(2)
        );
    }
}
