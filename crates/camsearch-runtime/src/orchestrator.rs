//! Orchestrator: keyword → direct match → geocode → proximity match.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use camsearch_connectors::{DirectoryProvider, Geocoder};
use camsearch_core::{BoundingBox, Camera, Coordinate, Result, SearchSettings};
use camsearch_resolve::{
    extract_keyword, match_direct, match_proximity, KeywordPatterns, NoMatchReason, SearchOutcome,
    SearchQuery,
};
use camsearch_store::DirectoryIndex;

use crate::types::{DirectoryStatus, RefreshReport};

/// Runs searches against the directory index. Holds no per-search state.
pub struct Orchestrator {
    index: Arc<DirectoryIndex>,
    geocoder: Arc<dyn Geocoder>,
    settings: SearchSettings,
    patterns: KeywordPatterns,
}

impl Orchestrator {
    pub fn new(
        index: Arc<DirectoryIndex>,
        geocoder: Arc<dyn Geocoder>,
        settings: SearchSettings,
    ) -> Self {
        let patterns = KeywordPatterns::for_locale(settings.keyword_locale);
        info!(
            "Orchestrator initialized: locale={:?}, search_radius={}, nearby_radius={}",
            settings.keyword_locale, settings.search_radius, settings.nearby_radius
        );
        Self {
            index,
            geocoder,
            settings,
            patterns,
        }
    }

    /// Replace the filler table (for other languages or tests).
    pub fn with_patterns(mut self, patterns: KeywordPatterns) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn index(&self) -> &Arc<DirectoryIndex> {
        &self.index
    }

    pub fn geocoder(&self) -> &Arc<dyn Geocoder> {
        &self.geocoder
    }

    pub fn query(&self, raw: &str) -> SearchQuery {
        SearchQuery {
            raw_text: raw.to_string(),
            extracted_keyword: extract_keyword(raw, &self.patterns),
        }
    }

    /// Resolve a free-text query to cameras.
    ///
    /// The directory snapshot is taken once up front; a refresh landing
    /// while the geocoder is in flight does not affect this search.
    /// Geocoder failures are returned as `Err`, never as an empty outcome.
    pub async fn search(&self, raw: &str) -> Result<SearchOutcome> {
        let snapshot = self.index.snapshot();
        let keyword = extract_keyword(raw, &self.patterns);

        if keyword.is_empty() {
            debug!("No keyword in {:?}", raw);
            return Ok(SearchOutcome::none(keyword, NoMatchReason::NoKeyword));
        }

        let direct = match_direct(&keyword, snapshot.cameras());
        if !direct.is_empty() {
            debug!("Direct match {:?}: {} cameras", keyword, direct.len());
            return Ok(SearchOutcome::direct(keyword, direct));
        }

        let Some(location) = self.geocoder.geocode(&keyword).await? else {
            debug!("Unresolved location {:?}", keyword);
            return Ok(SearchOutcome::none(keyword, NoMatchReason::UnresolvedLocation));
        };

        let nearby = match_proximity(
            &location.coordinate,
            snapshot.cameras(),
            self.settings.search_radius,
        );
        debug!(
            "Proximity match {:?} via {} ({}): {} cameras",
            keyword,
            location.provider,
            location.resolved_address,
            nearby.len()
        );
        Ok(SearchOutcome::proximity(
            keyword,
            nearby,
            location.resolved_address,
        ))
    }

    /// Cameras around the caller's own position.
    pub fn nearby(&self, center: &Coordinate) -> Vec<Camera> {
        match_proximity(
            center,
            self.index.snapshot().cameras(),
            self.settings.nearby_radius,
        )
    }

    /// Cameras of the current snapshot inside `bbox`, in directory order.
    pub fn in_bbox(&self, bbox: &BoundingBox) -> Vec<Camera> {
        self.index
            .snapshot()
            .cameras()
            .iter()
            .filter(|c| bbox.contains(&c.coordinate))
            .cloned()
            .collect()
    }

    /// Fetch a fresh camera list and swap it in.
    ///
    /// On provider failure the current snapshot stays in place.
    pub async fn refresh(
        &self,
        provider: &dyn DirectoryProvider,
        bbox: &BoundingBox,
    ) -> Result<RefreshReport> {
        let cameras = match provider.fetch(bbox).await {
            Ok(cameras) => cameras,
            Err(e) => {
                warn!(
                    "Directory refresh from {} failed, keeping generation {}: {}",
                    provider.name(),
                    self.index.generation(),
                    e
                );
                return Err(e);
            }
        };

        let camera_count = cameras.len();
        let generation = self.index.replace(cameras);
        info!(
            "Directory refreshed from {}: {} cameras (generation {})",
            provider.name(),
            camera_count,
            generation
        );

        Ok(RefreshReport {
            provider: provider.name().to_string(),
            camera_count,
            generation,
            refreshed_at: Utc::now(),
        })
    }

    pub fn status(&self) -> DirectoryStatus {
        let snapshot = self.index.snapshot();
        DirectoryStatus {
            camera_count: snapshot.len(),
            generation: snapshot.generation(),
            replaced_at: snapshot.replaced_at(),
            search_radius: self.settings.search_radius,
            nearby_radius: self.settings.nearby_radius,
        }
    }
}
