//! Directory index: the camera snapshot every search runs against.
//!
//! Snapshots are immutable and shared behind an `Arc`. A refresh swaps the
//! whole `Arc` under a write lock, so a reader holds either the old list or
//! the new one and keeps it for as long as it needs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use camsearch_core::Camera;

/// One complete, immutable view of the directory.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySnapshot {
    cameras: Vec<Camera>,
    generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    replaced_at: Option<DateTime<Utc>>,
}

impl DirectorySnapshot {
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    /// 0 for the initial empty snapshot, +1 per replace.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn replaced_at(&self) -> Option<DateTime<Utc>> {
        self.replaced_at
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}

/// Holder of the current snapshot.
pub struct DirectoryIndex {
    current: RwLock<Arc<DirectorySnapshot>>,
}

impl DirectoryIndex {
    /// Create an index holding an empty generation-0 snapshot.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(DirectorySnapshot {
                cameras: Vec::new(),
                generation: 0,
                replaced_at: None,
            })),
        }
    }

    /// Create an index already holding `cameras`.
    pub fn with_cameras(cameras: Vec<Camera>) -> Self {
        let index = Self::new();
        index.replace(cameras);
        index
    }

    /// The current snapshot. Order is stable for the lifetime of the snapshot.
    pub fn snapshot(&self) -> Arc<DirectorySnapshot> {
        self.current.read().clone()
    }

    /// Swap in a new full snapshot. Returns its generation.
    pub fn replace(&self, cameras: Vec<Camera>) -> u64 {
        let mut current = self.current.write();
        let generation = current.generation + 1;
        debug!(
            "Directory snapshot {} -> {} ({} cameras)",
            current.generation,
            generation,
            cameras.len()
        );
        *current = Arc::new(DirectorySnapshot {
            cameras,
            generation,
            replaced_at: Some(Utc::now()),
        });
        generation
    }

    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }
}

impl Default for DirectoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camsearch_core::{CameraSource, CameraStatus, Coordinate};

    fn cam(id: &str) -> Camera {
        Camera {
            id: id.into(),
            name: format!("camera {}", id),
            coordinate: Coordinate::new(37.5, 127.0),
            direction: None,
            status: CameraStatus::Normal,
            image_url: None,
            stream_url: None,
            source: CameraSource::Sample,
        }
    }

    #[test]
    fn test_starts_empty() {
        let index = DirectoryIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.generation(), 0);
        assert!(index.snapshot().replaced_at().is_none());
    }

    #[test]
    fn test_replace_bumps_generation() {
        let index = DirectoryIndex::new();
        assert_eq!(index.replace(vec![cam("a")]), 1);
        assert_eq!(index.replace(vec![cam("b"), cam("c")]), 2);
        assert_eq!(index.len(), 2);
        assert_eq!(index.generation(), 2);
    }

    #[test]
    fn test_held_snapshot_survives_replace() {
        let index = DirectoryIndex::with_cameras(vec![cam("a"), cam("b")]);
        let held = index.snapshot();

        index.replace(vec![cam("z")]);

        let ids: Vec<_> = held.cameras().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(index.snapshot().cameras()[0].id, "z");
    }

    #[test]
    fn test_order_stable_between_reads() {
        let index = DirectoryIndex::with_cameras(vec![cam("c"), cam("a"), cam("b")]);
        let first: Vec<_> = index.snapshot().cameras().iter().map(|c| c.id.clone()).collect();
        let second: Vec<_> = index.snapshot().cameras().iter().map(|c| c.id.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(first, ["c", "a", "b"]);
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_snapshot() {
        let index = Arc::new(DirectoryIndex::with_cameras(vec![cam("old-1"), cam("old-2")]));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let index = index.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let snap = index.snapshot();
                        let prefixes: Vec<_> = snap
                            .cameras()
                            .iter()
                            .map(|c| c.id.split('-').next().unwrap().to_string())
                            .collect();
                        assert!(prefixes.iter().all(|p| p == &prefixes[0]));
                    }
                })
            })
            .collect();

        for i in 0..200 {
            let tag = if i % 2 == 0 { "new" } else { "old" };
            index.replace(vec![cam(&format!("{}-1", tag)), cam(&format!("{}-2", tag))]);
        }

        for r in readers {
            r.join().unwrap();
        }
    }
}
