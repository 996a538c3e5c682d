//! SQLite-backed vendor camera table.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use tracing::info;

use crate::schema::SCHEMA_SQL;
use camsearch_core::{BoundingBox, Camera, CameraSource, CameraStatus, Coordinate, Error, Result};

/// Camera table store.
pub struct CameraStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl CameraStore {
    /// Open or create the camera database at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };
        info!(
            "CameraStore initialized: {} cameras, path={}",
            store.count()?,
            store.db_path.display()
        );
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Insert or overwrite cameras by id. Returns the number written.
    pub fn upsert_cameras(&self, cameras: &[Camera]) -> Result<usize> {
        cameras.iter().try_for_each(check_camera)?;
        let now = chrono::Utc::now().timestamp_millis();
        let mut conn = self.conn.lock();
        let tx = conn.transaction().map_err(|e| Error::Database(e.to_string()))?;
        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT INTO cameras
                        (id, name, latitude, longitude, direction, status, image_url, stream_url, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                     ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        latitude = excluded.latitude,
                        longitude = excluded.longitude,
                        direction = excluded.direction,
                        status = excluded.status,
                        image_url = excluded.image_url,
                        stream_url = excluded.stream_url,
                        updated_at = excluded.updated_at",
                )
                .map_err(|e| Error::Database(e.to_string()))?;
            for cam in cameras {
                stmt.execute(params![
                    cam.id,
                    cam.name,
                    cam.coordinate.latitude,
                    cam.coordinate.longitude,
                    cam.direction,
                    status_to_str(cam.status),
                    cam.image_url,
                    cam.stream_url,
                    now,
                ])
                .map_err(|e| Error::Database(e.to_string()))?;
            }
        }
        tx.commit().map_err(|e| Error::Database(e.to_string()))?;
        Ok(cameras.len())
    }

    /// Load a JSON array of cameras from `path` and upsert it. Records
    /// without a `source` are vendor cameras.
    pub fn import_json_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let raw = std::fs::read(path)?;
        let cameras: Vec<Camera> = serde_json::from_slice(&raw)?;
        let written = self.upsert_cameras(&cameras)?;
        info!("Imported {} vendor cameras from {}", written, path.display());
        Ok(written)
    }

    /// Cameras inside `bbox` (edges inclusive), ordered by id.
    pub fn cameras_in_bbox(&self, bbox: &BoundingBox) -> Result<Vec<Camera>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT id, name, latitude, longitude, direction, status, image_url, stream_url
                 FROM cameras
                 WHERE longitude >= ?1 AND longitude <= ?2
                   AND latitude >= ?3 AND latitude <= ?4
                 ORDER BY id",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(
                params![
                    bbox.min_longitude,
                    bbox.max_longitude,
                    bbox.min_latitude,
                    bbox.max_latitude
                ],
                row_to_camera,
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let cameras = rows
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(cameras)
    }

    pub fn delete_camera(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let n = conn
            .execute("DELETE FROM cameras WHERE id = ?1", params![id])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(n > 0)
    }

    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM cameras", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(n as usize)
    }
}

/// A record needs an id and a finite position to ever be matched.
fn check_camera(cam: &Camera) -> Result<()> {
    if cam.id.trim().is_empty() {
        return Err(Error::InvalidInput("camera id is empty".into()));
    }
    let c = cam.coordinate;
    if !(c.latitude.is_finite() && c.longitude.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "camera {} has a non-finite coordinate",
            cam.id
        )));
    }
    Ok(())
}

fn row_to_camera(row: &Row<'_>) -> rusqlite::Result<Camera> {
    let status: String = row.get(5)?;
    Ok(Camera {
        id: row.get(0)?,
        name: row.get(1)?,
        coordinate: Coordinate::new(row.get(2)?, row.get(3)?),
        direction: row.get(4)?,
        status: status_from_str(&status),
        image_url: row.get(6)?,
        stream_url: row.get(7)?,
        source: CameraSource::Vendor,
    })
}

fn status_to_str(status: CameraStatus) -> &'static str {
    match status {
        CameraStatus::Normal => "NORMAL",
        CameraStatus::Error => "ERROR",
    }
}

fn status_from_str(s: &str) -> CameraStatus {
    if s.eq_ignore_ascii_case("ERROR") {
        CameraStatus::Error
    } else {
        CameraStatus::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (CameraStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = CameraStore::open(dir.path().join("cameras.db")).unwrap();
        (store, dir)
    }

    fn cam(id: &str, lat: f64, lng: f64) -> Camera {
        Camera {
            id: id.into(),
            name: format!("{} 교차로", id),
            coordinate: Coordinate::new(lat, lng),
            direction: Some("북측".into()),
            status: CameraStatus::Normal,
            image_url: None,
            stream_url: Some(format!("rtsp://vendor.test/{}", id)),
            source: CameraSource::Vendor,
        }
    }

    fn seoul() -> BoundingBox {
        BoundingBox {
            min_longitude: 126.7,
            max_longitude: 127.3,
            min_latitude: 37.4,
            max_latitude: 37.7,
        }
    }

    #[test]
    fn test_open_empty() {
        let (store, _dir) = test_store();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.cameras_in_bbox(&seoul()).unwrap().is_empty());
    }

    #[test]
    fn test_bbox_filter() {
        let (store, _dir) = test_store();
        store
            .upsert_cameras(&[
                cam("v-002", 37.4979, 127.0276),
                cam("v-001", 37.5559, 126.9366),
                cam("v-busan", 35.1796, 129.0756),
            ])
            .unwrap();

        let found = store.cameras_in_bbox(&seoul()).unwrap();
        let ids: Vec<_> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["v-001", "v-002"]);
        assert_eq!(found[0].source, CameraSource::Vendor);
        assert_eq!(found[0].direction.as_deref(), Some("북측"));
    }

    #[test]
    fn test_upsert_overwrites() {
        let (store, _dir) = test_store();
        store.upsert_cameras(&[cam("v-1", 37.5, 127.0)]).unwrap();

        let mut updated = cam("v-1", 37.5, 127.0);
        updated.name = "renamed".into();
        updated.status = CameraStatus::Error;
        store.upsert_cameras(&[updated]).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        let found = store.cameras_in_bbox(&seoul()).unwrap();
        assert_eq!(found[0].name, "renamed");
        assert_eq!(found[0].status, CameraStatus::Error);
    }

    #[test]
    fn test_delete() {
        let (store, _dir) = test_store();
        store.upsert_cameras(&[cam("v-1", 37.5, 127.0)]).unwrap();
        assert!(store.delete_camera("v-1").unwrap());
        assert!(!store.delete_camera("v-1").unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_rejects_bad_records_atomically() {
        let (store, _dir) = test_store();
        let mut blank = cam("v-2", 37.5, 127.0);
        blank.id = "  ".into();
        let err = store
            .upsert_cameras(&[cam("v-1", 37.5, 127.0), blank])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let nan = cam("v-3", f64::NAN, 127.0);
        assert!(store.upsert_cameras(&[nan]).is_err());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_import_json_file() {
        let (store, dir) = test_store();
        let path = dir.path().join("vendor-cameras.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "kt-001", "name": "서초IC",
                 "coordinate": {"latitude": 37.4836, "longitude": 127.0327},
                 "direction": "양재방향", "streamUrl": "rtsp://vendor.test/kt-001"},
                {"id": "kt-002", "name": "잠실대교 남단", "status": "ERROR",
                 "coordinate": {"latitude": 37.5246, "longitude": 127.0937}}
            ]"#,
        )
        .unwrap();

        assert_eq!(store.import_json_file(&path).unwrap(), 2);
        let found = store.cameras_in_bbox(&seoul()).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].direction.as_deref(), Some("양재방향"));
        assert_eq!(found[1].status, CameraStatus::Error);
        assert!(found.iter().all(|c| c.source == CameraSource::Vendor));

        // Re-importing the same file overwrites instead of duplicating.
        store.import_json_file(&path).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let (store, dir) = test_store();
        let path = dir.path().join("vendor-cameras.json");
        std::fs::write(&path, r#"{"id": "not-a-list"}"#).unwrap();
        assert!(matches!(store.import_json_file(&path), Err(Error::Json(_))));

        let missing = dir.path().join("absent.json");
        assert!(matches!(store.import_json_file(&missing), Err(Error::Io(_))));
        assert_eq!(store.count().unwrap(), 0);
    }
}
