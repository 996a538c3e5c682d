//! Built-in sample directory: a handful of Seoul cameras with placeholder images.

use async_trait::async_trait;

use camsearch_core::{BoundingBox, Camera, CameraSource, CameraStatus, Coordinate, Result};

use crate::directory::DirectoryProvider;

const SAMPLE_CAMERAS: &[(&str, &str, f64, f64, &str, &str)] = &[
    ("cctv-gangnam-01", "강남역 사거리", 37.4979, 127.0276, "북측", "Gangnam+Station"),
    ("cctv-sinchon-01", "신촌역 로터리", 37.5559, 126.9366, "남측", "Sinchon+Station"),
    ("cctv-cityhall-01", "서울시청 앞", 37.5665, 126.9780, "동측", "Seoul+City+Hall"),
    ("cctv-hongdae-01", "홍대입구역", 37.5572, 126.9239, "서측", "Hongdae+Station"),
    ("cctv-jamsil-01", "잠실역 사거리", 37.5133, 127.1000, "북측", "Jamsil+Station"),
    ("cctv-yeouido-01", "여의도 한강공원", 37.5285, 126.9331, "한강", "Yeouido+Han+River"),
    ("cctv-gangbuk-01", "강북구청", 37.6398, 127.0256, "남측", "Gangbuk+Office"),
    ("cctv-gangdong-01", "강동구청", 37.5301, 127.1238, "서측", "Gangdong+Office"),
    ("cctv-mapo-01", "마포대교", 37.5409, 126.9519, "한강", "Mapo+Bridge"),
    ("cctv-gwanghwamun-01", "광화문 사거리", 37.5720, 126.9769, "남측", "Gwanghwamun"),
];

/// Static fixture used when no real backend is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleDirectory;

impl SampleDirectory {
    pub fn new() -> Self {
        Self
    }

    /// Every sample camera, unfiltered.
    pub fn all() -> Vec<Camera> {
        SAMPLE_CAMERAS
            .iter()
            .map(|&(id, name, lat, lng, direction, label)| Camera {
                id: id.to_string(),
                name: name.to_string(),
                coordinate: Coordinate::new(lat, lng),
                direction: Some(direction.to_string()),
                status: CameraStatus::Normal,
                image_url: Some(format!(
                    "https://via.placeholder.com/640x360/0088cc/ffffff?text={}",
                    label
                )),
                stream_url: None,
                source: CameraSource::Sample,
            })
            .collect()
    }
}

#[async_trait]
impl DirectoryProvider for SampleDirectory {
    fn name(&self) -> &str {
        "sample"
    }

    async fn fetch(&self, bbox: &BoundingBox) -> Result<Vec<Camera>> {
        Ok(Self::all()
            .into_iter()
            .filter(|c| bbox.contains(&c.coordinate))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seoul_bbox_returns_all() {
        let bbox = BoundingBox {
            min_longitude: 126.7,
            max_longitude: 127.3,
            min_latitude: 37.4,
            max_latitude: 37.7,
        };
        let cams = SampleDirectory::new().fetch(&bbox).await.unwrap();
        assert_eq!(cams.len(), 10);
        assert_eq!(cams[0].id, "cctv-gangnam-01");
    }

    #[tokio::test]
    async fn test_bbox_filters() {
        // only the Gangnam corner
        let bbox = BoundingBox {
            min_longitude: 127.0,
            max_longitude: 127.05,
            min_latitude: 37.49,
            max_latitude: 37.50,
        };
        let cams = SampleDirectory::new().fetch(&bbox).await.unwrap();
        let ids: Vec<_> = cams.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["cctv-gangnam-01"]);
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<_> = SampleDirectory::all().into_iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SAMPLE_CAMERAS.len());
    }
}
