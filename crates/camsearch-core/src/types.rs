//! Camera directory data model.

use serde::{Deserialize, Serialize};

/// WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Planar distance in degree space. Not a geodesic distance.
    pub fn degree_distance(&self, other: &Coordinate) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlng = self.longitude - other.longitude;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

/// Camera health as reported by the upstream directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CameraStatus {
    #[default]
    Normal,
    Error,
}

/// Backend a camera record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraSource {
    Sample,
    Its,
    Vendor,
}

impl CameraSource {
    fn vendor() -> Self {
        Self::Vendor
    }
}

/// A single monitored point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default)]
    pub status: CameraStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    /// Hand-written vendor lists may omit this.
    #[serde(default = "CameraSource::vendor")]
    pub source: CameraSource,
}

/// Geographic query window, inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
}

impl BoundingBox {
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.longitude >= self.min_longitude
            && coord.longitude <= self.max_longitude
            && coord.latitude >= self.min_latitude
            && coord.latitude <= self.max_latitude
    }
}

/// A keyword resolved to a place by a geocoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub resolved_address: String,
    pub coordinate: Coordinate,
    /// Which geocoder answered (`naver`, `gazetteer`, ...).
    pub provider: String,
}

/// Which backend(s) populate the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CctvSource {
    /// Built-in fixture.
    #[default]
    Sample,
    /// National ITS open API.
    Its,
    /// Vendor camera table.
    Vendor,
    /// ITS and vendor merged.
    Both,
}

impl std::fmt::Display for CctvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sample => write!(f, "sample"),
            Self::Its => write!(f, "its"),
            Self::Vendor => write!(f, "vendor"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl std::str::FromStr for CctvSource {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sample" => Ok(Self::Sample),
            "its" => Ok(Self::Its),
            "vendor" | "ktict" => Ok(Self::Vendor),
            "both" => Ok(Self::Both),
            other => Err(crate::Error::Config(format!("unknown CCTV source: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_distance() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.5);
        assert_eq!(a.degree_distance(&b), 0.5);
        assert_eq!(b.degree_distance(&a), 0.5);
    }

    #[test]
    fn test_bbox_inclusive_edges() {
        let bbox = BoundingBox {
            min_longitude: 126.7,
            max_longitude: 127.3,
            min_latitude: 37.4,
            max_latitude: 37.7,
        };
        assert!(bbox.contains(&Coordinate::new(37.4, 126.7)));
        assert!(bbox.contains(&Coordinate::new(37.7, 127.3)));
        assert!(!bbox.contains(&Coordinate::new(37.71, 127.0)));
    }

    #[test]
    fn test_source_parse() {
        assert_eq!("ITS".parse::<CctvSource>().unwrap(), CctvSource::Its);
        assert_eq!("ktict".parse::<CctvSource>().unwrap(), CctvSource::Vendor);
        assert!("nope".parse::<CctvSource>().is_err());
    }

    #[test]
    fn test_camera_wire_shape() {
        let cam = Camera {
            id: "cctv-1".into(),
            name: "강남역 사거리".into(),
            coordinate: Coordinate::new(37.4979, 127.0276),
            direction: Some("북측".into()),
            status: CameraStatus::Normal,
            image_url: None,
            stream_url: Some("http://example.test/live.m3u8".into()),
            source: CameraSource::Sample,
        };
        let json = serde_json::to_value(&cam).unwrap();
        assert_eq!(json["status"], "NORMAL");
        assert_eq!(json["source"], "sample");
        assert!(json["streamUrl"].is_string());
        assert!(json.get("imageUrl").is_none());
    }
}
