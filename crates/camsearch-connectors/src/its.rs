//! National ITS open API (`cctvInfo`) directory provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use camsearch_core::{BoundingBox, Camera, CameraSource, CameraStatus, Coordinate, Result};

use crate::directory::DirectoryProvider;
use crate::http::{as_f64_lenient, build_client, json_body, transport_error};

pub const ITS_CCTV_URL: &str = "https://openapi.its.go.kr:9443/cctvInfo";

/// ITS `cctvtype` value for still-image cameras. Everything else streams.
const CCTV_TYPE_IMAGE: i64 = 3;

pub struct ItsDirectory {
    client: Client,
    api_key: String,
    base_url: String,
    /// `its` (national roads), `ex` (expressways) or `all`.
    road_type: String,
}

impl ItsDirectory {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key,
            base_url: ITS_CCTV_URL.to_string(),
            road_type: "all".to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_road_type(mut self, road_type: impl Into<String>) -> Self {
        self.road_type = road_type.into();
        self
    }
}

#[async_trait]
impl DirectoryProvider for ItsDirectory {
    fn name(&self) -> &str {
        "its"
    }

    async fn fetch(&self, bbox: &BoundingBox) -> Result<Vec<Camera>> {
        let params = [
            ("apiKey", self.api_key.clone()),
            ("type", self.road_type.clone()),
            ("cctvType", "1".to_string()),
            ("minX", bbox.min_longitude.to_string()),
            ("maxX", bbox.max_longitude.to_string()),
            ("minY", bbox.min_latitude.to_string()),
            ("maxY", bbox.max_latitude.to_string()),
            ("getType", "json".to_string()),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| transport_error("its", e))?;
        let body = json_body("its", response).await?;
        let cameras = parse_cctv_response(&body);
        debug!("ITS returned {} cameras", cameras.len());
        Ok(cameras)
    }
}

/// Map an ITS `cctvInfo` body to cameras. Rows without a URL or a usable
/// coordinate are dropped; a missing `data` array is an empty directory.
pub fn parse_cctv_response(body: &serde_json::Value) -> Vec<Camera> {
    let Some(rows) = body["response"]["data"].as_array() else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| {
            let url = row["cctvurl"].as_str()?.trim();
            if url.is_empty() {
                return None;
            }
            let lng = as_f64_lenient(&row["coordx"])?;
            let lat = as_f64_lenient(&row["coordy"])?;
            let name = row["cctvname"].as_str().unwrap_or_default().trim().to_string();
            let is_image = row["cctvtype"].as_i64() == Some(CCTV_TYPE_IMAGE);

            Some(Camera {
                id: url.to_string(),
                name,
                coordinate: Coordinate::new(lat, lng),
                direction: None,
                status: CameraStatus::Normal,
                image_url: is_image.then(|| url.to_string()),
                stream_url: (!is_image).then(|| url.to_string()),
                source: CameraSource::Its,
            })
        })
        .collect()
}
