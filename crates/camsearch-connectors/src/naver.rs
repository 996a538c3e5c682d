//! Naver Cloud map geocoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use camsearch_core::{Coordinate, GeocodeResult, Result};

use crate::geocoder::Geocoder;
use crate::http::{as_f64_lenient, build_client, json_body, transport_error};

pub const NAVER_GEOCODE_URL: &str = "https://naveropenapi.apigw.ntruss.com/map-geocode/v2/geocode";

pub struct NaverGeocoder {
    client: Client,
    client_id: String,
    client_secret: String,
    base_url: String,
}

impl NaverGeocoder {
    pub fn new(client_id: String, client_secret: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            client_id,
            client_secret,
            base_url: NAVER_GEOCODE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Geocoder for NaverGeocoder {
    fn name(&self) -> &str {
        "naver"
    }

    async fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("query", query)])
            .header("X-NCP-APIGW-API-KEY-ID", &self.client_id)
            .header("X-NCP-APIGW-API-KEY", &self.client_secret)
            .send()
            .await
            .map_err(|e| transport_error("naver", e))?;
        let body = json_body("naver", response).await?;
        let found = parse_geocode_response(&body);
        debug!("Naver geocode {:?} -> {:?}", query, found.as_ref().map(|f| &f.resolved_address));
        Ok(found)
    }
}

/// First entry of `addresses[]`. Road address preferred, lot-number address
/// when the road address is blank.
pub fn parse_geocode_response(body: &serde_json::Value) -> Option<GeocodeResult> {
    let first = body["addresses"].as_array()?.first()?;

    let address = [&first["roadAddress"], &first["jibunAddress"]]
        .into_iter()
        .filter_map(|v| v.as_str())
        .find(|s| !s.trim().is_empty())?
        .to_string();
    let lng = as_f64_lenient(&first["x"])?;
    let lat = as_f64_lenient(&first["y"])?;

    Some(GeocodeResult {
        resolved_address: address,
        coordinate: Coordinate::new(lat, lng),
        provider: "naver".into(),
    })
}
