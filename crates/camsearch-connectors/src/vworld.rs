//! VWorld (national spatial information platform) reverse geocoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use camsearch_core::{Coordinate, GeocodeResult, Result};

use crate::geocoder::Geocoder;
use crate::http::{build_client, json_body, transport_error};

pub const VWORLD_API_URL: &str = "https://api.vworld.kr/req/address";

pub struct VWorldGeocoder {
    client: Client,
    api_key: String,
    base_url: String,
}

impl VWorldGeocoder {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key,
            base_url: VWORLD_API_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Geocoder for VWorldGeocoder {
    fn name(&self) -> &str {
        "vworld"
    }

    /// Forward lookups are not used from VWorld.
    async fn geocode(&self, _query: &str) -> Result<Option<GeocodeResult>> {
        Ok(None)
    }

    async fn reverse_geocode(&self, coord: &Coordinate) -> Result<Option<String>> {
        // VWorld takes "longitude,latitude".
        let point = format!("{},{}", coord.longitude, coord.latitude);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("service", "address"),
                ("request", "getAddress"),
                ("version", "2.0"),
                ("key", self.api_key.as_str()),
                ("point", point.as_str()),
                ("format", "json"),
                ("type", "both"),
                ("zipcode", "true"),
                ("simple", "false"),
            ])
            .send()
            .await
            .map_err(|e| transport_error("vworld", e))?;
        let body = json_body("vworld", response).await?;
        Ok(parse_address_response(&body))
    }
}

pub fn parse_address_response(body: &serde_json::Value) -> Option<String> {
    let response = &body["response"];
    if response["status"].as_str() != Some("OK") {
        return None;
    }
    response["result"]
        .as_array()?
        .first()?["text"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use camsearch_core::Error;
    use serde_json::json;

    use crate::http::test_support::{loopback_client, serve};

    fn reverse_geocoder(url: String) -> VWorldGeocoder {
        let timeout = Duration::from_millis(300);
        let mut vworld = VWorldGeocoder::new("key".into(), timeout)
            .unwrap()
            .with_base_url(url);
        vworld.client = loopback_client(timeout);
        vworld
    }

    #[tokio::test]
    async fn test_reverse_geocode_sends_lng_first() {
        let app = Router::new()
            .route(
                "/address",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let text = match q.get("point").map(String::as_str) {
                        Some("126.978,37.5665") => "서울특별시 중구 세종대로 110",
                        _ => "wrong point order",
                    };
                    Json(json!({
                        "response": { "status": "OK", "result": [{ "text": text }] }
                    }))
                }),
            )
            .route("/busy", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let base = serve(app).await;

        let address = reverse_geocoder(format!("{}/address", base))
            .reverse_geocode(&Coordinate::new(37.5665, 126.978))
            .await
            .unwrap();
        assert_eq!(address.as_deref(), Some("서울특별시 중구 세종대로 110"));

        let err = reverse_geocoder(format!("{}/busy", base))
            .reverse_geocode(&Coordinate::new(37.5665, 126.978))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream { status: 503, .. }), "{:?}", err);
    }

    #[test]
    fn test_parse_ok() {
        let body = json!({
            "response": {
                "status": "OK",
                "result": [
                    { "type": "road", "text": "서울특별시 중구 세종대로 110", "structure": { "level1": "서울특별시" } }
                ]
            }
        });
        assert_eq!(
            parse_address_response(&body).as_deref(),
            Some("서울특별시 중구 세종대로 110")
        );
    }

    #[test]
    fn test_parse_not_found() {
        let body = json!({ "response": { "status": "NOT_FOUND" } });
        assert!(parse_address_response(&body).is_none());
    }

    #[tokio::test]
    async fn test_forward_lookup_is_a_miss() {
        let g = VWorldGeocoder::new("key".into(), Duration::from_secs(1)).unwrap();
        assert!(g.geocode("서울시청").await.unwrap().is_none());
    }
}
