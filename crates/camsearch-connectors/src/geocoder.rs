//! Geocoder trait, fallback chain, and geocoder selection.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use camsearch_core::{CamSearchConfig, Coordinate, Error, GeocodeResult, Result};

use crate::gazetteer::GazetteerGeocoder;
use crate::naver::NaverGeocoder;
use crate::vworld::VWorldGeocoder;

/// Place name ↔ coordinate lookups.
///
/// `Ok(None)` means the provider answered and knows no such place.
/// `Err` means the provider could not be asked (network, timeout, bad
/// response) and must not be read as "not found".
#[async_trait]
pub trait Geocoder: Send + Sync {
    fn name(&self) -> &str;

    async fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>>;

    async fn reverse_geocode(&self, _coord: &Coordinate) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Asks each geocoder in turn until one resolves the query.
///
/// Misses and failures of earlier links fall through to the next; the last
/// link's answer (including its error) is final.
pub struct FallbackGeocoder {
    chain: Vec<Arc<dyn Geocoder>>,
}

impl FallbackGeocoder {
    pub fn new(chain: Vec<Arc<dyn Geocoder>>) -> Self {
        Self { chain }
    }

    pub fn names(&self) -> Vec<&str> {
        self.chain.iter().map(|g| g.name()).collect()
    }
}

#[async_trait]
impl Geocoder for FallbackGeocoder {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>> {
        let Some((last, rest)) = self.chain.split_last() else {
            return Ok(None);
        };

        for geocoder in rest {
            match geocoder.geocode(query).await {
                Ok(Some(found)) => return Ok(Some(found)),
                Ok(None) => debug!("{} has no match for {:?}", geocoder.name(), query),
                Err(e) => warn!("{} geocode failed for {:?}: {}", geocoder.name(), query, e),
            }
        }
        last.geocode(query).await
    }

    async fn reverse_geocode(&self, coord: &Coordinate) -> Result<Option<String>> {
        let Some((last, rest)) = self.chain.split_last() else {
            return Ok(None);
        };

        for geocoder in rest {
            match geocoder.reverse_geocode(coord).await {
                Ok(Some(address)) => return Ok(Some(address)),
                Ok(None) => {}
                Err(e) => warn!("{} reverse geocode failed: {}", geocoder.name(), e),
            }
        }
        last.reverse_geocode(coord).await
    }
}

/// Build the geocoder chain from configured credentials.
///
/// Naver (when keyed) → VWorld (when keyed, reverse only) → gazetteer.
pub fn create_geocoder(config: &CamSearchConfig) -> Result<Arc<dyn Geocoder>> {
    let keys = &config.api_keys;
    let mut chain: Vec<Arc<dyn Geocoder>> = Vec::new();

    match (&keys.naver_client_id, &keys.naver_client_secret) {
        (Some(id), Some(secret)) => {
            chain.push(Arc::new(NaverGeocoder::new(
                id.clone(),
                secret.clone(),
                config.request_timeout,
            )?));
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(Error::Config(
                "NAVER_MAP_CLIENT_ID and NAVER_MAP_CLIENT_SECRET must be set together".into(),
            ));
        }
        (None, None) => {}
    }

    if let Some(key) = &keys.vworld_api_key {
        chain.push(Arc::new(VWorldGeocoder::new(key.clone(), config.request_timeout)?));
    }

    chain.push(Arc::new(GazetteerGeocoder::new()));

    let geocoder = FallbackGeocoder::new(chain);
    info!("Geocoder chain: {}", geocoder.names().join(" -> "));
    Ok(Arc::new(geocoder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Answer {
        Found(&'static str),
        Missing,
        Broken,
    }

    struct Scripted {
        answer: Answer,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(answer: Answer) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Geocoder for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn geocode(&self, _query: &str) -> Result<Option<GeocodeResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.answer {
                Answer::Found(label) => Ok(Some(GeocodeResult {
                    resolved_address: label.to_string(),
                    coordinate: Coordinate::new(37.5, 127.0),
                    provider: "scripted".into(),
                })),
                Answer::Missing => Ok(None),
                Answer::Broken => Err(Error::Timeout("scripted".into())),
            }
        }
    }

    #[tokio::test]
    async fn test_first_hit_wins() {
        let first = Scripted::new(Answer::Found("first"));
        let second = Scripted::new(Answer::Found("second"));
        let chain = FallbackGeocoder::new(vec![first.clone(), second.clone()]);

        let found = chain.geocode("q").await.unwrap().unwrap();
        assert_eq!(found.resolved_address, "first");
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_miss_and_error_fall_through() {
        let chain = FallbackGeocoder::new(vec![
            Scripted::new(Answer::Broken),
            Scripted::new(Answer::Missing),
            Scripted::new(Answer::Found("last")),
        ]);
        let found = chain.geocode("q").await.unwrap().unwrap();
        assert_eq!(found.resolved_address, "last");
    }

    #[tokio::test]
    async fn test_last_error_is_surfaced() {
        let chain = FallbackGeocoder::new(vec![
            Scripted::new(Answer::Missing),
            Scripted::new(Answer::Broken),
        ]);
        let err = chain.geocode("q").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_empty_chain_not_found() {
        let chain = FallbackGeocoder::new(Vec::new());
        assert!(chain.geocode("q").await.unwrap().is_none());
    }

    #[test]
    fn test_default_chain_is_gazetteer_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CamSearchConfig::from_env(dir.path()).unwrap();
        config.api_keys = Default::default();
        assert!(create_geocoder(&config).is_ok());

        config.api_keys.naver_client_id = Some("id".into());
        assert!(matches!(create_geocoder(&config), Err(Error::Config(_))));
    }
}
