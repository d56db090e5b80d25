use async_trait::async_trait;
use reqwest::Client;
use shared::{BoundingBox, GeoPoint, GeocodeCandidate};

/// Free text to candidate points, best match first.
///
/// Implementations make a single attempt per call; callers decide what a
/// failure means.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Vec<GeoPoint>, GeocodeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("geocoder answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed geocoder payload: {0}")]
    Malformed(String),
}

/// Nominatim `/search` client restricted to a viewbox.
#[derive(Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    viewbox: String,
}

impl NominatimGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>, bounds: &BoundingBox) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            viewbox: bounds.viewbox(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Vec<GeoPoint>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(query, "geocoding");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("viewbox", self.viewbox.as_str()),
                ("bounded", "1"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, query, "geocoder returned non-success status");
            return Err(GeocodeError::Status(status));
        }

        let body = response.text().await?;
        let candidates: Vec<GeocodeCandidate> = serde_json::from_str(&body).map_err(|err| {
            tracing::error!("failed to parse geocoder response for {query:?}: {err}");
            GeocodeError::Malformed(err.to_string())
        })?;

        let points = candidates
            .into_iter()
            .map(|c| GeoPoint::new(c.lat, c.lon))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| GeocodeError::Malformed(err.to_string()))?;

        tracing::debug!(query, candidates = points.len(), "geocoded");
        Ok(points)
    }
}
