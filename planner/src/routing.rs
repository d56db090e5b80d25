use async_trait::async_trait;
use reqwest::Client;
use shared::{GeoPoint, Path, PathsRequest, PathsResponse};

/// Source of candidate paths between two points.
///
/// Implementations return every path in the order the service ranked them
/// and never check bounds themselves.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn request_routes(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Vec<Path>, RoutingServiceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RoutingServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service answered with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed paths payload: {0}")]
    Malformed(String),
}

/// Client for a routing service exposing `POST /paths`.
#[derive(Clone)]
pub struct PathsClient {
    client: Client,
    base_url: String,
}

impl PathsClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl RouteProvider for PathsClient {
    async fn request_routes(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Vec<Path>, RoutingServiceError> {
        let url = format!("{}/paths", self.base_url);
        let body = PathsRequest {
            origin: origin.into(),
            destination: destination.into(),
        };
        tracing::debug!(
            "requesting paths ({:.5},{:.5}) -> ({:.5},{:.5})",
            origin.lat(),
            origin.lon(),
            destination.lat(),
            destination.lon()
        );

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!("routing service returned {status}: {text}");
            return Err(RoutingServiceError::Status { status, body: text });
        }

        let parsed: PathsResponse = serde_json::from_str(&text).map_err(|err| {
            tracing::error!("failed to parse paths response: {err}");
            RoutingServiceError::Malformed(err.to_string())
        })?;

        tracing::debug!(paths = parsed.paths.len(), "routing service answered");
        Ok(parsed.paths)
    }
}
