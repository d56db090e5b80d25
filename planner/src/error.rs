use shared::Endpoint;
use thiserror::Error;

use crate::geocode::GeocodeError;
use crate::routing::RoutingServiceError;

/// Everything that can abort a planning call. An empty path list is not
/// here: it comes back as a [`shared::RouteResult`] with no primary.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Input your {0} location")]
    EmptyQuery(Endpoint),
    #[error("geocoding service unavailable for {which}: {source}")]
    GeocodeUnavailable {
        which: Endpoint,
        #[source]
        source: GeocodeError,
    },
    #[error("no match found for {0}")]
    NoGeocodeMatch(Endpoint),
    #[error("{0} is outside the supported area")]
    OutOfBounds(Endpoint),
    #[error("routing service error: {0}")]
    RoutingService(#[from] RoutingServiceError),
}

impl PlanError {
    /// Stable machine-readable tag, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyQuery(_) => "empty_query",
            Self::GeocodeUnavailable { .. } => "geocode_unavailable",
            Self::NoGeocodeMatch(_) => "no_geocode_match",
            Self::OutOfBounds(_) => "out_of_bounds",
            Self::RoutingService(_) => "routing_service_error",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
