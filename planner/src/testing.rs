//! In-memory stand-ins for the geocoding and routing services.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use shared::{GeoPoint, Path};

use crate::geocode::{GeocodeError, Geocoder};
use crate::routing::{RouteProvider, RoutingServiceError};

pub fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).expect("valid test coordinate")
}

/// Answers from a fixed table; unknown queries yield no candidates.
#[derive(Default)]
pub struct FakeGeocoder {
    answers: HashMap<String, Vec<GeoPoint>>,
    broken: HashSet<String>,
}

impl FakeGeocoder {
    pub fn with(mut self, query: &str, points: Vec<GeoPoint>) -> Self {
        self.answers.insert(query.to_string(), points);
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.broken.insert(query.to_string());
        self
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, query: &str) -> Result<Vec<GeoPoint>, GeocodeError> {
        if self.broken.contains(query) {
            return Err(GeocodeError::Malformed("fake outage".into()));
        }
        Ok(self.answers.get(query).cloned().unwrap_or_default())
    }
}

/// Returns the same paths for every request and records each call.
pub struct FakeRouter {
    paths: Option<Vec<Path>>,
    calls: Mutex<Vec<(GeoPoint, GeoPoint)>>,
}

impl FakeRouter {
    pub fn with_paths(paths: Vec<Vec<GeoPoint>>) -> Self {
        Self {
            paths: Some(paths.into_iter().map(Path::new).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            paths: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(GeoPoint, GeoPoint)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouteProvider for FakeRouter {
    async fn request_routes(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Vec<Path>, RoutingServiceError> {
        self.calls.lock().unwrap().push((origin, destination));
        self.paths
            .clone()
            .ok_or_else(|| RoutingServiceError::Malformed("fake outage".into()))
    }
}
