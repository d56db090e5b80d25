use std::sync::Arc;

use shared::{BoundingBox, Endpoint, GeoPoint, PlanRequest, RouteResult};

use crate::bounds::{is_in_bounds, REGION};
use crate::error::PlanError;
use crate::geocode::Geocoder;
use crate::routing::RouteProvider;

/// Sequences geocoding, bounds validation and routing for one request.
///
/// The planner does no I/O of its own; all network traffic goes through the
/// [`Geocoder`] and [`RouteProvider`] it was built with. Any failure aborts
/// the call and nothing partial is returned.
#[derive(Clone)]
pub struct RoutePlanner {
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn RouteProvider>,
    bounds: BoundingBox,
}

impl RoutePlanner {
    pub fn new(geocoder: Arc<dyn Geocoder>, router: Arc<dyn RouteProvider>) -> Self {
        Self::with_bounds(geocoder, router, REGION)
    }

    pub fn with_bounds(
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn RouteProvider>,
        bounds: BoundingBox,
    ) -> Self {
        Self {
            geocoder,
            router,
            bounds,
        }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub async fn plan(&self, request: &PlanRequest) -> Result<RouteResult, PlanError> {
        match request {
            PlanRequest::Queries {
                origin,
                destination,
            } => self.plan_route_by_query(origin, destination).await,
            PlanRequest::Points {
                origin,
                destination,
            } => self.plan_route_between(*origin, *destination).await,
        }
    }

    /// Resolves both names concurrently, then plans between the best matches.
    pub async fn plan_route_by_query(
        &self,
        origin_query: &str,
        destination_query: &str,
    ) -> Result<RouteResult, PlanError> {
        let origin_query = non_blank(origin_query, Endpoint::Origin)?;
        let destination_query = non_blank(destination_query, Endpoint::Destination)?;

        let (origin, destination) = tokio::try_join!(
            self.resolve(origin_query, Endpoint::Origin),
            self.resolve(destination_query, Endpoint::Destination),
        )?;

        self.plan_route_between(origin, destination).await
    }

    /// Click-driven form: both points are already known.
    pub async fn plan_route_between(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RouteResult, PlanError> {
        if !is_in_bounds(origin, &self.bounds) {
            return Err(PlanError::OutOfBounds(Endpoint::Origin));
        }
        if !is_in_bounds(destination, &self.bounds) {
            return Err(PlanError::OutOfBounds(Endpoint::Destination));
        }

        let paths = self.router.request_routes(origin, destination).await?;
        let result = RouteResult::from_paths(paths);

        if result.is_no_path_found() {
            tracing::info!("routing service found no paths");
        } else {
            tracing::info!(alternates = result.alternates.len(), "route planned");
        }
        Ok(result)
    }

    async fn resolve(&self, query: &str, which: Endpoint) -> Result<GeoPoint, PlanError> {
        let candidates = self
            .geocoder
            .geocode(query)
            .await
            .map_err(|source| PlanError::GeocodeUnavailable { which, source })?;

        candidates
            .first()
            .copied()
            .ok_or(PlanError::NoGeocodeMatch(which))
    }
}

fn non_blank(query: &str, which: Endpoint) -> Result<&str, PlanError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(PlanError::EmptyQuery(which))
    } else {
        Ok(trimmed)
    }
}
