pub mod bounds;
pub mod config;
pub mod controller;
pub mod error;
pub mod geocode;
pub mod orchestrator;
pub mod routing;
pub mod session;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum::extract::{rejection::JsonRejection, State};
use shared::{ApiError, PlanRequest, PlanResponse, RegionResponse};
use tower_http::cors::CorsLayer;

use crate::bounds::REGION_CENTER;
use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::geocode::NominatimGeocoder;
use crate::orchestrator::RoutePlanner;
use crate::routing::PathsClient;

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<RoutePlanner>,
}

impl AppState {
    /// Builds the HTTP clients described by `config`.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let geocoder = NominatimGeocoder::new(
            client.clone(),
            config.geocoder_base_url.clone(),
            &bounds::REGION,
        );
        let router = PathsClient::new(client, config.routing_base_url.clone());

        Ok(Self {
            planner: Arc::new(RoutePlanner::new(Arc::new(geocoder), Arc::new(router))),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ping))
        .route("/api/region", get(region_handler))
        .route("/api/plan", post(plan_handler))
        .with_state(state)
}

/// CORS for the browser front-end served from `origin`.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]))
}

async fn ping() -> impl IntoResponse {
    Json(serde_json::json!({ "Ping": "Pong" }))
}

async fn region_handler(State(state): State<AppState>) -> Json<RegionResponse> {
    Json(RegionResponse {
        bounds: *state.planner.bounds(),
        center: REGION_CENTER,
    })
}

async fn plan_handler(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<PlanResponse>, (StatusCode, Json<ApiError>)> {
    let Json(request) = payload.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                kind: "invalid_request".to_string(),
                message: rejection.body_text(),
            }),
        )
    })?;

    let route = state.planner.plan(&request).await.map_err(plan_error)?;
    Ok(Json(PlanResponse::from(route)))
}

fn plan_error(err: PlanError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        PlanError::EmptyQuery(_) => StatusCode::BAD_REQUEST,
        PlanError::NoGeocodeMatch(_) => StatusCode::NOT_FOUND,
        PlanError::OutOfBounds(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PlanError::GeocodeUnavailable { .. } | PlanError::RoutingService(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    if status.is_server_error() {
        tracing::error!("plan request failed: {err}");
    } else {
        tracing::info!(kind = err.kind(), "plan request rejected: {err}");
    }
    (
        status,
        Json(ApiError {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }),
    )
}
