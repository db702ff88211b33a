pub mod config;
pub mod display;
pub mod distance;
pub mod error;
pub mod geocoding;
pub mod gpx_export;
pub mod models;
pub mod search;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::distance::distance_between;
use crate::error::{ApiFailure, api_failure, export_failure, search_failure};
use crate::geocoding::Geocoder;
use crate::gpx_export::encode_search_as_gpx;
use crate::models::{
    DistanceRequest, DistanceResponse, ErrorKind, GpxExport, SearchRequest, SearchState,
};
use crate::search::SearchOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<Mutex<SearchOrchestrator>>,
}

impl AppState {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            search: Arc::new(Mutex::new(SearchOrchestrator::new(geocoder))),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", post(search_handler))
        .route("/api/search/latest", get(latest_handler))
        .route("/api/search/latest/gpx", get(latest_gpx_handler))
        .route("/api/distance", post(distance_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// The lock is held for the whole search so searches never overlap.
async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchState>, ApiFailure> {
    let mut search = state.search.lock().await;
    search
        .search(&req.city1, &req.city2)
        .await
        .map(Json)
        .map_err(|err| search_failure(&err))
}

async fn latest_handler(State(state): State<AppState>) -> Json<Option<SearchState>> {
    Json(state.search.lock().await.latest().cloned())
}

async fn latest_gpx_handler(State(state): State<AppState>) -> Result<Json<GpxExport>, ApiFailure> {
    let latest = state.search.lock().await.latest().cloned();
    let Some(latest) = latest else {
        return Err(api_failure(
            StatusCode::NOT_FOUND,
            ErrorKind::NotFound,
            "no search has completed yet".into(),
        ));
    };
    let gpx_base64 = encode_search_as_gpx(&latest).map_err(export_failure)?;
    Ok(Json(GpxExport { gpx_base64 }))
}

async fn distance_handler(Json(req): Json<DistanceRequest>) -> Result<Json<DistanceResponse>, ApiFailure> {
    if !req.from.is_valid() || !req.to.is_valid() {
        return Err(api_failure(
            StatusCode::BAD_REQUEST,
            ErrorKind::InvalidCoordinate,
            "coordinates must be within lat [-90, 90] and lon [-180, 180]".into(),
        ));
    }
    Ok(Json(DistanceResponse {
        distance_km: distance_between(req.from, req.to),
    }))
}
