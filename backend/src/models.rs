use serde::{Deserialize, Serialize};

pub use shared::{
    ApiError, Coordinate, DistanceKm, ErrorKind, Marker, ResolvedRoute, SearchRequest,
    SearchState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceRequest {
    pub from: Coordinate,
    pub to: Coordinate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub distance_km: DistanceKm,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GpxExport {
    pub gpx_base64: String,
}
