use axum::{Json, http::StatusCode};
use thiserror::Error;

use crate::models::{ApiError, ErrorKind};
use crate::search::SearchError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no resolved city pair to export")]
    Unresolved,
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}

pub type ApiFailure = (StatusCode, Json<ApiError>);

pub fn search_failure(err: &SearchError) -> ApiFailure {
    let kind = err.kind();
    let status = match kind {
        ErrorKind::MissingInput | ErrorKind::InvalidCoordinate => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ServiceUnavailable => StatusCode::BAD_GATEWAY,
    };
    api_failure(status, kind, err.to_string())
}

pub fn export_failure(err: ExportError) -> ApiFailure {
    match err {
        ExportError::Unresolved => {
            api_failure(StatusCode::NOT_FOUND, ErrorKind::NotFound, err.to_string())
        }
        ExportError::Gpx(_) => api_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ServiceUnavailable,
            err.to_string(),
        ),
    }
}

pub fn api_failure(status: StatusCode, kind: ErrorKind, message: String) -> ApiFailure {
    (status, Json(ApiError { kind, message }))
}
