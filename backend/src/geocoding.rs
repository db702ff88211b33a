pub mod nominatim;

use std::future::Future;
use std::pin::Pin;

use crate::models::Coordinate;

pub use nominatim::NominatimGeocoder;

/// Failure to obtain an answer from the lookup service.
///
/// "No such place" is not an error: it is `Ok(None)` from [`Geocoder::resolve`].
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoding service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed geocoding response: {0}")]
    Malformed(String),
    #[error("invalid geocoder endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

pub type GeocodeFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<Coordinate>, GeocodeError>> + Send + 'a>>;

/// Resolves a free-text place name to its best matching coordinate.
///
/// Implementations issue exactly one lookup per call, with no retry and no
/// caching. The place name is passed through untouched.
pub trait Geocoder: Send + Sync {
    fn resolve<'a>(&'a self, place: &'a str) -> GeocodeFuture<'a>;
}
