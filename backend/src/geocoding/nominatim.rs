use reqwest::{Client, Url};
use serde::Deserialize;

use super::{GeocodeError, GeocodeFuture, Geocoder};
use crate::config::GeocoderConfig;
use crate::models::Coordinate;

/// Client for a Nominatim-compatible `/search` endpoint.
pub struct NominatimGeocoder {
    client: Client,
    search_url: Url,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let invalid = |reason: String| GeocodeError::InvalidEndpoint {
            url: config.base_url.clone(),
            reason,
        };
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let search_url = Url::parse(&base)
            .and_then(|url| url.join("search"))
            .map_err(|e| invalid(e.to_string()))?;
        if search_url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".into()));
        }

        Ok(Self { client, search_url })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    async fn lookup(&self, place: &str) -> Result<Option<Coordinate>, GeocodeError> {
        tracing::debug!(place, "geocoding lookup");
        let response = self
            .client
            .get(self.search_url.clone())
            .query(&[("format", "json"), ("limit", "1"), ("q", place)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        let body = response.text().await?;
        let candidates: Vec<Candidate> = serde_json::from_str(&body)
            .map_err(|e| GeocodeError::Malformed(format!("unexpected search body: {e}")))?;

        let Some(best) = candidates.into_iter().next() else {
            tracing::debug!(place, "no candidates");
            return Ok(None);
        };
        let coord = best.coordinate()?;
        tracing::debug!(
            place,
            lat = coord.lat,
            lon = coord.lon,
            matched = best.display_name.as_deref().unwrap_or(""),
            "resolved"
        );
        Ok(Some(coord))
    }
}

impl Geocoder for NominatimGeocoder {
    fn resolve<'a>(&'a self, place: &'a str) -> GeocodeFuture<'a> {
        Box::pin(self.lookup(place))
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    lat: Degrees,
    lon: Degrees,
    #[serde(default)]
    display_name: Option<String>,
}

impl Candidate {
    fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        let lat = self.lat.value("lat")?;
        let lon = self.lon.value("lon")?;
        Coordinate::new(lat, lon)
            .ok_or_else(|| GeocodeError::Malformed(format!("coordinate out of range: ({lat}, {lon})")))
    }
}

/// Nominatim sends degrees as strings; other deployments send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self, field: &str) -> Result<f64, GeocodeError> {
        match self {
            Degrees::Number(value) => Ok(*value),
            Degrees::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|e| GeocodeError::Malformed(format!("invalid {field} {text:?}: {e}"))),
        }
    }
}
