use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite values and anything outside
    /// lat [-90, 90] / lon [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let coord = Self { lat, lon };
        coord.is_valid().then_some(coord)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Great-circle distance in kilometres, kept at full precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceKm(f64);

impl DistanceKm {
    pub fn new(km: f64) -> Self {
        Self(km.max(0.0))
    }

    pub fn km(self) -> f64 {
        self.0
    }

    /// Two-decimal value used for display.
    pub fn rounded(self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }
}

impl fmt::Display for DistanceKm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub city1: String,
    pub city2: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub distance_km: DistanceKm,
}

/// Snapshot published after a search completes.
///
/// `route` is present only when both names resolved, so a lone marker or a
/// distance without its endpoints cannot be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub city1: String,
    pub city2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<ResolvedRoute>,
}

impl SearchState {
    pub fn resolved(city1: &str, city2: &str, route: ResolvedRoute) -> Self {
        Self {
            city1: city1.to_owned(),
            city2: city2.to_owned(),
            route: Some(route),
        }
    }

    pub fn cleared(city1: &str, city2: &str) -> Self {
        Self {
            city1: city1.to_owned(),
            city2: city2.to_owned(),
            route: None,
        }
    }

    pub fn markers(&self) -> Vec<Marker> {
        match self.route {
            Some(route) => vec![
                Marker {
                    position: route.origin,
                    label: self.city1.clone(),
                },
                Marker {
                    position: route.destination,
                    label: self.city2.clone(),
                },
            ],
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingInput,
    InvalidCoordinate,
    NotFound,
    ServiceUnavailable,
}

impl ErrorKind {
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::MissingInput => "Please enter both city names.",
            ErrorKind::InvalidCoordinate => "Coordinates are out of range.",
            ErrorKind::NotFound => "Invalid city names. Try again.",
            ErrorKind::ServiceUnavailable => {
                "The city lookup service is unavailable. Please try again later."
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Coordinate,
    pub label: String,
}

/// Anything able to show search results on a map.
pub trait MapDisplay {
    fn clear(&mut self);
    fn render_markers(&mut self, markers: &[Marker]);
    fn render_route(&mut self, from: Coordinate, to: Coordinate);
}

/// Replaces whatever the display shows with `state`.
///
/// A cleared state leaves the display empty.
pub fn present(display: &mut impl MapDisplay, state: &SearchState) {
    display.clear();
    if let Some(route) = state.route {
        display.render_markers(&state.markers());
        display.render_route(route.origin, route.destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDisplay {
        calls: Vec<String>,
    }

    impl MapDisplay for RecordingDisplay {
        fn clear(&mut self) {
            self.calls.push("clear".into());
        }

        fn render_markers(&mut self, markers: &[Marker]) {
            let labels: Vec<&str> = markers.iter().map(|m| m.label.as_str()).collect();
            self.calls.push(format!("markers {}", labels.join(",")));
        }

        fn render_route(&mut self, from: Coordinate, to: Coordinate) {
            self.calls
                .push(format!("route {},{} -> {},{}", from.lat, from.lon, to.lat, to.lon));
        }
    }

    fn delhi_mumbai() -> SearchState {
        SearchState::resolved(
            "Delhi",
            "Mumbai",
            ResolvedRoute {
                origin: Coordinate { lat: 28.6, lon: 77.2 },
                destination: Coordinate { lat: 19.0, lon: 72.8 },
                distance_km: DistanceKm::new(1162.0),
            },
        )
    }

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(Coordinate::new(90.0, 180.0).is_some());
        assert!(Coordinate::new(-90.0, -180.0).is_some());
        assert!(Coordinate::new(90.5, 0.0).is_none());
        assert!(Coordinate::new(0.0, -180.1).is_none());
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn distance_rounds_for_display_only() {
        let distance = DistanceKm::new(1161.456_78);
        assert_eq!(distance.km(), 1161.456_78);
        assert_eq!(distance.rounded(), 1161.46);
        assert_eq!(distance.to_string(), "1161.46");
    }

    #[test]
    fn distance_is_never_negative() {
        assert_eq!(DistanceKm::new(-0.0).km(), 0.0);
        assert_eq!(DistanceKm::new(0.0).to_string(), "0.00");
    }

    #[test]
    fn distance_serializes_as_plain_number() {
        let json = serde_json::to_string(&DistanceKm::new(12.5)).unwrap();
        assert_eq!(json, "12.5");
    }

    #[test]
    fn present_draws_both_markers_and_route() {
        let mut display = RecordingDisplay::default();
        present(&mut display, &delhi_mumbai());
        assert_eq!(
            display.calls,
            vec![
                "clear".to_string(),
                "markers Delhi,Mumbai".to_string(),
                "route 28.6,77.2 -> 19,72.8".to_string(),
            ]
        );
    }

    #[test]
    fn present_cleared_state_only_clears() {
        let mut display = RecordingDisplay::default();
        present(&mut display, &delhi_mumbai());
        present(&mut display, &SearchState::cleared("Delhi", "Atlantis"));
        assert_eq!(display.calls.last().map(String::as_str), Some("clear"));
        assert_eq!(display.calls.len(), 4);
    }

    #[test]
    fn cleared_state_omits_route_on_the_wire() {
        let json = serde_json::to_value(SearchState::cleared("a", "b")).unwrap();
        assert!(json.get("route").is_none());
        let back: SearchState = serde_json::from_value(json).unwrap();
        assert!(back.route.is_none());
    }

    #[test]
    fn error_kinds_use_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ServiceUnavailable).unwrap();
        assert_eq!(json, "\"service_unavailable\"");
        assert_ne!(
            ErrorKind::NotFound.user_message(),
            ErrorKind::ServiceUnavailable.user_message()
        );
    }
}
