use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::error::ExportError;
use crate::models::{Coordinate, SearchState};

const CREATOR: &str = "city-distance";

pub fn encode_search_as_gpx(state: &SearchState) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_search_gpx(state, &mut buffer)?;
    Ok(BASE64.encode(buffer))
}

/// Writes both cities as named waypoints plus a two-point track between them.
pub fn write_search_gpx<W: Write>(state: &SearchState, writer: W) -> Result<(), ExportError> {
    let route = state.route.ok_or(ExportError::Unresolved)?;

    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.into()),
        ..Default::default()
    };
    gpx.waypoints.push(named_waypoint(route.origin, &state.city1));
    gpx.waypoints.push(named_waypoint(route.destination, &state.city2));

    let mut track = Track {
        name: Some(format!("{} to {}", state.city1, state.city2)),
        ..Default::default()
    };
    let mut segment = TrackSegment::new();
    segment.points.push(to_waypoint(&route.origin));
    segment.points.push(to_waypoint(&route.destination));
    track.segments.push(segment);
    gpx.tracks.push(track);

    gpx::write(&gpx, writer)?;
    Ok(())
}

fn named_waypoint(coord: Coordinate, name: &str) -> Waypoint {
    let mut waypoint = to_waypoint(&coord);
    waypoint.name = Some(name.to_owned());
    waypoint
}

fn to_waypoint(coord: &Coordinate) -> Waypoint {
    Waypoint::new(Point::new(coord.lon, coord.lat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::distance_between;
    use crate::models::ResolvedRoute;

    fn delhi_mumbai() -> SearchState {
        let origin = Coordinate {
            lat: 28.6139,
            lon: 77.2090,
        };
        let destination = Coordinate {
            lat: 19.0760,
            lon: 72.8777,
        };
        SearchState::resolved(
            "Delhi",
            "Mumbai",
            ResolvedRoute {
                origin,
                destination,
                distance_km: distance_between(origin, destination),
            },
        )
    }

    #[test]
    fn writes_named_waypoints_and_track() {
        let mut buffer = Vec::new();
        write_search_gpx(&delhi_mumbai(), &mut buffer).unwrap();

        let parsed = gpx::read(buffer.as_slice()).unwrap();
        assert_eq!(parsed.waypoints.len(), 2);
        assert_eq!(parsed.waypoints[0].name.as_deref(), Some("Delhi"));
        assert_eq!(parsed.waypoints[1].name.as_deref(), Some("Mumbai"));
        assert_eq!(parsed.tracks[0].segments[0].points.len(), 2);

        let first = parsed.waypoints[0].point();
        assert!((first.y() - 28.6139).abs() < 1e-9);
        assert!((first.x() - 77.2090).abs() < 1e-9);
    }

    #[test]
    fn base64_payload_is_not_empty() {
        let encoded = encode_search_as_gpx(&delhi_mumbai()).unwrap();
        let decoded = BASE64.decode(encoded).unwrap();
        assert!(String::from_utf8(decoded).unwrap().contains("<gpx"));
    }

    #[test]
    fn cleared_state_cannot_be_exported() {
        let result = encode_search_as_gpx(&SearchState::cleared("Delhi", "Atlantis"));
        assert!(matches!(result, Err(ExportError::Unresolved)));
    }
}
