use shared::MapDisplay;

use crate::models::{Coordinate, Marker};

/// Map display for terminal use: renders through `tracing` and keeps the
/// drawn lines so the CLI can print them.
#[derive(Debug, Default)]
pub struct LogDisplay {
    lines: Vec<String>,
}

impl LogDisplay {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl MapDisplay for LogDisplay {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn render_markers(&mut self, markers: &[Marker]) {
        for marker in markers {
            tracing::debug!(label = %marker.label, "marker");
            self.lines.push(format!(
                "📍 {} ({:.5}, {:.5})",
                marker.label, marker.position.lat, marker.position.lon
            ));
        }
    }

    fn render_route(&mut self, from: Coordinate, to: Coordinate) {
        tracing::debug!(?from, ?to, "route");
        self.lines.push(format!(
            "route ({:.5}, {:.5}) -> ({:.5}, {:.5})",
            from.lat, from.lon, to.lat, to.lon
        ));
    }
}
