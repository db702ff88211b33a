use std::time::Duration;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = concat!("city-distance/", env!("CARGO_PKG_VERSION"));

/// Settings for the place-search service.
#[derive(Debug, Clone, clap::Args)]
pub struct GeocoderConfig {
    /// Base URL of a Nominatim-compatible search service
    #[arg(long = "geocoder-url", env = "GEOCODER_URL", default_value = DEFAULT_GEOCODER_URL)]
    pub base_url: String,

    /// User-Agent sent with every lookup (required by the public Nominatim instance)
    #[arg(long, env = "GEOCODER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds; unset means no client-side timeout
    #[arg(long, env = "GEOCODER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl GeocoderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}
