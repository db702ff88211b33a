use std::{fs::File, io::BufWriter, net::SocketAddr, path::PathBuf, sync::Arc};

use city_distance::{
    AppState,
    config::GeocoderConfig,
    create_router,
    display::LogDisplay,
    geocoding::NominatimGeocoder,
    gpx_export::write_search_gpx,
    search::SearchOrchestrator,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Geocode two cities and measure the great-circle distance between them"
)]
struct Cli {
    #[command(flatten)]
    geocoder: GeocoderConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API used by the web widget
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
    },
    /// Run a single search and print the result
    Search {
        city1: String,
        city2: String,

        /// Also write both cities and the route between them to this GPX file
        #[arg(long)]
        gpx: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Command::Serve { .. } => "city_distance=debug,axum::rejection=trace",
        Command::Search { .. } => "info",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let geocoder = Arc::new(NominatimGeocoder::new(&cli.geocoder)?);
    tracing::info!("geocoding through {}", geocoder.search_url());

    match cli.command {
        Command::Serve { bind } => serve(geocoder, bind).await,
        Command::Search { city1, city2, gpx } => search_once(geocoder, &city1, &city2, gpx).await,
    }
}

async fn serve(
    geocoder: Arc<NominatimGeocoder>,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(AppState::new(geocoder));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("starting backend on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn search_once(
    geocoder: Arc<NominatimGeocoder>,
    city1: &str,
    city2: &str,
    gpx: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut orchestrator = SearchOrchestrator::new(geocoder);
    let outcome = orchestrator.search(city1, city2).await;

    let mut display = LogDisplay::default();
    if let Some(state) = orchestrator.latest() {
        shared::present(&mut display, state);
    }

    match outcome {
        Ok(state) => {
            for line in display.lines() {
                println!("{line}");
            }
            if let Some(route) = state.route {
                println!("Distance: {} km", route.distance_km);
            }
            if let Some(path) = gpx {
                write_search_gpx(&state, BufWriter::new(File::create(&path)?))?;
                tracing::info!("GPX written to {}", path.display());
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.kind().user_message());
            Err(err.into())
        }
    }
}
