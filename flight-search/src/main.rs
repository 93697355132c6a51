use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flight_search::cache::{CacheConfig, CachedFlightSource};
use flight_search::planner::SearchConfig;
use flight_search::source::{FlightBackend, MockFlightSource, ReservationClient, ReservationConfig};
use flight_search::web::{AppState, create_router};

/// Read and parse an environment variable, keeping `default` when it is
/// unset or malformed.
fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(e) => {
                warn!(var = name, value = %raw, error = %e, "ignoring malformed setting");
                default
            }
        },
        Err(_) => default,
    }
}

fn search_config_from_env() -> SearchConfig {
    let defaults = SearchConfig::default();

    SearchConfig::new(
        env_or("FLIGHT_MAX_HOPS", defaults.max_hops),
        env_or("FLIGHT_MIN_LAYOVER_MINS", defaults.min_layover_mins),
        env_or("FLIGHT_MAX_LAYOVER_MINS", defaults.max_layover_mins),
        env_or("FLIGHT_CUTOFF_HOUR", defaults.next_day_cutoff_hour),
    )
    .with_forbid_revisits(env_or("FLIGHT_FORBID_REVISITS", defaults.forbid_revisits))
    .with_fetch_failure(env_or("FLIGHT_FETCH_FAILURE", defaults.fetch_failure))
    .with_canonical_zone(env_or("FLIGHT_CANONICAL_ZONE", defaults.canonical_zone))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let search_config = search_config_from_env();

    // Pick the data source
    let backend = match std::env::var("FLIGHT_MOCK_DIR") {
        Ok(dir) => {
            let mock = MockFlightSource::new(&dir, search_config.canonical_zone)
                .expect("Failed to load mock flight data");
            info!(%dir, airports = mock.airports().len(), "serving mock flight data");
            FlightBackend::Mock(mock)
        }
        Err(_) => {
            let agency = std::env::var("FLIGHT_AGENCY").unwrap_or_else(|_| {
                warn!("FLIGHT_AGENCY not set. The reservation service will reject requests.");
                String::new()
            });
            let mut config = ReservationConfig::new(agency);
            if let Ok(url) = std::env::var("FLIGHT_SERVER_URL") {
                config = config.with_base_url(url);
            }
            info!(url = %config.base_url, "using reservation service");
            FlightBackend::Remote(
                ReservationClient::new(config).expect("Failed to create reservation client"),
            )
        }
    };

    let cached = CachedFlightSource::new(backend, &CacheConfig::default());
    info!(
        max_hops = search_config.max_hops,
        min_layover_mins = search_config.min_layover_mins,
        max_layover_mins = search_config.max_layover_mins,
        cutoff_hour = search_config.next_day_cutoff_hour,
        forbid_revisits = search_config.forbid_revisits,
        fetch_failure = ?search_config.fetch_failure,
        canonical_zone = %search_config.canonical_zone,
        "search configuration"
    );

    let state = AppState::new(cached, search_config);
    let app = create_router(state);

    let addr = env_or("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)));
    info!("Flight search listening on http://{addr}");
    info!("  GET  /health  - Health check");
    info!("  GET  /search  - Search itineraries (from, to, date, class)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
