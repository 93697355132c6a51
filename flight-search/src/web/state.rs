//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedFlightSource;
use crate::planner::SearchConfig;
use crate::source::FlightBackend;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached flight data source
    pub source: Arc<CachedFlightSource<FlightBackend>>,

    /// Search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(source: CachedFlightSource<FlightBackend>, config: SearchConfig) -> Self {
        Self {
            source: Arc::new(source),
            config: Arc::new(config),
        }
    }
}
