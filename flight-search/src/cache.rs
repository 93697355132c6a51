//! Caching layer for flight data.
//!
//! Flight lists are cached per (departure airport, day bucket) and shared
//! between searches. The aircraft catalog changes rarely and is cached as a
//! single entry. Failed fetches are never cached, so the next search
//! retries them.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Aircraft, AirportCode, DayBucket, Flight};
use crate::planner::FlightSource;
use crate::source::SourceError;

/// Cache key for a day of departures.
type FlightsKey = (AirportCode, DayBucket);

/// Cached departures entry.
type FlightsEntry = Arc<Vec<Arc<Flight>>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached flight lists.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Flight source with caching.
///
/// Wraps any `FlightSource` and caches its successful responses. Build one
/// per process and share it by reference or `Arc`.
pub struct CachedFlightSource<S> {
    inner: S,
    flights: MokaCache<FlightsKey, FlightsEntry>,
    aircraft: MokaCache<(), Arc<Vec<Aircraft>>>,
}

impl<S: FlightSource> CachedFlightSource<S> {
    /// Create a new cached source.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let flights = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let aircraft = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self {
            inner,
            flights,
            aircraft,
        }
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached flight lists.
    ///
    /// Approximate: moka applies inserts and invalidations in the background.
    pub fn cache_entry_count(&self) -> u64 {
        self.flights.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.flights.invalidate_all();
        self.aircraft.invalidate_all();
    }
}

impl<S: FlightSource + Sync> FlightSource for CachedFlightSource<S> {
    async fn fetch_flights(
        &self,
        airport: &AirportCode,
        day: DayBucket,
    ) -> Result<Vec<Arc<Flight>>, SourceError> {
        let key = (*airport, day);

        if let Some(cached) = self.flights.get(&key).await {
            trace!(%airport, %day, "flights cache hit");
            return Ok(cached.as_ref().clone());
        }

        let flights = self.inner.fetch_flights(airport, day).await?;
        self.flights.insert(key, Arc::new(flights.clone())).await;

        Ok(flights)
    }

    async fn fetch_aircraft(&self) -> Result<Vec<Aircraft>, SourceError> {
        if let Some(cached) = self.aircraft.get(&()).await {
            return Ok(cached.as_ref().clone());
        }

        let aircraft = self.inner.fetch_aircraft().await?;
        self.aircraft.insert((), Arc::new(aircraft.clone())).await;

        Ok(aircraft)
    }
}
