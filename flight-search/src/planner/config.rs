//! Search configuration for the itinerary planner.

use std::str::FromStr;

use chrono::Duration;

use crate::domain::Zone;

use super::validate::LayoverWindow;

/// What a search does when the data source fails to return a day's flights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchFailurePolicy {
    /// Treat the failed fetch as "no flights" and keep searching.
    #[default]
    Prune,
    /// Abandon the whole search with an error.
    Abort,
}

impl FromStr for FetchFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prune" => Ok(FetchFailurePolicy::Prune),
            "abort" => Ok(FetchFailurePolicy::Abort),
            other => Err(format!("unknown fetch failure policy: {other}")),
        }
    }
}

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of legs in one itinerary.
    pub max_hops: usize,

    /// Minimum time on the ground between legs (minutes).
    /// Connections tighter than this are rejected.
    pub min_layover_mins: i64,

    /// Maximum time on the ground between legs (minutes).
    pub max_layover_mins: i64,

    /// Arrivals after this hour (in the canonical zone) also look for
    /// connections on the following day.
    pub next_day_cutoff_hour: u32,

    /// Zone that day buckets and the cutoff are judged in.
    pub canonical_zone: Zone,

    /// Reject itineraries that return to an airport they already visited.
    pub forbid_revisits: bool,

    /// How to handle a failed flight fetch.
    pub fetch_failure: FetchFailurePolicy,

    /// Maximum number of flight fetches issued concurrently per search level.
    pub batch_size: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given limits and default options.
    pub fn new(
        max_hops: usize,
        min_layover_mins: i64,
        max_layover_mins: i64,
        next_day_cutoff_hour: u32,
    ) -> Self {
        Self {
            max_hops,
            min_layover_mins,
            max_layover_mins,
            next_day_cutoff_hour,
            ..Self::default()
        }
    }

    /// Set whether airports may be revisited within one itinerary.
    pub fn with_forbid_revisits(mut self, forbid: bool) -> Self {
        self.forbid_revisits = forbid;
        self
    }

    /// Set the fetch failure policy.
    pub fn with_fetch_failure(mut self, policy: FetchFailurePolicy) -> Self {
        self.fetch_failure = policy;
        self
    }

    /// Set the canonical zone.
    pub fn with_canonical_zone(mut self, zone: Zone) -> Self {
        self.canonical_zone = zone;
        self
    }

    /// Set the per-level fetch concurrency.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Returns the minimum layover as a Duration.
    pub fn min_layover(&self) -> Duration {
        Duration::minutes(self.min_layover_mins)
    }

    /// Returns the maximum layover as a Duration.
    pub fn max_layover(&self) -> Duration {
        Duration::minutes(self.max_layover_mins)
    }

    /// The layover bounds as a validator.
    pub fn layover_window(&self) -> LayoverWindow {
        LayoverWindow::new(self.min_layover(), self.max_layover())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_hops: 3,
            min_layover_mins: 30,
            max_layover_mins: 180, // 3 hours
            next_day_cutoff_hour: 21,
            canonical_zone: Zone::GMT,
            forbid_revisits: false,
            fetch_failure: FetchFailurePolicy::Prune,
            batch_size: 8,
        }
    }
}
