//! Breadth-first itinerary search.
//!
//! Finds every itinerary from a departure airport to an arrival airport
//! that respects seat availability, layover bounds and the hop limit.
//! Flights are pulled from a [`FlightSource`] one (airport, day) at a time
//! as the frontier reaches new airports.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, trace, warn};

use crate::domain::{
    Aircraft, AirportCode, DayBucket, Flight, FlightTime, Itinerary, ReservationOption, SeatClass,
    TimeError,
};
use crate::source::SourceError;

use super::capacity::AircraftCapacityTable;
use super::config::{FetchFailurePolicy, SearchConfig};
use super::validate::SeatAvailability;

/// Error from itinerary search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// A timestamp in the request or in fetched data is malformed
    #[error(transparent)]
    Time(#[from] TimeError),

    /// The data source failed and the configuration says to give up
    #[error("failed to fetch {what}: {message}")]
    Fetch { what: String, message: String },
}

impl SearchError {
    /// Classify a source failure: corrupt data is a time error, anything
    /// else is a fetch error.
    fn from_source(what: impl Into<String>, err: SourceError) -> Self {
        match err {
            SourceError::Time(e) => SearchError::Time(e),
            other => SearchError::Fetch {
                what: what.into(),
                message: other.to_string(),
            },
        }
    }
}

/// Request for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub departure: AirportCode,
    pub arrival: AirportCode,
    /// Any time on the day of travel; only its day bucket matters.
    pub departure_date: FlightTime,
    pub seat_class: SeatClass,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(
        departure: AirportCode,
        arrival: AirportCode,
        departure_date: FlightTime,
        seat_class: SeatClass,
    ) -> Self {
        Self {
            departure,
            arrival,
            departure_date,
            seat_class,
        }
    }

    /// Build a request from user-supplied text.
    ///
    /// A bad airport code or seat class is an `InvalidRequest`; a bad date
    /// is a `Time` error.
    pub fn parse(
        departure: &str,
        arrival: &str,
        departure_date: &str,
        seat_class: &str,
    ) -> Result<Self, SearchError> {
        let departure = AirportCode::parse_normalized(departure)
            .map_err(|e| SearchError::InvalidRequest(format!("departure: {e}")))?;
        let arrival = AirportCode::parse_normalized(arrival)
            .map_err(|e| SearchError::InvalidRequest(format!("arrival: {e}")))?;
        let departure_date = FlightTime::parse(departure_date)?;
        let seat_class = seat_class
            .parse::<SeatClass>()
            .map_err(|e| SearchError::InvalidRequest(e.to_string()))?;

        Ok(Self::new(departure, arrival, departure_date, seat_class))
    }
}

/// Result of itinerary search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Complete itineraries, in discovery order (fewest legs first).
    pub options: Vec<ReservationOption>,

    /// Number of flight fetches issued to the source.
    pub fetches: usize,
}

impl SearchResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self {
            options: Vec::new(),
            fetches: 0,
        }
    }
}

/// Trait for providing flight data.
///
/// This abstraction allows the planner to be tested with mock data and
/// to run over either the live service or a cache in front of it.
pub trait FlightSource {
    /// All flights departing `airport` during `day`.
    ///
    /// An airport/day with no flights is an empty list, not an error.
    fn fetch_flights(
        &self,
        airport: &AirportCode,
        day: DayBucket,
    ) -> impl Future<Output = Result<Vec<Arc<Flight>>, SourceError>> + Send;

    /// The full aircraft catalog.
    fn fetch_aircraft(&self) -> impl Future<Output = Result<Vec<Aircraft>, SourceError>> + Send;
}

/// Key for one day of departures from one airport.
type FetchKey = (AirportCode, DayBucket);

/// Itinerary planner using BFS.
pub struct Planner<'a, S: FlightSource> {
    source: &'a S,
    config: &'a SearchConfig,
}

impl<'a, S: FlightSource> Planner<'a, S> {
    /// Create a new planner.
    pub fn new(source: &'a S, config: &'a SearchConfig) -> Self {
        Self { source, config }
    }

    /// Search for itineraries.
    ///
    /// The frontier is expanded one level (one more leg) at a time. Within a
    /// level, itineraries are handled in the order they were created, and
    /// each one's candidates are taken same-day first, then next-day, in the
    /// order the source listed them. That is exactly the order a single FIFO
    /// queue would produce, so options come out shortest first.
    ///
    /// Fetches for the airports a level needs are issued together (up to
    /// `batch_size` at once) and remembered for the rest of the call.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        if request.departure == request.arrival {
            debug!(
                airport = %request.departure,
                "departure equals arrival, nothing to search"
            );
            return Ok(SearchResult::empty());
        }

        let catalog = self
            .source
            .fetch_aircraft()
            .await
            .map_err(|e| SearchError::from_source("aircraft catalog", e))?;
        let capacity = AircraftCapacityTable::new(catalog);
        let seats = SeatAvailability::new(&capacity);
        let layover = self.config.layover_window();
        let class = request.seat_class;

        let mut fetched: HashMap<FetchKey, Vec<Arc<Flight>>> = HashMap::new();
        let mut fetches = 0;

        let origin = (
            request.departure,
            request.departure_date.day_bucket(self.config.canonical_zone),
        );
        fetches += self.fetch_all(&[origin], &mut fetched).await?;

        let mut frontier: Vec<Itinerary> = Vec::new();
        for flight in fetched.get(&origin).into_iter().flatten() {
            if flight.departure_airport != request.departure {
                trace!(flight = %flight.number, "outbound flight departs elsewhere");
                continue;
            }
            if !seats.has_seat(flight, class) {
                trace!(flight = %flight.number, "outbound flight full");
                continue;
            }
            frontier.push(Itinerary::start(flight.clone()));
        }

        let mut options = Vec::new();
        let mut level = 1;

        while !frontier.is_empty() {
            // First pass: emit complete itineraries, drop those at the hop
            // limit, and work out which days the rest need.
            let mut expanding: Vec<(Itinerary, Vec<FetchKey>)> = Vec::new();

            for itinerary in frontier {
                if itinerary.ends_at(&request.arrival) {
                    match ReservationOption::complete(itinerary, &request.arrival) {
                        Ok(option) => options.push(option),
                        Err(e) => warn!(error = %e, "dropping completed itinerary"),
                    }
                    continue;
                }

                if itinerary.leg_count() >= self.config.max_hops {
                    continue;
                }

                let keys = self.connection_days(itinerary.last())?;
                expanding.push((itinerary, keys));
            }

            let mut seen: HashSet<FetchKey> = HashSet::new();
            let missing: Vec<FetchKey> = expanding
                .iter()
                .flat_map(|(_, keys)| keys.iter().copied())
                .filter(|key| !fetched.contains_key(key) && seen.insert(*key))
                .collect();
            fetches += self.fetch_all(&missing, &mut fetched).await?;

            // Second pass: extend each itinerary with every feasible candidate.
            let mut next_frontier: Vec<Itinerary> = Vec::new();

            for (itinerary, keys) in &expanding {
                let arrived = itinerary.last().arrival_time;

                for key in keys {
                    for candidate in fetched.get(key).into_iter().flatten() {
                        if !seats.has_seat(candidate, class) {
                            trace!(flight = %candidate.number, "no seat");
                            continue;
                        }
                        if !layover.is_valid(arrived, candidate.departure_time) {
                            trace!(flight = %candidate.number, "layover out of range");
                            continue;
                        }
                        if self.config.forbid_revisits
                            && itinerary.visits(&candidate.arrival_airport)
                        {
                            trace!(flight = %candidate.number, "revisits airport");
                            continue;
                        }
                        match itinerary.extended(candidate.clone()) {
                            Ok(next) => next_frontier.push(next),
                            Err(e) => trace!(flight = %candidate.number, error = %e, "skipping"),
                        }
                    }
                }
            }

            debug!(
                level,
                expanded = expanding.len(),
                next = next_frontier.len(),
                options = options.len(),
                "search level complete"
            );

            frontier = next_frontier;
            level += 1;
        }

        debug!(
            from = %request.departure,
            to = %request.arrival,
            options = options.len(),
            fetches,
            "search complete"
        );

        Ok(SearchResult { options, fetches })
    }

    /// Days to look for connections from a leg's arrival airport.
    ///
    /// Always the arrival day; also the next day when the arrival is late.
    fn connection_days(&self, last: &Flight) -> Result<Vec<FetchKey>, SearchError> {
        let zone = self.config.canonical_zone;
        let arrival = last.arrival_time;
        let mut keys = vec![(last.arrival_airport, arrival.day_bucket(zone))];

        if arrival.spills_to_next_day(self.config.next_day_cutoff_hour, zone) {
            let next_day = arrival.add_one_day()?.day_bucket(zone);
            keys.push((last.arrival_airport, next_day));
        }

        Ok(keys)
    }

    /// Fetch flights for each key, a batch at a time, into `fetched`.
    ///
    /// Returns the number of fetches issued.
    async fn fetch_all(
        &self,
        keys: &[FetchKey],
        fetched: &mut HashMap<FetchKey, Vec<Arc<Flight>>>,
    ) -> Result<usize, SearchError> {
        let mut calls = 0;

        for batch in keys.chunks(self.config.batch_size.max(1)) {
            let futures: Vec<_> = batch
                .iter()
                .map(|key| async move { (*key, self.source.fetch_flights(&key.0, key.1).await) })
                .collect();

            for ((airport, day), result) in join_all(futures).await {
                calls += 1;
                match result {
                    Ok(flights) => {
                        trace!(%airport, %day, flights = flights.len(), "fetched flights");
                        fetched.insert((airport, day), flights);
                    }
                    Err(e) if e.is_malformed_data() => {
                        return Err(SearchError::from_source(
                            format!("flights from {airport} on {day}"),
                            e,
                        ));
                    }
                    Err(e) => match self.config.fetch_failure {
                        FetchFailurePolicy::Prune => {
                            warn!(%airport, %day, error = %e, "failed to fetch flights, using empty");
                            // Insert empty vec so we don't retry
                            fetched.insert((airport, day), Vec::new());
                        }
                        FetchFailurePolicy::Abort => {
                            return Err(SearchError::from_source(
                                format!("flights from {airport} on {day}"),
                                e,
                            ));
                        }
                    },
                }
            }
        }

        Ok(calls)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
