//! Itinerary planner using BFS search.
//!
//! This module implements the core search that answers:
//! "Which sequences of connecting flights take me from here to there on
//! this day, with a seat in my class on every leg?"
//!
//! The search expands itineraries one leg at a time, checking seat
//! availability and layover bounds for each connection, and pulls flights
//! from a [`FlightSource`] a day at a time as new airports are reached.

mod capacity;
mod config;
mod search;
mod validate;

pub use capacity::AircraftCapacityTable;
pub use config::{FetchFailurePolicy, SearchConfig};
pub use search::{FlightSource, Planner, SearchError, SearchRequest, SearchResult};
pub use validate::{LayoverWindow, SeatAvailability};
