//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Flight, ReservationOption, SeatClass};

/// Query string for `/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Departure airport code
    pub from: String,

    /// Arrival airport code
    pub to: String,

    /// Day of travel as a flight timestamp, e.g. `2016 May 10 00:00 GMT`
    pub date: String,

    /// Seat class (defaults to coach)
    pub class: Option<String>,
}

/// Response for `/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub options: Vec<OptionResult>,

    /// Flight lists requested from the data source
    pub fetches: usize,
}

/// One reservation option.
#[derive(Debug, Serialize)]
pub struct OptionResult {
    pub departure: String,
    pub arrival: String,
    pub departure_time: String,
    pub arrival_time: String,

    /// Door-to-door time in minutes
    pub total_minutes: i64,

    /// Time on the ground at each connection, in minutes
    pub layover_minutes: Vec<i64>,

    /// Sum of leg fares in the requested class, in cents
    pub fare_cents: u64,

    pub legs: Vec<LegResult>,
}

/// One leg of an option.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub number: String,
    pub aircraft: String,
    pub departure: String,
    pub departure_time: String,
    pub arrival: String,
    pub arrival_time: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl OptionResult {
    pub fn from_option(option: &ReservationOption, class: SeatClass) -> Self {
        Self {
            departure: option.departure_airport().to_string(),
            arrival: option.arrival_airport().to_string(),
            departure_time: option.departure_time().to_string(),
            arrival_time: option.arrival_time().to_string(),
            total_minutes: option.total_duration().num_minutes(),
            layover_minutes: option.layovers().iter().map(|d| d.num_minutes()).collect(),
            fare_cents: option.total_fare_cents(class),
            legs: option
                .legs()
                .iter()
                .map(|f| LegResult::from_flight(f))
                .collect(),
        }
    }
}

impl LegResult {
    pub fn from_flight(flight: &Flight) -> Self {
        Self {
            number: flight.number.clone(),
            aircraft: flight.aircraft.clone(),
            departure: flight.departure_airport.to_string(),
            departure_time: flight.departure_time.to_string(),
            arrival: flight.arrival_airport.to_string(),
            arrival_time: flight.arrival_time.to_string(),
        }
    }
}
