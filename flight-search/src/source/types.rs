//! Reservation service response DTOs.
//!
//! These types map directly to the JSON the reservation service returns for
//! `list_type=departing` and `list_type=airplanes` queries. Values are kept
//! as sent; validation happens in [`super::convert`].

use serde::{Deserialize, Serialize};

/// One flight in a departing list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// Carrier flight number.
    pub number: String,

    /// Aircraft model identifier.
    pub airplane: String,

    /// Published flight duration in minutes.
    pub flight_time: u32,

    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub seating: Seating,
}

/// Airport and timestamp at one end of a flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Three-letter airport code.
    pub code: String,

    /// Timestamp such as `2016 May 10 08:00 GMT`.
    pub time: String,
}

/// Fares and bookings per seat class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seating {
    pub first_class: ClassSeating,
    pub coach: ClassSeating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSeating {
    /// Ticket price in dollars.
    pub price: f64,

    /// Seats already sold.
    pub booked: u32,
}

/// One aircraft model in the airplanes list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftRecord {
    pub manufacturer: String,
    pub model: String,
    pub first_class_seats: u32,
    pub coach_seats: u32,
}
