//! Scheduled flight legs.

use chrono::Duration;

use super::{AirportCode, FlightTime, SeatClass};

/// One scheduled flight, as reported by the data source.
///
/// Flights are shared as `Arc<Flight>` between the source, the cache and
/// every itinerary that uses them, and are never modified after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    /// Carrier flight number.
    pub number: String,
    /// Aircraft model identifier, looked up in the capacity table.
    pub aircraft: String,
    /// Scheduled duration in minutes, as published.
    pub flight_minutes: u32,
    pub departure_airport: AirportCode,
    pub departure_time: FlightTime,
    pub arrival_airport: AirportCode,
    pub arrival_time: FlightTime,
    pub booked_coach: u32,
    pub booked_first_class: u32,
    pub coach_fare_cents: u64,
    pub first_class_fare_cents: u64,
}

impl Flight {
    /// Seats already booked in a class.
    pub fn booked(&self, class: SeatClass) -> u32 {
        match class {
            SeatClass::Coach => self.booked_coach,
            SeatClass::FirstClass => self.booked_first_class,
        }
    }

    /// Ticket price for a class, in cents.
    pub fn fare_cents(&self, class: SeatClass) -> u64 {
        match class {
            SeatClass::Coach => self.coach_fare_cents,
            SeatClass::FirstClass => self.first_class_fare_cents,
        }
    }

    /// Time from departure to arrival.
    pub fn duration(&self) -> Duration {
        self.arrival_time.signed_duration_since(self.departure_time)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Builders shared by tests across the crate.

    use super::*;

    /// A 737 flight with nothing booked, between the given endpoints.
    pub fn flight(number: &str, from: &str, depart: &str, to: &str, arrive: &str) -> Flight {
        Flight {
            number: number.to_string(),
            aircraft: "737".to_string(),
            flight_minutes: 0,
            departure_airport: AirportCode::parse(from).unwrap(),
            departure_time: FlightTime::parse(depart).unwrap(),
            arrival_airport: AirportCode::parse(to).unwrap(),
            arrival_time: FlightTime::parse(arrive).unwrap(),
            booked_coach: 0,
            booked_first_class: 0,
            coach_fare_cents: 10_000,
            first_class_fare_cents: 50_000,
        }
    }
}
