//! Itinerary types.
//!
//! An `Itinerary` is a chain of connecting flights that may or may not yet
//! reach the traveller's destination. A `ReservationOption` is an itinerary
//! known to end at the destination; it is what a search returns.

use std::sync::Arc;

use chrono::Duration;

use super::{AirportCode, DomainError, Flight, FlightTime, SeatClass, connection_gap};

/// A non-empty chain of flights where each leg departs the airport the
/// previous leg arrived at.
///
/// Extending an itinerary produces a new one; the original is left as it
/// was. Legs are `Arc`s so extension copies pointers, not flights.
///
/// # Invariants
///
/// - At least one leg
/// - `legs[i].arrival_airport == legs[i + 1].departure_airport`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    legs: Vec<Arc<Flight>>,
}

impl Itinerary {
    /// A single-leg itinerary.
    pub fn start(flight: Arc<Flight>) -> Self {
        Self { legs: vec![flight] }
    }

    /// Constructs an itinerary from legs, validating that they connect.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the list is empty or two consecutive legs don't
    /// share an airport.
    pub fn new(legs: Vec<Arc<Flight>>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        for window in legs.windows(2) {
            let arrived = window[0].arrival_airport;
            let departing = window[1].departure_airport;
            if arrived != departing {
                return Err(DomainError::AirportsNotConnected(arrived, departing));
            }
        }

        Ok(Self { legs })
    }

    /// A new itinerary with `flight` appended.
    pub fn extended(&self, flight: Arc<Flight>) -> Result<Self, DomainError> {
        let arrived = self.last().arrival_airport;
        if flight.departure_airport != arrived {
            return Err(DomainError::AirportsNotConnected(
                arrived,
                flight.departure_airport,
            ));
        }

        let mut legs = Vec::with_capacity(self.legs.len() + 1);
        legs.extend(self.legs.iter().cloned());
        legs.push(flight);
        Ok(Self { legs })
    }

    /// All legs, in travel order.
    pub fn legs(&self) -> &[Arc<Flight>] {
        &self.legs
    }

    /// Number of legs (hop count).
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// First leg.
    pub fn first(&self) -> &Flight {
        &self.legs[0]
    }

    /// Final leg.
    pub fn last(&self) -> &Flight {
        &self.legs[self.legs.len() - 1]
    }

    /// Whether the final leg lands at `airport`.
    pub fn ends_at(&self, airport: &AirportCode) -> bool {
        &self.last().arrival_airport == airport
    }

    /// Whether `airport` is the origin or any leg's arrival.
    pub fn visits(&self, airport: &AirportCode) -> bool {
        &self.first().departure_airport == airport
            || self.legs.iter().any(|leg| &leg.arrival_airport == airport)
    }
}

/// A complete itinerary from the search's origin to its destination.
///
/// Read-only: exposes the legs and summary information derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationOption {
    itinerary: Itinerary,
}

impl ReservationOption {
    /// Mark an itinerary as complete.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the itinerary doesn't end at `destination`.
    pub fn complete(itinerary: Itinerary, destination: &AirportCode) -> Result<Self, DomainError> {
        if !itinerary.ends_at(destination) {
            return Err(DomainError::WrongDestination {
                expected: *destination,
                actual: itinerary.last().arrival_airport,
            });
        }
        Ok(Self { itinerary })
    }

    /// All legs, in travel order.
    pub fn legs(&self) -> &[Arc<Flight>] {
        self.itinerary.legs()
    }

    /// Number of legs.
    pub fn leg_count(&self) -> usize {
        self.itinerary.leg_count()
    }

    /// Returns true if this is a single flight.
    pub fn is_direct(&self) -> bool {
        self.leg_count() == 1
    }

    pub fn departure_airport(&self) -> AirportCode {
        self.itinerary.first().departure_airport
    }

    pub fn arrival_airport(&self) -> AirportCode {
        self.itinerary.last().arrival_airport
    }

    pub fn departure_time(&self) -> FlightTime {
        self.itinerary.first().departure_time
    }

    pub fn arrival_time(&self) -> FlightTime {
        self.itinerary.last().arrival_time
    }

    /// Door-to-door time, first departure to last arrival.
    pub fn total_duration(&self) -> Duration {
        self.arrival_time()
            .signed_duration_since(self.departure_time())
    }

    /// Time on the ground at each connection.
    pub fn layovers(&self) -> Vec<Duration> {
        self.legs()
            .windows(2)
            .map(|pair| connection_gap(pair[0].arrival_time, pair[1].departure_time))
            .collect()
    }

    /// Sum of all leg fares in a class, in cents.
    pub fn total_fare_cents(&self, class: SeatClass) -> u64 {
        self.legs().iter().map(|leg| leg.fare_cents(class)).sum()
    }
}
