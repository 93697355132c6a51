//! Per-leg feasibility checks.

use chrono::Duration;

use crate::domain::{Flight, FlightTime, SeatClass, connection_gap};

use super::capacity::AircraftCapacityTable;

/// Decides whether a flight still has a seat in a class.
///
/// Reads capacity and booked counts only; nothing is reserved, so asking
/// twice gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct SeatAvailability<'a> {
    capacity: &'a AircraftCapacityTable,
}

impl<'a> SeatAvailability<'a> {
    pub fn new(capacity: &'a AircraftCapacityTable) -> Self {
        Self { capacity }
    }

    /// True when fewer seats are booked than the aircraft holds.
    ///
    /// A flight on an aircraft model missing from the catalog has no seats.
    pub fn has_seat(&self, flight: &Flight, class: SeatClass) -> bool {
        match self.capacity.capacity_for(&flight.aircraft, class) {
            Some(capacity) => flight.booked(class) < capacity,
            None => false,
        }
    }
}

/// Allowed range of time on the ground between two legs, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoverWindow {
    min: Duration,
    max: Duration,
}

impl LayoverWindow {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Whether a departure at `departure` connects with an arrival at `arrival`.
    ///
    /// The gap must be positive and within `[min, max]`.
    pub fn is_valid(&self, arrival: FlightTime, departure: FlightTime) -> bool {
        let gap = connection_gap(arrival, departure);
        gap > Duration::zero() && gap >= self.min && gap <= self.max
    }
}
