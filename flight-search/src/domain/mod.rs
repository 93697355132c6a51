//! Domain types for the flight itinerary planner.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod aircraft;
mod airport;
mod error;
pub(crate) mod flight;
mod itinerary;
mod time;

pub use aircraft::{Aircraft, InvalidSeatClass, SeatClass};
pub use airport::{AirportCode, InvalidAirportCode};
pub use error::DomainError;
pub use flight::Flight;
pub use itinerary::{Itinerary, ReservationOption};
pub use time::{DayBucket, FlightTime, TimeError, Zone, connection_gap, connection_gap_millis};
