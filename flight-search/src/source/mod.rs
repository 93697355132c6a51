//! Flight data sources.
//!
//! This module provides the reservation service client and a file-backed
//! mock, both usable wherever the planner needs a [`FlightSource`].
//!
//! The service lists flights per departure airport and day, and the
//! aircraft catalog as a separate list. Timestamps come over the wire as
//! text such as `2016 May 10 08:00 GMT` and are parsed strictly on
//! arrival.

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::sync::Arc;

pub use client::{ReservationClient, ReservationConfig};
pub use convert::{convert_aircraft, convert_flight, convert_flights};
pub use error::SourceError;
pub use mock::{AIRCRAFT_FILE, FLIGHTS_FILE, MockFlightSource};
pub use types::{AircraftRecord, ClassSeating, Endpoint, FlightRecord, Seating};

use crate::domain::{Aircraft, AirportCode, DayBucket, Flight};
use crate::planner::FlightSource;

impl FlightSource for ReservationClient {
    async fn fetch_flights(
        &self,
        airport: &AirportCode,
        day: DayBucket,
    ) -> Result<Vec<Arc<Flight>>, SourceError> {
        self.departing(airport, day).await
    }

    async fn fetch_aircraft(&self) -> Result<Vec<Aircraft>, SourceError> {
        self.airplanes().await
    }
}

impl FlightSource for MockFlightSource {
    async fn fetch_flights(
        &self,
        airport: &AirportCode,
        day: DayBucket,
    ) -> Result<Vec<Arc<Flight>>, SourceError> {
        Ok(self.departing(airport, day))
    }

    async fn fetch_aircraft(&self) -> Result<Vec<Aircraft>, SourceError> {
        Ok(self.airplanes())
    }
}

/// The source a server runs against, chosen at startup.
#[derive(Debug, Clone)]
pub enum FlightBackend {
    /// The live reservation service.
    Remote(ReservationClient),
    /// Flights loaded from local JSON files.
    Mock(MockFlightSource),
}

impl FlightSource for FlightBackend {
    async fn fetch_flights(
        &self,
        airport: &AirportCode,
        day: DayBucket,
    ) -> Result<Vec<Arc<Flight>>, SourceError> {
        match self {
            FlightBackend::Remote(client) => client.fetch_flights(airport, day).await,
            FlightBackend::Mock(mock) => mock.fetch_flights(airport, day).await,
        }
    }

    async fn fetch_aircraft(&self) -> Result<Vec<Aircraft>, SourceError> {
        match self {
            FlightBackend::Remote(client) => client.fetch_aircraft().await,
            FlightBackend::Mock(mock) => mock.fetch_aircraft().await,
        }
    }
}
