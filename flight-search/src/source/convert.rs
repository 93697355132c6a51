//! Conversion from reservation service DTOs to domain types.
//!
//! Timestamps are parsed strictly: a single bad timestamp fails the whole
//! list. Records that are otherwise unusable (bad airport code, negative
//! fare) are logged and skipped.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{Aircraft, AirportCode, Flight, FlightTime};

use super::error::SourceError;
use super::types::{AircraftRecord, FlightRecord};

/// Convert a departing list to domain flights, preserving order.
pub fn convert_flights(records: &[FlightRecord]) -> Result<Vec<Arc<Flight>>, SourceError> {
    let mut flights = Vec::with_capacity(records.len());

    for record in records {
        match convert_flight(record) {
            Ok(flight) => flights.push(Arc::new(flight)),
            Err(e @ SourceError::Time(_)) => return Err(e),
            Err(e) => warn!(flight = %record.number, error = %e, "skipping flight record"),
        }
    }

    Ok(flights)
}

/// Convert a single flight record.
pub fn convert_flight(record: &FlightRecord) -> Result<Flight, SourceError> {
    let departure_airport = parse_airport(&record.departure.code, &record.number)?;
    let arrival_airport = parse_airport(&record.arrival.code, &record.number)?;
    let departure_time = FlightTime::parse(&record.departure.time)?;
    let arrival_time = FlightTime::parse(&record.arrival.time)?;

    Ok(Flight {
        number: record.number.clone(),
        aircraft: record.airplane.clone(),
        flight_minutes: record.flight_time,
        departure_airport,
        departure_time,
        arrival_airport,
        arrival_time,
        booked_coach: record.seating.coach.booked,
        booked_first_class: record.seating.first_class.booked,
        coach_fare_cents: dollars_to_cents(record.seating.coach.price, &record.number)?,
        first_class_fare_cents: dollars_to_cents(record.seating.first_class.price, &record.number)?,
    })
}

/// Convert the airplanes list.
pub fn convert_aircraft(records: &[AircraftRecord]) -> Vec<Aircraft> {
    records
        .iter()
        .map(|r| {
            Aircraft::new(
                r.manufacturer.clone(),
                r.model.clone(),
                r.coach_seats,
                r.first_class_seats,
            )
        })
        .collect()
}

fn parse_airport(code: &str, flight: &str) -> Result<AirportCode, SourceError> {
    AirportCode::parse_normalized(code)
        .map_err(|e| SourceError::InvalidRecord(format!("flight {flight}: {e}")))
}

fn dollars_to_cents(dollars: f64, flight: &str) -> Result<u64, SourceError> {
    if !dollars.is_finite() || dollars < 0.0 {
        return Err(SourceError::InvalidRecord(format!(
            "flight {flight}: invalid fare {dollars}"
        )));
    }
    Ok((dollars * 100.0).round() as u64)
}
