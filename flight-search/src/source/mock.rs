//! Mock flight source for running without the reservation service.
//!
//! Loads a flight schedule and aircraft catalog from JSON files and serves
//! them as if they were live responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::{Aircraft, AirportCode, DayBucket, Flight, Zone};

use super::convert::{convert_aircraft, convert_flights};
use super::error::SourceError;
use super::types::{AircraftRecord, FlightRecord};

/// File holding every flight, in the `departing` list format.
pub const FLIGHTS_FILE: &str = "flights.json";

/// File holding the aircraft catalog, in the `airplanes` list format.
pub const AIRCRAFT_FILE: &str = "aircraft.json";

/// Mock source that serves data loaded from a directory.
///
/// Flights are bucketed by departure airport and departure day in the
/// canonical zone. An airport/day with nothing scheduled is an empty list.
#[derive(Debug, Clone)]
pub struct MockFlightSource {
    flights: Arc<HashMap<(AirportCode, DayBucket), Vec<Arc<Flight>>>>,
    aircraft: Arc<Vec<Aircraft>>,
}

impl MockFlightSource {
    /// Load `flights.json` and `aircraft.json` from `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>, canonical: Zone) -> Result<Self, SourceError> {
        let data_dir = data_dir.as_ref();

        let flight_records: Vec<FlightRecord> = read_json(&data_dir.join(FLIGHTS_FILE))?;
        let aircraft_records: Vec<AircraftRecord> = read_json(&data_dir.join(AIRCRAFT_FILE))?;

        Ok(Self::from_parts(
            convert_flights(&flight_records)?,
            convert_aircraft(&aircraft_records),
            canonical,
        ))
    }

    /// Build from already-converted data.
    pub fn from_parts(flights: Vec<Arc<Flight>>, aircraft: Vec<Aircraft>, canonical: Zone) -> Self {
        let mut by_day: HashMap<(AirportCode, DayBucket), Vec<Arc<Flight>>> = HashMap::new();
        for flight in flights {
            let key = (
                flight.departure_airport,
                flight.departure_time.day_bucket(canonical),
            );
            by_day.entry(key).or_default().push(flight);
        }

        Self {
            flights: Arc::new(by_day),
            aircraft: Arc::new(aircraft),
        }
    }

    /// Flights departing `airport` on `day`, in file order.
    pub fn departing(&self, airport: &AirportCode, day: DayBucket) -> Vec<Arc<Flight>> {
        self.flights
            .get(&(*airport, day))
            .cloned()
            .unwrap_or_default()
    }

    /// The aircraft catalog.
    pub fn airplanes(&self) -> Vec<Aircraft> {
        self.aircraft.as_ref().clone()
    }

    /// Airports with at least one departure.
    pub fn airports(&self) -> Vec<AirportCode> {
        let mut airports: Vec<_> = self.flights.keys().map(|(a, _)| *a).collect();
        airports.sort();
        airports.dedup();
        airports
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| SourceError::DataFile(format!("failed to read {}: {e}", path.display())))?;

    serde_json::from_str(&json)
        .map_err(|e| SourceError::DataFile(format!("failed to parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlightTime;

    const FLIGHTS: &str = r#"[
        {
            "number": "100", "airplane": "737", "flightTime": 360,
            "departure": { "code": "JFK", "time": "2016 May 10 08:00 GMT" },
            "arrival": { "code": "LAX", "time": "2016 May 10 14:00 GMT" },
            "seating": {
                "firstClass": { "price": 800.0, "booked": 1 },
                "coach": { "price": 250.0, "booked": 30 }
            }
        },
        {
            "number": "200", "airplane": "737", "flightTime": 120,
            "departure": { "code": "JFK", "time": "2016 May 10 23:30 GMT" },
            "arrival": { "code": "ORD", "time": "2016 May 11 01:30 GMT" },
            "seating": {
                "firstClass": { "price": 400.0, "booked": 0 },
                "coach": { "price": 99.0, "booked": 0 }
            }
        },
        {
            "number": "300", "airplane": "737", "flightTime": 120,
            "departure": { "code": "JFK", "time": "2016 May 11 00:30 GMT" },
            "arrival": { "code": "ORD", "time": "2016 May 11 02:30 GMT" },
            "seating": {
                "firstClass": { "price": 400.0, "booked": 0 },
                "coach": { "price": 99.0, "booked": 0 }
            }
        }
    ]"#;

    const AIRCRAFT: &str = r#"[
        { "manufacturer": "Boeing", "model": "737", "firstClassSeats": 8, "coachSeats": 120 }
    ]"#;

    fn write_data(flights: &str, aircraft: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FLIGHTS_FILE), flights).unwrap();
        std::fs::write(dir.path().join(AIRCRAFT_FILE), aircraft).unwrap();
        dir
    }

    fn bucket(s: &str) -> DayBucket {
        FlightTime::parse(s).unwrap().day_bucket(Zone::GMT)
    }

    #[test]
    fn load_and_bucket_by_day() {
        let dir = write_data(FLIGHTS, AIRCRAFT);
        let source = MockFlightSource::new(dir.path(), Zone::GMT).unwrap();
        let jfk = AirportCode::parse("JFK").unwrap();

        let may10 = source.departing(&jfk, bucket("2016 May 10 12:00 GMT"));
        let numbers: Vec<_> = may10.iter().map(|f| f.number.as_str()).collect();
        assert_eq!(numbers, vec!["100", "200"]);

        let may11 = source.departing(&jfk, bucket("2016 May 11 12:00 GMT"));
        assert_eq!(may11.len(), 1);
        assert_eq!(may11[0].number, "300");

        assert_eq!(source.airplanes().len(), 1);
        assert_eq!(source.airports(), vec![jfk]);
    }

    #[test]
    fn unknown_airport_is_empty() {
        let dir = write_data(FLIGHTS, AIRCRAFT);
        let source = MockFlightSource::new(dir.path(), Zone::GMT).unwrap();
        let sfo = AirportCode::parse("SFO").unwrap();

        assert!(
            source
                .departing(&sfo, bucket("2016 May 10 12:00 GMT"))
                .is_empty()
        );
    }

    #[test]
    fn canonical_zone_moves_day_boundary() {
        let dir = write_data(FLIGHTS, AIRCRAFT);
        // 23:30 GMT on the 10th is 18:30 EST, 00:30 GMT on the 11th is 19:30 EST
        let source = MockFlightSource::new(dir.path(), Zone::parse("EST").unwrap()).unwrap();
        let jfk = AirportCode::parse("JFK").unwrap();

        let may10 = source.departing(&jfk, bucket("2016 May 10 12:00 GMT"));
        assert_eq!(may10.len(), 3);
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = MockFlightSource::new(dir.path(), Zone::GMT);
        assert!(matches!(result, Err(SourceError::DataFile(_))));
    }

    #[test]
    fn malformed_timestamp_fails_load() {
        let flights = FLIGHTS.replace("2016 May 10 08:00 GMT", "May 10th 8am");
        let dir = write_data(&flights, AIRCRAFT);
        let result = MockFlightSource::new(dir.path(), Zone::GMT);
        assert!(matches!(result, Err(SourceError::Time(_))));
    }

    #[tokio::test]
    async fn search_bundled_data() {
        use crate::planner::{Planner, SearchConfig, SearchRequest};

        let source = MockFlightSource::new("data/mock", Zone::GMT).unwrap();
        let config = SearchConfig::default();
        let planner = Planner::new(&source, &config);

        let numbers = |options: &[crate::domain::ReservationOption]| -> Vec<Vec<String>> {
            options
                .iter()
                .map(|o| o.legs().iter().map(|l| l.number.clone()).collect())
                .collect()
        };

        let coach = SearchRequest::parse("JFK", "LAX", "2016 May 10 00:00 GMT", "coach").unwrap();
        let result = planner.search(&coach).await.unwrap();
        assert_eq!(
            numbers(&result.options),
            vec![
                vec!["1001"],
                vec!["2144", "2290"],
                vec!["4402", "4519"],
                vec!["2144", "2301", "3120"],
            ]
        );

        let first = SearchRequest::parse("JFK", "LAX", "2016 May 10 00:00 GMT", "first").unwrap();
        let result = planner.search(&first).await.unwrap();
        assert_eq!(
            numbers(&result.options),
            vec![vec!["4402", "4519"], vec!["2144", "2301", "3120"]]
        );
    }
}
