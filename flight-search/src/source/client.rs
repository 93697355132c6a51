//! Reservation service HTTP client.
//!
//! Provides async methods for listing departing flights and the aircraft
//! catalog. Handles agency identification, concurrency limits, and
//! conversion to domain types.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Aircraft, AirportCode, DayBucket, Flight};

use super::convert::{convert_aircraft, convert_flights};
use super::error::SourceError;
use super::types::{AircraftRecord, FlightRecord};

/// Default base URL for the reservation service.
const DEFAULT_BASE_URL: &str = "http://localhost:8181/reservation-system";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the reservation client.
#[derive(Debug, Clone)]
pub struct ReservationConfig {
    /// Ticket agency identifier, sent with every request
    pub agency: String,
    /// Base URL for the service
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ReservationConfig {
    /// Create a new config for the given agency.
    pub fn new(agency: impl Into<String>) -> Self {
        Self {
            agency: agency.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Reservation service client.
///
/// Uses a semaphore to limit concurrent requests so a wide search level
/// doesn't flood the service.
#[derive(Debug, Clone)]
pub struct ReservationClient {
    http: reqwest::Client,
    base_url: String,
    agency: String,
    semaphore: Arc<Semaphore>,
}

impl ReservationClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ReservationConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();

        // The service identifies agencies by user agent
        let agency = HeaderValue::from_str(&config.agency).map_err(|_| SourceError::Api {
            status: 0,
            message: "Invalid agency identifier".to_string(),
        })?;
        headers.insert(USER_AGENT, agency);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            agency: config.agency,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// All flights departing `airport` on `day`.
    pub async fn departing(
        &self,
        airport: &AirportCode,
        day: DayBucket,
    ) -> Result<Vec<Arc<Flight>>, SourceError> {
        let day = day.to_string();
        let records: Vec<FlightRecord> = self
            .list(&[
                ("list_type", "departing"),
                ("airport", airport.as_str()),
                ("day", day.as_str()),
            ])
            .await?;

        debug!(%airport, %day, flights = records.len(), "departing list");
        convert_flights(&records)
    }

    /// The aircraft catalog.
    pub async fn airplanes(&self) -> Result<Vec<Aircraft>, SourceError> {
        let records: Vec<AircraftRecord> = self.list(&[("list_type", "airplanes")]).await?;
        Ok(convert_aircraft(&records))
    }

    /// Issue an `action=list` query and decode the JSON body.
    async fn list<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, SourceError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| SourceError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("team", self.agency.as_str()), ("action", "list")])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SourceError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SourceError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}
