//! Flight-data source error types.

use crate::domain::TimeError;

/// Errors from fetching or decoding flight data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Server returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the server
    #[error("rate limited by reservation server")]
    RateLimited,

    /// Agency not recognised by the server
    #[error("unauthorized: check FLIGHT_AGENCY")]
    Unauthorized,

    /// A record carried a timestamp that doesn't match the flight time format
    #[error("malformed timestamp in flight data: {0}")]
    Time(#[from] TimeError),

    /// A record was structurally invalid (bad airport code, negative fare, ...)
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Local data files could not be read
    #[error("data file error: {0}")]
    DataFile(String),
}

impl SourceError {
    /// True when the data itself is corrupt, as opposed to unavailable.
    pub fn is_malformed_data(&self) -> bool {
        matches!(self, SourceError::Time(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlightTime;

    #[test]
    fn error_display() {
        let err = SourceError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = SourceError::Json {
            message: "expected array".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected array"));
    }

    #[test]
    fn malformed_time_is_data_error() {
        let time_err = FlightTime::parse("yesterday").unwrap_err();
        let err = SourceError::from(time_err);
        assert!(err.is_malformed_data());
        assert!(err.to_string().contains("yesterday"));

        assert!(!SourceError::RateLimited.is_malformed_data());
        assert!(!SourceError::InvalidRecord("x".into()).is_malformed_data());
    }
}
