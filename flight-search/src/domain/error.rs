//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from source/IO errors.

use super::AirportCode;

/// Domain-level errors for itinerary construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// Consecutive legs don't share an airport
    #[error("leg arriving at {0} cannot connect to leg departing {1}")]
    AirportsNotConnected(AirportCode, AirportCode),

    /// Itinerary does not end where the search wanted
    #[error("itinerary ends at {actual}, not {expected}")]
    WrongDestination {
        expected: AirportCode,
        actual: AirportCode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyItinerary;
        assert_eq!(err.to_string(), "itinerary must have at least one leg");

        let ord = AirportCode::parse("ORD").unwrap();
        let lax = AirportCode::parse("LAX").unwrap();
        let err = DomainError::AirportsNotConnected(ord, lax);
        assert_eq!(
            err.to_string(),
            "leg arriving at ORD cannot connect to leg departing LAX"
        );

        let err = DomainError::WrongDestination {
            expected: lax,
            actual: ord,
        };
        assert_eq!(err.to_string(), "itinerary ends at ORD, not LAX");
    }
}
