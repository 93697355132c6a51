//! Aircraft models and seat classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unrecognised seat class.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid seat class {0:?}: expected Coach or FirstClass")]
pub struct InvalidSeatClass(String);

/// Booking category, each with its own capacity and booked count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatClass {
    Coach,
    FirstClass,
}

impl SeatClass {
    /// The wire name, as the reservation service spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatClass::Coach => "Coach",
            SeatClass::FirstClass => "FirstClass",
        }
    }
}

impl FromStr for SeatClass {
    type Err = InvalidSeatClass;

    /// Case-insensitive; `first` and `first_class` are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coach" => Ok(SeatClass::Coach),
            "firstclass" | "first_class" | "first" => Ok(SeatClass::FirstClass),
            _ => Err(InvalidSeatClass(s.to_string())),
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One aircraft model and its seating capacity per class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aircraft {
    pub manufacturer: String,
    pub model: String,
    pub coach_seats: u32,
    pub first_class_seats: u32,
}

impl Aircraft {
    pub fn new(
        manufacturer: impl Into<String>,
        model: impl Into<String>,
        coach_seats: u32,
        first_class_seats: u32,
    ) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
            coach_seats,
            first_class_seats,
        }
    }

    /// Seating capacity for a class.
    pub fn capacity(&self, class: SeatClass) -> u32 {
        match class {
            SeatClass::Coach => self.coach_seats,
            SeatClass::FirstClass => self.first_class_seats,
        }
    }
}
