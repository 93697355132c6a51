//! Web layer for the flight itinerary planner.
//!
//! Provides a JSON endpoint for searching itineraries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
