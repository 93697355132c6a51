//! Flight itinerary search server.
//!
//! A web application that answers: "Which connecting flights get me from
//! this airport to that one on a given day, with a seat in my class on
//! every leg?"

pub mod cache;
pub mod domain;
pub mod planner;
pub mod source;
pub mod web;
