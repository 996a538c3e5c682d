//! Runtime orchestrator: runs the search policy against the live camera
//! directory and keeps that directory fresh.
//!
//! A search tries a direct name match first, then falls back to geocoding
//! the keyword and filtering cameras by distance from the resolved point.

pub mod orchestrator;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::*;
