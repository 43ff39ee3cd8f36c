//! Satellite clock and ephemeris error dashboard.
//!
//! Generates synthetic error forecasts for a fleet of satellites and keeps
//! per-view carousel selection state, served through a small axum app.

pub mod carousel;
pub mod fleet;
pub mod forecast;
pub mod session;
pub mod web;
