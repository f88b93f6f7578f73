//! Career path planning engine with a thin HTTP surface.
//!
//! Embed `planner::CareerEngine` directly, or run the `career-planner`
//! binary to serve it over axum.

pub mod config;
pub mod errors;
pub mod models;
pub mod planner;
pub mod reference;
pub mod routes;
pub mod state;
