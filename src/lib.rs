//! citycast Library
//!
//! City weather lookups from Open-Meteo: geocoding, forecast fetching, a TTL
//! cache in front of both, derived metrics, and the terminal dashboard built
//! on top of them.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
pub mod report;
pub mod session;
pub mod ui;
