//! Test fixtures for route-planner.
//!
//! Provides:
//! - Real Las Vegas / Henderson places (from OpenStreetMap)
//! - A scripted routing provider standing in for OSRM servers

#![allow(dead_code)]

pub mod las_vegas_locations;
pub mod transport;

pub use las_vegas_locations::*;
pub use transport::*;
