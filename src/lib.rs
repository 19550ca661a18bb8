//! route-planner core
//!
//! Route construction and live geo-tracking for a trip: the ordered
//! start / stops / end point store, a routing-provider client with fallback
//! and alternative classification, and an off-route detector.

pub mod config;
pub mod deviation;
pub mod error;
pub mod geo;
pub mod models;
pub mod osrm;
pub mod polyline;
pub mod routing;
pub mod session;
pub mod store;
pub mod traits;
