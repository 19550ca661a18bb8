//! Collaborator seams.
//!
//! The routing core talks to the outside world through these traits only.
//! Apps plug in their own HTTP stack or location source; tests plug in
//! scripted stand-ins.

use std::collections::HashMap;
use std::future::Future;

use crate::error::TransportError;
use crate::models::{Location, RouteCandidate};

/// Fetches driving routes from one routing provider.
pub trait RouteTransport: Send + Sync {
    /// Requests routes through `waypoints` (lat, lng) from the provider at
    /// `base_url`. With `alternatives` set the provider may return several
    /// candidates; otherwise at most one is expected.
    ///
    /// An empty candidate list is a valid answer and is treated by the
    /// caller as a provider failure.
    fn fetch_routes(
        &self,
        base_url: &str,
        waypoints: &[(f64, f64)],
        alternatives: bool,
    ) -> impl Future<Output = Result<Vec<RouteCandidate>, TransportError>> + Send;
}

/// Resolves location ids to geocoded places.
pub trait LocationDirectory {
    fn location(&self, id: &str) -> Option<Location>;
}

impl LocationDirectory for HashMap<String, Location> {
    fn location(&self, id: &str) -> Option<Location> {
        self.get(id).cloned()
    }
}

impl LocationDirectory for [Location] {
    fn location(&self, id: &str) -> Option<Location> {
        self.iter().find(|location| location.id == id).cloned()
    }
}

impl LocationDirectory for Vec<Location> {
    fn location(&self, id: &str) -> Option<Location> {
        self.as_slice().location(id)
    }
}
