//! Plain data carried between the store, the routing client, and the tracker.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;

/// A geocoded place from the location directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            latitude,
            longitude,
        }
    }

    /// Coordinates as `(latitude, longitude)`.
    pub fn coords(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// A live vehicle position sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Which slot of the route a point occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointRole {
    Start,
    /// An intermediate stop, by slot ordinal.
    Additional(usize),
    End,
}

/// A slot of the materialized point list, as the UI renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub role: PointRole,
    pub location: Option<Location>,
}

/// Positional address into the materialized point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointIndex {
    /// A new Additional point after the existing ones.
    Append,
    At(usize),
}

/// The start / intermediate stops / end aggregate.
///
/// Empty intermediate slots are kept so that clearing a middle stop does not
/// shift the ones after it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteState {
    pub start: Option<Location>,
    pub additional: Vec<Option<Location>>,
    pub end: Option<Location>,
}

impl RouteState {
    /// Non-empty slots in route order.
    pub fn waypoints(&self) -> impl Iterator<Item = &Location> {
        self.start
            .iter()
            .chain(self.additional.iter().flatten())
            .chain(self.end.iter())
    }

    pub fn flatten(&self) -> Vec<Location> {
        self.waypoints().cloned().collect()
    }

    pub fn filled_count(&self) -> usize {
        self.waypoints().count()
    }

    pub fn filled_additional(&self) -> usize {
        self.additional.iter().flatten().count()
    }

    pub fn signature(&self) -> WaypointSignature {
        WaypointSignature::of(self.waypoints())
    }

    /// Start, every Additional slot (empty ones included), End.
    pub fn points(&self) -> Vec<RoutePoint> {
        let mut points = Vec::with_capacity(self.additional.len() + 2);
        points.push(RoutePoint {
            role: PointRole::Start,
            location: self.start.clone(),
        });
        points.extend(self.additional.iter().enumerate().map(|(ordinal, slot)| RoutePoint {
            role: PointRole::Additional(ordinal),
            location: slot.clone(),
        }));
        points.push(RoutePoint {
            role: PointRole::End,
            location: self.end.clone(),
        });
        points
    }
}

/// Ordered location ids of a flattened waypoint list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct WaypointSignature(Vec<String>);

impl WaypointSignature {
    pub fn of<'a>(waypoints: impl IntoIterator<Item = &'a Location>) -> Self {
        Self(waypoints.into_iter().map(|location| location.id.clone()).collect())
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WaypointSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(","))
    }
}

/// Route preference tag attached to a routing result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutePreference {
    #[default]
    Fastest,
    Shortest,
    Balanced,
    Eco,
}

impl RoutePreference {
    /// Classification order used by `build_all_routes`.
    pub const ALL: [RoutePreference; 4] = [Self::Fastest, Self::Shortest, Self::Balanced, Self::Eco];
}

/// One decoded route as returned by a provider, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub polyline: Polyline,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl RouteCandidate {
    pub fn classify(self, preference: RoutePreference) -> RouteResult {
        RouteResult {
            preference,
            polyline: self.polyline,
            distance_meters: self.distance_meters,
            duration_seconds: self.duration_seconds,
        }
    }
}

/// A classified driving route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub preference: RoutePreference,
    pub polyline: Polyline,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Classified alternatives, in `fastest, shortest, balanced, eco` order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteSet {
    routes: Vec<RouteResult>,
}

impl RouteSet {
    pub fn new(routes: Vec<RouteResult>) -> Self {
        Self { routes }
    }

    pub fn get(&self, preference: RoutePreference) -> Option<&RouteResult> {
        self.routes.iter().find(|route| route.preference == preference)
    }

    pub fn routes(&self) -> &[RouteResult] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Distance of a live position from the planned route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationEvent {
    pub is_off_route: bool,
    pub distance_meters: f64,
}
