//! Polyline representation for route geometries.
//!
//! Points are stored as decoded `(latitude, longitude)` pairs. Providers
//! deliver `[longitude, latitude]`; the swap happens once, at the boundary,
//! through [`Polyline::from_lon_lat`].

use serde::{Deserialize, Serialize};

use crate::geo;

/// A route geometry as an ordered list of decoded coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a `(latitude, longitude)` tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Builds a polyline from provider-ordered `[longitude, latitude]` pairs.
    ///
    /// GeoJSON geometries put longitude first; the result stores `(lat, lng)`.
    pub fn from_lon_lat(coordinates: &[[f64; 2]]) -> Self {
        Self {
            points: coordinates.iter().map(|[lng, lat]| (*lat, *lng)).collect(),
        }
    }

    /// Returns a reference to the coordinate points.
    ///
    /// Points are `(latitude, longitude)` in route order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    ///
    /// Useful when handing the geometry to a renderer without cloning.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// Returns the number of vertices.
    ///
    /// A polyline needs at least two vertices to have any segments.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true when the polyline has no vertices.
    ///
    /// Failed or cleared routes are never represented by an empty polyline;
    /// this only shows up for hand-built geometry.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over consecutive vertex pairs.
    ///
    /// Empty when there are fewer than two points.
    pub fn segments(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Length along the vertices in meters.
    ///
    /// Sums haversine leg distances, so it ignores terrain and road curvature
    /// between vertices.
    pub fn length_meters(&self) -> f64 {
        geo::path_length_meters(&self.points)
    }
}
