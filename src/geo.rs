//! Great-circle helpers for waypoints, route segments, and nearby search.
//!
//! All coordinates are `(latitude, longitude)` in WGS84 degrees.

use crate::models::Location;

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in meters.
pub fn haversine_meters(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Closest point to `point` on the segment `a`-`b`.
///
/// The projection treats the segment as locally planar, with longitudes
/// scaled by the cosine of the query latitude. Good enough for city-block
/// segment lengths.
pub fn closest_point_on_segment(point: (f64, f64), a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    let scale = point.0.to_radians().cos();

    let ab = (b.0 - a.0, (b.1 - a.1) * scale);
    let ap = (point.0 - a.0, (point.1 - a.1) * scale);
    let len_sq = ab.0 * ab.0 + ab.1 * ab.1;

    if len_sq == 0.0 {
        return a;
    }

    let t = ((ap.0 * ab.0 + ap.1 * ab.1) / len_sq).clamp(0.0, 1.0);
    (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1))
}

/// Distance in meters from `point` to the nearest point of segment `a`-`b`.
pub fn point_to_segment_meters(point: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    haversine_meters(point, closest_point_on_segment(point, a, b))
}

/// Sum of leg distances along an ordered list of points.
pub fn path_length_meters(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_meters(pair[0], pair[1]))
        .sum()
}

/// Locations within `radius_meters` of `center`, nearest first.
pub fn within_radius<'a, I>(locations: I, center: (f64, f64), radius_meters: f64) -> Vec<(&'a Location, f64)>
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut nearby: Vec<(&Location, f64)> = locations
        .into_iter()
        .map(|location| (location, haversine_meters(center, location.coords())))
        .filter(|(_, distance)| *distance <= radius_meters)
        .collect();

    nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
    nearby
}
