//! OSRM HTTP adapter for the `route` service.

use std::future::Future;

use serde::Deserialize;

use crate::config::RoutingConfig;
use crate::error::TransportError;
use crate::models::RouteCandidate;
use crate::polyline::Polyline;
use crate::traits::RouteTransport;

#[derive(Debug, Clone)]
pub struct OsrmTransport {
    profile: String,
    client: reqwest::Client,
}

impl OsrmTransport {
    pub fn new(config: &RoutingConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            profile: config.profile.clone(),
            client,
        })
    }
}

impl RouteTransport for OsrmTransport {
    fn fetch_routes(
        &self,
        base_url: &str,
        waypoints: &[(f64, f64)],
        alternatives: bool,
    ) -> impl Future<Output = Result<Vec<RouteCandidate>, TransportError>> + Send {
        let url = route_url(base_url, &self.profile, waypoints, alternatives);

        async move {
            let body = self
                .client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .json::<OsrmRouteResponse>()
                .await?;

            body.into_candidates()
        }
    }
}

/// `{base}/route/v1/{profile}/{lng},{lat};...?overview=full&geometries=geojson&alternatives={bool}`
pub fn route_url(base_url: &str, profile: &str, waypoints: &[(f64, f64)], alternatives: bool) -> String {
    let coords = waypoints
        .iter()
        .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
        .collect::<Vec<_>>()
        .join(";");

    format!(
        "{}/route/v1/{}/{}?overview=full&geometries=geojson&alternatives={}",
        base_url.trim_end_matches('/'),
        profile,
        coords,
        alternatives
    )
}

#[derive(Debug, Deserialize)]
pub struct OsrmRouteResponse {
    code: Option<String>,
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouteResponse {
    /// Decodes the routes, swapping provider `[lng, lat]` pairs to `(lat, lng)`.
    pub fn into_candidates(self) -> Result<Vec<RouteCandidate>, TransportError> {
        if let Some(code) = self.code.filter(|code| code != "Ok") {
            return Err(TransportError::Provider {
                code,
                message: self.message.unwrap_or_default(),
            });
        }

        let routes = self
            .routes
            .ok_or_else(|| TransportError::Malformed("missing routes".to_string()))?;

        routes
            .into_iter()
            .enumerate()
            .map(|(index, route)| {
                let geometry = route
                    .geometry
                    .ok_or_else(|| TransportError::Malformed(format!("route {index} has no geometry")))?;
                if geometry.coordinates.len() < 2 {
                    return Err(TransportError::Malformed(format!(
                        "route {index} geometry has {} coordinates",
                        geometry.coordinates.len()
                    )));
                }

                Ok(RouteCandidate {
                    polyline: Polyline::from_lon_lat(&geometry.coordinates),
                    distance_meters: route.distance.max(0.0),
                    duration_seconds: route.duration.max(0.0),
                })
            })
            .collect()
    }
}
