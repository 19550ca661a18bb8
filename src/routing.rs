//! Routing client: provider fallback and alternative-route classification.
//!
//! Providers are tried in configured order. Network errors, non-2xx
//! statuses, malformed bodies and empty route lists all count as "this
//! provider is unavailable" and move on to the next one. When the chain is
//! exhausted the request fails with [`RoutingError::Unavailable`]; no
//! straight-line geometry is ever substituted.

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::geo;
use crate::models::{Location, RouteCandidate, RoutePreference, RouteResult, RouteSet};
use crate::osrm::OsrmTransport;
use crate::traits::RouteTransport;

#[derive(Debug, Clone)]
pub struct RoutingClient<T> {
    base_urls: Vec<String>,
    transport: T,
}

impl RoutingClient<OsrmTransport> {
    /// Client over the OSRM HTTP transport.
    ///
    /// Providers are tried in the order of `config.base_urls`.
    pub fn osrm(config: &RoutingConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(config.base_urls.clone(), OsrmTransport::new(config)?))
    }
}

impl<T: RouteTransport> RoutingClient<T> {
    /// Creates a client over an arbitrary transport.
    ///
    /// `base_urls` is the fallback order; an empty list fails every request
    /// with [`RoutingError::NoProviders`].
    pub fn new(base_urls: Vec<String>, transport: T) -> Self {
        Self { base_urls, transport }
    }

    /// Returns the configured provider base URLs.
    ///
    /// The order is the order in which providers are tried.
    pub fn base_urls(&self) -> &[String] {
        &self.base_urls
    }

    /// Returns the underlying transport.
    ///
    /// Mostly useful to inspect a scripted transport in tests.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Requests a single route and tags it with `preference`.
    ///
    /// Asks each provider for one route; the first non-empty answer wins.
    pub async fn build_route(
        &self,
        waypoints: &[Location],
        preference: RoutePreference,
    ) -> Result<RouteResult, RoutingError> {
        let mut candidates = self.fetch_with_fallback(waypoints, false).await?;
        let best = candidates.swap_remove(0);
        Ok(best.classify(preference))
    }

    /// Requests alternatives and classifies them as fastest, shortest,
    /// balanced and eco.
    ///
    /// See [`classify_alternatives`] for the tagging rules.
    pub async fn build_all_routes(&self, waypoints: &[Location]) -> Result<RouteSet, RoutingError> {
        let candidates = self.fetch_with_fallback(waypoints, true).await?;
        Ok(classify_alternatives(candidates))
    }

    /// Returns the first non-empty candidate list in provider order.
    async fn fetch_with_fallback(
        &self,
        waypoints: &[Location],
        alternatives: bool,
    ) -> Result<Vec<RouteCandidate>, RoutingError> {
        if waypoints.len() < 2 {
            return Err(RoutingError::NotEnoughWaypoints(waypoints.len()));
        }
        if self.base_urls.is_empty() {
            return Err(RoutingError::NoProviders);
        }

        let coords: Vec<(f64, f64)> = waypoints.iter().map(Location::coords).collect();

        for base_url in &self.base_urls {
            tracing::debug!(
                provider = %base_url,
                waypoints = coords.len(),
                alternatives,
                "requesting route"
            );

            match self.transport.fetch_routes(base_url, &coords, alternatives).await {
                Ok(candidates) if !candidates.is_empty() => {
                    log_detour(base_url, &coords, &candidates[0]);
                    return Ok(candidates);
                }
                Ok(_) => {
                    tracing::warn!(provider = %base_url, "routing provider returned no routes");
                }
                Err(err) => {
                    tracing::warn!(provider = %base_url, error = %err, "routing provider failed");
                }
            }
        }

        tracing::warn!(attempted = self.base_urls.len(), "all routing providers failed");
        Err(RoutingError::Unavailable {
            attempted: self.base_urls.len(),
        })
    }
}

/// Tags candidates by preference.
///
/// The minimum-duration candidate is `fastest`; the minimum-distance one is
/// `shortest` when it is a different candidate. Remaining candidates become
/// `balanced` then `eco` in provider order, and anything past four is
/// dropped. A single candidate is repeated under all four tags.
pub fn classify_alternatives(candidates: Vec<RouteCandidate>) -> RouteSet {
    if candidates.len() == 1 {
        let only = &candidates[0];
        return RouteSet::new(
            RoutePreference::ALL
                .iter()
                .map(|preference| only.clone().classify(*preference))
                .collect(),
        );
    }

    let Some(fastest) = index_of_min(&candidates, |c| c.duration_seconds) else {
        return RouteSet::default();
    };
    let mut order = vec![(fastest, RoutePreference::Fastest)];

    if let Some(shortest) = index_of_min(&candidates, |c| c.distance_meters) {
        if shortest != fastest {
            order.push((shortest, RoutePreference::Shortest));
        }
    }

    let mut rest = [RoutePreference::Balanced, RoutePreference::Eco].into_iter();
    for index in 0..candidates.len() {
        if order.iter().any(|(taken, _)| *taken == index) {
            continue;
        }
        match rest.next() {
            Some(preference) => order.push((index, preference)),
            None => break,
        }
    }

    let mut slots: Vec<Option<RouteCandidate>> = candidates.into_iter().map(Some).collect();
    RouteSet::new(
        order
            .into_iter()
            .filter_map(|(index, preference)| slots[index].take().map(|c| c.classify(preference)))
            .collect(),
    )
}

/// First index holding the minimum of `key`.
fn index_of_min(candidates: &[RouteCandidate], key: impl Fn(&RouteCandidate) -> f64) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by(|a, b| key(a.1).total_cmp(&key(b.1)))
        .map(|(index, _)| index)
}

fn log_detour(base_url: &str, coords: &[(f64, f64)], candidate: &RouteCandidate) {
    let straight = geo::path_length_meters(coords);
    let ratio = if straight > 0.0 {
        candidate.distance_meters / straight
    } else {
        0.0
    };
    tracing::debug!(
        provider = %base_url,
        distance_m = candidate.distance_meters,
        duration_s = candidate.duration_seconds,
        straight_line_m = straight,
        detour_ratio = ratio,
        "route received"
    );
}
