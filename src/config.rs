//! Policy defaults and environment loading.

use std::env;

pub const DEFAULT_MAX_POINTS: usize = 5;
pub const DEFAULT_DEVIATION_THRESHOLD_M: f64 = 100.0;
pub const DEFAULT_SEARCH_RADIUS_M: f64 = 2_000.0;

const DEFAULT_PROVIDERS: [&str; 2] = [
    "https://router.project-osrm.org",
    "https://routing.openstreetmap.de/routed-car",
];

/// Routing providers, tried in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    pub base_urls: Vec<String>,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_urls: DEFAULT_PROVIDERS.iter().map(ToString::to_string).collect(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

impl RoutingConfig {
    pub fn with_providers<I, S>(base_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_urls: base_urls.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_urls = match env::var("ROUTING_PROVIDER_URLS") {
            Ok(value) => {
                let urls: Vec<String> = value
                    .split(',')
                    .map(|url| url.trim().trim_end_matches('/').to_string())
                    .filter(|url| !url.is_empty())
                    .collect();
                if urls.is_empty() { defaults.base_urls } else { urls }
            }
            Err(_) => {
                tracing::trace!("ROUTING_PROVIDER_URLS not set, using defaults: {:?}", defaults.base_urls);
                defaults.base_urls
            }
        };
        let profile = env::var("ROUTING_PROFILE").unwrap_or(defaults.profile);
        let timeout_secs = env_u64("ROUTING_TIMEOUT_SECS", defaults.timeout_secs);

        Self {
            base_urls,
            profile,
            timeout_secs,
        }
    }
}

/// Everything the route editor, routing and tracking need.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub routing: RoutingConfig,
    /// Upper bound on start + intermediate + end points.
    pub max_points: usize,
    pub deviation_threshold_meters: f64,
    /// Radius for nearby-location lookups.
    pub search_radius_meters: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            routing: RoutingConfig::default(),
            max_points: DEFAULT_MAX_POINTS,
            deviation_threshold_meters: DEFAULT_DEVIATION_THRESHOLD_M,
            search_radius_meters: DEFAULT_SEARCH_RADIUS_M,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Self {
        let max_points = env_u64("ROUTE_MAX_POINTS", DEFAULT_MAX_POINTS as u64).max(2) as usize;
        let deviation_threshold_meters = env_f64("DEVIATION_THRESHOLD_METERS", DEFAULT_DEVIATION_THRESHOLD_M);
        let search_radius_meters = env_f64("LOCATION_SEARCH_RADIUS_METERS", DEFAULT_SEARCH_RADIUS_M);

        Self {
            routing: RoutingConfig::from_env(),
            max_points,
            deviation_threshold_meters,
            search_radius_meters,
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key).ok().and_then(|value| value.parse::<f64>().ok()).unwrap_or_else(|| {
        tracing::trace!("{key} not set, using default: {default}");
        default
    })
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key).ok().and_then(|value| value.parse::<u64>().ok()).unwrap_or_else(|| {
        tracing::trace!("{key} not set, using default: {default}");
        default
    })
}
