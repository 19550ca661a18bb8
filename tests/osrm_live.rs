//! Live OSRM checks. Needs network access to the configured providers
//! (`ROUTING_PROVIDER_URLS`, defaults to the public OSRM demo servers).
//!
//! Run with `cargo test --test osrm_live -- --ignored`.

mod fixtures;

use route_planner::config::RoutingConfig;
use route_planner::deviation::{DeviationState, evaluate};
use route_planner::models::{Position, RoutePreference};
use route_planner::routing::RoutingClient;

use fixtures::{destination, hotel};

#[tokio::test]
#[ignore = "hits live routing providers"]
async fn osrm_route_between_strip_and_airport() {
    let config = RoutingConfig::from_env();
    let client = RoutingClient::osrm(&config).expect("build OSRM client");

    let route = client
        .build_route(&[hotel(0), destination(0)], RoutePreference::Fastest)
        .await
        .expect("route from a live provider");

    assert!(route.distance_meters > 4_000.0, "got {}", route.distance_meters);
    assert!(route.duration_seconds > 0.0);
    assert!(route.polyline.len() >= 2);

    // Geometry comes back as (lat, lng), so the pickup sits near the route.
    let (lat, lng) = hotel(0).coords();
    match evaluate(&route.polyline, Position::new(lat, lng), 300.0) {
        DeviationState::Known(event) => assert!(!event.is_off_route, "pickup {}m off", event.distance_meters),
        DeviationState::Unknown => panic!("route geometry too short"),
    }
}

#[tokio::test]
#[ignore = "hits live routing providers"]
async fn osrm_alternatives_are_classified() {
    let config = RoutingConfig::from_env();
    let client = RoutingClient::osrm(&config).expect("build OSRM client");

    let set = client
        .build_all_routes(&[hotel(2), destination(2)])
        .await
        .expect("alternatives from a live provider");

    assert!(set.get(RoutePreference::Fastest).is_some());
    assert!(!set.is_empty() && set.len() <= 4);
}
