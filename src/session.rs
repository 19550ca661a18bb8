//! Route session: glues the point store, the routing client and the
//! deviation tracker together for one route-editing session.
//!
//! Routing is keyed on the waypoint signature. Every request takes a
//! generation token; a response is applied only if its token is still the
//! current one when it arrives, so the route on display always belongs to
//! the latest waypoint list. Stale responses are dropped silently.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::PlannerConfig;
use crate::deviation::DeviationTracker;
use crate::error::RoutingError;
use crate::geo;
use crate::models::{DeviationEvent, Location, Position, RoutePreference, RouteResult, RouteSet, WaypointSignature};
use crate::routing::RoutingClient;
use crate::store::{ReconcileOutcome, RoutePointStore};
use crate::traits::RouteTransport;

/// What a call to [`RouteSession::refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fresh route set was stored.
    Applied,
    /// The waypoints have not changed since the last request.
    Unchanged,
    /// Fewer than two waypoints; any previous routes were dropped.
    Cleared,
    /// A newer request superseded this one, or the waypoints were edited,
    /// before it completed.
    Discarded,
}

#[derive(Debug)]
struct SessionState {
    store: RoutePointStore,
    generation: u64,
    requested: Option<WaypointSignature>,
    routes: Option<RouteSet>,
    preference: RoutePreference,
    tracker: DeviationTracker,
    tracking: bool,
    last_position: Option<Position>,
}

impl SessionState {
    fn active_route(&self) -> Option<&RouteResult> {
        self.routes.as_ref()?.get(self.preference)
    }
}

pub struct RouteSession<T> {
    client: RoutingClient<T>,
    search_radius_meters: f64,
    state: Mutex<SessionState>,
}

impl<T: RouteTransport> RouteSession<T> {
    pub fn new(client: RoutingClient<T>, config: &PlannerConfig) -> Self {
        Self {
            client,
            search_radius_meters: config.search_radius_meters,
            state: Mutex::new(SessionState {
                store: RoutePointStore::new(config.max_points),
                generation: 0,
                requested: None,
                routes: None,
                preference: RoutePreference::default(),
                tracker: DeviationTracker::new(config.deviation_threshold_meters),
                tracking: false,
                last_position: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs an edit against the point store.
    pub fn edit<R>(&self, f: impl FnOnce(&mut RoutePointStore) -> R) -> R {
        f(&mut self.lock().store)
    }

    /// Read-only access to the point store.
    pub fn with_store<R>(&self, f: impl FnOnce(&RoutePointStore) -> R) -> R {
        f(&self.lock().store)
    }

    /// Places from `locations` within the configured search radius of
    /// `center`, nearest first. Feeds the location picker.
    pub fn nearby<'a>(&self, locations: &'a [Location], center: (f64, f64)) -> Vec<(&'a Location, f64)> {
        geo::within_radius(locations, center, self.search_radius_meters)
    }

    pub fn reconcile(&self, external: &[Location]) -> ReconcileOutcome {
        self.lock().store.reconcile(external)
    }

    pub fn waypoints(&self) -> Vec<Location> {
        self.lock().store.flatten()
    }

    pub fn routes(&self) -> Option<RouteSet> {
        self.lock().routes.clone()
    }

    /// The route for the selected preference, used for pricing and tracking.
    pub fn active_route(&self) -> Option<RouteResult> {
        self.lock().active_route().cloned()
    }

    pub fn preference(&self) -> RoutePreference {
        self.lock().preference
    }

    pub fn select_preference(&self, preference: RoutePreference) {
        let mut state = self.lock();
        if state.preference != preference {
            state.preference = preference;
            state.tracker.reset();
        }
    }

    /// Re-requests routes when the waypoint signature changed since the
    /// last request.
    ///
    /// Routing failures are returned only for the current generation; a
    /// failure that arrives after a newer request is discarded like any
    /// other stale result.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RoutingError> {
        let (token, signature, waypoints) = {
            let mut state = self.lock();
            let signature = state.store.signature();

            if state.requested.as_ref() == Some(&signature) {
                return Ok(RefreshOutcome::Unchanged);
            }

            state.generation += 1;
            state.requested = Some(signature.clone());

            let waypoints = state.store.flatten();
            if waypoints.len() < 2 {
                if state.routes.take().is_some() {
                    state.tracker.reset();
                }
                return Ok(RefreshOutcome::Cleared);
            }

            (state.generation, signature, waypoints)
        };

        let result = self.client.build_all_routes(&waypoints).await;

        let mut state = self.lock();
        if token != state.generation {
            tracing::debug!(token, current = state.generation, "discarding stale routing result");
            return Ok(RefreshOutcome::Discarded);
        }
        // Edited in flight without a new refresh.
        if state.store.signature() != signature {
            tracing::debug!(requested = %signature, "waypoints changed in flight, discarding routing result");
            return Ok(RefreshOutcome::Discarded);
        }

        state.tracker.reset();
        match result {
            Ok(routes) => {
                state.routes = Some(routes);
                Ok(RefreshOutcome::Applied)
            }
            Err(err) => {
                state.routes = None;
                Err(err)
            }
        }
    }

    pub fn tracking(&self) -> bool {
        self.lock().tracking
    }

    pub fn set_tracking(&self, enabled: bool) {
        let mut state = self.lock();
        state.tracking = enabled;
        if !enabled {
            state.tracker.reset();
            state.last_position = None;
        }
    }

    /// Feeds a live position sample. Returns an event when the on/off-route
    /// flag changes. Does nothing unless tracking is enabled.
    pub fn update_position(&self, position: Option<Position>) -> Option<DeviationEvent> {
        let mut state = self.lock();
        if !state.tracking {
            return None;
        }
        if position.is_some() {
            state.last_position = position;
        }

        let SessionState {
            routes,
            preference,
            tracker,
            ..
        } = &mut *state;
        let route = routes.as_ref()?.get(*preference)?;
        tracker.observe(&route.polyline, position)
    }

    pub fn last_deviation(&self) -> Option<DeviationEvent> {
        self.lock().tracker.last_event()
    }

    pub fn last_position(&self) -> Option<Position> {
        self.lock().last_position
    }
}
