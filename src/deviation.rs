//! Route deviation tracking.
//!
//! Distance from a live position to the route is the minimum, over all
//! polyline segments, of the great-circle distance to the closest point of
//! that segment (see [`geo::point_to_segment_meters`]). This is a planar /
//! haversine approximation, not map matching.

use rayon::prelude::*;

use crate::config::DEFAULT_DEVIATION_THRESHOLD_M;
use crate::geo;
use crate::models::{DeviationEvent, Position};
use crate::polyline::Polyline;

/// Result of evaluating one position against a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviationState {
    /// The route has fewer than two points.
    Unknown,
    Known(DeviationEvent),
}

impl DeviationState {
    pub fn event(&self) -> Option<&DeviationEvent> {
        match self {
            Self::Unknown => None,
            Self::Known(event) => Some(event),
        }
    }
}

/// Distance in meters from `position` to the nearest segment of `polyline`.
pub fn distance_to_route(polyline: &Polyline, position: Position) -> Option<f64> {
    let point = position.coords();
    polyline
        .segments()
        .map(|(a, b)| geo::point_to_segment_meters(point, a, b))
        .min_by(f64::total_cmp)
}

/// Evaluates a single position.
pub fn evaluate(polyline: &Polyline, position: Position, threshold_meters: f64) -> DeviationState {
    match distance_to_route(polyline, position) {
        Some(distance_meters) => DeviationState::Known(DeviationEvent {
            is_off_route: distance_meters > threshold_meters,
            distance_meters,
        }),
        None => DeviationState::Unknown,
    }
}

/// Evaluates a recorded trace, one state per position.
pub fn evaluate_trace(polyline: &Polyline, positions: &[Position], threshold_meters: f64) -> Vec<DeviationState> {
    positions
        .par_iter()
        .map(|position| evaluate(polyline, *position, threshold_meters))
        .collect()
}

/// Evaluates live samples and reports when the on/off-route flag flips.
#[derive(Debug, Clone)]
pub struct DeviationTracker {
    threshold_meters: f64,
    last: Option<DeviationState>,
}

impl Default for DeviationTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DEVIATION_THRESHOLD_M)
    }
}

impl DeviationTracker {
    pub fn new(threshold_meters: f64) -> Self {
        Self {
            threshold_meters,
            last: None,
        }
    }

    pub fn threshold_meters(&self) -> f64 {
        self.threshold_meters
    }

    /// State after the most recent sample, if any.
    pub fn last_state(&self) -> Option<DeviationState> {
        self.last
    }

    pub fn last_event(&self) -> Option<DeviationEvent> {
        self.last.and_then(|state| state.event().copied())
    }

    /// Processes one sample.
    ///
    /// Returns the event when it should be surfaced: on the first known
    /// evaluation and whenever `is_off_route` changes. A missing position
    /// does nothing.
    pub fn observe(&mut self, polyline: &Polyline, position: Option<Position>) -> Option<DeviationEvent> {
        let position = position?;
        let state = evaluate(polyline, position, self.threshold_meters);
        let previous = self.last.replace(state);

        let DeviationState::Known(event) = state else {
            return None;
        };

        let flipped = match previous.as_ref().and_then(DeviationState::event) {
            Some(before) => before.is_off_route != event.is_off_route,
            None => true,
        };
        if !flipped {
            return None;
        }

        if event.is_off_route {
            tracing::info!(distance_m = event.distance_meters, "vehicle left the route");
        } else {
            tracing::info!(distance_m = event.distance_meters, "vehicle on route");
        }
        Some(event)
    }

    /// Forgets the last state, e.g. when the route is replaced.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
