//! Route point store.
//!
//! Owns the single writable [`RouteState`] of a route-editing session and
//! exposes slot-level edits plus positional ones (as the map and list panels
//! address points). Edits that would break the capacity invariant are
//! rejected silently and report `false`.
//!
//! The store also reconciles against an externally owned waypoint list (the
//! order form's value). External updates overwrite local state on first
//! observation or when the external id list changes, except when the user
//! has edited locally and the external list is empty.

use crate::config::DEFAULT_MAX_POINTS;
use crate::models::{Location, PointIndex, PointRole, RoutePoint, RouteState, WaypointSignature};
use crate::traits::LocationDirectory;

/// What `reconcile` did with an external update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Applied,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct RoutePointStore {
    state: RouteState,
    max_points: usize,
    user_modified: bool,
    last_external: Option<WaypointSignature>,
}

impl Default for RoutePointStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POINTS)
    }
}

impl RoutePointStore {
    /// Empty store. `max_points` is raised to 2 if lower.
    pub fn new(max_points: usize) -> Self {
        Self {
            state: RouteState::default(),
            max_points: max_points.max(2),
            user_modified: false,
            last_external: None,
        }
    }

    pub fn state(&self) -> &RouteState {
        &self.state
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn max_additional(&self) -> usize {
        self.max_points - 2
    }

    pub fn user_modified(&self) -> bool {
        self.user_modified
    }

    pub fn points(&self) -> Vec<RoutePoint> {
        self.state.points()
    }

    pub fn flatten(&self) -> Vec<Location> {
        self.state.flatten()
    }

    pub fn signature(&self) -> WaypointSignature {
        self.state.signature()
    }

    /// Intermediate stops that can still be filled.
    pub fn capacity_left(&self) -> usize {
        let by_additional = self.max_additional().saturating_sub(self.state.filled_additional());
        let by_total = self.max_points.saturating_sub(self.state.filled_count());
        by_additional.min(by_total)
    }

    pub fn set_start(&mut self, location: Option<Location>) {
        self.state.start = location;
        self.user_modified = true;
    }

    pub fn set_end(&mut self, location: Option<Location>) {
        self.state.end = location;
        self.user_modified = true;
    }

    /// Fills the first empty intermediate slot, or appends a new one.
    pub fn add_additional(&mut self, location: Location) -> bool {
        if self.state.filled_additional() >= self.max_additional()
            || self.state.filled_count() >= self.max_points
        {
            tracing::debug!(id = %location.id, "route is full, stop not added");
            return false;
        }

        match self.state.additional.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => *slot = Some(location),
            None => self.state.additional.push(Some(location)),
        }
        self.user_modified = true;
        true
    }

    /// Replaces the intermediate slot at `index`, padding with empty slots
    /// when `index` is past the end.
    pub fn update_additional(&mut self, index: usize, location: Option<Location>) -> bool {
        if index >= self.max_additional() {
            tracing::debug!(index, "intermediate slot out of range");
            return false;
        }

        if index >= self.state.additional.len() {
            self.state.additional.resize(index + 1, None);
        }
        self.state.additional[index] = location;
        self.user_modified = true;
        true
    }

    /// Deletes an intermediate slot outright; later stops move up.
    pub fn remove_additional_slot(&mut self, index: usize) -> bool {
        if index >= self.state.additional.len() {
            return false;
        }
        self.state.additional.remove(index);
        self.user_modified = true;
        true
    }

    /// Places `location` at a position of the materialized point list.
    pub fn select_for_point(&mut self, location: Location, point: PointIndex) -> bool {
        match self.resolve(point) {
            None => self.add_additional(location),
            Some(PointRole::Start) => {
                self.set_start(Some(location));
                true
            }
            Some(PointRole::End) => {
                self.set_end(Some(location));
                true
            }
            Some(PointRole::Additional(index)) => self.update_additional(index, Some(location)),
        }
    }

    /// Clears the point at a position of the materialized point list.
    pub fn remove_point(&mut self, index: usize) -> bool {
        match self.resolve(PointIndex::At(index)) {
            Some(PointRole::Start) => {
                self.set_start(None);
                true
            }
            Some(PointRole::End) => {
                self.set_end(None);
                true
            }
            Some(PointRole::Additional(slot)) => self.update_additional(slot, None),
            None => false,
        }
    }

    /// Fills start, then end, then an intermediate stop.
    pub fn add_smart(&mut self, location: Location) -> bool {
        if self.state.start.is_none() {
            self.set_start(Some(location));
            true
        } else if self.state.end.is_none() {
            self.set_end(Some(location));
            true
        } else {
            self.add_additional(location)
        }
    }

    /// Clears every slot holding `id`.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let holds = |slot: &Option<Location>| slot.as_ref().is_some_and(|location| location.id == id);
        let mut removed = false;

        if holds(&self.state.start) {
            self.state.start = None;
            removed = true;
        }
        if holds(&self.state.end) {
            self.state.end = None;
            removed = true;
        }
        for slot in self.state.additional.iter_mut().filter(|slot| holds(&**slot)) {
            *slot = None;
            removed = true;
        }

        if removed {
            self.user_modified = true;
        }
        removed
    }

    /// Applies an external waypoint list unless doing so would clobber local
    /// edits.
    pub fn reconcile(&mut self, external: &[Location]) -> ReconcileOutcome {
        let signature = WaypointSignature::of(external);
        let first = self.last_external.is_none();
        let changed = self.last_external.as_ref() != Some(&signature);
        self.last_external = Some(signature);

        if !(first || changed) {
            return ReconcileOutcome::Ignored;
        }
        if self.user_modified && external.is_empty() {
            tracing::debug!("external waypoints empty, keeping local edits");
            return ReconcileOutcome::Ignored;
        }

        self.state = self.state_from(external);
        tracing::debug!(signature = %self.state.signature(), first, "external waypoints applied");
        ReconcileOutcome::Applied
    }

    /// Resolves `ids` through `directory` (unknown ids are dropped) and
    /// reconciles with the result.
    pub fn reconcile_ids<D>(&mut self, ids: &[String], directory: &D) -> ReconcileOutcome
    where
        D: LocationDirectory + ?Sized,
    {
        let resolved: Vec<Location> = ids
            .iter()
            .filter_map(|id| {
                let location = directory.location(id);
                if location.is_none() {
                    tracing::debug!(%id, "unknown location id");
                }
                location
            })
            .collect();

        self.reconcile(&resolved)
    }

    fn state_from(&self, external: &[Location]) -> RouteState {
        match external {
            [] => RouteState::default(),
            [only] => RouteState {
                start: Some(only.clone()),
                additional: Vec::new(),
                end: None,
            },
            [start, middle @ .., end] => {
                if middle.len() > self.max_additional() {
                    tracing::warn!(
                        stops = middle.len(),
                        max = self.max_additional(),
                        "external route has too many stops, truncating"
                    );
                }
                RouteState {
                    start: Some(start.clone()),
                    additional: middle
                        .iter()
                        .take(self.max_additional())
                        .cloned()
                        .map(Some)
                        .collect(),
                    end: Some(end.clone()),
                }
            }
        }
    }

    /// Maps a materialized point position to a slot. `None` means append.
    fn resolve(&self, point: PointIndex) -> Option<PointRole> {
        let last = self.state.additional.len() + 1;
        match point {
            PointIndex::Append => None,
            PointIndex::At(0) => Some(PointRole::Start),
            PointIndex::At(index) if index == last => Some(PointRole::End),
            PointIndex::At(index) => Some(PointRole::Additional(index - 1)),
        }
    }
}
