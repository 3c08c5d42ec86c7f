//! The location store and the projection of it into view state.
//!
//! [`Router`] holds the single authoritative query. Programmatic writes are
//! tagged with a [`NavigationId`]; [`ViewStateSync`] waits for the location
//! carrying the id it issued, so its own writes are never re-read as
//! external navigation.

use super::filter::ViewOptions;
use super::query::{QueryParams, ViewState};

/// Tag attached to every programmatic replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavigationId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub params: QueryParams,
    /// `Some` when written by [`Router::replace`].
    pub origin: Option<NavigationId>,
}

/// Oldest back entries are dropped beyond this.
pub const HISTORY_LIMIT: usize = 100;

/// In-process stand-in for the browser location bar.
#[derive(Debug, Clone)]
pub struct Router {
    current: Location,
    back: Vec<QueryParams>,
    forward: Vec<QueryParams>,
    revision: u64,
    next_id: u64,
}

impl Router {
    pub fn new(initial: QueryParams) -> Self {
        Self {
            current: Location {
                params: initial,
                origin: None,
            },
            back: Vec::new(),
            forward: Vec::new(),
            revision: 1,
            next_id: 1,
        }
    }

    pub fn current(&self) -> &Location {
        &self.current
    }

    pub fn params(&self) -> &QueryParams {
        &self.current.params
    }

    /// Bumped on every location change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// External navigation: records a history entry.
    pub fn navigate(&mut self, params: QueryParams) {
        log::info!("navigate to ?{}", params);
        let previous = std::mem::replace(
            &mut self.current,
            Location {
                params,
                origin: None,
            },
        );
        self.push_back(previous.params);
        self.forward.clear();
        self.revision += 1;
    }

    /// Programmatic replace: no history entry, tagged with a fresh id.
    pub fn replace(&mut self, params: QueryParams) -> NavigationId {
        let id = NavigationId(self.next_id);
        self.next_id += 1;
        log::debug!("replace #{} with ?{}", id.0, params);
        self.current = Location {
            params,
            origin: Some(id),
        };
        self.revision += 1;
        id
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn back(&mut self) -> bool {
        let Some(params) = self.back.pop() else {
            return false;
        };
        let previous = std::mem::replace(&mut self.current, Location { params, origin: None });
        self.forward.push(previous.params);
        self.revision += 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        let Some(params) = self.forward.pop() else {
            return false;
        };
        let previous = std::mem::replace(&mut self.current, Location { params, origin: None });
        self.push_back(previous.params);
        self.revision += 1;
        true
    }

    fn push_back(&mut self, params: QueryParams) {
        if self.back.len() >= HISTORY_LIMIT {
            self.back.remove(0);
        }
        self.back.push(params);
    }
}

/// What [`ViewStateSync::observe`] decided for the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Revision already seen.
    Idle,
    /// The location is our own write coming back.
    Acknowledged(NavigationId),
    /// Params equal the last applied snapshot.
    Unchanged,
    /// Local state was re-projected from the location.
    Applied,
}

/// Keeps [`ViewState`] a projection of the [`Router`] location.
#[derive(Debug, Clone)]
pub struct ViewStateSync {
    state: ViewState,
    last_applied: Option<QueryParams>,
    awaiting: Option<NavigationId>,
    seen_revision: u64,
}

impl ViewStateSync {
    pub fn new(local: ViewOptions) -> Self {
        Self {
            state: ViewState {
                options: local,
                ..ViewState::default()
            },
            last_applied: None,
            awaiting: None,
            seen_revision: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn awaiting(&self) -> Option<NavigationId> {
        self.awaiting
    }

    /// Reconcile with the router. Call once per frame and after navigating.
    pub fn observe(&mut self, router: &Router) -> SyncOutcome {
        if router.revision() == self.seen_revision {
            return SyncOutcome::Idle;
        }
        self.seen_revision = router.revision();
        let location = router.current();

        if let Some(id) = location.origin {
            if self.awaiting == Some(id) {
                self.awaiting = None;
                self.last_applied = Some(location.params.clone());
                return SyncOutcome::Acknowledged(id);
            }
        }
        if self.last_applied.as_ref() == Some(&location.params) {
            return SyncOutcome::Unchanged;
        }

        self.state = ViewState::from_params(&location.params, &self.state.options);
        self.last_applied = Some(location.params.clone());
        self.awaiting = None;
        log::debug!("applied ?{}", location.params);
        SyncOutcome::Applied
    }

    /// User-driven change: update locally, then write the merged params back
    /// through [`Router::replace`].
    pub fn update(&mut self, router: &mut Router, change: impl FnOnce(&mut ViewState)) -> NavigationId {
        change(&mut self.state);
        let mut params = router.params().clone();
        self.state.write_params(&mut params);
        let id = router.replace(params);
        self.awaiting = Some(id);
        id
    }

    /// Change options that never reach the query (task display, grouping, columns).
    pub fn update_local(&mut self, change: impl FnOnce(&mut ViewOptions)) {
        change(&mut self.state.options);
    }
}
