use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::Rng;
use std::collections::BTreeSet;

use super::catalog::LocationCatalog;
use super::config::Config;
use super::error::{NavError, NavResult};
use super::models::{CameraView, Category, MapLocation, NavigationPath, UserPosition, UserType, Vec3};
use super::planner::{NavigationPlanner, RoutePolicy};
use super::search;
use super::tracker::UserPositionTracker;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NavPhase {
    Idle,
    Navigating,
}

impl NavPhase {
    pub fn key(self) -> &'static str {
        match self {
            NavPhase::Idle => "idle",
            NavPhase::Navigating => "navigating",
        }
    }
}

/// Read-only view of everything the presentation layer renders.
///
/// Fields are private: the only way to change them is through [`NavigationStore`] actions.
#[derive(Clone, Debug)]
pub struct NavigationState {
    tracker: UserPositionTracker,
    user_type: UserType,
    selected_location: Option<MapLocation>,
    current_path: Option<NavigationPath>,
    search_query: String,
    active_filters: BTreeSet<Category>,
    camera: CameraView,
    selected_terminal: Option<String>,
    locations: Vec<MapLocation>,
}

impl NavigationState {
    fn new(tracker: UserPositionTracker) -> Self {
        Self {
            tracker,
            user_type: UserType::Passenger,
            selected_location: None,
            current_path: None,
            search_query: String::new(),
            active_filters: BTreeSet::new(),
            camera: CameraView::default(),
            selected_terminal: None,
            locations: Vec::new(),
        }
    }

    pub fn user_position(&self) -> Option<&UserPosition> {
        self.tracker.position()
    }
    pub fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }
    pub fn tracker(&self) -> &UserPositionTracker {
        &self.tracker
    }
    pub fn user_type(&self) -> UserType {
        self.user_type
    }
    pub fn selected_location(&self) -> Option<&MapLocation> {
        self.selected_location.as_ref()
    }
    pub fn current_path(&self) -> Option<&NavigationPath> {
        self.current_path.as_ref()
    }
    /// Derived from `current_path`, so the two can never disagree.
    pub fn is_navigating(&self) -> bool {
        self.current_path.is_some()
    }
    pub fn phase(&self) -> NavPhase {
        if self.is_navigating() { NavPhase::Navigating } else { NavPhase::Idle }
    }
    pub fn search_query(&self) -> &str {
        &self.search_query
    }
    pub fn active_filters(&self) -> &BTreeSet<Category> {
        &self.active_filters
    }
    pub fn camera(&self) -> CameraView {
        self.camera
    }
    pub fn selected_terminal(&self) -> Option<&str> {
        self.selected_terminal.as_deref()
    }
    pub fn locations(&self) -> &[MapLocation] {
        &self.locations
    }
    pub fn location(&self, id: &str) -> Option<&MapLocation> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn visible_locations(&self) -> Vec<&MapLocation> {
        search::filter(&self.locations, &self.search_query, &self.active_filters, self.user_type)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&NavigationState)>;

/// Owns the navigation state and is its only mutation surface.
///
/// Every action runs to completion before listeners are notified, so a listener only ever sees
/// the state before or after an action.
pub struct NavigationStore {
    state: NavigationState,
    catalog: LocationCatalog,
    planner: NavigationPlanner,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for NavigationStore {
    fn default() -> Self {
        Self::new(LocationCatalog::default(), NavigationPlanner::default(), UserPositionTracker::default())
    }
}

impl NavigationStore {
    pub fn new(catalog: LocationCatalog, planner: NavigationPlanner, tracker: UserPositionTracker) -> Self {
        Self {
            state: NavigationState::new(tracker),
            catalog,
            planner,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let planner = NavigationPlanner::new(RoutePolicy { walk_speed: cfg.walk_speed() });
        let tracker = UserPositionTracker::new(cfg.track_interval());
        Self::new(LocationCatalog::new(cfg.catalog_source()), planner, tracker)
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn planner(&self) -> &NavigationPlanner {
        &self.planner
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&NavigationState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn publish(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    pub fn set_user_position(&mut self, pos: UserPosition) {
        debug!("user position -> {}", pos.position);
        self.state.tracker.set_position(pos);
        self.publish();
    }

    pub fn set_user_type(&mut self, user_type: UserType) {
        self.state.user_type = user_type;
        self.publish();
    }

    pub fn start_tracking(&mut self, now: DateTime<Utc>) {
        if !self.state.tracker.start(now) {
            debug!("tracking already armed");
            return;
        }
        self.publish();
    }

    pub fn stop_tracking(&mut self) {
        if self.state.tracker.stop() {
            self.publish();
        }
    }

    /// Drives the tracking schedule. Returns true when a simulated step was applied.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: DateTime<Utc>, rng: &mut R) -> bool {
        if self.state.tracker.poll(now, rng).is_none() {
            return false;
        }
        self.publish();
        true
    }

    pub fn select_location(&mut self, loc: MapLocation) {
        debug!("selected {}", loc.id);
        self.state.selected_location = Some(loc);
        self.publish();
    }

    /// Plans a route from the user to `loc` and enters the navigating phase.
    ///
    /// Without a known user position the state is left untouched, nothing is published and
    /// `NavError::NoUserPosition` is returned.
    pub fn navigate_to(&mut self, loc: &MapLocation) -> NavResult<()> {
        let Some(from) = self.state.tracker.position() else {
            warn!("navigate_to({}) ignored: user position unknown", loc.id);
            return Err(NavError::NoUserPosition);
        };
        let path = self.planner.plan_route(from, loc);
        info!("route to {}: {:.2} units, ~{} min", loc.id, path.distance_units, path.estimated_minutes);
        self.state.current_path = Some(path);
        self.state.selected_location = Some(loc.clone());
        self.publish();
        Ok(())
    }

    pub fn navigate_to_id(&mut self, id: &str) -> NavResult<()> {
        let loc = self.state.location(id).cloned().ok_or_else(|| NavError::UnknownLocation(id.to_string()))?;
        self.navigate_to(&loc)
    }

    pub fn stop_navigation(&mut self) {
        if self.state.current_path.take().is_some() {
            self.publish();
        }
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.state.search_query = query.to_string();
        self.publish();
    }

    pub fn toggle_filter(&mut self, category: Category) {
        if !self.state.active_filters.remove(&category) {
            self.state.active_filters.insert(category);
        }
        self.publish();
    }

    pub fn set_camera_view(&mut self, position: Vec3, target: Vec3) {
        self.state.camera = CameraView { position, target };
        self.publish();
    }

    pub fn select_terminal(&mut self, terminal: &str) {
        self.state.selected_terminal = Some(terminal.to_string());
        self.publish();
    }

    /// Loads the catalog into the store unless locations are already present.
    /// Returns whether anything was loaded.
    pub fn initialize_locations(&mut self) -> NavResult<bool> {
        if !self.state.locations.is_empty() {
            debug!("locations already initialized ({})", self.state.locations.len());
            return Ok(false);
        }
        self.state.locations = self.catalog.initialize()?;
        self.publish();
        Ok(true)
    }
}
