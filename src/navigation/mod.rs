//! Navigation core: the location catalog, user tracking, route planning, search and the store
//! that ties them together behind named actions.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod planner;
pub mod search;
pub mod store;
pub mod tracker;

pub use catalog::{CatalogSource, LocationCatalog};
pub use error::{NavError, NavResult};
pub use models::{CameraView, Category, MapLocation, NavigationPath, UserPosition, UserType, Vec3, WaitLevel};
pub use planner::{NavigationPlanner, RoutePolicy};
pub use store::{NavPhase, NavigationState, NavigationStore, SubscriptionId};
pub use tracker::UserPositionTracker;
