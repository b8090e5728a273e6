//! Integration Module
//!
//! Collaborators that sit at the cache boundary of a dashboard application:
//! route preloading, page transitions and the signed-in session.

mod navigation;
mod route_preload;
mod session;

pub use navigation::{NavigationTracker, PageSnapshot, Transition};
pub use route_preload::{RoutePreloader, DASHBOARD_ROUTES};
pub use session::SessionCache;
