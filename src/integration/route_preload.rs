//! Route Preloader
//!
//! Marks dashboard routes as preloaded so navigation does not redo the work
//! while the marker is live.

use serde_json::json;
use tracing::debug;

use crate::cache::CacheManager;

/// Routes reachable from the dashboard shell.
pub const DASHBOARD_ROUTES: &[&str] = &[
    "/dashboard",
    "/dashboard/accounts",
    "/dashboard/generator",
    "/dashboard/captions",
    "/dashboard/strategy",
    "/dashboard/scheduler",
    "/dashboard/library",
    "/dashboard/analytics",
    "/dashboard/settings",
];

// == Route Preloader ==
#[derive(Debug, Clone)]
pub struct RoutePreloader {
    cache: CacheManager,
    routes: Vec<String>,
}

impl RoutePreloader {
    /// Creates a preloader for the dashboard routes.
    pub fn new(cache: CacheManager) -> Self {
        Self::with_routes(cache, DASHBOARD_ROUTES.iter().copied())
    }

    pub fn with_routes<I, S>(cache: CacheManager, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cache,
            routes: routes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    // == Preload ==
    /// Writes a `route:<path>` marker for every route without a live one.
    ///
    /// Returns the number of markers written.
    pub fn preload(&self) -> usize {
        let mut written = 0;
        for route in &self.routes {
            if !self.cache.has_route(route) {
                self.cache.cache_route(route, json!({ "preloaded": true }));
                written += 1;
            }
        }

        debug!("Route preload: {} of {} routes refreshed", written, self.routes.len());
        written
    }

    pub fn is_preloaded(&self, path: &str) -> bool {
        self.cache.has_route(path)
    }
}
