//! Namespace Module
//!
//! Key-prefix conventions and the per-category convenience wrappers. The
//! store itself never parses keys; prefixes only keep categories apart.

use std::fmt;

use crate::cache::CacheManager;

// == Namespace ==
/// Logical category of a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Route preload markers
    Route,
    /// Rendered page state
    Page,
    /// API responses
    Api,
    /// Per-user profile records
    Profile,
}

impl Namespace {
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Route => "route:",
            Namespace::Page => "page:",
            Namespace::Api => "api:",
            Namespace::Profile => "profile:",
        }
    }

    /// Builds the full cache key for `name` in this namespace.
    pub fn key(self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix().trim_end_matches(':'))
    }
}

impl<V> CacheManager<V> {
    // == Page Cache ==
    /// Caches page state for `path` with the page TTL.
    pub fn cache_page(&self, path: &str, data: V) {
        self.set_with_ttl(Namespace::Page.key(path), data, self.ttls().page);
    }

    pub fn get_page(&self, path: &str) -> Option<V>
    where
        V: Clone,
    {
        self.get(&Namespace::Page.key(path))
    }

    // == API Response Cache ==
    /// Caches an API response for `endpoint` with the API TTL.
    pub fn cache_api(&self, endpoint: &str, data: V) {
        self.set_with_ttl(Namespace::Api.key(endpoint), data, self.ttls().api);
    }

    pub fn get_api(&self, endpoint: &str) -> Option<V>
    where
        V: Clone,
    {
        self.get(&Namespace::Api.key(endpoint))
    }

    // == Route Markers ==
    /// Records that `path` has been preloaded, with the route TTL.
    pub fn cache_route(&self, path: &str, marker: V) {
        self.set_with_ttl(Namespace::Route.key(path), marker, self.ttls().route);
    }

    pub fn has_route(&self, path: &str) -> bool {
        self.has(&Namespace::Route.key(path))
    }
}
