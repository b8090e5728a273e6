//! Navigation Tracker
//!
//! Follows page transitions, caching a snapshot of every page entered and
//! refreshing route preload markers whenever the pathname changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheManager, Namespace};
use crate::error::Result;
use crate::integration::RoutePreloader;

/// Page state stored under `page:<path>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a single navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub previous: Option<String>,
    pub current: String,
    /// True iff the pathname changed
    pub is_transitioning: bool,
}

// == Navigation Tracker ==
#[derive(Debug)]
pub struct NavigationTracker {
    cache: CacheManager,
    preloader: RoutePreloader,
    current: Option<String>,
}

impl NavigationTracker {
    pub fn new(cache: CacheManager, preloader: RoutePreloader) -> Self {
        Self {
            cache,
            preloader,
            current: None,
        }
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current.as_deref()
    }

    // == Navigate ==
    /// Moves to `location` (a path with an optional `?query`).
    ///
    /// Only the pathname participates: a query-only change is not a
    /// transition and leaves the cached page and route markers untouched.
    pub fn navigate(&mut self, location: &str) -> Result<Transition> {
        let pathname = pathname(location);
        let is_transitioning = self.current.as_deref() != Some(pathname);

        if is_transitioning {
            self.preloader.preload();

            let snapshot = PageSnapshot {
                timestamp: Utc::now(),
            };
            self.cache.cache_page(pathname, serde_json::to_value(&snapshot)?);
        }

        let previous = if is_transitioning {
            self.current.replace(pathname.to_string())
        } else {
            self.current.clone()
        };

        Ok(Transition {
            previous,
            current: pathname.to_string(),
            is_transitioning,
        })
    }

    /// Cached snapshot of `path`, if one is still live.
    pub fn snapshot(&self, path: &str) -> Result<Option<PageSnapshot>> {
        self.cache.get_json(&Namespace::Page.key(path))
    }
}

fn pathname(location: &str) -> &str {
    location
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or(location)
}
