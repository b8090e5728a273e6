//! Session Cache
//!
//! Per-user profile caching for the signed-in session. Signing out clears
//! the whole shared cache so nothing cached for one user is visible to the
//! next user of the same process.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::cache::{CacheManager, Namespace};
use crate::error::{CacheError, Result};

// == Session Cache ==
#[derive(Debug, Clone)]
pub struct SessionCache {
    cache: CacheManager,
}

impl SessionCache {
    pub fn new(cache: CacheManager) -> Self {
        Self { cache }
    }

    /// Caches the profile record of `user_id` with the default TTL.
    pub fn cache_profile<T: Serialize>(&self, user_id: &str, profile: &T) -> Result<()> {
        self.cache.set_json(Namespace::Profile.key(user_id), profile)
    }

    pub fn cached_profile<T: DeserializeOwned>(&self, user_id: &str) -> Result<Option<T>> {
        self.cache.get_json(&Namespace::Profile.key(user_id))
    }

    /// Returns the cached profile of `user_id`, or loads and caches it.
    pub fn profile_or_load<T, E, F>(&self, user_id: &str, load: F) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce(&str) -> std::result::Result<T, E>,
    {
        if let Some(profile) = self.cached_profile(user_id)? {
            debug!("Profile cache hit for user {}", user_id);
            return Ok(profile);
        }

        let profile = load(user_id)?;
        self.cache_profile(user_id, &profile)?;
        Ok(profile)
    }

    /// Drops one user's cached profile, e.g. after it was updated upstream.
    pub fn invalidate_profile(&self, user_id: &str) -> bool {
        self.cache.delete(&Namespace::Profile.key(user_id))
    }

    // == Sign Out ==
    /// Ends the session by clearing the shared cache.
    ///
    /// Returns the number of entries dropped.
    pub fn sign_out(&self) -> usize {
        let dropped = self.cache.clear();
        info!("Session ended, cleared {} cached entries", dropped);
        dropped
    }
}
