//! Typed JSON access over a `serde_json::Value` cache.
//!
//! Callers that share one cache across payload shapes store JSON values and
//! decode them back into their own types on read.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::CacheManager;
use crate::error::Result;

impl CacheManager<serde_json::Value> {
    /// Serializes `value` and stores it under `key` with the default TTL.
    pub fn set_json<T: Serialize>(&self, key: impl Into<String>, value: &T) -> Result<()> {
        let encoded = serde_json::to_value(value)?;
        self.set(key, encoded);
        Ok(())
    }

    /// Serializes `value` and stores it under `key`, expiring after `ttl`.
    pub fn set_json_with_ttl<T: Serialize>(
        &self,
        key: impl Into<String>,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        let encoded = serde_json::to_value(value)?;
        self.set_with_ttl(key, encoded, ttl);
        Ok(())
    }

    /// Reads `key` and decodes it as `T`.
    ///
    /// A miss is `Ok(None)`; a live value of the wrong shape is an error.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}
