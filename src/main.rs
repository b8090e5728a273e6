//! Dash Cache - demo composition root
//!
//! Builds one cache for the lifetime of the process and drives it through a
//! short simulated dashboard session.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dash_cache::integration::{NavigationTracker, RoutePreloader, SessionCache};
use dash_cache::{spawn_sweep_task, CacheManager, Config};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Profile {
    id: String,
    full_name: String,
}

/// Main entry point for the demo session.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache with configured parameters
/// 4. Start the expiry sweep if an interval is configured
/// 5. Navigate the dashboard, cache an API response and a profile
/// 6. Sign out and report statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dash_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Dash Cache demo session");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_size={}, default_ttl={:?}, page_ttl={:?}, api_ttl={:?}, route_ttl={:?}, sweep_interval={:?}",
        config.max_size,
        config.default_ttl,
        config.page_ttl,
        config.api_ttl,
        config.route_ttl,
        config.sweep_interval
    );

    let cache: CacheManager = CacheManager::with_config(&config).context("invalid cache configuration")?;

    let sweep_handle = config
        .sweep_interval
        .map(|interval| spawn_sweep_task(cache.clone(), interval));

    let session = SessionCache::new(cache.clone());
    let mut navigation = NavigationTracker::new(cache.clone(), RoutePreloader::new(cache.clone()));

    for location in [
        "/dashboard",
        "/dashboard/accounts",
        "/dashboard/accounts?platform=tiktok",
        "/dashboard/analytics",
    ] {
        let transition = navigation.navigate(location)?;
        info!(
            "Navigated {:?} -> {} (transitioning: {})",
            transition.previous, transition.current, transition.is_transitioning
        );
    }

    cache.cache_api("/social_accounts", json!([{ "platform": "tiktok", "connected": true }]));
    if let Some(accounts) = cache.get_api("/social_accounts") {
        info!("API response served from cache: {}", accounts);
    }

    let profile: Profile = session.profile_or_load("demo-user", |id| {
        Ok::<_, anyhow::Error>(Profile {
            id: id.to_string(),
            full_name: "Demo User".to_string(),
        })
    })?;
    info!("Profile loaded for {}", profile.full_name);

    let stats = cache.stats();
    info!(
        "Cache statistics before sign-out: {}",
        serde_json::to_string(&stats)?
    );

    session.sign_out();
    info!("Entries after sign-out: {}", cache.len());

    if let Some(handle) = sweep_handle {
        handle.abort();
        info!("Expiry sweep task stopped");
    }

    info!("Demo session complete");
    Ok(())
}
