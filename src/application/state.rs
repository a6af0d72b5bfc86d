// src/application/state.rs

use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::integrations::rmp::{CandidateSource, RmpClient};
use crate::services::{LocalChannel, RatingCache, ResolutionService, ResolverConfig};

/// One browsing session: created at start, dropped at the end.
/// The session cache lives here rather than in a global.
pub struct AppState {
    pub resolver: Arc<ResolutionService>,
    pub channel: Arc<LocalChannel>,
    pub cache: Arc<RatingCache>,
}

impl AppState {
    /// Wire a session against the live rating service
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = RmpClient::new(&config.client_config())?;
        Ok(Self::from_source(
            Arc::new(client),
            config.resolver_config()?,
        ))
    }

    /// Wire a session against any candidate source
    pub fn from_source(source: Arc<dyn CandidateSource>, resolver_config: ResolverConfig) -> Self {
        let resolver = Arc::new(ResolutionService::new(source, resolver_config));
        let channel = Arc::new(LocalChannel::new(resolver.clone()));
        let cache = Arc::new(RatingCache::new(channel.clone()));
        Self {
            resolver,
            channel,
            cache,
        }
    }

    /// Tear down the channel, as when the hosting environment reloads
    pub fn invalidate(&self) {
        self.channel.close();
    }
}
