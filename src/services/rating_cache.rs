// src/services/rating_cache.rs
//
// Session cache and in-flight deduplication for rating lookups.
//
// INVARIANTS:
// - At most one outstanding channel request per identity key
// - Every finished lookup (success or failure) is cached for the session
// - Only RatingCache touches the completed / pending maps
// - The check-then-insert on the maps holds one mutex guard and never awaits
//
// Lookups run on a spawned task so they finish and populate the cache even
// when every caller has stopped waiting.

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::resolution_service::ResolutionService;
use crate::domain::{IdentityKey, ParsedIdentity, ResolutionFailureReason, ResolutionResult};
use crate::error::{AppError, AppResult};

/// A lookup every caller for the same key can await
pub type RatingLookup = Shared<BoxFuture<'static, ResolutionResult>>;

// ============================================================================
// MESSAGING CHANNEL
// ============================================================================

/// Channel between the page side and the process doing the resolving.
#[async_trait]
pub trait RatingChannel: Send + Sync {
    /// False once the hosting environment has torn the channel down
    fn is_open(&self) -> bool;

    async fn request_rating(&self, identity: ParsedIdentity) -> AppResult<ResolutionResult>;
}

/// In-process channel straight to a `ResolutionService`
pub struct LocalChannel {
    resolver: Arc<ResolutionService>,
    open: AtomicBool,
}

impl LocalChannel {
    pub fn new(resolver: Arc<ResolutionService>) -> Self {
        Self {
            resolver,
            open: AtomicBool::new(true),
        }
    }

    /// Tear the channel down; later requests are refused
    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }
}

#[async_trait]
impl RatingChannel for LocalChannel {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    async fn request_rating(&self, identity: ParsedIdentity) -> AppResult<ResolutionResult> {
        if !self.is_open() {
            return Err(AppError::ChannelClosed);
        }
        Ok(self.resolver.resolve(&identity).await)
    }
}

// ============================================================================
// RATING CACHE
// ============================================================================

#[derive(Default)]
struct CacheState {
    completed: HashMap<IdentityKey, ResolutionResult>,
    pending: HashMap<IdentityKey, RatingLookup>,
}

impl CacheState {
    fn finish(&mut self, key: IdentityKey, result: ResolutionResult) {
        self.pending.remove(&key);
        self.completed.insert(key, result);
    }
}

pub struct RatingCache {
    channel: Arc<dyn RatingChannel>,
    state: Arc<Mutex<CacheState>>,
    external_calls: Arc<AtomicUsize>,
}

impl RatingCache {
    pub fn new(channel: Arc<dyn RatingChannel>) -> Self {
        Self {
            channel,
            state: Arc::new(Mutex::new(CacheState::default())),
            external_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Rating for `identity`, resolved at most once per identity key.
    ///
    /// Must be called from within a tokio runtime.
    pub fn resolve_cached(&self, identity: &ParsedIdentity) -> RatingLookup {
        let key = identity.key();
        let mut state = lock(&self.state);

        if let Some(result) = state.completed.get(&key) {
            debug!("Cache hit for {}", key);
            return ready(result.clone());
        }

        if let Some(pending) = state.pending.get(&key) {
            debug!("Joining in-flight lookup for {}", key);
            return pending.clone();
        }

        if !self.channel.is_open() {
            warn!("Rating channel closed; not looking up {}", key);
            let result = ResolutionResult::failure(
                ResolutionFailureReason::EnvironmentInvalidated,
                "Extension context invalidated",
            );
            state.completed.insert(key, result.clone());
            return ready(result);
        }

        let lookup = self.dispatch(key.clone(), identity.clone());
        state.pending.insert(key, lookup.clone());
        lookup
    }

    /// Result already cached for `key`, if any
    pub fn cached(&self, key: &IdentityKey) -> Option<ResolutionResult> {
        lock(&self.state).completed.get(key).cloned()
    }

    pub fn cached_len(&self) -> usize {
        lock(&self.state).completed.len()
    }

    pub fn pending_len(&self) -> usize {
        lock(&self.state).pending.len()
    }

    /// Requests handed to the channel so far
    pub fn external_calls(&self) -> usize {
        self.external_calls.load(Ordering::Relaxed)
    }

    fn dispatch(&self, key: IdentityKey, identity: ParsedIdentity) -> RatingLookup {
        info!("Looking up rating for {}", key);
        self.external_calls.fetch_add(1, Ordering::Relaxed);

        let channel = Arc::clone(&self.channel);
        let state = Arc::clone(&self.state);
        let task_key = key.clone();

        let handle = tokio::spawn(async move {
            let result = match channel.request_rating(identity).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Rating request for {} failed: {}", task_key, e);
                    ResolutionResult::failure(ResolutionFailureReason::ChannelError, e.to_string())
                }
            };
            lock(&state).finish(task_key, result.clone());
            result
        });

        let state = Arc::clone(&self.state);
        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    let result = ResolutionResult::failure(
                        ResolutionFailureReason::ChannelError,
                        format!("lookup task failed: {}", e),
                    );
                    lock(&state).finish(key, result.clone());
                    result
                }
            }
        }
        .boxed()
        .shared()
    }
}

fn ready(result: ResolutionResult) -> RatingLookup {
    futures::future::ready(result).boxed().shared()
}

fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
