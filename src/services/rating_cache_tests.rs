// src/services/rating_cache_tests.rs
//
// Cache / in-flight deduplication tests.
//
// INVARIANTS TESTED:
// - Concurrent lookups for one identity key share a single channel request
// - Successes and failures are both cached for the session
// - A closed channel short-circuits without a request, and that is cached

#[cfg(test)]
mod dedup_tests {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    use crate::domain::{
        parse_professor_name, CandidateRecord, ParsedIdentity, RatingSummary,
        ResolutionFailureReason, ResolutionResult,
    };
    use crate::error::{AppError, AppResult};
    use crate::integrations::rmp::MockCandidateSource;
    use crate::services::rating_cache::{LocalChannel, RatingCache, RatingChannel};
    use crate::services::resolution_service::{ResolutionService, ResolverConfig};

    /// Channel that holds every request until the test releases it
    struct GatedChannel {
        open: AtomicBool,
        calls: AtomicUsize,
        gate: Semaphore,
        fail: bool,
    }

    impl GatedChannel {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                open: AtomicBool::new(true),
                calls: AtomicUsize::new(0),
                gate: Semaphore::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn release(&self, n: usize) {
            self.gate.add_permits(n);
        }
    }

    #[async_trait]
    impl RatingChannel for GatedChannel {
        fn is_open(&self) -> bool {
            self.open.load(Ordering::SeqCst)
        }

        async fn request_rating(&self, identity: ParsedIdentity) -> AppResult<ResolutionResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| AppError::Other(e.to_string()))?;
            permit.forget();

            if self.fail {
                return Err(AppError::Other("port disconnected".to_string()));
            }
            let candidate = CandidateRecord::new("Test", identity.last.clone()).with_rating(4.0);
            Ok(ResolutionResult::Matched(RatingSummary::from_candidate(
                &candidate, None,
            )))
        }
    }

    fn identity(raw: &str) -> ParsedIdentity {
        parse_professor_name(raw).unwrap()
    }

    async fn wait_until_idle(cache: &RatingCache) {
        while cache.pending_len() > 0 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_request() {
        let channel = GatedChannel::new(false);
        let cache = RatingCache::new(channel.clone());

        let a = cache.resolve_cached(&identity("John Smith"));
        let b = cache.resolve_cached(&identity("  JOHN   smith "));
        assert_eq!(cache.pending_len(), 1);
        assert_eq!(cache.external_calls(), 1);

        channel.release(1);
        let (ra, rb) = tokio::join!(a, b);

        assert_eq!(ra, rb);
        assert!(ra.is_match());
        assert_eq!(channel.calls(), 1);
        assert_eq!(cache.pending_len(), 0);
        assert_eq!(cache.cached_len(), 1);
    }

    #[tokio::test]
    async fn test_burst_of_overlapping_names() {
        let channel = GatedChannel::new(false);
        let cache = RatingCache::new(channel.clone());

        let names = ["Ann Lee", "Bo Chen", "ann lee", "Bo  Chen", "Ann Lee", "C Diaz"];
        let lookups: Vec<_> = names
            .iter()
            .map(|raw| cache.resolve_cached(&identity(raw)))
            .collect();
        assert_eq!(cache.pending_len(), 3);

        channel.release(3);
        let results = futures::future::join_all(lookups).await;

        assert_eq!(results.len(), names.len());
        assert_eq!(results[0], results[2]);
        assert_eq!(results[1], results[3]);
        assert_eq!(channel.calls(), 3);
        assert_eq!(cache.cached_len(), 3);
    }

    #[tokio::test]
    async fn test_completed_result_is_served_from_cache() {
        let channel = GatedChannel::new(false);
        let cache = RatingCache::new(channel.clone());
        channel.release(1);

        let first = cache.resolve_cached(&identity("Smith, J.")).await;
        let second = cache.resolve_cached(&identity("Smith,  J.")).await;

        assert_eq!(first, second);
        assert_eq!(channel.calls(), 1);
        assert_eq!(cache.external_calls(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_cached() {
        let channel = GatedChannel::new(true);
        let cache = RatingCache::new(channel.clone());
        channel.release(1);

        let first = cache.resolve_cached(&identity("John Smith")).await;
        assert_eq!(
            first.failure_reason(),
            Some(ResolutionFailureReason::ChannelError)
        );

        let second = cache.resolve_cached(&identity("John Smith")).await;
        assert_eq!(first, second);
        assert_eq!(channel.calls(), 1);
    }

    #[tokio::test]
    async fn test_closed_channel_short_circuits_and_is_cached() {
        let channel = GatedChannel::new(false);
        channel.open.store(false, Ordering::SeqCst);
        let cache = RatingCache::new(channel.clone());

        let first = cache.resolve_cached(&identity("John Smith")).await;
        assert_eq!(
            first.failure_reason(),
            Some(ResolutionFailureReason::EnvironmentInvalidated)
        );
        assert_eq!(channel.calls(), 0);
        assert_eq!(cache.cached_len(), 1);

        channel.open.store(true, Ordering::SeqCst);
        let second = cache.resolve_cached(&identity("John Smith")).await;
        assert_eq!(first, second);
        assert_eq!(channel.calls(), 0);
    }

    #[tokio::test]
    async fn test_lookup_completes_after_callers_drop() {
        let channel = GatedChannel::new(false);
        let cache = RatingCache::new(channel.clone());

        let key = identity("Ann Lee").key();
        drop(cache.resolve_cached(&identity("Ann Lee")));
        channel.release(1);
        wait_until_idle(&cache).await;

        assert!(cache.cached(&key).is_some_and(|r| r.is_match()));
        assert_eq!(channel.calls(), 1);
    }

    #[tokio::test]
    async fn test_local_channel_hits_source_once() {
        let mut source = MockCandidateSource::new();
        source
            .expect_school_id()
            .times(1)
            .returning(|_| Ok(Some("U2Nob29sLTEwNzM=".to_string())));
        source
            .expect_search_teachers()
            .times(1)
            .returning(|_, _, _| Ok(vec![CandidateRecord::new("Ann", "Lee").with_num_ratings(8)]));

        let resolver = Arc::new(ResolutionService::new(
            Arc::new(source),
            ResolverConfig::default(),
        ));
        let cache = RatingCache::new(Arc::new(LocalChannel::new(resolver)));

        let (a, b) = tokio::join!(
            cache.resolve_cached(&identity("Ann Lee")),
            cache.resolve_cached(&identity("ann lee"))
        );
        assert_eq!(a, b);
        assert_eq!(a.summary().unwrap().first_name, "Ann");
    }

    #[tokio::test]
    async fn test_closed_local_channel_is_environment_invalidated() {
        let mut source = MockCandidateSource::new();
        source.expect_search_teachers().never();
        let resolver = Arc::new(ResolutionService::new(
            Arc::new(source),
            ResolverConfig::default(),
        ));
        let channel = Arc::new(LocalChannel::new(resolver));
        let cache = RatingCache::new(channel.clone());

        channel.close();
        let result = cache.resolve_cached(&identity("Ann Lee")).await;
        assert_eq!(
            result.failure_reason(),
            Some(ResolutionFailureReason::EnvironmentInvalidated)
        );
        assert_eq!(cache.external_calls(), 0);
    }
}
