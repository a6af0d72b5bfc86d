// src/application/commands/rating_commands.rs
//
// Rating lookups for the two sides of the messaging boundary.

use futures::future::join_all;

use crate::application::dto::{RatingRequest, RatingResponse};
use crate::application::state::AppState;
use crate::domain::parse_professor_name;
use crate::services::ResolutionService;

/// Resolver side: answer one request. Never fails; failures are `ok: false`.
pub async fn handle_rating_request(
    resolver: &ResolutionService,
    request: RatingRequest,
) -> RatingResponse {
    let school_name = request
        .school_name
        .unwrap_or_else(|| resolver.config().school_name.clone());
    resolver
        .resolve_at(&request.identity, &school_name)
        .await
        .into()
}

/// Page side: parse a scraped name and resolve it through the session cache.
///
/// `None` for names that are empty or placeholders; those get no badge.
pub async fn lookup_rating(state: &AppState, raw_name: &str) -> Option<RatingResponse> {
    let identity = parse_professor_name(raw_name).filter(|identity| !identity.skip)?;
    let result = state.cache.resolve_cached(&identity).await;
    Some(result.into())
}

/// Resolve a batch of scraped names concurrently, preserving input order.
pub async fn lookup_ratings(
    state: &AppState,
    raw_names: &[String],
) -> Vec<(String, Option<RatingResponse>)> {
    let lookups = raw_names.iter().map(|raw| lookup_rating(state, raw));
    let responses = join_all(lookups).await;
    raw_names.iter().cloned().zip(responses).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateRecord, ParsedIdentity};
    use crate::integrations::rmp::MockCandidateSource;
    use crate::services::ResolverConfig;
    use std::sync::Arc;

    fn source_returning(candidates: Vec<CandidateRecord>) -> MockCandidateSource {
        let mut source = MockCandidateSource::new();
        source
            .expect_school_id()
            .returning(|_| Ok(Some("U2Nob29sLTEwNzM=".to_string())));
        source
            .expect_search_teachers()
            .times(1)
            .returning(move |_, _, _| Ok(candidates.clone()));
        source
    }

    #[tokio::test]
    async fn test_handle_request_matches() {
        let source = source_returning(vec![CandidateRecord::new("Jane", "Smith").with_rating(4.1)]);
        let resolver = ResolutionService::new(Arc::new(source), ResolverConfig::default());

        let identity = ParsedIdentity::new(
            "J Smith".to_string(),
            String::new(),
            "J".to_string(),
            "Smith".to_string(),
        );
        let response = handle_rating_request(&resolver, RatingRequest::new(identity)).await;
        match response {
            RatingResponse::Found(found) => {
                assert!(found.ok);
                assert_eq!(found.rating, 4.1);
                assert_eq!(found.first_name, "Jane");
            }
            other => panic!("expected match, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handle_request_bad_identity() {
        let mut source = MockCandidateSource::new();
        source.expect_search_teachers().never();
        let resolver = ResolutionService::new(Arc::new(source), ResolverConfig::default());

        let request = RatingRequest::new(ParsedIdentity::placeholder("TBA".to_string()));
        let response = handle_rating_request(&resolver, request).await;
        assert_eq!(
            response,
            RatingResponse::Unavailable(crate::application::dto::RatingUnavailableDto {
                ok: false,
                error: "Bad professor name".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_lookup_ratings_skips_placeholders_and_dedups() {
        let source = source_returning(vec![CandidateRecord::new("Ann", "Lee").with_num_ratings(3)]);
        let state = AppState::from_source(Arc::new(source), ResolverConfig::default());

        let names: Vec<String> = ["Ann Lee", "Staff", "", "ann  lee"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let results = lookup_ratings(&state, &names).await;

        assert_eq!(results.len(), 4);
        assert!(results[0].1.as_ref().is_some_and(RatingResponse::is_ok));
        assert!(results[1].1.is_none());
        assert!(results[2].1.is_none());
        assert_eq!(results[0].1, results[3].1);
        assert_eq!(state.cache.external_calls(), 1);
    }
}
