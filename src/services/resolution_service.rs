// src/services/resolution_service.rs
//
// Resolution Service
//
// Turns a parsed professor identity into a rating result by querying the
// candidate source and scoring what comes back.
//
// RULES:
// - Exactly one search request per call (none for bad identities)
// - Never returns Err: every failure becomes a ResolutionResult value
// - Holds no cache; deduplication belongs to RatingCache
// - Deterministic for a fixed set of candidates

use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::{
    pick_best_match, validate_identity, ParsedIdentity, RatingSummary, ResolutionFailureReason,
    ResolutionResult, ScoringWeights,
};
use crate::integrations::rmp::{client, profile_url, CandidateSource};

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Institution every search is scoped to
    pub school_name: String,

    /// Candidates requested per search
    pub page_size: u32,

    pub weights: ScoringWeights,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            school_name: client::DEFAULT_SCHOOL_NAME.to_string(),
            page_size: 25,
            weights: ScoringWeights::default(),
        }
    }
}

// ============================================================================
// RESOLUTION SERVICE
// ============================================================================

pub struct ResolutionService {
    source: Arc<dyn CandidateSource>,
    config: ResolverConfig,
}

impl ResolutionService {
    pub fn new(source: Arc<dyn CandidateSource>, config: ResolverConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve against the configured institution
    pub async fn resolve(&self, identity: &ParsedIdentity) -> ResolutionResult {
        self.resolve_at(identity, &self.config.school_name).await
    }

    /// Resolve against a named institution (the name only feeds the school
    /// lookup, which is fixed for now)
    pub async fn resolve_at(&self, identity: &ParsedIdentity, school_name: &str) -> ResolutionResult {
        if let Err(e) = validate_identity(identity) {
            debug!("Skipping lookup: {}", e);
            return ResolutionResult::failure(
                ResolutionFailureReason::BadIdentity,
                "Bad professor name",
            );
        }

        let school_id = match self.source.school_id(school_name).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                return ResolutionResult::failure(
                    ResolutionFailureReason::SchoolNotFound,
                    "School not found",
                );
            }
            Err(e) => {
                warn!("School lookup for '{}' failed: {}", school_name, e);
                return ResolutionResult::failure(
                    ResolutionFailureReason::UpstreamHttpFailure,
                    e.to_string(),
                );
            }
        };

        let text = identity.search_text();
        let candidates = match self
            .source
            .search_teachers(&school_id, text, self.config.page_size)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Search for '{}' failed: {}", text, e);
                return ResolutionResult::failure(
                    ResolutionFailureReason::UpstreamHttpFailure,
                    e.to_string(),
                );
            }
        };

        if candidates.is_empty() {
            info!("No candidates for '{}'", identity.display);
            return ResolutionResult::failure(
                ResolutionFailureReason::NoCandidates,
                "No teacher match",
            );
        }

        let Some(best) = pick_best_match(identity, &candidates, &self.config.weights) else {
            info!(
                "{} candidates for '{}', none with a related surname",
                candidates.len(),
                identity.display
            );
            return ResolutionResult::failure(
                ResolutionFailureReason::NoRelevantMatch,
                "No teacher match",
            );
        };

        info!(
            "Matched '{}' to '{}' (score {:.2})",
            identity.display,
            best.candidate.full_name(),
            best.score
        );

        let link = best.candidate.external_id.as_deref().map(profile_url);
        ResolutionResult::Matched(RatingSummary::from_candidate(best.candidate, link))
    }
}
