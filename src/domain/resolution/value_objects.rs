// src/domain/resolution/value_objects.rs
//
// Resolution Value Objects
//
// INVARIANTS:
// - Constructed once, never mutated
// - Clone is cheap enough to hand one copy to every waiter of a lookup
// - Equal inputs produce equal values (no timestamps, no random ids)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::candidate::CandidateRecord;

// ============================================================================
// RESOLUTION RESULT (TOP-LEVEL OUTCOME)
// ============================================================================

/// Either the best matching rating record or a typed reason it is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolutionResult {
    Matched(RatingSummary),
    Unavailable(ResolutionFailure),
}

impl ResolutionResult {
    pub fn failure(reason: ResolutionFailureReason, description: impl Into<String>) -> Self {
        ResolutionResult::Unavailable(ResolutionFailure::new(reason, description))
    }

    pub fn is_match(&self) -> bool {
        matches!(self, ResolutionResult::Matched(_))
    }

    pub fn summary(&self) -> Option<&RatingSummary> {
        match self {
            ResolutionResult::Matched(summary) => Some(summary),
            ResolutionResult::Unavailable(_) => None,
        }
    }

    pub fn failure_reason(&self) -> Option<ResolutionFailureReason> {
        match self {
            ResolutionResult::Matched(_) => None,
            ResolutionResult::Unavailable(f) => Some(f.reason),
        }
    }
}

// ============================================================================
// RATING SUMMARY (SUCCESSFUL RESOLUTION)
// ============================================================================

/// Normalized view of the selected candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub first_name: String,
    pub last_name: String,

    /// Average quality; 0 when the service reports none
    pub rating: f64,

    pub difficulty: Option<f64>,

    /// Percentage; the service reports -1 for "no data"
    pub would_take_again: Option<f64>,

    pub num_ratings: u32,
    pub department: Option<String>,
    pub profile_url: Option<String>,
}

impl RatingSummary {
    pub fn from_candidate(candidate: &CandidateRecord, profile_url: Option<String>) -> Self {
        Self {
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            rating: candidate.average_rating.unwrap_or(0.0),
            difficulty: candidate.average_difficulty,
            would_take_again: candidate
                .would_take_again_percent
                .filter(|pct| *pct >= 0.0),
            num_ratings: candidate.num_ratings,
            department: candidate.department.clone(),
            profile_url,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// ============================================================================
// RESOLUTION FAILURE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    pub reason: ResolutionFailureReason,

    /// Human-readable message surfaced as `error` at the messaging boundary
    pub description: String,
}

impl ResolutionFailure {
    pub fn new(reason: ResolutionFailureReason, description: impl Into<String>) -> Self {
        Self {
            reason,
            description: description.into(),
        }
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionFailureReason {
    /// Placeholder name or no surname
    BadIdentity,

    /// Institution identifier could not be determined
    SchoolNotFound,

    /// Transport error, non-success status, or malformed response
    UpstreamHttpFailure,

    /// Search returned zero records
    NoCandidates,

    /// Records came back but none passed the surname gate
    NoRelevantMatch,

    /// The messaging channel was torn down mid-session
    EnvironmentInvalidated,

    /// The messaging channel reported an error for this request
    ChannelError,
}

impl fmt::Display for ResolutionFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResolutionFailureReason::BadIdentity => "bad_identity",
            ResolutionFailureReason::SchoolNotFound => "school_not_found",
            ResolutionFailureReason::UpstreamHttpFailure => "upstream_http_failure",
            ResolutionFailureReason::NoCandidates => "no_candidates",
            ResolutionFailureReason::NoRelevantMatch => "no_relevant_match",
            ResolutionFailureReason::EnvironmentInvalidated => "environment_invalidated",
            ResolutionFailureReason::ChannelError => "channel_error",
        };
        write!(f, "{}", s)
    }
}
