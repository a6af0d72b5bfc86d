// src/domain/mod.rs
//
// Domain Root
//
// Pure value types and rules. Nothing in here performs I/O.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod candidate;
pub mod identity;
pub mod matching;
pub mod resolution;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use candidate::CandidateRecord;

pub use identity::{
    clean_display_name, parse_professor_name, validate_identity, IdentityKey, ParsedIdentity,
};

pub use matching::{
    build_last_name_candidates, normalize_name, pick_best_match, score_candidate,
    ScoredCandidate, ScoringWeights,
};

pub use resolution::{RatingSummary, ResolutionFailure, ResolutionFailureReason, ResolutionResult};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
