// src/lib.rs
// RMP Annotate - instructor rating lookup for course-schedule pages
//
// Architecture:
// - Domain: name parsing, candidate scoring, resolution value objects (pure)
// - Integrations: RateMyProfessors GraphQL client behind CandidateSource
// - Services: resolver + session cache with in-flight deduplication
// - Application: messaging-boundary DTOs, command handlers, session state

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod integrations;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    build_last_name_candidates,
    parse_professor_name,
    pick_best_match,
    score_candidate,
    CandidateRecord,
    IdentityKey,
    ParsedIdentity,
    RatingSummary,
    ResolutionFailure,
    ResolutionFailureReason,
    ResolutionResult,
    ScoringWeights,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::rmp::{CandidateSource, RmpClient, RmpClientConfig};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    LocalChannel,
    RatingCache,
    RatingChannel,
    RatingLookup,
    ResolutionService,
    ResolverConfig,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, RatingRequest, RatingResponse};
pub use config::Config;
