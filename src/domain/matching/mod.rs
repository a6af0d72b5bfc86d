// src/domain/matching/mod.rs
//
// Surname-gated scoring of search candidates against a parsed identity.

pub mod scoring;
pub mod weights;

pub use scoring::{
    build_last_name_candidates,
    normalize_name,
    pick_best_match,
    score_candidate,
    ScoredCandidate,
};
pub use weights::ScoringWeights;
