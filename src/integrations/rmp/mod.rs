// src/integrations/rmp/mod.rs
//
// RateMyProfessors integration.

pub mod client;
pub mod source;

pub use client::{profile_url, school_relay_id, RmpClient, RmpClientConfig};
pub use source::CandidateSource;

#[cfg(test)]
pub use source::MockCandidateSource;
