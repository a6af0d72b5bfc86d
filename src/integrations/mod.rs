// src/integrations/mod.rs
//
// External Integrations Module

pub mod rmp;

pub use rmp::{CandidateSource, RmpClient, RmpClientConfig};
