// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod rating_cache;
pub mod resolution_service;

#[cfg(test)]
mod rating_cache_tests;

pub use rating_cache::{LocalChannel, RatingCache, RatingChannel, RatingLookup};

pub use resolution_service::{ResolutionService, ResolverConfig};
