// src/domain/resolution/mod.rs
//
// Outcome of matching a parsed identity against the rating service.
//
// All types are immutable value objects. A result is always produced:
// failures are values, never panics or propagated errors.

pub mod value_objects;

pub use value_objects::{
    RatingSummary,
    ResolutionFailure,
    ResolutionFailureReason,
    ResolutionResult,
};
