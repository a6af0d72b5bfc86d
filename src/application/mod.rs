// src/application/mod.rs
//
// Application Layer
//
// - Boundary between the page/messaging side and the services
// - Translates domain results into response DTOs
// - Owns the per-session state

pub mod commands;
pub mod dto;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use state::AppState;
