// src/application/commands/mod.rs
//
// Command Handlers
//
// - Thin adapters between the messaging boundary and the services
// - Accept requests, return response DTOs
// - No matching logic lives here

pub mod rating_commands;

pub use rating_commands::*;
