//! Matchbook Core - Shared types and business rules.
//!
//! This crate provides the domain types and validation rules used across all
//! Matchbook components:
//! - `admin` - Data access, authentication and game services
//! - `cli` - Command-line front end for operators
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no clocks. Anything time-dependent takes "today" as an argument.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, usernames and scores
//! - [`sport`] - Sport registry: per-sport score ranges and known leagues
//! - [`game`] - Game records and validated game input
//! - [`validation`] - Game form validation with classified issues
//! - [`duplicate`] - Duplicate game detection
//! - [`query`] - Filtering and sorting of game lists
//! - [`analytics`] - Summary statistics and head-to-head records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod duplicate;
pub mod game;
pub mod query;
pub mod sport;
pub mod types;
pub mod validation;

pub use game::{Game, GameDraft, NewGame, Outcome};
pub use types::*;
