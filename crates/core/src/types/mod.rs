//! Core types for Matchbook.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod score;
pub mod username;

pub use email::{Email, EmailError};
pub use id::*;
pub use score::{Score, ScoreError};
pub use username::{Username, UsernameError};
