//! Business logic services for the desk.
//!
//! # Services
//!
//! - `auth` - Operator registration, password login and account administration
//! - `games` - Validated game recording, listing and statistics

pub mod auth;
pub mod games;

pub use auth::{AuthError, AuthService, Registration};
pub use games::{GameError, GameService, Saved};
