//! Domain models for the desk.
//!
//! Game records live in `matchbook_core::game` since validation needs them
//! without I/O; only operator accounts are modelled here.

pub mod admin_user;

pub use admin_user::{AdminUser, NewAdminUser};
