//! Matchbook admin library.
//!
//! Everything the desk does beyond pure rules: configuration, the
//! `PostgreSQL` store, operator authentication, the game service, text
//! export and bulk seeding. The `mb-cli` binary is a thin front end over
//! this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod models;
pub mod seed;
pub mod services;
