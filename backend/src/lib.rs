//! Study Planner Backend Library
//!
//! Async service layer around the shared planning engine.
//!
//! ## Architecture
//!
//! - Repositories: storage traits plus in-memory implementations
//! - Services: load snapshots, call the engine, persist results
//! - Job: the daily planning pass run by the `study-planner` binary

pub mod config;
pub mod error;
pub mod job;
pub mod repositories;
pub mod services;
pub mod snapshot;
pub mod state;
