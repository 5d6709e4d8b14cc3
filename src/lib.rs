//! # Netball Analytics
//!
//! Team performance analytics over per-quarter, per-position netball records.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (games, score records, rosters, rankings)
//! - **calculate**: The analytics engine (normalization, position averages,
//!   formation and combination rankings, quarter reconciliation)
//! - **storage**: JSONL dataset loading
//! - **config**: Configuration loading and validation
//!
//! The engine in `calculate` is pure: every entry point is a function of its
//! arguments, performs no IO and keeps no state between calls.

pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
