//! # Tennis Stats
//!
//! Statistics and scoreline prediction for a two-format table tennis league.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match results, snapshots, boards, predictions)
//! - **calculate**: Pure statistics engine (filters, aggregation, ratings, history, prediction)
//! - **storage**: JSON Lines persistence of match results
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
