//! Core data models for match statistics.

mod filter;
mod ids;
mod match_result;
mod match_type;
mod prediction;
mod progress;
mod ranking;
mod scope;
mod stage;
mod stats;

pub use filter::*;
pub use ids::*;
pub use match_result::*;
pub use match_type::*;
pub use prediction::*;
pub use progress::*;
pub use ranking::*;
pub use scope::*;
pub use stage::*;
pub use stats::*;
