//! Core data models for the analytics engine.

mod game;
mod ids;
pub mod lenient;
mod player;
mod position;
mod quality;
mod records;
mod stats;

pub use game::*;
pub use ids::*;
pub use player::*;
pub use position::*;
pub use quality::*;
pub use records::*;
pub use stats::*;
