//! Inflection-point alerts raised from enriched price and differential series.

pub mod detector;
pub mod entities;

pub use detector::*;
pub use entities::*;
