//! Market data aggregate: price points, pair codes and the indicator engine.

pub mod entities;
pub mod indicator_engine;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use indicator_engine::*;
pub use value_objects::*;
