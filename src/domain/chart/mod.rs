//! Timeframes and the visible-window selector.

pub mod value_objects;
pub mod window;

pub use value_objects::*;
pub use window::*;
