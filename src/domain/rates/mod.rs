//! Policy-rate histories and the differential derived from two of them.

pub mod differential;
pub mod entities;

pub use differential::*;
pub use entities::*;
