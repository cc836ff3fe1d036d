pub mod chart;
pub mod errors;
pub mod logging;
pub mod lookup;
pub mod market_data;
pub mod rates;
pub mod signals;
