pub mod sample_data;
pub mod services;
pub mod storage;
