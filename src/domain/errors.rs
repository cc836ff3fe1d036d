use derive_more::Display;

/// Boundary errors. Data-quality conditions inside the core (short series,
/// missing dates, disjoint rate histories) are not errors and never reach here.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Validation Error: {}", _0)]
    ValidationError(String),
    #[display(fmt = "Cache Error: {}", _0)]
    CacheError(String),
    #[display(fmt = "Config Error: {}", _0)]
    ConfigError(String),
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::CacheError(err.to_string())
    }
}

pub type ValidationResult<T> = Result<T, AppError>;
pub type CacheResult<T> = Result<T, AppError>;
