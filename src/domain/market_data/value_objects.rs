use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::domain::errors::AppError;

/// Value Object - three-letter ISO currency code, always upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: &str) -> Result<Self, AppError> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::ValidationError(format!("Invalid currency code: {:?}", code)));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Value Object - currency pair written `BASE/QUOTE`, e.g. `USD/JPY`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}/{}", base, quote)]
pub struct CurrencyPair {
    base: CurrencyCode,
    quote: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: CurrencyCode, quote: CurrencyCode) -> Result<Self, AppError> {
        if base == quote {
            return Err(AppError::ValidationError(format!(
                "Currency pair needs two different currencies, got {}/{}",
                base, quote
            )));
        }
        Ok(Self { base, quote })
    }

    /// Pair served by the demo dataset
    pub fn usd_jpy() -> Self {
        Self { base: CurrencyCode("USD".to_string()), quote: CurrencyCode("JPY".to_string()) }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn quote(&self) -> &CurrencyCode {
        &self.quote
    }
}

impl FromStr for CurrencyPair {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| AppError::ValidationError(format!("Expected BASE/QUOTE, got {:?}", s)))?;
        Self::new(base.parse()?, quote.parse()?)
    }
}

impl Serialize for CurrencyPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CurrencyPair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
