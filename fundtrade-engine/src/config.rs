//! Engine configuration.
//!
//! Loads fund-level fallbacks from environment variables with sensible defaults.

use crate::error::{EngineError, EngineResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;
use std::str::FromStr;

// =============================================================================
// Configuration
// =============================================================================

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Environment (test, development, production)
    pub environment: Environment,
    /// Minimum trade size when the fund has none configured
    pub default_min_transaction: Decimal,
    /// Cash reserve when the fund has none configured
    pub default_cash_buffer: Decimal,
}

/// Environment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Test environment
    Test,
    /// Development environment
    Development,
    /// Production environment
    Production,
}

impl EngineConfig {
    /// Default minimum transaction size
    pub const DEFAULT_MIN_TRANSACTION: Decimal = dec!(50000);

    /// Load configuration from environment variables.
    ///
    /// - `FUNDTRADE_ENV`: test, development, production (default: development)
    /// - `FUNDTRADE_DEFAULT_MIN_TRANSACTION` (default: 50000)
    /// - `FUNDTRADE_DEFAULT_CASH_BUFFER` (default: 0)
    pub fn from_env() -> EngineResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let environment = Self::load_environment()?;
        let default_min_transaction = Self::load_decimal_env(
            "FUNDTRADE_DEFAULT_MIN_TRANSACTION",
            Self::DEFAULT_MIN_TRANSACTION,
        )?;
        let default_cash_buffer =
            Self::load_decimal_env("FUNDTRADE_DEFAULT_CASH_BUFFER", Decimal::ZERO)?;

        if default_min_transaction < Decimal::ZERO || default_cash_buffer < Decimal::ZERO {
            return Err(EngineError::Config(
                "Fund defaults must not be negative".to_string(),
            ));
        }

        Ok(Self {
            environment,
            default_min_transaction,
            default_cash_buffer,
        })
    }

    /// Create test configuration.
    pub fn test() -> Self {
        Self {
            environment: Environment::Test,
            ..Self::default()
        }
    }

    fn load_environment() -> EngineResult<Environment> {
        let env_str = env::var("FUNDTRADE_ENV").unwrap_or_else(|_| "development".to_string());
        Environment::parse(&env_str)
    }

    fn load_decimal_env(key: &str, default: Decimal) -> EngineResult<Decimal> {
        match env::var(key) {
            Ok(val) => parse_decimal(key, &val),
            Err(_) => Ok(default),
        }
    }
}

fn parse_decimal(key: &str, val: &str) -> EngineResult<Decimal> {
    Decimal::from_str(val.trim())
        .map_err(|_| EngineError::Config(format!("Invalid {} value: {}", key, val)))
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            default_min_transaction: Self::DEFAULT_MIN_TRANSACTION,
            default_cash_buffer: Decimal::ZERO,
        }
    }
}

impl Environment {
    fn parse(value: &str) -> EngineResult<Self> {
        match value.to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(EngineError::Config(format!(
                "Invalid FUNDTRADE_ENV: {}. Expected: test, development, production",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
