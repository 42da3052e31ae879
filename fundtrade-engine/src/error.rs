//! Engine error types.

use fundtrade_domain::DomainError;
use thiserror::Error;

/// Errors surfaced at the engine boundary.
///
/// `TradeCalculationEngine::calculate` never returns these; they come from
/// explicit validation, input assembly and configuration loading.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Domain error (invalid input, audit serialization)
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
