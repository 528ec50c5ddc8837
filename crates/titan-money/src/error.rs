//! # Error Types
//!
//! Error types for titan-money.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  MoneyError (value errors, returned by the pure core)                  │
//! │  ├── RoundingForbidden  - rounding required but the mode disallows it  │
//! │  ├── Overflow           - a checked step left the i64 range            │
//! │  ├── DivisionByZero     - scalar divisor was zero                      │
//! │  ├── NonFinite          - NaN / infinity handed to a real constructor  │
//! │  ├── Parse              - malformed or out-of-range text               │
//! │  └── Format             - unknown rendering style selector             │
//! │                                                                         │
//! │  ConfigError (edges only: money.toml + environment)                    │
//! │  ├── Io / Toml          - file could not be read or decoded            │
//! │  └── Invalid            - values failed validation                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are plain values: cheap to clone, comparable in tests
//! 3. Nothing is clamped or wrapped; the caller decides what to do

use thiserror::Error;

use crate::rounding::RoundingMode;

// =============================================================================
// Money Error
// =============================================================================

/// Errors produced by rounding, arithmetic, parsing and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Rounding was required but the mode does not allow it.
    ///
    /// ## When This Occurs
    /// - `RoundingMode::Unnecessary` and the value is not exact
    /// - `round_real` asked for a mode it does not implement
    ///   (`HalfOdd`, `HalfFromZero`, `Unnecessary`)
    #[error("Rounding forbidden by mode {mode}")]
    RoundingForbidden { mode: RoundingMode },

    /// A checked arithmetic or rescale step exceeded the `i64` range.
    ///
    /// ## User Workflow
    /// ```text
    /// Money::MAX + 1 unit
    ///      │
    ///      ▼
    /// checked_add ──► i64::checked_add = None
    ///      │
    ///      ▼
    /// Overflow { operation: "add" }   (original value untouched)
    /// ```
    #[error("Arithmetic overflow during {operation}")]
    Overflow { operation: &'static str },

    /// Division or remainder by zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// NaN or infinity cannot become a fixed-point amount.
    #[error("Value is not finite")]
    NonFinite,

    /// Text could not be turned into an amount.
    #[error("Cannot parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Rendering request could not be honoured.
    #[error("Format error: {reason}")]
    Format { reason: String },
}

impl MoneyError {
    pub(crate) fn overflow(operation: &'static str) -> Self {
        MoneyError::Overflow { operation }
    }

    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        MoneyError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors from loading or validating [`crate::config::MoneyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema.
    #[error("Failed to decode config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with MoneyError.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
