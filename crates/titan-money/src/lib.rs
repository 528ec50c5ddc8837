//! # titan-money: Exact Fixed-Point Money
//!
//! This crate provides `Money<C, D, R>`, a monetary value stored as one `i64`
//! scaled by `10^D`, tagged with a currency `C` and a rounding policy `R`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        titan-money layers                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Edges (text + tooling)                         │   │
//! │  │    parse ──► Money ──► format        config (money.toml+env)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    money (value type)                           │   │
//! │  │   construction • checked + - × ÷ % • rescale • cmp / eq         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 rounding (RoundingEngine)                       │   │
//! │  │        round_integer (all 12 modes) • round_real                │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`rounding`] - Rounding modes, `round_integer`, `round_real`, type-level policies
//! - [`currency`] - Currency marker trait and built-in ISO tags
//! - [`money`] - The `Money` type with checked arithmetic
//! - [`parse`] - Text to `Money` (fraction truncated, never rounded)
//! - [`format`] - `Money` to text (`Display`, render styles)
//! - [`config`] - Rendering preferences from `money.toml` and environment
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: The rounding engine and arithmetic are deterministic
//! 2. **Checked Everything**: Overflow is an error value, never a wrap or a clamp
//! 3. **Types Carry Identity**: Mixing currencies does not compile
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use titan_money::{policy, Money, Usd};
//!
//! type Price = Money<Usd, 2, policy::HalfUp>;
//!
//! let price = Price::from_f64(3.125).unwrap();  // rounded HALF_UP on entry
//! assert_eq!(price.scaled(), 313);
//!
//! let total = (price * 3).unwrap();
//! assert_eq!(total.to_string(), "9.39 USD");
//!
//! let parsed: Price = "9.39 USD".parse().unwrap();
//! assert_eq!(parsed, total);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod currency;
pub mod error;
pub mod format;
pub mod money;
pub mod parse;
pub mod rounding;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use titan_money::Money` instead of
// `use titan_money::money::Money`

pub use config::MoneyConfig;
pub use currency::{Chf, Currency, Eur, Gbp, Jpy, Usd};
pub use error::{ConfigError, MoneyError, MoneyResult};
pub use format::{FormatOptions, RenderStyle};
pub use money::Money;
pub use rounding::{policy, round_integer, round_real, Rounding, RoundingMode, MAX_DECIMAL_PLACES};
