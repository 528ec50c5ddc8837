//! # Parsing Module
//!
//! Turns decimal text into a `Money` value.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "  -1234.5678 USD "  parsed as Money<Usd, 2>                           │
//! │                                                                         │
//! │  1. trim                           "-1234.5678 USD"                    │
//! │  2. strip own currency code        "-1234.5678"                        │
//! │  3. sign                           negative, "1234.5678"               │
//! │  4. split on separator             "1234" | "5678"                     │
//! │  5. fraction TRUNCATED to D digits "56"   (never rounded)              │
//! │  6. scale (checked)                -(1234 × 100 + 56) = -123456        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use titan_money::{Money, Usd};
//!
//! let price: Money<Usd, 2> = "10.999".parse().unwrap();
//! assert_eq!(price.scaled(), 1099); // truncated, not rounded
//!
//! assert!("10.99 EUR".parse::<Money<Usd, 2>>().is_err());
//! assert!("ten".parse::<Money<Usd, 2>>().is_err());
//! ```

use tracing::debug;

use crate::currency::Currency;
use crate::error::{MoneyError, MoneyResult};
use crate::money::Money;
use crate::rounding::Rounding;

impl<C: Currency, const D: u32, R: Rounding> Money<C, D, R> {
    /// Parses text using `.` as the decimal separator.
    ///
    /// ## Errors
    /// [`MoneyError::Parse`] on non-numeric input, a foreign currency code,
    /// or a value that does not fit once scaled.
    pub fn parse(input: &str) -> MoneyResult<Self> {
        Self::parse_with_separator(input, '.')
    }

    /// Parses text with a custom decimal separator (e.g. `,`).
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{Eur, Money};
    ///
    /// let amount = Money::<Eur, 2>::parse_with_separator("-3,5 EUR", ',').unwrap();
    /// assert_eq!(amount.scaled(), -350);
    /// ```
    pub fn parse_with_separator(input: &str, decimal_separator: char) -> MoneyResult<Self> {
        let reject = |reason: String| {
            debug!(input, %reason, "rejected money text");
            MoneyError::parse(input, reason)
        };

        let mut text = input.trim();
        if let Some(number) = text.strip_suffix(C::CODE) {
            text = number.trim_end();
        }
        if text.chars().any(char::is_alphabetic) {
            return Err(reject(format!("expected a number in {}", C::CODE)));
        }

        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (whole, fraction) = match unsigned.split_once(decimal_separator) {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };

        if !is_digits(whole) {
            return Err(reject("invalid integer part".to_string()));
        }
        if let Some(fraction) = fraction {
            if !is_digits(fraction) {
                return Err(reject("invalid fractional part".to_string()));
            }
        }

        let units: i128 = whole
            .parse()
            .map_err(|_| reject("integer part out of range".to_string()))?;
        let minor = fraction_to_minor(fraction.unwrap_or(""), D);

        let magnitude = units
            .checked_mul(i128::from(Self::SCALE))
            .and_then(|scaled| scaled.checked_add(minor))
            .ok_or_else(|| reject("integer part out of range".to_string()))?;
        let value = if negative { -magnitude } else { magnitude };

        i64::try_from(value)
            .map(Self::from_scaled)
            .map_err(|_| reject("integer part out of range".to_string()))
    }
}

impl<C: Currency, const D: u32, R: Rounding> std::str::FromStr for Money<C, D, R> {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Non-empty run of ASCII digits.
fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// First `places` digits of `fraction`, zero-padded on the right.
fn fraction_to_minor(fraction: &str, places: u32) -> i128 {
    let kept = fraction.bytes().take(places as usize);
    let taken = kept.len();
    let digits = kept.fold(0_i128, |acc, b| acc * 10 + i128::from(b - b'0'));
    (taken..places as usize).fold(digits, |acc, _| acc * 10)
}

// =============================================================================
// Unit Tests
// =============================================================================
