//! # Rendering Module
//!
//! Turns a `Money` value into text.
//!
//! ## Styles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  selector │ style                 │ Money<Usd, 4>(1234.5678), prec 2   │
//! │  ─────────┼───────────────────────┼─────────────────────────────────── │
//! │    'f'    │ PlainWithSuffix       │ "1234.57 USD"                      │
//! │    'n'    │ PlainWithoutSuffix    │ "1234.57"                          │
//! │    'd'    │ IntegerWithSuffix     │ "1235 USD"                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A precision lower than `D` re-rounds the whole value with the amount's
//! own rounding mode before digits are cut. A carry reaches the whole
//! units: `9.995` at two places under `HALF_UP` prints `10.00`.
//!
//! ## Usage
//! ```rust
//! use titan_money::{policy, Money, RenderStyle, Usd};
//!
//! let amount = Money::<Usd, 4, policy::HalfUp>::from_scaled(12_345_678);
//! assert_eq!(amount.to_string(), "1234.5678 USD");
//! assert_eq!(format!("{amount:.2}"), "1234.57 USD");
//! assert_eq!(format!("{amount:#}"), "1234.5678");
//! assert_eq!(amount.render(2, RenderStyle::IntegerWithSuffix).unwrap(), "1235 USD");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::currency::Currency;
use crate::error::{MoneyError, MoneyResult};
use crate::money::Money;
use crate::rounding::{round_integer, Rounding};

// =============================================================================
// Render Style
// =============================================================================

/// Layout of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// Digits followed by the currency code (`'f'`).
    #[default]
    PlainWithSuffix,
    /// Digits only (`'n'`).
    PlainWithoutSuffix,
    /// Rounded to whole units, then the currency code (`'d'`).
    IntegerWithSuffix,
}

impl RenderStyle {
    /// Single-character selector for this style.
    pub const fn selector(&self) -> char {
        match self {
            RenderStyle::PlainWithSuffix => 'f',
            RenderStyle::PlainWithoutSuffix => 'n',
            RenderStyle::IntegerWithSuffix => 'd',
        }
    }

    /// Looks up a style by its selector.
    ///
    /// ## Errors
    /// [`MoneyError::Format`] for anything but `'f'`, `'n'`, `'d'`.
    pub fn from_selector(selector: char) -> MoneyResult<Self> {
        match selector {
            'f' => Ok(RenderStyle::PlainWithSuffix),
            'n' => Ok(RenderStyle::PlainWithoutSuffix),
            'd' => Ok(RenderStyle::IntegerWithSuffix),
            other => Err(MoneyError::Format {
                reason: format!("unknown style selector '{other}', expected one of: f, n, d"),
            }),
        }
    }

    fn has_suffix(&self) -> bool {
        !matches!(self, RenderStyle::PlainWithoutSuffix)
    }
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStyle::PlainWithSuffix => write!(f, "plain_with_suffix"),
            RenderStyle::PlainWithoutSuffix => write!(f, "plain_without_suffix"),
            RenderStyle::IntegerWithSuffix => write!(f, "integer_with_suffix"),
        }
    }
}

impl std::str::FromStr for RenderStyle {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain_with_suffix" | "plain" => Ok(RenderStyle::PlainWithSuffix),
            "plain_without_suffix" | "bare" => Ok(RenderStyle::PlainWithoutSuffix),
            "integer_with_suffix" | "integer" => Ok(RenderStyle::IntegerWithSuffix),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(selector), None) => RenderStyle::from_selector(selector),
                    _ => Err(MoneyError::Format {
                        reason: format!("unknown style '{other}'"),
                    }),
                }
            }
        }
    }
}

// =============================================================================
// Format Options
// =============================================================================

/// Separators used when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Between whole units and the fraction.
    pub decimal_separator: char,
    /// Between the digits and the currency code.
    pub suffix_separator: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            decimal_separator: '.',
            suffix_separator: " ".to_string(),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl<C: Currency, const D: u32, R: Rounding> Money<C, D, R> {
    /// Renders with default separators.
    ///
    /// ## Errors
    /// - [`MoneyError::RoundingForbidden`] if `precision < D` needs rounding
    ///   under `Unnecessary`
    /// - [`MoneyError::Overflow`] if re-rounding at the edges of the range
    ///   does not fit
    pub fn render(&self, precision: u32, style: RenderStyle) -> MoneyResult<String> {
        self.render_with(&FormatOptions::default(), precision, style)
    }

    /// Renders with explicit separators.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{Eur, FormatOptions, Money, RenderStyle};
    ///
    /// let options = FormatOptions {
    ///     decimal_separator: ',',
    ///     suffix_separator: "\u{a0}".to_string(),
    /// };
    /// let amount = Money::<Eur, 2>::from_scaled(-1050);
    /// let text = amount.render_with(&options, 2, RenderStyle::PlainWithSuffix).unwrap();
    /// assert_eq!(text, "-10,50\u{a0}EUR");
    /// ```
    pub fn render_with(
        &self,
        options: &FormatOptions,
        precision: u32,
        style: RenderStyle,
    ) -> MoneyResult<String> {
        let mut out = match style {
            RenderStyle::IntegerWithSuffix => self.round_to(0)?.major().to_string(),
            RenderStyle::PlainWithSuffix | RenderStyle::PlainWithoutSuffix => {
                self.plain_digits(options.decimal_separator, precision)?
            }
        };
        if style.has_suffix() {
            out.push_str(&options.suffix_separator);
            out.push_str(C::CODE);
        }
        Ok(out)
    }

    /// Sign, whole units and `precision` fraction digits.
    fn plain_digits(&self, decimal_separator: char, precision: u32) -> MoneyResult<String> {
        let shown = precision.min(D);
        let value = if shown < D {
            round_integer(self.scaled(), D - shown, R::MODE)?
        } else {
            self.scaled()
        };

        // unsigned_abs keeps i64::MIN representable
        let magnitude = value.unsigned_abs();
        let scale = Self::SCALE.unsigned_abs();
        let whole = magnitude / scale;
        let fraction = magnitude % scale;

        let mut out = String::new();
        if value < 0 {
            out.push('-');
        }
        out.push_str(&whole.to_string());

        if precision > 0 {
            out.push(decimal_separator);
            if D > 0 {
                let digits = format!("{fraction:0width$}", width = D as usize);
                out.push_str(&digits[..shown as usize]);
            }
            out.extend(std::iter::repeat('0').take((precision - shown) as usize));
        }
        Ok(out)
    }
}

/// Full precision with suffix; `{:.N}` re-rounds, `{:#}` drops the suffix.
///
/// Rendering at full precision never fails. A requested precision that
/// needs rounding under `Unnecessary` yields `fmt::Error`.
impl<C: Currency, const D: u32, R: Rounding> fmt::Display for Money<C, D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f
            .precision()
            .map_or(D, |p| u32::try_from(p).unwrap_or(u32::MAX));
        let style = if f.alternate() {
            RenderStyle::PlainWithoutSuffix
        } else {
            RenderStyle::PlainWithSuffix
        };
        let text = self.render(precision, style).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl<C: Currency, const D: u32, R: Rounding> fmt::Debug for Money<C, D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.plain_digits('.', D).map_err(|_| fmt::Error)?;
        write!(f, "Money<{}, {}, {}>({})", C::CODE, D, R::MODE, digits)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
