//! # Rounding Module
//!
//! Pure, stateless functions that snap a value onto a coarser decimal grid.
//!
//! ## The Two Entry Points
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     RoundingEngine                                      │
//! │                                                                         │
//! │  round_integer(x, places, mode)     round_real(x, mode)                 │
//! │  ───────────────────────────────    ───────────────────────────────     │
//! │  i64 → multiple of 10^n             f64 → integral f64                  │
//! │  every mode implemented             HALF_ODD, HALF_FROM_ZERO and        │
//! │  used by: comparisons, rescale,     UNNECESSARY are rejected            │
//! │           rendering                 used by: Money::from_f64            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tie Breaking at a Glance (places = 1)
//! ```text
//!   x     UP  DOWN  HALF_UP HALF_DOWN HALF_EVEN HALF_ODD TO_ZERO FROM_ZERO
//!   15    20   10     20       10        20        10      10       20
//!   25    30   20     30       20        20        30      20       30
//!  -25   -20  -30    -20      -30       -20       -10     -20      -30
//!   27    30   20     30       30        20        30      30       30
//! ```
//!
//! ## Usage
//! ```rust
//! use titan_money::rounding::{round_integer, RoundingMode};
//!
//! assert_eq!(round_integer(1005, 1, RoundingMode::HalfUp).unwrap(), 1010);
//! assert_eq!(round_integer(25, 1, RoundingMode::HalfEven).unwrap(), 20);
//! assert!(round_integer(12, 1, RoundingMode::Unnecessary).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{MoneyError, MoneyResult};

/// Largest decimal place count whose scale factor (`10^n`) fits in an `i64`.
pub const MAX_DECIMAL_PLACES: u32 = 18;

// =============================================================================
// Rounding Mode
// =============================================================================

/// How a value that falls between two representable amounts is resolved.
///
/// For the integer engine `Ceiling` behaves as `Up`, and `Floor`/`Trunc`
/// behave as `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Toward the next multiple above.
    Up,
    /// Toward the next multiple below.
    Down,
    /// Same as `Up` for integers, `ceil` for reals.
    Ceiling,
    /// Same as `Down` for integers, `floor` for reals.
    Floor,
    /// Same as `Down`.
    Trunc,
    /// Nearest; ties go up.
    HalfUp,
    /// Nearest; ties go down.
    HalfDown,
    /// Integers: an even truncated quotient is kept, an odd one is bumped.
    /// Reals: nearest, ties to even.
    HalfEven,
    /// Integers: an odd truncated quotient is kept, an even one is bumped.
    HalfOdd,
    /// Nearest; ties go toward zero. A negative `x` above `-10^n` has a zero
    /// quotient and takes the non-negative branch.
    HalfToZero,
    /// As `HalfToZero` with ties moving away from zero.
    HalfFromZero,
    /// Exact values only; anything else is an error.
    Unnecessary,
}

impl RoundingMode {
    /// Every mode, in declaration order.
    pub const ALL: [RoundingMode; 12] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::Trunc,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::HalfOdd,
        RoundingMode::HalfToZero,
        RoundingMode::HalfFromZero,
        RoundingMode::Unnecessary,
    ];

    /// Canonical upper-case name (`HALF_EVEN`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::Trunc => "TRUNC",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
            RoundingMode::HalfOdd => "HALF_ODD",
            RoundingMode::HalfToZero => "HALF_TO_ZERO",
            RoundingMode::HalfFromZero => "HALF_FROM_ZERO",
            RoundingMode::Unnecessary => "UNNECESSARY",
        }
    }

    /// Returns true if [`round_real`] implements this mode.
    pub const fn supports_real(&self) -> bool {
        !matches!(
            self,
            RoundingMode::HalfOdd | RoundingMode::HalfFromZero | RoundingMode::Unnecessary
        )
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        RoundingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| MoneyError::parse(s, "unknown rounding mode"))
    }
}

// =============================================================================
// Type-Level Policies
// =============================================================================

/// A rounding mode lifted into the type system.
///
/// `Money<Usd, 2, HalfUp>` carries its mode as a zero-sized marker so the
/// mode costs nothing at runtime.
pub trait Rounding {
    /// The mode this marker stands for.
    const MODE: RoundingMode;
}

macro_rules! rounding_policy {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Type-level marker for `RoundingMode::", stringify!($name), "`.")]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl Rounding for $name {
                const MODE: RoundingMode = RoundingMode::$name;
            }
        )*
    };
}

/// Zero-sized rounding markers for use as the `R` parameter of `Money`.
pub mod policy {
    use super::{Rounding, RoundingMode};

    rounding_policy!(
        Up,
        Down,
        Ceiling,
        Floor,
        Trunc,
        HalfUp,
        HalfDown,
        HalfEven,
        HalfOdd,
        HalfToZero,
        HalfFromZero,
        Unnecessary,
    );
}

// =============================================================================
// Integer Rounding
// =============================================================================

/// Returns `10^places`, or `None` if it does not fit in an `i64`.
#[inline]
pub const fn pow10(places: u32) -> Option<i64> {
    10_i64.checked_pow(places)
}

/// Rescales `x` onto a multiple of `10^decimal_place` using `mode`.
///
/// Values that are already multiples are returned unchanged for every mode,
/// including `Unnecessary`.
///
/// ## Errors
/// - [`MoneyError::RoundingForbidden`] for `Unnecessary` when rounding is needed
/// - [`MoneyError::Overflow`] if `10^decimal_place` or the rounded result
///   leaves the `i64` range
///
/// ## Example
/// ```rust
/// use titan_money::rounding::{round_integer, RoundingMode};
///
/// assert_eq!(round_integer(1009, 1, RoundingMode::Down).unwrap(), 1000);
/// assert_eq!(round_integer(-25, 1, RoundingMode::HalfToZero).unwrap(), -20);
/// assert_eq!(round_integer(-25, 1, RoundingMode::HalfFromZero).unwrap(), -30);
/// ```
pub fn round_integer(x: i64, decimal_place: u32, mode: RoundingMode) -> MoneyResult<i64> {
    let zeros = pow10(decimal_place).ok_or_else(|| MoneyError::overflow("round"))?;
    if x % zeros == 0 {
        return Ok(x);
    }

    let half = zeros / 2;

    // Floor quotient and its non-negative remainder: x = q * zeros + r, 0 < r < zeros
    let q = x.div_euclid(zeros);
    let r = x.rem_euclid(zeros);

    let quotient = match mode {
        RoundingMode::Up | RoundingMode::Ceiling => q + 1,
        RoundingMode::Down | RoundingMode::Floor | RoundingMode::Trunc => q,
        RoundingMode::HalfUp => {
            if r >= half {
                q + 1
            } else {
                q
            }
        }
        RoundingMode::HalfDown => {
            if r > half {
                q + 1
            } else {
                q
            }
        }
        RoundingMode::HalfEven | RoundingMode::HalfOdd => {
            // Parity of the truncated quotient picks the multiple
            let t = x / zeros;
            let even = t % 2 == 0;
            if even == (mode == RoundingMode::HalfEven) {
                t
            } else {
                t + 1
            }
        }
        RoundingMode::HalfToZero | RoundingMode::HalfFromZero => {
            // Negative quotients compare the remainder's magnitude, the rest its signed value
            let t = x / zeros;
            let rem = x % zeros;
            let toward_zero = mode == RoundingMode::HalfToZero;
            if t < 0 {
                let m = rem.abs();
                let keep = if toward_zero { m <= half } else { m < half };
                if keep {
                    t
                } else {
                    t - 1
                }
            } else {
                let bump = if toward_zero { rem > half } else { rem >= half };
                if bump {
                    t + 1
                } else {
                    t
                }
            }
        }
        RoundingMode::Unnecessary => {
            debug!(x, decimal_place, "rounding required under UNNECESSARY");
            return Err(MoneyError::RoundingForbidden { mode });
        }
    };

    quotient.checked_mul(zeros).ok_or_else(|| {
        debug!(x, decimal_place, %mode, "rounded value overflows i64");
        MoneyError::overflow("round")
    })
}

// =============================================================================
// Real Rounding
// =============================================================================

/// Rounds a real number to an integral value using `mode`.
///
/// `x - x.floor()` is exact for every finite `f64`, so the tie rules are
/// evaluated without touching the floating-point environment.
///
/// ## Capability Gap
/// `HalfOdd`, `HalfFromZero` and `Unnecessary` are not implemented for reals
/// and always return [`MoneyError::RoundingForbidden`]. The integer engine
/// supports all modes.
///
/// ## Example
/// ```rust
/// use titan_money::rounding::{round_real, RoundingMode};
///
/// assert_eq!(round_real(2.5, RoundingMode::HalfUp).unwrap(), 3.0);
/// assert_eq!(round_real(2.5, RoundingMode::HalfEven).unwrap(), 2.0);
/// assert!(round_real(2.5, RoundingMode::HalfOdd).is_err());
/// ```
pub fn round_real(x: f64, mode: RoundingMode) -> MoneyResult<f64> {
    let floor = x.floor();
    let frac = x - floor;

    let rounded = match mode {
        RoundingMode::Up | RoundingMode::Ceiling => x.ceil(),
        RoundingMode::Down | RoundingMode::Floor | RoundingMode::Trunc => floor,
        RoundingMode::HalfUp => {
            if frac >= 0.5 {
                floor + 1.0
            } else {
                floor
            }
        }
        RoundingMode::HalfDown => {
            if frac > 0.5 {
                floor + 1.0
            } else {
                floor
            }
        }
        RoundingMode::HalfEven => x.round_ties_even(),
        RoundingMode::HalfToZero => {
            if frac == 0.5 {
                x.trunc()
            } else {
                x.round()
            }
        }
        RoundingMode::HalfOdd | RoundingMode::HalfFromZero | RoundingMode::Unnecessary => {
            debug!(x, %mode, "mode not supported for real rounding");
            return Err(MoneyError::RoundingForbidden { mode });
        }
    };

    Ok(rounded)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use RoundingMode::*;

    fn ri(x: i64, places: u32, mode: RoundingMode) -> i64 {
        round_integer(x, places, mode).unwrap()
    }

    #[test]
    fn test_directional_modes() {
        assert_eq!(ri(1009, 1, Down), 1000);
        assert_eq!(ri(1001, 1, Up), 1010);
        assert_eq!(ri(1001, 1, Ceiling), 1010);
        assert_eq!(ri(1009, 1, Floor), 1000);
        assert_eq!(ri(1009, 1, Trunc), 1000);
    }

    #[test]
    fn test_directional_modes_negative() {
        assert_eq!(ri(-25, 1, Up), -20);
        assert_eq!(ri(-25, 1, Down), -30);
        assert_eq!(ri(-1, 2, Down), -100);
        assert_eq!(ri(-1, 2, Up), 0);
    }

    #[test]
    fn test_half_up_and_half_down() {
        assert_eq!(ri(1005, 1, HalfUp), 1010);
        assert_eq!(ri(1005, 1, HalfDown), 1000);
        assert_eq!(ri(1004, 1, HalfUp), 1000);
        assert_eq!(ri(1006, 1, HalfDown), 1010);
        assert_eq!(ri(-25, 1, HalfUp), -20);
        assert_eq!(ri(-25, 1, HalfDown), -30);
    }

    #[test]
    fn test_half_even_and_half_odd() {
        assert_eq!(ri(15, 1, HalfEven), 20);
        assert_eq!(ri(25, 1, HalfEven), 20);
        assert_eq!(ri(25, 1, HalfOdd), 30);
        assert_eq!(ri(15, 1, HalfOdd), 10);
        assert_eq!(ri(-15, 1, HalfEven), 0);
        assert_eq!(ri(-25, 1, HalfEven), -20);
    }

    #[test]
    fn test_half_even_and_half_odd_follow_quotient_parity() {
        // Parity alone decides, even away from a tie
        assert_eq!(ri(11, 1, HalfEven), 20);
        assert_eq!(ri(29, 1, HalfEven), 20);
        assert_eq!(ri(21, 1, HalfEven), 20);
        assert_eq!(ri(21, 1, HalfOdd), 30);
        assert_eq!(ri(19, 1, HalfOdd), 10);
        assert_eq!(ri(-35, 1, HalfOdd), -30);
    }

    #[test]
    fn test_half_to_zero_and_from_zero() {
        assert_eq!(ri(-25, 1, HalfToZero), -20);
        assert_eq!(ri(-25, 1, HalfFromZero), -30);
        assert_eq!(ri(25, 1, HalfToZero), 20);
        assert_eq!(ri(25, 1, HalfFromZero), 30);
        assert_eq!(ri(-27, 1, HalfToZero), -30);
        assert_eq!(ri(-23, 1, HalfFromZero), -20);
    }

    #[test]
    fn test_half_to_zero_branches_on_quotient_sign() {
        // Quotient zero takes the non-negative branch with the signed remainder
        assert_eq!(ri(-7, 1, HalfToZero), 0);
        assert_eq!(ri(-5, 1, HalfToZero), 0);
        assert_eq!(ri(-5, 1, HalfFromZero), 0);
        assert_eq!(ri(7, 1, HalfToZero), 10);
        assert_eq!(ri(5, 1, HalfFromZero), 10);
        // Negative quotient compares the magnitude
        assert_eq!(ri(-15, 1, HalfToZero), -10);
        assert_eq!(ri(-15, 1, HalfFromZero), -20);
        assert_eq!(ri(-17, 1, HalfToZero), -20);
    }

    #[test]
    fn test_unnecessary() {
        assert_eq!(
            round_integer(12, 1, Unnecessary),
            Err(MoneyError::RoundingForbidden { mode: Unnecessary })
        );
        assert_eq!(ri(10, 1, Unnecessary), 10);
    }

    #[test]
    fn test_exact_values_short_circuit_every_mode() {
        for mode in RoundingMode::ALL {
            assert_eq!(ri(1200, 2, mode), 1200, "{mode}");
            assert_eq!(ri(-1200, 2, mode), -1200, "{mode}");
            assert_eq!(ri(7, 0, mode), 7, "{mode}");
        }
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            round_integer(i64::MAX, 1, Up),
            Err(MoneyError::overflow("round"))
        );
        assert_eq!(
            round_integer(i64::MIN, 1, Down),
            Err(MoneyError::overflow("round"))
        );
        assert!(round_integer(5, 19, HalfUp).is_err());
        // Rounding toward zero from the edges stays in range
        assert_eq!(ri(i64::MAX, 1, Down), 9_223_372_036_854_775_800);
        assert_eq!(ri(i64::MIN, 1, Up), -9_223_372_036_854_775_800);
    }

    #[test]
    fn test_round_real() {
        assert_eq!(round_real(2.1, Up).unwrap(), 3.0);
        assert_eq!(round_real(2.9, Down).unwrap(), 2.0);
        assert_eq!(round_real(-2.1, Floor).unwrap(), -3.0);
        assert_eq!(round_real(-2.9, Ceiling).unwrap(), -2.0);
        assert_eq!(round_real(2.5, HalfUp).unwrap(), 3.0);
        assert_eq!(round_real(-2.5, HalfUp).unwrap(), -2.0);
        assert_eq!(round_real(2.5, HalfDown).unwrap(), 2.0);
        assert_eq!(round_real(2.6, HalfDown).unwrap(), 3.0);
        assert_eq!(round_real(3.5, HalfEven).unwrap(), 4.0);
        assert_eq!(round_real(2.5, HalfEven).unwrap(), 2.0);
        assert_eq!(round_real(-2.5, HalfToZero).unwrap(), -2.0);
        assert_eq!(round_real(-2.6, HalfToZero).unwrap(), -3.0);
    }

    #[test]
    fn test_round_real_capability_gap() {
        for mode in [HalfOdd, HalfFromZero, Unnecessary] {
            assert!(!mode.supports_real());
            assert_eq!(
                round_real(2.0, mode),
                Err(MoneyError::RoundingForbidden { mode })
            );
        }
    }

    #[test]
    fn test_mode_parsing_and_display() {
        assert_eq!("HALF_EVEN".parse::<RoundingMode>().unwrap(), HalfEven);
        assert_eq!("half-up".parse::<RoundingMode>().unwrap(), HalfUp);
        assert_eq!("unnecessary".parse::<RoundingMode>().unwrap(), Unnecessary);
        assert!("sideways".parse::<RoundingMode>().is_err());
        for mode in RoundingMode::ALL {
            assert_eq!(mode.to_string().parse::<RoundingMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&HalfFromZero).unwrap();
        assert_eq!(json, "\"half_from_zero\"");
        let back: RoundingMode = serde_json::from_str("\"half_to_zero\"").unwrap();
        assert_eq!(back, HalfToZero);
    }

    #[test]
    fn test_policy_markers() {
        assert_eq!(<policy::HalfEven as Rounding>::MODE, HalfEven);
        assert_eq!(<policy::Unnecessary as Rounding>::MODE, Unnecessary);
    }
}
