//! # Money Module
//!
//! Provides the `Money` type: an exact fixed-point amount backed by one `i64`.
//!
//! ## Why Fixed-Point Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  THE WRAPAROUND PROBLEM                                                 │
//! │    i64::MAX + 1 = i64::MIN (release builds)  ❌ SILENT!                 │
//! │                                                                         │
//! │  OUR SOLUTION: Scaled integers + checked arithmetic                     │
//! │    Money<Usd, 2>  stores 10.99 as 1099                                  │
//! │    Money<Usd, 4>  stores 10.99 as 109900                                │
//! │    every +, -, *, / returns MoneyResult<Money>                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Type Parameters
//! ```text
//!   Money<C, D, R>
//!         │  │  └── R: Rounding  - mode used when a value must be snapped
//!         │  └───── D: u32       - decimal places, scale factor = 10^D
//!         └──────── C: Currency  - currency tag, mixing tags won't compile
//! ```
//!
//! ## Usage
//! ```rust
//! use titan_money::{Money, Usd};
//!
//! type Usd2 = Money<Usd, 2>;
//!
//! let price = Usd2::from_f64(3.10).unwrap();
//! let fee = Usd2::from_f64(1.40).unwrap();
//! let total = (price + fee).unwrap();
//! assert_eq!(total, Usd2::from_f64(4.50).unwrap());
//!
//! // Overflow is an error value, never a wrap
//! assert!(Usd2::MAX.checked_add(Usd2::from_scaled(1)).is_err());
//! ```

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use tracing::{debug, trace};

use crate::currency::Currency;
use crate::error::{MoneyError, MoneyResult};
use crate::rounding::{
    policy, round_integer, round_real, Rounding, RoundingMode, MAX_DECIMAL_PLACES,
};

/// Lowest `f64` that converts to an `i64` without saturating (`-2^63`).
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;

/// First `f64` above the `i64` range (`2^63`).
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;

/// `10^places`, rejected during monomorphization when it cannot fit an `i64`.
const fn scale_factor(places: u32) -> i64 {
    assert!(
        places <= MAX_DECIMAL_PLACES,
        "Money supports at most 18 decimal places"
    );
    10_i64.pow(places)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value stored as `scaled / 10^D` in currency `C`.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, discounts
/// - **Tags in the type**: Currency, precision and rounding cost nothing at
///   runtime and mismatches are caught by the compiler
/// - **Immutable**: every operation returns a fresh value; `try_*_assign`
///   only stores the result when the operation succeeded
///
/// ## Equality and Ordering
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Money<Usd, 2>(1.01)  vs  Money<Usd, 4>(1.0100)                        │
/// │                                                                         │
/// │     101 × 10^2 = 10100  ──── compare ────  10100     → equal           │
/// │                                                                         │
/// │  The lower-precision side is scaled UP (checked). If that overflows,   │
/// │  == answers false and try_cmp returns MoneyError::Overflow.            │
/// │  The rounding marker never affects equality.                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub struct Money<C, const D: u32, R = policy::HalfEven> {
    scaled: i64,
    _tags: PhantomData<fn() -> (C, R)>,
}

impl<C: Currency, const D: u32, R: Rounding> Money<C, D, R> {
    /// Scale factor `10^D`.
    pub const SCALE: i64 = scale_factor(D);

    /// Zero in this configuration.
    pub const ZERO: Self = Self::from_scaled(0);

    /// Largest representable amount (`i64::MAX / 10^D`).
    pub const MAX: Self = Self::from_scaled(i64::MAX);

    /// Smallest representable amount (`i64::MIN / 10^D`).
    pub const MIN: Self = Self::from_scaled(i64::MIN);

    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a Money value from its raw scaled integer.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{Money, Usd};
    ///
    /// let price: Money<Usd, 2> = Money::from_scaled(1099); // 10.99 USD
    /// assert_eq!(price.scaled(), 1099);
    /// ```
    #[inline]
    pub const fn from_scaled(scaled: i64) -> Self {
        Money {
            scaled,
            _tags: PhantomData,
        }
    }

    /// Creates a Money value from whole units. No rounding can happen.
    ///
    /// ## Errors
    /// [`MoneyError::Overflow`] if `units * 10^D` leaves the `i64` range.
    pub fn from_major(units: i64) -> MoneyResult<Self> {
        units
            .checked_mul(Self::SCALE)
            .map(Self::from_scaled)
            .ok_or_else(|| MoneyError::overflow("from_major"))
    }

    /// Creates a Money value from a real number, rounding with `R`.
    ///
    /// `value * 10^D` is used directly when it is integral; otherwise it is
    /// snapped with [`round_real`] and the configured mode.
    ///
    /// ## Binary Floating Point
    /// The product `value * 10^D` is computed in `f64`, so a decimal literal
    /// that has no exact binary form can land just beside the grid:
    /// `0.29` under `Down` becomes `0.28`, and `1.1` under `Unnecessary` is
    /// rejected. Parse text (see [`Money::parse`]) when the input must be
    /// taken digit for digit.
    ///
    /// ## Errors
    /// - [`MoneyError::NonFinite`] for NaN and infinities
    /// - [`MoneyError::RoundingForbidden`] when rounding is needed and `R`
    ///   is `Unnecessary` (or not supported for reals)
    /// - [`MoneyError::Overflow`] when the result does not fit
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{policy, Money, Usd};
    ///
    /// let up: Money<Usd, 2, policy::Up> = Money::from_f64(1.001).unwrap();
    /// assert_eq!(up.scaled(), 101);
    ///
    /// let exact: Money<Usd, 2, policy::Unnecessary> = Money::from_f64(1.5).unwrap();
    /// assert_eq!(exact.scaled(), 150);
    /// assert!(Money::<Usd, 2, policy::Unnecessary>::from_f64(1.005).is_err());
    /// ```
    pub fn from_f64(value: f64) -> MoneyResult<Self> {
        if !value.is_finite() {
            return Err(MoneyError::NonFinite);
        }

        let scaled = value * Self::SCALE as f64;
        let integral = if scaled.fract() == 0.0 {
            scaled
        } else {
            let mode = R::MODE;
            let rounded = round_real(scaled, mode)?;
            trace!(value, scaled, rounded, %mode, "rounded on construction");
            rounded
        };

        if !(I64_MIN_F64..I64_END_F64).contains(&integral) {
            debug!(value, places = D, "real value outside i64 range");
            return Err(MoneyError::overflow("from_f64"));
        }

        Ok(Self::from_scaled(integral as i64))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the largest representable value.
    #[inline]
    pub const fn max_value() -> Self {
        Self::MAX
    }

    /// Returns the smallest representable value.
    #[inline]
    pub const fn min_value() -> Self {
        Self::MIN
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the raw scaled integer.
    #[inline]
    pub const fn scaled(&self) -> i64 {
        self.scaled
    }

    /// Returns the whole-unit portion, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{Money, Usd};
    ///
    /// assert_eq!(Money::<Usd, 2>::from_scaled(1099).major(), 10);
    /// assert_eq!(Money::<Usd, 2>::from_scaled(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.scaled / Self::SCALE
    }

    /// Returns the fractional digits as a non-negative integer (`0..10^D`).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.scaled % Self::SCALE).abs()
    }

    /// Currency code of `C`.
    #[inline]
    pub const fn currency_code(&self) -> &'static str {
        C::CODE
    }

    /// Decimal places `D`.
    #[inline]
    pub const fn decimal_places(&self) -> u32 {
        D
    }

    /// Rounding mode of `R`.
    #[inline]
    pub const fn rounding_mode(&self) -> RoundingMode {
        R::MODE
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.scaled == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.scaled > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.scaled < 0
    }

    /// Lossy conversion for display or interop. Never feed it back into math.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.scaled as f64 / Self::SCALE as f64
    }

    // =========================================================================
    // Checked Arithmetic
    // =========================================================================

    /// Adds two amounts of the same currency and precision.
    ///
    /// ## Errors
    /// [`MoneyError::Overflow`] if the sum leaves the `i64` range.
    pub fn checked_add<R2: Rounding>(self, rhs: Money<C, D, R2>) -> MoneyResult<Self> {
        self.scaled
            .checked_add(rhs.scaled)
            .map(Self::from_scaled)
            .ok_or_else(|| MoneyError::overflow("add"))
    }

    /// Subtracts two amounts of the same currency and precision.
    ///
    /// ## Errors
    /// [`MoneyError::Overflow`] if the difference leaves the `i64` range.
    pub fn checked_sub<R2: Rounding>(self, rhs: Money<C, D, R2>) -> MoneyResult<Self> {
        self.scaled
            .checked_sub(rhs.scaled)
            .map(Self::from_scaled)
            .ok_or_else(|| MoneyError::overflow("sub"))
    }

    /// Multiplies by an integer quantity.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{Money, Usd};
    ///
    /// let unit_price = Money::<Usd, 2>::from_scaled(299); // 2.99
    /// assert_eq!(unit_price.checked_mul(3).unwrap().scaled(), 897);
    /// assert!(unit_price.checked_mul(i64::MAX).is_err());
    /// ```
    pub fn checked_mul(self, factor: i64) -> MoneyResult<Self> {
        self.scaled
            .checked_mul(factor)
            .map(Self::from_scaled)
            .ok_or_else(|| MoneyError::overflow("mul"))
    }

    /// Divides by an integer, truncating toward zero.
    ///
    /// ## Errors
    /// - [`MoneyError::DivisionByZero`] when `divisor == 0`
    /// - [`MoneyError::Overflow`] for `MIN / -1`
    pub fn checked_div(self, divisor: i64) -> MoneyResult<Self> {
        if divisor == 0 {
            return Err(MoneyError::DivisionByZero);
        }
        self.scaled
            .checked_div(divisor)
            .map(Self::from_scaled)
            .ok_or_else(|| MoneyError::overflow("div"))
    }

    /// Remainder of the whole-unit quotient, rescaled back.
    ///
    /// Works on whole units only: `((scaled / 10^D) % divisor) * 10^D`.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{Money, Usd};
    ///
    /// let amount = Money::<Usd, 2>::from_scaled(1075); // 10.75
    /// assert_eq!(amount.checked_rem(3).unwrap().scaled(), 100); // 1.00
    /// ```
    pub fn checked_rem(self, divisor: i64) -> MoneyResult<Self> {
        if divisor == 0 {
            return Err(MoneyError::DivisionByZero);
        }
        let units = self.scaled / Self::SCALE;
        // Every integer divides by -1; i64::MIN % -1 would trap
        let rem = if divisor == -1 { 0 } else { units % divisor };
        rem.checked_mul(Self::SCALE)
            .map(Self::from_scaled)
            .ok_or_else(|| MoneyError::overflow("rem"))
    }

    /// Multiplies by a real scalar.
    ///
    /// The scalar is first converted to this configuration (rounding with
    /// `R`), then `a * b / 10^D` is evaluated in `i128`.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{Money, Usd};
    ///
    /// let amount = Money::<Usd, 4>::from_f64(10.01).unwrap();
    /// let grown = amount.checked_mul_f64(1.1).unwrap();
    /// assert_eq!(grown, Money::<Usd, 4>::from_f64(11.011).unwrap());
    /// ```
    pub fn checked_mul_f64(self, factor: f64) -> MoneyResult<Self> {
        let factor = Self::from_f64(factor)?;
        let product = i128::from(self.scaled) * i128::from(factor.scaled) / i128::from(Self::SCALE);
        narrow(product, "mul").map(Self::from_scaled)
    }

    /// Divides by a real scalar; `a * 10^D / b` evaluated in `i128`, truncating.
    ///
    /// ## Errors
    /// [`MoneyError::DivisionByZero`] if the scalar rounds to zero at this
    /// precision.
    pub fn checked_div_f64(self, divisor: f64) -> MoneyResult<Self> {
        let divisor = Self::from_f64(divisor)?;
        if divisor.scaled == 0 {
            return Err(MoneyError::DivisionByZero);
        }
        let quotient =
            i128::from(self.scaled) * i128::from(Self::SCALE) / i128::from(divisor.scaled);
        narrow(quotient, "div").map(Self::from_scaled)
    }

    /// Remainder after dividing by a real scalar, at full precision.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{Money, Usd};
    ///
    /// let amount = Money::<Usd, 2>::from_major(10).unwrap();
    /// assert_eq!(amount.checked_rem_f64(3.5).unwrap().scaled(), 300);
    /// ```
    pub fn checked_rem_f64(self, divisor: f64) -> MoneyResult<Self> {
        let divisor = Self::from_f64(divisor)?;
        if divisor.scaled == 0 {
            return Err(MoneyError::DivisionByZero);
        }
        let rem = i128::from(self.scaled) % i128::from(divisor.scaled);
        narrow(rem, "rem").map(Self::from_scaled)
    }

    /// Negation; fails only for `MIN`.
    pub fn checked_neg(self) -> MoneyResult<Self> {
        self.scaled
            .checked_neg()
            .map(Self::from_scaled)
            .ok_or_else(|| MoneyError::overflow("neg"))
    }

    /// Absolute value; fails only for `MIN`.
    pub fn checked_abs(self) -> MoneyResult<Self> {
        self.scaled
            .checked_abs()
            .map(Self::from_scaled)
            .ok_or_else(|| MoneyError::overflow("abs"))
    }

    /// Sums an iterator of amounts, stopping at the first overflow.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{Money, Usd};
    ///
    /// let lines = [299, 150, 1099].map(Money::<Usd, 2>::from_scaled);
    /// assert_eq!(Money::checked_sum(lines).unwrap().scaled(), 1548);
    /// ```
    pub fn checked_sum<I>(amounts: I) -> MoneyResult<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |total, amount| total.checked_add(amount))
    }

    // =========================================================================
    // Compound Assignment
    // =========================================================================
    // The new value is computed first and stored only on success, so a failed
    // operation leaves `self` untouched.

    /// `self += rhs`, checked.
    pub fn try_add_assign<R2: Rounding>(&mut self, rhs: Money<C, D, R2>) -> MoneyResult<()> {
        *self = self.checked_add(rhs)?;
        Ok(())
    }

    /// `self -= rhs`, checked.
    pub fn try_sub_assign<R2: Rounding>(&mut self, rhs: Money<C, D, R2>) -> MoneyResult<()> {
        *self = self.checked_sub(rhs)?;
        Ok(())
    }

    /// `self *= factor`, checked.
    pub fn try_mul_assign(&mut self, factor: i64) -> MoneyResult<()> {
        *self = self.checked_mul(factor)?;
        Ok(())
    }

    /// `self /= divisor`, checked.
    pub fn try_div_assign(&mut self, divisor: i64) -> MoneyResult<()> {
        *self = self.checked_div(divisor)?;
        Ok(())
    }

    /// `self %= divisor`, checked.
    pub fn try_rem_assign(&mut self, divisor: i64) -> MoneyResult<()> {
        *self = self.checked_rem(divisor)?;
        Ok(())
    }

    // =========================================================================
    // Precision
    // =========================================================================

    /// Converts to another precision of the same currency.
    ///
    /// Going up multiplies by `10^Δ` (checked). Going down rounds with `R`
    /// first, so the result is exact.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{policy, Money, Usd};
    ///
    /// let fine = Money::<Usd, 4, policy::HalfUp>::from_scaled(10_050); // 1.0050
    /// let coarse = fine.rescale::<2>().unwrap();
    /// assert_eq!(coarse.scaled(), 101); // 1.01
    /// assert_eq!(coarse.rescale::<4>().unwrap().scaled(), 10_100);
    /// ```
    pub fn rescale<const D2: u32>(self) -> MoneyResult<Money<C, D2, R>> {
        let target_scale = Money::<C, D2, R>::SCALE;
        if D2 >= D {
            let factor = target_scale / Self::SCALE;
            self.scaled
                .checked_mul(factor)
                .map(Money::from_scaled)
                .ok_or_else(|| {
                    debug!(scaled = self.scaled, from = D, to = D2, "rescale overflow");
                    MoneyError::overflow("rescale")
                })
        } else {
            let rounded = round_integer(self.scaled, D - D2, R::MODE)?;
            Ok(Money::from_scaled(rounded / (Self::SCALE / target_scale)))
        }
    }

    /// Snaps the value to `places` fractional digits while keeping `D`.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::{policy, Money, Usd};
    ///
    /// let amount = Money::<Usd, 4, policy::HalfUp>::from_scaled(12_345); // 1.2345
    /// assert_eq!(amount.round_to(2).unwrap().scaled(), 12_300);
    /// ```
    pub fn round_to(self, places: u32) -> MoneyResult<Self> {
        if places >= D {
            return Ok(self);
        }
        round_integer(self.scaled, D - places, R::MODE).map(Self::from_scaled)
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Orders two amounts of the same currency, rescaling if precisions differ.
    ///
    /// ## Errors
    /// [`MoneyError::Overflow`] when the lower-precision operand cannot be
    /// scaled up, even though both inputs are in range.
    ///
    /// ## Example
    /// ```rust
    /// use std::cmp::Ordering;
    /// use titan_money::{Money, Usd};
    ///
    /// let a = Money::<Usd, 2>::from_scaled(101);      // 1.01
    /// let b = Money::<Usd, 4>::from_scaled(10_101);   // 1.0101
    /// assert_eq!(a.try_cmp(&b).unwrap(), Ordering::Less);
    /// assert!(Money::<Usd, 0>::MAX.try_cmp(&b).is_err());
    /// ```
    pub fn try_cmp<const D2: u32, R2: Rounding>(
        &self,
        other: &Money<C, D2, R2>,
    ) -> MoneyResult<Ordering> {
        self.aligned(other).map(|(lhs, rhs)| lhs.cmp(&rhs))
    }

    /// Both scaled values expressed at the higher of the two precisions.
    fn aligned<const D2: u32, R2: Rounding>(
        &self,
        other: &Money<C, D2, R2>,
    ) -> MoneyResult<(i64, i64)> {
        let other_scale = Money::<C, D2, R2>::SCALE;
        let (lhs, rhs) = match D.cmp(&D2) {
            Ordering::Equal => (Some(self.scaled), Some(other.scaled)),
            Ordering::Less => (
                self.scaled.checked_mul(other_scale / Self::SCALE),
                Some(other.scaled),
            ),
            Ordering::Greater => (
                Some(self.scaled),
                other.scaled.checked_mul(Self::SCALE / other_scale),
            ),
        };
        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => Ok((lhs, rhs)),
            _ => {
                debug!(lhs_places = D, rhs_places = D2, "comparison rescale overflow");
                Err(MoneyError::overflow("compare"))
            }
        }
    }
}

/// Narrows an `i128` intermediate back to the backing integer.
fn narrow(value: i128, operation: &'static str) -> MoneyResult<i64> {
    i64::try_from(value).map_err(|_| {
        debug!(%value, operation, "result outside i64 range");
        MoneyError::overflow(operation)
    })
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<C, const D: u32, R> Clone for Money<C, D, R> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, const D: u32, R> Copy for Money<C, D, R> {}

/// Default money is zero.
impl<C: Currency, const D: u32, R: Rounding> Default for Money<C, D, R> {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Equal when the values match after scaling the coarser side up.
/// Rounding markers are ignored; a rescale overflow means "not equal".
impl<C, const D: u32, const D2: u32, R, R2> PartialEq<Money<C, D2, R2>> for Money<C, D, R>
where
    C: Currency,
    R: Rounding,
    R2: Rounding,
{
    fn eq(&self, other: &Money<C, D2, R2>) -> bool {
        self.aligned(other).is_ok_and(|(lhs, rhs)| lhs == rhs)
    }
}

impl<C: Currency, const D: u32, R: Rounding> Eq for Money<C, D, R> {}

impl<C, const D: u32, const D2: u32, R, R2> PartialOrd<Money<C, D2, R2>> for Money<C, D, R>
where
    C: Currency,
    R: Rounding,
    R2: Rounding,
{
    fn partial_cmp(&self, other: &Money<C, D2, R2>) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl<C: Currency, const D: u32, R: Rounding> Ord for Money<C, D, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scaled.cmp(&other.scaled)
    }
}

impl<C, const D: u32, R> Hash for Money<C, D, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scaled.hash(state);
    }
}

// -----------------------------------------------------------------------------
// Operators
// -----------------------------------------------------------------------------
// Every operator yields MoneyResult<Money>: `(a + b)?`.

impl<C: Currency, const D: u32, R: Rounding, R2: Rounding> Add<Money<C, D, R2>> for Money<C, D, R> {
    type Output = MoneyResult<Self>;

    #[inline]
    fn add(self, rhs: Money<C, D, R2>) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl<C: Currency, const D: u32, R: Rounding, R2: Rounding> Sub<Money<C, D, R2>> for Money<C, D, R> {
    type Output = MoneyResult<Self>;

    #[inline]
    fn sub(self, rhs: Money<C, D, R2>) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl<C: Currency, const D: u32, R: Rounding> Mul<i64> for Money<C, D, R> {
    type Output = MoneyResult<Self>;

    #[inline]
    fn mul(self, factor: i64) -> Self::Output {
        self.checked_mul(factor)
    }
}

impl<C: Currency, const D: u32, R: Rounding> Div<i64> for Money<C, D, R> {
    type Output = MoneyResult<Self>;

    #[inline]
    fn div(self, divisor: i64) -> Self::Output {
        self.checked_div(divisor)
    }
}

impl<C: Currency, const D: u32, R: Rounding> Rem<i64> for Money<C, D, R> {
    type Output = MoneyResult<Self>;

    #[inline]
    fn rem(self, divisor: i64) -> Self::Output {
        self.checked_rem(divisor)
    }
}

impl<C: Currency, const D: u32, R: Rounding> Mul<f64> for Money<C, D, R> {
    type Output = MoneyResult<Self>;

    #[inline]
    fn mul(self, factor: f64) -> Self::Output {
        self.checked_mul_f64(factor)
    }
}

impl<C: Currency, const D: u32, R: Rounding> Div<f64> for Money<C, D, R> {
    type Output = MoneyResult<Self>;

    #[inline]
    fn div(self, divisor: f64) -> Self::Output {
        self.checked_div_f64(divisor)
    }
}

impl<C: Currency, const D: u32, R: Rounding> Rem<f64> for Money<C, D, R> {
    type Output = MoneyResult<Self>;

    #[inline]
    fn rem(self, divisor: f64) -> Self::Output {
        self.checked_rem_f64(divisor)
    }
}

impl<C: Currency, const D: u32, R: Rounding> Neg for Money<C, D, R> {
    type Output = MoneyResult<Self>;

    #[inline]
    fn neg(self) -> Self::Output {
        self.checked_neg()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{Eur, Usd};
    use crate::rounding::policy::{Down, HalfUp, Unnecessary, Up};

    type Usd2 = Money<Usd, 2>;
    type Usd4 = Money<Usd, 4>;

    #[test]
    fn test_constants() {
        assert_eq!(Usd2::SCALE, 100);
        assert_eq!(Usd4::SCALE, 10_000);
        assert_eq!(Money::<Usd, 0>::SCALE, 1);
        assert_eq!(Usd2::MAX.scaled(), i64::MAX);
        assert_eq!(Usd2::MIN.scaled(), i64::MIN);
        assert!(Usd2::ZERO.is_zero());
        assert_eq!(Usd2::MAX.major(), i64::MAX / 100);
        assert_eq!(Usd2::default(), Usd2::zero());
        assert_eq!(Usd2::max_value(), Usd2::MAX);
        assert_eq!(Usd2::min_value(), Usd2::MIN);
    }

    #[test]
    fn test_accessors() {
        let money = Usd2::from_scaled(1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
        assert_eq!(money.currency_code(), "USD");
        assert_eq!(money.decimal_places(), 2);
        assert_eq!(money.rounding_mode(), RoundingMode::HalfEven);

        let negative = Usd2::from_scaled(-550);
        assert_eq!(negative.major(), -5);
        assert_eq!(negative.minor(), 50);
        assert!(negative.is_negative());
        assert!(!negative.is_positive());
        assert_eq!(negative.to_f64(), -5.5);
    }

    #[test]
    fn test_from_major() {
        assert_eq!(Usd2::from_major(12).unwrap().scaled(), 1200);
        assert_eq!(Usd2::from_major(-3).unwrap().scaled(), -300);
        assert_eq!(
            Usd2::from_major(i64::MAX / 10),
            Err(MoneyError::overflow("from_major"))
        );
    }

    #[test]
    fn test_from_f64_sees_binary_representation() {
        assert_eq!(Money::<Usd, 2, Down>::from_f64(0.29).unwrap().scaled(), 28);
        assert_eq!(
            Money::<Usd, 2, Unnecessary>::from_f64(1.1),
            Err(MoneyError::RoundingForbidden {
                mode: RoundingMode::Unnecessary
            })
        );
        // Text keeps the decimal digits
        assert_eq!(Money::<Usd, 2, Down>::parse("0.29").unwrap().scaled(), 29);
        assert_eq!(Money::<Usd, 2, Unnecessary>::parse("1.1").unwrap().scaled(), 110);
    }

    #[test]
    fn test_from_f64_rounds_with_mode() {
        assert_eq!(Money::<Usd, 2, Up>::from_f64(1.001).unwrap().scaled(), 101);
        assert_eq!(Money::<Usd, 2, Down>::from_f64(1.009).unwrap().scaled(), 100);
        assert_eq!(Money::<Usd, 2, HalfUp>::from_f64(0.125).unwrap().scaled(), 13);
        assert_eq!(Usd2::from_f64(0.125).unwrap().scaled(), 12);
        assert_eq!(Usd2::from_f64(-3.10).unwrap().scaled(), -310);
    }

    #[test]
    fn test_from_f64_unnecessary() {
        type Exact = Money<Usd, 2, Unnecessary>;
        assert_eq!(Exact::from_f64(2.5).unwrap().scaled(), 250);
        assert_eq!(
            Exact::from_f64(0.125),
            Err(MoneyError::RoundingForbidden {
                mode: RoundingMode::Unnecessary
            })
        );
    }

    #[test]
    fn test_from_f64_rejects_out_of_range() {
        assert_eq!(Usd2::from_f64(f64::NAN), Err(MoneyError::NonFinite));
        assert_eq!(Usd2::from_f64(f64::INFINITY), Err(MoneyError::NonFinite));
        assert_eq!(Usd2::from_f64(1e17), Err(MoneyError::overflow("from_f64")));
        assert_eq!(Usd2::from_f64(-1e17), Err(MoneyError::overflow("from_f64")));
    }

    #[test]
    fn test_add_sub_scenario() {
        let a = Usd2::from_f64(3.10).unwrap();
        let b = Usd2::from_f64(1.40).unwrap();
        assert_eq!((a + b).unwrap(), Usd2::from_f64(4.50).unwrap());
        assert_eq!((a - b).unwrap().scaled(), 170);
    }

    #[test]
    fn test_mul_by_real_scenario() {
        let amount = Usd4::from_f64(10.01).unwrap();
        let grown = (amount * 1.1).unwrap();
        assert_eq!(grown, Usd4::from_f64(11.011).unwrap());
        assert_eq!(grown.scaled(), 110_110);
    }

    #[test]
    fn test_overflow_leaves_value_unchanged() {
        let one = Usd2::from_scaled(1);

        let mut top = Usd2::MAX;
        assert_eq!(top.try_add_assign(one), Err(MoneyError::overflow("add")));
        assert_eq!(top, Usd2::MAX);

        let mut bottom = Usd2::MIN;
        assert_eq!(bottom.try_sub_assign(one), Err(MoneyError::overflow("sub")));
        assert_eq!(bottom, Usd2::MIN);

        assert!((Usd2::MAX + Usd2::from_major(1).unwrap()).is_err());
        assert!((Usd2::MIN - Usd2::from_major(1).unwrap()).is_err());
    }

    #[test]
    fn test_mixed_rounding_markers_add() {
        let a = Money::<Usd, 2, Up>::from_scaled(100);
        let b = Money::<Usd, 2, Down>::from_scaled(50);
        let sum = (a + b).unwrap();
        assert_eq!(sum.scaled(), 150);
        assert_eq!(sum.rounding_mode(), RoundingMode::Up);
    }

    #[test]
    fn test_integer_scalar_ops() {
        let amount = Usd2::from_scaled(1075);
        assert_eq!((amount * 3).unwrap().scaled(), 3225);
        assert_eq!((amount / 4).unwrap().scaled(), 268);
        assert_eq!((amount % 3).unwrap().scaled(), 100);
        assert_eq!(Usd2::from_scaled(-1075).checked_rem(3).unwrap().scaled(), -100);
        assert_eq!(amount / 0, Err(MoneyError::DivisionByZero));
        assert_eq!(amount % 0, Err(MoneyError::DivisionByZero));
        assert_eq!(Usd2::MIN / -1, Err(MoneyError::overflow("div")));
        assert_eq!(Usd2::MAX * 2, Err(MoneyError::overflow("mul")));
    }

    #[test]
    fn test_rem_by_minus_one_is_zero() {
        type Whole = Money<Usd, 0>;
        assert_eq!(Whole::MIN.checked_rem(-1), Ok(Whole::ZERO));
        assert_eq!((Usd2::MIN % -1).unwrap(), Usd2::ZERO);
        assert_eq!(Whole::from_scaled(7).checked_rem(-1), Ok(Whole::ZERO));
    }

    #[test]
    fn test_compound_assign() {
        let mut amount = Usd2::from_scaled(1000);
        amount.try_mul_assign(3).unwrap();
        assert_eq!(amount.scaled(), 3000);
        amount.try_div_assign(7).unwrap();
        assert_eq!(amount.scaled(), 428);
        amount.try_rem_assign(3).unwrap();
        assert_eq!(amount.scaled(), 100);
        assert!(amount.try_div_assign(0).is_err());
        assert_eq!(amount.scaled(), 100);
    }

    #[test]
    fn test_real_scalar_ops() {
        let amount = Usd2::from_major(10).unwrap();
        assert_eq!((amount / 4.0).unwrap().scaled(), 250);
        assert_eq!((amount / 3.0).unwrap().scaled(), 333);
        assert_eq!((amount % 3.5).unwrap().scaled(), 300);
        assert_eq!(amount / 0.001, Err(MoneyError::DivisionByZero));
        assert_eq!(amount % 0.0, Err(MoneyError::DivisionByZero));
        assert_eq!(amount * f64::NAN, Err(MoneyError::NonFinite));
        assert_eq!(Usd2::MAX * 2.0, Err(MoneyError::overflow("mul")));
    }

    #[test]
    fn test_real_scalar_respects_mode() {
        // 0.125 becomes 0.13 under HALF_UP and 0.12 under HALF_EVEN
        let up = Money::<Usd, 2, HalfUp>::from_major(100).unwrap();
        assert_eq!((up * 0.125).unwrap().scaled(), 1300);
        let even = Usd2::from_major(100).unwrap();
        assert_eq!((even * 0.125).unwrap().scaled(), 1200);
    }

    #[test]
    fn test_neg_abs() {
        let amount = Usd2::from_scaled(-550);
        assert_eq!((-amount).unwrap().scaled(), 550);
        assert_eq!(amount.checked_abs().unwrap().scaled(), 550);
        assert_eq!(-Usd2::MIN, Err(MoneyError::overflow("neg")));
        assert_eq!(Usd2::MIN.checked_abs(), Err(MoneyError::overflow("abs")));
    }

    #[test]
    fn test_checked_sum() {
        let lines = [299, 150, 1099].map(Usd2::from_scaled);
        assert_eq!(Usd2::checked_sum(lines).unwrap().scaled(), 1548);
        assert_eq!(Usd2::checked_sum(std::iter::empty()).unwrap(), Usd2::ZERO);
        assert!(Usd2::checked_sum([Usd2::MAX, Usd2::from_scaled(1)]).is_err());
    }

    #[test]
    fn test_cross_precision_equality() {
        let two = Usd2::from_f64(1.01).unwrap();
        assert_eq!(two, Usd4::from_f64(1.0100).unwrap());
        assert_ne!(two, Usd4::from_f64(1.0101).unwrap());
        assert_eq!(Usd4::from_scaled(10_100), two);
    }

    #[test]
    fn test_equality_ignores_rounding_marker() {
        assert_eq!(
            Money::<Usd, 2, Up>::from_scaled(5),
            Money::<Usd, 2, Down>::from_scaled(5)
        );
    }

    #[test]
    fn test_equality_with_rescale_overflow_is_false() {
        assert_ne!(Money::<Usd, 0>::MAX, Usd4::MAX);
    }

    #[test]
    fn test_ordering() {
        let small = Usd2::from_scaled(101);
        let large = Usd2::from_scaled(250);
        assert!(small < large);
        assert_eq!(small.cmp(&large), Ordering::Less);
        assert_eq!([large, small].iter().max(), Some(&large));

        let finer = Usd4::from_scaled(10_101);
        assert!(small < finer);
        assert!(finer > small);
        assert_eq!(small.try_cmp(&finer).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_ordering_overflow_across_precisions() {
        let coarse = Money::<Usd, 0>::MAX;
        let fine = Usd4::from_scaled(1);
        assert_eq!(coarse.try_cmp(&fine), Err(MoneyError::overflow("compare")));
        assert_eq!(coarse.partial_cmp(&fine), None);
    }

    #[test]
    fn test_rescale() {
        let money = Usd2::from_scaled(1099);
        assert_eq!(money.rescale::<4>().unwrap().scaled(), 109_900);
        // 10.99: quotient 10 is even, so HALF_EVEN keeps it
        assert_eq!(money.rescale::<0>().unwrap().scaled(), 10);
        let half_up = Money::<Usd, 2, HalfUp>::from_scaled(1099);
        assert_eq!(half_up.rescale::<0>().unwrap().scaled(), 11);
        assert_eq!(
            Money::<Usd, 2, Unnecessary>::from_scaled(1099).rescale::<0>(),
            Err(MoneyError::RoundingForbidden {
                mode: RoundingMode::Unnecessary
            })
        );
        assert_eq!(
            Usd2::MAX.rescale::<4>(),
            Err(MoneyError::overflow("rescale"))
        );
    }

    #[test]
    fn test_round_to() {
        let money = Money::<Usd, 4, HalfUp>::from_scaled(12_355);
        assert_eq!(money.round_to(3).unwrap().scaled(), 12_360);
        assert_eq!(money.round_to(0).unwrap().scaled(), 10_000);
        // HALF_EVEN bumps the odd quotient 1 up to 2
        assert_eq!(Usd4::from_scaled(12_355).round_to(0).unwrap().scaled(), 20_000);
        assert_eq!(money.round_to(4).unwrap(), money);
        assert_eq!(money.round_to(9).unwrap(), money);
    }

    #[test]
    fn test_hash_matches_eq() {
        use std::collections::HashSet;
        let set: HashSet<Usd2> = [1, 2, 1].map(Usd2::from_scaled).into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_send_sync_copy() {
        fn assert_traits<T: Send + Sync + Copy + 'static>() {}
        assert_traits::<Usd2>();
        assert_traits::<Money<Eur, 6, Unnecessary>>();
        assert_eq!(std::mem::size_of::<Usd2>(), std::mem::size_of::<i64>());
    }
}
