//! # Currency Tags
//!
//! Currencies are zero-sized marker types, so `Money<Usd, 2>` and
//! `Money<Eur, 2>` are different types and cannot be added, compared or
//! assigned to each other. The check happens at compile time.
//!
//! ## Declaring a Currency
//! ```rust
//! use titan_money::{currency, Currency, Money};
//!
//! currency!(Pkr, "PKR");
//!
//! let fare: Money<Pkr, 2> = Money::from_major(450).unwrap();
//! assert_eq!(fare.currency_code(), "PKR");
//! assert_eq!(Pkr::CODE, "PKR");
//! ```
//!
//! ```compile_fail
//! use titan_money::{Eur, Money, Usd};
//!
//! let a: Money<Usd, 2> = Money::from_scaled(100);
//! let b: Money<Eur, 2> = Money::from_scaled(100);
//! let _ = a == b; // different currencies: does not compile
//! ```

/// A currency identity carried at the type level.
pub trait Currency {
    /// Code appended when rendering (`"USD"`).
    const CODE: &'static str;
}

/// Declares a zero-sized currency marker and implements [`Currency`] for it.
#[macro_export]
macro_rules! currency {
    ($(#[$meta:meta])* $name:ident, $code:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl $crate::currency::Currency for $name {
            const CODE: &'static str = $code;
        }
    };
}

currency!(
    /// United States dollar.
    Usd,
    "USD"
);
currency!(
    /// Euro.
    Eur,
    "EUR"
);
currency!(
    /// Pound sterling.
    Gbp,
    "GBP"
);
currency!(
    /// Japanese yen.
    Jpy,
    "JPY"
);
currency!(
    /// Swiss franc.
    Chf,
    "CHF"
);
