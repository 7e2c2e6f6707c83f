//! Currency helpers built on `rust_decimal`.
//!
//! Record files carry amounts with comma thousands separators, and every
//! comparison against available funds happens on values rounded to cents.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serializer;
use std::fmt;
use std::str::FromStr;

/// Fraction digits kept when an amount is written to a record file.
const MAX_FRACTION_DIGITS: u32 = 3;

/// Rounds to two decimal places, midpoint to even.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// An amount rendered with comma thousands separators.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use investment_advisor::Grouped;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(Grouped(dec!(85000)).to_string(), "85,000");
/// assert_eq!(Grouped(dec!(1234.50)).to_string(), "1,234.5");
/// assert_eq!(Grouped::from_str(" 1,234.5 ").unwrap().0, dec!(1234.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Grouped(pub Decimal);

impl Grouped {
    /// Returns the inner value.
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl FromStr for Grouped {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        Decimal::from_str(&cleaned).map(Grouped)
    }
}

impl fmt::Display for Grouped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointNearestEven)
            .normalize();
        let digits = rounded.abs().to_string();
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (digits.as_str(), None),
        };

        if rounded.is_sign_negative() && !rounded.is_zero() {
            f.write_str("-")?;
        }
        let len = whole.len();
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", ch)?;
        }
        if let Some(fraction) = fraction {
            write!(f, ".{}", fraction)?;
        }
        Ok(())
    }
}

/// Serializes an amount as a string with exactly two decimal places.
pub fn serialize_cents<S>(value: &Decimal, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut cents = round2(*value);
    cents.rescale(2);
    rust_decimal::serde::str::serialize(&cents, serializer)
}
