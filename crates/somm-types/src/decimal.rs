use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseError;

const PRECISION: usize = 18;
const SCALE: u128 = 1_000_000_000_000_000_000;

/// An unsigned fixed-point decimal with 18 fractional digits.
///
/// Comparisons against ratios of voting power are done in exact integer arithmetic, so every node
/// reaches the same verdict.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal(u128);

impl Decimal {
    pub const ZERO: Decimal = Decimal(0);
    pub const ONE: Decimal = Decimal(SCALE);

    /// The ratio `numerator / denominator`, truncated to 18 decimal places.
    ///
    /// Returns `None` when the denominator is zero.
    pub fn from_ratio(numerator: u64, denominator: u64) -> Option<Decimal> {
        if denominator == 0 {
            return None;
        }
        Some(Decimal(
            u128::from(numerator) * SCALE / u128::from(denominator),
        ))
    }

    /// Whether `part / total >= self`, computed without rounding.
    ///
    /// A zero total never meets any threshold.
    pub fn is_met_by(self, part: u64, total: u64) -> bool {
        if total == 0 {
            return false;
        }
        match self.0.checked_mul(u128::from(total)) {
            Some(required) => u128::from(part) * SCALE >= required,
            None => false,
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.0 / SCALE,
            self.0 % SCALE,
            width = PRECISION
        )
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Decimal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (integer, fraction) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

        if integer.is_empty() || !all_digits(integer) || !all_digits(fraction) {
            return Err(ParseError::new::<Decimal>(s));
        }
        if fraction.len() > PRECISION {
            return Err(ParseError::new::<Decimal>(format!(
                "{s} has more than {PRECISION} decimal places"
            )));
        }

        let integer: u128 = integer.parse().map_err(ParseError::new::<Decimal>)?;
        let fraction: u128 = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{fraction:0<PRECISION$}");
            padded.parse().map_err(ParseError::new::<Decimal>)?
        };

        integer
            .checked_mul(SCALE)
            .and_then(|i| i.checked_add(fraction))
            .map(Decimal)
            .ok_or_else(|| ParseError::new::<Decimal>(format!("{s} is out of range")))
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
