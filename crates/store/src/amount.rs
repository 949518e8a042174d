use std::{fmt, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::StoreError;

/// Decimal amount represented as **integer cents**.
///
/// Every monetary field of the document (expense amounts, wishlist prices,
/// necessity amounts) uses this type so sums never drift.
///
/// On disk the value is a plain JSON number (`12.5`, `40`). When reading it
/// also accepts a decimal string, which is how request bodies usually carry
/// amounts.
///
/// Magnitudes are capped at [`Amount::MAX_CENTS`]. Every value up to the cap
/// has at most 15 significant digits, so the float written to disk reads
/// back as the same number of cents. Additions go through
/// [`Amount::checked_add`] and fail instead of leaving that range.
///
/// # Examples
///
/// ```rust
/// use expense_store::Amount;
///
/// let amount = Amount::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!("10,5".parse::<Amount>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Largest magnitude an amount may hold, in cents.
    pub const MAX_CENTS: i64 = 999_999_999_999_999;

    /// Creates a new amount from integer cents.
    ///
    /// Use [`Amount::try_new`] for values that come from outside.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from integer cents, rejecting values past the cap.
    pub fn try_new(cents: i64) -> Result<Self, StoreError> {
        if cents.checked_abs().is_some_and(|abs| abs <= Self::MAX_CENTS) {
            Ok(Self(cents))
        } else {
            Err(StoreError::InvalidAmount("amount too large".to_string()))
        }
    }

    /// Creates an amount from whole units.
    pub fn from_units(units: i64) -> Result<Self, StoreError> {
        units
            .checked_mul(100)
            .ok_or_else(|| StoreError::InvalidAmount("amount too large".to_string()))
            .and_then(Self::try_new)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Converts a JSON float into cents.
    ///
    /// The float goes through its shortest decimal form, so it follows the
    /// same rules as a decimal string: `12.345` is rejected, not rounded.
    pub fn from_f64(value: f64) -> Result<Self, StoreError> {
        if !value.is_finite() {
            return Err(StoreError::InvalidAmount(format!("{value} is not finite")));
        }
        value.to_string().parse()
    }

    /// Adds two amounts, or `None` when the result passes the cap.
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0
            .checked_add(rhs.0)
            .and_then(|cents| Self::try_new(cents).ok())
    }

    /// Total of `amounts`; `0` when there are none.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Amount>) -> Result<Self, StoreError> {
        amounts.into_iter().try_fold(Self::ZERO, |total, amount| {
            total
                .checked_add(amount)
                .ok_or_else(|| StoreError::InvalidAmount("total too large".to_string()))
        })
    }

    /// The value as a float, for JSON output.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = StoreError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// At most 2 fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidAmount(format!("invalid amount: {s:?}"));
        let overflow = || StoreError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim())
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped.trim())
        } else {
            (false, trimmed)
        };
        if rest.is_empty() {
            return Err(StoreError::InvalidAmount("empty amount".to_string()));
        }

        let rest = rest.replace(',', ".");
        let (units_str, frac_str) = match rest.split_once('.') {
            Some((units, frac)) => (units, Some(frac)),
            None => (rest.as_str(), None),
        };

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let units: i64 = units_str.parse().map_err(|_| overflow())?;

        let cents: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) if !frac.chars().all(|c| c.is_ascii_digit()) => return Err(invalid()),
            Some(frac) if frac.len() == 1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            Some(frac) if frac.len() == 2 => frac.parse::<i64>().map_err(|_| invalid())?,
            Some(_) => return Err(StoreError::InvalidAmount("too many decimals".to_string())),
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        Amount::try_new(if negative { -total } else { total })
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Amount::from_units(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        i64::try_from(v)
            .map_err(|_| E::custom("amount too large"))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Amount::from_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}
