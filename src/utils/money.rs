//! Fixed-point amounts
//!
//! Costs, quantities, distances and capacities are `DECIMAL(10,2)` values:
//! at most two fractional digits and eight integer digits. They are kept
//! as a count of hundredths so the store can sum them exactly, and exposed
//! to clients as `rust_decimal::Decimal` strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::database::{HasArguments, HasValueRef};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteTypeInfo};
use sqlx::{Decode, Encode, Type};
use thiserror::Error;

pub const MAX_DECIMAL_PLACES: u32 = 2;
pub const MAX_DIGITS: u32 = 10;

/// Upper bound (exclusive) on the absolute number of hundredths.
const MAX_ABS_CENTS: i64 = 10_i64.pow(MAX_DIGITS);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Ensure that there are no more than 2 decimal places.")]
    TooManyDecimalPlaces,

    #[error("Ensure that there are no more than 10 digits in total.")]
    TooManyDigits,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, MAX_DECIMAL_PLACES)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let mut normalized = value.normalize();
        if normalized.scale() > MAX_DECIMAL_PLACES {
            return Err(AmountError::TooManyDecimalPlaces);
        }

        normalized.rescale(MAX_DECIMAL_PLACES);
        let cents = i64::try_from(normalized.mantissa()).map_err(|_| AmountError::TooManyDigits)?;
        if cents.abs() >= MAX_ABS_CENTS {
            return Err(AmountError::TooManyDigits);
        }

        Ok(Self(cents))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.to_decimal()
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Amount::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl Type<Sqlite> for Amount {
    fn type_info() -> SqliteTypeInfo {
        <i64 as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <i64 as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for Amount {
    fn encode_by_ref(&self, buf: &mut <Sqlite as HasArguments<'q>>::ArgumentBuffer) -> IsNull {
        <i64 as Encode<'q, Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> Decode<'r, Sqlite> for Amount {
    fn decode(value: <Sqlite as HasValueRef<'r>>::ValueRef) -> Result<Self, BoxDynError> {
        let cents = <i64 as Decode<'r, Sqlite>>::decode(value)?;
        Ok(Self(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_two_places_are_kept_exactly() {
        let amount = Amount::try_from(dec("50.25")).unwrap();
        assert_eq!(amount.cents(), 5025);
        assert_eq!(amount.to_decimal(), dec("50.25"));
        assert_eq!(amount.to_string(), "50.25");
    }

    #[test]
    fn test_whole_numbers_gain_two_places() {
        let amount = Amount::try_from(dec("5")).unwrap();
        assert_eq!(amount.cents(), 500);
        assert_eq!(amount.to_string(), "5.00");
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_places() {
        assert_eq!(Amount::try_from(dec("10.500")).unwrap().cents(), 1050);
    }

    #[test]
    fn test_three_places_rejected() {
        assert_eq!(
            Amount::try_from(dec("1.005")),
            Err(AmountError::TooManyDecimalPlaces)
        );
    }

    #[test]
    fn test_ten_digit_limit() {
        assert!(Amount::try_from(dec("99999999.99")).is_ok());
        assert_eq!(
            Amount::try_from(dec("100000000")),
            Err(AmountError::TooManyDigits)
        );
    }

    #[test]
    fn test_negative_values_are_representable() {
        let amount = Amount::try_from(dec("-3.5")).unwrap();
        assert!(amount.is_negative());
        assert_eq!(amount.cents(), -350);
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_value(Amount::from_cents(1000)).unwrap();
        assert_eq!(json, serde_json::json!("10.00"));
    }

    #[test]
    fn test_deserializes_strings_and_numbers() {
        let from_str: Amount = serde_json::from_str("\"12.5\"").unwrap();
        let from_int: Amount = serde_json::from_str("7").unwrap();
        assert_eq!(from_str.cents(), 1250);
        assert_eq!(from_int.cents(), 700);
        assert!(serde_json::from_str::<Amount>("\"0.001\"").is_err());
    }
}
