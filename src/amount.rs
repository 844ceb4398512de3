//! Monetary amount as it appears in an operation record.
//!
//! Source files store amounts either as JSON strings (`"31957.58"`) or as
//! plain numbers. The original spelling is always kept so rendered output
//! matches the source; the decimal value is parsed with `rust_decimal` when
//! the text is a plain decimal and left empty otherwise (`"1 000,50"`, `"N/A"`).

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// An amount that remembers how it was written.
///
/// # Examples
///
/// ```
/// use bank_operations::Amount;
///
/// let amount = Amount::from("8221.37");
/// assert_eq!(amount.to_string(), "8221.37");
/// assert!(amount.value().is_some());
///
/// let odd = Amount::from("1 000,50");
/// assert_eq!(odd.to_string(), "1 000,50");
/// assert!(odd.value().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    value: Option<Decimal>,
    raw: String,
}

impl Amount {
    /// Returns the decimal value, if the text is a decimal number.
    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    /// Returns the amount exactly as it was written in the source.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        Amount {
            value: parse_decimal(trimmed),
            raw: trimmed.to_string(),
        }
    }
}

impl From<i64> for Amount {
    fn from(v: i64) -> Self {
        Amount {
            value: Some(Decimal::from(v)),
            raw: v.to_string(),
        }
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Amount {
            value: Some(Decimal::from(v)),
            raw: v.to_string(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount as a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Amount, E> {
        Ok(Amount::from(v.to_string().as_str()))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_keeps_original_spelling() {
        let a = Amount::from("100.00");
        assert_eq!(a.to_string(), "100.00");
        assert_eq!(a.value(), Some(Decimal::from(100)));

        let a = Amount::from("  2.5  ");
        assert_eq!(a.as_str(), "2.5");

        let a = Amount::from("1e3");
        assert_eq!(a.value(), Some(Decimal::from(1000)));
    }

    #[test]
    fn test_non_decimal_text_is_kept_without_value() {
        let a = Amount::from("1 000,50");
        assert_eq!(a.as_str(), "1 000,50");
        assert_eq!(a.value(), None);

        assert_eq!(Amount::from("N/A").value(), None);
        assert_eq!(Amount::from("").as_str(), "");
    }

    #[test]
    fn test_deserialize_string_and_number() {
        let a: Amount = serde_json::from_str(r#""31957.58""#).unwrap();
        assert_eq!(a.to_string(), "31957.58");

        let a: Amount = serde_json::from_str("67314.7").unwrap();
        assert_eq!(a.to_string(), "67314.7");
        assert_eq!(a.value(), Some(Decimal::from_str("67314.7").unwrap()));

        let a: Amount = serde_json::from_str("500").unwrap();
        assert_eq!(a.to_string(), "500");

        let a: Amount = serde_json::from_str("-12").unwrap();
        assert_eq!(a.value(), Some(Decimal::from(-12)));
    }

    #[test]
    fn test_deserialize_non_numeric_string() {
        let a: Amount = serde_json::from_str(r#""N/A""#).unwrap();
        assert_eq!(a.to_string(), "N/A");
        assert!(a.value().is_none());

        assert!(serde_json::from_str::<Amount>("true").is_err());
    }
}
