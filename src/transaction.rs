//! Operation record model.
//!
//! Every field is optional: source files routinely omit keys (and some
//! entries are empty objects), and each pipeline stage decides for itself
//! whether an absent field excludes the record or is an error.

use crate::amount::Amount;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

/// A single bank operation as loaded from JSON, CSV or XLSX.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Transaction {
    /// External identifier, not validated.
    #[serde(default)]
    pub id: Option<RecordId>,

    /// Operation state: EXECUTED, CANCELED, PENDING (other values are legal)
    #[serde(default)]
    pub state: Option<String>,

    /// ISO-8601-like date, e.g. `2019-08-26T10:50:58.294041`
    #[serde(default)]
    pub date: Option<String>,

    /// Free text. JSON `null` and a missing key both load as `None`.
    #[serde(default)]
    pub description: Option<String>,

    /// Source account or card, e.g. `Maestro 1596837868705199`
    #[serde(default)]
    pub from: Option<String>,

    /// Destination account or card, e.g. `Счет 64686473678894779589`
    #[serde(default)]
    pub to: Option<String>,

    #[serde(default, rename = "operationAmount")]
    pub operation_amount: Option<OperationAmount>,
}

/// Operation identifier as it appears in the source.
///
/// Bank exports use integers, but anything else is kept as text rather than
/// rejecting the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// The numeric id, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RecordId::Number(n) => Some(*n),
            RecordId::Text(_) => None,
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

struct RecordIdVisitor;

impl<'de> Visitor<'de> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an operation id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<RecordId, E> {
        Ok(RecordId::Number(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<RecordId, E> {
        Ok(i64::try_from(v)
            .map(RecordId::Number)
            .unwrap_or_else(|_| RecordId::Text(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<RecordId, E> {
        Ok(RecordId::Text(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<RecordId, E> {
        Ok(RecordId::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<RecordId, E> {
        Ok(RecordId::Text(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

/// Amount and currency of an operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OperationAmount {
    #[serde(default)]
    pub amount: Option<Amount>,

    #[serde(default)]
    pub currency: Option<Currency>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Currency {
    /// Display name, e.g. `руб.` or `USD`
    #[serde(default)]
    pub name: Option<String>,

    /// ISO code, e.g. `RUB`
    #[serde(default)]
    pub code: Option<String>,
}

impl Transaction {
    /// Currency code at `operationAmount.currency.code`, if the whole path exists.
    pub fn currency_code(&self) -> Option<&str> {
        self.operation_amount
            .as_ref()?
            .currency
            .as_ref()?
            .code
            .as_deref()
    }

    /// Currency display name at `operationAmount.currency.name`.
    pub fn currency_name(&self) -> Option<&str> {
        self.operation_amount
            .as_ref()?
            .currency
            .as_ref()?
            .name
            .as_deref()
    }

    pub fn amount(&self) -> Option<&Amount> {
        self.operation_amount.as_ref()?.amount.as_ref()
    }

    /// Description, treating an empty string as absent.
    pub fn non_empty_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}
