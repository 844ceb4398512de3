//! Human-readable rendering of a single operation.

use crate::error::Result;
use crate::masks::mask_identifier;
use crate::transaction::Transaction;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Shown in place of a missing description.
pub const NO_DESCRIPTION: &str = "Без описания";

/// Shown in place of a missing currency name.
pub const DEFAULT_CURRENCY_NAME: &str = "руб.";

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if !raw.contains('T') {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Reformats an ISO date or date-time as `DD.MM.YYYY`.
///
/// Input that does not parse is returned unchanged.
///
/// ```
/// use bank_operations::formatter::format_date;
///
/// assert_eq!(format_date("2019-08-26T10:50:58.294041"), "26.08.2019");
/// assert_eq!(format_date("2023/10/15"), "2023/10/15");
/// ```
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%d.%m.%Y").to_string(),
        None => raw.to_string(),
    }
}

fn mask_party(party: Option<&str>) -> Result<Option<String>> {
    match party {
        Some(p) if !p.is_empty() => mask_identifier(Some(p)).map(Some),
        _ => Ok(None),
    }
}

/// Renders an operation as three lines:
///
/// ```text
/// 26.08.2019 Перевод организации
/// Maestro 1596 83** **** 5199 -> Счет **9589
/// Сумма: 31957.58 руб.
/// ```
///
/// The `from ->` part is left out when the record has no source. A malformed
/// card or account number fails the whole rendering.
pub fn format_record(tx: &Transaction) -> Result<String> {
    let date = tx.date.as_deref().map(format_date).unwrap_or_default();
    let description = tx.description.as_deref().unwrap_or(NO_DESCRIPTION);
    let from = mask_party(tx.from.as_deref())?;
    let to = mask_party(tx.to.as_deref())?.unwrap_or_default();
    let amount = tx
        .amount()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "0".to_string());
    let currency = tx.currency_name().unwrap_or(DEFAULT_CURRENCY_NAME);

    let mut out = format!("{} {}\n", date, description);
    if let Some(from) = from {
        out.push_str(&from);
        out.push_str(" -> ");
    }
    out.push_str(&to);
    out.push('\n');
    out.push_str(&format!("Сумма: {} {}\n", amount, currency));

    Ok(out)
}
