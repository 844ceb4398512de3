//! Loading operation records from JSON, CSV and XLSX files.
//!
//! Loading is lenient per record. Ids and amounts of any scalar kind are kept
//! as written; only an entry whose shape cannot be read at all (an array where
//! text is expected, say) is logged at warn level and skipped. An unreadable
//! file, a syntactically broken JSON document or a broken workbook is an error.

use crate::amount::Amount;
use crate::error::{PipelineError, Result};
use crate::transaction::{Currency, OperationAmount, RecordId, Transaction};
use calamine::{Data, Reader, Xlsx};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Loads records from `path`, choosing the reader by file extension.
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "xlsx" => load_xlsx(path),
        _ => Err(PipelineError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Loads records from a JSON file holding an array of objects.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    let file = File::open(path.as_ref())?;
    let records = read_json(BufReader::new(file))?;
    debug!(
        "Loaded {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Loads records from a CSV file with a header row.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    let file = File::open(path.as_ref())?;
    let records = read_csv(BufReader::new(file))?;
    debug!(
        "Loaded {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Loads records from the first worksheet of an XLSX workbook.
pub fn load_xlsx<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    let file = File::open(path.as_ref())?;
    let records = read_xlsx(BufReader::new(file))?;
    debug!(
        "Loaded {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Reads a JSON array of operation objects.
///
/// Empty input and a top-level value that is not an array both give an
/// empty list.
pub fn read_json<R: Read>(mut reader: R) -> Result<Vec<Transaction>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let items = match serde_json::from_str::<Value>(&content)? {
        Value::Array(items) => items,
        other => {
            warn!("Expected a JSON array of operations, found {}", json_kind(&other));
            return Ok(Vec::new());
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Transaction>(item) {
            Ok(tx) => records.push(tx),
            Err(e) => warn!("Entry {}: skipping malformed operation: {}", idx, e),
        }
    }

    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Flat row as exported by the bank, from CSV or a spreadsheet.
#[derive(Debug, Default, Deserialize)]
struct FlatRow {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default, alias = "currency")]
    currency_name: Option<String>,
    #[serde(default)]
    currency_code: Option<String>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl FlatRow {
    /// Maps the flat row into the nested record shape.
    fn into_transaction(self) -> Transaction {
        let amount = self.amount.as_deref().map(Amount::from);

        let currency = if self.currency_name.is_some() || self.currency_code.is_some() {
            Some(Currency {
                name: self.currency_name,
                code: self.currency_code,
            })
        } else {
            None
        };

        let operation_amount = if amount.is_some() || currency.is_some() {
            Some(OperationAmount { amount, currency })
        } else {
            None
        };

        Transaction {
            id: self.id,
            state: self.state,
            date: self.date,
            description: self.description,
            from: self.from,
            to: self.to,
            operation_amount,
        }
    }
}

/// Picks `;` when the header line contains one, `,` otherwise.
fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();
    if header.contains(';') {
        b';'
    } else {
        b','
    }
}

/// Reads CSV operations with a header row, `;` or `,` separated.
///
/// Empty cells become absent fields. Rows that do not parse are skipped.
pub fn read_csv<R: Read>(mut reader: R) -> Result<Vec<Transaction>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(&content))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<FlatRow>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        match result {
            Ok(row) => records.push(row.into_transaction()),
            Err(e) => {
                warn!("Row {}: CSV parse error: {}", row_num, e);
            }
        }
    }

    Ok(records)
}

/// Spreadsheet column a header cell names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    State,
    Date,
    Amount,
    CurrencyName,
    CurrencyCode,
    From,
    To,
    Description,
}

impl Column {
    fn from_header(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "id" => Some(Column::Id),
            "state" => Some(Column::State),
            "date" => Some(Column::Date),
            "amount" => Some(Column::Amount),
            "currency_name" | "currency" => Some(Column::CurrencyName),
            "currency_code" => Some(Column::CurrencyCode),
            "from" => Some(Column::From),
            "to" => Some(Column::To),
            "description" => Some(Column::Description),
            _ => None,
        }
    }
}

/// Cell contents as text; empty and error cells are absent.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::DateTime(dt) => dt.as_datetime()?.format("%Y-%m-%dT%H:%M:%S").to_string(),
        other => other.to_string(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// 2^53, the largest range where every integer is an exact f64
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Spreadsheets store whole numbers as floats; those become numeric ids.
fn cell_id(cell: &Data) -> Option<RecordId> {
    match cell {
        Data::Int(n) => Some(RecordId::Number(*n)),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT => {
            Some(RecordId::Number(*f as i64))
        }
        other => cell_text(other).map(RecordId::Text),
    }
}

impl FlatRow {
    fn set(&mut self, column: Column, cell: &Data) {
        match column {
            Column::Id => self.id = cell_id(cell),
            Column::State => self.state = cell_text(cell),
            Column::Date => self.date = cell_text(cell),
            Column::Amount => self.amount = cell_text(cell),
            Column::CurrencyName => self.currency_name = cell_text(cell),
            Column::CurrencyCode => self.currency_code = cell_text(cell),
            Column::From => self.from = cell_text(cell),
            Column::To => self.to = cell_text(cell),
            Column::Description => self.description = cell_text(cell),
        }
    }
}

/// Reads operations from the first worksheet of an XLSX workbook.
///
/// The first row names the columns, using the same names as the CSV export
/// (matched case-insensitively); unknown columns are ignored. Blank rows are
/// skipped, and a workbook without worksheets gives an empty list.
pub fn read_xlsx<R: Read + Seek>(reader: R) -> Result<Vec<Transaction>> {
    let mut workbook: Xlsx<R> = Xlsx::new(reader)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => {
            warn!("Workbook has no worksheets");
            return Ok(Vec::new());
        }
    };

    let mut rows = range.rows();
    let columns: Vec<Option<Column>> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| cell_text(cell).and_then(|name| Column::from_header(&name)))
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        if row.iter().all(|cell| cell_text(cell).is_none()) {
            continue;
        }

        let mut flat = FlatRow::default();
        for (cell, column) in row.iter().zip(&columns) {
            if let Some(column) = column {
                flat.set(*column, cell);
            }
        }
        records.push(flat.into_transaction());
    }

    Ok(records)
}
