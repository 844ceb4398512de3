//! # Bank Operations
//!
//! An in-memory pipeline over bank operation records: filter by state or
//! currency, order by date, search descriptions, count categories, and render
//! operations with card and account numbers masked.
//!
//! ## Design Principles
//!
//! - **Borrowed views**: stages return `&Transaction` sequences and never mutate records
//! - **Tolerant filters, strict sorting**: a missing field excludes a record from
//!   a filter, but a missing `date` fails a sort
//! - **Strict masking**: card and account numbers are validated, never guessed
//! - **Pure core**: only the loader and the CLI do I/O or logging
//!
//! ## Example
//!
//! ```
//! use bank_operations::{filter_executed, format_record, sort_by_date};
//! use std::io::Cursor;
//!
//! let json = r#"[{"id": 1, "state": "EXECUTED", "date": "2019-08-26T10:50:58.294041",
//!   "operationAmount": {"amount": "31957.58", "currency": {"name": "руб.", "code": "RUB"}},
//!   "description": "Перевод организации",
//!   "from": "Maestro 1596837868705199", "to": "Счет 64686473678894779589"}]"#;
//!
//! let records = bank_operations::loader::read_json(Cursor::new(json)).unwrap();
//! let executed = filter_executed(&records);
//! let sorted = sort_by_date(executed.iter().copied(), true).unwrap();
//! let rendered = format_record(sorted[0]).unwrap();
//! assert!(rendered.contains("Maestro 1596 83** **** 5199 -> Счет **9589"));
//! ```

pub mod amount;
pub mod analytics;
pub mod cli;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod generators;
pub mod loader;
pub mod masks;
pub mod search;
pub mod sorter;
pub mod transaction;

pub use amount::Amount;
pub use analytics::{count_by_category, CategoryCounts};
pub use error::{PipelineError, Result};
pub use filter::{
    extract_descriptions, filter_by_currency, filter_by_state, filter_executed, DEFAULT_STATE,
};
pub use formatter::{format_date, format_record};
pub use generators::card_number_sequence;
pub use loader::load_transactions;
pub use masks::{mask_account, mask_card, mask_identifier};
pub use search::{search_descriptions, DescriptionMatcher};
pub use sorter::{sort_by_date, sort_by_date_desc};
pub use transaction::{Currency, OperationAmount, RecordId, Transaction};
