//! Command-line arguments and the pipeline run behind the binary.

use crate::analytics::count_by_category;
use crate::error::{PipelineError, Result};
use crate::filter::{filter_by_currency, filter_by_state, DEFAULT_STATE};
use crate::formatter::format_record;
use crate::loader::load_transactions;
use crate::search::DescriptionMatcher;
use crate::sorter::sort_by_date;
use crate::transaction::Transaction;
use clap::{Parser, ValueEnum};
use log::{debug, warn};
use std::io::Write;
use std::path::PathBuf;

/// Operation states accepted on the command line.
pub const KNOWN_STATES: [&str; 3] = ["EXECUTED", "CANCELED", "PENDING"];

const SEPARATOR: &str = "----------------------------------------";

/// Filter, sort and display bank operations with masked card and account numbers
#[derive(Parser, Debug)]
#[command(name = "bank-operations")]
#[command(about = "Filter, sort and display bank operations", long_about = None)]
pub struct CliArgs {
    /// Input file with operations (.json, .csv or .xlsx)
    #[arg(value_name = "INPUT")]
    pub input_file: PathBuf,

    /// Keep only operations in this state (EXECUTED, CANCELED or PENDING)
    #[arg(long, value_name = "STATE", default_value = DEFAULT_STATE)]
    pub state: String,

    /// Sort operations by date
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<SortOrder>,

    /// Keep only operations in this currency code, e.g. RUB
    #[arg(long, value_name = "CODE")]
    pub currency: Option<String>,

    /// Keep only operations whose description matches this pattern
    #[arg(long, value_name = "PATTERN")]
    pub search: Option<String>,

    /// Count operations whose description mentions this category (repeatable)
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Parses command-line arguments.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Matches `raw` case-insensitively against [`KNOWN_STATES`].
pub fn normalize_state(raw: &str) -> Result<String> {
    let upper = raw.trim().to_uppercase();
    if KNOWN_STATES.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(PipelineError::UnknownState(raw.to_string()))
    }
}

/// Loads the input file, applies the requested stages and writes the report.
pub fn run<W: Write>(args: &CliArgs, mut out: W) -> Result<()> {
    let state = normalize_state(&args.state)?;
    let records = load_transactions(&args.input_file)?;

    let mut selected = filter_by_state(&records, &state);
    debug!("{} of {} operations are {}", selected.len(), records.len(), state);

    if let Some(order) = args.sort {
        selected = sort_by_date(selected.iter().copied(), order == SortOrder::Desc)?;
    }

    if let Some(code) = args.currency.as_deref() {
        selected = filter_by_currency(selected.iter().copied(), code).collect();
        debug!("{} operations left after currency filter {}", selected.len(), code);
    }

    if let Some(pattern) = args.search.as_deref() {
        selected = if pattern.is_empty() {
            Vec::new()
        } else {
            let matcher = DescriptionMatcher::new(pattern);
            if matcher.is_literal() {
                debug!("'{}' is not a valid regex, matching it literally", pattern);
            }
            matcher.select(selected.iter().copied())
        };
        debug!("{} operations left after search '{}'", selected.len(), pattern);
    }

    let rendered: Vec<String> = selected
        .iter()
        .filter_map(|tx| match format_record(tx) {
            Ok(block) => Some(block),
            Err(e) => {
                warn!("Operation {}: {}", display_id(tx), e);
                None
            }
        })
        .collect();

    if rendered.is_empty() {
        writeln!(out, "No transactions match the given filters")?;
    } else {
        writeln!(out, "Total operations in selection: {}", rendered.len())?;
        writeln!(out)?;
        for block in &rendered {
            write!(out, "{}", block)?;
            writeln!(out, "{}", SEPARATOR)?;
        }
    }

    if !args.categories.is_empty() {
        let counts = count_by_category(selected.iter().copied(), &args.categories);
        writeln!(out)?;
        writeln!(out, "Category counts:")?;
        write!(out, "{}", counts)?;
    }

    out.flush()?;
    Ok(())
}

fn display_id(tx: &Transaction) -> String {
    tx.id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "without id".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_state() {
        assert_eq!(normalize_state("executed").unwrap(), "EXECUTED");
        assert_eq!(normalize_state(" Pending ").unwrap(), "PENDING");
        assert_eq!(normalize_state("CANCELED").unwrap(), "CANCELED");
        assert!(matches!(
            normalize_state("FAILED"),
            Err(PipelineError::UnknownState(s)) if s == "FAILED"
        ));
    }

    #[test]
    fn test_parse_defaults() {
        let args = CliArgs::try_parse_from(["bank-operations", "ops.json"]).unwrap();
        assert_eq!(args.state, "EXECUTED");
        assert_eq!(args.sort, None);
        assert!(args.currency.is_none());
        assert!(args.categories.is_empty());
    }

    #[test]
    fn test_parse_all_options() {
        let args = CliArgs::try_parse_from([
            "bank-operations",
            "ops.csv",
            "--state",
            "pending",
            "--sort",
            "asc",
            "--currency",
            "USD",
            "--search",
            "перевод",
            "--category",
            "вклад",
            "--category",
            "перевод",
        ])
        .unwrap();

        assert_eq!(args.input_file, PathBuf::from("ops.csv"));
        assert_eq!(args.state, "pending");
        assert_eq!(args.sort, Some(SortOrder::Asc));
        assert_eq!(args.currency.as_deref(), Some("USD"));
        assert_eq!(args.search.as_deref(), Some("перевод"));
        assert_eq!(args.categories, vec!["вклад", "перевод"]);
    }

    fn run_on(json: &str, extra: &[&str]) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("operations.json");
        std::fs::write(&path, json).unwrap();

        let mut argv = vec!["bank-operations", path.to_str().unwrap()];
        argv.extend_from_slice(extra);
        let args = CliArgs::try_parse_from(argv).unwrap();

        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_run_counts_only_rendered_operations() {
        let output = run_on(
            r#"[
                {"id": 1, "state": "EXECUTED", "date": "2023-10-15", "from": "Visa 1234", "to": "Счет 64686473678894779589"},
                {"id": 2, "state": "EXECUTED", "date": "2023-10-16", "description": "fine", "to": "Счет 64686473678894779589"}
            ]"#,
            &[],
        );

        assert!(output.starts_with("Total operations in selection: 1\n"));
        assert_eq!(output.matches(SEPARATOR).count(), 1);
    }

    #[test]
    fn test_run_with_nothing_renderable() {
        let output = run_on(
            r#"[{"id": 1, "state": "EXECUTED", "to": "Visa 1234"}]"#,
            &[],
        );
        assert_eq!(output, "No transactions match the given filters\n");
    }

    #[test]
    fn test_run_empty_search_selects_nothing() {
        let output = run_on(
            r#"[{"id": 1, "state": "EXECUTED", "description": "Перевод", "to": "Счет 64686473678894779589"}]"#,
            &["--search", ""],
        );
        assert_eq!(output, "No transactions match the given filters\n");
    }

    #[test]
    fn test_parse_rejects_unknown_sort_order() {
        assert!(CliArgs::try_parse_from(["bank-operations", "ops.json", "--sort", "up"]).is_err());
    }
}
