//! Bank Operations CLI
//!
//! Reads operations from a JSON or CSV file, filters and orders them, and
//! prints each one with card and account numbers masked.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- data/operations.json --state executed --sort desc --currency RUB
//! cargo run -- data/transactions.csv --search "перевод" --category вклад
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use bank_operations::cli;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    let args = cli::parse_args();
    let stdout = io::stdout();
    let handle = stdout.lock();

    if let Err(e) = cli::run(&args, handle) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
