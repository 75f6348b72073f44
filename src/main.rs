//! Checkout Engine CLI
//!
//! Loads a product catalog, then runs every order in an orders CSV through
//! cart validation and checkout, printing receipts to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- catalog.csv orders.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use checkout_engine::{Catalog, CheckoutError, OrderProcessor, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(CheckoutError::MissingArgument);
    }

    let catalog = Catalog::from_csv(BufReader::new(File::open(&args[1])?))?;
    let orders = BufReader::new(File::open(&args[2])?);

    let mut processor = OrderProcessor::new(catalog);

    let stdout = io::stdout();
    let handle = stdout.lock();
    processor.process_csv(orders, handle)?;

    Ok(())
}
