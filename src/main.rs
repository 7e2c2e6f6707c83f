//! Investment Advisor CLI
//!
//! Loads a client record file and writes a CSV summary of every client,
//! sorted by name. When an output path is given, the loaded clients are
//! also saved back in record format.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- clients.dat > summary.csv
//! cargo run -- clients.dat normalized.dat
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use investment_advisor::{codec, report, AdvisorError, ClientStore, Result};
use log::{info, warn};
use std::env;
use std::io;
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
    if args.len() < 2 {
        return Err(AdvisorError::MissingArgument);
    }

    let input_path = &args[1];
    let mut store = ClientStore::new();
    match codec::load_file(input_path, &mut store) {
        Ok(summary) => info!("Loaded {} client(s) from {}", summary.added, input_path),
        // Clients loaded before the duplicates were found are still reported.
        Err(e @ AdvisorError::DuplicateClients { .. }) => warn!("{}", e),
        Err(e) => return Err(e),
    }

    if let Some(output_path) = args.get(2) {
        codec::save_file(output_path, &store)?;
        info!("Saved {} client(s) to {}", store.count(), output_path);
    }

    let stdout = io::stdout();
    let handle = stdout.lock();
    report::write_summary(&store, handle)?;

    Ok(())
}
