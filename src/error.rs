//! Error types for the advisory engine.

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Errors that can occur while working with clients, accounts and record files.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Failed to open, read or write a record file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record field could not be parsed
    #[error("Invalid {field} at line {line}: {value:?}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// The input ended before the client header was closed by an account marker
    #[error("Record for {name} at line {line} ends before its accounts section")]
    TruncatedRecord { line: usize, name: String },

    /// No account at the given 1-based position
    #[error("The account doesn't exist: #{index}")]
    AccountNotFound { index: usize },

    /// No client with the given name
    #[error("The client does not exist: {name}")]
    ClientNotFound { name: String },

    /// Records skipped during a load because the client already existed.
    ///
    /// Clients counted in `added` remain in the store.
    #[error("{} already exists.\n{} new client(s) have been added.", .names.join(", "), .added)]
    DuplicateClients { names: Vec<String>, added: usize },

    /// Record files must carry a `.dat` or `.txt` extension
    #[error("Please ensure the file extension is .dat or .txt: {path}")]
    InvalidFileName { path: String },

    /// Account parameters outside the accepted ranges
    #[error("Invalid account {field}: {value}")]
    InvalidAccount { field: &'static str, value: String },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: advisor <records.dat> [output.dat]")]
    MissingArgument,
}
