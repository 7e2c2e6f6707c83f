//! # Investment Advisor
//!
//! Calculation and persistence engine for a financial advisory tool:
//! progressive income tax and net income per client, per-client investment
//! accounts, and compound growth projections for those accounts.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: All money and rates are `rust_decimal` values
//! - **Explicit recompute**: Derived tax figures update only through
//!   [`Client::recompute_tax`]
//! - **Predictable storage**: The client store grows one slot at a time and
//!   keeps insertion order; sorting is a view
//! - **Plain-text records**: Clients load from and save to a line-based format
//!
//! ## Example
//!
//! ```no_run
//! use investment_advisor::{codec, report, ClientStore};
//!
//! let mut store = ClientStore::new();
//! codec::load_file("clients.dat", &mut store).unwrap();
//! report::write_summary(&store, std::io::stdout()).unwrap();
//! ```

pub mod account;
pub mod client;
pub mod codec;
pub mod decimal;
pub mod error;
pub mod projection;
pub mod report;
pub mod store;
pub mod tax;

pub use account::Account;
pub use client::{AccountDetail, Client};
pub use codec::LoadSummary;
pub use decimal::{round2, Grouped};
pub use error::{AdvisorError, Result};
pub use projection::{project, project_final, Projection, ProjectionPoint};
pub use store::ClientStore;
pub use tax::TaxAssessment;
