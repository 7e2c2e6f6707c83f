//! CSV summary of every client.

use crate::client::Client;
use crate::decimal::serialize_cents;
use crate::error::Result;
use crate::store::ClientStore;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One output row. Money columns are written with exactly two decimals.
#[derive(Debug, Serialize)]
pub struct ClientSummary<'a> {
    pub name: &'a str,
    pub resident: bool,
    #[serde(serialize_with = "serialize_cents")]
    pub gross_salary: Decimal,
    #[serde(serialize_with = "serialize_cents")]
    pub tax: Decimal,
    #[serde(serialize_with = "serialize_cents")]
    pub medicare_levy: Decimal,
    #[serde(serialize_with = "serialize_cents")]
    pub net_salary: Decimal,
    #[serde(serialize_with = "serialize_cents")]
    pub weekly_expenses: Decimal,
    #[serde(serialize_with = "serialize_cents")]
    pub available_funds: Decimal,
    pub accounts: usize,
    #[serde(serialize_with = "serialize_cents")]
    pub total_invested: Decimal,
}

impl<'a> From<&'a Client> for ClientSummary<'a> {
    fn from(client: &'a Client) -> Self {
        ClientSummary {
            name: client.name(),
            resident: client.is_resident(),
            gross_salary: client.gross_annual_salary(),
            tax: client.tax(),
            medicare_levy: client.medicare_levy(),
            net_salary: client.net_annual_salary(),
            weekly_expenses: client.weekly_expenses(),
            available_funds: client.available_funds(),
            accounts: client.account_count(),
            total_invested: client.total_invested(),
        }
    }
}

/// Writes one row per client, ordered by name.
pub fn write_summary<W: Write>(store: &ClientStore, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if store.is_empty() {
        // serialize() only emits headers alongside the first record
        csv_writer.write_record([
            "name",
            "resident",
            "gross_salary",
            "tax",
            "medicare_levy",
            "net_salary",
            "weekly_expenses",
            "available_funds",
            "accounts",
            "total_invested",
        ])?;
    }

    for client in store.sorted_view() {
        csv_writer.serialize(ClientSummary::from(client))?;
    }

    csv_writer.flush()?;
    Ok(())
}
