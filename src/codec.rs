//! Line-based client record format.
//!
//! Each record is a client header followed by an accounts section:
//!
//! ```text
//! name Jane Doe
//! gross salary 85,000
//! resident y
//! expenses 350
//!
//! account 1
//! rate 0.05
//! weeks 12
//! amount 100
//! ```
//!
//! A client without accounts carries a single `no accounts` line instead.
//! Numbers may use comma thousands separators.

use crate::client::Client;
use crate::decimal::Grouped;
use crate::error::{AdvisorError, Result};
use crate::store::ClientStore;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::str::FromStr;

pub const FIELD_NAME: &str = "name";
pub const FIELD_GROSS_SALARY: &str = "gross salary";
pub const FIELD_RESIDENT: &str = "resident";
pub const FIELD_EXPENSES: &str = "expenses";
pub const FIELD_ACCOUNT: &str = "account";
pub const FIELD_RATE: &str = "rate";
pub const FIELD_WEEKS: &str = "weeks";
pub const FIELD_AMOUNT: &str = "amount";
pub const NO_ACCOUNTS: &str = "no accounts";

const RESIDENT_YES: &str = "y";
const RESIDENT_NO: &str = "n";

/// Outcome of a load that found no duplicate clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Clients added to the store.
    pub added: usize,
}

/// Line source that can hand one line back.
struct RecordLines<R> {
    lines: Lines<R>,
    line_no: usize,
    pending: Option<String>,
}

impl<R: BufRead> RecordLines<R> {
    fn new(reader: R) -> Self {
        RecordLines {
            lines: reader.lines(),
            line_no: 0,
            pending: None,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn push_back(&mut self, line: String) {
        self.pending = Some(line);
    }
}

/// Reads client records into `store`.
///
/// A record whose name already exists in the store is skipped as a whole,
/// and reading continues with the next record. Once the input is consumed,
/// any skipped names are reported as [`AdvisorError::DuplicateClients`];
/// clients added before that point stay in the store.
///
/// A field that fails to parse aborts the load.
pub fn decode<R: BufRead>(reader: R, store: &mut ClientStore) -> Result<LoadSummary> {
    let mut lines = RecordLines::new(reader);
    let mut duplicates = Vec::new();
    let mut added = 0;

    while let Some(line) = lines.next_line()? {
        let Some(name) = field_value(&line, FIELD_NAME) else {
            continue;
        };

        if let Some(existing) = store.find(name) {
            warn!(
                "Line {}: Client {} already exists, skipping record",
                lines.line_no,
                existing.name()
            );
            duplicates.push(name.to_string());
            continue;
        }

        let mut client = decode_header(&mut lines, name)?;
        client.recompute_tax();
        decode_accounts(&mut lines, &mut client)?;

        debug!(
            "Loaded client {} with {} account(s)",
            client.name(),
            client.account_count()
        );
        store.add(client);
        added += 1;
    }

    if duplicates.is_empty() {
        Ok(LoadSummary { added })
    } else {
        Err(AdvisorError::DuplicateClients {
            names: duplicates,
            added,
        })
    }
}

/// Reads client fields up to the `account` or `no accounts` marker.
fn decode_header<R: BufRead>(lines: &mut RecordLines<R>, name: &str) -> Result<Client> {
    let mut client = Client::new(name, Decimal::ZERO, false);
    let start = lines.line_no;

    loop {
        let Some(line) = lines.next_line()? else {
            return Err(AdvisorError::TruncatedRecord {
                line: start,
                name: client.name().to_string(),
            });
        };

        if line.starts_with(FIELD_ACCOUNT) || line.starts_with(NO_ACCOUNTS) {
            lines.push_back(line);
            return Ok(client);
        }

        if let Some(value) = field_value(&line, FIELD_GROSS_SALARY) {
            let gross = parse_number(value, FIELD_GROSS_SALARY, lines.line_no)?;
            client.set_gross_annual_salary(gross);
        } else if let Some(value) = field_value(&line, FIELD_RESIDENT) {
            client.set_resident(value == RESIDENT_YES);
        } else if let Some(value) = field_value(&line, FIELD_EXPENSES) {
            let expenses = parse_number(value, FIELD_EXPENSES, lines.line_no)?;
            client.set_weekly_expenses(expenses);
        }
    }
}

/// Reads account triples until the next `name` line or the end of input.
///
/// Rate and weeks carry over between accounts; an `amount` line completes
/// an account.
fn decode_accounts<R: BufRead>(lines: &mut RecordLines<R>, client: &mut Client) -> Result<()> {
    let mut rate = Decimal::ZERO;
    let mut weeks = 0;

    while let Some(line) = lines.next_line()? {
        if line.starts_with(FIELD_NAME) {
            lines.push_back(line);
            break;
        }

        if let Some(value) = field_value(&line, FIELD_RATE) {
            rate = parse_number(value, FIELD_RATE, lines.line_no)?;
        } else if let Some(value) = field_value(&line, FIELD_WEEKS) {
            weeks = parse_weeks(value, lines.line_no)?;
        } else if let Some(value) = field_value(&line, FIELD_AMOUNT) {
            let amount = parse_number(value, FIELD_AMOUNT, lines.line_no)?;
            client.add_account(rate, weeks, amount);
        }
    }

    Ok(())
}

/// Returns the trimmed text after `keyword` if the line starts with it.
fn field_value<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    line.strip_prefix(keyword).map(str::trim)
}

fn parse_number(value: &str, field: &'static str, line: usize) -> Result<Decimal> {
    Grouped::from_str(value)
        .map(Grouped::value)
        .map_err(|_| AdvisorError::InvalidField {
            line,
            field,
            value: value.to_string(),
        })
}

fn parse_weeks(value: &str, line: usize) -> Result<u32> {
    let cleaned: String = value.chars().filter(|c| *c != ',').collect();
    u32::from_str(&cleaned).map_err(|_| AdvisorError::InvalidField {
        line,
        field: FIELD_WEEKS,
        value: value.to_string(),
    })
}

/// Writes one client record, followed by a blank separator line.
pub fn encode_client(client: &Client) -> String {
    let mut out = String::new();

    push_field(&mut out, FIELD_NAME, client.name());
    push_field(&mut out, FIELD_GROSS_SALARY, Grouped(client.gross_annual_salary()));
    push_field(
        &mut out,
        FIELD_RESIDENT,
        if client.is_resident() {
            RESIDENT_YES
        } else {
            RESIDENT_NO
        },
    );
    push_field(&mut out, FIELD_EXPENSES, Grouped(client.weekly_expenses()));
    out.push('\n');

    if client.accounts().is_empty() {
        out.push_str(NO_ACCOUNTS);
        out.push('\n');
    }
    for (i, account) in client.accounts().iter().enumerate() {
        push_field(&mut out, FIELD_ACCOUNT, i + 1);
        push_field(&mut out, FIELD_RATE, account.rate().normalize());
        push_field(&mut out, FIELD_WEEKS, account.term_weeks());
        push_field(&mut out, FIELD_AMOUNT, Grouped(account.weekly_amount()));
    }

    out.push('\n');
    out
}

fn push_field(out: &mut String, keyword: &str, value: impl Display) {
    out.push_str(&format!("{} {}\n", keyword, value));
}

/// Writes every client in store order, trimmed of surrounding whitespace.
pub fn encode(store: &ClientStore) -> String {
    let body: String = store.iter().map(encode_client).collect();
    body.trim().to_string()
}

/// Record files must end in `.dat` or `.txt`, in any case.
pub fn validate_file_name(path: &Path) -> Result<()> {
    let accepted = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("dat") || ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);

    if accepted {
        Ok(())
    } else {
        Err(AdvisorError::InvalidFileName {
            path: path.display().to_string(),
        })
    }
}

/// Loads a record file into `store`. See [`decode`] for duplicate handling.
pub fn load_file<P: AsRef<Path>>(path: P, store: &mut ClientStore) -> Result<LoadSummary> {
    let path = path.as_ref();
    validate_file_name(path)?;

    let file = File::open(path)?;
    debug!("Loading clients from {}", path.display());
    decode(BufReader::new(file), store)
}

/// Saves every client in `store` to a record file.
pub fn save_file<P: AsRef<Path>>(path: P, store: &ClientStore) -> Result<()> {
    let path = path.as_ref();
    validate_file_name(path)?;

    fs::write(path, encode(store))?;
    debug!("Saved {} client(s) to {}", store.count(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    const TWO_CLIENTS: &str = "name jane doe
gross salary 85,000
resident y
expenses 350

account 1
rate 0.05
weeks 12
amount 100
account 2
rate 0.1
weeks 10
amount 1,250.5

name Bob Smith
gross salary 30000
resident n
expenses 200

no accounts";

    fn decode_str(input: &str, store: &mut ClientStore) -> Result<LoadSummary> {
        decode(Cursor::new(input), store)
    }

    #[test]
    fn test_decode_clients_and_accounts() {
        let mut store = ClientStore::new();
        let summary = decode_str(TWO_CLIENTS, &mut store).unwrap();
        assert_eq!(summary.added, 2);

        let jane = store.find("Jane Doe").unwrap();
        assert_eq!(jane.name(), "Jane Doe");
        assert_eq!(jane.gross_annual_salary(), dec!(85000));
        assert!(jane.is_resident());
        assert_eq!(jane.weekly_expenses(), dec!(350));
        assert_eq!(jane.tax(), dec!(19400));
        assert_eq!(jane.account_count(), 2);
        assert_eq!(jane.accounts()[1].rate(), dec!(0.1));
        assert_eq!(jane.accounts()[1].term_weeks(), 10);
        assert_eq!(jane.accounts()[1].weekly_amount(), dec!(1250.5));

        let bob = store.find("bob smith").unwrap();
        assert!(!bob.is_resident());
        assert_eq!(bob.tax(), dec!(8700));
        assert_eq!(bob.account_count(), 0);
    }

    #[test]
    fn test_decode_resident_flag_is_case_sensitive() {
        let input = "name Al Bee\ngross salary 1\nresident Y\nexpenses 0\nno accounts";
        let mut store = ClientStore::new();
        decode_str(input, &mut store).unwrap();
        assert!(!store.find("Al Bee").unwrap().is_resident());
    }

    #[test]
    fn test_decode_ignores_lines_before_first_name() {
        let input = format!("clients exported\n\n{}", TWO_CLIENTS);
        let mut store = ClientStore::new();
        assert_eq!(decode_str(&input, &mut store).unwrap().added, 2);
    }

    #[test]
    fn test_decode_invalid_number_aborts() {
        let input = "name Al Bee\ngross salary lots\nresident y\nexpenses 0\nno accounts";
        let mut store = ClientStore::new();

        match decode_str(input, &mut store) {
            Err(AdvisorError::InvalidField { line, field, value }) => {
                assert_eq!(line, 2);
                assert_eq!(field, FIELD_GROSS_SALARY);
                assert_eq!(value, "lots");
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_decode_invalid_weeks_aborts() {
        let input = "name Al Bee\ngross salary 1\nresident y\nexpenses 0\n\naccount 1\nrate 0.1\nweeks 4.5\namount 10";
        let mut store = ClientStore::new();
        assert!(matches!(
            decode_str(input, &mut store),
            Err(AdvisorError::InvalidField { field: FIELD_WEEKS, line: 8, .. })
        ));
    }

    #[test]
    fn test_decode_truncated_header() {
        let input = "name Al Bee\ngross salary 1\nresident y";
        let mut store = ClientStore::new();
        match decode_str(input, &mut store) {
            Err(AdvisorError::TruncatedRecord { line, name }) => {
                assert_eq!(line, 1);
                assert_eq!(name, "Al Bee");
            }
            other => panic!("Expected TruncatedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_skips_existing_clients() {
        let mut store = ClientStore::new();
        store.add(Client::new("Bob Smith", dec!(1), true));

        match decode_str(TWO_CLIENTS, &mut store) {
            Err(AdvisorError::DuplicateClients { names, added }) => {
                assert_eq!(names, vec!["Bob Smith".to_string()]);
                assert_eq!(added, 1);
            }
            other => panic!("Expected DuplicateClients, got {:?}", other),
        }

        assert_eq!(store.count(), 2);
        assert_eq!(store.find("Bob Smith").unwrap().gross_annual_salary(), dec!(1));
    }

    #[test]
    fn test_decode_reports_duplicate_name_as_written() {
        let mut store = ClientStore::new();
        store.add(Client::new("Jane Doe", dec!(50000), true));

        let input = "name JANE DOE\ngross salary 1\nresident n\nexpenses 0\n\nno accounts";
        match decode_str(input, &mut store) {
            Err(AdvisorError::DuplicateClients { names, added }) => {
                assert_eq!(names, vec!["JANE DOE".to_string()]);
                assert_eq!(added, 0);
            }
            other => panic!("Expected DuplicateClients, got {:?}", other),
        }
        assert_eq!(store.count(), 1);
        assert_eq!(store.find("jane doe").unwrap().gross_annual_salary(), dec!(50000));
    }

    #[test]
    fn test_decode_fourth_account_is_dropped() {
        let input = "name Al Bee\ngross salary 90000\nresident y\nexpenses 0\n
account 1\nrate 0.1\nweeks 4\namount 1
account 2\nrate 0.1\nweeks 4\namount 2
account 3\nrate 0.1\nweeks 4\namount 3
account 4\nrate 0.1\nweeks 4\namount 4";
        let mut store = ClientStore::new();
        decode_str(input, &mut store).unwrap();
        assert_eq!(store.find("Al Bee").unwrap().total_invested(), dec!(6));
    }

    #[test]
    fn test_encode_client_layout() {
        let mut client = Client::new("jane doe", dec!(85000), true);
        client.set_weekly_expenses(dec!(1350.25));
        client.add_account(dec!(0.050), 12, dec!(1000));

        assert_eq!(
            encode_client(&client),
            "name Jane Doe\ngross salary 85,000\nresident y\nexpenses 1,350.25\n\n\
             account 1\nrate 0.05\nweeks 12\namount 1,000\n\n"
        );
    }

    #[test]
    fn test_encode_client_without_accounts() {
        let client = Client::new("bob smith", dec!(30000), false);
        assert_eq!(
            encode_client(&client),
            "name Bob Smith\ngross salary 30,000\nresident n\nexpenses 0\n\nno accounts\n\n"
        );
    }

    #[test]
    fn test_encode_keeps_store_order_and_trims() {
        let mut store = ClientStore::new();
        store.add(Client::new("Zed Young", dec!(1), true));
        store.add(Client::new("Abe Lin", dec!(2), true));

        let encoded = encode(&store);
        assert!(encoded.starts_with("name Zed Young"));
        assert!(encoded.ends_with("no accounts"));
        assert!(encoded.find("Zed Young").unwrap() < encoded.find("Abe Lin").unwrap());
    }

    #[test]
    fn test_encode_empty_store() {
        assert_eq!(encode(&ClientStore::new()), "");
    }

    #[test]
    fn test_round_trip() {
        let mut store = ClientStore::new();
        decode_str(TWO_CLIENTS, &mut store).unwrap();

        let mut reloaded = ClientStore::new();
        decode_str(&encode(&store), &mut reloaded).unwrap();

        let original: Vec<&Client> = store.iter().collect();
        let copy: Vec<&Client> = reloaded.iter().collect();
        assert_eq!(original, copy);
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name(Path::new("clients.dat")).is_ok());
        assert!(validate_file_name(Path::new("dir/clients.TXT")).is_ok());
        assert!(matches!(
            validate_file_name(Path::new("clients.csv")),
            Err(AdvisorError::InvalidFileName { .. })
        ));
        assert!(validate_file_name(Path::new("clients")).is_err());
    }
}
