//! Client model: personal and tax data plus up to three accounts.
//!
//! Derived tax figures are not kept in sync automatically. After changing
//! the gross salary or residency, call [`Client::recompute_tax`] before
//! reading `tax`, `medicare_levy` or `net_annual_salary`.

use crate::account::Account;
use crate::decimal::round2;
use crate::error::{AdvisorError, Result};
use crate::projection::ProjectionPoint;
use crate::tax;
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Maximum number of accounts a client can hold.
pub const MAX_ACCOUNTS: usize = 3;

/// Weeks used to convert annual figures to weekly ones.
pub const WEEKS_PER_YEAR: Decimal = dec!(52);

/// An advisory client.
///
/// # Invariants
///
/// - The name is always stored title-cased with single spaces
/// - At most [`MAX_ACCOUNTS`] accounts are held, in insertion order
///
/// Keeping total weekly investment within [`Client::available_funds`] is
/// the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Client {
    name: String,
    gross_annual_salary: Decimal,
    resident: bool,
    tax: Decimal,
    medicare_levy: Decimal,
    net_annual_salary: Decimal,
    weekly_expenses: Decimal,
    accounts: Vec<Account>,
}

/// One account together with its position and growth schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetail<'a> {
    /// 1-based position among the client's accounts.
    pub number: usize,
    pub account: &'a Account,
    pub schedule: Vec<ProjectionPoint>,
}

impl Client {
    /// Creates a client with no expenses and no accounts.
    ///
    /// Derived tax figures stay zero until [`Client::recompute_tax`] runs.
    pub fn new(name: &str, gross_annual_salary: Decimal, resident: bool) -> Self {
        Client {
            name: normalize_name(name),
            gross_annual_salary,
            resident,
            accounts: Vec::with_capacity(MAX_ACCOUNTS),
            ..Client::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the name, title-casing every word.
    pub fn set_name(&mut self, name: &str) {
        self.name = normalize_name(name);
    }

    pub fn gross_annual_salary(&self) -> Decimal {
        self.gross_annual_salary
    }

    pub fn set_gross_annual_salary(&mut self, gross_annual_salary: Decimal) {
        self.gross_annual_salary = gross_annual_salary;
    }

    pub fn is_resident(&self) -> bool {
        self.resident
    }

    pub fn set_resident(&mut self, resident: bool) {
        self.resident = resident;
    }

    pub fn weekly_expenses(&self) -> Decimal {
        self.weekly_expenses
    }

    pub fn set_weekly_expenses(&mut self, weekly_expenses: Decimal) {
        self.weekly_expenses = weekly_expenses;
    }

    pub fn tax(&self) -> Decimal {
        self.tax
    }

    pub fn medicare_levy(&self) -> Decimal {
        self.medicare_levy
    }

    pub fn net_annual_salary(&self) -> Decimal {
        self.net_annual_salary
    }

    /// Recalculates tax, medicare levy and net salary from the current
    /// gross salary and residency.
    pub fn recompute_tax(&mut self) {
        let assessment = tax::compute(self.gross_annual_salary, self.resident);
        self.tax = assessment.tax;
        self.medicare_levy = assessment.medicare_levy;
        self.net_annual_salary = assessment.net_annual_salary;
    }

    pub fn weekly_gross_salary(&self) -> Decimal {
        to_weekly(self.gross_annual_salary)
    }

    pub fn weekly_tax(&self) -> Decimal {
        to_weekly(self.tax)
    }

    pub fn weekly_medicare_levy(&self) -> Decimal {
        to_weekly(self.medicare_levy)
    }

    pub fn weekly_net_salary(&self) -> Decimal {
        to_weekly(self.net_annual_salary)
    }

    /// Weekly net salary left after expenses, rounded to cents.
    ///
    /// Comparisons against [`Client::total_invested`] must use this rounded
    /// value.
    pub fn available_funds(&self) -> Decimal {
        round2(self.net_annual_salary / WEEKS_PER_YEAR - self.weekly_expenses)
    }

    /// Sum of weekly amounts across all accounts.
    pub fn total_invested(&self) -> Decimal {
        self.accounts.iter().map(Account::weekly_amount).sum()
    }

    /// Available funds not yet committed to an account.
    pub fn investable_funds(&self) -> Decimal {
        round2(self.available_funds() - self.total_invested())
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn can_add_account(&self) -> bool {
        self.accounts.len() < MAX_ACCOUNTS
    }

    /// Appends an account.
    ///
    /// Does nothing when the client already holds [`MAX_ACCOUNTS`] accounts;
    /// callers check [`Client::can_add_account`] first.
    pub fn add_account(&mut self, rate: Decimal, term_weeks: u32, weekly_amount: Decimal) {
        if !self.can_add_account() {
            warn!(
                "Client {} already holds {} accounts, ignoring new account",
                self.name, MAX_ACCOUNTS
            );
            return;
        }
        self.accounts.push(Account::new(rate, term_weeks, weekly_amount));
    }

    /// Removes the account at a 1-based position.
    ///
    /// Later accounts move up one position. Returns `false` when no account
    /// exists at that position.
    pub fn delete_account(&mut self, number: usize) -> bool {
        if number == 0 || number > self.accounts.len() {
            return false;
        }
        self.accounts.remove(number - 1);
        debug!("Deleted account #{} of client {}", number, self.name);
        true
    }

    /// Returns the account at a 1-based position with its projection.
    pub fn get_account(&self, number: usize) -> Result<AccountDetail<'_>> {
        let account = number
            .checked_sub(1)
            .and_then(|index| self.accounts.get(index))
            .ok_or(AdvisorError::AccountNotFound { index: number })?;

        Ok(AccountDetail {
            number,
            account,
            schedule: account.schedule(),
        })
    }
}

fn to_weekly(annual: Decimal) -> Decimal {
    round2(annual / WEEKS_PER_YEAR)
}

/// Title-cases every word and joins them with single spaces.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
