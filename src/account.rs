//! A single investment held by a client.

use crate::error::{AdvisorError, Result};
use crate::projection::{self, ProjectionPoint};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Longest accepted investment term, in weeks.
pub const MAX_TERM_WEEKS: u32 = 48;

/// Lowest accepted annual rate (1%).
pub const MIN_RATE: Decimal = dec!(0.01);

/// Highest accepted annual rate (100%).
pub const MAX_RATE: Decimal = dec!(1);

/// A weekly investment at a fixed annual rate.
///
/// Values are stored as given. Callers that take user input should check
/// them with [`Account::validate`] before building the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Annual interest rate as a fraction (`0.05` is 5%).
    rate: Decimal,

    /// Investment length in weeks.
    term_weeks: u32,

    /// Amount invested every week.
    weekly_amount: Decimal,
}

impl Account {
    pub fn new(rate: Decimal, term_weeks: u32, weekly_amount: Decimal) -> Self {
        Account {
            rate,
            term_weeks,
            weekly_amount,
        }
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn set_rate(&mut self, rate: Decimal) {
        self.rate = rate;
    }

    pub fn term_weeks(&self) -> u32 {
        self.term_weeks
    }

    pub fn set_term_weeks(&mut self, term_weeks: u32) {
        self.term_weeks = term_weeks;
    }

    pub fn weekly_amount(&self) -> Decimal {
        self.weekly_amount
    }

    pub fn set_weekly_amount(&mut self, weekly_amount: Decimal) {
        self.weekly_amount = weekly_amount;
    }

    /// Projected balance at the end of the term.
    pub fn total_at_maturity(&self) -> Decimal {
        projection::project_final(self.rate, self.term_weeks, self.weekly_amount)
    }

    /// Balance after every compounding period.
    pub fn schedule(&self) -> Vec<ProjectionPoint> {
        projection::project(self.rate, self.term_weeks, self.weekly_amount)
    }

    /// Checks the accepted ranges: rate in `[0.01, 1]`, term in `[1, 48]`
    /// weeks and a positive weekly amount.
    pub fn validate(&self) -> Result<()> {
        if self.rate < MIN_RATE || self.rate > MAX_RATE {
            return Err(AdvisorError::InvalidAccount {
                field: "rate",
                value: self.rate.to_string(),
            });
        }
        if self.term_weeks == 0 || self.term_weeks > MAX_TERM_WEEKS {
            return Err(AdvisorError::InvalidAccount {
                field: "weeks",
                value: self.term_weeks.to_string(),
            });
        }
        if self.weekly_amount <= Decimal::ZERO {
            return Err(AdvisorError::InvalidAccount {
                field: "amount",
                value: self.weekly_amount.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_stores_values_as_given() {
        let account = Account::new(dec!(2.5), 0, dec!(-10));
        assert_eq!(account.rate(), dec!(2.5));
        assert_eq!(account.term_weeks(), 0);
        assert_eq!(account.weekly_amount(), dec!(-10));
    }

    #[test]
    fn test_total_at_maturity_matches_schedule() {
        let account = Account::new(dec!(0.13), 10, dec!(100));
        let schedule = account.schedule();

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.last().unwrap().balance, account.total_at_maturity());
        assert_eq!(account.total_at_maturity(), dec!(1012.04));
    }

    #[test]
    fn test_setters_change_projection() {
        let mut account = Account::new(dec!(0.13), 4, dec!(100));
        assert_eq!(account.total_at_maturity(), dec!(404));

        account.set_term_weeks(3);
        assert_eq!(account.total_at_maturity(), dec!(300));

        account.set_rate(dec!(0));
        account.set_weekly_amount(dec!(50));
        account.set_term_weeks(8);
        assert_eq!(account.total_at_maturity(), dec!(400));
    }

    #[test]
    fn test_validate_accepts_range_edges() {
        assert!(Account::new(dec!(0.01), 1, dec!(0.01)).validate().is_ok());
        assert!(Account::new(dec!(1), 48, dec!(1000)).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_fields() {
        let cases = [
            (Account::new(dec!(0.009), 10, dec!(10)), "rate"),
            (Account::new(dec!(1.01), 10, dec!(10)), "rate"),
            (Account::new(dec!(0.05), 0, dec!(10)), "weeks"),
            (Account::new(dec!(0.05), 49, dec!(10)), "weeks"),
            (Account::new(dec!(0.05), u32::MAX, dec!(10)), "weeks"),
            (Account::new(dec!(0.05), 10, dec!(0)), "amount"),
        ];

        for (account, expected) in cases {
            match account.validate() {
                Err(AdvisorError::InvalidAccount { field, .. }) => assert_eq!(field, expected),
                other => panic!("Expected InvalidAccount for {}, got {:?}", expected, other),
            }
        }
    }
}
