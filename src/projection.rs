//! Compound growth of a weekly investment.
//!
//! Contributions accrue every week but interest compounds once per four-week
//! period, at one thirteenth of the annual rate. When the term is not a
//! multiple of four, the trailing short period adds its contributions
//! without earning interest.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Weeks in one compounding period.
pub const WEEKS_PER_PERIOD: u32 = 4;

/// Compounding periods per year.
pub const PERIODS_PER_YEAR: Decimal = dec!(13);

/// Balance at the end of a compounding period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionPoint {
    /// Week number the period ends on (1-based).
    pub week: u32,
    pub balance: Decimal,
}

/// Iterator over the compounding boundaries of one investment.
///
/// Yields `ceil(term_weeks / 4)` points. A new [`Projection`] built from the
/// same inputs replays the same sequence.
///
/// Terms are expected in `1..=48` weeks
/// ([`MAX_TERM_WEEKS`](crate::account::MAX_TERM_WEEKS), checked by
/// [`Account::validate`](crate::account::Account::validate)). Longer terms
/// yield proportionally more points, and extreme terms or rates can overflow
/// `Decimal` arithmetic.
#[derive(Debug, Clone)]
pub struct Projection {
    rate: Decimal,
    term_weeks: u32,
    weekly_amount: Decimal,
    week: u32,
    balance: Decimal,
}

impl Projection {
    pub fn new(rate: Decimal, term_weeks: u32, weekly_amount: Decimal) -> Self {
        Projection {
            rate,
            term_weeks,
            weekly_amount,
            week: 0,
            balance: Decimal::ZERO,
        }
    }
}

impl Iterator for Projection {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.week >= self.term_weeks {
            return None;
        }

        let period = (self.term_weeks - self.week).min(WEEKS_PER_PERIOD);
        let multiplier = if period == WEEKS_PER_PERIOD {
            Decimal::ONE + self.rate / PERIODS_PER_YEAR
        } else {
            Decimal::ONE
        };

        self.week += period;
        self.balance = (self.balance + self.weekly_amount * Decimal::from(period)) * multiplier;

        Some(ProjectionPoint {
            week: self.week,
            balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.term_weeks.saturating_sub(self.week);
        let points = remaining.div_ceil(WEEKS_PER_PERIOD) as usize;
        (points, Some(points))
    }
}

impl ExactSizeIterator for Projection {}

/// Balance after every compounding period.
pub fn project(rate: Decimal, term_weeks: u32, weekly_amount: Decimal) -> Vec<ProjectionPoint> {
    Projection::new(rate, term_weeks, weekly_amount).collect()
}

/// Balance at maturity; zero for a zero-week term.
pub fn project_final(rate: Decimal, term_weeks: u32, weekly_amount: Decimal) -> Decimal {
    Projection::new(rate, term_weeks, weekly_amount)
        .last()
        .map(|point| point.balance)
        .unwrap_or(Decimal::ZERO)
}
