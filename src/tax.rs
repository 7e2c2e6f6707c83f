//! Progressive income tax and medicare levy.
//!
//! Two bracket tables are selected by residency. Each bracket applies its
//! marginal rate to the income above the previous threshold and adds the
//! cumulative tax of all lower brackets.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Gross salary at or above which residents pay the medicare levy.
pub const MEDICARE_LEVY_THRESHOLD: Decimal = dec!(20000);

/// Medicare levy rate applied to the whole gross salary.
pub const MEDICARE_LEVY_RATE: Decimal = dec!(0.015);

/// A progressive bracket table.
///
/// `rates` and `base_tax` hold one entry per bracket, which is one more than
/// the number of `thresholds`. The last bracket is open ended.
#[derive(Debug, Clone, Copy)]
pub struct TaxTable {
    thresholds: &'static [Decimal],
    rates: &'static [Decimal],
    base_tax: &'static [Decimal],
}

/// Brackets for residents.
pub static RESIDENT: TaxTable = TaxTable {
    thresholds: &[dec!(6000), dec!(37000), dec!(80000), dec!(180000)],
    rates: &[dec!(0), dec!(0.15), dec!(0.30), dec!(0.37), dec!(0.45)],
    base_tax: &[dec!(0), dec!(0), dec!(4650), dec!(17550), dec!(54550)],
};

/// Brackets for non-residents.
pub static NON_RESIDENT: TaxTable = TaxTable {
    thresholds: &[dec!(37000), dec!(80000), dec!(180000)],
    rates: &[dec!(0.29), dec!(0.30), dec!(0.37), dec!(0.45)],
    base_tax: &[dec!(0), dec!(10730), dec!(23630), dec!(60630)],
};

impl TaxTable {
    /// Returns the table for the given residency.
    pub fn for_residency(resident: bool) -> &'static TaxTable {
        if resident {
            &RESIDENT
        } else {
            &NON_RESIDENT
        }
    }

    /// Computes income tax on `salary`.
    ///
    /// A salary equal to a threshold falls in the lower bracket. Zero and
    /// negative salaries use the first bracket formula unchanged.
    pub fn tax_on(&self, salary: Decimal) -> Decimal {
        let mut floor = Decimal::ZERO;
        for (bracket, threshold) in self.thresholds.iter().enumerate() {
            if salary <= *threshold {
                return (salary - floor) * self.rates[bracket] + self.base_tax[bracket];
            }
            floor = *threshold;
        }

        let top = self.thresholds.len();
        (salary - floor) * self.rates[top] + self.base_tax[top]
    }
}

/// Derived figures for one salary and residency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaxAssessment {
    pub tax: Decimal,
    pub medicare_levy: Decimal,
    pub net_annual_salary: Decimal,
}

/// Computes tax, medicare levy and net salary.
///
/// # Examples
///
/// ```
/// use investment_advisor::tax;
/// use rust_decimal_macros::dec;
///
/// let assessment = tax::compute(dec!(50000), true);
/// assert_eq!(assessment.tax, dec!(8550));
/// assert_eq!(assessment.medicare_levy, dec!(750));
/// assert_eq!(assessment.net_annual_salary, dec!(40700));
/// ```
pub fn compute(gross_annual_salary: Decimal, resident: bool) -> TaxAssessment {
    let tax = TaxTable::for_residency(resident).tax_on(gross_annual_salary);
    let medicare_levy = medicare_levy(gross_annual_salary, resident);

    TaxAssessment {
        tax,
        medicare_levy,
        net_annual_salary: gross_annual_salary - tax - medicare_levy,
    }
}

/// Medicare levy; always zero for non-residents.
pub fn medicare_levy(gross_annual_salary: Decimal, resident: bool) -> Decimal {
    if resident && gross_annual_salary >= MEDICARE_LEVY_THRESHOLD {
        gross_annual_salary * MEDICARE_LEVY_RATE
    } else {
        Decimal::ZERO
    }
}
