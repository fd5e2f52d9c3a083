//! Amortizing-loan and compound-growth formulas
//!
//! Rates are annual percentages compounded monthly: `r = rate / 12 / 100`,
//! `n = years * 12`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// What the financial calculator is asked to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalculationKind {
    #[default]
    Loan,
    Mortgage,
    /// Future value of a lump sum, no schedule
    Investment,
}

impl CalculationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loan => "Loan",
            Self::Mortgage => "Mortgage",
            Self::Investment => "Investment",
        }
    }

    /// Whether this kind produces an amortization schedule
    pub fn amortizes(&self) -> bool {
        matches!(self, Self::Loan | Self::Mortgage)
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CalculationKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loan" => Ok(Self::Loan),
            "mortgage" => Ok(Self::Mortgage),
            "investment" | "invest" => Ok(Self::Investment),
            other => Err(CalcError::Validation(format!(
                "Unknown calculation type: '{}'",
                other
            ))),
        }
    }
}

/// Parse a strictly positive, finite number from user input
pub fn parse_positive(label: &str, input: &str) -> CalcResult<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| {
            CalcError::Validation(format!("{} must be a number, got '{}'", label, input))
        })?;
    check_positive(label, value)
}

fn check_positive(label: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::Validation(format!("{} must be a number", label)));
    }
    if value <= 0.0 {
        return Err(CalcError::Validation(format!(
            "{} must be positive, got {}",
            label, value
        )));
    }
    Ok(value)
}

/// Principal, annual rate and term of a loan or investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual rate in percent, e.g. `5.0` for 5%
    pub annual_rate_percent: f64,
    pub years: f64,
}

impl LoanTerms {
    /// Validate numeric terms
    pub fn new(principal: f64, annual_rate_percent: f64, years: f64) -> CalcResult<Self> {
        let terms = Self {
            principal: check_positive("Principal", principal)?,
            annual_rate_percent: check_positive("Interest rate", annual_rate_percent)?,
            years: check_positive("Term", years)?,
        };
        terms.payment_count()?;
        Ok(terms)
    }

    /// Validate terms typed as text
    pub fn parse(principal: &str, annual_rate_percent: &str, years: &str) -> CalcResult<Self> {
        Self::new(
            parse_positive("Principal", principal)?,
            parse_positive("Interest rate", annual_rate_percent)?,
            parse_positive("Term", years)?,
        )
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }

    /// Number of monthly payments; the term must cover whole months
    pub fn payment_count(&self) -> CalcResult<u32> {
        let months = self.years * 12.0;
        let rounded = months.round();
        if (months - rounded).abs() > 1e-9 || rounded < 1.0 || rounded > u32::MAX as f64 {
            return Err(CalcError::Validation(format!(
                "Term must be a whole number of months, got {} years",
                self.years
            )));
        }
        Ok(rounded as u32)
    }
}

/// Equal monthly installment: `P·r·(1+r)^n / ((1+r)^n − 1)`
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, years: f64) -> CalcResult<f64> {
    let terms = LoanTerms::new(principal, annual_rate_percent, years)?;
    payment_for(&terms)
}

/// `(1+r)^n`, rejected once it leaves the finite range
fn growth_factor(terms: &LoanTerms) -> CalcResult<f64> {
    let growth = (1.0 + terms.monthly_rate()).powf(terms.years * 12.0);
    if growth.is_finite() {
        Ok(growth)
    } else {
        Err(CalcError::Domain(format!(
            "Rate and term too large to compute: {}% over {} years",
            terms.annual_rate_percent, terms.years
        )))
    }
}

fn finite_result(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Domain("Result is out of range".into()))
    }
}

fn payment_for(terms: &LoanTerms) -> CalcResult<f64> {
    let r = terms.monthly_rate();
    let growth = growth_factor(terms)?;
    finite_result(terms.principal * r * growth / (growth - 1.0))
}

/// Compound growth with monthly compounding: `P·(1+r)^n`
pub fn future_value(principal: f64, annual_rate_percent: f64, years: f64) -> CalcResult<f64> {
    let terms = LoanTerms::new(principal, annual_rate_percent, years)?;
    finite_result(terms.principal * growth_factor(&terms)?)
}

/// Rows reserved up front when building a schedule (a 30-year mortgage)
const SCHEDULE_RESERVE: usize = 360;

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month number
    pub payment_index: u32,
    pub payment_amount: f64,
    pub principal_portion: f64,
    pub interest_portion: f64,
    /// Never negative
    pub remaining_balance: f64,
}

/// Month-by-month breakdown of `payment` against the loan
///
/// Stops after `years * 12` rows or as soon as the balance reaches zero,
/// whichever comes first.
pub fn build_schedule(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    payment: f64,
) -> CalcResult<Vec<AmortizationRow>> {
    let terms = LoanTerms::new(principal, annual_rate_percent, years)?;
    let payment = check_positive("Payment", payment)?;
    let r = terms.monthly_rate();
    let count = terms.payment_count()?;

    // Overpayment ends the schedule early, so size for a typical term only
    let mut rows = Vec::with_capacity((count as usize).min(SCHEDULE_RESERVE));
    let mut balance = terms.principal;
    for index in 1..=count {
        let interest = balance * r;
        let principal_portion = payment - interest;
        balance -= principal_portion;
        rows.push(AmortizationRow {
            payment_index: index,
            payment_amount: payment,
            principal_portion,
            interest_portion: interest,
            remaining_balance: balance.max(0.0),
        });
        if balance <= 0.0 {
            break;
        }
    }
    Ok(rows)
}

/// Totals over a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub payments: usize,
    pub total_paid: f64,
    pub total_interest: f64,
}

impl ScheduleSummary {
    pub fn from_rows(rows: &[AmortizationRow]) -> Self {
        Self {
            payments: rows.len(),
            total_paid: rows.iter().map(|r| r.payment_amount).sum(),
            total_interest: rows.iter().map(|r| r.interest_portion).sum(),
        }
    }
}

/// Outcome of one financial calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialResult {
    pub kind: CalculationKind,
    pub terms: LoanTerms,
    /// Monthly payment for loans, final value for investments
    pub value: f64,
    pub schedule: Vec<AmortizationRow>,
}

impl FinancialResult {
    pub fn summary(&self) -> Option<ScheduleSummary> {
        if self.schedule.is_empty() {
            None
        } else {
            Some(ScheduleSummary::from_rows(&self.schedule))
        }
    }
}

/// Run a calculation of the given kind
pub fn evaluate(kind: CalculationKind, terms: LoanTerms) -> CalcResult<FinancialResult> {
    let (value, schedule) = if kind.amortizes() {
        let payment = payment_for(&terms)?;
        let schedule = build_schedule(
            terms.principal,
            terms.annual_rate_percent,
            terms.years,
            payment,
        )?;
        (payment, schedule)
    } else {
        let value = future_value(terms.principal, terms.annual_rate_percent, terms.years)?;
        (value, Vec::new())
    };

    Ok(FinancialResult {
        kind,
        terms,
        value,
        schedule,
    })
}
