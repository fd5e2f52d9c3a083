//! Date difference and period arithmetic
//!
//! Differences are broken down with fixed divisors (365 days to a year,
//! 30 to a month). That breakdown is a display approximation and drifts on
//! ranges that span leap years or short months; `total_days` is exact.
//! Adding months or years is calendar-aware and clamps to the last valid day
//! of the target month (Jan 31 + 1 month = Feb 28/29).

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// ISO date layout used for parsing and output
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> CalcResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| CalcError::Format(format!("Invalid date '{}': {}", input.trim(), e)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Long form for display, e.g. `Monday, 15 January 2024`
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// Whole days between two dates, order-independent
pub fn diff_days(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// An approximate years/months/days breakdown of a day count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub total_days: i64,
    pub years: i64,
    pub months: i64,
    pub days: i64,
}

impl DateSpan {
    /// Break `total_days` down with 365-day years and 30-day months
    ///
    /// `days` is `total_days % 30`, independent of the year split, so the
    /// three parts do not always add back up to `total_days`.
    pub fn from_days(total_days: i64) -> Self {
        let total_days = total_days.abs();
        Self {
            total_days,
            years: total_days / 365,
            months: (total_days % 365) / 30,
            days: total_days % 30,
        }
    }

    pub fn between(a: NaiveDate, b: NaiveDate) -> Self {
        Self::from_days(diff_days(a, b))
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days ({} years, {} months, {} days)",
            self.total_days, self.years, self.months, self.days
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Days,
    Months,
    Years,
}

impl PeriodUnit {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Months => "months",
            Self::Years => "years",
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PeriodUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "day" | "days" => Ok(Self::Days),
            "m" | "month" | "months" => Ok(Self::Months),
            "y" | "year" | "years" => Ok(Self::Years),
            other => Err(CalcError::Validation(format!(
                "Unknown period unit: '{}'; use days, months or years",
                other
            ))),
        }
    }
}

fn out_of_range() -> CalcError {
    CalcError::Validation("Resulting date is out of range".into())
}

/// Shift a date by a signed amount of days, months or years
pub fn add_period(date: NaiveDate, amount: i64, unit: PeriodUnit) -> CalcResult<NaiveDate> {
    match unit {
        PeriodUnit::Days => {
            let delta = Duration::try_days(amount).ok_or_else(out_of_range)?;
            date.checked_add_signed(delta).ok_or_else(out_of_range)
        }
        PeriodUnit::Months => shift_months(date, amount),
        PeriodUnit::Years => shift_months(date, amount.checked_mul(12).ok_or_else(out_of_range)?),
    }
}

/// `add_period` with the amount negated
pub fn subtract_period(date: NaiveDate, amount: i64, unit: PeriodUnit) -> CalcResult<NaiveDate> {
    add_period(date, amount.checked_neg().ok_or_else(out_of_range)?, unit)
}

fn shift_months(date: NaiveDate, months: i64) -> CalcResult<NaiveDate> {
    let magnitude = u32::try_from(months.unsigned_abs()).map_err(|_| out_of_range())?;
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    };
    shifted.ok_or_else(out_of_range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(format_date(d("2024-02-29")), "2024-02-29");
        assert!(parse_date("2023-02-29").unwrap_err().is_format());
        assert!(parse_date("yesterday").unwrap_err().is_format());
        assert!(parse_date("").unwrap_err().is_format());
    }

    #[test]
    fn test_diff_is_order_independent() {
        let a = d("2024-01-01");
        let b = d("2024-03-01");
        assert_eq!(diff_days(a, b), 60);
        assert_eq!(diff_days(b, a), 60);
        assert_eq!(diff_days(a, a), 0);
    }

    #[test]
    fn test_span_breakdown_is_approximate() {
        let span = DateSpan::from_days(400);
        assert_eq!((span.years, span.months, span.days), (1, 1, 10));

        // 365 days: one year, but the day part is taken mod 30 on the total
        let span = DateSpan::from_days(365);
        assert_eq!((span.years, span.months, span.days), (1, 0, 5));

        let span = DateSpan::between(d("2024-01-01"), d("2025-01-01"));
        assert_eq!(span.total_days, 366);
        assert_eq!(span.to_string(), "366 days (1 years, 0 months, 6 days)");
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_period(d("2024-02-28"), 1, PeriodUnit::Days).unwrap(), d("2024-02-29"));
        assert_eq!(add_period(d("2024-01-01"), -1, PeriodUnit::Days).unwrap(), d("2023-12-31"));
    }

    #[test]
    fn test_add_months_clamps() {
        assert_eq!(add_period(d("2024-01-31"), 1, PeriodUnit::Months).unwrap(), d("2024-02-29"));
        assert_eq!(add_period(d("2023-01-31"), 1, PeriodUnit::Months).unwrap(), d("2023-02-28"));
        assert_eq!(add_period(d("2024-05-15"), -5, PeriodUnit::Months).unwrap(), d("2023-12-15"));
    }

    #[test]
    fn test_add_years_respects_leap_day() {
        assert_eq!(add_period(d("2024-02-29"), 1, PeriodUnit::Years).unwrap(), d("2025-02-28"));
        assert_eq!(add_period(d("2024-02-29"), 4, PeriodUnit::Years).unwrap(), d("2028-02-29"));
    }

    #[test]
    fn test_subtract_period() {
        assert_eq!(
            subtract_period(d("2024-03-31"), 1, PeriodUnit::Months).unwrap(),
            d("2024-02-29")
        );
        assert_eq!(
            subtract_period(d("2024-01-10"), 10, PeriodUnit::Days).unwrap(),
            d("2023-12-31")
        );
    }

    #[test]
    fn test_out_of_range() {
        assert!(add_period(d("2024-01-01"), i64::MAX, PeriodUnit::Days)
            .unwrap_err()
            .is_validation());
        assert!(add_period(d("2024-01-01"), 10_000_000, PeriodUnit::Years).is_err());
        assert!(subtract_period(d("2024-01-01"), i64::MIN, PeriodUnit::Days).is_err());
    }

    #[test]
    fn test_period_unit_parse() {
        assert_eq!("Months".parse::<PeriodUnit>().unwrap(), PeriodUnit::Months);
        assert_eq!("y".parse::<PeriodUnit>().unwrap(), PeriodUnit::Years);
        assert!("weeks".parse::<PeriodUnit>().is_err());
    }
}
