//! Financial result and amortization schedule formatting

use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use super::number::{format_currency, format_grouped};
use crate::calc::finance::{AmortizationRow, FinancialResult};
use crate::config::settings::Settings;

#[derive(Tabled)]
struct ScheduleLine {
    #[tabled(rename = "#")]
    index: u32,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Render schedule rows as a table
pub fn format_schedule(rows: &[AmortizationRow], settings: &Settings) -> String {
    if rows.is_empty() {
        return "No payments.".to_string();
    }

    let money = |v: f64| format_currency(v, &settings.currency_symbol, &settings.number_format);
    let lines = rows.iter().map(|row| ScheduleLine {
        index: row.payment_index,
        payment: money(row.payment_amount),
        principal: money(row.principal_portion),
        interest: money(row.interest_portion),
        balance: money(row.remaining_balance),
    });

    Table::new(lines)
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right())
        .to_string()
}

/// Headline result plus, for amortizing kinds, the summary and schedule
pub fn format_financial_result(
    result: &FinancialResult,
    settings: &Settings,
    show_schedule: bool,
) -> String {
    let money = |v: f64| format_currency(v, &settings.currency_symbol, &settings.number_format);
    let terms = &result.terms;

    let mut output = String::new();
    output.push_str(&format!(
        "{}: {} at {}% for {} years\n",
        result.kind.label(),
        money(terms.principal),
        format_grouped(terms.annual_rate_percent, 0, 4, &settings.number_format),
        format_grouped(terms.years, 0, 2, &settings.number_format),
    ));

    match result.summary() {
        Some(summary) => {
            output.push_str(&format!("Monthly payment: {}\n", money(result.value)));
            output.push_str(&format!("Payments:        {}\n", summary.payments));
            output.push_str(&format!("Total paid:      {}\n", money(summary.total_paid)));
            output.push_str(&format!("Total interest:  {}\n", money(summary.total_interest)));
            if show_schedule {
                output.push('\n');
                output.push_str(&format_schedule(&result.schedule, settings));
                output.push('\n');
            }
        }
        None => {
            output.push_str(&format!("Future value:    {}\n", money(result.value)));
            output.push_str(&format!(
                "Growth:          {}\n",
                money(result.value - terms.principal)
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::finance::{evaluate, CalculationKind, LoanTerms};

    #[test]
    fn test_loan_output_has_schedule() {
        let terms = LoanTerms::new(1200.0, 12.0, 1.0).unwrap();
        let result = evaluate(CalculationKind::Loan, terms).unwrap();
        let text = format_financial_result(&result, &Settings::default(), true);

        assert!(text.contains("Monthly payment: $106.62"));
        assert!(text.contains("Payments:        12"));
        assert!(text.contains("Principal"));
        assert!(text.lines().count() > 12);
    }

    #[test]
    fn test_investment_output() {
        let terms = LoanTerms::new(1000.0, 12.0, 1.0).unwrap();
        let result = evaluate(CalculationKind::Investment, terms).unwrap();
        let text = format_financial_result(&result, &Settings::default(), true);

        assert!(text.contains("Future value:    $1,126.83"));
        assert!(!text.contains("Principal"));
    }

    #[test]
    fn test_empty_schedule() {
        assert_eq!(format_schedule(&[], &Settings::default()), "No payments.");
    }
}
