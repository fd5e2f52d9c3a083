//! Financial calculator CLI command

use clap::Args;

use crate::calc::finance::{evaluate, CalculationKind, LoanTerms};
use crate::config::settings::Settings;
use crate::display::format_financial_result;
use crate::error::CalcResult;
use crate::models::ActivityKind;
use crate::services::ActivityService;
use crate::storage::Storage;

/// Arguments for `calcdeck finance`
#[derive(Args)]
pub struct FinanceArgs {
    /// loan, mortgage or investment
    pub kind: String,
    /// Amount borrowed or invested
    pub principal: String,
    /// Annual interest rate in percent
    pub rate: String,
    /// Term in years
    pub years: String,

    /// Print the month-by-month amortization schedule
    #[arg(short, long)]
    pub schedule: bool,
}

/// Handle `calcdeck finance`
pub fn handle_finance_command(
    storage: &Storage,
    settings: &Settings,
    args: FinanceArgs,
) -> CalcResult<()> {
    let kind: CalculationKind = args.kind.parse()?;
    let terms = LoanTerms::parse(&args.principal, &args.rate, &args.years)?;
    let result = evaluate(kind, terms)?;

    print!("{}", format_financial_result(&result, settings, args.schedule));

    ActivityService::new(storage).log_current(
        ActivityKind::Calculation,
        format!(
            "{} {} at {}% for {} years = {:.2}",
            kind.label(),
            args.principal.trim(),
            args.rate.trim(),
            args.years.trim(),
            result.value
        ),
    )?;
    Ok(())
}
