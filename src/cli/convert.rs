//! Unit converter CLI commands

use clap::Args;

use crate::calc::units::{ConversionRequest, UnitCategory};
use crate::display::format_significant;
use crate::error::CalcResult;
use crate::models::ActivityKind;
use crate::services::ActivityService;
use crate::storage::Storage;

/// Significant digits shown for conversions
const CONVERSION_DIGITS: usize = 6;

/// Arguments for `calcdeck convert`
#[derive(Args)]
pub struct ConvertArgs {
    /// length, mass, temperature, area, volume or time
    pub category: String,
    #[arg(allow_hyphen_values = true)]
    pub value: String,
    pub from: String,
    pub to: String,
}

/// Handle `calcdeck convert`
pub fn handle_convert_command(storage: &Storage, args: ConvertArgs) -> CalcResult<()> {
    let request = ConversionRequest::parse(&args.category, &args.value, &args.from, &args.to)?;
    let result = format_significant(request.evaluate()?, CONVERSION_DIGITS);
    println!("{}", result);

    ActivityService::new(storage).log_current(
        ActivityKind::Calculation,
        format!(
            "{} {} = {} {}",
            request.value, request.from_unit, result, request.to_unit
        ),
    )?;
    Ok(())
}

/// Handle `calcdeck units`: list units for one or every category
pub fn handle_units_command(category: Option<String>) -> CalcResult<()> {
    let categories = match category {
        Some(name) => vec![name.parse::<UnitCategory>()?],
        None => UnitCategory::ALL.to_vec(),
    };
    for category in categories {
        println!("{:<12} {}", category.name(), category.units().join(", "));
    }
    Ok(())
}
