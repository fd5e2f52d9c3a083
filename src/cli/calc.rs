//! Calculator and programmer-mode CLI commands
//!
//! `calc` replays a key sequence through the keypad state machine; `base`
//! exposes radix conversion and bitwise operations directly.

use clap::{Args, Subcommand};

use crate::calc::radix::{bitwise, convert_base, representations, BitwiseOp, Radix};
use crate::calc::state::{Action, Calculator};
use crate::config::settings::Settings;
use crate::display::{format_history, format_representations};
use crate::error::CalcResult;
use crate::models::ActivityKind;
use crate::services::{ActivityService, HistoryService};
use crate::storage::Storage;

/// Arguments for `calcdeck calc`
#[derive(Args)]
pub struct CalcArgs {
    /// Keys separated by spaces, e.g. `7 + 3 =` or `2 sqrt`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Start in this base (2, 8, 10 or 16)
    #[arg(short, long, default_value_t = 10)]
    pub base: u32,

    /// Decimal places kept in results (defaults to the setting)
    #[arg(short, long)]
    pub precision: Option<usize>,

    /// Also print the calculations completed along the way
    #[arg(long)]
    pub history: bool,
}

/// Handle `calcdeck calc`
pub fn handle_calc_command(
    storage: &Storage,
    settings: &Settings,
    args: CalcArgs,
) -> CalcResult<()> {
    let radix = Radix::from_value(args.base)?;
    let actions = Action::parse_sequence(&args.keys.join(" "))?;

    let mut calc = Calculator::new(args.precision.unwrap_or(settings.precision));
    if radix != Radix::Decimal {
        calc.apply(Action::SetBase(radix))?;
    }
    let records = calc.apply_all(actions)?;

    println!("{}", calc.display());
    if args.history {
        println!("{}", format_history(calc.history()));
    }

    if let Some(session) = storage.users.session()? {
        if !records.is_empty() {
            HistoryService::new(storage).record(session.user_id, records.iter().cloned())?;
        }
        let kind = if radix == Radix::Decimal {
            ActivityKind::Calculation
        } else {
            ActivityKind::Programmer
        };
        let description = match records.last() {
            Some(entry) => entry.to_string(),
            None => format!("{} = {}", args.keys.join(" "), calc.display()),
        };
        ActivityService::new(storage).log(session.user_id, kind, description)?;
    }

    Ok(())
}

/// Programmer-mode subcommands
#[derive(Subcommand)]
pub enum BaseCommands {
    /// Convert a value between bases
    Convert {
        value: String,
        /// Base of the input
        #[arg(short, long, default_value_t = 10)]
        from: u32,
        /// Base of the output
        #[arg(short, long)]
        to: u32,
    },
    /// Show a value in binary, octal, decimal and hexadecimal
    Show {
        value: String,
        #[arg(short, long, default_value_t = 10)]
        from: u32,
    },
    /// Apply NOT, LSH or RSH with 32-bit semantics
    Bitwise {
        /// not, lsh or rsh
        op: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(short, long, default_value_t = 10)]
        from: u32,
    },
}

/// Handle `calcdeck base`
pub fn handle_base_command(storage: &Storage, cmd: BaseCommands) -> CalcResult<()> {
    let description = match cmd {
        BaseCommands::Convert { value, from, to } => {
            let converted = convert_base(&value, from, to)?;
            println!("{}", converted);
            format!("{} (base {}) = {} (base {})", value, from, converted, to)
        }
        BaseCommands::Show { value, from } => {
            let radix = Radix::from_value(from)?;
            println!("{}", format_representations(&representations(&value, radix)?));
            format!("{} (base {}) in all bases", value, from)
        }
        BaseCommands::Bitwise { op, value, from } => {
            let op: BitwiseOp = op.parse()?;
            let result = bitwise(&value, from, op)?;
            println!("{}", result);
            format!("{}({}) = {}", op.name(), value, result)
        }
    };

    ActivityService::new(storage).log_current(ActivityKind::Programmer, description)?;
    Ok(())
}
