//! The numeric core
//!
//! Pure functions and value types with no I/O: the keypad state machine,
//! base conversion, financial formulas, date arithmetic, unit and currency
//! conversion, and the coin-flip game.

pub mod arithmetic;
pub mod coin;
pub mod dates;
pub mod exchange;
pub mod finance;
pub mod radix;
pub mod state;
pub mod units;

pub use arithmetic::{calculate, format_result, Operator, ScientificFn};
pub use coin::{CoinFace, CoinGame, CoinSource, OsRngSource};
pub use dates::{add_period, diff_days, parse_date, subtract_period, DateSpan, PeriodUnit};
pub use exchange::{convert_currency, sanitize_amount_input, RateTable};
pub use finance::{
    build_schedule, future_value, monthly_payment, AmortizationRow, CalculationKind, LoanTerms,
};
pub use radix::{convert_base, BitwiseOp, Radix};
pub use state::{Action, Calculator, CalculatorState, MemoryOp, Transition};
pub use units::{convert, UnitCategory};
