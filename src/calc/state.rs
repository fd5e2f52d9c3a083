//! Calculator state machine
//!
//! [`CalculatorState::reduce`] is a pure transition `(state, action) -> state`
//! that also yields the history entry a completed calculation produces.
//! [`Calculator`] owns a state plus its history strip and applies the error
//! recovery policy: rejected input leaves the state alone, anything else
//! returns the calculator to its initial values (memory is kept).

use serde::{Deserialize, Serialize};

use super::arithmetic::{calculate, format_result, Operator, ScientificFn};
use super::radix::{digit_value, parse_integer, render_integer, wrap_i32, BitwiseOp, Radix};
use crate::error::{CalcError, CalcResult};
use crate::models::history::{BoundedLog, HistoryEntry, CALCULATOR_HISTORY_CAPACITY};

/// Default number of decimals in rendered results
pub const DEFAULT_PRECISION: usize = 8;

/// Memory keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryOp {
    /// MC
    Clear,
    /// MR
    Recall,
    /// M+
    Add,
    /// M-
    Subtract,
}

impl MemoryOp {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "MC",
            Self::Recall => "MR",
            Self::Add => "M+",
            Self::Subtract => "M-",
        }
    }
}

impl std::str::FromStr for MemoryOp {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MC" => Ok(Self::Clear),
            "MR" => Ok(Self::Recall),
            "M+" => Ok(Self::Add),
            "M-" => Ok(Self::Subtract),
            other => Err(CalcError::Validation(format!(
                "Unknown memory key: '{}'",
                other
            ))),
        }
    }
}

/// Everything a keypad can ask the calculator to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Digit(char),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    Scientific(ScientificFn),
    Percent,
    Memory(MemoryOp),
    SetBase(Radix),
    Bitwise(BitwiseOp),
}

impl Action {
    /// Parse a whitespace-separated key sequence such as `7 + 3 =`
    ///
    /// Number tokens expand into one digit action per character, so `12.5`
    /// becomes `1`, `2`, `.`, `5`. Digit validity is left to the state
    /// machine, which knows the active radix.
    pub fn parse_sequence(input: &str) -> CalcResult<Vec<Action>> {
        let mut actions = Vec::new();
        for token in input.split_whitespace() {
            actions.extend(Self::parse_token(token)?);
        }
        Ok(actions)
    }

    fn parse_token(token: &str) -> CalcResult<Vec<Action>> {
        let single = match token.to_lowercase().as_str() {
            "=" | "enter" => Some(Action::Equals),
            "clear" | "esc" => Some(Action::Clear),
            "%" | "percent" => Some(Action::Percent),
            "." => Some(Action::Decimal),
            _ => None,
        };
        if let Some(action) = single {
            return Ok(vec![action]);
        }

        if let Ok(op) = token.parse::<Operator>() {
            return Ok(vec![Action::Operator(op)]);
        }
        if let Ok(mem) = token.parse::<MemoryOp>() {
            return Ok(vec![Action::Memory(mem)]);
        }
        if let Ok(func) = token.parse::<ScientificFn>() {
            return Ok(vec![Action::Scientific(func)]);
        }
        if let Ok(op) = token.parse::<BitwiseOp>() {
            return Ok(vec![Action::Bitwise(op)]);
        }

        if token.chars().all(|c| c == '.' || digit_value(c).is_some()) {
            return Ok(token
                .chars()
                .map(|c| if c == '.' { Action::Decimal } else { Action::Digit(c) })
                .collect());
        }

        Err(CalcError::Validation(format!("Unknown key: '{}'", token)))
    }
}

/// Result of one transition
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: CalculatorState,

    /// Completed calculation, if the action produced one
    pub record: Option<HistoryEntry>,
}

impl Transition {
    fn quiet(state: CalculatorState) -> Self {
        Self {
            state,
            record: None,
        }
    }

    fn recorded(state: CalculatorState, record: HistoryEntry) -> Self {
        Self {
            state,
            record: Some(record),
        }
    }
}

/// Display, pending operation and memory of one calculator
///
/// `display` always parses as a number in `base`. When `new_number` is set
/// the next digit replaces the display instead of appending to it.
/// `awaiting_operand` is set between an operator press and the next value
/// reaching the display; while it is set a second operator only replaces the
/// pending one and `=` does nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub display: String,
    pub equation: String,
    pub operator: Option<Operator>,
    pub previous_value: f64,
    pub new_number: bool,
    #[serde(default)]
    pub awaiting_operand: bool,
    pub memory: f64,
    pub base: Radix,
    pub precision: usize,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            equation: String::new(),
            operator: None,
            previous_value: 0.0,
            new_number: true,
            awaiting_operand: false,
            memory: 0.0,
            base: Radix::Decimal,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl CalculatorState {
    pub fn with_precision(precision: usize) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    /// Initial values, keeping memory, radix and precision
    pub fn reset(&self) -> Self {
        Self {
            memory: self.memory,
            base: self.base,
            precision: self.precision,
            ..Self::default()
        }
    }

    /// Numeric value of the display in the active radix
    pub fn current_value(&self) -> CalcResult<f64> {
        match self.base {
            Radix::Decimal => self.display.parse::<f64>().map_err(|_| {
                CalcError::Format(format!("Display is not a number: '{}'", self.display))
            }),
            radix => parse_integer(&self.display, radix.value()).map(|v| v as f64),
        }
    }

    /// Integer value of the display; decimal displays are truncated
    pub fn integer_value(&self) -> CalcResult<i128> {
        match self.base {
            Radix::Decimal => to_integer(self.current_value()?),
            radix => parse_integer(&self.display, radix.value()),
        }
    }

    /// Render a value for this display
    pub fn render(&self, value: f64) -> CalcResult<String> {
        if !value.is_finite() {
            return Err(CalcError::Domain("Result is not a finite number".into()));
        }
        match self.base {
            Radix::Decimal => Ok(format_result(value, self.precision)),
            radix => Ok(render_integer(to_integer(value)?, radix.value())),
        }
    }

    /// Apply one action
    pub fn reduce(&self, action: Action) -> CalcResult<Transition> {
        match action {
            Action::Digit(c) => self.input_digit(c),
            Action::Decimal => self.input_decimal(),
            Action::Operator(op) => self.apply_operator(op),
            Action::Equals => self.equals(),
            Action::Clear => Ok(Transition::quiet(self.reset())),
            Action::Scientific(func) => self.apply_scientific(func),
            Action::Percent => self.percent(),
            Action::Memory(op) => self.memory(op),
            Action::SetBase(radix) => self.set_base(radix),
            Action::Bitwise(op) => self.bitwise(op),
        }
    }

    fn input_digit(&self, c: char) -> CalcResult<Transition> {
        if !self.base.accepts_digit(c) {
            return Err(CalcError::Format(format!(
                "'{}' is not a valid {} digit",
                c,
                self.base.label().to_lowercase()
            )));
        }
        let c = c.to_ascii_uppercase();

        let mut next = self.clone();
        if self.new_number || self.display == "0" {
            next.display = c.to_string();
        } else {
            next.display.push(c);
        }
        next.new_number = false;
        next.awaiting_operand = false;
        Ok(Transition::quiet(next))
    }

    fn input_decimal(&self) -> CalcResult<Transition> {
        if self.base != Radix::Decimal {
            return Err(CalcError::Format(
                "Decimal point is only available in base 10".into(),
            ));
        }

        let mut next = self.clone();
        if self.new_number {
            next.display = "0.".to_string();
        } else if !self.display.contains('.') {
            next.display.push('.');
        }
        next.new_number = false;
        next.awaiting_operand = false;
        Ok(Transition::quiet(next))
    }

    /// Fold the pending operator against the display
    fn fold(&self, op: Operator) -> CalcResult<(f64, String, HistoryEntry)> {
        let current = self.current_value()?;
        let result = calculate(self.previous_value, current, op)?;
        let rendered = self.render(result)?;
        let record = HistoryEntry::new(
            format!(
                "{} {} {}",
                self.render(self.previous_value)?,
                op.symbol(),
                self.display
            ),
            rendered.clone(),
        );
        let stored = match self.base {
            Radix::Decimal => result,
            _ => result.trunc(),
        };
        Ok((stored, rendered, record))
    }

    fn apply_operator(&self, op: Operator) -> CalcResult<Transition> {
        let mut next = self.clone();
        let mut record = None;

        match self.operator {
            Some(pending) if !self.awaiting_operand => {
                let (value, rendered, entry) = self.fold(pending)?;
                next.display = rendered;
                next.previous_value = value;
                record = Some(entry);
            }
            _ => {
                next.previous_value = self.current_value()?;
            }
        }

        next.equation = format!("{} {}", next.display, op.symbol());
        next.operator = Some(op);
        next.new_number = true;
        next.awaiting_operand = true;
        Ok(Transition {
            state: next,
            record,
        })
    }

    fn equals(&self) -> CalcResult<Transition> {
        let pending = match self.operator {
            Some(op) if !self.awaiting_operand => op,
            _ => return Ok(Transition::quiet(self.clone())),
        };

        let (value, rendered, record) = self.fold(pending)?;
        let mut next = self.clone();
        next.display = rendered;
        next.previous_value = value;
        next.operator = None;
        next.equation.clear();
        next.new_number = true;
        next.awaiting_operand = false;
        Ok(Transition::recorded(next, record))
    }

    fn require_decimal(&self, what: &str) -> CalcResult<()> {
        if self.base != Radix::Decimal {
            return Err(CalcError::Format(format!(
                "{} is only available in base 10",
                what
            )));
        }
        Ok(())
    }

    fn apply_scientific(&self, func: ScientificFn) -> CalcResult<Transition> {
        self.require_decimal(func.name())?;
        let result = func.apply(self.current_value()?)?;
        let rendered = self.render(result)?;

        let record = HistoryEntry::new(
            format!("{}({})", func.name(), self.display),
            rendered.clone(),
        );
        let mut next = self.clone();
        next.display = rendered;
        next.new_number = true;
        next.awaiting_operand = false;
        Ok(Transition::recorded(next, record))
    }

    fn percent(&self) -> CalcResult<Transition> {
        self.require_decimal("Percentage")?;
        let current = self.current_value()?;
        let rendered = self.render(self.previous_value * current / 100.0)?;

        let record = HistoryEntry::new(
            format!(
                "{} * {}%",
                self.render(self.previous_value)?,
                self.display
            ),
            rendered.clone(),
        );
        let mut next = self.clone();
        next.display = rendered;
        next.new_number = true;
        next.awaiting_operand = false;
        Ok(Transition::recorded(next, record))
    }

    fn memory(&self, op: MemoryOp) -> CalcResult<Transition> {
        let mut next = self.clone();
        match op {
            MemoryOp::Clear => next.memory = 0.0,
            MemoryOp::Recall => {
                next.display = self.render(self.memory)?;
                next.new_number = true;
                next.awaiting_operand = false;
            }
            MemoryOp::Add => next.memory = self.memory + self.current_value()?,
            MemoryOp::Subtract => next.memory = self.memory - self.current_value()?,
        }
        if !next.memory.is_finite() {
            return Err(CalcError::Domain("Memory overflow".into()));
        }
        Ok(Transition::quiet(next))
    }

    fn set_base(&self, radix: Radix) -> CalcResult<Transition> {
        if radix == self.base {
            return Ok(Transition::quiet(self.clone()));
        }

        let value = self.integer_value().map_err(conversion_failed)?;
        let mut next = self.clone();
        next.display = render_integer(value, radix.value());
        next.base = radix;
        next.new_number = true;
        next.awaiting_operand = false;
        Ok(Transition::quiet(next))
    }

    fn bitwise(&self, op: BitwiseOp) -> CalcResult<Transition> {
        let value = wrap_i32(self.integer_value().map_err(conversion_failed)?);
        let result = op.apply(value);
        let rendered = render_integer(result as i128, self.base.value());

        let record =
            HistoryEntry::new(format!("{}({})", op.name(), self.display), rendered.clone());
        let mut next = self.clone();
        next.display = rendered;
        next.new_number = true;
        next.awaiting_operand = false;
        Ok(Transition::recorded(next, record))
    }
}

/// Truncate toward zero into the integer working width
fn to_integer(value: f64) -> CalcResult<i128> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated.abs() >= 1e38 {
        return Err(CalcError::Validation(format!(
            "{} cannot be represented as an integer",
            value
        )));
    }
    Ok(truncated as i128)
}

/// A display that cannot be read as an integer resets the calculator
fn conversion_failed(err: CalcError) -> CalcError {
    match err {
        CalcError::Format(msg) => CalcError::Validation(msg),
        other => other,
    }
}

/// A calculator with its recent-history strip
#[derive(Debug, Clone)]
pub struct Calculator {
    state: CalculatorState,
    history: BoundedLog<HistoryEntry>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl Calculator {
    pub fn new(precision: usize) -> Self {
        Self {
            state: CalculatorState::with_precision(precision),
            history: BoundedLog::new(CALCULATOR_HISTORY_CAPACITY),
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn display(&self) -> &str {
        &self.state.display
    }

    pub fn history(&self) -> &BoundedLog<HistoryEntry> {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Apply an action, returning the history entry it produced
    ///
    /// On error the state is either left untouched (rejected input) or reset
    /// to its initial values, depending on [`CalcError::resets_state`].
    pub fn apply(&mut self, action: Action) -> CalcResult<Option<HistoryEntry>> {
        match self.state.reduce(action) {
            Ok(transition) => {
                self.state = transition.state;
                if let Some(record) = &transition.record {
                    self.history.push(record.clone());
                }
                Ok(transition.record)
            }
            Err(err) => {
                if err.resets_state() {
                    tracing::debug!(error = %err, ?action, "calculator reset after error");
                    self.state = self.state.reset();
                } else {
                    tracing::debug!(error = %err, ?action, "input rejected");
                }
                Err(err)
            }
        }
    }

    /// Apply a sequence of actions, stopping at the first error
    pub fn apply_all(
        &mut self,
        actions: impl IntoIterator<Item = Action>,
    ) -> CalcResult<Vec<HistoryEntry>> {
        let mut records = Vec::new();
        for action in actions {
            if let Some(record) = self.apply(action)? {
                records.push(record);
            }
        }
        Ok(records)
    }
}
