//! History and all-radix formatting

use crate::calc::radix::Radix;
use crate::models::HistoryEntry;

/// One line per entry, newest first, with a relative index
pub fn format_history<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> String {
    let lines: Vec<String> = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>3}. {}", i + 1, entry))
        .collect();

    if lines.is_empty() {
        "No calculations yet.".to_string()
    } else {
        lines.join("\n")
    }
}

/// The value in every radix, one per line
pub fn format_representations(values: &[(Radix, String)]) -> String {
    let width = values
        .iter()
        .map(|(radix, _)| radix.label().len())
        .max()
        .unwrap_or(0);

    values
        .iter()
        .map(|(radix, value)| format!("{:<width$}  {}", radix.label(), value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
