//! Activity log formatting

use chrono::{DateTime, Utc};

use crate::models::{Activity, ActivityStats};

/// `∑  Calculation  7 + 3 = 10  (5 minutes ago)` per entry
pub fn format_activity_list(activities: &[Activity], now: DateTime<Utc>) -> String {
    if activities.is_empty() {
        return "No activity yet.".to_string();
    }

    let kind_width = activities
        .iter()
        .map(|a| a.kind.name().len())
        .max()
        .unwrap_or(0);

    activities
        .iter()
        .map(|a| {
            format!(
                "{}  {:<width$}  {}  ({})",
                a.kind.glyph().symbol(),
                a.kind.name(),
                a.description,
                a.when(now),
                width = kind_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_activity_stats(stats: &ActivityStats) -> String {
    format!(
        "Last 24 hours: {}\nLast 7 days:   {}\nLast 30 days:  {}",
        stats.today, stats.this_week, stats.this_month
    )
}
