//! Activity log entries
//!
//! Every calculator surface logs what the user did. Entries carry a kind,
//! which maps to a glyph for display, and a UTC timestamp used for relative
//! labels and the 24h/7d/30d counters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ActivityId, UserId};
use crate::error::CalcError;

/// What kind of thing the user did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    Calculation,
    Exchange,
    Investment,
    CoinFlip,
    Date,
    Programmer,
    /// Anything else; shown with the generic history glyph
    #[serde(other)]
    Other,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 7] = [
        Self::Calculation,
        Self::Exchange,
        Self::Investment,
        Self::CoinFlip,
        Self::Date,
        Self::Programmer,
        Self::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Calculation => "calculation",
            Self::Exchange => "exchange",
            Self::Investment => "investment",
            Self::CoinFlip => "coin-flip",
            Self::Date => "date",
            Self::Programmer => "programmer",
            Self::Other => "other",
        }
    }

    pub fn glyph(&self) -> ActivityGlyph {
        match self {
            Self::Calculation => ActivityGlyph::Calculator,
            Self::Exchange => ActivityGlyph::Exchange,
            Self::Investment => ActivityGlyph::Chart,
            Self::CoinFlip => ActivityGlyph::Coins,
            Self::Date => ActivityGlyph::Calendar,
            Self::Programmer => ActivityGlyph::Code,
            Self::Other => ActivityGlyph::History,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivityKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "calc" => return Ok(Self::Calculation),
            "coin" | "coinflip" => return Ok(Self::CoinFlip),
            _ => {}
        }
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == lower)
            .ok_or_else(|| CalcError::Validation(format!("Unknown activity kind: '{}'", s.trim())))
    }
}

/// Display glyph for an activity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityGlyph {
    Calculator,
    Exchange,
    Chart,
    Coins,
    Calendar,
    Code,
    History,
}

impl ActivityGlyph {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Calculator => "∑",
            Self::Exchange => "⇄",
            Self::Chart => "↗",
            Self::Coins => "◎",
            Self::Calendar => "▦",
            Self::Code => "⌘",
            Self::History => "↺",
        }
    }
}

/// One logged action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub user_id: UserId,
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    pub fn new(user_id: UserId, kind: ActivityKind, description: impl Into<String>) -> Self {
        Self {
            id: ActivityId::new(),
            user_id,
            kind,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }

    /// Relative label for the timestamp as seen at `now`
    pub fn when(&self, now: DateTime<Utc>) -> String {
        relative_time(self.timestamp, now)
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// "just now", "5 minutes ago", "3 hours ago", "2 days ago", or the date
/// once a week has passed
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

/// Activity counts over the last day, week and 30 days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityStats {
    pub today: usize,
    pub this_week: usize,
    pub this_month: usize,
}

impl ActivityStats {
    pub fn compute<'a>(
        activities: impl IntoIterator<Item = &'a Activity>,
        now: DateTime<Utc>,
    ) -> Self {
        let day = now - Duration::hours(24);
        let week = now - Duration::days(7);
        let month = now - Duration::days(30);

        let mut stats = Self::default();
        for activity in activities {
            let t = activity.timestamp;
            if t > day {
                stats.today += 1;
            }
            if t > week {
                stats.this_week += 1;
            }
            if t > month {
                stats.this_month += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(minutes_ago: i64, now: DateTime<Utc>) -> Activity {
        let mut a = Activity::new(UserId::new(), ActivityKind::Calculation, "test");
        a.timestamp = now - Duration::minutes(minutes_ago);
        a
    }

    #[test]
    fn test_relative_time_labels() {
        let now = Utc::now();
        assert_eq!(relative_time(now - Duration::seconds(30), now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_time(now - Duration::minutes(15), now), "15 minutes ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2 days ago");

        let old = now - Duration::days(10);
        assert_eq!(relative_time(old, now), old.format("%Y-%m-%d").to_string());
    }

    #[test]
    fn test_stats_windows() {
        let now = Utc::now();
        let activities = vec![
            at(5, now),
            at(60 * 30, now),
            at(60 * 24 * 3, now),
            at(60 * 24 * 20, now),
            at(60 * 24 * 45, now),
        ];
        let stats = ActivityStats::compute(&activities, now);
        assert_eq!(stats.today, 1);
        assert_eq!(stats.this_week, 3);
        assert_eq!(stats.this_month, 4);
    }

    #[test]
    fn test_glyph_table() {
        assert_eq!(ActivityKind::Exchange.glyph(), ActivityGlyph::Exchange);
        assert_eq!(ActivityKind::CoinFlip.glyph(), ActivityGlyph::Coins);
        assert_eq!(ActivityKind::Other.glyph(), ActivityGlyph::History);
        for kind in ActivityKind::ALL {
            assert!(!kind.glyph().symbol().is_empty());
        }
    }

    #[test]
    fn test_kind_serde_and_parse() {
        let json = serde_json::to_string(&ActivityKind::CoinFlip).unwrap();
        assert_eq!(json, "\"coin-flip\"");
        let unknown: ActivityKind = serde_json::from_str("\"stargazing\"").unwrap();
        assert_eq!(unknown, ActivityKind::Other);
        assert_eq!("coin".parse::<ActivityKind>().unwrap(), ActivityKind::CoinFlip);
        assert!("nope".parse::<ActivityKind>().is_err());
    }
}
