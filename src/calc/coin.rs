//! Coin-flip game: fair flips, running stats, streaks and recent flips

use std::fmt;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::history::BoundedLog;

/// Number of recent flips kept
pub const FLIP_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinFace {
    Heads,
    Tails,
}

impl CoinFace {
    /// A uniform sample in `[0, 1)` below one half is heads
    pub fn from_unit(sample: f64) -> Self {
        if sample < 0.5 {
            Self::Heads
        } else {
            Self::Tails
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Heads => "Heads",
            Self::Tails => "Tails",
        }
    }
}

impl fmt::Display for CoinFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source of uniform samples in `[0, 1)`
pub trait CoinSource {
    fn sample(&mut self) -> f64;
}

impl<S: CoinSource + ?Sized> CoinSource for Box<S> {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

/// Operating-system randomness
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngSource;

impl CoinSource for OsRngSource {
    fn sample(&mut self) -> f64 {
        // 53 random mantissa bits
        (OsRng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed list of samples, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    samples: Vec<f64>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, next: 0 }
    }
}

impl CoinSource for ScriptedSource {
    fn sample(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let value = self.samples[self.next % self.samples.len()];
        self.next += 1;
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoinStats {
    pub heads: u64,
    pub tails: u64,
    pub total: u64,
}

impl CoinStats {
    fn record(&mut self, face: CoinFace) {
        match face {
            CoinFace::Heads => self.heads += 1,
            CoinFace::Tails => self.tails += 1,
        }
        self.total += 1;
    }

    /// Share of heads in percent, 0 before the first flip
    pub fn heads_percent(&self) -> f64 {
        percent(self.heads, self.total)
    }

    pub fn tails_percent(&self) -> f64 {
        percent(self.tails, self.total)
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Consecutive flips landing on the same face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Streak {
    pub face: Option<CoinFace>,
    pub count: u32,
}

impl Streak {
    fn extend(&mut self, face: CoinFace) {
        if self.face == Some(face) {
            self.count += 1;
        } else {
            self.face = Some(face);
            self.count = 1;
        }
    }

    /// Streaks are worth showing from two flips up
    pub fn is_notable(&self) -> bool {
        self.count > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flip {
    pub face: CoinFace,
    pub flipped_at: DateTime<Utc>,
}

/// The coin-flip screen's state
pub struct CoinGame<S: CoinSource = OsRngSource> {
    source: S,
    stats: CoinStats,
    streak: Streak,
    history: BoundedLog<Flip>,
}

impl Default for CoinGame<OsRngSource> {
    fn default() -> Self {
        Self::new(OsRngSource)
    }
}

impl<S: CoinSource> CoinGame<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            stats: CoinStats::default(),
            streak: Streak::default(),
            history: BoundedLog::new(FLIP_HISTORY_CAPACITY),
        }
    }

    pub fn flip(&mut self) -> CoinFace {
        let face = CoinFace::from_unit(self.source.sample());
        self.stats.record(face);
        self.streak.extend(face);
        self.history.push(Flip {
            face,
            flipped_at: Utc::now(),
        });
        tracing::debug!(%face, total = self.stats.total, "coin flipped");
        face
    }

    pub fn stats(&self) -> CoinStats {
        self.stats
    }

    pub fn streak(&self) -> Streak {
        self.streak
    }

    pub fn last(&self) -> Option<CoinFace> {
        self.history.latest().map(|f| f.face)
    }

    /// Recent flips, newest first
    pub fn history(&self) -> &BoundedLog<Flip> {
        &self.history
    }

    pub fn reset(&mut self) {
        self.stats = CoinStats::default();
        self.streak = Streak::default();
        self.history.clear();
    }
}
