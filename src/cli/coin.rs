//! Coin flip CLI command

use clap::Args;

use crate::calc::coin::{CoinGame, CoinSource};
use crate::error::{CalcError, CalcResult};
use crate::models::ActivityKind;
use crate::services::ActivityService;
use crate::storage::Storage;

/// Upper bound on flips per invocation
pub const MAX_FLIPS: u32 = 10_000;

/// Arguments for `calcdeck coin`
#[derive(Args)]
pub struct CoinArgs {
    /// Number of flips
    #[arg(short = 'n', long, default_value_t = 1)]
    pub times: u32,
}

/// Flip `times` coins and describe the session
pub fn run_flips<S: CoinSource>(game: &mut CoinGame<S>, times: u32) -> CalcResult<String> {
    if times == 0 || times > MAX_FLIPS {
        return Err(CalcError::Validation(format!(
            "Number of flips must be between 1 and {}",
            MAX_FLIPS
        )));
    }

    let faces: Vec<_> = (0..times).map(|_| game.flip().label()).collect();
    let mut out = faces.join(" ");

    if times > 1 {
        let stats = game.stats();
        out.push_str(&format!(
            "\nHeads: {} ({:.1}%)  Tails: {} ({:.1}%)  Total: {}",
            stats.heads,
            stats.heads_percent(),
            stats.tails,
            stats.tails_percent(),
            stats.total
        ));
        let streak = game.streak();
        if let (Some(face), true) = (streak.face, streak.is_notable()) {
            out.push_str(&format!("\nCurrent streak: {} × {}", streak.count, face));
        }
    }
    Ok(out)
}

/// Handle `calcdeck coin`
pub fn handle_coin_command(storage: &Storage, args: CoinArgs) -> CalcResult<()> {
    let mut game = CoinGame::default();
    let summary = run_flips(&mut game, args.times)?;
    println!("{}", summary);

    let description = match (args.times, game.last()) {
        (1, Some(face)) => face.to_string(),
        _ => format!(
            "{} flips: {} heads, {} tails",
            game.stats().total,
            game.stats().heads,
            game.stats().tails
        ),
    };
    ActivityService::new(storage).log_current(ActivityKind::CoinFlip, description)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::coin::ScriptedSource;

    #[test]
    fn test_single_flip() {
        let mut game = CoinGame::new(ScriptedSource::new(vec![0.1]));
        assert_eq!(run_flips(&mut game, 1).unwrap(), "Heads");
    }

    #[test]
    fn test_many_flips_summary() {
        let mut game = CoinGame::new(ScriptedSource::new(vec![0.9, 0.9, 0.1, 0.1, 0.1]));
        let out = run_flips(&mut game, 5).unwrap();
        assert!(out.starts_with("Tails Tails Heads Heads Heads"));
        assert!(out.contains("Heads: 3 (60.0%)"));
        assert!(out.contains("Current streak: 3 × Heads"));
    }

    #[test]
    fn test_flip_count_bounds() {
        let mut game = CoinGame::new(ScriptedSource::new(vec![0.1]));
        assert!(run_flips(&mut game, 0).unwrap_err().is_validation());
        assert!(run_flips(&mut game, MAX_FLIPS + 1).is_err());
    }
}
