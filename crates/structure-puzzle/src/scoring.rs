//! Score calculation for finished sessions.

use serde::{Deserialize, Serialize};

/// Constants of the scoring formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRules {
    /// Awarded for any win
    pub base: i64,
    /// Per unused move of the budget
    pub move_bonus: i64,
    /// Seconds under which the time bonus applies
    pub par_time_secs: i64,
    /// Per second under par
    pub time_bonus: i64,
    /// Per hint taken
    pub hint_penalty: i64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base: 50,
            move_bonus: 10,
            par_time_secs: 30,
            time_bonus: 2,
            hint_penalty: 5,
        }
    }
}

impl ScoringRules {
    /// Score a session. Losses always score 0 and the result is never negative.
    pub fn score(
        &self,
        won: bool,
        max_moves: u32,
        moves_used: u32,
        elapsed_secs: u64,
        hints_used: u32,
    ) -> u32 {
        if !won {
            return 0;
        }
        let unused_moves = (i64::from(max_moves) - i64::from(moves_used)).max(0);
        let elapsed = i64::try_from(elapsed_secs).unwrap_or(i64::MAX);
        let under_par = self.par_time_secs.saturating_sub(elapsed).max(0);

        // Rule constants are caller-supplied, so every step saturates
        let score = self
            .base
            .saturating_add(self.move_bonus.saturating_mul(unused_moves))
            .saturating_add(self.time_bonus.saturating_mul(under_par))
            .saturating_sub(self.hint_penalty.saturating_mul(i64::from(hints_used)));

        u32::try_from(score.max(0)).unwrap_or(u32::MAX)
    }
}

/// Score with the default rules
pub fn calculate_score(
    won: bool,
    max_moves: u32,
    moves_used: u32,
    elapsed_secs: u64,
    hints_used: u32,
) -> u32 {
    ScoringRules::default().score(won, max_moves, moves_used, elapsed_secs, hints_used)
}

/// Render seconds as `MM:SS`
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
