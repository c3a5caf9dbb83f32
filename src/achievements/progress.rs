//! Player progress snapshot
//!
//! The engine only ever reads these; ownership and persistence stay with the
//! profile subsystem.

use serde::{Deserialize, Serialize};

/// Instantaneous view of a player's countable stats.
///
/// `level` is derived from `xp` by the level curve; callers should treat the
/// engine's output snapshot as authoritative rather than recomputing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Cumulative experience points
    pub xp: u64,
    /// Level derived from `xp`
    pub level: u32,
    pub quizzes_completed: u64,
    pub perfect_scores: u64,
    /// Distinct quiz categories the player has played
    pub categories_played: u64,
    /// Consecutive days with at least one quiz
    pub daily_streak: u32,
}

impl UserProgress {
    /// Fresh level-1 progress for a new player.
    pub fn new() -> Self {
        Self {
            level: 1,
            ..Self::default()
        }
    }
}

/// Outcome of a single quiz run.
#[derive(Debug, Clone, Copy)]
pub struct QuizResult {
    pub correct: u32,
    pub total: u32,
}

impl QuizResult {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}
