//! XP and level progression
//!
//! Levels are derived from cumulative XP on demand and never stored; the
//! per-level cost grows linearly so early levels come fast and later ones
//! take commitment. Also defines the XP rewards for quiz play.

/// Derived view of a player's level for a given cumulative XP.
///
/// `current_level_xp <= xp < next_level_xp` always holds for the XP the info
/// was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelInfo {
    pub level: u32,
    /// Cumulative XP floor of the current level
    pub current_level_xp: u64,
    /// Cumulative XP at which the next level starts
    pub next_level_xp: u64,
    /// XP earned within the current level
    pub xp_in_current_level: u64,
    /// Progress through the current level, in [0, 100)
    pub progress_percent: f64,
}

/// Arithmetic level curve: advancing from level `L` to `L+1` costs
/// `base_xp + (L-1) * xp_step`.
#[derive(Debug, Clone, Copy)]
pub struct LevelCurve {
    pub base_xp: u64,
    pub xp_step: u64,
}

impl Default for LevelCurve {
    fn default() -> Self {
        // Level 2 at 50 XP, level 3 at 110, level 4 at 180, ...
        Self {
            base_xp: 50,
            xp_step: 10,
        }
    }
}

impl LevelCurve {
    /// Derive level and progress for a cumulative XP value.
    ///
    /// Monotonically non-decreasing in `xp`; any XP below the first
    /// increment maps to level 1.
    pub fn calculate_level(&self, xp: u64) -> LevelInfo {
        let mut level: u32 = 1;
        let mut floor: u64 = 0;

        loop {
            let cost = self.base_xp + u64::from(level - 1) * self.xp_step;
            if xp < floor + cost {
                let xp_in_current_level = xp - floor;
                return LevelInfo {
                    level,
                    current_level_xp: floor,
                    next_level_xp: floor + cost,
                    xp_in_current_level,
                    progress_percent: (xp_in_current_level as f64 / cost as f64) * 100.0,
                };
            }
            floor += cost;
            level += 1;
        }
    }

    /// Cumulative XP required to reach `target_level`, closed form.
    ///
    /// Inverse of [`calculate_level`](Self::calculate_level):
    /// `xp_for_level(calculate_level(xp).level) <= xp` for all `xp`.
    pub fn xp_for_level(&self, target_level: u32) -> u64 {
        if target_level <= 1 {
            return 0;
        }
        let n = u64::from(target_level - 1);
        // Sum of base_xp + (i-1)*xp_step for i in 1..=n
        n * self.base_xp + self.xp_step * n * (n - 1) / 2
    }
}

/// XP rewards for quiz play.
pub struct XpRewards;

impl XpRewards {
    /// XP for finishing a quiz, regardless of score
    pub const QUIZ_COMPLETED: u64 = 10;

    /// XP per correct answer
    pub const CORRECT_ANSWER: u64 = 2;

    /// Bonus for a perfect score
    pub const PERFECT_SCORE: u64 = 15;

    /// Total XP for a quiz result
    pub fn quiz(correct: u32, total: u32) -> u64 {
        let mut xp = Self::QUIZ_COMPLETED + u64::from(correct) * Self::CORRECT_ANSWER;
        if total > 0 && correct == total {
            xp += Self::PERFECT_SCORE;
        }
        xp
    }

    /// Daily streak bonus XP
    /// Streak day 1 = 2 XP, day 2 = 4 XP, etc. (capped at 20)
    pub fn streak_bonus(streak_days: u32) -> u64 {
        u64::from(streak_days * 2).min(20)
    }
}
