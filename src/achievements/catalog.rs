//! Achievement definitions and the built-in catalog
//!
//! Achievements are declarative: a condition names a player stat and a
//! threshold, and the engine does the rest. The schema round-trips through
//! JSON so a server-provided catalog can replace the built-in one.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Achievement category for grouping in UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Milestone,
    Skill,
    Progression,
    Exploration,
    Streak,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Milestone => "Milestones",
            Self::Skill => "Skills",
            Self::Progression => "Progression",
            Self::Exploration => "Exploration",
            Self::Streak => "Streaks",
        }
    }
}

/// Unlock condition: a stat accessor name and the threshold it must reach.
///
/// `kind` is an open set - anything registered in a
/// [`crate::achievements::ConditionRegistry`] is valid, and unknown kinds
/// simply never qualify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: u64,
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    pub icon: String,
    pub condition: Condition,
    pub xp_reward: u64,
    #[serde(rename = "is_repeatable", default)]
    pub repeatable: bool,
}

/// Built-in achievement catalog, in award-reporting order.
pub static CATALOG: Lazy<Vec<Achievement>> = Lazy::new(default_catalog);

fn achievement(
    id: &str,
    name: &str,
    description: &str,
    category: AchievementCategory,
    icon: &str,
    kind: &str,
    value: u64,
    xp_reward: u64,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        icon: icon.to_string(),
        condition: Condition {
            kind: kind.to_string(),
            value,
        },
        xp_reward,
        repeatable: false,
    }
}

fn default_catalog() -> Vec<Achievement> {
    use AchievementCategory::*;

    let mut catalog = vec![
        // === MILESTONES ===
        achievement(
            "first_quiz",
            "First Steps",
            "Complete your first quiz",
            Milestone,
            "🎯",
            "quizzes_completed",
            1,
            10,
        ),
        achievement(
            "quiz_10",
            "Getting Hooked",
            "Complete 10 quizzes",
            Milestone,
            "📈",
            "quizzes_completed",
            10,
            25,
        ),
        achievement(
            "quiz_50",
            "Quiz Regular",
            "Complete 50 quizzes",
            Milestone,
            "💪",
            "quizzes_completed",
            50,
            50,
        ),
        achievement(
            "quiz_100",
            "Century",
            "Complete 100 quizzes",
            Milestone,
            "💯",
            "quizzes_completed",
            100,
            100,
        ),
        // === SKILL ===
        achievement(
            "perfect_1",
            "Flawless",
            "Score 100% on a quiz",
            Skill,
            "✨",
            "perfect_scores",
            1,
            20,
        ),
        achievement(
            "perfect_10",
            "Perfectionist",
            "Score 100% on 10 quizzes",
            Skill,
            "💎",
            "perfect_scores",
            10,
            75,
        ),
        // === PROGRESSION ===
        achievement(
            "level_2",
            "Moving Up",
            "Reach level 2",
            Progression,
            "🌱",
            "level_reached",
            2,
            10,
        ),
        achievement(
            "level_5",
            "Climber",
            "Reach level 5",
            Progression,
            "🪜",
            "level_reached",
            5,
            25,
        ),
        achievement(
            "level_10",
            "Veteran",
            "Reach level 10",
            Progression,
            "🏅",
            "level_reached",
            10,
            50,
        ),
        achievement(
            "level_20",
            "Legend",
            "Reach level 20",
            Progression,
            "🏆",
            "level_reached",
            20,
            100,
        ),
        achievement(
            "xp_1000",
            "Point Hoarder",
            "Earn 1000 XP",
            Progression,
            "🪙",
            "xp_earned",
            1000,
            50,
        ),
        // === EXPLORATION ===
        achievement(
            "explorer_5",
            "Curious Mind",
            "Play quizzes from 5 categories",
            Exploration,
            "🗺️",
            "categories_played",
            5,
            30,
        ),
        achievement(
            "explorer_10",
            "Polymath",
            "Play quizzes from 10 categories",
            Exploration,
            "🎓",
            "categories_played",
            10,
            60,
        ),
        // === STREAKS ===
        achievement(
            "streak_3",
            "On Fire",
            "Maintain a 3-day streak",
            Streak,
            "🔥",
            "daily_streak",
            3,
            30,
        ),
        achievement(
            "streak_7",
            "Week Warrior",
            "Maintain a 7-day streak",
            Streak,
            "📅",
            "daily_streak",
            7,
            75,
        ),
        achievement(
            "streak_30",
            "Monthly Master",
            "Maintain a 30-day streak",
            Streak,
            "👑",
            "daily_streak",
            30,
            300,
        ),
    ];

    // Re-awarded on every new streak start, not just the first
    let mut daily = achievement(
        "daily_return",
        "Daily Dose",
        "Come back and play on a new day",
        Streak,
        "☀️",
        "daily_streak",
        1,
        5,
    );
    daily.repeatable = true;
    catalog.push(daily);

    catalog
}

impl Achievement {
    /// Look up an achievement by id within a catalog.
    pub fn find<'a>(catalog: &'a [Achievement], id: &str) -> Option<&'a Achievement> {
        catalog.iter().find(|a| a.id == id)
    }

    /// Total XP obtainable from a catalog's one-shot achievements.
    pub fn total_xp(catalog: &[Achievement]) -> u64 {
        catalog
            .iter()
            .filter(|a| !a.repeatable)
            .map(|a| a.xp_reward)
            .sum()
    }
}
