//! Achievement engine - evaluation and XP award orchestration
//!
//! Pure over its inputs: the engine reads a progress snapshot and the set of
//! already-unlocked ids, and returns what changed. Persisting the new
//! snapshot and the unlocked ids stays with the caller.

use std::collections::HashSet;

use super::catalog::{Achievement, CATALOG};
use super::progress::{QuizResult, UserProgress};
use super::registry::ConditionRegistry;
use crate::progression::{LevelCurve, XpRewards};

/// Events produced by a single progress update, in reporting order.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    AchievementUnlocked { id: String, xp_reward: u64 },
    XpAwarded { amount: u64, reason: String },
    LevelUp { old_level: u32, new_level: u32 },
}

/// Result of an update: the new snapshot plus everything worth announcing.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Updated snapshot for the caller to persist
    pub progress: UserProgress,
    /// Ids of newly-unlocked achievements, in catalog order
    pub unlocked: Vec<String>,
    pub events: Vec<ProgressEvent>,
}

/// Evaluates a catalog against progress snapshots and orchestrates XP awards.
pub struct AchievementEngine {
    catalog: Vec<Achievement>,
    registry: ConditionRegistry,
    curve: LevelCurve,
}

impl AchievementEngine {
    /// Engine over the built-in catalog, default registry and level curve.
    pub fn new() -> Self {
        Self::with_catalog(CATALOG.clone(), ConditionRegistry::with_defaults())
    }

    /// Engine over a custom catalog (e.g. one fetched from the backend).
    pub fn with_catalog(catalog: Vec<Achievement>, registry: ConditionRegistry) -> Self {
        Self {
            catalog,
            registry,
            curve: LevelCurve::default(),
        }
    }

    pub fn catalog(&self) -> &[Achievement] {
        &self.catalog
    }

    /// Achievements that newly qualify going from `previous` to `current`.
    ///
    /// Non-repeatable achievements qualify when satisfied now and not yet in
    /// `unlocked` - the unlocked set is what makes qualification
    /// edge-triggered across sessions. Repeatable achievements qualify on
    /// each false-to-true transition of their condition.
    pub fn newly_qualified<'a>(
        &'a self,
        previous: &UserProgress,
        current: &UserProgress,
        unlocked: &HashSet<String>,
    ) -> Vec<&'a Achievement> {
        self.catalog
            .iter()
            .filter(|a| {
                if a.repeatable {
                    self.registry.is_satisfied(&a.condition, current)
                        && !self.registry.is_satisfied(&a.condition, previous)
                } else {
                    !unlocked.contains(&a.id) && self.registry.is_satisfied(&a.condition, current)
                }
            })
            .collect()
    }

    /// Award gameplay XP and evaluate the catalog once.
    ///
    /// Achievement rewards accumulate into the same update and the final
    /// level is derived exactly once from the total, so the outcome does not
    /// depend on the order rewards are summed in. Achievements that only
    /// become reachable because of the bonus XP are picked up by the next
    /// update, not this one.
    pub fn award_xp(
        &self,
        progress: &UserProgress,
        unlocked: &HashSet<String>,
        delta: u64,
        reason: &str,
    ) -> ProgressUpdate {
        self.apply(progress, progress.clone(), unlocked, delta, reason)
    }

    /// Record a finished quiz: bump counters, award XP, evaluate.
    pub fn record_quiz(
        &self,
        progress: &UserProgress,
        unlocked: &HashSet<String>,
        result: &QuizResult,
    ) -> ProgressUpdate {
        let mut staged = progress.clone();
        staged.quizzes_completed += 1;
        if result.is_perfect() {
            staged.perfect_scores += 1;
        }

        let delta = XpRewards::quiz(result.correct, result.total);
        let reason = format!("quiz completed ({}/{})", result.correct, result.total);
        self.apply(progress, staged, unlocked, delta, &reason)
    }

    fn apply(
        &self,
        previous: &UserProgress,
        staged: UserProgress,
        unlocked: &HashSet<String>,
        delta: u64,
        reason: &str,
    ) -> ProgressUpdate {
        let mut next = staged;
        next.xp += delta;
        // Evaluation snapshot: gameplay delta applied, one level derivation
        next.level = self.curve.calculate_level(next.xp).level;

        let newly = self.newly_qualified(previous, &next, unlocked);

        let mut events = Vec::new();
        let mut unlocked_ids = Vec::new();
        let mut bonus_xp: u64 = 0;
        for achievement in &newly {
            bonus_xp += achievement.xp_reward;
            unlocked_ids.push(achievement.id.clone());
            events.push(ProgressEvent::AchievementUnlocked {
                id: achievement.id.clone(),
                xp_reward: achievement.xp_reward,
            });
        }

        let total_xp = delta + bonus_xp;
        if total_xp > 0 {
            events.push(ProgressEvent::XpAwarded {
                amount: total_xp,
                reason: format!("{} (+{} from achievements)", reason, bonus_xp),
            });
        }

        // Rewards accumulated; derive the final level once from the total
        next.xp += bonus_xp;
        next.level = self.curve.calculate_level(next.xp).level;
        if next.level > previous.level {
            events.push(ProgressEvent::LevelUp {
                old_level: previous.level,
                new_level: next.level,
            });
        }

        ProgressUpdate {
            progress: next,
            unlocked: unlocked_ids,
            events,
        }
    }
}

impl Default for AchievementEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::catalog::{AchievementCategory, Condition};

    fn achievement(id: &str, kind: &str, value: u64, xp_reward: u64) -> Achievement {
        Achievement {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category: AchievementCategory::Milestone,
            icon: String::new(),
            condition: Condition {
                kind: kind.to_string(),
                value,
            },
            xp_reward,
            repeatable: false,
        }
    }

    #[test]
    fn test_level_achievement_unlocks_once() {
        let engine = AchievementEngine::new();
        let mut unlocked = HashSet::new();

        // 45 -> 60 XP crosses the level-2 floor at 50
        let progress = UserProgress {
            xp: 45,
            level: 1,
            ..UserProgress::new()
        };
        let update = engine.award_xp(&progress, &unlocked, 15, "test");
        assert!(update.unlocked.contains(&"level_2".to_string()));

        unlocked.extend(update.unlocked.iter().cloned());

        // Same level, another award: no re-report
        let update = engine.award_xp(&update.progress, &unlocked, 1, "test");
        assert!(!update.unlocked.contains(&"level_2".to_string()));
    }

    #[test]
    fn test_repeatable_retriggers_on_each_transition() {
        let catalog = vec![{
            let mut a = achievement("daily", "daily_streak", 1, 5);
            a.repeatable = true;
            a
        }];
        let engine = AchievementEngine::with_catalog(catalog, ConditionRegistry::with_defaults());
        let unlocked: HashSet<String> = ["daily".to_string()].into_iter().collect();

        let idle = UserProgress::new();
        let mut active = UserProgress::new();
        active.daily_streak = 1;

        // Transition false -> true qualifies even though already unlocked
        assert_eq!(engine.newly_qualified(&idle, &active, &unlocked).len(), 1);
        // Holding true does not re-qualify
        assert!(engine.newly_qualified(&active, &active, &unlocked).is_empty());
        // A later streak reset and restart qualifies again
        assert_eq!(engine.newly_qualified(&idle, &active, &unlocked).len(), 1);
    }

    #[test]
    fn test_simultaneous_unlocks_report_in_catalog_order() {
        let catalog = vec![
            achievement("a", "quizzes_completed", 1, 10),
            achievement("b", "xp_earned", 5, 20),
            achievement("c", "quizzes_completed", 1, 30),
        ];
        let engine = AchievementEngine::with_catalog(catalog, ConditionRegistry::with_defaults());

        let mut staged = UserProgress::new();
        staged.quizzes_completed = 1;
        let update = engine.apply(&UserProgress::new(), staged, &HashSet::new(), 5, "test");

        assert_eq!(update.unlocked, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rewards_accumulate_into_single_level_derivation() {
        // Two achievements worth 30 XP each; gameplay delta of 45 puts the
        // player at 45 XP, bonuses carry the total to 105 - still level 2.
        let catalog = vec![
            achievement("a", "xp_earned", 40, 30),
            achievement("b", "xp_earned", 45, 30),
        ];
        let engine = AchievementEngine::with_catalog(catalog, ConditionRegistry::with_defaults());

        let update = engine.award_xp(&UserProgress::new(), &HashSet::new(), 45, "test");

        assert_eq!(update.unlocked, vec!["a", "b"]);
        assert_eq!(update.progress.xp, 105);
        assert_eq!(update.progress.level, 2, "105 XP is still inside level 2");

        let level_ups = update
            .events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 1);
    }

    #[test]
    fn test_unknown_condition_kind_skips_entry_not_catalog() {
        let catalog = vec![
            achievement("bogus", "hats_collected", 1, 10),
            achievement("fine", "quizzes_completed", 1, 10),
        ];
        let engine = AchievementEngine::with_catalog(catalog, ConditionRegistry::with_defaults());

        let mut staged = UserProgress::new();
        staged.quizzes_completed = 1;
        let update = engine.apply(&UserProgress::new(), staged, &HashSet::new(), 0, "test");

        assert_eq!(update.unlocked, vec!["fine"]);
    }

    #[test]
    fn test_record_quiz_updates_counters_and_awards() {
        let engine = AchievementEngine::new();
        let unlocked = HashSet::new();

        let update = engine.record_quiz(
            &UserProgress::new(),
            &unlocked,
            &QuizResult {
                correct: 5,
                total: 5,
            },
        );

        assert_eq!(update.progress.quizzes_completed, 1);
        assert_eq!(update.progress.perfect_scores, 1);
        assert!(update.unlocked.contains(&"first_quiz".to_string()));
        assert!(update.unlocked.contains(&"perfect_1".to_string()));

        // Quiz XP (10 + 5*2 + 15) plus first_quiz (10) and perfect_1 (20)
        assert_eq!(update.progress.xp, 65);
        assert_eq!(update.progress.level, 2);
    }

    #[test]
    fn test_no_events_for_empty_update() {
        let engine = AchievementEngine::new();
        let progress = UserProgress {
            xp: 30,
            level: 1,
            quizzes_completed: 2,
            ..UserProgress::new()
        };
        let unlocked: HashSet<String> =
            ["first_quiz".to_string(), "daily_return".to_string()].into();

        let update = engine.award_xp(&progress, &unlocked, 0, "noop");
        assert!(update.unlocked.is_empty());
        assert!(update.events.is_empty());
        assert_eq!(update.progress, progress);
    }
}
