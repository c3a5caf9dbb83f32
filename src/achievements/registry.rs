//! Condition registry - maps condition kinds to stat accessors
//!
//! Keeps the evaluator open for extension: registering a new accessor is all
//! it takes to support a new `condition.type`, and a catalog entry with an
//! unknown kind degrades to never-satisfied instead of failing the whole
//! evaluation.

use std::collections::HashMap;

use super::catalog::Condition;
use super::progress::UserProgress;

type StatAccessor = Box<dyn Fn(&UserProgress) -> u64 + Send + Sync>;

/// Lookup table from `condition.type` to the stat it reads.
pub struct ConditionRegistry {
    accessors: HashMap<String, StatAccessor>,
}

impl ConditionRegistry {
    /// Empty registry. Useful only when building a fully custom stat set.
    pub fn new() -> Self {
        Self {
            accessors: HashMap::new(),
        }
    }

    /// Registry covering every condition kind in the built-in catalog.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("quizzes_completed", |p| p.quizzes_completed);
        registry.register("perfect_scores", |p| p.perfect_scores);
        registry.register("level_reached", |p| u64::from(p.level));
        registry.register("xp_earned", |p| p.xp);
        registry.register("categories_played", |p| p.categories_played);
        registry.register("daily_streak", |p| u64::from(p.daily_streak));
        registry
    }

    /// Register (or replace) the accessor for a condition kind.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        accessor: impl Fn(&UserProgress) -> u64 + Send + Sync + 'static,
    ) {
        self.accessors.insert(kind.into(), Box::new(accessor));
    }

    /// Whether an accessor exists for the kind.
    pub fn supports(&self, kind: &str) -> bool {
        self.accessors.contains_key(kind)
    }

    /// Evaluate a condition against a progress snapshot.
    ///
    /// All conditions are `stat >= threshold`. Unknown kinds never qualify.
    pub fn is_satisfied(&self, condition: &Condition, progress: &UserProgress) -> bool {
        match self.accessors.get(&condition.kind) {
            Some(accessor) => accessor(progress) >= condition.value,
            None => {
                tracing::warn!("unknown achievement condition type '{}'", condition.kind);
                false
            }
        }
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
