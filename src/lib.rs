//! quizkit - gamification and data-fetching core for the BrainDash quiz platform
//!
//! quizkit holds the client-side state logic that the UI layer builds on:
//! quiz results produce XP, XP derives a level, levels and play counters
//! unlock achievements, and all remote data (quizzes, categories, profiles)
//! flows through a stale-while-revalidate cache so the UI never blocks on
//! the network when something usable is already on disk.
//!
//! ## Components
//!
//! 1. **Cache** ([`cache::CacheService`]): wraps a [`storage::KeyValueStore`]
//!    with expiration metadata and a fetch protocol that returns stale data
//!    immediately while refreshing it in the background.
//!
//! 2. **Progression** ([`progression::LevelCurve`]): pure mapping from
//!    cumulative XP to a level and progress-within-level.
//!
//! 3. **Achievements** ([`achievements::AchievementEngine`]): evaluates a
//!    declarative achievement catalog against a snapshot of player stats and
//!    reports what newly unlocked.

pub mod achievements;
pub mod cache;
pub mod progression;
pub mod storage;
