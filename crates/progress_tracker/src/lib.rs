//! Progress Tracker - quiz, XP and streak bookkeeping for the tutorial site
//!
//! Two small JSON records (quiz answers, gamification state) live in an
//! injected key-value store. Everything shown to the learner (level, path
//! percentages, chapter scores, completed count) is derived from them on demand.

pub mod config;
pub mod error;
pub mod fill_blank;
pub mod levels;
pub mod page;
pub mod records;
pub mod stats;
pub mod store;
pub mod streak;
pub mod tracker;
pub mod view;

pub use config::{CourseLayout, LearningPath, TrackerConfig};
pub use error::{ConfigError, StoreError};
pub use fill_blank::{check_blanks, Blank, FillBlankOutcome};
pub use levels::{compute_level, level_progress, LevelProgress, LEVEL_THRESHOLDS};
pub use records::{AnswerMap, AnswerRecord, GamificationState};
pub use stats::{
    aggregate_chapter_stats, chapter_of, chapter_score, compute_completion_count,
    compute_path_percentage, ChapterStats,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, ANSWERS_KEY, GAMIFICATION_KEY};
pub use streak::{format_visit_date, parse_visit_date, StreakChange};
pub use tracker::{
    AnswerOutcome, AwardReason, ChapterOutcome, FillBlankResult, ProgressTracker, VisitOutcome,
    XpAward, XP_PER_CHAPTER, XP_PER_CORRECT,
};
pub use view::{Dashboard, OptionMark, PathProgress, QuizView};
