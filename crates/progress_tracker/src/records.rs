//! Persisted Records
//!
//! The two JSON records the tracker owns: the quiz answer map and the
//! gamification state. Loading never fails (absent, unreadable or corrupt
//! data yields the default record); saving reports errors so the caller can
//! decide to ignore them.

use crate::error::StoreResult;
use crate::store::{KeyValueStore, ANSWERS_KEY, GAMIFICATION_KEY};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Stored answer for one quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Option value the learner picked
    pub selected: String,
    /// Whether it matched the correct option
    pub correct: bool,
}

/// Quiz id -> latest answer. Later answers overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(pub BTreeMap<String, AnswerRecord>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, quiz_id: &str) -> Option<&AnswerRecord> {
        self.0.get(quiz_id)
    }

    /// Insert or overwrite, returning the previous record
    pub fn insert(&mut self, quiz_id: &str, record: AnswerRecord) -> Option<AnswerRecord> {
        self.0.insert(quiz_id.to_string(), record)
    }

    pub fn is_correct(&self, quiz_id: &str) -> bool {
        self.0.get(quiz_id).map(|r| r.correct).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerRecord)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// XP, streak and completion record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationState {
    /// Total experience points, never decreases
    #[serde(default)]
    pub xp: u64,
    /// Consecutive calendar days with a visit
    #[serde(default)]
    pub streak: u32,
    /// Date string of the last visit ("Mon Jan 01 2024")
    #[serde(default)]
    pub last_visit: Option<String>,
    /// Explicitly completed chapters, insertion ordered, no duplicates
    #[serde(default)]
    pub completed_chapters: Vec<String>,
    /// Quiz ids that have already been paid the correct-answer award
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewarded_quizzes: Vec<String>,
}

impl GamificationState {
    pub fn has_completed(&self, chapter_id: &str) -> bool {
        self.completed_chapters.iter().any(|c| c == chapter_id)
    }

    pub fn was_rewarded(&self, quiz_id: &str) -> bool {
        self.rewarded_quizzes.iter().any(|q| q == quiz_id)
    }

    /// Drop repeated chapter and quiz ids, keeping the first occurrence
    pub fn normalize(&mut self) {
        dedup_keep_first(&mut self.completed_chapters);
        dedup_keep_first(&mut self.rewarded_quizzes);
    }
}

fn dedup_keep_first(ids: &mut Vec<String>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

// ============================================================================
// Load / Save
// ============================================================================

fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            debug!("Store read of '{}' failed, using default: {}", key, e);
            return T::default();
        }
    };

    // A literal `null` also falls back to the default
    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            debug!("Stored '{}' is malformed, using default: {}", key, e);
            T::default()
        }
    }
}

fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Read the answer map, default when absent or malformed
pub fn load_answers<S: KeyValueStore + ?Sized>(store: &S) -> AnswerMap {
    load_or_default(store, ANSWERS_KEY)
}

pub fn save_answers<S: KeyValueStore + ?Sized>(store: &mut S, answers: &AnswerMap) -> StoreResult<()> {
    save_json(store, ANSWERS_KEY, answers)
}

/// Read the gamification record, default when absent or malformed
pub fn load_gamification<S: KeyValueStore + ?Sized>(store: &S) -> GamificationState {
    let mut state: GamificationState = load_or_default(store, GAMIFICATION_KEY);
    state.normalize();
    state
}

pub fn save_gamification<S: KeyValueStore + ?Sized>(
    store: &mut S,
    state: &GamificationState,
) -> StoreResult<()> {
    save_json(store, GAMIFICATION_KEY, state)
}
