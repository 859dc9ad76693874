//! Chapter Statistics
//!
//! Derivations over the answer map: per-chapter aggregates, the completed
//! chapter count shown on the dashboard, path percentages and chapter score
//! badges. Nothing here is persisted.

use crate::records::AnswerMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between the chapter id and the quiz number in a quiz id
pub const QUIZ_ID_DELIMITER: &str = "-q";

/// Answered and correct quiz counts for one chapter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterStats {
    pub total: u32,
    pub correct: u32,
}

impl ChapterStats {
    /// Every recorded quiz in the chapter is correct
    pub fn is_completed(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

/// Chapter part of a quiz id (`ch01-q3` -> `ch01`). An id without the
/// delimiter is its own chapter.
pub fn chapter_of(quiz_id: &str) -> &str {
    quiz_id
        .split_once(QUIZ_ID_DELIMITER)
        .map(|(chapter, _)| chapter)
        .unwrap_or(quiz_id)
}

/// Count recorded and correct answers per chapter
pub fn aggregate_chapter_stats(answers: &AnswerMap) -> BTreeMap<String, ChapterStats> {
    let mut chapters: BTreeMap<String, ChapterStats> = BTreeMap::new();
    for (quiz_id, record) in answers.iter() {
        let entry = chapters.entry(chapter_of(quiz_id).to_string()).or_default();
        entry.total += 1;
        if record.correct {
            entry.correct += 1;
        }
    }
    chapters
}

/// Completed chapter count shown on the dashboard.
///
/// Two unrelated signals, all-correct-by-quiz and explicitly marked, are
/// combined with `max` rather than reconciled. Overlapping chapters are not
/// deduplicated and disjoint sets are under-counted; the rule is kept as-is.
pub fn compute_completion_count(
    aggregates: &BTreeMap<String, ChapterStats>,
    completed_chapters: &[String],
) -> usize {
    let by_quiz = aggregates.values().filter(|s| s.is_completed()).count();
    by_quiz.max(completed_chapters.len())
}

/// Rounded percentage of correct answers over the given chapters (0-100).
/// Chapters without recorded answers contribute nothing.
pub fn compute_path_percentage<S: AsRef<str>>(
    path_chapter_ids: &[S],
    aggregates: &BTreeMap<String, ChapterStats>,
) -> u32 {
    let (total, correct) = path_chapter_ids
        .iter()
        .filter_map(|id| {
            let id: &str = id.as_ref();
            aggregates.get(id)
        })
        .fold((0u64, 0u64), |(t, c), s| (t + s.total as u64, c + s.correct as u64));

    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// Score badge for a chapter page: `total` is the number of quizzes on the
/// page, `correct` those answered correctly.
pub fn chapter_score<S: AsRef<str>>(chapter_quiz_ids: &[S], answers: &AnswerMap) -> ChapterStats {
    let correct = chapter_quiz_ids
        .iter()
        .filter(|id| answers.is_correct(id.as_ref()))
        .count();
    ChapterStats {
        total: chapter_quiz_ids.len() as u32,
        correct: correct as u32,
    }
}
