//! View Models
//!
//! Plain data the UI layer renders: the stats bar, path progress rings,
//! chapter score badges and the state of a quiz widget after answering.
//! Builders take already-loaded records and never fail.

use crate::config::CourseLayout;
use crate::levels::{compute_level, level_progress, LevelProgress};
use crate::records::{AnswerMap, GamificationState};
use crate::stats::{
    aggregate_chapter_stats, chapter_score, compute_completion_count, compute_path_percentage,
    ChapterStats,
};
use crate::tracker::XP_PER_CORRECT;
use serde::{Deserialize, Serialize};

/// Circumference of the SVG progress ring on path cards
pub const PROGRESS_RING_CIRCUMFERENCE: f64 = 97.4;

/// Progress ring for one learning path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathProgress {
    pub name: String,
    pub percent: u32,
    /// `stroke-dashoffset` of the ring fill
    pub stroke_dashoffset: f64,
}

impl PathProgress {
    pub fn new(name: &str, percent: u32) -> Self {
        let pct = percent.min(100) as f64;
        Self {
            name: name.to_string(),
            percent,
            stroke_dashoffset: PROGRESS_RING_CIRCUMFERENCE - (pct / 100.0) * PROGRESS_RING_CIRCUMFERENCE,
        }
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Stats bar and path cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub xp: u64,
    pub streak: u32,
    pub level: u32,
    pub level_progress: LevelProgress,
    pub completed: usize,
    pub total_chapters: u32,
    pub paths: Vec<PathProgress>,
}

impl Dashboard {
    pub fn build(answers: &AnswerMap, state: &GamificationState, layout: &CourseLayout) -> Self {
        let aggregates = aggregate_chapter_stats(answers);
        let paths = layout
            .paths
            .iter()
            .map(|p| PathProgress::new(&p.name, compute_path_percentage(&p.chapters, &aggregates)))
            .collect();

        Self {
            xp: state.xp,
            streak: state.streak,
            level: compute_level(state.xp),
            level_progress: level_progress(state.xp),
            completed: compute_completion_count(&aggregates, &state.completed_chapters),
            total_chapters: layout.total_chapters,
            paths,
        }
    }

    /// "n/22"
    pub fn completed_label(&self) -> String {
        format!("{}/{}", self.completed, self.total_chapters)
    }

    pub fn path(&self, name: &str) -> Option<&PathProgress> {
        self.paths.iter().find(|p| p.name == name)
    }
}

/// Score badge text for a chapter page
pub fn score_badge(chapter_quiz_ids: &[String], answers: &AnswerMap) -> String {
    format_score(chapter_score(chapter_quiz_ids, answers))
}

pub fn format_score(score: ChapterStats) -> String {
    format!("🏆 Score: {}/{}", score.correct, score.total)
}

// ============================================================================
// Quiz widget
// ============================================================================

/// Highlight applied to one option label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    Correct,
    Incorrect,
    Unmarked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionView {
    pub value: String,
    pub mark: OptionMark,
    pub disabled: bool,
}

/// State of a quiz widget once an answer is shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    pub options: Vec<OptionView>,
    pub is_correct: bool,
    /// "correct" or "incorrect"
    pub feedback_class: &'static str,
    pub feedback: String,
    /// "+25 XP" when this answer was just credited
    pub xp_badge: Option<String>,
    pub button_label: &'static str,
    pub button_disabled: bool,
}

impl QuizView {
    /// Render an answer. `freshly_credited` is true only for a live answer that
    /// earned XP; reloading a stored answer shows no badge.
    pub fn build(
        options: &[String],
        selected: &str,
        correct_option: &str,
        explanation: &str,
        freshly_credited: bool,
    ) -> Self {
        let is_correct = selected == correct_option;
        let options = options
            .iter()
            .map(|value| {
                let mark = if value == correct_option {
                    OptionMark::Correct
                } else if value == selected && !is_correct {
                    OptionMark::Incorrect
                } else {
                    OptionMark::Unmarked
                };
                OptionView {
                    value: value.clone(),
                    mark,
                    disabled: true,
                }
            })
            .collect();

        let (feedback_class, prefix, button_label) = if is_correct {
            ("correct", "✅ Correct! ", "✓ Correct!")
        } else {
            ("incorrect", "❌ Not quite. ", "Try again next time")
        };

        Self {
            options,
            is_correct,
            feedback_class,
            feedback: format!("{}{}", prefix, explanation),
            xp_badge: (is_correct && freshly_credited).then(|| format!("+{} XP", XP_PER_CORRECT)),
            button_label,
            button_disabled: true,
        }
    }
}

/// Transient "+N XP" acknowledgment text
pub fn xp_toast(amount: u64) -> String {
    format!("+{} XP ⚡", amount)
}
