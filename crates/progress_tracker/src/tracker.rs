//! Progress Tracker
//!
//! One handler per learner action. Each handler reads the persisted records,
//! applies the action, writes the records back (best-effort) and returns the
//! next state together with the dashboard the UI should show.
//!
//! Storage failures never abort an action: the returned outcome always
//! reflects the action even when nothing could be persisted.

use crate::config::CourseLayout;
use crate::fill_blank::{check_blanks, Blank, FillBlankOutcome};
use crate::records::{
    load_answers, load_gamification, save_answers, save_gamification, AnswerMap, AnswerRecord,
    GamificationState,
};
use crate::stats::{aggregate_chapter_stats, chapter_score, ChapterStats};
use crate::store::{KeyValueStore, ANSWERS_KEY, GAMIFICATION_KEY};
use crate::streak::{apply_visit, today_local, StreakChange};
use crate::view::{Dashboard, QuizView};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// XP for the first correct answer to a quiz (and for a solved fill-in-blank)
pub const XP_PER_CORRECT: u64 = 25;

/// XP for explicitly completing a chapter
pub const XP_PER_CHAPTER: u64 = 50;

/// Why XP was credited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AwardReason {
    CorrectAnswer { quiz_id: String },
    ChapterComplete { chapter_id: String },
    FillBlank,
}

/// XP credited by an action, for the "+N XP" acknowledgment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
    pub amount: u64,
    pub reason: AwardReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub quiz_id: String,
    pub record: AnswerRecord,
    /// Record this answer replaced, if any
    pub previous: Option<AnswerRecord>,
    pub award: Option<XpAward>,
    pub state: GamificationState,
    pub dashboard: Dashboard,
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        self.record.correct
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterOutcome {
    pub chapter_id: String,
    /// False when the chapter was already marked
    pub newly_completed: bool,
    pub award: Option<XpAward>,
    pub state: GamificationState,
    pub dashboard: Dashboard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitOutcome {
    pub change: StreakChange,
    pub state: GamificationState,
    pub dashboard: Dashboard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillBlankResult {
    pub outcome: FillBlankOutcome,
    pub award: Option<XpAward>,
    pub state: GamificationState,
    pub dashboard: Dashboard,
}

/// Quiz, XP and streak bookkeeping over an injected store
pub struct ProgressTracker<S: KeyValueStore> {
    store: S,
    layout: CourseLayout,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    /// Tracker with the default course layout
    pub fn new(store: S) -> Self {
        Self::with_layout(store, CourseLayout::default())
    }

    pub fn with_layout(store: S, layout: CourseLayout) -> Self {
        Self { store, layout }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn layout(&self) -> &CourseLayout {
        &self.layout
    }

    /// Current answer map
    pub fn answers(&self) -> AnswerMap {
        load_answers(&self.store)
    }

    /// Current gamification state
    pub fn gamification(&self) -> GamificationState {
        load_gamification(&self.store)
    }

    // ========== Actions ==========

    /// Record an answer, overwriting any previous answer to the quiz.
    ///
    /// XP is credited once per quiz id: only when this answer is correct, the
    /// stored answer was not already correct, and the quiz was never paid.
    pub fn record_answer(&mut self, quiz_id: &str, selected: &str, correct_option: &str) -> AnswerOutcome {
        let mut answers = self.answers();
        let record = AnswerRecord {
            selected: selected.to_string(),
            correct: selected == correct_option,
        };
        let previous = answers.insert(quiz_id, record.clone());
        self.persist_answers(&answers);

        let mut state = self.gamification();
        let already_correct = previous.as_ref().map(|r| r.correct).unwrap_or(false);
        // A stored correct answer from a record without the reward list was
        // paid when it was first given
        if already_correct && !state.was_rewarded(quiz_id) {
            state.rewarded_quizzes.push(quiz_id.to_string());
            self.persist_gamification(&state);
        }

        let award = if record.correct && !already_correct && !state.was_rewarded(quiz_id) {
            state.rewarded_quizzes.push(quiz_id.to_string());
            let award = self.credit(
                &mut state,
                XP_PER_CORRECT,
                AwardReason::CorrectAnswer {
                    quiz_id: quiz_id.to_string(),
                },
            );
            Some(award)
        } else {
            None
        };

        debug!(
            "Answer {} = '{}' ({})",
            quiz_id,
            selected,
            if record.correct { "correct" } else { "incorrect" }
        );

        let dashboard = Dashboard::build(&answers, &state, &self.layout);
        AnswerOutcome {
            quiz_id: quiz_id.to_string(),
            record,
            previous,
            award,
            state,
            dashboard,
        }
    }

    /// Mark a chapter complete. A chapter already marked is left alone.
    pub fn mark_chapter_complete(&mut self, chapter_id: &str) -> ChapterOutcome {
        let mut state = self.gamification();
        let newly_completed = !state.has_completed(chapter_id);

        let award = if newly_completed {
            state.completed_chapters.push(chapter_id.to_string());
            Some(self.credit(
                &mut state,
                XP_PER_CHAPTER,
                AwardReason::ChapterComplete {
                    chapter_id: chapter_id.to_string(),
                },
            ))
        } else {
            None
        };

        let dashboard = Dashboard::build(&self.answers(), &state, &self.layout);
        ChapterOutcome {
            chapter_id: chapter_id.to_string(),
            newly_completed,
            award,
            state,
            dashboard,
        }
    }

    /// Register a visit on `today`. A repeat visit on the same day writes nothing.
    pub fn update_streak(&mut self, today: NaiveDate) -> VisitOutcome {
        let mut state = self.gamification();
        let change = apply_visit(&mut state, today);
        if change != StreakChange::SameDay {
            self.persist_gamification(&state);
            debug!("Visit streak {:?}, now {}", change, state.streak);
        }

        let dashboard = Dashboard::build(&self.answers(), &state, &self.layout);
        VisitOutcome {
            change,
            state,
            dashboard,
        }
    }

    /// `update_streak` with the local calendar date
    pub fn visit_today(&mut self) -> VisitOutcome {
        self.update_streak(today_local())
    }

    /// Check a fill-in-the-blank exercise. Every fully correct check is paid,
    /// exercises carry no id to remember them by.
    pub fn check_fill_blank(&mut self, blanks: &[Blank]) -> FillBlankResult {
        let outcome = check_blanks(blanks);
        let mut state = self.gamification();
        let award = if outcome.all_correct {
            Some(self.credit(&mut state, XP_PER_CORRECT, AwardReason::FillBlank))
        } else {
            None
        };

        let dashboard = Dashboard::build(&self.answers(), &state, &self.layout);
        FillBlankResult {
            outcome,
            award,
            state,
            dashboard,
        }
    }

    /// Delete both records. There is no partial reset.
    pub fn reset_all(&mut self) {
        for key in [ANSWERS_KEY, GAMIFICATION_KEY] {
            if let Err(e) = self.store.remove(key) {
                debug!("Failed to remove '{}' (ignored): {}", key, e);
            }
        }
        info!("Progress reset");
    }

    // ========== Derived views ==========

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::build(&self.answers(), &self.gamification(), &self.layout)
    }

    pub fn chapter_stats(&self) -> BTreeMap<String, ChapterStats> {
        aggregate_chapter_stats(&self.answers())
    }

    /// Score for the quizzes a chapter page shows
    pub fn chapter_score(&self, chapter_quiz_ids: &[String]) -> ChapterStats {
        chapter_score(chapter_quiz_ids, &self.answers())
    }

    /// Widget state for a quiz answered earlier, `None` if never answered
    pub fn stored_quiz_view(
        &self,
        quiz_id: &str,
        options: &[String],
        correct_option: &str,
        explanation: &str,
    ) -> Option<QuizView> {
        let answers = self.answers();
        let record = answers.get(quiz_id)?;
        Some(QuizView::build(options, &record.selected, correct_option, explanation, false))
    }

    // ========== Internals ==========

    /// Add XP to `state` and persist it
    fn credit(&mut self, state: &mut GamificationState, amount: u64, reason: AwardReason) -> XpAward {
        state.xp = state.xp.saturating_add(amount);
        self.persist_gamification(state);
        info!("+{} XP ({:?}), total {}", amount, reason, state.xp);
        XpAward { amount, reason }
    }

    fn persist_answers(&mut self, answers: &AnswerMap) {
        if let Err(e) = save_answers(&mut self.store, answers) {
            debug!("Failed to save answers (ignored): {}", e);
        }
    }

    fn persist_gamification(&mut self, state: &GamificationState) {
        if let Err(e) = save_gamification(&mut self.store, state) {
            debug!("Failed to save gamification state (ignored): {}", e);
        }
    }
}
