//! Command handlers
//!
//! Each subcommand is one tracker action followed by a render of what the
//! page would show. Output goes to a writer so tests can capture it.

use crate::cli::Commands;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use progress_tracker::page::{build_toc, parse_outline};
use progress_tracker::stats::chapter_of;
use progress_tracker::streak::{parse_visit_date, today_local};
use progress_tracker::view::{format_score, xp_toast};
use progress_tracker::{
    Blank, Dashboard, KeyValueStore, OptionMark, ProgressTracker, QuizView, XpAward,
};
use std::fs;
use std::io::{BufRead, Write};

/// Run one command against the tracker. `color` enables ANSI styling and
/// should only be set when `out` is a terminal.
pub fn execute<S, W, R>(
    tracker: &mut ProgressTracker<S>,
    command: Commands,
    out: &mut W,
    input: &mut R,
    color: bool,
) -> Result<()>
where
    S: KeyValueStore,
    W: Write,
    R: BufRead,
{
    match command {
        Commands::Answer {
            quiz_id,
            selected,
            correct,
            explanation,
            options,
        } => answer(
            tracker,
            &quiz_id,
            &selected,
            &correct,
            &explanation,
            &options,
            out,
            color,
        ),
        Commands::Blank { pairs } => blank(tracker, pairs, out, color),
        Commands::Complete { chapter_id } => complete(tracker, &chapter_id, out, color),
        Commands::Visit { date } => visit(tracker, date.as_deref(), out),
        Commands::Status { json } => status(tracker, json, out, color),
        Commands::Score {
            chapter_id,
            quiz_ids,
        } => score(tracker, &chapter_id, quiz_ids, out),
        Commands::Toc { file, homepage } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read outline {}", file.display()))?;
            toc(&text, homepage, out)
        }
        Commands::Reset { yes } => reset(tracker, yes, out, input),
    }
}

#[allow(clippy::too_many_arguments)]
fn answer<S: KeyValueStore, W: Write>(
    tracker: &mut ProgressTracker<S>,
    quiz_id: &str,
    selected: &str,
    correct: &str,
    explanation: &str,
    options: &[String],
    out: &mut W,
    color: bool,
) -> Result<()> {
    let outcome = tracker.record_answer(quiz_id, selected, correct);
    let view = QuizView::build(options, selected, correct, explanation, outcome.award.is_some());

    match &view.xp_badge {
        Some(badge) => writeln!(out, "{} {}", view.feedback, paint(badge, color, |s| s.yellow().to_string()))?,
        None => writeln!(out, "{}", view.feedback)?,
    }
    if !view.options.is_empty() {
        let marked: Vec<String> = view
            .options
            .iter()
            .map(|o| match o.mark {
                OptionMark::Correct => format!("{} ✓", o.value),
                OptionMark::Incorrect => format!("{} ✗", o.value),
                OptionMark::Unmarked => o.value.clone(),
            })
            .collect();
        writeln!(out, "  Options: {}", marked.join(" | "))?;
    }
    writeln!(out, "  [{}]", view.button_label)?;

    write_award(out, outcome.award.as_ref(), color)?;
    write_summary(out, &outcome.dashboard)
}

fn blank<S: KeyValueStore, W: Write>(
    tracker: &mut ProgressTracker<S>,
    pairs: Vec<(String, String)>,
    out: &mut W,
    color: bool,
) -> Result<()> {
    let blanks: Vec<Blank> = pairs
        .into_iter()
        .map(|(expected, given)| Blank::new(expected, given))
        .collect();
    let result = tracker.check_fill_blank(&blanks);

    for (i, (blank, ok)) in blanks.iter().zip(&result.outcome.results).enumerate() {
        let mark = if *ok {
            paint("✓", color, |s| s.green().to_string())
        } else {
            paint("✗", color, |s| s.red().to_string())
        };
        writeln!(out, "  {} blank {}: '{}'", mark, i + 1, blank.given.trim())?;
    }
    writeln!(out, "{}", result.outcome.feedback())?;

    write_award(out, result.award.as_ref(), color)?;
    write_summary(out, &result.dashboard)
}

fn complete<S: KeyValueStore, W: Write>(
    tracker: &mut ProgressTracker<S>,
    chapter_id: &str,
    out: &mut W,
    color: bool,
) -> Result<()> {
    let outcome = tracker.mark_chapter_complete(chapter_id);
    if outcome.newly_completed {
        writeln!(out, "Chapter {} marked complete", chapter_id)?;
    } else {
        writeln!(out, "Chapter {} was already complete", chapter_id)?;
    }

    write_award(out, outcome.award.as_ref(), color)?;
    write_summary(out, &outcome.dashboard)
}

/// Accepts the stored form ("Mon Jan 01 2024") or ISO 8601 (2024-01-01)
fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    if let Some(date) = parse_visit_date(s) {
        return Ok(date);
    }
    match NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => bail!("Invalid date '{}', expected \"Mon Jan 01 2024\" or 2024-01-01", s),
    }
}

fn visit<S: KeyValueStore, W: Write>(
    tracker: &mut ProgressTracker<S>,
    date: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let today = match date {
        Some(s) => parse_date_arg(s)?,
        None => today_local(),
    };

    let outcome = tracker.update_streak(today);
    let streak = outcome.state.streak;
    let days = if streak == 1 { "day" } else { "days" };
    writeln!(out, "🔥 Streak: {} {} ({:?})", streak, days, outcome.change)?;
    write_summary(out, &outcome.dashboard)
}

fn status<S: KeyValueStore, W: Write>(
    tracker: &ProgressTracker<S>,
    json: bool,
    out: &mut W,
    color: bool,
) -> Result<()> {
    let dash = tracker.dashboard();
    if json {
        serde_json::to_writer_pretty(&mut *out, &dash).context("Failed to encode dashboard")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", paint("TUTORIAL PROGRESS", color, |s| s.bold().to_string()))?;
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "  XP:        {}", dash.xp)?;
    match dash.level_progress.next_threshold {
        Some(next) => writeln!(
            out,
            "  Level:     {} ({} XP to level {} at {})",
            dash.level,
            dash.level_progress.xp_to_next,
            dash.level + 1,
            next
        )?,
        None => writeln!(out, "  Level:     {} (max)", dash.level)?,
    }
    writeln!(out, "  Streak:    {}", dash.streak)?;
    writeln!(out, "  Completed: {}", dash.completed_label())?;
    writeln!(out)?;
    for path in &dash.paths {
        writeln!(out, "  {:<14} {:>4}", path.name, path.label())?;
    }
    writeln!(out, "{}", "-".repeat(40))?;
    Ok(())
}

fn score<S: KeyValueStore, W: Write>(
    tracker: &ProgressTracker<S>,
    chapter_id: &str,
    quiz_ids: Vec<String>,
    out: &mut W,
) -> Result<()> {
    let quiz_ids = if quiz_ids.is_empty() {
        tracker
            .answers()
            .iter()
            .map(|(id, _)| id)
            .filter(|id| chapter_of(id) == chapter_id)
            .cloned()
            .collect()
    } else {
        quiz_ids
    };

    writeln!(out, "{}", format_score(tracker.chapter_score(&quiz_ids)))?;
    Ok(())
}

fn toc<W: Write>(text: &str, homepage: bool, out: &mut W) -> Result<()> {
    let headings = parse_outline(text);
    match build_toc(&headings, homepage) {
        Some(entries) => {
            writeln!(out, "On This Page")?;
            for entry in entries {
                let indent = if entry.sub { "    " } else { "  " };
                writeln!(out, "{}- {} ({})", indent, entry.text, entry.href())?;
            }
        }
        None => writeln!(out, "No outline for this page")?,
    }
    Ok(())
}

fn reset<S: KeyValueStore, W: Write, R: BufRead>(
    tracker: &mut ProgressTracker<S>,
    yes: bool,
    out: &mut W,
    input: &mut R,
) -> Result<()> {
    if !yes {
        write!(out, "Reset all progress? This clears quiz answers and XP. [y/N] ")?;
        out.flush()?;
        let mut line = String::new();
        input.read_line(&mut line).context("Failed to read confirmation")?;
        if !matches!(line.trim().to_lowercase().as_str(), "y" | "yes") {
            writeln!(out, "Cancelled")?;
            return Ok(());
        }
    }

    tracker.reset_all();
    writeln!(out, "All progress cleared")?;
    Ok(())
}

// ========== Output helpers ==========

/// Apply `style` only when colour is enabled
fn paint(text: &str, color: bool, style: impl Fn(&str) -> String) -> String {
    if color {
        style(text)
    } else {
        text.to_string()
    }
}

fn write_award<W: Write>(out: &mut W, award: Option<&XpAward>, color: bool) -> Result<()> {
    if let Some(award) = award {
        let toast = xp_toast(award.amount);
        writeln!(out, "{}", paint(&toast, color, |s| s.yellow().to_string()))?;
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, dash: &Dashboard) -> Result<()> {
    writeln!(
        out,
        "XP {} | Level {} | Streak {} | Completed {}",
        dash.xp,
        dash.level,
        dash.streak,
        dash.completed_label()
    )?;
    Ok(())
}
