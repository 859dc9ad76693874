//! Visit Streak
//!
//! Streaks count consecutive local calendar days. Dates are compared as
//! strings in the `"Mon Jan 01 2024"` form the records store, so only the
//! calendar day matters: 23:59 followed by 00:01 is consecutive.

use crate::records::GamificationState;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// chrono format of a stored visit date ("Mon Jan 01 2024"). `%Y` pads
/// years below 1000 to four digits ("0999").
pub const VISIT_DATE_FORMAT: &str = "%a %b %d %Y";

/// Render a calendar date the way visit dates are stored
pub fn format_visit_date(date: NaiveDate) -> String {
    date.format(VISIT_DATE_FORMAT).to_string()
}

/// Parse a stored visit date, `None` if it is not in the stored form
pub fn parse_visit_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), VISIT_DATE_FORMAT).ok()
}

/// Today's local calendar date
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// What a visit did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// Already visited today, nothing changed
    SameDay,
    /// Last visit was yesterday, streak grew by one
    Extended,
    /// First visit or a gap, streak restarted at 1
    Restarted,
}

/// Apply a visit on `today` to the gamification state
pub fn apply_visit(state: &mut GamificationState, today: NaiveDate) -> StreakChange {
    let today_str = format_visit_date(today);
    if state.last_visit.as_deref() == Some(today_str.as_str()) {
        return StreakChange::SameDay;
    }

    let yesterday = today.pred_opt().map(format_visit_date);
    let change = match (&state.last_visit, &yesterday) {
        (Some(last), Some(yesterday)) if last == yesterday => {
            state.streak = state.streak.saturating_add(1);
            StreakChange::Extended
        }
        _ => {
            state.streak = 1;
            StreakChange::Restarted
        }
    };

    state.last_visit = Some(today_str);
    change
}
