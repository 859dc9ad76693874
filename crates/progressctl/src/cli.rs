//! Command-line definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "progressctl")]
#[command(about = "Track tutorial quiz answers, XP and visit streaks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the progress records (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <config_dir>/tutorial-progress/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit an answer to a quiz
    Answer {
        /// Quiz id, e.g. ch01-q1
        quiz_id: String,

        /// Option the learner picked
        selected: String,

        /// Correct option for this quiz
        #[arg(long)]
        correct: String,

        /// Explanation shown with the feedback
        #[arg(long, default_value = "")]
        explanation: String,

        /// All selectable options, to show the marked widget
        #[arg(long, value_delimiter = ',')]
        options: Vec<String>,
    },

    /// Check a fill-in-the-blank exercise
    Blank {
        /// Blank as EXPECTED=GIVEN, repeatable
        #[arg(long = "pair", value_parser = parse_pair)]
        pairs: Vec<(String, String)>,
    },

    /// Mark a chapter complete
    Complete {
        /// Chapter id, e.g. ch01
        chapter_id: String,
    },

    /// Record a visit (updates the streak)
    Visit {
        /// Visit date as "Mon Jan 01 2024" or 2024-01-01 (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show XP, level, streak and path progress
    Status {
        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the score badge for a chapter page
    Score {
        /// Chapter id, e.g. ch01
        chapter_id: String,

        /// Quiz ids on the page (default: all recorded quizzes of the chapter)
        quiz_ids: Vec<String>,
    },

    /// Print the "On This Page" outline for a heading list file
    Toc {
        /// File with one heading per line: "h2 Title", "h3#anchor Title"
        file: PathBuf,

        /// Treat the page as the homepage (no outline)
        #[arg(long)]
        homepage: bool,
    },

    /// Delete all quiz answers and XP
    Reset {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(expected, given)| (expected.to_string(), given.to_string()))
        .ok_or_else(|| format!("expected EXPECTED=GIVEN, got '{}'", s))
}
