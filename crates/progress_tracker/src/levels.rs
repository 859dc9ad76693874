//! Level System
//!
//! Levels come from a fixed ascending XP threshold table. Level N is reached
//! once total XP meets `LEVEL_THRESHOLDS[N - 1]`; beyond the last entry the
//! level stays at the top.
//!
//! | Level | XP   |   | Level | XP   |
//! |-------|------|---|-------|------|
//! | 1     | 0    |   | 7     | 1850 |
//! | 2     | 100  |   | 8     | 2500 |
//! | 3     | 250  |   | 9     | 3300 |
//! | 4     | 500  |   | 10    | 4200 |
//! | 5     | 850  |   | 11    | 5200 |
//! | 6     | 1300 |   |       |      |

use serde::{Deserialize, Serialize};

/// XP needed for each level, index 0 is level 1
pub const LEVEL_THRESHOLDS: [u64; 11] = [0, 100, 250, 500, 850, 1300, 1850, 2500, 3300, 4200, 5200];

/// Highest reachable level
pub const MAX_LEVEL: u32 = LEVEL_THRESHOLDS.len() as u32;

/// 1-based level for a total XP value, never below 1
pub fn compute_level(xp: u64) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .rposition(|&threshold| xp >= threshold)
        .map(|idx| idx as u32 + 1)
        .unwrap_or(1)
}

/// Where a learner sits inside their current level band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    /// XP at which the current level started
    pub level_start: u64,
    /// XP of the next threshold, `None` at the top level
    pub next_threshold: Option<u64>,
    /// XP still missing for the next level (0 at the top level)
    pub xp_to_next: u64,
    /// Fraction of the band already covered (0.0 - 1.0)
    pub fraction: f64,
}

/// Progress within the current level band
pub fn level_progress(xp: u64) -> LevelProgress {
    let level = compute_level(xp);
    let level_start = LEVEL_THRESHOLDS[(level - 1) as usize];
    let next_threshold = LEVEL_THRESHOLDS.get(level as usize).copied();

    match next_threshold {
        Some(next) => {
            let band = next - level_start;
            let fraction = (xp - level_start) as f64 / band as f64;
            LevelProgress {
                level,
                level_start,
                next_threshold,
                xp_to_next: next - xp,
                fraction: fraction.clamp(0.0, 1.0),
            }
        }
        None => LevelProgress {
            level,
            level_start,
            next_threshold: None,
            xp_to_next: 0,
            fraction: 1.0,
        },
    }
}
