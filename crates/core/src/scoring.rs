//! Scoring module - line clears, T-Spins, drops, level and gravity
//!
//! A lock is scored exactly once: either through the line-clear tables (when it
//! completes rows) or through the zero-line spin bonus (when it does not).
//! Scores are not multiplied by level.

use crate::types::{
    SpinKind, BASE_FALL_MS, FALL_STEP_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES,
    MIN_FALL_MS, SOFT_DROP_POINTS, TSPIN_FULL_SCORES, TSPIN_FULL_ZERO_LINE_BONUS,
    TSPIN_MINI_SCORES, TSPIN_MINI_ZERO_LINE_BONUS,
};

/// Points for clearing `lines` rows with no spin.
///
/// Counts outside the table fall back to the four-line value.
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(LINE_SCORES[4])
}

/// Points for a T-Spin that cleared `lines` (>= 1) rows.
///
/// Unlisted counts fall back to the single-line value of the same kind.
pub fn calculate_tspin_score(spin: SpinKind, lines: usize) -> u32 {
    let table: &[u32] = match spin {
        SpinKind::Full => &TSPIN_FULL_SCORES,
        SpinKind::Mini => &TSPIN_MINI_SCORES,
        SpinKind::None => return calculate_line_score(lines),
    };
    lines
        .checked_sub(1)
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or(table[0])
}

/// Score for a lock that completed `lines` rows (>= 1)
pub fn calculate_clear_score(lines: usize, spin: SpinKind) -> u32 {
    match spin {
        SpinKind::None => calculate_line_score(lines),
        SpinKind::Full | SpinKind::Mini => calculate_tspin_score(spin, lines),
    }
}

/// Bonus for a spin whose lock completed no rows
pub fn calculate_zero_line_bonus(spin: SpinKind) -> u32 {
    match spin {
        SpinKind::Full => TSPIN_FULL_ZERO_LINE_BONUS,
        SpinKind::Mini => TSPIN_MINI_ZERO_LINE_BONUS,
        SpinKind::None => 0,
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * HARD_DROP_POINTS
    } else {
        cells * SOFT_DROP_POINTS
    }
}

/// Level for a line total; starts at 1 and rises every 10 lines
pub fn calculate_level(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level (1-based), in milliseconds
pub fn get_fall_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(FALL_STEP_MS);
    BASE_FALL_MS.saturating_sub(reduction).max(MIN_FALL_MS)
}
