//! Display strings for effect values.

use crate::skills::SkillKind;

/// Formats an aggregated value for display.
///
/// Ratios become a signed percentage delta from 1.0 with two decimals
/// (`1.05` → `+5.00%`, `0.99` → `-1.00%`). Flat bonuses become a signed
/// integer, truncated towards zero (`20.4` → `+20`).
pub fn format_value(kind: SkillKind, value: f64) -> String {
    match kind {
        SkillKind::Multiplicative(_) => percentage(value),
        SkillKind::Additive => integer(value),
    }
}

/// Formats a value whose kind is unknown.
///
/// Values strictly between 0.5 and 1.5 are treated as ratios; anything else
/// as a flat bonus.
pub fn format_heuristic(value: f64) -> String {
    if value > 0.5 && value < 1.5 {
        percentage(value)
    } else {
        integer(value)
    }
}

fn percentage(value: f64) -> String {
    let delta = ((value - 1.0) * 100.0 * 100.0).round() / 100.0;
    // Avoid printing "-0.00%".
    let delta = if delta == 0.0 { 0.0 } else { delta };
    format!("{delta:+.2}%")
}

fn integer(value: f64) -> String {
    format!("{:+}", value.trunc() as i64)
}
