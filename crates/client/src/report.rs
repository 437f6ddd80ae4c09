//! Rendering of optimizer results and effect reports.
use std::fmt::Write as _;

use anyhow::Result;
use loadout_core::{CostumeResult, SlotType};
use loadout_runtime::EffectReport;
use serde::Serialize;

use crate::config::OutputFormat;

#[derive(Serialize)]
struct RankedResults<'a> {
    character: &'a str,
    targets: &'a [String],
    results: &'a [CostumeResult],
}

/// Ranked costumes, best first.
pub fn render_results(
    character: &str,
    targets: &[String],
    results: &[CostumeResult],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&RankedResults {
            character,
            targets,
            results,
        })?),
        OutputFormat::Text => Ok(results_text(character, targets, results)),
    }
}

/// Effects of the equipped loadout on one costume.
pub fn render_effects(report: &EffectReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(effects_text(report)),
    }
}

fn results_text(character: &str, targets: &[String], results: &[CostumeResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{character}: {}", targets.join("、"));
    if results.is_empty() {
        let _ = writeln!(out, "no costume matches the request");
        return out;
    }

    for (rank, result) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n{}. {} [{} {}]  score {:.2}",
            rank + 1,
            result.costume_name,
            result.rarity,
            "★".repeat(usize::from(result.star_level)),
            result.score
        );
        for summary in &result.configuration {
            let kind = match summary.slot_type {
                SlotType::Normal => "N",
                SlotType::Special => "S",
            };
            let _ = writeln!(
                out,
                "   {kind}{:>2}  {:<8} {}  {}",
                summary.slot_number,
                summary.role,
                summary.memory_name,
                summary.skill.as_deref().unwrap_or("-")
            );
        }
        for effect in result.effects.iter() {
            let _ = writeln!(out, "   {}  {}", effect.name, effect.formatted());
        }
        if !result.effects.special_skills().is_empty() {
            let _ = writeln!(out, "   special: {}", result.effects.special_skills().join("、"));
        }
    }
    out
}

fn effects_text(report: &EffectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} / {}", report.character_name, report.costume_name);
    if report.effects.is_empty() && report.special_skills.is_empty() {
        let _ = writeln!(out, "   nothing equipped");
        return out;
    }
    for effect in &report.effects {
        let _ = writeln!(out, "   {}  {}  {}", effect.name, effect.value, effect.description);
    }
    if !report.special_skills.is_empty() {
        let _ = writeln!(out, "   special: {}", report.special_skills.join("、"));
    }
    out
}
