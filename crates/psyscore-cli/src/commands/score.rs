//! The `psyscore score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use psyscore_core::category::weak_domain_labels;
use psyscore_core::config::load_config_from;
use psyscore_core::engine::{evaluate, AssessmentOutcome, ScoringMode};
use psyscore_core::parser::{load_answers, parse_question_bank};

#[derive(Serialize)]
struct ScoreOutput<'a> {
    bank: &'a str,
    mode: &'static str,
    #[serde(flatten)]
    outcome: &'a AssessmentOutcome,
    weak_domain_labels: Vec<&'static str>,
}

pub fn execute(
    bank_path: PathBuf,
    answers_path: PathBuf,
    digit_span: u32,
    response_time: Option<u64>,
    strict: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = parse_question_bank(&bank_path)?;
    let answers = load_answers(&answers_path)?;

    let mode = if strict || config.strict {
        ScoringMode::Strict
    } else {
        ScoringMode::Permissive
    };

    let outcome = evaluate(&bank.questions, &answers, digit_span, response_time, mode)
        .inspect_err(|e| tracing::warn!("strict scoring rejected {}: {e}", answers_path.display()))
        .with_context(|| format!("failed to score {}", answers_path.display()))?;

    match format.as_str() {
        "json" => {
            let output = ScoreOutput {
                bank: &bank.bank.id,
                mode: match mode {
                    ScoringMode::Permissive => "permissive",
                    ScoringMode::Strict => "strict",
                },
                outcome: &outcome,
                weak_domain_labels: weak_domain_labels(&outcome.scores),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => print_text(&outcome),
    }

    Ok(())
}

fn print_text(outcome: &AssessmentOutcome) {
    for (domain, result) in &outcome.categories {
        println!(
            "{:<11} {:>3}  {:<6} {}",
            domain.label(),
            outcome.scores.get(*domain),
            result.category.to_string(),
            result.description
        );
    }

    let weak = weak_domain_labels(&outcome.scores);
    if weak.is_empty() {
        println!("\nNo weak domains.");
    } else {
        println!("\nWeak domains: {}", weak.join(", "));
    }

    let quality = &outcome.quality;
    println!("\nQuality: {}", quality.quality);
    if quality.straight_lining {
        println!("  Straight-lining detected");
    }
    if let Some(time) = &quality.response_time {
        if time.flag {
            println!("  {}", time.message);
        }
    }
}
