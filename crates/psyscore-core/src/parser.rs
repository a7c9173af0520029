//! Question bank, answer and participant file loading.
//!
//! Question banks are TOML (hand-written) or JSON (exported from the data
//! store). Answers and participants are JSON exports.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AnswerMap, Domain, Participant, Question, QuestionKind};

/// A question bank file.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub bank: BankHeader,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BankHeader {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Parse a question bank file, by extension (`.toml` or `.json`).
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        parse_question_bank_json(&content, path)
    } else {
        parse_question_bank_str(&content, path)
    }
}

/// Parse a TOML question bank string.
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))
}

/// Parse a JSON question bank: either a bare array of questions as exported
/// from the `questions` table, or an object with a `questions` field.
pub fn parse_question_bank_json(content: &str, source_path: &Path) -> Result<QuestionBank> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum JsonBank {
        Rows(Vec<Question>),
        Wrapped(QuestionBank),
    }

    let parsed: JsonBank = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;
    Ok(match parsed {
        JsonBank::Rows(questions) => QuestionBank {
            bank: BankHeader::default(),
            questions,
        },
        JsonBank::Wrapped(bank) => bank,
    })
}

/// Load an answer map (`{"<question id>": value, ...}`).
pub fn load_answers(path: &Path) -> Result<AnswerMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
}

/// Load exported participant records.
pub fn load_participants(path: &Path) -> Result<Vec<Participant>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read participants: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse participants JSON: {}", path.display()))
}

/// Write participant records as pretty JSON.
pub fn save_participants(path: &Path, participants: &[Participant]) -> Result<()> {
    let json = serde_json::to_string_pretty(participants).context("failed to serialize participants")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write participants to {}", path.display()))
}

/// Load all `.toml` and `.json` question banks from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            match parse_question_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: u32, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id),
            message: message.into(),
        }
    }
}

/// Check a question bank for problems that would silently skew scores.
pub fn validate_question_bank(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate ids
    let mut seen_ids = HashSet::new();
    for q in questions {
        if !seen_ids.insert(q.id) {
            warnings.push(ValidationWarning::question(
                q.id,
                format!("duplicate question id: {}", q.id),
            ));
        }
    }

    // Order indices must be positive and unique within a domain
    let mut seen_orders: HashMap<(Domain, u32), u32> = HashMap::new();
    for q in questions {
        if q.order_index == 0 {
            warnings.push(ValidationWarning::question(q.id, "order_index must be positive"));
        }
        if let Some(first) = seen_orders.insert((q.domain, q.order_index), q.id) {
            warnings.push(ValidationWarning::question(
                q.id,
                format!(
                    "{} order_index {} already used by question {}",
                    q.domain, q.order_index, first
                ),
            ));
        }
    }

    // Question type must fit the domain
    for q in questions {
        match (&q.kind, q.domain.is_likert()) {
            (QuestionKind::Likert, false) => {
                warnings.push(ValidationWarning::question(
                    q.id,
                    "likert question in the cognitive domain is never scored",
                ));
            }
            (QuestionKind::MultipleChoice { .. }, true) => {
                warnings.push(ValidationWarning::question(
                    q.id,
                    format!("multiple_choice question in the {} domain", q.domain),
                ));
            }
            _ => {}
        }
    }

    // Cognitive items need a key inside the option list
    for q in questions {
        if let QuestionKind::MultipleChoice {
            options,
            correct_answer,
        } = &q.kind
        {
            if q.domain != Domain::Cognitive {
                continue;
            }
            match correct_answer {
                None => warnings.push(ValidationWarning::question(q.id, "no correct_answer")),
                Some(c) if *c < 0 || *c as usize >= options.len() => {
                    warnings.push(ValidationWarning::question(
                        q.id,
                        format!("correct_answer {c} is outside {} options", options.len()),
                    ));
                }
                Some(_) => {}
            }
        }
    }

    // Every reverse entry must name an existing item
    for domain in [Domain::Psychological, Domain::Social] {
        let present: HashSet<u32> = questions
            .iter()
            .filter(|q| q.domain == domain)
            .map(|q| q.order_index)
            .collect();
        if present.is_empty() {
            continue;
        }
        for order_index in domain.reverse_set().order_indices() {
            if !present.contains(order_index) {
                warnings.push(ValidationWarning {
                    question_id: None,
                    message: format!(
                        "reverse-coded {domain} item {order_index} is missing from the bank"
                    ),
                });
            }
        }
    }

    warnings
}
