//! Variable codebook for research exports.

use serde::{Deserialize, Serialize};

use psyscore_core::model::{domain_questions, Domain, Question, QuestionId};

use crate::csv::{csv_field, csv_line};

const NOTES_PREVIEW_CHARS: usize = 50;

const LIKERT_VALUES: &str =
    "0-4 (0=Sangat Tidak Setuju, 1=Tidak Setuju, 2=Netral, 3=Setuju, 4=Sangat Setuju)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    Numeric,
    Categorical,
    Ordinal,
    Text,
}

impl VariableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::Numeric => "numeric",
            VariableType::Categorical => "categorical",
            VariableType::Ordinal => "ordinal",
            VariableType::Text => "text",
        }
    }
}

/// One column of the research export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodebookEntry {
    pub variable_name: String,
    pub label: String,
    pub variable_type: VariableType,
    #[serde(default)]
    pub values: Option<String>,
    pub notes: String,
    #[serde(default)]
    pub reverse_coded: bool,
    /// Source question for item columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
}

impl CodebookEntry {
    fn participant(
        name: &str,
        label: &str,
        variable_type: VariableType,
        values: Option<&str>,
        notes: &str,
    ) -> Self {
        Self {
            variable_name: name.to_string(),
            label: label.to_string(),
            variable_type,
            values: values.map(str::to_string),
            notes: notes.to_string(),
            reverse_coded: false,
            question_id: None,
        }
    }
}

fn participant_entries() -> Vec<CodebookEntry> {
    use VariableType::*;
    vec![
        CodebookEntry::participant(
            "participant_id",
            "Participant ID",
            Numeric,
            None,
            "Unique identifier for each participant",
        ),
        CodebookEntry::participant(
            "name",
            "Participant Name",
            Text,
            None,
            "Full name (use anonymized code for published data)",
        ),
        CodebookEntry::participant(
            "age",
            "Age",
            Numeric,
            Some("15-18"),
            "Age in years at time of assessment",
        ),
        CodebookEntry::participant(
            "cognitive_score",
            "Cognitive Domain Score",
            Numeric,
            Some("0-10"),
            "Total correct answers in cognitive domain (multiple choice)",
        ),
        CodebookEntry::participant(
            "psychological_score",
            "Psychological Domain Score",
            Numeric,
            Some("0-80"),
            "Sum of psychological items (Likert 0-4), reverse-scored items already calculated",
        ),
        CodebookEntry::participant(
            "social_score",
            "Social Domain Score",
            Numeric,
            Some("0-80"),
            "Sum of social items (Likert 0-4), reverse-scored items already calculated",
        ),
        CodebookEntry::participant(
            "digit_span_score",
            "Digit Span Score",
            Numeric,
            Some("3-15"),
            "Maximum digit span achieved (working memory capacity)",
        ),
        CodebookEntry::participant(
            "response_time_seconds",
            "Total Response Time",
            Numeric,
            None,
            "Total time to complete assessment in seconds",
        ),
        CodebookEntry::participant(
            "created_at",
            "Assessment Date",
            Text,
            None,
            "Date and time assessment was completed (ISO 8601 format)",
        ),
    ]
}

fn preview(text: &str) -> String {
    let head: String = text.chars().take(NOTES_PREVIEW_CHARS).collect();
    format!("\"{head}...\"")
}

fn question_entry(q: &Question) -> CodebookEntry {
    let n = q.order_index;
    match q.domain {
        Domain::Cognitive => {
            let key = q
                .correct_answer()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            CodebookEntry {
                variable_name: format!("cog_q{n}"),
                label: format!("Cognitive Q{n}"),
                variable_type: VariableType::Categorical,
                values: Some("0-3 (0=A, 1=B, 2=C, 3=D)".to_string()),
                notes: format!("{} | Correct answer: {key}", preview(&q.question_text)),
                reverse_coded: false,
                question_id: Some(q.id),
            }
        }
        Domain::Psychological | Domain::Social => {
            let reverse = q.is_reverse_coded();
            let title = match q.domain {
                Domain::Psychological => "Psychological",
                _ => "Social",
            };
            CodebookEntry {
                variable_name: format!(
                    "{}_q{n}{}",
                    q.domain.variable_prefix(),
                    if reverse { "_r" } else { "" }
                ),
                label: format!("{title} Q{n}{}", if reverse { " (R)" } else { "" }),
                variable_type: VariableType::Ordinal,
                values: Some(LIKERT_VALUES.to_string()),
                notes: format!(
                    "{}{}",
                    preview(&q.question_text),
                    if reverse { " | REVERSE SCORED" } else { "" }
                ),
                reverse_coded: reverse,
                question_id: Some(q.id),
            }
        }
    }
}

/// Participant-level entries followed by one entry per question, by domain
/// and `order_index`.
pub fn generate_codebook(bank: &[Question]) -> Vec<CodebookEntry> {
    let mut codebook = participant_entries();
    for domain in Domain::ALL {
        codebook.extend(domain_questions(bank, domain).into_iter().map(question_entry));
    }
    codebook
}

/// The codebook as a CSV document.
pub fn codebook_csv(codebook: &[CodebookEntry]) -> String {
    let mut out = csv_line(["Variable Name", "Label", "Type", "Values", "Notes", "Reverse Coded"]);
    for entry in codebook {
        out.push('\n');
        out.push_str(&csv_line([
            csv_field(&entry.variable_name).as_ref(),
            csv_field(&entry.label).as_ref(),
            entry.variable_type.as_str(),
            csv_field(entry.values.as_deref().unwrap_or("")).as_ref(),
            csv_field(&entry.notes).as_ref(),
            if entry.reverse_coded { "Yes" } else { "No" },
        ]));
    }
    out
}
