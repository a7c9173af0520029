//! CSV exports.
//!
//! Rows are built as plain strings. Fields containing a comma, quote or
//! newline are wrapped in quotes with inner quotes doubled.

use std::borrow::Cow;
use std::fmt::Write as _;

use anyhow::{anyhow, Result};
use psyscore_core::model::Participant;

use crate::codebook::CodebookEntry;

/// Header of the dashboard export.
pub const DASHBOARD_HEADER: [&str; 8] = [
    "ID",
    "Nama",
    "Umur",
    "Kognitif",
    "Psikologis",
    "Sosial",
    "Digit Span",
    "Tanggal",
];

/// Quote a field if it needs it.
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Join already-escaped fields into one line.
pub fn csv_line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields.into_iter().collect::<Vec<_>>().join(",")
}

/// Summary table as shown on the admin dashboard.
///
/// `date_format` is a `chrono` format string, `%d/%m/%Y` by default. An
/// unknown specifier is an error.
pub fn dashboard_csv(participants: &[Participant], date_format: &str) -> Result<String> {
    let mut out = csv_line(DASHBOARD_HEADER);
    for p in participants {
        let mut date = String::new();
        write!(date, "{}", p.created_at.format(date_format))
            .map_err(|_| anyhow!("invalid date format: {date_format:?}"))?;
        let row = [
            p.id.to_string(),
            csv_field(&p.name).into_owned(),
            p.age.to_string(),
            p.cognitive_score.to_string(),
            p.psychological_score.to_string(),
            p.social_score.to_string(),
            p.digit_span_score.to_string(),
            date,
        ];
        out.push('\n');
        out.push_str(&csv_line(row.iter().map(String::as_str)));
    }
    Ok(out)
}

fn participant_value(p: &Participant, entry: &CodebookEntry) -> String {
    if let Some(question_id) = entry.question_id {
        return p
            .responses
            .as_ref()
            .and_then(|r| r.get(&question_id))
            .map(|v| v.to_string())
            .unwrap_or_default();
    }
    match entry.variable_name.as_str() {
        "participant_id" => p.id.to_string(),
        "name" => csv_field(&p.name).into_owned(),
        "age" => p.age.to_string(),
        "cognitive_score" => p.cognitive_score.to_string(),
        "psychological_score" => p.psychological_score.to_string(),
        "social_score" => p.social_score.to_string(),
        "digit_span_score" => p.digit_span_score.to_string(),
        "response_time_seconds" => p
            .response_time_seconds
            .map(|s| s.to_string())
            .unwrap_or_default(),
        "created_at" => p.created_at.to_rfc3339(),
        _ => String::new(),
    }
}

/// One row per participant, one column per codebook entry.
///
/// Item columns are filled from the participant's raw responses and left
/// empty when the record carries none.
pub fn research_csv(participants: &[Participant], codebook: &[CodebookEntry]) -> String {
    let mut out = csv_line(codebook.iter().map(|e| e.variable_name.as_str()));
    for p in participants {
        let row: Vec<String> = codebook.iter().map(|e| participant_value(p, e)).collect();
        out.push('\n');
        out.push_str(&csv_line(row.iter().map(String::as_str)));
    }
    out
}
