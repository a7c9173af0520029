//! Core data model types for psyscore.
//!
//! These are the records the engine consumes and produces: questions,
//! answer maps, and the stored participant record. They are owned by the
//! external data store; psyscore only reads and derives from them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::ScoreDomain;
use crate::digit_span::DigitSpanResult;
use crate::scoring::{ReverseSet, PSYCHOLOGICAL_REVERSE, SOCIAL_REVERSE};

/// Global storage identifier of a question.
pub type QuestionId = u32;

/// Question id → raw response value.
///
/// Values are 0–3 for multiple choice and 0–4 for Likert items. They are kept
/// signed so that out-of-range input reaches the arithmetic unchanged.
pub type AnswerMap = BTreeMap<QuestionId, i32>;

/// One of the three questionnaire sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Cognitive,
    Psychological,
    Social,
}

impl Domain {
    /// All questionnaire domains in presentation order.
    pub const ALL: [Domain; 3] = [Domain::Cognitive, Domain::Psychological, Domain::Social];

    /// Reverse-coded `order_index` values for this domain.
    pub fn reverse_set(&self) -> ReverseSet {
        match self {
            Domain::Cognitive => ReverseSet::EMPTY,
            Domain::Psychological => PSYCHOLOGICAL_REVERSE,
            Domain::Social => SOCIAL_REVERSE,
        }
    }

    /// Whether items in this domain are Likert-scaled.
    pub fn is_likert(&self) -> bool {
        !matches!(self, Domain::Cognitive)
    }

    /// Short prefix used for per-item variable names in exports.
    pub fn variable_prefix(&self) -> &'static str {
        match self {
            Domain::Cognitive => "cog",
            Domain::Psychological => "psy",
            Domain::Social => "soc",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Cognitive => write!(f, "cognitive"),
            Domain::Psychological => write!(f, "psychological"),
            Domain::Social => write!(f, "social"),
        }
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cognitive" | "kognitif" => Ok(Domain::Cognitive),
            "psychological" | "psikologis" => Ok(Domain::Psychological),
            "social" | "sosial" => Ok(Domain::Social),
            other => Err(format!("unknown domain: {other}")),
        }
    }
}

/// The shape of a question, with the fields that only make sense for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "question_type", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice {
        /// Answer options in display order.
        #[serde(default)]
        options: Vec<String>,
        /// Index of the correct option (cognitive items only).
        #[serde(default)]
        correct_answer: Option<i32>,
    },
    Likert,
}

impl QuestionKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple_choice",
            QuestionKind::Likert => "likert",
        }
    }
}

/// A questionnaire item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Globally unique storage id.
    pub id: QuestionId,
    /// Section this question belongs to.
    pub domain: Domain,
    /// Text shown to the participant.
    pub question_text: String,
    /// Multiple choice or Likert, with kind-specific data.
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// 1-based position within the domain.
    pub order_index: u32,
}

impl Question {
    /// Convenience constructor for a Likert item.
    pub fn likert(id: QuestionId, domain: Domain, order_index: u32, text: &str) -> Self {
        Self {
            id,
            domain,
            question_text: text.to_string(),
            kind: QuestionKind::Likert,
            order_index,
        }
    }

    /// Convenience constructor for a multiple-choice item.
    pub fn multiple_choice(
        id: QuestionId,
        order_index: u32,
        text: &str,
        options: &[&str],
        correct_answer: i32,
    ) -> Self {
        Self {
            id,
            domain: Domain::Cognitive,
            question_text: text.to_string(),
            kind: QuestionKind::MultipleChoice {
                options: options.iter().map(|o| o.to_string()).collect(),
                correct_answer: Some(correct_answer),
            },
            order_index,
        }
    }

    /// The correct option index, if this is a keyed multiple-choice item.
    pub fn correct_answer(&self) -> Option<i32> {
        match &self.kind {
            QuestionKind::MultipleChoice { correct_answer, .. } => *correct_answer,
            QuestionKind::Likert => None,
        }
    }

    /// Whether this item is reverse-coded in its domain.
    pub fn is_reverse_coded(&self) -> bool {
        self.domain.reverse_set().contains(self.order_index)
    }
}

/// Questions of one domain, sorted by `order_index`.
pub fn domain_questions(bank: &[Question], domain: Domain) -> Vec<&Question> {
    let mut questions: Vec<&Question> = bank.iter().filter(|q| q.domain == domain).collect();
    questions.sort_by_key(|q| q.order_index);
    questions
}

/// Data-quality label stored on a participant record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseQuality {
    Normal,
    Good,
    Suspicious,
    Invalid,
    TooFast,
    TooSlow,
}

impl fmt::Display for ResponseQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResponseQuality::Normal => "normal",
            ResponseQuality::Good => "good",
            ResponseQuality::Suspicious => "suspicious",
            ResponseQuality::Invalid => "invalid",
            ResponseQuality::TooFast => "too_fast",
            ResponseQuality::TooSlow => "too_slow",
        };
        f.write_str(s)
    }
}

/// A stored participant record, one per completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub gender: Option<String>,
    /// Correct cognitive answers, 0–10.
    pub cognitive_score: i32,
    /// Reverse-aware Likert sum, 0–80.
    pub psychological_score: i32,
    /// Reverse-aware Likert sum, 0–80.
    pub social_score: i32,
    /// Longest digit span recalled.
    pub digit_span_score: u32,
    #[serde(default)]
    pub response_time_seconds: Option<u64>,
    #[serde(default)]
    pub has_straight_lining: Option<bool>,
    #[serde(default)]
    pub response_quality: Option<ResponseQuality>,
    pub created_at: DateTime<Utc>,
    /// Raw item responses, when exported alongside the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<AnswerMap>,
    /// Per-mode digit-span spans and attempts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digit_span: Option<DigitSpanResult>,
}

/// A participant record ready for insertion (no storage id yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewParticipant {
    pub name: String,
    pub age: u32,
    pub gender: Option<String>,
    pub cognitive_score: i32,
    pub psychological_score: i32,
    pub social_score: i32,
    pub digit_span_score: u32,
    pub response_time_seconds: Option<u64>,
    pub has_straight_lining: bool,
    pub response_quality: ResponseQuality,
    pub created_at: DateTime<Utc>,
    pub responses: AnswerMap,
    pub digit_span: Option<DigitSpanResult>,
}

impl NewParticipant {
    /// Attach the id assigned by the data store.
    pub fn into_participant(self, id: i64) -> Participant {
        Participant {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            cognitive_score: self.cognitive_score,
            psychological_score: self.psychological_score,
            social_score: self.social_score,
            digit_span_score: self.digit_span_score,
            response_time_seconds: self.response_time_seconds,
            has_straight_lining: Some(self.has_straight_lining),
            response_quality: Some(self.response_quality),
            created_at: self.created_at,
            responses: Some(self.responses),
            digit_span: self.digit_span,
        }
    }
}

/// Administrator edit of a stored record. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantEdit {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub cognitive_score: Option<i32>,
    #[serde(default)]
    pub psychological_score: Option<i32>,
    #[serde(default)]
    pub social_score: Option<i32>,
    #[serde(default)]
    pub digit_span_score: Option<u32>,
    #[serde(default)]
    pub response_quality: Option<ResponseQuality>,
}

impl Participant {
    /// Stored score of one result domain.
    pub fn score(&self, domain: ScoreDomain) -> i64 {
        match domain {
            ScoreDomain::Cognitive => i64::from(self.cognitive_score),
            ScoreDomain::Psychological => i64::from(self.psychological_score),
            ScoreDomain::Social => i64::from(self.social_score),
            ScoreDomain::DigitSpan => i64::from(self.digit_span_score),
        }
    }

    /// Apply an administrator edit in place.
    pub fn apply_edit(&mut self, edit: ParticipantEdit) {
        if let Some(name) = edit.name {
            self.name = name;
        }
        if let Some(age) = edit.age {
            self.age = age;
        }
        if let Some(gender) = edit.gender {
            self.gender = Some(gender);
        }
        if let Some(score) = edit.cognitive_score {
            self.cognitive_score = score;
        }
        if let Some(score) = edit.psychological_score {
            self.psychological_score = score;
        }
        if let Some(score) = edit.social_score {
            self.social_score = score;
        }
        if let Some(score) = edit.digit_span_score {
            self.digit_span_score = score;
        }
        if let Some(quality) = edit.response_quality {
            self.response_quality = Some(quality);
        }
    }
}
