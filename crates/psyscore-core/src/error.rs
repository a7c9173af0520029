//! Error types for the strict scoring layer and the digit-span game.
//!
//! The default scorers never fail; these errors only come out of the
//! validating entry points in [`crate::validation`] and from game state
//! transitions in [`crate::digit_span`].

use thiserror::Error;

use crate::model::{Domain, QuestionId};

/// Rejections raised by the strict scoring entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// An answer lies outside the valid range for its question type.
    #[error("answer {value} for question {question_id} is outside 0..={max}")]
    AnswerOutOfRange {
        question_id: QuestionId,
        value: i32,
        max: i32,
    },

    /// A multiple-choice item has no keyed answer.
    #[error("question {0} has no correct_answer")]
    MissingCorrectAnswer(QuestionId),

    /// A question's type does not fit the scorer it was handed to.
    #[error("question {question_id} is {found}, expected {expected}")]
    KindMismatch {
        question_id: QuestionId,
        expected: &'static str,
        found: &'static str,
    },

    /// A question from another domain was passed to a domain scorer.
    #[error("question {question_id} belongs to {found}, expected {expected}")]
    DomainMismatch {
        question_id: QuestionId,
        expected: Domain,
        found: Domain,
    },

    /// A reverse-set entry matches no item's `order_index` in the domain,
    /// which usually means the set was populated with question ids.
    #[error("reverse entry {order_index} matches no {domain} item")]
    UnknownReverseIndex { domain: Domain, order_index: u32 },

    /// Statistics were requested over no observations.
    #[error("cannot describe an empty sample")]
    EmptySample,
}

/// Invalid digit-span game transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigitSpanError {
    /// `submit` was called with no sequence shown.
    #[error("no round in progress")]
    NoActiveRound,

    /// Submitted input length differs from the current span.
    #[error("expected {expected} digits, got {actual}")]
    InputLength { expected: usize, actual: usize },

    /// Reversed mode requires a successful forward round first.
    #[error("reversed mode is locked until a forward span is achieved")]
    ForwardIncomplete,

    /// The game was already finished.
    #[error("game already finished")]
    Finished,
}

impl ScoringError {
    /// Returns `true` if the error points at the question bank rather than
    /// at a participant's answers.
    pub fn is_bank_error(&self) -> bool {
        matches!(
            self,
            ScoringError::MissingCorrectAnswer(_)
                | ScoringError::KindMismatch { .. }
                | ScoringError::DomainMismatch { .. }
                | ScoringError::UnknownReverseIndex { .. }
        )
    }
}
