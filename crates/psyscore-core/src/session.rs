//! Explicit assessment session state.
//!
//! Holds what a participant has entered so far and guards the single insert
//! of their results. The session never talks to storage itself; the caller
//! inserts whatever [`AssessmentSession::claim_save`] hands out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::digit_span::DigitSpanResult;
use crate::engine::{evaluate, AssessmentOutcome, ScoringMode};
use crate::error::ScoringError;
use crate::model::{AnswerMap, NewParticipant, Question, QuestionId};

/// Identity collected on the welcome screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub gender: Option<String>,
}

/// One participant's in-progress assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSession {
    pub participant: ParticipantInfo,
    pub answers: AnswerMap,
    #[serde(default)]
    pub digit_span: Option<DigitSpanResult>,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    saved: bool,
}

impl AssessmentSession {
    pub fn new(participant: ParticipantInfo, started_at: DateTime<Utc>) -> Self {
        Self {
            participant,
            answers: AnswerMap::new(),
            digit_span: None,
            started_at,
            saved: false,
        }
    }

    /// Record or overwrite the answer to one question.
    pub fn record_answer(&mut self, question_id: QuestionId, value: i32) {
        self.answers.insert(question_id, value);
    }

    pub fn record_digit_span(&mut self, result: DigitSpanResult) {
        self.digit_span = Some(result);
    }

    /// Whole seconds between start and `completed_at`, never negative.
    pub fn elapsed_seconds(&self, completed_at: DateTime<Utc>) -> u64 {
        (completed_at - self.started_at).num_seconds().max(0) as u64
    }

    /// Number of bank questions answered so far.
    pub fn answered(&self, bank: &[Question]) -> usize {
        bank.iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    /// Score the session as it stands.
    pub fn complete(
        &self,
        bank: &[Question],
        completed_at: DateTime<Utc>,
        mode: ScoringMode,
    ) -> Result<AssessmentOutcome, ScoringError> {
        let digit_span = self.digit_span.map(|d| d.score()).unwrap_or(0);
        evaluate(
            bank,
            &self.answers,
            digit_span,
            Some(self.elapsed_seconds(completed_at)),
            mode,
        )
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// The record to insert, handed out at most once per session.
    pub fn claim_save(
        &mut self,
        outcome: &AssessmentOutcome,
        created_at: DateTime<Utc>,
    ) -> Option<NewParticipant> {
        if self.saved {
            tracing::debug!(name = %self.participant.name, "results already saved, skipping insert");
            return None;
        }
        self.saved = true;

        Some(NewParticipant {
            name: self.participant.name.clone(),
            age: self.participant.age,
            gender: self.participant.gender.clone(),
            cognitive_score: outcome.scores.cognitive,
            psychological_score: outcome.scores.psychological,
            social_score: outcome.scores.social,
            digit_span_score: outcome.scores.digit_span,
            response_time_seconds: outcome.quality.response_time.map(|t| t.seconds),
            has_straight_lining: outcome.quality.straight_lining,
            response_quality: outcome.quality.quality,
            created_at,
            responses: self.answers.clone(),
            digit_span: self.digit_span,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResponseQuality;
    use crate::test_support::{answers_for, standard_bank};
    use chrono::Duration;

    fn session() -> AssessmentSession {
        AssessmentSession::new(
            ParticipantInfo {
                name: "Siti".into(),
                age: 17,
                gender: Some("P".into()),
            },
            Utc::now() - Duration::minutes(25),
        )
    }

    #[test]
    fn complete_uses_elapsed_time_and_digit_span() {
        let bank = standard_bank();
        let mut s = session();
        for (id, v) in answers_for(&bank, 3) {
            s.record_answer(id, v);
        }
        s.record_answer(11, 0);
        s.record_digit_span(DigitSpanResult {
            forward: 6,
            reversed: 5,
            attempts: 9,
        });
        assert_eq!(s.answered(&bank), 50);

        let outcome = s.complete(&bank, Utc::now(), ScoringMode::Permissive).unwrap();
        assert_eq!(outcome.scores.digit_span, 6);
        assert_eq!(outcome.scores.cognitive, 10);
        let time = outcome.quality.response_time.unwrap();
        assert!(!time.flag);
        assert!(!outcome.quality.straight_lining);
    }

    #[test]
    fn save_is_claimed_once() {
        let bank = standard_bank();
        let mut s = session();
        let now = Utc::now();
        let outcome = s.complete(&bank, now, ScoringMode::Permissive).unwrap();

        let record = s.claim_save(&outcome, now).expect("first claim");
        assert_eq!(record.name, "Siti");
        assert!(s.is_saved());
        assert!(record.response_time_seconds.unwrap() >= 25 * 60);
        assert!(s.claim_save(&outcome, now).is_none());
    }

    #[test]
    fn saved_time_matches_classified_time() {
        let bank = standard_bank();
        let started = Utc::now();
        let mut s = AssessmentSession::new(session().participant, started);
        let completed = started + Duration::seconds(599);
        let outcome = s.complete(&bank, completed, ScoringMode::Permissive).unwrap();

        let record = s
            .claim_save(&outcome, completed + Duration::seconds(5))
            .unwrap();
        assert_eq!(record.response_time_seconds, Some(599));
        assert_eq!(record.response_quality, ResponseQuality::TooFast);
    }

    #[test]
    fn saved_record_keeps_digit_span_modes() {
        let bank = standard_bank();
        let mut s = session();
        let result = DigitSpanResult {
            forward: 7,
            reversed: 5,
            attempts: 11,
        };
        s.record_digit_span(result);
        let now = Utc::now();
        let outcome = s.complete(&bank, now, ScoringMode::Permissive).unwrap();

        let record = s.claim_save(&outcome, now).unwrap();
        assert_eq!(record.digit_span_score, 7);
        assert_eq!(record.digit_span, Some(result));
        assert_eq!(record.into_participant(3).digit_span, Some(result));
    }

    #[test]
    fn no_digit_span_is_stored_as_none() {
        let bank = standard_bank();
        let mut s = session();
        let now = Utc::now();
        let outcome = s.complete(&bank, now, ScoringMode::Permissive).unwrap();
        let record = s.claim_save(&outcome, now).unwrap();
        assert_eq!(record.digit_span_score, 0);
        assert!(record.digit_span.is_none());
    }

    #[test]
    fn elapsed_never_negative() {
        let s = session();
        assert_eq!(s.elapsed_seconds(s.started_at - Duration::seconds(5)), 0);
    }
}
