//! Assessment engine.
//!
//! Composes the domain scorers, classifier, weak-domain aggregator and
//! quality checks into the full outcome of one completed assessment.

use serde::Serialize;

use crate::category::{weak_domains, CategoryResult, DomainScores, ScoreDomain};
use crate::error::ScoringError;
use crate::model::{AnswerMap, Domain, Question};
use crate::quality::QualityReport;
use crate::scoring::score_domain;
use crate::validation::score_domain_strict;

/// How answers are checked before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringMode {
    /// Missing or malformed input degrades to a plausible number.
    #[default]
    Permissive,
    /// Malformed answers or banks are rejected.
    Strict,
}

/// Everything derived from one submission.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutcome {
    pub scores: DomainScores,
    /// One entry per result domain, in report order.
    pub categories: Vec<(ScoreDomain, CategoryResult)>,
    /// Domains needing follow-up.
    pub weak_domains: Vec<ScoreDomain>,
    pub quality: QualityReport,
}

/// Score all three questionnaire domains of a bank.
pub fn score_assessment(bank: &[Question], answers: &AnswerMap, digit_span: u32) -> DomainScores {
    DomainScores {
        cognitive: score_domain(answers, bank, Domain::Cognitive),
        psychological: score_domain(answers, bank, Domain::Psychological),
        social: score_domain(answers, bank, Domain::Social),
        digit_span,
    }
}

/// Strict form of [`score_assessment`].
pub fn score_assessment_strict(
    bank: &[Question],
    answers: &AnswerMap,
    digit_span: u32,
) -> Result<DomainScores, ScoringError> {
    Ok(DomainScores {
        cognitive: score_domain_strict(answers, bank, Domain::Cognitive)?,
        psychological: score_domain_strict(answers, bank, Domain::Psychological)?,
        social: score_domain_strict(answers, bank, Domain::Social)?,
        digit_span,
    })
}

/// Likert answers only; multiple-choice answers are not a straight-lining
/// signal.
pub fn likert_answers(bank: &[Question], answers: &AnswerMap) -> AnswerMap {
    bank.iter()
        .filter(|q| q.domain.is_likert())
        .filter_map(|q| answers.get(&q.id).map(|v| (q.id, *v)))
        .collect()
}

/// Score, classify and quality-check one submission.
pub fn evaluate(
    bank: &[Question],
    answers: &AnswerMap,
    digit_span: u32,
    response_time_seconds: Option<u64>,
    mode: ScoringMode,
) -> Result<AssessmentOutcome, ScoringError> {
    let scores = match mode {
        ScoringMode::Permissive => score_assessment(bank, answers, digit_span),
        ScoringMode::Strict => score_assessment_strict(bank, answers, digit_span)?,
    };
    let quality = QualityReport::assess(&likert_answers(bank, answers), response_time_seconds);

    let outcome = AssessmentOutcome {
        categories: scores.categories(),
        weak_domains: weak_domains(&scores),
        scores,
        quality,
    };
    tracing::debug!(
        cognitive = scores.cognitive,
        psychological = scores.psychological,
        social = scores.social,
        digit_span = scores.digit_span,
        weak = outcome.weak_domains.len(),
        "assessment evaluated"
    );
    Ok(outcome)
}
