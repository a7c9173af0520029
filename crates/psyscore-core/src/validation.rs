//! Strict scoring entry points.
//!
//! Same arithmetic as [`crate::scoring`] and [`crate::statistics`], but input
//! that the permissive functions would silently turn into a plausible number
//! is rejected. Missing answers are still allowed and count as zero.

use crate::error::ScoringError;
use crate::model::{AnswerMap, Domain, Question, QuestionKind};
use crate::scoring::{score_cognitive, score_likert_domain, ReverseSet, LIKERT_MAX};
use crate::statistics::{describe, DescriptiveStats};

/// Highest option index accepted for multiple-choice answers.
pub const MULTIPLE_CHOICE_MAX: i32 = 3;

fn check_range(answers: &AnswerMap, question: &Question, max: i32) -> Result<(), ScoringError> {
    match answers.get(&question.id) {
        Some(&value) if !(0..=max).contains(&value) => Err(ScoringError::AnswerOutOfRange {
            question_id: question.id,
            value,
            max,
        }),
        _ => Ok(()),
    }
}

/// Validating form of [`score_likert_domain`].
///
/// Every question must be a Likert item of `domain`, every present answer
/// must be within 0–4, and every reverse entry must match an `order_index`
/// among the questions.
pub fn score_likert_domain_strict<'a, I>(
    answers: &AnswerMap,
    questions: I,
    domain: Domain,
    reverse: &ReverseSet,
) -> Result<i32, ScoringError>
where
    I: IntoIterator<Item = &'a Question>,
{
    let questions: Vec<&Question> = questions.into_iter().collect();
    for &q in &questions {
        if q.domain != domain {
            return Err(ScoringError::DomainMismatch {
                question_id: q.id,
                expected: domain,
                found: q.domain,
            });
        }
        if !matches!(q.kind, QuestionKind::Likert) {
            return Err(ScoringError::KindMismatch {
                question_id: q.id,
                expected: "likert",
                found: q.kind.type_name(),
            });
        }
        check_range(answers, q, LIKERT_MAX)?;
    }

    for &order_index in reverse.order_indices() {
        if !questions.iter().any(|q| q.order_index == order_index) {
            tracing::warn!(%domain, order_index, "reverse entry matches no item");
            return Err(ScoringError::UnknownReverseIndex { domain, order_index });
        }
    }

    Ok(score_likert_domain(answers, questions, reverse))
}

/// Validating form of [`score_cognitive`].
///
/// Every question must be a keyed multiple-choice item in the cognitive
/// domain, and present answers must index one of its options.
pub fn score_cognitive_strict<'a, I>(answers: &AnswerMap, questions: I) -> Result<i32, ScoringError>
where
    I: IntoIterator<Item = &'a Question>,
{
    let questions: Vec<&Question> = questions.into_iter().collect();
    for &q in &questions {
        if q.domain != Domain::Cognitive {
            return Err(ScoringError::DomainMismatch {
                question_id: q.id,
                expected: Domain::Cognitive,
                found: q.domain,
            });
        }
        let QuestionKind::MultipleChoice {
            options,
            correct_answer,
        } = &q.kind
        else {
            return Err(ScoringError::KindMismatch {
                question_id: q.id,
                expected: "multiple_choice",
                found: q.kind.type_name(),
            });
        };
        if correct_answer.is_none() {
            return Err(ScoringError::MissingCorrectAnswer(q.id));
        }
        let max = if options.is_empty() {
            MULTIPLE_CHOICE_MAX
        } else {
            options.len() as i32 - 1
        };
        check_range(answers, q, max)?;
    }

    Ok(score_cognitive(answers, questions))
}

/// Score one domain of a bank with the strict entry points.
pub fn score_domain_strict(
    answers: &AnswerMap,
    bank: &[Question],
    domain: Domain,
) -> Result<i32, ScoringError> {
    let questions = crate::model::domain_questions(bank, domain);
    match domain {
        Domain::Cognitive => score_cognitive_strict(answers, questions),
        Domain::Psychological | Domain::Social => {
            score_likert_domain_strict(answers, questions, domain, &domain.reverse_set())
        }
    }
}

/// Like [`describe`], but an empty sample is an error.
pub fn describe_strict(values: &[f64]) -> Result<DescriptiveStats, ScoringError> {
    describe(values).ok_or(ScoringError::EmptySample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{PSYCHOLOGICAL_REVERSE, SOCIAL_REVERSE};
    use crate::test_support::{answers_for, cognitive_domain, likert_domain, standard_bank};

    #[test]
    fn strict_matches_permissive_on_valid_input() {
        let qs = likert_domain(Domain::Psychological, 11);
        let answers: AnswerMap = qs.iter().map(|q| (q.id, 4)).collect();
        let strict =
            score_likert_domain_strict(&answers, &qs, Domain::Psychological, &PSYCHOLOGICAL_REVERSE)
                .unwrap();
        assert_eq!(strict, 64);
        assert_eq!(strict, score_likert_domain(&answers, &qs, &PSYCHOLOGICAL_REVERSE));
    }

    #[test]
    fn missing_answers_still_allowed() {
        let qs = likert_domain(Domain::Social, 31);
        let score =
            score_likert_domain_strict(&AnswerMap::new(), &qs, Domain::Social, &SOCIAL_REVERSE)
                .unwrap();
        assert_eq!(score, 8);
    }

    #[test]
    fn rejects_out_of_range_likert() {
        let qs = likert_domain(Domain::Social, 31);
        let mut answers: AnswerMap = qs.iter().map(|q| (q.id, 2)).collect();
        answers.insert(35, 5);
        let err =
            score_likert_domain_strict(&answers, &qs, Domain::Social, &SOCIAL_REVERSE).unwrap_err();
        assert_eq!(
            err,
            ScoringError::AnswerOutOfRange {
                question_id: 35,
                value: 5,
                max: 4
            }
        );

        answers.insert(35, -1);
        assert!(score_likert_domain_strict(&answers, &qs, Domain::Social, &SOCIAL_REVERSE).is_err());
    }

    #[test]
    fn rejects_id_based_reverse_set() {
        let qs = likert_domain(Domain::Social, 31);
        // The defect: reverse entries written as question ids (42, 46).
        let by_id = ReverseSet::new(&[42, 46]);
        let err = score_likert_domain_strict(&AnswerMap::new(), &qs, Domain::Social, &by_id)
            .unwrap_err();
        assert_eq!(
            err,
            ScoringError::UnknownReverseIndex {
                domain: Domain::Social,
                order_index: 42
            }
        );
    }

    #[test]
    fn rejects_wrong_domain_and_kind() {
        let qs = likert_domain(Domain::Psychological, 11);
        let err = score_likert_domain_strict(&AnswerMap::new(), &qs, Domain::Social, &ReverseSet::EMPTY)
            .unwrap_err();
        assert!(matches!(err, ScoringError::DomainMismatch { .. }));

        let err = score_cognitive_strict(&AnswerMap::new(), &qs).unwrap_err();
        assert!(matches!(err, ScoringError::DomainMismatch { .. }));

        let mut cog = cognitive_domain();
        cog[0].kind = QuestionKind::Likert;
        let err = score_cognitive_strict(&AnswerMap::new(), &cog).unwrap_err();
        assert!(matches!(err, ScoringError::KindMismatch { .. }));
    }

    #[test]
    fn cognitive_option_range() {
        let qs = cognitive_domain();
        let mut answers = answers_for(&qs, 0);
        assert_eq!(score_cognitive_strict(&answers, &qs).unwrap(), 10);
        answers.insert(1, 4);
        assert!(score_cognitive_strict(&answers, &qs).is_err());
    }

    #[test]
    fn cognitive_requires_key() {
        let mut qs = cognitive_domain();
        qs[3].kind = QuestionKind::MultipleChoice {
            options: vec!["a".into(), "b".into()],
            correct_answer: None,
        };
        assert_eq!(
            score_cognitive_strict(&AnswerMap::new(), &qs).unwrap_err(),
            ScoringError::MissingCorrectAnswer(4)
        );
    }

    #[test]
    fn whole_bank_strict() {
        let bank = standard_bank();
        let answers = answers_for(&bank, 2);
        assert_eq!(score_domain_strict(&answers, &bank, Domain::Cognitive).unwrap(), 10);
        assert_eq!(score_domain_strict(&answers, &bank, Domain::Psychological).unwrap(), 40);
        assert_eq!(score_domain_strict(&answers, &bank, Domain::Social).unwrap(), 40);
    }

    #[test]
    fn strict_accepts_borrowed_items() {
        let bank = standard_bank();
        let social: Vec<&Question> = bank.iter().filter(|q| q.domain == Domain::Social).collect();
        let answers = answers_for(&bank, 2);
        let score = score_likert_domain_strict(
            &answers,
            social.iter().copied(),
            Domain::Social,
            &SOCIAL_REVERSE,
        )
        .unwrap();
        assert_eq!(score, 40);
    }

    #[test]
    fn empty_sample_is_error() {
        assert_eq!(describe_strict(&[]).unwrap_err(), ScoringError::EmptySample);
        assert_eq!(describe_strict(&[2.0]).unwrap().n, 1);
    }
}
