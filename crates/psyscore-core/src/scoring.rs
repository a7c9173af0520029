//! Domain scorers.
//!
//! Likert domains are summed with reverse-coded items inverted as
//! `LIKERT_MAX - raw`. The cognitive domain counts exact matches against the
//! keyed option. Both are permissive: missing answers count as zero (Likert)
//! or simply fail to match (cognitive), and out-of-range values are not
//! clamped. See [`crate::validation`] for the strict entry points.

use crate::model::{domain_questions, AnswerMap, Domain, Question};

/// Highest value on the 0–4 Likert scale.
pub const LIKERT_MAX: i32 = 4;

/// Reverse-coded items of the psychological domain, by `order_index`.
pub const PSYCHOLOGICAL_REVERSE: ReverseSet = ReverseSet::new(&[2, 6, 17, 18]);

/// Reverse-coded items of the social domain, by `order_index`.
pub const SOCIAL_REVERSE: ReverseSet = ReverseSet::new(&[12, 16]);

/// A fixed set of reverse-coded item positions within one domain.
///
/// Entries are `order_index` values. Never populate this with question ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseSet(&'static [u32]);

impl ReverseSet {
    pub const EMPTY: ReverseSet = ReverseSet(&[]);

    pub const fn new(order_indices: &'static [u32]) -> Self {
        Self(order_indices)
    }

    pub fn contains(&self, order_index: u32) -> bool {
        self.0.contains(&order_index)
    }

    pub fn order_indices(&self) -> &'static [u32] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Mirror a raw Likert value. Applying it twice returns the input.
///
/// Out-of-range input wraps instead of overflowing.
pub fn reverse_value(raw: i32) -> i32 {
    LIKERT_MAX.wrapping_sub(raw)
}

/// The value a single Likert item contributes to its domain sum.
pub fn item_value(answers: &AnswerMap, question: &Question, reverse: &ReverseSet) -> i32 {
    let raw = answers.get(&question.id).copied().unwrap_or(0);
    if reverse.contains(question.order_index) {
        reverse_value(raw)
    } else {
        raw
    }
}

/// Sum a Likert domain with reverse-coded items inverted.
///
/// `questions` is expected to hold one domain's items; every item given is
/// scored. The result lies in `[0, 4 × questions.len()]` for in-range input;
/// out-of-range values are summed with wrapping arithmetic.
pub fn score_likert_domain<'a, I>(answers: &AnswerMap, questions: I, reverse: &ReverseSet) -> i32
where
    I: IntoIterator<Item = &'a Question>,
{
    questions
        .into_iter()
        .map(|q| item_value(answers, q, reverse))
        .fold(0i32, i32::wrapping_add)
}

/// Count answers that exactly equal each question's keyed option.
pub fn score_cognitive<'a, I>(answers: &AnswerMap, questions: I) -> i32
where
    I: IntoIterator<Item = &'a Question>,
{
    questions
        .into_iter()
        .filter(|q| match (answers.get(&q.id), q.correct_answer()) {
            (Some(answer), Some(correct)) => *answer == correct,
            _ => false,
        })
        .count() as i32
}

/// Score one domain of a full question bank, choosing the right scorer and
/// reverse set.
pub fn score_domain(answers: &AnswerMap, bank: &[Question], domain: Domain) -> i32 {
    let questions = domain_questions(bank, domain);
    let score = match domain {
        Domain::Cognitive => score_cognitive(answers, questions.iter().copied()),
        Domain::Psychological | Domain::Social => {
            score_likert_domain(answers, questions.iter().copied(), &domain.reverse_set())
        }
    };
    tracing::debug!(%domain, items = questions.len(), score, "scored domain");
    score
}
