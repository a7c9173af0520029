//! Shared fixtures for unit tests.

use crate::model::{AnswerMap, Domain, Question};

/// 20-item Likert domain with ids offset from order indices, like the
/// stored bank (psychological ids 11–30, social ids 31–50).
pub(crate) fn likert_domain(domain: Domain, first_id: u32) -> Vec<Question> {
    (1..=20)
        .map(|order| Question::likert(first_id + order - 1, domain, order, "item"))
        .collect()
}

/// 10 keyed cognitive items (ids 1–10) whose correct option cycles 1, 2, 3, 0.
pub(crate) fn cognitive_domain() -> Vec<Question> {
    (1..=10)
        .map(|order| {
            Question::multiple_choice(order, order, "soal", &["A", "B", "C", "D"], (order % 4) as i32)
        })
        .collect()
}

/// The standard 50-item bank: cognitive ids 1–10, psychological 11–30,
/// social 31–50.
pub(crate) fn standard_bank() -> Vec<Question> {
    let mut bank = cognitive_domain();
    bank.extend(likert_domain(Domain::Psychological, 11));
    bank.extend(likert_domain(Domain::Social, 31));
    bank
}

/// Every cognitive item right and every Likert item at `likert`.
pub(crate) fn answers_for(bank: &[Question], likert: i32) -> AnswerMap {
    bank.iter()
        .map(|q| (q.id, q.correct_answer().unwrap_or(likert)))
        .collect()
}
