use criterion::{black_box, criterion_group, criterion_main, Criterion};

use psyscore_core::category::DomainScores;
use psyscore_core::engine::{evaluate, ScoringMode};
use psyscore_core::model::{AnswerMap, Domain, Question};
use psyscore_core::scoring::score_domain;

fn make_bank() -> Vec<Question> {
    let mut bank: Vec<Question> = (1..=10)
        .map(|order| Question::multiple_choice(order, order, "soal", &["A", "B", "C", "D"], 1))
        .collect();
    for (domain, first_id) in [(Domain::Psychological, 11), (Domain::Social, 31)] {
        bank.extend((1..=20).map(|order| Question::likert(first_id + order - 1, domain, order, "item")));
    }
    bank
}

fn make_answers(bank: &[Question]) -> AnswerMap {
    bank.iter()
        .map(|q| (q.id, q.correct_answer().unwrap_or((q.order_index % 5) as i32)))
        .collect()
}

fn bench_domain_scores(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_domain");
    let bank = make_bank();
    let answers = make_answers(&bank);

    for domain in Domain::ALL {
        group.bench_function(domain.to_string(), |b| {
            b.iter(|| score_domain(black_box(&answers), black_box(&bank), domain))
        });
    }

    group.bench_function("empty_answers", |b| {
        let empty = AnswerMap::new();
        b.iter(|| score_domain(black_box(&empty), black_box(&bank), Domain::Psychological))
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let bank = make_bank();
    let answers = make_answers(&bank);

    group.bench_function("permissive", |b| {
        b.iter(|| evaluate(black_box(&bank), black_box(&answers), 7, Some(1500), ScoringMode::Permissive))
    });

    group.bench_function("strict", |b| {
        b.iter(|| evaluate(black_box(&bank), black_box(&answers), 7, Some(1500), ScoringMode::Strict))
    });

    group.bench_function("categories", |b| {
        let scores = DomainScores {
            cognitive: 5,
            psychological: 38,
            social: 52,
            digit_span: 6,
        };
        b.iter(|| black_box(scores).categories())
    });

    group.finish();
}

criterion_group!(benches, bench_domain_scores, bench_evaluate);
criterion_main!(benches);
