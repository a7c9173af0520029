//! Three-tier qualitative bands for domain scores.
//!
//! Every result domain uses the same shape around a single pivot:
//! below the pivot is `Kurang`, exactly the pivot is `Cukup`, above is
//! `Bagus`. A domain is "weak" when it falls in the `Kurang` band.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four scored result domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDomain {
    Cognitive,
    Psychological,
    Social,
    DigitSpan,
}

impl ScoreDomain {
    /// All result domains, in report order.
    pub const ALL: [ScoreDomain; 4] = [
        ScoreDomain::Cognitive,
        ScoreDomain::Psychological,
        ScoreDomain::Social,
        ScoreDomain::DigitSpan,
    ];

    /// Score at which the domain is rated `Cukup`.
    pub fn pivot(&self) -> i64 {
        match self {
            ScoreDomain::Cognitive => 5,
            ScoreDomain::Psychological | ScoreDomain::Social => 40,
            ScoreDomain::DigitSpan => 7,
        }
    }

    /// Display name used in results and weak-domain lists.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreDomain::Cognitive => "Kognitif",
            ScoreDomain::Psychological => "Psikologis",
            ScoreDomain::Social => "Sosial",
            ScoreDomain::DigitSpan => "Memori",
        }
    }

    fn descriptions(&self) -> [&'static str; 3] {
        match self {
            ScoreDomain::Cognitive => [
                "Perlu peningkatan dalam aspek kognitif",
                "Kemampuan kognitif memadai",
                "Kemampuan kognitif sangat baik",
            ],
            ScoreDomain::Psychological => [
                "Perlu peningkatan dalam aspek psikologis",
                "Aspek psikologis memadai",
                "Aspek psikologis sangat baik",
            ],
            ScoreDomain::Social => [
                "Perlu peningkatan dalam aspek sosial",
                "Aspek sosial memadai",
                "Aspek sosial sangat baik",
            ],
            ScoreDomain::DigitSpan => [
                "Memori kerja perlu peningkatan",
                "Memori kerja memadai",
                "Memori kerja sangat baik",
            ],
        }
    }
}

impl fmt::Display for ScoreDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Low.
    Kurang,
    /// Adequate.
    Cukup,
    /// Good.
    Bagus,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Kurang => write!(f, "Kurang"),
            Category::Cukup => write!(f, "Cukup"),
            Category::Bagus => write!(f, "Bagus"),
        }
    }
}

/// Display color paired with a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Green,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Yellow => write!(f, "yellow"),
            Color::Green => write!(f, "green"),
        }
    }
}

/// Classification of one domain score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryResult {
    pub category: Category,
    pub color: Color,
    pub description: &'static str,
}

/// Classify a score against its domain's pivot.
pub fn classify(domain: ScoreDomain, score: i64) -> CategoryResult {
    let [low, mid, high] = domain.descriptions();
    let pivot = domain.pivot();
    if score < pivot {
        CategoryResult {
            category: Category::Kurang,
            color: Color::Red,
            description: low,
        }
    } else if score == pivot {
        CategoryResult {
            category: Category::Cukup,
            color: Color::Yellow,
            description: mid,
        }
    } else {
        CategoryResult {
            category: Category::Bagus,
            color: Color::Green,
            description: high,
        }
    }
}

pub fn cognitive_category(score: i32) -> CategoryResult {
    classify(ScoreDomain::Cognitive, score.into())
}

pub fn psychological_category(score: i32) -> CategoryResult {
    classify(ScoreDomain::Psychological, score.into())
}

pub fn social_category(score: i32) -> CategoryResult {
    classify(ScoreDomain::Social, score.into())
}

pub fn digit_span_category(score: u32) -> CategoryResult {
    classify(ScoreDomain::DigitSpan, score.into())
}

/// The four scores of one completed assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomainScores {
    pub cognitive: i32,
    pub psychological: i32,
    pub social: i32,
    pub digit_span: u32,
}

impl DomainScores {
    pub fn get(&self, domain: ScoreDomain) -> i64 {
        match domain {
            ScoreDomain::Cognitive => self.cognitive.into(),
            ScoreDomain::Psychological => self.psychological.into(),
            ScoreDomain::Social => self.social.into(),
            ScoreDomain::DigitSpan => self.digit_span.into(),
        }
    }

    /// Category for every domain, in [`ScoreDomain::ALL`] order.
    pub fn categories(&self) -> Vec<(ScoreDomain, CategoryResult)> {
        ScoreDomain::ALL
            .iter()
            .map(|&d| (d, classify(d, self.get(d))))
            .collect()
    }
}

/// Domains whose score falls below the pivot, in fixed order
/// (cognitive, psychological, social, memory).
pub fn weak_domains(scores: &DomainScores) -> Vec<ScoreDomain> {
    ScoreDomain::ALL
        .into_iter()
        .filter(|d| scores.get(*d) < d.pivot())
        .collect()
}

/// Labels of [`weak_domains`].
pub fn weak_domain_labels(scores: &DomainScores) -> Vec<&'static str> {
    weak_domains(scores).iter().map(|d| d.label()).collect()
}
