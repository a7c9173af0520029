//! Sample characteristics block for publication.

use std::collections::BTreeMap;

use psyscore_core::model::Participant;
use psyscore_core::statistics::describe_scores;

const RULE: &str = "═══════════════════════════════════════";

/// Participants per age, ascending.
pub fn age_distribution(participants: &[Participant]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for p in participants {
        *counts.entry(p.age).or_insert(0) += 1;
    }
    counts
}

/// Total, age distribution with percentages, and age mean/SD and range.
pub fn sample_characteristics(participants: &[Participant]) -> String {
    let total = participants.len();

    let mut out = String::new();
    out.push_str(RULE);
    out.push_str("\n       SAMPLE CHARACTERISTICS\n");
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str(&format!("Total Participants: {total}\n\n"));

    out.push_str("Age Distribution:\n");
    for (age, count) in age_distribution(participants) {
        let percent = count as f64 / total as f64 * 100.0;
        out.push_str(&format!("  {age} years: {count} ({percent:.1}%)\n"));
    }

    let ages: Vec<u32> = participants.iter().map(|p| p.age).collect();
    if let Some(stats) = describe_scores(&ages) {
        let stats = stats.rounded();
        out.push_str(&format!("\nAge: M = {}, SD = {}\n", stats.mean, stats.sd));
        out.push_str(&format!("Range: {} - {} years\n", stats.min, stats.max));
    }

    out
}
