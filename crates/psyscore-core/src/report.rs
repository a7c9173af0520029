//! Analytics report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::ScoreDomain;
use crate::model::{Participant, ResponseQuality};
use crate::quality::{analyze_response_time, TimeCategory};
use crate::statistics::{describe_scores, DescriptiveStats};

/// Aggregate statistics over a set of participant records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub participant_count: usize,
    /// One entry per result domain, in report order.
    pub domains: Vec<DomainSummary>,
    /// Age statistics, absent when there are no participants.
    pub age: Option<DescriptiveStats>,
    pub quality: QualitySummary,
}

/// Descriptive statistics for one domain's scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainSummary {
    pub domain: ScoreDomain,
    pub stats: Option<DescriptiveStats>,
}

/// Counts taken from the stored quality columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitySummary {
    /// Records with `has_straight_lining = true`.
    pub straight_lining: usize,
    /// Records whose response time is under 10 minutes.
    pub too_fast: usize,
    /// Records whose response time is over 60 minutes.
    pub slow: usize,
    /// Records without a stored response time.
    pub untimed: usize,
    /// Records with at least one of the above flags.
    pub flagged: usize,
    /// Records labelled `suspicious` or `invalid`.
    pub suspicious_or_invalid: usize,
}

impl QualitySummary {
    pub fn from_participants(participants: &[Participant]) -> Self {
        let mut summary = QualitySummary::default();
        for p in participants {
            let straight = p.has_straight_lining.unwrap_or(false);
            let time = p.response_time_seconds.map(|s| analyze_response_time(s).category);
            if straight {
                summary.straight_lining += 1;
            }
            match time {
                Some(TimeCategory::TooFast) => summary.too_fast += 1,
                Some(TimeCategory::Slow) => summary.slow += 1,
                Some(TimeCategory::Normal) => {}
                None => summary.untimed += 1,
            }
            if straight || matches!(time, Some(TimeCategory::TooFast | TimeCategory::Slow)) {
                summary.flagged += 1;
            }
            if matches!(
                p.response_quality,
                Some(ResponseQuality::Suspicious | ResponseQuality::Invalid)
            ) {
                summary.suspicious_or_invalid += 1;
            }
        }
        summary
    }
}

/// Score column of one result domain.
pub fn domain_column(participants: &[Participant], domain: ScoreDomain) -> Vec<f64> {
    participants
        .iter()
        .map(|p| p.score(domain) as f64)
        .collect()
}

fn fmt2(value: f64) -> String {
    format!("{}", crate::statistics::round2(value))
}

impl AnalyticsReport {
    /// Build a report from participant records.
    pub fn from_participants(participants: &[Participant]) -> Self {
        let domains = ScoreDomain::ALL
            .iter()
            .map(|&domain| DomainSummary {
                domain,
                stats: describe_scores(&domain_column(participants, domain)),
            })
            .collect();
        let ages: Vec<u32> = participants.iter().map(|p| p.age).collect();

        tracing::info!(participants = participants.len(), "built analytics report");
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            participant_count: participants.len(),
            domains,
            age: describe_scores(&ages),
            quality: QualitySummary::from_participants(participants),
        }
    }

    pub fn domain(&self, domain: ScoreDomain) -> Option<&DescriptiveStats> {
        self.domains
            .iter()
            .find(|d| d.domain == domain)
            .and_then(|d| d.stats.as_ref())
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AnalyticsReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// The plain-text block pasted into write-ups.
    pub fn summary_text(&self) -> String {
        let mut text = format!("Sampel: N = {}", self.participant_count);
        for summary in &self.domains {
            let name = match summary.domain {
                ScoreDomain::DigitSpan => "Digit Span",
                other => other.label(),
            };
            match &summary.stats {
                Some(s) => text.push_str(&format!(
                    "\n{name}: M = {}, SD = {}",
                    fmt2(s.mean),
                    fmt2(s.sd)
                )),
                None => text.push_str(&format!("\n{name}: -")),
            }
        }
        text
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Sample:** N = {} | flagged: {} | straight-lining: {} | too fast: {} | slow: {}\n\n",
            self.participant_count,
            self.quality.flagged,
            self.quality.straight_lining,
            self.quality.too_fast,
            self.quality.slow
        ));

        md.push_str("| Domain | N | Mean | SD | Min | Max | Median | Q1 | Q3 |\n");
        md.push_str("|--------|---|------|----|-----|-----|--------|----|----|\n");
        for summary in &self.domains {
            match &summary.stats {
                Some(s) => {
                    let s = s.rounded();
                    md.push_str(&format!(
                        "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                        summary.domain, s.n, s.mean, s.sd, s.min, s.max, s.median, s.q1, s.q3
                    ));
                }
                None => md.push_str(&format!("| {} | 0 | - | - | - | - | - | - | - |\n", summary.domain)),
            }
        }

        if let Some(age) = &self.age {
            let age = age.rounded();
            md.push_str(&format!(
                "\nAge: M = {}, SD = {}, range {}-{}\n",
                age.mean, age.sd, age.min, age.max
            ));
        }

        md
    }
}
