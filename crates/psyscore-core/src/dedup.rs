//! Duplicate participant detection.
//!
//! Records sharing an exact name are duplicates; the oldest one is kept.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::model::Participant;

/// Which records to keep and which to delete.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DedupPlan {
    /// One record per name, in input order.
    pub keep: Vec<Participant>,
    /// Later duplicates, oldest first within each name.
    pub remove: Vec<Participant>,
}

impl DedupPlan {
    pub fn has_duplicates(&self) -> bool {
        !self.remove.is_empty()
    }

    /// Names that had more than one record.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.remove.iter().map(|p| p.name.as_str()).collect();
        names.dedup();
        names
    }
}

/// Group by name and keep the oldest `created_at` (lower id on ties).
pub fn plan_deduplication(participants: &[Participant]) -> DedupPlan {
    let mut groups: BTreeMap<&str, Vec<&Participant>> = BTreeMap::new();
    for p in participants {
        groups.entry(p.name.as_str()).or_default().push(p);
    }

    let mut keep_ids = HashSet::new();
    let mut remove = Vec::new();
    for (name, mut records) in groups {
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        keep_ids.insert(records[0].id);
        if records.len() > 1 {
            tracing::debug!(name, count = records.len(), "duplicate participant records");
            remove.extend(records[1..].iter().map(|p| (*p).clone()));
        }
    }

    let keep = participants
        .iter()
        .filter(|p| keep_ids.contains(&p.id))
        .cloned()
        .collect();

    DedupPlan { keep, remove }
}
