//! The `psyscore dedupe` command.

use std::path::PathBuf;

use anyhow::Result;

use psyscore_core::dedup::plan_deduplication;
use psyscore_core::parser::{load_participants, save_participants};

pub fn execute(participants_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let participants = load_participants(&participants_path)?;
    let plan = plan_deduplication(&participants);

    if !plan.has_duplicates() {
        println!("No duplicates found ({} records).", participants.len());
    } else {
        println!(
            "Found {} duplicate record(s) across {} name(s):",
            plan.remove.len(),
            plan.duplicate_names().len()
        );
        for p in &plan.remove {
            println!(
                "  remove #{} {} ({})",
                p.id,
                p.name,
                p.created_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }

    match output {
        Some(path) => {
            save_participants(&path, &plan.keep)?;
            println!("Kept {} record(s), written to {}", plan.keep.len(), path.display());
        }
        None if plan.has_duplicates() => {
            println!("Dry run; pass --output to write the cleaned records.");
        }
        None => {}
    }

    Ok(())
}
