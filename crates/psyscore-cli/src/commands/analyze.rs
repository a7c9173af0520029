//! The `psyscore analyze` command.

use std::path::PathBuf;

use anyhow::Result;

use psyscore_core::parser::load_participants;
use psyscore_core::report::AnalyticsReport;

pub fn execute(participants_path: PathBuf, format: String, output: Option<PathBuf>) -> Result<()> {
    let participants = load_participants(&participants_path)?;
    let report = AnalyticsReport::from_participants(&participants);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "summary" => println!("{}", report.summary_text()),
        _ => print_table(&report),
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        tracing::info!("report saved to {}", path.display());
    }

    Ok(())
}

fn print_table(report: &AnalyticsReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Domain", "N", "M", "SD", "Min", "Max", "Median", "Q1", "Q3"]);

    for summary in &report.domains {
        let mut row = vec![Cell::new(summary.domain)];
        match &summary.stats {
            Some(s) => {
                let s = s.rounded();
                row.extend(
                    [s.mean, s.sd, s.min, s.max, s.median, s.q1, s.q3]
                        .iter()
                        .map(Cell::new),
                );
                row.insert(1, Cell::new(s.n));
            }
            None => {
                row.push(Cell::new(0));
                row.extend((0..7).map(|_| Cell::new("-")));
            }
        }
        table.add_row(row);
    }

    println!("Participants: {}", report.participant_count);
    println!("{table}");

    let q = &report.quality;
    println!(
        "Quality: {} flagged ({} straight-lining, {} too fast, {} slow, {} untimed)",
        q.flagged, q.straight_lining, q.too_fast, q.slow, q.untimed
    );
}
