//! The `psyscore export` command.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use psyscore_core::config::load_config_from;
use psyscore_core::model::Question;
use psyscore_core::parser::{load_participants, parse_question_bank};
use psyscore_core::report::AnalyticsReport;
use psyscore_report::characteristics::sample_characteristics;
use psyscore_report::codebook::{codebook_csv, generate_codebook};
use psyscore_report::csv::{dashboard_csv, research_csv};
use psyscore_report::html::write_html_report;
use psyscore_report::write_export;

const FORMATS: [&str; 5] = ["csv", "codebook", "research", "html", "characteristics"];

pub fn execute(
    participants_path: PathBuf,
    bank_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output_dir = output.unwrap_or_else(|| config.output_dir.clone());

    let formats: Vec<&str> = if format == "all" {
        FORMATS.to_vec()
    } else if FORMATS.contains(&format.as_str()) {
        vec![format.as_str()]
    } else {
        bail!("unknown export format: {format} (expected one of {}, all)", FORMATS.join(", "));
    };

    let participants = load_participants(&participants_path)?;
    let bank: Option<Vec<Question>> = match &bank_path {
        Some(path) => Some(parse_question_bank(path)?.questions),
        None => None,
    };

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    for fmt in formats {
        let path = match fmt {
            "csv" => {
                let path = output_dir.join("dashboard.csv");
                write_export(&path, &dashboard_csv(&participants, &config.date_format)?)?;
                path
            }
            "codebook" | "research" => {
                let Some(questions) = &bank else {
                    if format == "all" {
                        tracing::warn!("skipping {fmt} export: no --bank given");
                        continue;
                    }
                    bail!("the {fmt} export needs a question bank (--bank)");
                };
                let codebook = generate_codebook(questions);
                if fmt == "codebook" {
                    let path = output_dir.join("codebook.csv");
                    write_export(&path, &codebook_csv(&codebook))?;
                    path
                } else {
                    let path = output_dir.join("research.csv");
                    write_export(&path, &research_csv(&participants, &codebook))?;
                    path
                }
            }
            "html" => {
                let path = output_dir.join("analytics.html");
                let report = AnalyticsReport::from_participants(&participants);
                write_html_report(&report, &participants, &path)?;
                path
            }
            _ => {
                let path = output_dir.join("characteristics.txt");
                write_export(&path, &sample_characteristics(&participants))?;
                path
            }
        };
        println!("Wrote {}", path.display());
    }

    Ok(())
}
