//! The `psyscore validate` command.

use std::path::PathBuf;

use anyhow::Result;

use psyscore_core::model::Domain;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        psyscore_core::parser::load_bank_directory(&bank_path)?
    } else {
        vec![psyscore_core::parser::parse_question_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        let name = if bank.bank.name.is_empty() {
            "(unnamed)"
        } else {
            bank.bank.name.as_str()
        };
        let counts: Vec<String> = Domain::ALL
            .iter()
            .map(|d| {
                let n = bank.questions.iter().filter(|q| q.domain == *d).count();
                format!("{n} {d}")
            })
            .collect();
        println!(
            "Question bank: {name} ({} questions: {})",
            bank.questions.len(),
            counts.join(", ")
        );

        let warnings = psyscore_core::parser::validate_question_bank(&bank.questions);
        for w in &warnings {
            let prefix = w
                .question_id
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
