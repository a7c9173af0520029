//! The `psyscore init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create psyscore.toml
    if std::path::Path::new("psyscore.toml").exists() {
        println!("psyscore.toml already exists, skipping.");
    } else {
        std::fs::write("psyscore.toml", SAMPLE_CONFIG)?;
        println!("Created psyscore.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("question-banks")?;
    let example_path = std::path::Path::new("question-banks/example.toml");
    if example_path.exists() {
        println!("question-banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created question-banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit question-banks/example.toml or export your bank as JSON");
    println!("  2. Run: psyscore validate --bank question-banks/example.toml");
    println!("  3. Run: psyscore score --bank question-banks/example.toml --answers answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# psyscore configuration

# Where `psyscore export` writes files (override with PSYSCORE_OUTPUT_DIR)
output_dir = "./psyscore-results"

# Reject out-of-range answers and inconsistent banks (override with PSYSCORE_STRICT)
strict = false

# Date column format of the dashboard CSV
date_format = "%d/%m/%Y"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "A small bank to get started; reverse-coded items follow order_index"

[[questions]]
id = 1
domain = "cognitive"
question_text = "Berapakah hasil dari 12 x 4?"
question_type = "multiple_choice"
options = ["36", "48", "52", "44"]
correct_answer = 1
order_index = 1

[[questions]]
id = 2
domain = "cognitive"
question_text = "Lanjutkan deret: 2, 4, 8, 16, ..."
question_type = "multiple_choice"
options = ["24", "30", "32", "20"]
correct_answer = 2
order_index = 2

[[questions]]
id = 11
domain = "psychological"
question_text = "Saya merasa puas dengan diri saya sendiri"
question_type = "likert"
order_index = 1

[[questions]]
id = 12
domain = "psychological"
question_text = "Saya sering merasa cemas tanpa alasan yang jelas"
question_type = "likert"
order_index = 2

[[questions]]
id = 31
domain = "social"
question_text = "Saya mudah bergaul dengan teman baru"
question_type = "likert"
order_index = 1
"#;
