//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STANDARD_BANK: &str = "../../question-banks/standard.toml";

/// Keyed options of the standard bank, ids 1–10.
const COGNITIVE_KEY: [i32; 10] = [1, 2, 1, 0, 3, 0, 2, 3, 1, 2];

fn psyscore() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("psyscore").unwrap();
    cmd.env_remove("PSYSCORE_STRICT")
        .env_remove("PSYSCORE_OUTPUT_DIR");
    cmd
}

/// Answers JSON for the standard bank: every cognitive item right and every
/// Likert item at `likert`, with optional overrides.
fn write_answers(dir: &Path, likert: i32, overrides: &[(u32, i32)]) -> PathBuf {
    let mut answers = serde_json::Map::new();
    for (i, key) in COGNITIVE_KEY.iter().enumerate() {
        answers.insert((i + 1).to_string(), (*key).into());
    }
    for id in 11..=50 {
        answers.insert(id.to_string(), likert.into());
    }
    for (id, value) in overrides {
        answers.insert(id.to_string(), (*value).into());
    }
    let path = dir.join("answers.json");
    std::fs::write(&path, serde_json::to_string(&answers).unwrap()).unwrap();
    path
}

fn participant_json(id: i64, name: &str, age: u32, scores: [i64; 4], created_at: &str) -> String {
    format!(
        r#"{{
        "id": {id},
        "name": "{name}",
        "age": {age},
        "gender": null,
        "cognitive_score": {},
        "psychological_score": {},
        "social_score": {},
        "digit_span_score": {},
        "response_time_seconds": 1500,
        "has_straight_lining": false,
        "response_quality": "normal",
        "created_at": "{created_at}",
        "responses": {{"1": 1, "11": 3, "12": 1}}
    }}"#,
        scores[0], scores[1], scores[2], scores[3]
    )
}

fn write_participants(dir: &Path) -> PathBuf {
    let records = [
        participant_json(1, "Andi", 15, [4, 38, 41, 6], "2025-03-01T08:00:00Z"),
        participant_json(2, "Budi", 16, [6, 45, 40, 7], "2025-03-02T08:00:00Z"),
        participant_json(3, "Andi", 15, [5, 50, 44, 8], "2025-03-03T08:00:00Z"),
        participant_json(4, "Citra", 17, [9, 60, 55, 9], "2025-03-04T08:00:00Z"),
    ];
    let path = dir.join("participants.json");
    std::fs::write(&path, format!("[{}]", records.join(","))).unwrap();
    path
}

#[test]
fn validate_standard_bank() {
    psyscore()
        .arg("validate")
        .arg("--bank")
        .arg(STANDARD_BANK)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "50 questions: 10 cognitive, 20 psychological, 20 social",
        ))
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn validate_directory() {
    psyscore()
        .arg("validate")
        .arg("--bank")
        .arg("../../question-banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Standard Assessment"));
}

#[test]
fn validate_nonexistent_file() {
    psyscore()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn score_text_output() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), 3, &[(11, 1)]);

    psyscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--bank")
        .arg(Path::new(env!("CARGO_MANIFEST_DIR")).join(STANDARD_BANK))
        .arg("--answers")
        .arg(&answers)
        .arg("--digit-span")
        .arg("5")
        .arg("--response-time")
        .arg("1500")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kognitif"))
        .stdout(predicate::str::contains("Kemampuan kognitif sangat baik"))
        .stdout(predicate::str::contains("Weak domains: Memori"))
        .stdout(predicate::str::contains("Quality: normal"));
}

#[test]
fn score_json_output() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), 3, &[]);

    let output = psyscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--bank")
        .arg(Path::new(env!("CARGO_MANIFEST_DIR")).join(STANDARD_BANK))
        .arg("--answers")
        .arg(&answers)
        .arg("--digit-span")
        .arg("7")
        .arg("--response-time")
        .arg("300")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["scores"]["cognitive"], 10);
    // 16 items at 3 plus 4 reverse items at 4 - 3.
    assert_eq!(json["scores"]["psychological"], 52);
    assert_eq!(json["scores"]["social"], 56);
    assert_eq!(json["quality"]["straight_lining"], true);
    assert_eq!(json["quality"]["quality"], "invalid");
    assert_eq!(json["weak_domains"].as_array().unwrap().len(), 0);
    assert_eq!(json["mode"], "permissive");
}

#[test]
fn score_strict_rejects_out_of_range() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), 2, &[(11, 9)]);
    let bank = Path::new(env!("CARGO_MANIFEST_DIR")).join(STANDARD_BANK);

    psyscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--bank")
        .arg(&bank)
        .arg("--answers")
        .arg(&answers)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("answer 9 for question 11"));

    // Permissive scoring passes the value through.
    psyscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--bank")
        .arg(&bank)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success();
}

#[test]
fn score_strict_from_env() {
    let dir = TempDir::new().unwrap();
    let answers = write_answers(dir.path(), 2, &[(31, -1)]);

    psyscore()
        .current_dir(dir.path())
        .env("PSYSCORE_STRICT", "true")
        .arg("score")
        .arg("--bank")
        .arg(Path::new(env!("CARGO_MANIFEST_DIR")).join(STANDARD_BANK))
        .arg("--answers")
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn analyze_table_and_summary() {
    let dir = TempDir::new().unwrap();
    let participants = write_participants(dir.path());

    psyscore()
        .arg("analyze")
        .arg("--participants")
        .arg(&participants)
        .assert()
        .success()
        .stdout(predicate::str::contains("Participants: 4"))
        .stdout(predicate::str::contains("Psikologis"));

    psyscore()
        .arg("analyze")
        .arg("--participants")
        .arg(&participants)
        .arg("--format")
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sampel: N = 4"))
        .stdout(predicate::str::contains("Kognitif: M = 6, SD = 1.87"));
}

#[test]
fn analyze_saves_report() {
    let dir = TempDir::new().unwrap();
    let participants = write_participants(dir.path());
    let report = dir.path().join("reports/analytics.json");

    psyscore()
        .arg("analyze")
        .arg("--participants")
        .arg(&participants)
        .arg("--format")
        .arg("markdown")
        .arg("--output")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("| Domain | N |"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["participant_count"], 4);
}

#[test]
fn export_all_formats() {
    let dir = TempDir::new().unwrap();
    let participants = write_participants(dir.path());
    let out = dir.path().join("out");

    psyscore()
        .current_dir(dir.path())
        .arg("export")
        .arg("--participants")
        .arg(&participants)
        .arg("--bank")
        .arg(Path::new(env!("CARGO_MANIFEST_DIR")).join(STANDARD_BANK))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard.csv"))
        .stdout(predicate::str::contains("analytics.html"));

    let dashboard = std::fs::read_to_string(out.join("dashboard.csv")).unwrap();
    assert!(dashboard.starts_with("ID,Nama,Umur,Kognitif,Psikologis,Sosial,Digit Span,Tanggal"));
    assert!(dashboard.contains("1,Andi,15,4,38,41,6,01/03/2025"));

    let codebook = std::fs::read_to_string(out.join("codebook.csv")).unwrap();
    assert!(codebook.contains("psy_q2_r"));
    assert!(codebook.contains("soc_q16_r"));

    let research = std::fs::read_to_string(out.join("research.csv")).unwrap();
    let header = research.lines().next().unwrap();
    assert_eq!(header.split(',').count(), 9 + 50);

    let characteristics = std::fs::read_to_string(out.join("characteristics.txt")).unwrap();
    assert!(characteristics.contains("15 years: 2 (50.0%)"));

    assert!(out.join("analytics.html").exists());
}

#[test]
fn export_uses_configured_output_dir() {
    let dir = TempDir::new().unwrap();
    let participants = write_participants(dir.path());

    psyscore()
        .current_dir(dir.path())
        .env("PSYSCORE_OUTPUT_DIR", "from-env")
        .arg("export")
        .arg("--participants")
        .arg(&participants)
        .arg("--format")
        .arg("csv")
        .assert()
        .success();

    assert!(dir.path().join("from-env/dashboard.csv").exists());
}

#[test]
fn export_research_needs_bank() {
    let dir = TempDir::new().unwrap();
    let participants = write_participants(dir.path());

    psyscore()
        .current_dir(dir.path())
        .arg("export")
        .arg("--participants")
        .arg(&participants)
        .arg("--format")
        .arg("research")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bank"));
}

#[test]
fn export_unknown_format() {
    let dir = TempDir::new().unwrap();
    let participants = write_participants(dir.path());

    psyscore()
        .current_dir(dir.path())
        .arg("export")
        .arg("--participants")
        .arg(&participants)
        .arg("--format")
        .arg("xlsx")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}

#[test]
fn dedupe_dry_run_and_write() {
    let dir = TempDir::new().unwrap();
    let participants = write_participants(dir.path());

    psyscore()
        .arg("dedupe")
        .arg("--participants")
        .arg(&participants)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 duplicate record(s)"))
        .stdout(predicate::str::contains("remove #3 Andi"))
        .stdout(predicate::str::contains("Dry run"));

    let cleaned = dir.path().join("cleaned.json");
    psyscore()
        .arg("dedupe")
        .arg("--participants")
        .arg(&participants)
        .arg("--output")
        .arg(&cleaned)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept 3 record(s)"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&cleaned).unwrap()).unwrap();
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 4]);
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    psyscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created psyscore.toml"))
        .stdout(predicate::str::contains("Created question-banks/example.toml"));

    assert!(dir.path().join("psyscore.toml").exists());
    assert!(dir.path().join("question-banks/example.toml").exists());

    psyscore()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("question-banks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Bank"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    psyscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    psyscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    psyscore()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Psychometric survey scoring and research statistics",
        ));
}

#[test]
fn version_output() {
    psyscore()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("psyscore"));
}
