//! psyscore CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "psyscore",
    version,
    about = "Psychometric survey scoring and research statistics"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one participant's answers
    Score {
        /// Question bank (.toml or .json)
        #[arg(long)]
        bank: PathBuf,

        /// Answers JSON object keyed by question id
        #[arg(long)]
        answers: PathBuf,

        /// Digit span result
        #[arg(long, default_value = "0")]
        digit_span: u32,

        /// Total completion time in seconds
        #[arg(long)]
        response_time: Option<u64>,

        /// Reject out-of-range answers and inconsistent banks
        #[arg(long)]
        strict: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Descriptive statistics over participant records
    Analyze {
        /// Participants JSON export
        #[arg(long)]
        participants: PathBuf,

        /// Output format: table, json, markdown, summary
        #[arg(long, default_value = "table")]
        format: String,

        /// Also save the report as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Write research exports
    Export {
        /// Participants JSON export
        #[arg(long)]
        participants: PathBuf,

        /// Question bank, required for codebook and research exports
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Export format: csv, codebook, research, html, characteristics, all
        #[arg(long, default_value = "all")]
        format: String,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank files
    Validate {
        /// Path to question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Find duplicate participant records by name
    Dedupe {
        /// Participants JSON export
        #[arg(long)]
        participants: PathBuf,

        /// Write the kept records here; without it nothing is written
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("psyscore=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            bank,
            answers,
            digit_span,
            response_time,
            strict,
            format,
            config,
        } => commands::score::execute(
            bank,
            answers,
            digit_span,
            response_time,
            strict,
            format,
            config,
        ),
        Commands::Analyze {
            participants,
            format,
            output,
        } => commands::analyze::execute(participants, format, output),
        Commands::Export {
            participants,
            bank,
            format,
            output,
            config,
        } => commands::export::execute(participants, bank, format, output, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Dedupe {
            participants,
            output,
        } => commands::dedupe::execute(participants, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
