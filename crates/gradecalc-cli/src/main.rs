//! gradecalc CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use gradecalc_cli::config::{load_config_from, OutputFormat};

mod commands;

#[derive(Parser)]
#[command(name = "gradecalc", version, about = "GPA and CGPA calculator for quality-point grading")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve obtained marks to a quality point and grade
    Resolve {
        /// Obtained marks (decimals are rounded half up)
        #[arg(long, allow_negative_numbers = true)]
        marks: f64,

        /// Total marks scheme: 20, 40, 60, 80 or 100 (default from config)
        #[arg(long)]
        total: Option<u32>,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Print the quality-point table for a scheme
    Table {
        /// Total marks scheme: 20, 40, 60, 80 or 100
        #[arg(long)]
        total: u32,

        /// Hide failing marks
        #[arg(long)]
        passing_only: bool,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Compute a GPA from courses given on the command line
    Gpa {
        /// Course as CH:TOTAL:OBTAINED, with an optional ":audit" suffix
        #[arg(long = "course", required = true, allow_hyphen_values = true)]
        courses: Vec<String>,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Estimate CGPA from semesters with known GPAs
    Cgpa {
        /// Semester as CH:GPA
        #[arg(long = "semester", required = true, allow_hyphen_values = true)]
        semesters: Vec<String>,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Aggregate a transcript file into semester GPAs and CGPA
    Dashboard {
        /// Path to a .toml transcript
        #[arg(long)]
        transcript: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Save the report as JSON in the configured output directory
        #[arg(long)]
        save: bool,

        /// Output directory (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a transcript file
    Validate {
        /// Path to a .toml transcript
        #[arg(long)]
        transcript: PathBuf,
    },

    /// Create starter config and example transcript
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradecalc=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli.config;
    let config = || load_config_from(config_path.as_deref());

    let result = match cli.command {
        Commands::Resolve {
            marks,
            total,
            format,
        } => config().and_then(|c| commands::resolve::execute(marks, total, format, &c)),
        Commands::Table {
            total,
            passing_only,
            format,
        } => config().and_then(|c| commands::table::execute(total, passing_only, format, &c)),
        Commands::Gpa { courses, format } => {
            config().and_then(|c| commands::gpa::execute(courses, format, &c))
        }
        Commands::Cgpa { semesters, format } => {
            config().and_then(|c| commands::cgpa::execute(semesters, format, &c))
        }
        Commands::Dashboard {
            transcript,
            format,
            save,
            output,
        } => config()
            .and_then(|c| commands::dashboard::execute(transcript, format, save, output, &c)),
        Commands::Validate { transcript } => commands::validate::execute(transcript),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
