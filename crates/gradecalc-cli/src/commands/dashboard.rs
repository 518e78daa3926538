//! The `gradecalc dashboard` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecalc_cli::config::{GradecalcConfig, OutputFormat};
use gradecalc_cli::report::TranscriptReport;
use gradecalc_cli::transcript::parse_transcript;
use gradecalc_core::process_dashboard;

pub fn execute(
    transcript_path: PathBuf,
    format: Option<OutputFormat>,
    save: bool,
    output: Option<PathBuf>,
    config: &GradecalcConfig,
) -> Result<()> {
    let transcript = parse_transcript(&transcript_path)?;

    let issues = transcript.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("  {issue}");
        }
        if config.strict {
            anyhow::bail!(
                "transcript has {} validation issue(s); fix them or set strict = false",
                issues.len()
            );
        }
        tracing::warn!(
            issues = issues.len(),
            "transcript failed validation, aggregating anyway"
        );
    }

    let semesters = transcript.to_inputs()?;
    let report = TranscriptReport::new(&transcript.name, process_dashboard(&semesters));

    tracing::info!(
        transcript = %report.transcript,
        semesters = report.dashboard.semesters.len(),
        courses = report.dashboard.course_count(),
        "dashboard computed"
    );

    match format.unwrap_or(config.default_format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Markdown => println!("{}", report.to_markdown(config.precision)),
        OutputFormat::Text => println!("{}", report.to_text(config.precision)),
    }

    if save {
        let dir = output.unwrap_or_else(|| config.output_dir.clone());
        let path = dir.join(report.file_name());
        report.save_json(&path)?;
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}
