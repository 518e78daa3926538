//! The `gradecalc validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecalc_cli::transcript::parse_transcript;

pub fn execute(transcript_path: PathBuf) -> Result<()> {
    let transcript = parse_transcript(&transcript_path)?;

    println!(
        "Transcript: {} ({} semesters, {} courses)",
        transcript.name,
        transcript.semesters.len(),
        transcript.course_count()
    );

    let issues = transcript.validate();
    for issue in &issues {
        println!("  ERROR: {issue}");
    }

    if issues.is_empty() {
        println!("Transcript valid.");
        Ok(())
    } else {
        anyhow::bail!("{} validation issue(s) found", issues.len())
    }
}
